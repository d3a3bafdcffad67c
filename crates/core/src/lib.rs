//! Domain logic for the OnboardX HR workflow service.
//!
//! Pure functions and constants shared by the DB and API layers. No I/O
//! lives here; everything is unit-testable without a database.

pub mod documents;
pub mod error;
pub mod kanban;
pub mod notifications;
pub mod progress;
pub mod roles;
pub mod status;
pub mod tasks;
pub mod types;
