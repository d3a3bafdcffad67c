//! Kanban board bucket mapping.
//!
//! The board groups process records into three fixed columns. Mapping is
//! a pure function of the stored status; every status maps to at most one
//! bucket, so no record can appear in two columns.

use crate::status;

/// Board column for processes that have not started yet.
pub const BUCKET_TO_START: &str = "to_start";
/// Board column for processes with work underway (includes `on_hold`).
pub const BUCKET_IN_PROGRESS: &str = "in_progress";
/// Board column for finished processes.
pub const BUCKET_COMPLETED: &str = "completed";

/// The three board columns, in display order.
pub const BUCKETS: &[&str] = &[BUCKET_TO_START, BUCKET_IN_PROGRESS, BUCKET_COMPLETED];

/// Map an onboarding status to its board bucket.
///
/// `terminated` processes are not shown on the board and map to `None`.
pub fn onboarding_bucket(process_status: &str) -> Option<&'static str> {
    match process_status {
        status::ONBOARDING_NOT_STARTED => Some(BUCKET_TO_START),
        status::ONBOARDING_IN_PROGRESS | status::ONBOARDING_ON_HOLD => Some(BUCKET_IN_PROGRESS),
        status::ONBOARDING_COMPLETED => Some(BUCKET_COMPLETED),
        _ => None,
    }
}

/// Map an offboarding status to its board bucket.
pub fn offboarding_bucket(process_status: &str) -> Option<&'static str> {
    match process_status {
        status::OFFBOARDING_INITIATED => Some(BUCKET_TO_START),
        status::OFFBOARDING_IN_PROGRESS => Some(BUCKET_IN_PROGRESS),
        status::OFFBOARDING_COMPLETED => Some(BUCKET_COMPLETED),
        _ => None,
    }
}
