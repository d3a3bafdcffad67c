//! Employee entity model and DTOs.

use onboardx_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `employees` table.
///
/// `onboarding_status` and `offboarding_status` are denormalized mirrors
/// of the corresponding process record's status. Nothing enforces
/// consistency between the two copies; the process handlers update the
/// mirror best-effort after the primary write.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
    pub position: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub onboarding_status: Option<String>,
    pub offboarding_status: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new employee. The password arrives already hashed;
/// hashing is the API layer's concern.
#[derive(Debug)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub password_hash: String,
}
