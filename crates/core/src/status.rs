//! Process status vocabularies and kanban alias mapping.
//!
//! These must match the values stored in the `status` column of
//! `onboarding_processes` and `offboarding_processes`. There is no
//! transition table: any valid status may be set from any other, and the
//! handlers only validate membership in the vocabulary.

/// Onboarding process has been created but no work has started.
pub const ONBOARDING_NOT_STARTED: &str = "not_started";
/// Onboarding work is underway.
pub const ONBOARDING_IN_PROGRESS: &str = "in_progress";
/// Onboarding finished successfully (terminal).
pub const ONBOARDING_COMPLETED: &str = "completed";
/// Onboarding paused, e.g. delayed start date.
pub const ONBOARDING_ON_HOLD: &str = "on_hold";
/// Onboarding abandoned, e.g. offer rescinded (terminal).
pub const ONBOARDING_TERMINATED: &str = "terminated";

/// All valid onboarding status values.
pub const VALID_ONBOARDING_STATUSES: &[&str] = &[
    ONBOARDING_NOT_STARTED,
    ONBOARDING_IN_PROGRESS,
    ONBOARDING_COMPLETED,
    ONBOARDING_ON_HOLD,
    ONBOARDING_TERMINATED,
];

/// Offboarding process has been opened (initial status).
pub const OFFBOARDING_INITIATED: &str = "initiated";
/// Offboarding work is underway.
pub const OFFBOARDING_IN_PROGRESS: &str = "in_progress";
/// Offboarding finished (terminal).
pub const OFFBOARDING_COMPLETED: &str = "completed";

/// All valid offboarding status values.
pub const VALID_OFFBOARDING_STATUSES: &[&str] = &[
    OFFBOARDING_INITIATED,
    OFFBOARDING_IN_PROGRESS,
    OFFBOARDING_COMPLETED,
];

/// Validate that a status string is a member of the onboarding vocabulary.
pub fn validate_onboarding_status(status: &str) -> Result<(), String> {
    if VALID_ONBOARDING_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid onboarding status '{status}'. Must be one of: {}",
            VALID_ONBOARDING_STATUSES.join(", ")
        ))
    }
}

/// Validate that a status string is a member of the offboarding vocabulary.
pub fn validate_offboarding_status(status: &str) -> Result<(), String> {
    if VALID_OFFBOARDING_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid offboarding status '{status}'. Must be one of: {}",
            VALID_OFFBOARDING_STATUSES.join(", ")
        ))
    }
}

/// Whether an onboarding status is terminal (no active work remains).
pub fn is_onboarding_terminal(status: &str) -> bool {
    status == ONBOARDING_COMPLETED || status == ONBOARDING_TERMINATED
}

/// Whether an offboarding status is terminal.
pub fn is_offboarding_terminal(status: &str) -> bool {
    status == OFFBOARDING_COMPLETED
}

/// Map a front-end kanban column alias to an onboarding status.
///
/// The admin panel's board sends camelCase column names; the stored
/// vocabulary is snake_case. Unknown aliases map to `None`.
pub fn onboarding_status_from_alias(alias: &str) -> Option<&'static str> {
    match alias {
        "toStart" => Some(ONBOARDING_NOT_STARTED),
        "inProgress" => Some(ONBOARDING_IN_PROGRESS),
        "completed" => Some(ONBOARDING_COMPLETED),
        _ => None,
    }
}

/// Map a front-end kanban column alias to an offboarding status.
pub fn offboarding_status_from_alias(alias: &str) -> Option<&'static str> {
    match alias {
        "toStart" => Some(OFFBOARDING_INITIATED),
        "inProgress" => Some(OFFBOARDING_IN_PROGRESS),
        "completed" => Some(OFFBOARDING_COMPLETED),
        _ => None,
    }
}
