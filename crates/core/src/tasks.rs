//! Embedded task status constants and task-generation rules.
//!
//! Tasks live inside a process record's `tasks_json` column and carry
//! their own status, independent of any task template they were generated
//! from. Nothing keeps the two in sync.

use chrono::{Days, NaiveDate};

/// Task has not been picked up yet.
pub const TASK_NOT_STARTED: &str = "not_started";
/// Task is being worked on.
pub const TASK_IN_PROGRESS: &str = "in_progress";
/// Task is done; sets `completed_date` and bumps the process counter.
pub const TASK_COMPLETED: &str = "completed";

/// All valid embedded-task status values.
pub const VALID_TASK_STATUSES: &[&str] = &[TASK_NOT_STARTED, TASK_IN_PROGRESS, TASK_COMPLETED];

/// Validate that a task status string is one of the accepted values.
pub fn validate_task_status(status: &str) -> Result<(), String> {
    if VALID_TASK_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid task status '{status}'. Must be one of: {}",
            VALID_TASK_STATUSES.join(", ")
        ))
    }
}

/// The fixed task list attached to every new offboarding process, as
/// `(name, category)` pairs, in board order.
pub const DEFAULT_OFFBOARDING_TASKS: &[(&str, &str)] = &[
    ("Exit interview", "hr"),
    ("Asset return", "equipment"),
    ("Knowledge transfer", "handover"),
    ("Access revocation", "it"),
    ("Final documentation", "hr"),
];

/// Compute a templated task's due date.
///
/// Templates carry a timeline offset (days from the start date at which
/// the task becomes relevant) and an expected duration; the due date is
/// the start date plus both.
pub fn template_due_date(
    start_date: NaiveDate,
    timeline_offset_days: i32,
    duration_days: i32,
) -> NaiveDate {
    let total = (timeline_offset_days.max(0) + duration_days.max(0)) as u64;
    start_date
        .checked_add_days(Days::new(total))
        .unwrap_or(start_date)
}
