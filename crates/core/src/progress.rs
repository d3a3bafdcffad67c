//! Progress counter arithmetic for process records.
//!
//! `percent_complete` is derived from the `tasks_completed`/`total_tasks`
//! counters on every full-record save. The status and review paths bypass
//! that derivation and write fixed placeholder values directly; those
//! constants live here so the handlers and tests agree on them.

/// Progress written when a process reaches `completed`.
pub const PERCENT_COMPLETE: i32 = 100;

/// Placeholder progress written when a process leaves its initial status
/// while no tasks have been completed yet. A crude estimate, not derived
/// from the task list.
pub const PERCENT_STARTED_PLACEHOLDER: i32 = 50;

/// Progress written when a submission is sent back for revision.
pub const PERCENT_REVISION: i32 = 75;

/// Derive a completion percentage from the progress counters.
///
/// Returns `round(completed / total * 100)`, or 0 when `total` is zero.
/// Counters are clamped so a drifted `tasks_completed` above `total_tasks`
/// never reports more than 100.
pub fn percent_complete(tasks_completed: i32, total_tasks: i32) -> i32 {
    if total_tasks <= 0 {
        return 0;
    }
    let completed = tasks_completed.clamp(0, total_tasks);
    ((completed as f64 / total_tasks as f64) * 100.0).round() as i32
}
