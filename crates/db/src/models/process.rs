//! Process record models: onboarding and offboarding workflows.
//!
//! The two process tables are structurally parallel. Task lists, document
//! lists, and notes are embedded JSONB arrays rather than child tables,
//! matching how the admin panel consumes them: whole-record reads and
//! whole-record writes. Tasks are addressed positionally by array index.

use chrono::NaiveDate;
use onboardx_core::error::CoreError;
use onboardx_core::tasks::{validate_task_status, TASK_COMPLETED};
use onboardx_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Embedded sub-records (stored in JSONB columns)
// ---------------------------------------------------------------------------

/// One entry in a process record's `tasks_json` array.
///
/// `task_id` references a task template when the task was generated from
/// one; the embedded `status` is independent of the template and of any
/// other copy of the task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessTask {
    pub task_id: Option<DbId>,
    pub name: String,
    pub status: String,
    pub category: Option<String>,
    pub assigned_to: Option<DbId>,
    pub assigned_date: Timestamp,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<Timestamp>,
}

/// One entry in an onboarding process record's `documents_json` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessDocument {
    pub document_id: Option<DbId>,
    pub name: String,
    pub status: String,
    pub required: bool,
    pub completed_date: Option<Timestamp>,
}

/// One entry in a process record's append-only `notes_json` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessNote {
    pub author_id: Option<DbId>,
    pub category: String,
    pub body: String,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// A row from the `onboarding_processes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingProcess {
    pub id: DbId,
    pub employee_id: DbId,
    pub status: String,
    pub tasks_json: Json<Vec<ProcessTask>>,
    pub documents_json: Json<Vec<ProcessDocument>>,
    pub notes_json: Json<Vec<ProcessNote>>,
    pub tasks_completed: i32,
    pub total_tasks: i32,
    pub percent_complete: i32,
    pub start_date: NaiveDate,
    pub expected_completion_date: Option<NaiveDate>,
    pub actual_completion_date: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `offboarding_processes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OffboardingProcess {
    pub id: DbId,
    pub employee_id: DbId,
    pub status: String,
    pub tasks_json: Json<Vec<ProcessTask>>,
    pub notes_json: Json<Vec<ProcessNote>>,
    pub tasks_completed: i32,
    pub total_tasks: i32,
    pub percent_complete: i32,
    pub exit_date: NaiveDate,
    pub reason: Option<String>,
    pub actual_completion_date: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Insert DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a new onboarding process.
#[derive(Debug)]
pub struct NewOnboardingProcess {
    pub employee_id: DbId,
    pub status: String,
    pub tasks: Vec<ProcessTask>,
    pub documents: Vec<ProcessDocument>,
    pub start_date: NaiveDate,
    pub expected_completion_date: Option<NaiveDate>,
    pub created_by: Option<DbId>,
}

/// DTO for inserting a new offboarding process.
#[derive(Debug)]
pub struct NewOffboardingProcess {
    pub employee_id: DbId,
    pub status: String,
    pub tasks: Vec<ProcessTask>,
    pub exit_date: NaiveDate,
    pub reason: Option<String>,
    pub created_by: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Board projection
// ---------------------------------------------------------------------------

/// A process record flattened to the fields the kanban board UI renders.
///
/// `key_date` is the start date for onboarding cards and the exit date
/// for offboarding cards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProcessBoardCard {
    pub process_id: DbId,
    pub employee_id: DbId,
    pub employee_name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: String,
    pub percent_complete: i32,
    pub key_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Embedded task mutation
// ---------------------------------------------------------------------------

/// Apply a status change to the task at `task_index`, returning the delta
/// to apply to the process's `tasks_completed` counter (-1, 0, or +1).
///
/// Marking a task `completed` stamps `completed_date`; moving it off
/// `completed` clears the stamp. The caller owns the counter update and
/// must floor it at zero.
pub fn apply_task_status(
    tasks: &mut [ProcessTask],
    task_index: usize,
    new_status: &str,
    assigned_to: Option<DbId>,
    due_date: Option<NaiveDate>,
    now: Timestamp,
) -> Result<i32, CoreError> {
    validate_task_status(new_status).map_err(CoreError::Validation)?;

    let task = tasks.get_mut(task_index).ok_or_else(|| {
        CoreError::Validation(format!("No task at index {task_index}"))
    })?;

    let was_completed = task.status == TASK_COMPLETED;
    let is_completed = new_status == TASK_COMPLETED;

    task.status = new_status.to_string();
    if let Some(assignee) = assigned_to {
        task.assigned_to = Some(assignee);
    }
    if let Some(due) = due_date {
        task.due_date = Some(due);
    }

    let delta = match (was_completed, is_completed) {
        (false, true) => {
            task.completed_date = Some(now);
            1
        }
        (true, false) => {
            task.completed_date = None;
            -1
        }
        _ => 0,
    };
    Ok(delta)
}
