//! Repository for the `offboarding_processes` table.
//!
//! Mirrors the onboarding repository's split between the full-record
//! [`OffboardingProcessRepo::save`] (derives `percent_complete` from the
//! counters) and the targeted
//! [`OffboardingProcessRepo::update_status`] (writes it verbatim).

use onboardx_core::progress;
use onboardx_core::status::OFFBOARDING_COMPLETED;
use onboardx_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::process::{NewOffboardingProcess, OffboardingProcess, ProcessBoardCard};

/// Column list for `offboarding_processes` queries.
const COLUMNS: &str = "id, employee_id, status, tasks_json, notes_json, \
     tasks_completed, total_tasks, percent_complete, exit_date, reason, \
     actual_completion_date, created_by, updated_by, created_at, updated_at";

/// Provides CRUD and projection queries for offboarding processes.
pub struct OffboardingProcessRepo;

impl OffboardingProcessRepo {
    /// Insert a new process with its default task list.
    pub async fn create(
        pool: &PgPool,
        input: &NewOffboardingProcess,
    ) -> Result<OffboardingProcess, sqlx::Error> {
        let query = format!(
            "INSERT INTO offboarding_processes \
             (employee_id, status, tasks_json, total_tasks, exit_date, reason, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OffboardingProcess>(&query)
            .bind(input.employee_id)
            .bind(&input.status)
            .bind(Json(&input.tasks))
            .bind(input.tasks.len() as i32)
            .bind(input.exit_date)
            .bind(&input.reason)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OffboardingProcess>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offboarding_processes WHERE id = $1");
        sqlx::query_as::<_, OffboardingProcess>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The employee's non-terminal process, if any (duplicate pre-check).
    pub async fn find_active_by_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Option<OffboardingProcess>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM offboarding_processes \
             WHERE employee_id = $1 AND status <> $2 \
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, OffboardingProcess>(&query)
            .bind(employee_id)
            .bind(OFFBOARDING_COMPLETED)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<OffboardingProcess>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offboarding_processes ORDER BY created_at DESC");
        sqlx::query_as::<_, OffboardingProcess>(&query)
            .fetch_all(pool)
            .await
    }

    /// Full-record save. Re-derives `percent_complete` from the counters
    /// and stamps `updated_at`.
    pub async fn save(
        pool: &PgPool,
        process: &OffboardingProcess,
    ) -> Result<OffboardingProcess, sqlx::Error> {
        let percent = progress::percent_complete(process.tasks_completed, process.total_tasks);
        let query = format!(
            "UPDATE offboarding_processes SET \
             status = $2, tasks_json = $3, notes_json = $4, \
             tasks_completed = $5, total_tasks = $6, percent_complete = $7, \
             actual_completion_date = $8, updated_by = $9, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OffboardingProcess>(&query)
            .bind(process.id)
            .bind(&process.status)
            .bind(Json(&*process.tasks_json))
            .bind(Json(&*process.notes_json))
            .bind(process.tasks_completed)
            .bind(process.total_tasks)
            .bind(percent)
            .bind(process.actual_completion_date)
            .bind(process.updated_by)
            .fetch_one(pool)
            .await
    }

    /// Targeted status update; `None` when the id does not resolve.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        percent_complete: Option<i32>,
        set_completion_date: bool,
        updated_by: Option<DbId>,
    ) -> Result<Option<OffboardingProcess>, sqlx::Error> {
        let query = format!(
            "UPDATE offboarding_processes SET \
             status = $2, \
             percent_complete = COALESCE($3, percent_complete), \
             actual_completion_date = CASE WHEN $4 THEN NOW() ELSE actual_completion_date END, \
             updated_by = $5, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OffboardingProcess>(&query)
            .bind(id)
            .bind(status)
            .bind(percent_complete)
            .bind(set_completion_date)
            .bind(updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Flattened board entries, newest first. All statuses are shown;
    /// bucketing happens in the handler.
    pub async fn board_cards(pool: &PgPool) -> Result<Vec<ProcessBoardCard>, sqlx::Error> {
        sqlx::query_as::<_, ProcessBoardCard>(
            "SELECT p.id AS process_id, e.id AS employee_id, \
                    e.first_name || ' ' || e.last_name AS employee_name, \
                    e.email, e.department, e.position, \
                    p.status, p.percent_complete, p.exit_date AS key_date \
             FROM offboarding_processes p \
             JOIN employees e ON e.id = p.employee_id \
             ORDER BY p.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }
}
