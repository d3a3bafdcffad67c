//! Repository for the `onboarding_processes` table.
//!
//! Two write paths exist on purpose:
//!
//! - [`OnboardingProcessRepo::save`] writes the whole record and derives
//!   `percent_complete` from the task counters — the task-mutation path.
//! - The targeted updates ([`OnboardingProcessRepo::update_status`],
//!   [`OnboardingProcessRepo::update_review`]) write `percent_complete`
//!   verbatim, which is how the status and review handlers force the
//!   fixed 50/75/100 values.

use onboardx_core::progress;
use onboardx_core::status::{ONBOARDING_COMPLETED, ONBOARDING_TERMINATED};
use onboardx_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::process::{
    NewOnboardingProcess, OnboardingProcess, ProcessBoardCard, ProcessDocument, ProcessNote,
};

/// Column list for `onboarding_processes` queries.
const COLUMNS: &str = "id, employee_id, status, tasks_json, documents_json, notes_json, \
     tasks_completed, total_tasks, percent_complete, start_date, expected_completion_date, \
     actual_completion_date, created_by, updated_by, created_at, updated_at";

/// Provides CRUD and projection queries for onboarding processes.
pub struct OnboardingProcessRepo;

impl OnboardingProcessRepo {
    /// Insert a new process with its generated task and document lists.
    ///
    /// `total_tasks` is set to the task list length; `percent_complete`
    /// starts at 0.
    pub async fn create(
        pool: &PgPool,
        input: &NewOnboardingProcess,
    ) -> Result<OnboardingProcess, sqlx::Error> {
        let query = format!(
            "INSERT INTO onboarding_processes \
             (employee_id, status, tasks_json, documents_json, total_tasks, start_date, \
              expected_completion_date, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingProcess>(&query)
            .bind(input.employee_id)
            .bind(&input.status)
            .bind(Json(&input.tasks))
            .bind(Json(&input.documents))
            .bind(input.tasks.len() as i32)
            .bind(input.start_date)
            .bind(input.expected_completion_date)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OnboardingProcess>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_processes WHERE id = $1");
        sqlx::query_as::<_, OnboardingProcess>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The employee's newest process of any status (for the `/me` view).
    pub async fn find_latest_by_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Option<OnboardingProcess>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM onboarding_processes \
             WHERE employee_id = $1 ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, OnboardingProcess>(&query)
            .bind(employee_id)
            .fetch_optional(pool)
            .await
    }

    /// The employee's non-terminal process, if any. Backs the
    /// one-active-process-per-employee pre-check (check-then-insert; not
    /// atomic).
    pub async fn find_active_by_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Option<OnboardingProcess>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM onboarding_processes \
             WHERE employee_id = $1 AND status NOT IN ($2, $3) \
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, OnboardingProcess>(&query)
            .bind(employee_id)
            .bind(ONBOARDING_COMPLETED)
            .bind(ONBOARDING_TERMINATED)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<OnboardingProcess>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_processes ORDER BY created_at DESC");
        sqlx::query_as::<_, OnboardingProcess>(&query)
            .fetch_all(pool)
            .await
    }

    /// Full-record save. Re-derives `percent_complete` from the counters
    /// (0 when `total_tasks` is 0) and stamps `updated_at`.
    pub async fn save(
        pool: &PgPool,
        process: &OnboardingProcess,
    ) -> Result<OnboardingProcess, sqlx::Error> {
        let percent = progress::percent_complete(process.tasks_completed, process.total_tasks);
        let query = format!(
            "UPDATE onboarding_processes SET \
             status = $2, tasks_json = $3, documents_json = $4, notes_json = $5, \
             tasks_completed = $6, total_tasks = $7, percent_complete = $8, \
             expected_completion_date = $9, actual_completion_date = $10, \
             updated_by = $11, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingProcess>(&query)
            .bind(process.id)
            .bind(&process.status)
            .bind(Json(&*process.tasks_json))
            .bind(Json(&*process.documents_json))
            .bind(Json(&*process.notes_json))
            .bind(process.tasks_completed)
            .bind(process.total_tasks)
            .bind(percent)
            .bind(process.expected_completion_date)
            .bind(process.actual_completion_date)
            .bind(process.updated_by)
            .fetch_one(pool)
            .await
    }

    /// Targeted status update. Writes `percent_complete` verbatim when
    /// given; optionally stamps `actual_completion_date`. Returns `None`
    /// when the id does not resolve.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        percent_complete: Option<i32>,
        set_completion_date: bool,
        updated_by: Option<DbId>,
    ) -> Result<Option<OnboardingProcess>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_processes SET \
             status = $2, \
             percent_complete = COALESCE($3, percent_complete), \
             actual_completion_date = CASE WHEN $4 THEN NOW() ELSE actual_completion_date END, \
             updated_by = $5, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingProcess>(&query)
            .bind(id)
            .bind(status)
            .bind(percent_complete)
            .bind(set_completion_date)
            .bind(updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Targeted review update: replaces the document list, appends the
    /// given notes, and forces status/progress in one statement.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_review(
        pool: &PgPool,
        id: DbId,
        status: &str,
        percent_complete: i32,
        documents: &[ProcessDocument],
        notes: &[ProcessNote],
        set_completion_date: bool,
        updated_by: Option<DbId>,
    ) -> Result<Option<OnboardingProcess>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_processes SET \
             status = $2, percent_complete = $3, documents_json = $4, notes_json = $5, \
             actual_completion_date = CASE WHEN $6 THEN NOW() ELSE actual_completion_date END, \
             updated_by = $7, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingProcess>(&query)
            .bind(id)
            .bind(status)
            .bind(percent_complete)
            .bind(Json(documents))
            .bind(Json(notes))
            .bind(set_completion_date)
            .bind(updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Processes with at least one document awaiting review.
    pub async fn list_pending_review(
        pool: &PgPool,
    ) -> Result<Vec<OnboardingProcess>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM onboarding_processes \
             WHERE documents_json @> '[{{\"status\": \"pending_review\"}}]' \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, OnboardingProcess>(&query)
            .fetch_all(pool)
            .await
    }

    /// Flattened board entries, newest first. Terminated processes are
    /// excluded; bucketing happens in the handler.
    pub async fn board_cards(pool: &PgPool) -> Result<Vec<ProcessBoardCard>, sqlx::Error> {
        sqlx::query_as::<_, ProcessBoardCard>(
            "SELECT p.id AS process_id, e.id AS employee_id, \
                    e.first_name || ' ' || e.last_name AS employee_name, \
                    e.email, e.department, e.position, \
                    p.status, p.percent_complete, p.start_date AS key_date \
             FROM onboarding_processes p \
             JOIN employees e ON e.id = p.employee_id \
             WHERE p.status <> $1 \
             ORDER BY p.created_at DESC",
        )
        .bind(ONBOARDING_TERMINATED)
        .fetch_all(pool)
        .await
    }
}
