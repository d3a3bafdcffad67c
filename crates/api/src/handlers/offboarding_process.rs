//! Handlers for the `/offboarding-processes` resource.
//!
//! Offboarding can be opened by the departing employee themself or by an
//! HR admin. Creation attaches the fixed default task list; HR admins get
//! a fan-out notification.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use onboardx_core::error::CoreError;
use onboardx_core::kanban::offboarding_bucket;
use onboardx_core::notifications::{
    NOTIFY_OFFBOARDING_INITIATED, NOTIFY_OFFBOARDING_STATUS_CHANGED,
};
use onboardx_core::progress::{PERCENT_COMPLETE, PERCENT_STARTED_PLACEHOLDER};
use onboardx_core::roles::ROLE_HR_ADMIN;
use onboardx_core::status::{
    offboarding_status_from_alias, validate_offboarding_status, OFFBOARDING_COMPLETED,
    OFFBOARDING_INITIATED, OFFBOARDING_IN_PROGRESS,
};
use onboardx_core::tasks::{DEFAULT_OFFBOARDING_TASKS, TASK_NOT_STARTED};
use onboardx_core::types::DbId;
use onboardx_db::models::notification::NewNotification;
use onboardx_db::models::process::{
    apply_task_status, NewOffboardingProcess, OffboardingProcess, ProcessTask,
};
use onboardx_db::repositories::{EmployeeRepo, OffboardingProcessRepo};
use onboardx_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::{notify_best_effort, KanbanBoard};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireHrAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body for `POST /offboarding-processes`.
#[derive(Debug, Deserialize)]
pub struct CreateProcessRequest {
    /// Defaults to the caller. Non-admins may only offboard themselves.
    pub employee_id: Option<DbId>,
    pub exit_date: NaiveDate,
    pub reason: Option<String>,
}

/// Body for `PUT /offboarding-processes/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Body for `PATCH /offboarding-processes/{id}/status` (kanban columns).
#[derive(Debug, Deserialize)]
pub struct KanbanStatusRequest {
    pub status: String,
}

/// Body for `PUT /offboarding-processes/{id}/tasks/{task_index}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub status: String,
    pub assigned_to: Option<DbId>,
    pub due_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// POST /offboarding-processes
///
/// Open an offboarding process. Attaches the five default tasks and
/// notifies every HR admin. Duplicate-active-process creation fails with
/// 400 (find-then-create check; not atomic).
pub async fn create_process(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProcessRequest>,
) -> AppResult<impl IntoResponse> {
    let employee_id = input.employee_id.unwrap_or(auth.employee_id);
    if auth.role != ROLE_HR_ADMIN && employee_id != auth.employee_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only HR admins may offboard other employees".into(),
        )));
    }

    let employee = EmployeeRepo::find_by_id(&state.pool, employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: employee_id,
        }))?;

    if OffboardingProcessRepo::find_active_by_employee(&state.pool, employee.id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Employee already has an active offboarding process".into(),
        ));
    }

    let now = Utc::now();
    let tasks: Vec<ProcessTask> = DEFAULT_OFFBOARDING_TASKS
        .iter()
        .map(|(name, category)| ProcessTask {
            task_id: None,
            name: name.to_string(),
            status: TASK_NOT_STARTED.to_string(),
            category: Some(category.to_string()),
            assigned_to: None,
            assigned_date: now,
            due_date: Some(input.exit_date),
            completed_date: None,
        })
        .collect();

    let process = OffboardingProcessRepo::create(
        &state.pool,
        &NewOffboardingProcess {
            employee_id: employee.id,
            status: OFFBOARDING_INITIATED.to_string(),
            tasks,
            exit_date: input.exit_date,
            reason: input.reason.clone(),
            created_by: Some(auth.employee_id),
        },
    )
    .await?;

    mirror_employee_status(&state.pool, employee.id, OFFBOARDING_IN_PROGRESS).await;
    notify_hr_admins(&state.pool, &employee.first_name, &employee.last_name, &process).await;

    tracing::info!(
        process_id = process.id,
        employee_id = employee.id,
        "Offboarding process created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::data(process))))
}

/// Fan out an "offboarding initiated" notification to every HR admin,
/// best-effort.
async fn notify_hr_admins(
    pool: &DbPool,
    first_name: &str,
    last_name: &str,
    process: &OffboardingProcess,
) {
    let admin_ids = match EmployeeRepo::list_hr_admin_ids(pool).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to resolve HR admins for notification");
            return;
        }
    };
    for admin_id in admin_ids {
        notify_best_effort(
            pool,
            NewNotification {
                recipient_id: admin_id,
                notification_type: NOTIFY_OFFBOARDING_INITIATED.to_string(),
                title: "Offboarding initiated".to_string(),
                message: format!(
                    "{first_name} {last_name} is leaving on {}",
                    process.exit_date
                ),
                process_id: Some(process.id),
            },
        )
        .await;
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /offboarding-processes
pub async fn list_processes(
    RequireHrAdmin(_user): RequireHrAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let processes = OffboardingProcessRepo::list_all(&state.pool).await?;
    Ok(Json(ApiResponse::data(processes)))
}

/// GET /offboarding-processes/{id}
///
/// Visible to HR admins and to the employee the process belongs to.
pub async fn get_process(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(process_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let process = find_process(&state.pool, process_id).await?;
    ensure_owner_or_admin(&auth, &process)?;
    Ok(Json(ApiResponse::data(process)))
}

// ---------------------------------------------------------------------------
// Status updates
// ---------------------------------------------------------------------------

/// PUT /offboarding-processes/{id}/status
pub async fn update_status(
    RequireHrAdmin(user): RequireHrAdmin,
    State(state): State<AppState>,
    Path(process_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    validate_offboarding_status(&input.status)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let updated = apply_status(&state.pool, process_id, &input.status, user.employee_id).await?;
    Ok(Json(ApiResponse::data(updated)))
}

/// PATCH /offboarding-processes/{id}/status
///
/// Kanban drag-and-drop variant accepting front-end column aliases.
pub async fn update_status_kanban(
    RequireHrAdmin(user): RequireHrAdmin,
    State(state): State<AppState>,
    Path(process_id): Path<DbId>,
    Json(input): Json<KanbanStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status = offboarding_status_from_alias(&input.status).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown kanban column '{}'",
            input.status
        )))
    })?;

    let updated = apply_status(&state.pool, process_id, status, user.employee_id).await?;
    Ok(Json(ApiResponse::data(updated)))
}

/// Shared status-update path for the PUT and PATCH endpoints.
async fn apply_status(
    pool: &DbPool,
    process_id: DbId,
    status: &str,
    updated_by: DbId,
) -> AppResult<OffboardingProcess> {
    let process = find_process(pool, process_id).await?;

    let completing = status == OFFBOARDING_COMPLETED;
    let percent = if completing {
        Some(PERCENT_COMPLETE)
    } else if process.percent_complete == 0 {
        Some(PERCENT_STARTED_PLACEHOLDER)
    } else {
        None
    };

    let updated = OffboardingProcessRepo::update_status(
        pool,
        process_id,
        status,
        percent,
        completing,
        Some(updated_by),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Offboarding process",
        id: process_id,
    }))?;

    mirror_employee_status(pool, updated.employee_id, status).await;
    notify_best_effort(
        pool,
        NewNotification {
            recipient_id: updated.employee_id,
            notification_type: NOTIFY_OFFBOARDING_STATUS_CHANGED.to_string(),
            title: "Offboarding status updated".to_string(),
            message: format!("Your offboarding is now '{status}'"),
            process_id: Some(updated.id),
        },
    )
    .await;

    tracing::info!(process_id, status, "Offboarding status updated");
    Ok(updated)
}

// ---------------------------------------------------------------------------
// Embedded tasks
// ---------------------------------------------------------------------------

/// PUT /offboarding-processes/{id}/tasks/{task_index}
///
/// Update one embedded task, addressed by position. Permitted for HR
/// admins and for the process owner.
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((process_id, task_index)): Path<(DbId, usize)>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<impl IntoResponse> {
    let mut process = find_process(&state.pool, process_id).await?;
    ensure_owner_or_admin(&auth, &process)?;

    let delta = apply_task_status(
        &mut process.tasks_json,
        task_index,
        &input.status,
        input.assigned_to,
        input.due_date,
        Utc::now(),
    )
    .map_err(AppError::Core)?;

    process.tasks_completed = (process.tasks_completed + delta).max(0);
    process.updated_by = Some(auth.employee_id);

    let saved = OffboardingProcessRepo::save(&state.pool, &process).await?;

    tracing::info!(
        process_id,
        task_index,
        status = %input.status,
        tasks_completed = saved.tasks_completed,
        "Offboarding task updated"
    );

    Ok(Json(ApiResponse::data(saved)))
}

// ---------------------------------------------------------------------------
// Kanban board
// ---------------------------------------------------------------------------

/// GET /offboarding-processes/kanban/board
///
/// All processes flattened into three columns, newest first.
pub async fn kanban_board(
    RequireHrAdmin(_user): RequireHrAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let cards = OffboardingProcessRepo::board_cards(&state.pool).await?;

    let mut board = KanbanBoard::default();
    for card in cards {
        if let Some(bucket) = offboarding_bucket(&card.status) {
            board.push(bucket, card);
        }
    }

    Ok(Json(ApiResponse::data(board)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_process(pool: &DbPool, process_id: DbId) -> AppResult<OffboardingProcess> {
    OffboardingProcessRepo::find_by_id(pool, process_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Offboarding process",
            id: process_id,
        }))
}

fn ensure_owner_or_admin(auth: &AuthUser, process: &OffboardingProcess) -> AppResult<()> {
    if auth.role != ROLE_HR_ADMIN && process.employee_id != auth.employee_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not your offboarding process".into(),
        )));
    }
    Ok(())
}

/// Best-effort write to the employee's denormalized offboarding status.
async fn mirror_employee_status(pool: &DbPool, employee_id: DbId, status: &str) {
    if let Err(e) = EmployeeRepo::set_offboarding_status(pool, employee_id, status).await {
        tracing::warn!(error = %e, employee_id, "Failed to mirror offboarding status");
    }
}
