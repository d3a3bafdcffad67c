//! Handlers for the `/onboarding-processes` resource.
//!
//! The process record is the source of truth; the employee row carries a
//! denormalized status mirror that is updated best-effort after the
//! primary write. Secondary writes (mirror, notifications) never fail the
//! request.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use onboardx_core::documents::{
    DEFAULT_ONBOARDING_DOCUMENTS, DOCUMENT_APPROVED, DOCUMENT_PENDING, DOCUMENT_PENDING_REVIEW,
};
use onboardx_core::error::CoreError;
use onboardx_core::kanban::onboarding_bucket;
use onboardx_core::notifications::{
    NOTIFY_ONBOARDING_APPROVED, NOTIFY_ONBOARDING_REVISION_REQUESTED, NOTIFY_ONBOARDING_STARTED,
    NOTIFY_ONBOARDING_STATUS_CHANGED,
};
use onboardx_core::progress::{PERCENT_COMPLETE, PERCENT_REVISION, PERCENT_STARTED_PLACEHOLDER};
use onboardx_core::status::{
    onboarding_status_from_alias, validate_onboarding_status, ONBOARDING_COMPLETED,
    ONBOARDING_IN_PROGRESS, ONBOARDING_NOT_STARTED,
};
use onboardx_core::tasks::{template_due_date, TASK_NOT_STARTED};
use onboardx_core::types::DbId;
use onboardx_db::models::notification::NewNotification;
use onboardx_db::models::process::{
    apply_task_status, NewOnboardingProcess, OnboardingProcess, ProcessDocument, ProcessNote,
    ProcessTask,
};
use onboardx_db::repositories::{EmployeeRepo, OnboardingProcessRepo, TaskTemplateRepo};
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

/// Body for `POST /onboarding-processes`.
#[derive(Debug, Deserialize)]
pub struct CreateProcessRequest {
    pub employee_id: DbId,
    pub start_date: NaiveDate,
    pub expected_completion_date: Option<NaiveDate>,
    /// Optional task template key; tasks are generated with due dates
    /// offset from the start date.
    pub template_key: Option<String>,
}

/// Body for `PUT /onboarding-processes/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Body for `PATCH /onboarding-processes/{id}/status` (kanban columns).
#[derive(Debug, Deserialize)]
pub struct KanbanStatusRequest {
    /// Front-end column alias, e.g. `toStart`, `inProgress`, `completed`.
    pub status: String,
}

/// Body for `PUT /onboarding-processes/{id}/tasks/{task_index}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub status: String,
    pub assigned_to: Option<DbId>,
    pub due_date: Option<NaiveDate>,
}

/// Body for `POST /onboarding-processes/me/documents`.
#[derive(Debug, Deserialize)]
pub struct SubmitDocumentRequest {
    pub name: String,
    pub document_id: Option<DbId>,
}

/// Body for `PATCH /onboarding-processes/submissions/{id}/revise`.
#[derive(Debug, Deserialize)]
pub struct RevisionRequest {
    pub message: Option<String>,
    #[serde(default)]
    pub missing_items: Vec<String>,
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// POST /onboarding-processes
///
/// Create an onboarding process for an employee. Fails with 404 when the
/// employee does not exist and 400 when they already have a non-terminal
/// process (a find-then-create check; not atomic).
pub async fn create_process(
    RequireHrAdmin(user): RequireHrAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProcessRequest>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::find_by_id(&state.pool, input.employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        }))?;

    if OnboardingProcessRepo::find_active_by_employee(&state.pool, employee.id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Employee already has an active onboarding process".into(),
        ));
    }

    let tasks = match &input.template_key {
        Some(key) => generate_template_tasks(&state.pool, key, input.start_date).await?,
        None => Vec::new(),
    };

    let documents: Vec<ProcessDocument> = DEFAULT_ONBOARDING_DOCUMENTS
        .iter()
        .map(|(name, required)| ProcessDocument {
            document_id: None,
            name: name.to_string(),
            status: DOCUMENT_PENDING.to_string(),
            required: *required,
            completed_date: None,
        })
        .collect();

    let process = OnboardingProcessRepo::create(
        &state.pool,
        &NewOnboardingProcess {
            employee_id: employee.id,
            status: ONBOARDING_NOT_STARTED.to_string(),
            tasks,
            documents,
            start_date: input.start_date,
            expected_completion_date: input.expected_completion_date,
            created_by: Some(user.employee_id),
        },
    )
    .await?;

    mirror_employee_status(&state.pool, employee.id, ONBOARDING_IN_PROGRESS).await;
    notify_best_effort(
        &state.pool,
        NewNotification {
            recipient_id: employee.id,
            notification_type: NOTIFY_ONBOARDING_STARTED.to_string(),
            title: "Your onboarding has started".to_string(),
            message: format!("Onboarding begins on {}", process.start_date),
            process_id: Some(process.id),
        },
    )
    .await;

    tracing::info!(
        process_id = process.id,
        employee_id = employee.id,
        total_tasks = process.total_tasks,
        "Onboarding process created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::data(process))))
}

/// Generate embedded tasks from a template key. An unknown key yields an
/// empty task list rather than an error.
async fn generate_template_tasks(
    pool: &DbPool,
    template_key: &str,
    start_date: NaiveDate,
) -> AppResult<Vec<ProcessTask>> {
    let templates = TaskTemplateRepo::list_by_key(pool, template_key).await?;
    let now = Utc::now();
    Ok(templates
        .into_iter()
        .map(|t| ProcessTask {
            task_id: Some(t.id),
            name: t.name,
            status: TASK_NOT_STARTED.to_string(),
            category: t.category,
            assigned_to: None,
            assigned_date: now,
            due_date: Some(template_due_date(
                start_date,
                t.timeline_offset_days,
                t.duration_days,
            )),
            completed_date: None,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /onboarding-processes
pub async fn list_processes(
    RequireHrAdmin(_user): RequireHrAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let processes = OnboardingProcessRepo::list_all(&state.pool).await?;
    Ok(Json(ApiResponse::data(processes)))
}

/// GET /onboarding-processes/me
///
/// The authenticated employee's own (newest) onboarding process.
pub async fn get_my_process(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let process = OnboardingProcessRepo::find_latest_by_employee(&state.pool, auth.employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Onboarding process for employee",
            id: auth.employee_id,
        }))?;
    Ok(Json(ApiResponse::data(process)))
}

/// GET /onboarding-processes/{id}
pub async fn get_process(
    RequireHrAdmin(_user): RequireHrAdmin,
    State(state): State<AppState>,
    Path(process_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let process = find_process(&state.pool, process_id).await?;
    Ok(Json(ApiResponse::data(process)))
}

// ---------------------------------------------------------------------------
// Status updates
// ---------------------------------------------------------------------------

/// PUT /onboarding-processes/{id}/status
///
/// Set the process status directly (enum-validated, no transition table).
/// Reaching `completed` stamps the completion date and forces progress to
/// 100; leaving the initial status with no completed tasks writes the
/// fixed 50% placeholder.
pub async fn update_status(
    RequireHrAdmin(user): RequireHrAdmin,
    State(state): State<AppState>,
    Path(process_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    validate_onboarding_status(&input.status)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let updated = apply_status(&state.pool, process_id, &input.status, user.employee_id).await?;
    Ok(Json(ApiResponse::data(updated)))
}

/// PATCH /onboarding-processes/{id}/status
///
/// Kanban drag-and-drop variant: accepts front-end column aliases and, on
/// completion, additionally activates the employee account.
pub async fn update_status_kanban(
    RequireHrAdmin(user): RequireHrAdmin,
    State(state): State<AppState>,
    Path(process_id): Path<DbId>,
    Json(input): Json<KanbanStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status = onboarding_status_from_alias(&input.status).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown kanban column '{}'",
            input.status
        )))
    })?;

    let updated = apply_status(&state.pool, process_id, status, user.employee_id).await?;

    if status == ONBOARDING_COMPLETED {
        if let Err(e) = EmployeeRepo::set_active(&state.pool, updated.employee_id, true).await {
            tracing::warn!(error = %e, employee_id = updated.employee_id, "Failed to activate employee");
        }
    }

    Ok(Json(ApiResponse::data(updated)))
}

/// Shared status-update path for the PUT and PATCH endpoints.
async fn apply_status(
    pool: &DbPool,
    process_id: DbId,
    status: &str,
    updated_by: DbId,
) -> AppResult<OnboardingProcess> {
    let process = find_process(pool, process_id).await?;

    let completing = status == ONBOARDING_COMPLETED;
    let percent = if completing {
        Some(PERCENT_COMPLETE)
    } else if process.percent_complete == 0 {
        // Placeholder estimate for a process that just started moving;
        // not derived from actual task completion.
        Some(PERCENT_STARTED_PLACEHOLDER)
    } else {
        None
    };

    let updated = OnboardingProcessRepo::update_status(
        pool,
        process_id,
        status,
        percent,
        completing,
        Some(updated_by),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Onboarding process",
        id: process_id,
    }))?;

    mirror_employee_status(pool, updated.employee_id, status).await;
    notify_best_effort(
        pool,
        NewNotification {
            recipient_id: updated.employee_id,
            notification_type: NOTIFY_ONBOARDING_STATUS_CHANGED.to_string(),
            title: "Onboarding status updated".to_string(),
            message: format!("Your onboarding is now '{status}'"),
            process_id: Some(updated.id),
        },
    )
    .await;

    tracing::info!(process_id, status, "Onboarding status updated");
    Ok(updated)
}

// ---------------------------------------------------------------------------
// Embedded tasks
// ---------------------------------------------------------------------------

/// PUT /onboarding-processes/{id}/tasks/{task_index}
///
/// Update one embedded task, addressed by position. Completion bumps the
/// `tasks_completed` counter (floored at zero on un-completion); the save
/// re-derives `percent_complete` from the counters.
pub async fn update_task(
    RequireHrAdmin(user): RequireHrAdmin,
    State(state): State<AppState>,
    Path((process_id, task_index)): Path<(DbId, usize)>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<impl IntoResponse> {
    let mut process = find_process(&state.pool, process_id).await?;

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
    process.updated_by = Some(user.employee_id);

    let saved = OnboardingProcessRepo::save(&state.pool, &process).await?;

    tracing::info!(
        process_id,
        task_index,
        status = %input.status,
        tasks_completed = saved.tasks_completed,
        "Onboarding task updated"
    );

    Ok(Json(ApiResponse::data(saved)))
}

// ---------------------------------------------------------------------------
// Kanban board
// ---------------------------------------------------------------------------

/// GET /onboarding-processes/kanban/board
///
/// All non-terminated processes flattened into three columns. Full
/// collection scan, newest first; no pagination.
pub async fn kanban_board(
    RequireHrAdmin(_user): RequireHrAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let cards = OnboardingProcessRepo::board_cards(&state.pool).await?;

    let mut board = KanbanBoard::default();
    for card in cards {
        if let Some(bucket) = onboarding_bucket(&card.status) {
            board.push(bucket, card);
        }
    }

    Ok(Json(ApiResponse::data(board)))
}

// ---------------------------------------------------------------------------
// Document submission & review
// ---------------------------------------------------------------------------

/// POST /onboarding-processes/me/documents
///
/// Record the submission of a named document on the caller's own process,
/// moving it to `pending_review`. Unknown names are appended to the
/// checklist as optional documents.
pub async fn submit_document(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitDocumentRequest>,
) -> AppResult<impl IntoResponse> {
    let mut process = OnboardingProcessRepo::find_latest_by_employee(&state.pool, auth.employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Onboarding process for employee",
            id: auth.employee_id,
        }))?;

    match process
        .documents_json
        .iter_mut()
        .find(|d| d.name == input.name)
    {
        Some(doc) => {
            doc.status = DOCUMENT_PENDING_REVIEW.to_string();
            doc.completed_date = None;
            if input.document_id.is_some() {
                doc.document_id = input.document_id;
            }
        }
        None => process.documents_json.push(ProcessDocument {
            document_id: input.document_id,
            name: input.name.clone(),
            status: DOCUMENT_PENDING_REVIEW.to_string(),
            required: false,
            completed_date: None,
        }),
    }
    process.updated_by = Some(auth.employee_id);

    let saved = OnboardingProcessRepo::save(&state.pool, &process).await?;

    tracing::info!(
        process_id = saved.id,
        document = %input.name,
        "Document submitted for review"
    );

    Ok(Json(ApiResponse::data(saved)))
}

/// GET /onboarding-processes/submissions/pending
///
/// Processes with at least one document awaiting review.
pub async fn pending_submissions(
    RequireHrAdmin(_user): RequireHrAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let processes = OnboardingProcessRepo::list_pending_review(&state.pool).await?;
    Ok(Json(ApiResponse::data(processes)))
}

/// PATCH /onboarding-processes/submissions/{id}/approve
///
/// Approve the submission: every `pending_review` document becomes
/// `approved`, the process completes at 100%, and the employee account is
/// activated. Calling it again re-applies the same terminal state.
pub async fn approve_submission(
    RequireHrAdmin(user): RequireHrAdmin,
    State(state): State<AppState>,
    Path(process_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let process = find_process(&state.pool, process_id).await?;

    let now = Utc::now();
    let documents: Vec<ProcessDocument> = process
        .documents_json
        .iter()
        .cloned()
        .map(|mut doc| {
            if doc.status == DOCUMENT_PENDING_REVIEW {
                doc.status = DOCUMENT_APPROVED.to_string();
                doc.completed_date = Some(now);
            }
            doc
        })
        .collect();

    let updated = OnboardingProcessRepo::update_review(
        &state.pool,
        process_id,
        ONBOARDING_COMPLETED,
        PERCENT_COMPLETE,
        &documents,
        &process.notes_json,
        true,
        Some(user.employee_id),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Onboarding process",
        id: process_id,
    }))?;

    mirror_employee_status(&state.pool, updated.employee_id, ONBOARDING_COMPLETED).await;
    if let Err(e) = EmployeeRepo::set_active(&state.pool, updated.employee_id, true).await {
        tracing::warn!(error = %e, employee_id = updated.employee_id, "Failed to activate employee");
    }
    notify_best_effort(
        &state.pool,
        NewNotification {
            recipient_id: updated.employee_id,
            notification_type: NOTIFY_ONBOARDING_APPROVED.to_string(),
            title: "Onboarding approved".to_string(),
            message: "Your onboarding submission has been approved. Welcome aboard!".to_string(),
            process_id: Some(updated.id),
        },
    )
    .await;

    tracing::info!(process_id, "Onboarding submission approved");
    Ok(Json(ApiResponse::data_with_message(
        updated,
        "Submission approved",
    )))
}

/// PATCH /onboarding-processes/submissions/{id}/revise
///
/// Send the submission back: appends one feedback note, drops the process
/// to `in_progress` at the fixed 75% mark, and notifies the employee with
/// the list of missing items.
pub async fn request_revision(
    RequireHrAdmin(user): RequireHrAdmin,
    State(state): State<AppState>,
    Path(process_id): Path<DbId>,
    Json(input): Json<RevisionRequest>,
) -> AppResult<impl IntoResponse> {
    let process = find_process(&state.pool, process_id).await?;

    let mut body = input
        .message
        .clone()
        .unwrap_or_else(|| "Revision requested".to_string());
    if !input.missing_items.is_empty() {
        body.push_str(&format!(" Missing: {}", input.missing_items.join(", ")));
    }

    let mut notes = process.notes_json.to_vec();
    notes.push(ProcessNote {
        author_id: Some(user.employee_id),
        category: "feedback".to_string(),
        body: body.clone(),
        created_at: Utc::now(),
    });

    let updated = OnboardingProcessRepo::update_review(
        &state.pool,
        process_id,
        ONBOARDING_IN_PROGRESS,
        PERCENT_REVISION,
        &process.documents_json,
        &notes,
        false,
        Some(user.employee_id),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Onboarding process",
        id: process_id,
    }))?;

    mirror_employee_status(&state.pool, updated.employee_id, ONBOARDING_IN_PROGRESS).await;
    notify_best_effort(
        &state.pool,
        NewNotification {
            recipient_id: updated.employee_id,
            notification_type: NOTIFY_ONBOARDING_REVISION_REQUESTED.to_string(),
            title: "Onboarding revision requested".to_string(),
            message: body,
            process_id: Some(updated.id),
        },
    )
    .await;

    tracing::info!(process_id, "Onboarding revision requested");
    Ok(Json(ApiResponse::data_with_message(
        updated,
        "Revision requested",
    )))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_process(pool: &DbPool, process_id: DbId) -> AppResult<OnboardingProcess> {
    OnboardingProcessRepo::find_by_id(pool, process_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Onboarding process",
            id: process_id,
        }))
}

/// Best-effort write to the employee's denormalized onboarding status.
async fn mirror_employee_status(pool: &DbPool, employee_id: DbId, status: &str) {
    if let Err(e) = EmployeeRepo::set_onboarding_status(pool, employee_id, status).await {
        tracing::warn!(error = %e, employee_id, "Failed to mirror onboarding status");
    }
}
