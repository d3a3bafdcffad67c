//! HTTP-level integration tests for the onboarding workflow.
//!
//! Covers process creation (with and without a task template), the two
//! status-update paths, positional task updates, the kanban board, and
//! the document submission/review cycle.

mod common;

use axum::http::StatusCode;
use onboardx_core::roles::{ROLE_EMPLOYEE, ROLE_HR_ADMIN};
use onboardx_db::repositories::{EmployeeRepo, NotificationRepo};
use sqlx::PgPool;

async fn seed_admin_and_hire(pool: &PgPool) -> (i64, String, i64, String) {
    let admin = common::seed_employee(pool, "hr@example.com", ROLE_HR_ADMIN).await;
    let hire = common::seed_employee(pool, "hire@example.com", ROLE_EMPLOYEE).await;
    let admin_token = common::token_for(admin.id, &admin.role);
    let hire_token = common::token_for(hire.id, &hire.role);
    (admin.id, admin_token, hire.id, hire_token)
}

async fn create_process(
    pool: &PgPool,
    token: &str,
    employee_id: i64,
    template_key: Option<&str>,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "employee_id": employee_id,
        "start_date": "2026-09-01",
        "expected_completion_date": "2026-09-30",
        "template_key": template_key,
    });
    let response = common::post_json_auth(app, "/api/v1/onboarding-processes", body, token).await;
    common::expect_status(response, StatusCode::CREATED).await
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_without_template_starts_empty(pool: PgPool) {
    let (_, admin_token, hire_id, _) = seed_admin_and_hire(&pool).await;

    let json = create_process(&pool, &admin_token, hire_id, None).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "not_started");
    assert_eq!(json["data"]["total_tasks"], 0);
    assert_eq!(json["data"]["percent_complete"], 0);
    assert_eq!(
        json["data"]["documents_json"].as_array().unwrap().len(),
        4,
        "default document checklist attached"
    );

    // The employee mirror moves to in_progress and a notification lands.
    let hire = EmployeeRepo::find_by_id(&pool, hire_id).await.unwrap().unwrap();
    assert_eq!(hire.onboarding_status.as_deref(), Some("in_progress"));
    assert_eq!(NotificationRepo::unread_count(&pool, hire_id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_with_template_generates_tasks(pool: PgPool) {
    let (_, admin_token, hire_id, _) = seed_admin_and_hire(&pool).await;

    let json = create_process(&pool, &admin_token, hire_id, Some("default")).await;
    assert_eq!(json["data"]["total_tasks"], 6);

    let tasks = json["data"]["tasks_json"].as_array().unwrap();
    assert_eq!(tasks.len(), 6);
    assert_eq!(tasks[0]["name"], "Sign employment contract");
    assert_eq!(tasks[0]["status"], "not_started");
    // start_date + offset 0 + duration 1
    assert_eq!(tasks[0]["due_date"], "2026-09-02");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_second_active_process_rejected(pool: PgPool) {
    let (_, admin_token, hire_id, _) = seed_admin_and_hire(&pool).await;
    create_process(&pool, &admin_token, hire_id, None).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "employee_id": hire_id, "start_date": "2026-09-01" });
    let response =
        common::post_json_auth(app, "/api/v1/onboarding-processes", body, &admin_token).await;
    let json = common::expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_for_unknown_employee_is_404(pool: PgPool) {
    let admin = common::seed_employee(&pool, "hr@example.com", ROLE_HR_ADMIN).await;
    let token = common::token_for(admin.id, &admin.role);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "employee_id": 9999, "start_date": "2026-09-01" });
    let response = common::post_json_auth(app, "/api/v1/onboarding-processes", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_requires_hr_admin(pool: PgPool) {
    let (_, _, hire_id, hire_token) = seed_admin_and_hire(&pool).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "employee_id": hire_id, "start_date": "2026-09-01" });
    let response =
        common::post_json_auth(app, "/api/v1/onboarding-processes", body, &hire_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Status updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_put_status_applies_progress_placeholder(pool: PgPool) {
    let (_, admin_token, hire_id, _) = seed_admin_and_hire(&pool).await;
    let created = create_process(&pool, &admin_token, hire_id, None).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "in_progress" });
    let response = common::put_json_auth(
        app,
        &format!("/api/v1/onboarding-processes/{id}/status"),
        body,
        &admin_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::OK).await;

    // Placeholder 50 even though no task exists.
    assert_eq!(json["data"]["status"], "in_progress");
    assert_eq!(json["data"]["percent_complete"], 50);
    assert!(json["data"]["actual_completion_date"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_put_status_rejects_unknown_value(pool: PgPool) {
    let (_, admin_token, hire_id, _) = seed_admin_and_hire(&pool).await;
    let created = create_process(&pool, &admin_token, hire_id, None).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "status": "finished" });
    let response = common::put_json_auth(
        app,
        &format!("/api/v1/onboarding-processes/{id}/status"),
        body,
        &admin_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_kanban_patch_completion_activates_employee(pool: PgPool) {
    let (_, admin_token, hire_id, _) = seed_admin_and_hire(&pool).await;
    let created = create_process(&pool, &admin_token, hire_id, None).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "completed" });
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/onboarding-processes/{id}/status"),
        body,
        &admin_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["status"], "completed");
    assert_eq!(json["data"]["percent_complete"], 100);
    assert!(!json["data"]["actual_completion_date"].is_null());

    let hire = EmployeeRepo::find_by_id(&pool, hire_id).await.unwrap().unwrap();
    assert!(hire.is_active, "completion activates the account");
    assert_eq!(hire.onboarding_status.as_deref(), Some("completed"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_kanban_patch_rejects_unknown_column(pool: PgPool) {
    let (_, admin_token, hire_id, _) = seed_admin_and_hire(&pool).await;
    let created = create_process(&pool, &admin_token, hire_id, None).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "status": "doneColumn" });
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/onboarding-processes/{id}/status"),
        body,
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Embedded tasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_task_completion_roundtrip_floors_counter(pool: PgPool) {
    let (_, admin_token, hire_id, _) = seed_admin_and_hire(&pool).await;
    let created = create_process(&pool, &admin_token, hire_id, Some("default")).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/onboarding-processes/{id}/tasks/0");

    // Complete the first task: counter 1, percent 1/6 -> 17.
    let app = common::build_test_app(pool.clone());
    let response = common::put_json_auth(
        app,
        &uri,
        serde_json::json!({ "status": "completed" }),
        &admin_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["tasks_completed"], 1);
    assert_eq!(json["data"]["percent_complete"], 17);
    assert!(!json["data"]["tasks_json"][0]["completed_date"].is_null());

    // Revert it: back to zero, never negative.
    let app = common::build_test_app(pool.clone());
    let response = common::put_json_auth(
        app,
        &uri,
        serde_json::json!({ "status": "not_started" }),
        &admin_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["tasks_completed"], 0);
    assert_eq!(json["data"]["percent_complete"], 0);
    assert!(json["data"]["tasks_json"][0]["completed_date"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_task_index_out_of_bounds_rejected(pool: PgPool) {
    let (_, admin_token, hire_id, _) = seed_admin_and_hire(&pool).await;
    let created = create_process(&pool, &admin_token, hire_id, None).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = common::put_json_auth(
        app,
        &format!("/api/v1/onboarding-processes/{id}/tasks/5"),
        serde_json::json!({ "status": "completed" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Reads and board
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_own_process(pool: PgPool) {
    let (_, admin_token, hire_id, hire_token) = seed_admin_and_hire(&pool).await;

    // 404 before any process exists.
    let app = common::build_test_app(pool.clone());
    let response = common::get_auth(app, "/api/v1/onboarding-processes/me", &hire_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    create_process(&pool, &admin_token, hire_id, None).await;

    let app = common::build_test_app(pool);
    let response = common::get_auth(app, "/api/v1/onboarding-processes/me", &hire_token).await;
    let json = common::expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["employee_id"], hire_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_kanban_board_buckets_statuses(pool: PgPool) {
    let (_, admin_token, _, _) = seed_admin_and_hire(&pool).await;

    let fresh = common::seed_employee(&pool, "fresh@example.com", ROLE_EMPLOYEE).await;
    let moving = common::seed_employee(&pool, "moving@example.com", ROLE_EMPLOYEE).await;

    create_process(&pool, &admin_token, fresh.id, None).await;
    let created = create_process(&pool, &admin_token, moving.id, None).await;
    let moving_process = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    common::put_json_auth(
        app,
        &format!("/api/v1/onboarding-processes/{moving_process}/status"),
        serde_json::json!({ "status": "on_hold" }),
        &admin_token,
    )
    .await;

    let app = common::build_test_app(pool);
    let response =
        common::get_auth(app, "/api/v1/onboarding-processes/kanban/board", &admin_token).await;
    let json = common::expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["to_start"].as_array().unwrap().len(), 1);
    // on_hold lands in the in_progress column.
    assert_eq!(json["data"]["in_progress"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["completed"].as_array().unwrap().len(), 0);
    assert_eq!(
        json["data"]["to_start"][0]["employee_name"],
        "Test Employee"
    );
}

// ---------------------------------------------------------------------------
// Document submission and review
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_document_review_cycle(pool: PgPool) {
    let (_, admin_token, hire_id, hire_token) = seed_admin_and_hire(&pool).await;
    let created = create_process(&pool, &admin_token, hire_id, None).await;
    let id = created["data"]["id"].as_i64().unwrap();

    // Employee submits a checklist document.
    let app = common::build_test_app(pool.clone());
    let response = common::post_json_auth(
        app,
        "/api/v1/onboarding-processes/me/documents",
        serde_json::json!({ "name": "Signed contract" }),
        &hire_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::OK).await;
    let docs = json["data"]["documents_json"].as_array().unwrap();
    let contract = docs.iter().find(|d| d["name"] == "Signed contract").unwrap();
    assert_eq!(contract["status"], "pending_review");

    // The process shows up in the review queue.
    let app = common::build_test_app(pool.clone());
    let response = common::get_auth(
        app,
        "/api/v1/onboarding-processes/submissions/pending",
        &admin_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["id"], id);

    // Revision: one feedback note, back to in_progress at 75%.
    let app = common::build_test_app(pool.clone());
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/onboarding-processes/submissions/{id}/revise"),
        serde_json::json!({ "message": "Contract unsigned", "missing_items": ["Signature page"] }),
        &admin_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "in_progress");
    assert_eq!(json["data"]["percent_complete"], 75);
    let notes = json["data"]["notes_json"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["category"], "feedback");
    assert!(notes[0]["body"]
        .as_str()
        .unwrap()
        .contains("Missing: Signature page"));

    // Resubmit, then approve: documents approved, process completed at 100.
    let app = common::build_test_app(pool.clone());
    common::post_json_auth(
        app,
        "/api/v1/onboarding-processes/me/documents",
        serde_json::json!({ "name": "Signed contract" }),
        &hire_token,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/onboarding-processes/submissions/{id}/approve"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "completed");
    assert_eq!(json["data"]["percent_complete"], 100);
    let docs = json["data"]["documents_json"].as_array().unwrap();
    let contract = docs.iter().find(|d| d["name"] == "Signed contract").unwrap();
    assert_eq!(contract["status"], "approved");
    assert!(!contract["completed_date"].is_null());

    let hire = EmployeeRepo::find_by_id(&pool, hire_id).await.unwrap().unwrap();
    assert!(hire.is_active);
    assert_eq!(hire.onboarding_status.as_deref(), Some("completed"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_already_completed_reapplies_terminal_state(pool: PgPool) {
    let (_, admin_token, hire_id, hire_token) = seed_admin_and_hire(&pool).await;
    let created = create_process(&pool, &admin_token, hire_id, None).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    common::post_json_auth(
        app,
        "/api/v1/onboarding-processes/me/documents",
        serde_json::json!({ "name": "Signed contract" }),
        &hire_token,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/onboarding-processes/submissions/{id}/approve"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    common::expect_status(response, StatusCode::OK).await;

    // A repeat approve on the completed process re-applies the same
    // terminal state rather than rejecting it.
    let app = common::build_test_app(pool.clone());
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/onboarding-processes/submissions/{id}/approve"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "completed");
    assert_eq!(json["data"]["percent_complete"], 100);
    let docs = json["data"]["documents_json"].as_array().unwrap();
    let contract = docs.iter().find(|d| d["name"] == "Signed contract").unwrap();
    assert_eq!(contract["status"], "approved");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_document_name_appended_as_optional(pool: PgPool) {
    let (_, admin_token, hire_id, hire_token) = seed_admin_and_hire(&pool).await;
    create_process(&pool, &admin_token, hire_id, None).await;

    let app = common::build_test_app(pool);
    let response = common::post_json_auth(
        app,
        "/api/v1/onboarding-processes/me/documents",
        serde_json::json!({ "name": "Portfolio" }),
        &hire_token,
    )
    .await;
    let json = common::expect_status(response, StatusCode::OK).await;

    let docs = json["data"]["documents_json"].as_array().unwrap();
    assert_eq!(docs.len(), 5);
    let extra = docs.iter().find(|d| d["name"] == "Portfolio").unwrap();
    assert_eq!(extra["status"], "pending_review");
    assert_eq!(extra["required"], false);
}
