//! HTTP-level integration tests for employee management and RBAC.

mod common;

use axum::http::StatusCode;
use onboardx_core::roles::{ROLE_EMPLOYEE, ROLE_HR_ADMIN};
use sqlx::PgPool;

fn create_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "email": email,
        "password": "a-long-enough-password",
        "department": "Engineering",
        "position": "Rear Admiral"
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_hr_admin_creates_employee(pool: PgPool) {
    let admin = common::seed_employee(&pool, "hr@example.com", ROLE_HR_ADMIN).await;
    let token = common::token_for(admin.id, &admin.role);
    let app = common::build_test_app(pool);

    let response =
        common::post_json_auth(app, "/api/v1/employees", create_body("grace@example.com"), &token)
            .await;
    let json = common::expect_status(response, StatusCode::CREATED).await;

    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["email"], "grace@example.com");
    assert_eq!(json["data"]["role"], ROLE_EMPLOYEE);
    assert_eq!(json["data"]["is_active"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_email_returns_conflict(pool: PgPool) {
    let admin = common::seed_employee(&pool, "hr@example.com", ROLE_HR_ADMIN).await;
    let token = common::token_for(admin.id, &admin.role);

    let app = common::build_test_app(pool.clone());
    let first =
        common::post_json_auth(app, "/api/v1/employees", create_body("dup@example.com"), &token)
            .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let second =
        common::post_json_auth(app, "/api/v1/employees", create_body("dup@example.com"), &token)
            .await;
    let json = common::expect_status(second, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_admin_cannot_manage_employees(pool: PgPool) {
    let employee = common::seed_employee(&pool, "emp@example.com", ROLE_EMPLOYEE).await;
    let token = common::token_for(employee.id, &employee.role);

    let app = common::build_test_app(pool.clone());
    let response =
        common::post_json_auth(app, "/api/v1/employees", create_body("x@example.com"), &token)
            .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = common::get_auth(app, "/api/v1/employees", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_role_and_weak_password_rejected(pool: PgPool) {
    let admin = common::seed_employee(&pool, "hr@example.com", ROLE_HR_ADMIN).await;
    let token = common::token_for(admin.id, &admin.role);

    let mut body = create_body("badrole@example.com");
    body["role"] = "superuser".into();
    let app = common::build_test_app(pool.clone());
    let response = common::post_json_auth(app, "/api/v1/employees", body, &token).await;
    let json = common::expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let mut body = create_body("shortpw@example.com");
    body["password"] = "short".into();
    let app = common::build_test_app(pool);
    let response = common::post_json_auth(app, "/api/v1/employees", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_and_get_employee(pool: PgPool) {
    let admin = common::seed_employee(&pool, "hr@example.com", ROLE_HR_ADMIN).await;
    let other = common::seed_employee(&pool, "other@example.com", ROLE_EMPLOYEE).await;
    let token = common::token_for(admin.id, &admin.role);

    let app = common::build_test_app(pool.clone());
    let response = common::get_auth(app, "/api/v1/employees", &token).await;
    let json = common::expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let response =
        common::get_auth(app, &format!("/api/v1/employees/{}", other.id), &token).await;
    let json = common::expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["email"], "other@example.com");

    let app = common::build_test_app(pool);
    let response = common::get_auth(app, "/api/v1/employees/9999", &token).await;
    let json = common::expect_status(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
