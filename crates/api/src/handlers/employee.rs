//! Handlers for the `/employees` resource.
//!
//! A minimal surface so HR can seed accounts; the process handlers own
//! all workflow state on these records.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use onboardx_core::error::CoreError;
use onboardx_core::roles::{ROLE_EMPLOYEE, ROLE_HR_ADMIN, ROLE_MANAGER};
use onboardx_core::types::DbId;
use onboardx_db::models::employee::NewEmployee;
use onboardx_db::repositories::EmployeeRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireHrAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Body for `POST /employees`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    /// Defaults to `employee`.
    pub role: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

/// POST /employees
///
/// Create an employee account. Duplicate emails surface as 409 via the
/// unique constraint.
pub async fn create_employee(
    RequireHrAdmin(_user): RequireHrAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateEmployeeRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let role = input.role.unwrap_or_else(|| ROLE_EMPLOYEE.to_string());
    if ![ROLE_HR_ADMIN, ROLE_MANAGER, ROLE_EMPLOYEE].contains(&role.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid role '{role}'"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let employee = EmployeeRepo::create(
        &state.pool,
        &NewEmployee {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            role,
            department: input.department,
            position: input.position,
            password_hash,
        },
    )
    .await?;

    tracing::info!(employee_id = employee.id, "Employee created");

    Ok((StatusCode::CREATED, Json(ApiResponse::data(employee))))
}

/// GET /employees
pub async fn list_employees(
    RequireHrAdmin(_user): RequireHrAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let employees = EmployeeRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::data(employees)))
}

/// GET /employees/{id}
pub async fn get_employee(
    RequireHrAdmin(_user): RequireHrAdmin,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::find_by_id(&state.pool, employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: employee_id,
        }))?;
    Ok(Json(ApiResponse::data(employee)))
}
