//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use onboardx_core::error::CoreError;
use onboardx_db::models::employee::Employee;
use onboardx_db::repositories::EmployeeRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload returned on successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub employee: Employee,
}

/// POST /auth/login
///
/// Verify credentials and issue an access token. Invalid email and
/// invalid password return the same message so the endpoint does not
/// leak which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let employee = EmployeeRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let verified = verify_password(&input.password, &employee.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(invalid());
    }

    let token = generate_access_token(employee.id, &employee.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(employee_id = employee.id, "Employee logged in");

    Ok(Json(ApiResponse::data(LoginResponse { token, employee })))
}
