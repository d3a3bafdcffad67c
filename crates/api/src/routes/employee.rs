//! Route definitions for the `/employees` resource.
//!
//! All endpoints require the HR admin role.

use axum::routing::get;
use axum::Router;

use crate::handlers::employee;
use crate::state::AppState;

/// Routes mounted at `/employees`.
///
/// ```text
/// GET  /      -> list_employees
/// POST /      -> create_employee
/// GET  /{id}  -> get_employee
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(employee::list_employees).post(employee::create_employee),
        )
        .route("/{id}", get(employee::get_employee))
}
