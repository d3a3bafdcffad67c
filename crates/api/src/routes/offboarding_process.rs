//! Route definitions for the `/offboarding-processes` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::offboarding_process;
use crate::state::AppState;

/// Routes mounted at `/offboarding-processes`.
///
/// ```text
/// GET   /                          -> list_processes (HR admin)
/// POST  /                          -> create_process (self or HR admin)
/// GET   /kanban/board              -> kanban_board (HR admin)
/// GET   /{id}                      -> get_process (owner or HR admin)
/// PUT   /{id}/status               -> update_status (HR admin)
/// PATCH /{id}/status               -> update_status_kanban (HR admin)
/// PUT   /{id}/tasks/{task_index}   -> update_task (owner or HR admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(offboarding_process::list_processes).post(offboarding_process::create_process),
        )
        .route("/kanban/board", get(offboarding_process::kanban_board))
        .route("/{id}", get(offboarding_process::get_process))
        .route(
            "/{id}/status",
            put(offboarding_process::update_status)
                .patch(offboarding_process::update_status_kanban),
        )
        .route(
            "/{id}/tasks/{task_index}",
            put(offboarding_process::update_task),
        )
}
