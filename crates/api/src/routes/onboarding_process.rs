//! Route definitions for the `/onboarding-processes` resource.
//!
//! Static segments (`/me`, `/kanban`, `/submissions`) are registered
//! before the `/{id}` routes; axum prefers static matches so the order
//! here is for readability only.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::onboarding_process;
use crate::state::AppState;

/// Routes mounted at `/onboarding-processes`.
///
/// ```text
/// GET   /                            -> list_processes (HR admin)
/// POST  /                            -> create_process (HR admin)
/// GET   /me                          -> get_my_process
/// POST  /me/documents                -> submit_document
/// GET   /kanban/board                -> kanban_board (HR admin)
/// GET   /submissions/pending         -> pending_submissions (HR admin)
/// PATCH /submissions/{id}/approve    -> approve_submission (HR admin)
/// PATCH /submissions/{id}/revise     -> request_revision (HR admin)
/// GET   /{id}                        -> get_process (HR admin)
/// PUT   /{id}/status                 -> update_status (HR admin)
/// PATCH /{id}/status                 -> update_status_kanban (HR admin)
/// PUT   /{id}/tasks/{task_index}     -> update_task (HR admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(onboarding_process::list_processes).post(onboarding_process::create_process),
        )
        // Employee self-service endpoints.
        .route("/me", get(onboarding_process::get_my_process))
        .route("/me/documents", post(onboarding_process::submit_document))
        // Board projection.
        .route("/kanban/board", get(onboarding_process::kanban_board))
        // Document review queue.
        .route(
            "/submissions/pending",
            get(onboarding_process::pending_submissions),
        )
        .route(
            "/submissions/{id}/approve",
            patch(onboarding_process::approve_submission),
        )
        .route(
            "/submissions/{id}/revise",
            patch(onboarding_process::request_revision),
        )
        // Per-process endpoints.
        .route("/{id}", get(onboarding_process::get_process))
        .route(
            "/{id}/status",
            put(onboarding_process::update_status).patch(onboarding_process::update_status_kanban),
        )
        .route(
            "/{id}/tasks/{task_index}",
            put(onboarding_process::update_task),
        )
}
