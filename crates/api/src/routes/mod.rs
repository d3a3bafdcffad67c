pub mod auth;
pub mod employee;
pub mod health;
pub mod notification;
pub mod offboarding_process;
pub mod onboarding_process;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
///
/// /employees                                       list, create (HR admin)
/// /employees/{id}                                  get (HR admin)
///
/// /onboarding-processes                            list (HR admin), create (HR admin)
/// /onboarding-processes/me                         own process (GET)
/// /onboarding-processes/me/documents               submit document (POST)
/// /onboarding-processes/kanban/board               board projection (HR admin)
/// /onboarding-processes/submissions/pending        processes awaiting review (HR admin)
/// /onboarding-processes/submissions/{id}/approve   approve submission (HR admin)
/// /onboarding-processes/submissions/{id}/revise    request revision (HR admin)
/// /onboarding-processes/{id}                       get (HR admin)
/// /onboarding-processes/{id}/status                update status (PUT), kanban alias (PATCH)
/// /onboarding-processes/{id}/tasks/{task_index}    update embedded task (PUT)
///
/// /offboarding-processes                           list (HR admin), create (self or HR admin)
/// /offboarding-processes/kanban/board              board projection (HR admin)
/// /offboarding-processes/{id}                      get (owner or HR admin)
/// /offboarding-processes/{id}/status               update status (PUT), kanban alias (PATCH)
/// /offboarding-processes/{id}/tasks/{task_index}   update embedded task (PUT)
///
/// /notifications                                   list (?unread_only, limit, offset)
/// /notifications/read-all                          mark all read (POST)
/// /notifications/unread-count                      unread count (GET)
/// /notifications/{id}/read                         mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (login only; tokens are short-lived and not refreshed).
        .nest("/auth", auth::router())
        // Employee directory (HR admin).
        .nest("/employees", employee::router())
        // Onboarding workflow (processes, documents, review queue, board).
        .nest("/onboarding-processes", onboarding_process::router())
        // Offboarding workflow (processes, board).
        .nest("/offboarding-processes", offboarding_process::router())
        // In-app notifications.
        .nest("/notifications", notification::router())
}
