pub mod auth;
pub mod employee;
pub mod notification;
pub mod offboarding_process;
pub mod onboarding_process;

use onboardx_db::models::notification::NewNotification;
use onboardx_db::models::process::ProcessBoardCard;
use onboardx_db::repositories::NotificationRepo;
use onboardx_db::DbPool;
use serde::Serialize;

/// Insert a notification, swallowing failures.
///
/// Notifications are a side channel: a failed insert is logged but never
/// fails the primary operation, so callers can end up with the primary
/// state changed and no notification sent.
pub(crate) async fn notify_best_effort(pool: &DbPool, input: NewNotification) {
    if let Err(e) = NotificationRepo::create(pool, &input).await {
        tracing::warn!(
            error = %e,
            recipient_id = input.recipient_id,
            notification_type = %input.notification_type,
            "Failed to create notification"
        );
    }
}

/// The kanban board payload: three fixed columns of flattened cards.
#[derive(Debug, Default, Serialize)]
pub struct KanbanBoard {
    pub to_start: Vec<ProcessBoardCard>,
    pub in_progress: Vec<ProcessBoardCard>,
    pub completed: Vec<ProcessBoardCard>,
}

impl KanbanBoard {
    /// Place a card in the named bucket. Unknown bucket names are dropped
    /// (the bucket mapping already filtered hidden statuses).
    pub fn push(&mut self, bucket: &str, card: ProcessBoardCard) {
        match bucket {
            onboardx_core::kanban::BUCKET_TO_START => self.to_start.push(card),
            onboardx_core::kanban::BUCKET_IN_PROGRESS => self.in_progress.push(card),
            onboardx_core::kanban::BUCKET_COMPLETED => self.completed.push(card),
            _ => {}
        }
    }
}
