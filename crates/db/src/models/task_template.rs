//! Task template entity model.

use onboardx_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `task_templates` table.
///
/// Templates are grouped by `template_key`; creating an onboarding
/// process with a template key attaches one embedded task per row, with
/// the due date computed as `start_date + timeline_offset_days +
/// duration_days`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskTemplate {
    pub id: DbId,
    pub template_key: String,
    pub name: String,
    pub category: Option<String>,
    pub timeline_offset_days: i32,
    pub duration_days: i32,
    pub sort_order: i32,
    pub created_at: Timestamp,
}
