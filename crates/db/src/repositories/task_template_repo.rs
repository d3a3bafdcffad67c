//! Repository for the `task_templates` table.

use sqlx::PgPool;

use crate::models::task_template::TaskTemplate;

/// Column list for `task_templates` queries.
const COLUMNS: &str =
    "id, template_key, name, category, timeline_offset_days, duration_days, sort_order, created_at";

/// Read access to onboarding task templates.
pub struct TaskTemplateRepo;

impl TaskTemplateRepo {
    /// All templates under a key, in board order. Empty when the key is
    /// unknown.
    pub async fn list_by_key(
        pool: &PgPool,
        template_key: &str,
    ) -> Result<Vec<TaskTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_templates \
             WHERE template_key = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, TaskTemplate>(&query)
            .bind(template_key)
            .fetch_all(pool)
            .await
    }
}
