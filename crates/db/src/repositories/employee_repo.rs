//! Repository for the `employees` table.

use onboardx_core::roles::ROLE_HR_ADMIN;
use onboardx_core::types::DbId;
use sqlx::PgPool;

use crate::models::employee::{Employee, NewEmployee};

/// Column list for `employees` queries.
const COLUMNS: &str = "id, first_name, last_name, email, role, department, position, \
     password_hash, is_active, onboarding_status, offboarding_status, created_at, updated_at";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee.
    pub async fn create(pool: &PgPool, input: &NewEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (first_name, last_name, email, role, department, position, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.role)
            .bind(&input.department)
            .bind(&input.position)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE email = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY created_at DESC");
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Overwrite the denormalized onboarding status mirror.
    pub async fn set_onboarding_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE employees SET onboarding_status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Overwrite the denormalized offboarding status mirror.
    pub async fn set_offboarding_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE employees SET offboarding_status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Flip the employee's active flag.
    pub async fn set_active(pool: &PgPool, id: DbId, is_active: bool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE employees SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// IDs of every HR admin, for fan-out notifications.
    pub async fn list_hr_admin_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM employees WHERE role = $1")
            .bind(ROLE_HR_ADMIN)
            .fetch_all(pool)
            .await
    }
}
