//! Well-known role name constants.
//!
//! These must match the values stored in the `employees.role` column and
//! the seed data in the employees migration.

pub const ROLE_HR_ADMIN: &str = "hr_admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EMPLOYEE: &str = "employee";
