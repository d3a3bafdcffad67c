pub mod employee;
pub mod notification;
pub mod process;
pub mod task_template;
