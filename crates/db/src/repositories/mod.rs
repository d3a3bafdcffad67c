mod employee_repo;
mod notification_repo;
mod offboarding_process_repo;
mod onboarding_process_repo;
mod task_template_repo;

pub use employee_repo::EmployeeRepo;
pub use notification_repo::NotificationRepo;
pub use offboarding_process_repo::OffboardingProcessRepo;
pub use onboarding_process_repo::OnboardingProcessRepo;
pub use task_template_repo::TaskTemplateRepo;
