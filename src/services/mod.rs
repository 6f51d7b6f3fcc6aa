pub mod account;
pub mod admin;
pub mod notification;
pub mod orchestrator;
pub mod organization;
pub mod report;
pub mod role;
pub mod swap_approval;
pub mod template;

pub use account::AccountService;
pub use admin::AdminService;
pub use notification::NotificationService;
pub use orchestrator::OrchestratorService;
pub use organization::OrganizationService;
pub use report::ReportService;
pub use role::RoleService;
pub use swap_approval::SwapApprovalService;
pub use template::TemplateService;
