pub mod appointment_repo;
pub use appointment_repo::AppointmentRepository;
pub mod article_repo;
pub use article_repo::ArticleRepository;
pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod contact_repo;
pub use contact_repo::ContactRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod deal_repo;
pub use deal_repo::DealRepository;
pub mod invoice_repo;
pub use invoice_repo::InvoiceRepository;
pub mod ledger_repo;
pub use ledger_repo::LedgerRepository;
pub mod project_repo;
pub use project_repo::ProjectRepository;
pub mod quote_repo;
pub use quote_repo::QuoteRepository;
pub mod timesheet_repo;
pub use timesheet_repo::TimesheetRepository;
