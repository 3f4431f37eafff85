pub mod company_service;
pub use company_service::CompanyService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod invoice_service;
pub use invoice_service::InvoiceService;
