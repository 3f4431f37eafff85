pub mod appointments;
pub mod articles;
pub mod companies;
pub mod contacts;
pub mod dashboard;
pub mod deals;
pub mod invoices;
pub mod ledger;
pub mod projects;
pub mod quotes;
pub mod timesheets;
