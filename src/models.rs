pub mod appointment;
pub mod article;
pub mod company;
pub mod contact;
pub mod dashboard;
pub mod deal;
pub mod invoice;
pub mod ledger;
pub mod project;
pub mod quote;
pub mod timesheet;
