//! Business logic services for the Maricultura Management Platform

pub mod expense;
pub mod harvest;
pub mod income;
pub mod investment;
pub mod lot;
pub mod monitoring;
pub mod presentation;
pub mod pricing;
pub mod reporting;
pub mod sector;
pub mod user;

pub use expense::ExpenseService;
pub use harvest::HarvestService;
pub use income::IncomeService;
pub use investment::InvestmentService;
pub use lot::LotService;
pub use monitoring::MonitoringService;
pub use presentation::PresentationService;
pub use pricing::PricingService;
pub use reporting::ReportingService;
pub use sector::SectorService;
pub use user::UserService;
