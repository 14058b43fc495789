//! Domain models for the Maricultura Management Platform

mod expense;
mod harvest;
mod income;
mod investment;
mod lot;
mod monitoring;
mod presentation;
mod pricing;
mod sector;
mod user;

pub use expense::*;
pub use harvest::*;
pub use income::*;
pub use investment::*;
pub use lot::*;
pub use monitoring::*;
pub use presentation::*;
pub use pricing::*;
pub use sector::*;
pub use user::*;
