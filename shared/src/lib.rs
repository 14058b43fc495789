//! Shared types and calculations for the Maricultura Management Platform
//!
//! This crate contains the domain models, the unit-conversion table and the
//! financial aggregation pipeline shared between the backend, the frontend
//! (via WASM) and other components of the system.

pub mod finance;
pub mod format;
pub mod models;
pub mod query;
pub mod types;
pub mod units;
pub mod validation;

pub use finance::*;
pub use models::*;
pub use types::*;
pub use units::*;
