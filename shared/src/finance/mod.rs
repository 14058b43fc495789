//! Harvest financial aggregation pipeline
//!
//! Pure functions from fetched collections to derived financial metrics.
//! Nothing here touches I/O; the backend fetches, this crate computes, the
//! export layer formats.

mod costs;
mod revenue;
mod summary;

pub use costs::*;
pub use revenue::*;
pub use summary::*;
