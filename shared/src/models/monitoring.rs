//! Growth monitoring models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A growth/mortality sampling taken on a lot. Recording one updates the
/// lot's size fields and reduces its current quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringRecord {
    pub id: Uuid,
    pub lot_id: Uuid,
    pub date: NaiveDate,
    /// Animals measured in the sample
    pub sampled_quantity: i64,
    /// Shell heights in millimeters
    pub average_size: Decimal,
    pub min_size: Decimal,
    pub max_size: Decimal,
    /// Estimated surviving units in the whole lot at sampling time
    pub estimated_survival: i64,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
}
