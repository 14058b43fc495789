//! Price list models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SizeCode;

/// A price entry for a commercial size category. Several entries may exist
/// per category; only the active one is authoritative at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pricing {
    pub id: Uuid,
    pub size_category: SizeCode,
    /// Sale price per individual unit, in PEN
    pub price_per_unit: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Find the active price entry for a size code. `None` means the code has no
/// active price (distinct from a zero-priced entry, even though both
/// contribute zero revenue).
pub fn find_active_price<'a>(pricing: &'a [Pricing], code: &str) -> Option<&'a Pricing> {
    pricing.iter().find(|p| p.is_active && p.size_category == code)
}
