//! Seeding lot ("siembra") models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A seeding lot tracked from entry to harvest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    pub id: Uuid,
    pub sector_id: Uuid,
    /// Seed origin (e.g., "captación natural", "hatchery Casma")
    pub origin: String,
    pub entry_date: NaiveDate,
    pub projected_harvest_date: NaiveDate,
    pub initial_quantity: i64,
    pub current_quantity: i64,
    /// Average shell height in millimeters
    pub average_size: Decimal,
    pub min_size: Decimal,
    pub max_size: Decimal,
    pub status: LotStatus,
    /// One-time seeding cost (initial investment), counted once per lot
    pub cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lot {
    /// Cumulative mortality as a percentage of the initial quantity.
    /// Zero when the lot was seeded with nothing.
    pub fn mortality_rate(&self) -> Decimal {
        if self.initial_quantity <= 0 {
            return Decimal::ZERO;
        }
        let dead = Decimal::from(self.initial_quantity - self.current_quantity);
        dead / Decimal::from(self.initial_quantity) * Decimal::from(100)
    }
}

/// Status of a lot in its growth cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotStatus {
    Seeded,
    Growing,
    Ready,
    Harvested,
    Empty,
}

impl LotStatus {
    fn order(&self) -> u8 {
        match self {
            LotStatus::Seeded => 0,
            LotStatus::Growing => 1,
            LotStatus::Ready => 2,
            LotStatus::Harvested => 3,
            LotStatus::Empty => 4,
        }
    }

    /// Status advances monotonically; going backwards is only allowed as a
    /// manual correction.
    pub fn can_advance_to(&self, next: LotStatus) -> bool {
        next.order() >= self.order()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LotStatus::Seeded => "seeded",
            LotStatus::Growing => "growing",
            LotStatus::Ready => "ready",
            LotStatus::Harvested => "harvested",
            LotStatus::Empty => "empty",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "seeded" => Some(LotStatus::Seeded),
            "growing" => Some(LotStatus::Growing),
            "ready" => Some(LotStatus::Ready),
            "harvested" => Some(LotStatus::Harvested),
            "empty" => Some(LotStatus::Empty),
            _ => None,
        }
    }
}

impl std::fmt::Display for LotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(initial: i64, current: i64) -> Lot {
        Lot {
            id: Uuid::new_v4(),
            sector_id: Uuid::new_v4(),
            origin: "captación natural".to_string(),
            entry_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            projected_harvest_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            initial_quantity: initial,
            current_quantity: current,
            average_size: Decimal::from(45),
            min_size: Decimal::from(30),
            max_size: Decimal::from(60),
            status: LotStatus::Growing,
            cost: Decimal::from(15000),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_mortality_rate() {
        assert_eq!(lot(10000, 8500).mortality_rate(), Decimal::from(15));
    }

    #[test]
    fn test_mortality_rate_zero_initial() {
        assert_eq!(lot(0, 0).mortality_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_status_advances_monotonically() {
        assert!(LotStatus::Seeded.can_advance_to(LotStatus::Growing));
        assert!(LotStatus::Growing.can_advance_to(LotStatus::Harvested));
        assert!(LotStatus::Ready.can_advance_to(LotStatus::Ready));
        assert!(!LotStatus::Harvested.can_advance_to(LotStatus::Growing));
        assert!(!LotStatus::Empty.can_advance_to(LotStatus::Seeded));
    }
}
