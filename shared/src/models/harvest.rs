//! Harvest plan models

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Commercial size code for a grading category (e.g., "XS", "M", "XL")
pub type SizeCode = String;

/// A planned or executed harvest against a lot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestPlan {
    pub id: Uuid,
    pub lot_id: Uuid,
    pub sector_id: Uuid,
    pub planned_date: NaiveDate,
    pub actual_date: Option<NaiveDate>,
    /// Individual units expected before the harvest runs
    pub estimated_quantity: i64,
    /// Individual units actually landed; set on completion
    pub actual_quantity: Option<i64>,
    pub distribution: Option<QuantityDistribution>,
    /// Harvest-specific cost (divers, transport, packing)
    pub total_actual_cost: Option<Decimal>,
    pub status: HarvestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HarvestPlan {
    /// Units to aggregate over: actuals once recorded, estimate otherwise
    pub fn effective_quantity(&self) -> i64 {
        self.actual_quantity.unwrap_or(self.estimated_quantity).max(0)
    }
}

/// Status of a harvest plan; only completed plans contribute realized revenue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarvestStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl HarvestStatus {
    /// Forward-only transitions; cancelled and completed are terminal
    pub fn can_transition_to(&self, next: HarvestStatus) -> bool {
        matches!(
            (self, next),
            (HarvestStatus::Planned, HarvestStatus::InProgress)
                | (HarvestStatus::Planned, HarvestStatus::Completed)
                | (HarvestStatus::Planned, HarvestStatus::Cancelled)
                | (HarvestStatus::InProgress, HarvestStatus::Completed)
                | (HarvestStatus::InProgress, HarvestStatus::Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HarvestStatus::Planned => "planned",
            HarvestStatus::InProgress => "in_progress",
            HarvestStatus::Completed => "completed",
            HarvestStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(HarvestStatus::Planned),
            "in_progress" => Some(HarvestStatus::InProgress),
            "completed" => Some(HarvestStatus::Completed),
            "cancelled" => Some(HarvestStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for HarvestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the landed quantity is broken down. The two shapes never mix on one
/// plan; the aggregator dispatches on the tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuantityDistribution {
    /// Individual units per commercial size code
    BySize { sizes: BTreeMap<SizeCode, i64> },
    /// Packed presentation lines, priced by the kilogram
    ByPresentation { lines: Vec<PresentationLine> },
}

impl QuantityDistribution {
    /// Total individual units represented by the distribution.
    /// Presentation lines carry kilograms; they convert at the fixed ratio.
    pub fn total_units(&self) -> i64 {
        match self {
            QuantityDistribution::BySize { sizes } => {
                sizes.values().map(|q| (*q).max(0)).sum()
            }
            QuantityDistribution::ByPresentation { lines } => lines
                .iter()
                .map(|l| {
                    (l.kg.max(Decimal::ZERO) * Decimal::from(crate::units::CONCHITAS_POR_KG))
                        .trunc()
                        .try_into()
                        .unwrap_or(0i64)
                })
                .sum(),
        }
    }
}

/// One packed line of a presentation distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationLine {
    /// Measure name within the presentation template (e.g., "malla 15kg")
    pub measure: String,
    pub kg: Decimal,
    pub price_per_kg: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harvest_status_transitions() {
        assert!(HarvestStatus::Planned.can_transition_to(HarvestStatus::InProgress));
        assert!(HarvestStatus::InProgress.can_transition_to(HarvestStatus::Completed));
        assert!(!HarvestStatus::Completed.can_transition_to(HarvestStatus::Planned));
        assert!(!HarvestStatus::Cancelled.can_transition_to(HarvestStatus::InProgress));
    }

    #[test]
    fn test_distribution_total_units_by_size() {
        let mut sizes = BTreeMap::new();
        sizes.insert("M".to_string(), 100);
        sizes.insert("L".to_string(), 50);
        let d = QuantityDistribution::BySize { sizes };
        assert_eq!(d.total_units(), 150);
    }

    #[test]
    fn test_distribution_negative_counts_ignored() {
        let mut sizes = BTreeMap::new();
        sizes.insert("M".to_string(), 100);
        sizes.insert("L".to_string(), -40);
        let d = QuantityDistribution::BySize { sizes };
        assert_eq!(d.total_units(), 100);
    }

    #[test]
    fn test_distribution_total_units_by_presentation() {
        let d = QuantityDistribution::ByPresentation {
            lines: vec![PresentationLine {
                measure: "malla 15kg".to_string(),
                kg: Decimal::from(15),
                price_per_kg: Decimal::from(12),
            }],
        };
        // 15 kg at 20 units/kg
        assert_eq!(d.total_units(), 300);
    }
}
