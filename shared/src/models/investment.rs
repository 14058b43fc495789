//! Investment and distribution models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An investor's stake in a seeding lot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: Uuid,
    pub investor_id: Uuid,
    pub lot_id: Uuid,
    pub amount: Decimal,
    /// Share of the lot's net result, 0-100
    pub percentage: Decimal,
    pub status: InvestmentStatus,
    /// Cumulative payouts against this investment
    pub total_distributed: Decimal,
    pub investment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    Active,
    Distributed,
    Cancelled,
}

impl InvestmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentStatus::Active => "active",
            InvestmentStatus::Distributed => "distributed",
            InvestmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(InvestmentStatus::Active),
            "distributed" => Some(InvestmentStatus::Distributed),
            "cancelled" => Some(InvestmentStatus::Cancelled),
            _ => None,
        }
    }
}

/// A disbursement event against an investment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Distribution {
    pub id: Uuid,
    pub investment_id: Uuid,
    pub distributed_amount: Decimal,
    pub original_investment: Decimal,
    /// Return over the original investment, percent; 0 when original is 0
    pub roi: Decimal,
    pub status: DistributionStatus,
    pub distribution_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Distribution {
    /// ROI of a payout relative to the original investment, resolved to zero
    /// when the original is zero.
    pub fn compute_roi(distributed: Decimal, original: Decimal) -> Decimal {
        ((distributed - original) * Decimal::from(100))
            .checked_div(original)
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionStatus {
    Pending,
    Paid,
}

impl DistributionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionStatus::Pending => "pending",
            DistributionStatus::Paid => "paid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DistributionStatus::Pending),
            "paid" => Some(DistributionStatus::Paid),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roi_of_profitable_payout() {
        let roi = Distribution::compute_roi(Decimal::from(12000), Decimal::from(10000));
        assert_eq!(roi, Decimal::from(20));
    }

    #[test]
    fn test_roi_of_loss() {
        let roi = Distribution::compute_roi(Decimal::from(8000), Decimal::from(10000));
        assert_eq!(roi, Decimal::from(-20));
    }

    #[test]
    fn test_roi_zero_investment_is_zero() {
        let roi = Distribution::compute_roi(Decimal::from(500), Decimal::ZERO);
        assert_eq!(roi, Decimal::ZERO);
    }
}
