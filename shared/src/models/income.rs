//! Income records and income statement closures

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::QuantityDistribution;

/// Realized revenue confirmed against a completed harvest plan.
/// At most one per plan; when present its total overrides the estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: Uuid,
    pub harvest_plan_id: Uuid,
    /// Individual units sold
    pub quantity: i64,
    pub total_amount: Decimal,
    pub status: IncomeStatus,
    pub distribution: Option<QuantityDistribution>,
    pub sale_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl IncomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeStatus::Pending => "pending",
            IncomeStatus::Confirmed => "confirmed",
            IncomeStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(IncomeStatus::Pending),
            "confirmed" => Some(IncomeStatus::Confirmed),
            "cancelled" => Some(IncomeStatus::Cancelled),
            _ => None,
        }
    }
}

/// A finalized snapshot of an income statement for a period. Once `final`,
/// the numbers are frozen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementClosure {
    pub id: Uuid,
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub total_revenues: Decimal,
    pub total_expenses: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
    pub profit_margin: Decimal,
    pub status: ClosureStatus,
    pub included_harvest_ids: Vec<Uuid>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl IncomeStatementClosure {
    /// The closure identity that must hold exactly at creation time
    pub fn balances(&self) -> bool {
        self.gross_profit == self.total_revenues - self.total_expenses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureStatus {
    Draft,
    Final,
}

impl ClosureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClosureStatus::Draft => "draft",
            ClosureStatus::Final => "final",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ClosureStatus::Draft),
            "final" => Some(ClosureStatus::Final),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClosureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
