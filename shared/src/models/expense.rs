//! Expense models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An operational expense, scoped to a lot, a sector, or neither
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub lot_id: Option<Uuid>,
    pub sector_id: Option<Uuid>,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Operational,
    Harvest,
    Material,
    Maintenance,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Operational => "operational",
            ExpenseCategory::Harvest => "harvest",
            ExpenseCategory::Material => "material",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "operational" => Some(ExpenseCategory::Operational),
            "harvest" => Some(ExpenseCategory::Harvest),
            "material" => Some(ExpenseCategory::Material),
            "maintenance" => Some(ExpenseCategory::Maintenance),
            "other" => Some(ExpenseCategory::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
