//! Cost aggregation across harvests, expenses and seeding investment

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Expense, HarvestPlan, HarvestStatus, Lot};
use crate::types::DateRange;

/// Scope of a cost aggregation: a single lot, a whole sector, or every
/// record inside a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostScope {
    Lot(Uuid),
    Sector(Uuid),
    Dates(DateRange),
}

impl CostScope {
    pub fn dates(start: NaiveDate, end: NaiveDate) -> Self {
        CostScope::Dates(DateRange::new(start, end))
    }

    pub fn includes_plan(&self, plan: &HarvestPlan) -> bool {
        match self {
            CostScope::Lot(id) => plan.lot_id == *id,
            CostScope::Sector(id) => plan.sector_id == *id,
            CostScope::Dates(range) => {
                let date = plan.actual_date.unwrap_or(plan.planned_date);
                range.contains(date)
            }
        }
    }

    pub fn includes_expense(&self, expense: &Expense) -> bool {
        match self {
            CostScope::Lot(id) => expense.lot_id == Some(*id),
            CostScope::Sector(id) => expense.sector_id == Some(*id),
            CostScope::Dates(range) => range.contains(expense.date),
        }
    }

    pub fn includes_lot(&self, lot: &Lot) -> bool {
        match self {
            CostScope::Lot(id) => lot.id == *id,
            CostScope::Sector(id) => lot.sector_id == *id,
            CostScope::Dates(range) => range.contains(lot.entry_date),
        }
    }
}

/// The three independent cost pools of a scope
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CostBreakdown {
    /// Pool 1: harvest-specific costs of completed plans
    pub harvest_costs: Decimal,
    /// Pool 2: operational expenses matching the scope
    pub operational_expenses: Decimal,
    /// Pool 3: one-time seeding cost, counted once per lot
    pub initial_investment: Decimal,
}

impl CostBreakdown {
    pub fn total(&self) -> Decimal {
        self.harvest_costs + self.operational_expenses + self.initial_investment
    }
}

/// Aggregate the three cost pools for a scope.
///
/// A lot's seeding cost enters pool 3 exactly once no matter how many
/// harvests it produced — lots are deduplicated by id before summing.
/// Each pool clamps at zero; malformed negative amounts contribute nothing.
pub fn aggregate_costs(
    scope: CostScope,
    plans: &[HarvestPlan],
    expenses: &[Expense],
    lots: &[Lot],
) -> CostBreakdown {
    let harvest_costs = plans
        .iter()
        .filter(|p| p.status == HarvestStatus::Completed && scope.includes_plan(p))
        .filter_map(|p| p.total_actual_cost)
        .map(|c| c.max(Decimal::ZERO))
        .sum();

    let operational_expenses = expenses
        .iter()
        .filter(|e| scope.includes_expense(e))
        .map(|e| e.amount.max(Decimal::ZERO))
        .sum();

    let mut seen = HashSet::new();
    let initial_investment = lots
        .iter()
        .filter(|l| scope.includes_lot(l) && seen.insert(l.id))
        .map(|l| l.cost.max(Decimal::ZERO))
        .sum();

    CostBreakdown {
        harvest_costs,
        operational_expenses,
        initial_investment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::{ExpenseCategory, LotStatus};

    fn lot(id: Uuid, sector_id: Uuid, cost: i64) -> Lot {
        Lot {
            id,
            sector_id,
            origin: "hatchery Casma".to_string(),
            entry_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            projected_harvest_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            initial_quantity: 50000,
            current_quantity: 42000,
            average_size: Decimal::from(55),
            min_size: Decimal::from(40),
            max_size: Decimal::from(70),
            status: LotStatus::Ready,
            cost: Decimal::from(cost),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn plan(lot_id: Uuid, sector_id: Uuid, cost: i64, status: HarvestStatus) -> HarvestPlan {
        HarvestPlan {
            id: Uuid::new_v4(),
            lot_id,
            sector_id,
            planned_date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            actual_date: Some(NaiveDate::from_ymd_opt(2025, 5, 12).unwrap()),
            estimated_quantity: 20000,
            actual_quantity: Some(18500),
            distribution: None,
            total_actual_cost: Some(Decimal::from(cost)),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn expense(lot_id: Option<Uuid>, sector_id: Option<Uuid>, amount: i64) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            lot_id,
            sector_id,
            date: NaiveDate::from_ymd_opt(2025, 4, 20).unwrap(),
            category: ExpenseCategory::Operational,
            description: "limpieza de linternas".to_string(),
            amount: Decimal::from(amount),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_lot_scope_sums_three_pools() {
        let sector_id = Uuid::new_v4();
        let l = lot(Uuid::new_v4(), sector_id, 15000);
        let plans = vec![plan(l.id, sector_id, 1200, HarvestStatus::Completed)];
        let expenses = vec![expense(Some(l.id), None, 800)];
        let lots = vec![l.clone()];

        let costs = aggregate_costs(CostScope::Lot(l.id), &plans, &expenses, &lots);
        assert_eq!(costs.harvest_costs, Decimal::from(1200));
        assert_eq!(costs.operational_expenses, Decimal::from(800));
        assert_eq!(costs.initial_investment, Decimal::from(15000));
        assert_eq!(costs.total(), Decimal::from(17000));
    }

    #[test]
    fn test_only_completed_plans_count() {
        let sector_id = Uuid::new_v4();
        let l = lot(Uuid::new_v4(), sector_id, 0);
        let plans = vec![
            plan(l.id, sector_id, 1200, HarvestStatus::Completed),
            plan(l.id, sector_id, 900, HarvestStatus::Planned),
            plan(l.id, sector_id, 700, HarvestStatus::Cancelled),
        ];
        let costs = aggregate_costs(CostScope::Lot(l.id), &plans, &[], &[l.clone()]);
        assert_eq!(costs.harvest_costs, Decimal::from(1200));
    }

    #[test]
    fn test_lot_cost_not_double_counted_across_harvests() {
        let sector_id = Uuid::new_v4();
        let l = lot(Uuid::new_v4(), sector_id, 15000);
        let plans = vec![
            plan(l.id, sector_id, 1000, HarvestStatus::Completed),
            plan(l.id, sector_id, 1000, HarvestStatus::Completed),
            plan(l.id, sector_id, 1000, HarvestStatus::Completed),
        ];
        // The same lot appearing once: pool 3 counts it once regardless of
        // how many completed plans reference it.
        let costs = aggregate_costs(CostScope::Sector(sector_id), &plans, &[], &[l]);
        assert_eq!(costs.harvest_costs, Decimal::from(3000));
        assert_eq!(costs.initial_investment, Decimal::from(15000));
    }

    #[test]
    fn test_duplicate_lot_rows_deduplicated() {
        let sector_id = Uuid::new_v4();
        let l = lot(Uuid::new_v4(), sector_id, 15000);
        let lots = vec![l.clone(), l.clone()];
        let costs = aggregate_costs(CostScope::Sector(sector_id), &[], &[], &lots);
        assert_eq!(costs.initial_investment, Decimal::from(15000));
    }

    #[test]
    fn test_date_scope_filters_expenses() {
        let scope = CostScope::dates(
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
        );
        let in_range = expense(None, None, 500);
        let mut out_of_range = expense(None, None, 900);
        out_of_range.date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();

        let costs = aggregate_costs(scope, &[], &[in_range, out_of_range], &[]);
        assert_eq!(costs.operational_expenses, Decimal::from(500));
    }

    #[test]
    fn test_negative_amounts_contribute_nothing() {
        let sector_id = Uuid::new_v4();
        let mut l = lot(Uuid::new_v4(), sector_id, 0);
        l.cost = Decimal::from(-100);
        let mut e = expense(Some(l.id), None, 0);
        e.amount = Decimal::from(-50);
        let costs = aggregate_costs(CostScope::Lot(l.id), &[], &[e], &[l.clone()]);
        assert_eq!(costs.total(), Decimal::ZERO);
    }
}
