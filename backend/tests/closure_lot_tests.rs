//! Closure identity and lot lifecycle property-based tests
//!
//! Covers:
//! - The closure identity gross = revenues - expenses
//! - Lot status monotonicity
//! - Mortality rate bounds
//! - Distribution ROI edge cases

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::models::{
    ClosureStatus, Distribution, IncomeStatementClosure, Lot, LotStatus,
};
use shared::validation::{validate_closure, validate_lot_quantities};

// ============================================================================
// Helpers
// ============================================================================

fn closure(revenues: Decimal, expenses: Decimal, gross: Decimal) -> IncomeStatementClosure {
    IncomeStatementClosure {
        id: Uuid::new_v4(),
        period_start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        period_end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        total_revenues: revenues,
        total_expenses: expenses,
        gross_profit: gross,
        net_profit: gross,
        profit_margin: Decimal::ZERO,
        status: ClosureStatus::Draft,
        included_harvest_ids: vec![],
        closed_at: None,
        created_at: Utc::now(),
    }
}

fn lot(initial: i64, current: i64, status: LotStatus) -> Lot {
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
        status,
        cost: Decimal::from(15000),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn status_strategy() -> impl Strategy<Value = LotStatus> {
    prop::sample::select(vec![
        LotStatus::Seeded,
        LotStatus::Growing,
        LotStatus::Ready,
        LotStatus::Harvested,
        LotStatus::Empty,
    ])
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// A closure whose gross profit equals revenues minus expenses validates
    #[test]
    fn test_balanced_closure_validates(
        revenues in 0i64..100_000_000,
        expenses in 0i64..100_000_000
    ) {
        let revenues = Decimal::new(revenues, 2);
        let expenses = Decimal::new(expenses, 2);
        let c = closure(revenues, expenses, revenues - expenses);
        prop_assert!(validate_closure(&c).is_ok());
    }

    /// Any deviation from the identity is rejected
    #[test]
    fn test_unbalanced_closure_rejected(
        revenues in 0i64..100_000_000,
        expenses in 0i64..100_000_000,
        deviation in 1i64..1_000_000
    ) {
        let revenues = Decimal::new(revenues, 2);
        let expenses = Decimal::new(expenses, 2);
        let wrong = revenues - expenses + Decimal::new(deviation, 2);
        let c = closure(revenues, expenses, wrong);
        prop_assert!(validate_closure(&c).is_err());
    }

    /// Mortality is always within 0-100 when the quantity invariant holds
    #[test]
    fn test_mortality_rate_bounds(initial in 1i64..10_000_000, dead in 0i64..10_000_000) {
        let dead = dead.min(initial);
        let l = lot(initial, initial - dead, LotStatus::Growing);
        let rate = l.mortality_rate();
        prop_assert!(rate >= Decimal::ZERO);
        prop_assert!(rate <= Decimal::from(100));
    }

    /// The quantity invariant rejects any growth of the current count
    #[test]
    fn test_quantity_invariant(initial in 0i64..10_000_000, current in 0i64..10_000_000) {
        let result = validate_lot_quantities(initial, current);
        if current <= initial {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// Status advancement is transitive with the linear order
    #[test]
    fn test_status_monotonicity(a in status_strategy(), b in status_strategy()) {
        // Exactly one of (a -> b allowed) or (b -> a strictly backwards)
        // unless the two are equal.
        if a == b {
            prop_assert!(a.can_advance_to(b));
        } else {
            prop_assert!(a.can_advance_to(b) != b.can_advance_to(a));
        }
    }

    /// ROI of a payout is zero only on a zero investment, and the sign
    /// follows the profit
    #[test]
    fn test_distribution_roi_sign(
        distributed in 0i64..100_000_000,
        original in 0i64..100_000_000
    ) {
        let distributed = Decimal::new(distributed, 2);
        let original = Decimal::new(original, 2);
        let roi = Distribution::compute_roi(distributed, original);

        if original.is_zero() {
            prop_assert_eq!(roi, Decimal::ZERO);
        } else if distributed > original {
            prop_assert!(roi > Decimal::ZERO);
        } else if distributed < original {
            prop_assert!(roi < Decimal::ZERO);
        } else {
            prop_assert_eq!(roi, Decimal::ZERO);
        }
    }
}

// ============================================================================
// Unit Tests: Lifecycle Examples
// ============================================================================

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_mortality_example() {
        let l = lot(10000, 8500, LotStatus::Growing);
        assert_eq!(l.mortality_rate(), Decimal::from(15));
    }

    #[test]
    fn test_full_lifecycle_is_allowed() {
        let path = [
            LotStatus::Seeded,
            LotStatus::Growing,
            LotStatus::Ready,
            LotStatus::Harvested,
            LotStatus::Empty,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]));
        }
    }

    #[test]
    fn test_skipping_stages_is_allowed() {
        assert!(LotStatus::Seeded.can_advance_to(LotStatus::Harvested));
        assert!(LotStatus::Growing.can_advance_to(LotStatus::Empty));
    }

    #[test]
    fn test_going_backwards_is_rejected() {
        assert!(!LotStatus::Harvested.can_advance_to(LotStatus::Ready));
        assert!(!LotStatus::Empty.can_advance_to(LotStatus::Harvested));
    }

    #[test]
    fn test_final_closure_is_frozen_shape() {
        let mut c = closure(
            Decimal::from(10000),
            Decimal::from(4000),
            Decimal::from(6000),
        );
        c.status = ClosureStatus::Final;
        c.closed_at = Some(Utc::now());
        assert!(c.balances());
        assert_eq!(c.status.as_str(), "final");
    }
}
