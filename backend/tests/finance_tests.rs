//! Financial pipeline property-based and unit tests
//!
//! Covers:
//! - Revenue estimation non-negativity and silent zero fallbacks
//! - Unit conversion round trips
//! - Financial summary edge cases (zero revenue, zero investment)

use std::collections::BTreeMap;

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::finance::{build_summary, estimate_revenue, CostBreakdown};
use shared::models::{Pricing, QuantityDistribution};
use shared::units::{convert, QuantityUnit};

// ============================================================================
// Property Test Strategies
// ============================================================================

const SIZE_CODES: [&str; 5] = ["XS", "S", "M", "L", "XL"];

/// Generate a size distribution with plausible counts
fn distribution_strategy() -> impl Strategy<Value = QuantityDistribution> {
    prop::collection::btree_map(
        prop::sample::select(SIZE_CODES.to_vec()),
        0i64..100_000,
        0..SIZE_CODES.len(),
    )
    .prop_map(|entries| {
        let sizes: BTreeMap<String, i64> =
            entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        QuantityDistribution::BySize { sizes }
    })
}

/// Generate a price list with a mix of active and inactive entries
fn pricing_strategy() -> impl Strategy<Value = Vec<Pricing>> {
    prop::collection::vec(
        (
            prop::sample::select(SIZE_CODES.to_vec()),
            0i64..10_000,
            any::<bool>(),
        ),
        0..8,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(code, cents, is_active)| Pricing {
                id: Uuid::new_v4(),
                size_category: code.to_string(),
                price_per_unit: Decimal::new(cents, 2),
                is_active,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .collect()
    })
}

fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn unit_strategy() -> impl Strategy<Value = QuantityUnit> {
    prop::sample::select(vec![
        QuantityUnit::Unidad,
        QuantityUnit::Manojo,
        QuantityUnit::Malla,
        QuantityUnit::Kilogramo,
    ])
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Revenue is never negative, whatever the distribution and price list
    #[test]
    fn test_revenue_never_negative(
        distribution in distribution_strategy(),
        pricing in pricing_strategy()
    ) {
        let revenue = estimate_revenue(&distribution, &pricing);
        prop_assert!(revenue >= Decimal::ZERO);
    }

    /// The empty distribution is worth exactly zero for every price list
    #[test]
    fn test_empty_distribution_is_zero(pricing in pricing_strategy()) {
        let empty = QuantityDistribution::BySize { sizes: BTreeMap::new() };
        prop_assert_eq!(estimate_revenue(&empty, &pricing), Decimal::ZERO);
    }

    /// Pruning unpriced codes does not change the estimate
    #[test]
    fn test_unpriced_codes_contribute_nothing(
        distribution in distribution_strategy(),
        pricing in pricing_strategy()
    ) {
        let full = estimate_revenue(&distribution, &pricing);

        let QuantityDistribution::BySize { sizes } = &distribution else {
            unreachable!()
        };
        let priced: BTreeMap<String, i64> = sizes
            .iter()
            .filter(|(code, _)| {
                pricing.iter().any(|p| p.is_active && p.size_category == **code)
            })
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        let pruned = estimate_revenue(
            &QuantityDistribution::BySize { sizes: priced },
            &pricing,
        );

        prop_assert_eq!(full, pruned);
    }

    /// Converting there and back lands on the original quantity
    #[test]
    fn test_conversion_round_trip(
        quantity in quantity_strategy(),
        from in unit_strategy(),
        to in unit_strategy()
    ) {
        let there = convert(quantity, from, to);
        let back = convert(there, to, from);
        prop_assert!((back - quantity).abs() < Decimal::new(1, 6));
    }

    /// Conversion output is never negative
    #[test]
    fn test_conversion_never_negative(
        quantity in quantity_strategy(),
        from in unit_strategy(),
        to in unit_strategy()
    ) {
        prop_assert!(convert(quantity, from, to) >= Decimal::ZERO);
    }

    /// Margin and ROI always come out defined, including zero denominators
    #[test]
    fn test_margin_and_roi_always_defined(
        revenue in 0i64..10_000_000,
        harvest in 0i64..1_000_000,
        operational in 0i64..1_000_000,
        initial in 0i64..1_000_000,
        units in 0i64..1_000_000
    ) {
        let costs = CostBreakdown {
            harvest_costs: Decimal::from(harvest),
            operational_expenses: Decimal::from(operational),
            initial_investment: Decimal::from(initial),
        };
        let summary = build_summary(Decimal::from(revenue), &costs, units);

        if revenue == 0 {
            prop_assert_eq!(summary.profit_margin, Decimal::ZERO);
        }
        if initial == 0 {
            prop_assert_eq!(summary.roi, Decimal::ZERO);
        }
        // The identity net = revenue - total always holds
        prop_assert_eq!(
            summary.net_profit,
            Decimal::from(revenue) - costs.total()
        );
    }
}

// ============================================================================
// Unit Tests: Worked Examples
// ============================================================================

#[cfg(test)]
mod example_tests {
    use super::*;

    fn active_price(code: &str, value: Decimal) -> Pricing {
        Pricing {
            id: Uuid::new_v4(),
            size_category: code.to_string(),
            price_per_unit: value,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_hundred_m_at_35_is_3500() {
        let mut sizes = BTreeMap::new();
        sizes.insert("M".to_string(), 100);
        let pricing = vec![active_price("M", Decimal::from(35))];
        let revenue = estimate_revenue(&QuantityDistribution::BySize { sizes }, &pricing);
        assert_eq!(revenue, Decimal::from(3500));
    }

    #[test]
    fn test_9600_units_are_100_manojos() {
        let manojos = convert(
            Decimal::from(9600),
            QuantityUnit::Unidad,
            QuantityUnit::Manojo,
        );
        assert_eq!(manojos, Decimal::from(100));
    }

    #[test]
    fn test_100_manojos_are_33_33_mallas() {
        let mallas = convert(
            Decimal::from(100),
            QuantityUnit::Manojo,
            QuantityUnit::Malla,
        )
        .round_dp(2);
        assert_eq!(mallas, Decimal::new(3333, 2));
    }

    #[test]
    fn test_zero_revenue_with_costs() {
        let costs = CostBreakdown {
            harvest_costs: Decimal::ZERO,
            operational_expenses: Decimal::from(500),
            initial_investment: Decimal::ZERO,
        };
        let summary = build_summary(Decimal::ZERO, &costs, 0);
        assert_eq!(summary.profit_margin, Decimal::ZERO);
        assert_eq!(summary.net_profit, Decimal::from(-500));
    }
}
