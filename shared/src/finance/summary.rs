//! Financial summary builder

use rust_decimal::Decimal;
use serde::Serialize;

use super::CostBreakdown;
use crate::units::{CONCHITAS_POR_MALLA, CONCHITAS_POR_MANOJO};

/// Derived financial metrics for a scope, built from aggregated revenue,
/// the cost breakdown and the unit count.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FinancialSummary {
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    /// Revenue minus harvest-specific costs only
    pub gross_profit: Decimal,
    /// Revenue minus all three cost pools
    pub net_profit: Decimal,
    /// Percent; 0 when revenue is 0
    pub profit_margin: Decimal,
    /// Percent over the initial investment pool; 0 when that pool is 0
    pub roi: Decimal,
    pub unit_count: i64,
    pub revenue_rates: UnitRates,
    pub cost_rates: UnitRates,
    pub profit_rates: UnitRates,
}

/// An amount expressed per unidad, per manojo and per malla
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitRates {
    pub per_unidad: Decimal,
    pub per_manojo: Decimal,
    pub per_malla: Decimal,
}

impl UnitRates {
    fn from_amount(amount: Decimal, units: i64) -> Self {
        let per_unidad = per_unit_or_zero(amount, units);
        Self {
            per_unidad,
            per_manojo: per_unidad * Decimal::from(CONCHITAS_POR_MANOJO),
            per_malla: per_unidad * Decimal::from(CONCHITAS_POR_MALLA),
        }
    }
}

/// `numerator / denominator * 100`, resolved to zero when the denominator is
/// zero. Every percentage in the summary goes through here so no division
/// can produce NaN or infinity.
pub fn pct_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    (numerator * Decimal::from(100))
        .checked_div(denominator)
        .unwrap_or(Decimal::ZERO)
}

/// Amount per individual unit, zero when the unit count is zero
pub fn per_unit_or_zero(amount: Decimal, units: i64) -> Decimal {
    if units <= 0 {
        return Decimal::ZERO;
    }
    amount.checked_div(Decimal::from(units)).unwrap_or(Decimal::ZERO)
}

/// Combine aggregated revenue and costs into the full set of derived
/// metrics. `unit_count` is the post-rounding individual unit total of the
/// scope's distributions.
pub fn build_summary(revenue: Decimal, costs: &CostBreakdown, unit_count: i64) -> FinancialSummary {
    let revenue = revenue.max(Decimal::ZERO);
    let total_cost = costs.total();
    let gross_profit = revenue - costs.harvest_costs;
    let net_profit = revenue - total_cost;

    FinancialSummary {
        total_revenue: revenue,
        total_cost,
        gross_profit,
        net_profit,
        profit_margin: pct_or_zero(net_profit, revenue),
        roi: pct_or_zero(net_profit, costs.initial_investment),
        unit_count,
        revenue_rates: UnitRates::from_amount(revenue, unit_count),
        cost_rates: UnitRates::from_amount(total_cost, unit_count),
        profit_rates: UnitRates::from_amount(net_profit, unit_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs(harvest: i64, operational: i64, initial: i64) -> CostBreakdown {
        CostBreakdown {
            harvest_costs: Decimal::from(harvest),
            operational_expenses: Decimal::from(operational),
            initial_investment: Decimal::from(initial),
        }
    }

    #[test]
    fn test_profit_split() {
        let s = build_summary(Decimal::from(10000), &costs(1000, 2000, 4000), 9600);
        assert_eq!(s.gross_profit, Decimal::from(9000));
        assert_eq!(s.net_profit, Decimal::from(3000));
        assert_eq!(s.profit_margin, Decimal::from(30));
        assert_eq!(s.roi, Decimal::from(75));
    }

    #[test]
    fn test_zero_revenue_margin_is_zero_not_negative_infinity() {
        let s = build_summary(Decimal::ZERO, &costs(0, 500, 0), 0);
        assert_eq!(s.profit_margin, Decimal::ZERO);
        assert_eq!(s.net_profit, Decimal::from(-500));
        assert_eq!(s.roi, Decimal::ZERO);
    }

    #[test]
    fn test_zero_units_rates_are_zero() {
        let s = build_summary(Decimal::from(1000), &costs(100, 0, 0), 0);
        assert_eq!(s.revenue_rates.per_unidad, Decimal::ZERO);
        assert_eq!(s.revenue_rates.per_malla, Decimal::ZERO);
    }

    #[test]
    fn test_rates_scale_by_conversion_ratios() {
        let s = build_summary(Decimal::from(9600), &costs(0, 0, 0), 9600);
        assert_eq!(s.revenue_rates.per_unidad, Decimal::ONE);
        assert_eq!(s.revenue_rates.per_manojo, Decimal::from(96));
        assert_eq!(s.revenue_rates.per_malla, Decimal::from(288));
    }

    #[test]
    fn test_negative_revenue_clamps() {
        let s = build_summary(Decimal::from(-100), &costs(0, 0, 0), 10);
        assert_eq!(s.total_revenue, Decimal::ZERO);
    }
}
