//! Revenue estimation from size/presentation distributions

use rust_decimal::Decimal;

use crate::models::{
    find_active_price, HarvestPlan, IncomeRecord, IncomeStatus, Pricing, QuantityDistribution,
};

/// Estimate revenue for a distribution against the active price list.
///
/// Size codes with no active price contribute zero silently; negative
/// quantities and prices clamp to zero. The result is never negative and the
/// function never fails — malformed entries are worth nothing, not an error.
pub fn estimate_revenue(distribution: &QuantityDistribution, pricing: &[Pricing]) -> Decimal {
    match distribution {
        QuantityDistribution::BySize { sizes } => sizes
            .iter()
            .map(|(code, quantity)| {
                let quantity = Decimal::from((*quantity).max(0));
                match find_active_price(pricing, code) {
                    Some(price) => quantity * price.price_per_unit.max(Decimal::ZERO),
                    None => Decimal::ZERO,
                }
            })
            .sum(),
        QuantityDistribution::ByPresentation { lines } => lines
            .iter()
            .map(|line| line.kg.max(Decimal::ZERO) * line.price_per_kg.max(Decimal::ZERO))
            .sum(),
    }
}

/// Revenue for a harvest plan: the confirmed income record wins over the
/// estimate (realized truth beats projection); without one, the estimate
/// from the plan's distribution, or zero when no distribution was recorded.
pub fn realized_or_estimated(
    plan: &HarvestPlan,
    income_records: &[IncomeRecord],
    pricing: &[Pricing],
) -> Decimal {
    let realized = income_records
        .iter()
        .find(|r| r.harvest_plan_id == plan.id && r.status != IncomeStatus::Cancelled);
    if let Some(record) = realized {
        return record.total_amount.max(Decimal::ZERO);
    }
    plan.distribution
        .as_ref()
        .map(|d| estimate_revenue(d, pricing))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use std::collections::BTreeMap;
    use uuid::Uuid;

    use crate::models::{HarvestStatus, PresentationLine};

    fn price(code: &str, value: Decimal, active: bool) -> Pricing {
        Pricing {
            id: Uuid::new_v4(),
            size_category: code.to_string(),
            price_per_unit: value,
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn by_size(entries: &[(&str, i64)]) -> QuantityDistribution {
        let mut sizes = BTreeMap::new();
        for (code, q) in entries {
            sizes.insert(code.to_string(), *q);
        }
        QuantityDistribution::BySize { sizes }
    }

    #[test]
    fn test_single_size_revenue() {
        let pricing = vec![price("M", Decimal::from(35), true)];
        let revenue = estimate_revenue(&by_size(&[("M", 100)]), &pricing);
        assert_eq!(revenue, Decimal::from(3500));
    }

    #[test]
    fn test_empty_distribution_is_zero() {
        let pricing = vec![price("M", Decimal::from(35), true)];
        let revenue = estimate_revenue(&by_size(&[]), &pricing);
        assert_eq!(revenue, Decimal::ZERO);
    }

    #[test]
    fn test_unpriced_code_contributes_zero() {
        let pricing = vec![price("M", Decimal::from(35), true)];
        let revenue = estimate_revenue(&by_size(&[("M", 100), ("XL", 9999)]), &pricing);
        assert_eq!(revenue, Decimal::from(3500));
    }

    #[test]
    fn test_inactive_price_contributes_zero() {
        let pricing = vec![price("M", Decimal::from(35), false)];
        let revenue = estimate_revenue(&by_size(&[("M", 100)]), &pricing);
        assert_eq!(revenue, Decimal::ZERO);
    }

    #[test]
    fn test_negative_quantity_clamps() {
        let pricing = vec![price("M", Decimal::from(35), true)];
        let revenue = estimate_revenue(&by_size(&[("M", -100)]), &pricing);
        assert_eq!(revenue, Decimal::ZERO);
    }

    #[test]
    fn test_presentation_lines_price_by_kg() {
        let d = QuantityDistribution::ByPresentation {
            lines: vec![
                PresentationLine {
                    measure: "malla 15kg".to_string(),
                    kg: Decimal::from(15),
                    price_per_kg: Decimal::from(12),
                },
                PresentationLine {
                    measure: "media malla".to_string(),
                    kg: Decimal::new(75, 1),
                    price_per_kg: Decimal::from(10),
                },
            ],
        };
        assert_eq!(estimate_revenue(&d, &[]), Decimal::from(255));
    }

    fn plan_with_distribution(d: Option<QuantityDistribution>) -> HarvestPlan {
        HarvestPlan {
            id: Uuid::new_v4(),
            lot_id: Uuid::new_v4(),
            sector_id: Uuid::new_v4(),
            planned_date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            actual_date: Some(NaiveDate::from_ymd_opt(2025, 5, 12).unwrap()),
            estimated_quantity: 9600,
            actual_quantity: Some(9000),
            distribution: d,
            total_actual_cost: Some(Decimal::from(1200)),
            status: HarvestStatus::Completed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_income_record_overrides_estimate() {
        let pricing = vec![price("M", Decimal::from(35), true)];
        let plan = plan_with_distribution(Some(by_size(&[("M", 100)])));
        let record = IncomeRecord {
            id: Uuid::new_v4(),
            harvest_plan_id: plan.id,
            quantity: 100,
            total_amount: Decimal::from(3100),
            status: IncomeStatus::Confirmed,
            distribution: None,
            sale_date: NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
            created_at: Utc::now(),
        };
        let revenue = realized_or_estimated(&plan, &[record], &pricing);
        assert_eq!(revenue, Decimal::from(3100));
    }

    #[test]
    fn test_cancelled_income_record_falls_back_to_estimate() {
        let pricing = vec![price("M", Decimal::from(35), true)];
        let plan = plan_with_distribution(Some(by_size(&[("M", 100)])));
        let record = IncomeRecord {
            id: Uuid::new_v4(),
            harvest_plan_id: plan.id,
            quantity: 100,
            total_amount: Decimal::from(3100),
            status: IncomeStatus::Cancelled,
            distribution: None,
            sale_date: NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
            created_at: Utc::now(),
        };
        let revenue = realized_or_estimated(&plan, &[record], &pricing);
        assert_eq!(revenue, Decimal::from(3500));
    }

    #[test]
    fn test_plan_without_distribution_is_zero() {
        let plan = plan_with_distribution(None);
        assert_eq!(realized_or_estimated(&plan, &[], &[]), Decimal::ZERO);
    }
}
