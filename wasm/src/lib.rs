//! WebAssembly module for the Maricultura Management Platform
//!
//! Provides client-side computation for:
//! - Unit conversions between unidades, manojos, mallas and kilograms
//! - Mortality rates
//! - Revenue estimation from size distributions
//! - Financial summary figures

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::finance::*;
pub use shared::models::*;
pub use shared::units::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_unit(unit: &str) -> Result<QuantityUnit, JsValue> {
    unit.parse::<QuantityUnit>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a quantity between counting units, full precision
#[wasm_bindgen]
pub fn convert_quantity(quantity: f64, from: &str, to: &str) -> Result<f64, JsValue> {
    let from = parse_unit(from)?;
    let to = parse_unit(to)?;
    let quantity = Decimal::try_from(quantity).unwrap_or(Decimal::ZERO);
    let result = convert(quantity, from, to);
    Ok(result.to_string().parse().unwrap_or(0.0))
}

/// Calculate cumulative mortality as a percentage
#[wasm_bindgen]
pub fn calculate_mortality_rate(initial_quantity: f64, current_quantity: f64) -> f64 {
    if initial_quantity <= 0.0 {
        return 0.0;
    }
    ((initial_quantity - current_quantity) / initial_quantity) * 100.0
}

/// Estimate revenue for a size distribution against a price list, both as
/// JSON the frontend already holds
#[wasm_bindgen]
pub fn estimate_distribution_revenue(
    distribution_json: &str,
    pricing_json: &str,
) -> Result<f64, JsValue> {
    let distribution: QuantityDistribution = serde_json::from_str(distribution_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid distribution JSON: {}", e)))?;
    let pricing: Vec<Pricing> = serde_json::from_str(pricing_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid pricing JSON: {}", e)))?;

    let revenue = estimate_revenue(&distribution, &pricing);
    Ok(revenue.to_string().parse().unwrap_or(0.0))
}

/// Profit margin as a percentage, zero when revenue is zero
#[wasm_bindgen]
pub fn calculate_profit_margin(revenue: f64, cost: f64) -> f64 {
    if revenue <= 0.0 {
        return 0.0;
    }
    ((revenue - cost) / revenue) * 100.0
}

/// Return on investment as a percentage, zero when the investment is zero
#[wasm_bindgen]
pub fn calculate_roi(net_profit: f64, investment: f64) -> f64 {
    if investment <= 0.0 {
        return 0.0;
    }
    (net_profit / investment) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_units_to_manojos() {
        let manojos = convert_quantity(9600.0, "unidad", "manojo").unwrap();
        assert!((manojos - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_convert_unknown_unit() {
        assert!(convert_quantity(10.0, "unidad", "docena").is_err());
    }

    #[test]
    fn test_mortality_rate() {
        let rate = calculate_mortality_rate(10000.0, 8500.0);
        assert!((rate - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_mortality_rate_zero_initial() {
        assert_eq!(calculate_mortality_rate(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_profit_margin_zero_revenue() {
        assert_eq!(calculate_profit_margin(0.0, 500.0), 0.0);
    }

    #[test]
    fn test_roi() {
        let roi = calculate_roi(3000.0, 4000.0);
        assert!((roi - 75.0).abs() < 0.001);
    }
}
