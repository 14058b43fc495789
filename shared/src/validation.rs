//! Validation utilities for the Maricultura Management Platform
//!
//! Includes Peru-specific validations for compliance with local
//! registration formats.

use rust_decimal::Decimal;

use crate::models::{IncomeStatementClosure, QuantityDistribution};

// ============================================================================
// Domain Validations
// ============================================================================

/// Validate the closure identity: gross profit must equal revenues minus
/// expenses exactly.
pub fn validate_closure(closure: &IncomeStatementClosure) -> Result<(), &'static str> {
    if closure.period_start_date > closure.period_end_date {
        return Err("Closure period start must not be after its end");
    }
    if !closure.balances() {
        return Err("Gross profit must equal total revenues minus total expenses");
    }
    Ok(())
}

/// Validate lot quantities: mortality only reduces, so the current quantity
/// can never exceed the initial one.
pub fn validate_lot_quantities(initial: i64, current: i64) -> Result<(), &'static str> {
    if initial < 0 || current < 0 {
        return Err("Quantities cannot be negative");
    }
    if current > initial {
        return Err("Current quantity cannot exceed initial quantity");
    }
    Ok(())
}

/// Validate shell sizes in millimeters: min ≤ average ≤ max, all positive
pub fn validate_sizes(min: Decimal, average: Decimal, max: Decimal) -> Result<(), &'static str> {
    if min < Decimal::ZERO || average < Decimal::ZERO || max < Decimal::ZERO {
        return Err("Sizes cannot be negative");
    }
    if min > average || average > max {
        return Err("Sizes must satisfy min <= average <= max");
    }
    Ok(())
}

/// Validate a quantity distribution: no negative counts or weights
pub fn validate_distribution(distribution: &QuantityDistribution) -> Result<(), &'static str> {
    match distribution {
        QuantityDistribution::BySize { sizes } => {
            if sizes.values().any(|q| *q < 0) {
                return Err("Size counts cannot be negative");
            }
        }
        QuantityDistribution::ByPresentation { lines } => {
            for line in lines {
                if line.kg < Decimal::ZERO {
                    return Err("Presentation weights cannot be negative");
                }
                if line.price_per_kg < Decimal::ZERO {
                    return Err("Prices per kilogram cannot be negative");
                }
            }
        }
    }
    Ok(())
}

/// Validate an investment percentage (0-100)
pub fn validate_percentage(percentage: Decimal) -> Result<(), &'static str> {
    if percentage < Decimal::ZERO || percentage > Decimal::from(100) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate a monetary amount is not negative
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

// ============================================================================
// Peru-Specific Validations
// ============================================================================

/// Validate a Peruvian DNI (documento nacional de identidad): 8 digits
pub fn validate_peru_dni(dni: &str) -> Result<(), &'static str> {
    let digits: String = dni.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 8 || digits.len() != dni.trim().len() {
        return Err("DNI must be exactly 8 digits");
    }
    Ok(())
}

/// Validate a Peruvian RUC (registro único de contribuyentes)
/// 11-digit number with modulo-11 checksum validation
pub fn validate_peru_ruc(ruc: &str) -> Result<(), &'static str> {
    let digits: Vec<u32> = ruc.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return Err("RUC must be 11 digits");
    }

    // Checksum over the first 10 digits with fixed weights
    const WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];
    let sum: u32 = digits
        .iter()
        .take(10)
        .zip(WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();

    let check = match 11 - (sum % 11) {
        10 => 0,
        11 => 1,
        other => other,
    };
    if check != digits[10] {
        return Err("Invalid RUC checksum");
    }

    Ok(())
}

/// Validate a Peruvian phone number
/// Accepts: 987654321, 987-654-321, +51987654321
pub fn validate_peru_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Mobile: 9 digits starting with 9
    if digits.len() == 9 && digits.starts_with('9') {
        return Ok(());
    }
    // International format with country code: 11 digits starting with 51
    if digits.len() == 11 && digits.starts_with("51") {
        return Ok(());
    }

    Err("Invalid Peruvian phone number format")
}

/// Peruvian bays (bahías) where scallop cultivation concessions operate
pub const PERU_SCALLOP_BAYS: &[&str] = &[
    "Sechura",
    "Samanco",
    "Tortugas",
    "Guaynuná",
    "Casma",
    "Paracas",
    "Lagunillas",
    "Bahía Independencia",
];

/// Validate a bay is a recognized scallop cultivation zone
pub fn validate_scallop_bay(bay: &str) -> Result<(), &'static str> {
    let bay_lower = bay.to_lowercase();
    if PERU_SCALLOP_BAYS.iter().any(|b| b.to_lowercase() == bay_lower) {
        return Ok(());
    }
    Err("Bay is not a recognized scallop cultivation zone")
}

/// Validate cultivation depth is reasonable for suspended culture (3-30m)
pub fn validate_culture_depth(depth_meters: i32) -> Result<(), &'static str> {
    if depth_meters < 0 {
        return Err("Depth cannot be negative");
    }
    if depth_meters > 60 {
        return Err("Depth exceeds maximum for suspended culture");
    }
    Ok(())
}

/// Check if shell height is in the commercial harvest range (≥ 65mm)
pub fn is_commercial_size(shell_height_mm: Decimal) -> bool {
    shell_height_mm >= Decimal::from(65)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use std::collections::BTreeMap;
    use uuid::Uuid;

    use crate::models::ClosureStatus;

    fn closure(revenues: i64, expenses: i64, gross: i64) -> IncomeStatementClosure {
        IncomeStatementClosure {
            id: Uuid::new_v4(),
            period_start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            period_end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            total_revenues: Decimal::from(revenues),
            total_expenses: Decimal::from(expenses),
            gross_profit: Decimal::from(gross),
            net_profit: Decimal::from(gross),
            profit_margin: Decimal::ZERO,
            status: ClosureStatus::Draft,
            included_harvest_ids: vec![],
            closed_at: None,
            created_at: Utc::now(),
        }
    }

    // ========================================================================
    // Domain Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_closure_balanced() {
        assert!(validate_closure(&closure(10000, 4000, 6000)).is_ok());
    }

    #[test]
    fn test_validate_closure_mismatch() {
        assert!(validate_closure(&closure(10000, 4000, 5000)).is_err());
    }

    #[test]
    fn test_validate_closure_inverted_period() {
        let mut c = closure(100, 50, 50);
        c.period_end_date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert!(validate_closure(&c).is_err());
    }

    #[test]
    fn test_validate_lot_quantities() {
        assert!(validate_lot_quantities(10000, 8500).is_ok());
        assert!(validate_lot_quantities(10000, 10000).is_ok());
        assert!(validate_lot_quantities(10000, 10001).is_err());
        assert!(validate_lot_quantities(-1, 0).is_err());
    }

    #[test]
    fn test_validate_sizes() {
        let d = |n: i64| Decimal::from(n);
        assert!(validate_sizes(d(30), d(45), d(60)).is_ok());
        assert!(validate_sizes(d(50), d(45), d(60)).is_err());
        assert!(validate_sizes(d(30), d(65), d(60)).is_err());
        assert!(validate_sizes(d(-1), d(45), d(60)).is_err());
    }

    #[test]
    fn test_validate_distribution_negative_count() {
        let mut sizes = BTreeMap::new();
        sizes.insert("M".to_string(), -5i64);
        assert!(validate_distribution(&QuantityDistribution::BySize { sizes }).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(Decimal::from(0)).is_ok());
        assert!(validate_percentage(Decimal::from(100)).is_ok());
        assert!(validate_percentage(Decimal::from(101)).is_err());
        assert!(validate_percentage(Decimal::from(-1)).is_err());
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("inversor@maricultura.pe").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
    }

    // ========================================================================
    // Peru-Specific Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_peru_dni() {
        assert!(validate_peru_dni("12345678").is_ok());
        assert!(validate_peru_dni("1234567").is_err());
        assert!(validate_peru_dni("123456789").is_err());
        assert!(validate_peru_dni("1234567a").is_err());
    }

    #[test]
    fn test_validate_peru_ruc_valid() {
        // Valid RUCs with correct checksums
        assert!(validate_peru_ruc("20100047218").is_ok());
        assert!(validate_peru_ruc("20131312955").is_ok());
    }

    #[test]
    fn test_validate_peru_ruc_invalid() {
        assert!(validate_peru_ruc("20100047219").is_err()); // bad checksum
        assert!(validate_peru_ruc("123456789").is_err()); // wrong length
    }

    #[test]
    fn test_validate_peru_phone() {
        assert!(validate_peru_phone("987654321").is_ok());
        assert!(validate_peru_phone("987-654-321").is_ok());
        assert!(validate_peru_phone("+51987654321").is_ok());
        assert!(validate_peru_phone("12345").is_err());
        assert!(validate_peru_phone("087654321").is_err());
    }

    #[test]
    fn test_validate_scallop_bay() {
        assert!(validate_scallop_bay("Sechura").is_ok());
        assert!(validate_scallop_bay("sechura").is_ok());
        assert!(validate_scallop_bay("Samanco").is_ok());
        assert!(validate_scallop_bay("Lima").is_err());
    }

    #[test]
    fn test_validate_culture_depth() {
        assert!(validate_culture_depth(12).is_ok());
        assert!(validate_culture_depth(-3).is_err());
        assert!(validate_culture_depth(100).is_err());
    }

    #[test]
    fn test_commercial_size() {
        assert!(is_commercial_size(Decimal::from(65)));
        assert!(is_commercial_size(Decimal::from(80)));
        assert!(!is_commercial_size(Decimal::from(55)));
    }
}
