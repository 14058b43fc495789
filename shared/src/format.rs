//! es-PE display formatting for the export layer
//!
//! The formatter never recomputes a value; it only renders numbers the
//! pipeline already produced.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a monetary amount as Peruvian soles: `S/ 1,234.56`
pub fn format_currency_pen(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative();
    let abs = rounded.abs();
    let as_text = format!("{:.2}", abs);
    let (int_part, frac_part) = as_text.split_once('.').unwrap_or((as_text.as_str(), "00"));
    let grouped = group_thousands(int_part);
    if negative {
        format!("-S/ {}.{}", grouped, frac_part)
    } else {
        format!("S/ {}.{}", grouped, frac_part)
    }
}

/// Format a percentage with two decimals: `15.00%`
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", rounded)
}

/// Format a date the way the es-PE locale displays it: `dd/mm/yyyy`
pub fn format_date_pe(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency_pen(Decimal::new(350000, 2)), "S/ 3,500.00");
        assert_eq!(
            format_currency_pen(Decimal::new(123456789, 2)),
            "S/ 1,234,567.89"
        );
        assert_eq!(format_currency_pen(Decimal::from(7)), "S/ 7.00");
    }

    #[test]
    fn test_negative_currency() {
        assert_eq!(format_currency_pen(Decimal::from(-500)), "-S/ 500.00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(Decimal::from(15)), "15.00%");
        assert_eq!(format_percent(Decimal::new(3333, 2)), "33.33%");
    }

    #[test]
    fn test_date_pe() {
        let d = NaiveDate::from_ymd_opt(2025, 5, 12).unwrap();
        assert_eq!(format_date_pe(d), "12/05/2025");
    }
}
