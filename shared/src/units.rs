//! Unit conversion table for scallop counting units
//!
//! The operation counts scallops in four units: individual animals
//! ("unidades"), bunches ("manojos"), mesh-bags ("mallas") and kilograms.
//! Ratios are fixed across the platform; conversions never round on their
//! own — the rounding mode is chosen explicitly at each call site because
//! downstream totals depend on which rounding was used where.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Individual scallops per manojo (bunch)
pub const CONCHITAS_POR_MANOJO: i64 = 96;

/// Manojos per malla (mesh-bag)
pub const MANOJOS_POR_MALLA: i64 = 3;

/// Individual scallops per malla
pub const CONCHITAS_POR_MALLA: i64 = CONCHITAS_POR_MANOJO * MANOJOS_POR_MALLA;

/// Individual scallops per kilogram
pub const CONCHITAS_POR_KG: i64 = 20;

/// Counting unit for scallop quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityUnit {
    Unidad,
    Manojo,
    Malla,
    Kilogramo,
}

impl QuantityUnit {
    /// Individual scallops contained in one of this unit
    pub fn ratio(&self) -> Decimal {
        match self {
            QuantityUnit::Unidad => Decimal::ONE,
            QuantityUnit::Manojo => Decimal::from(CONCHITAS_POR_MANOJO),
            QuantityUnit::Malla => Decimal::from(CONCHITAS_POR_MALLA),
            QuantityUnit::Kilogramo => Decimal::from(CONCHITAS_POR_KG),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityUnit::Unidad => "unidad",
            QuantityUnit::Manojo => "manojo",
            QuantityUnit::Malla => "malla",
            QuantityUnit::Kilogramo => "kilogramo",
        }
    }
}

impl std::fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a unit name does not match any counting unit
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown quantity unit '{0}'")]
pub struct ParseUnitError(String);

impl std::str::FromStr for QuantityUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unidad" => Ok(QuantityUnit::Unidad),
            "manojo" => Ok(QuantityUnit::Manojo),
            "malla" => Ok(QuantityUnit::Malla),
            "kilogramo" => Ok(QuantityUnit::Kilogramo),
            other => Err(ParseUnitError(other.to_string())),
        }
    }
}

/// Rounding applied to a converted quantity, chosen per call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero
    Nearest,
    /// Round toward positive infinity
    Up,
    /// Round toward negative infinity
    Down,
}

impl RoundingMode {
    fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::Nearest => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Up => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Down => RoundingStrategy::ToNegativeInfinity,
        }
    }
}

/// Convert a quantity between counting units. Negative inputs clamp to zero;
/// the result carries full precision (no rounding).
pub fn convert(quantity: Decimal, from: QuantityUnit, to: QuantityUnit) -> Decimal {
    let quantity = quantity.max(Decimal::ZERO);
    quantity * from.ratio() / to.ratio()
}

/// Convert and round to a whole number of the target unit with an explicit
/// rounding mode.
pub fn convert_rounded(
    quantity: Decimal,
    from: QuantityUnit,
    to: QuantityUnit,
    mode: RoundingMode,
) -> Decimal {
    convert(quantity, from, to).round_dp_with_strategy(0, mode.strategy())
}

/// Convert and keep `dp` decimal places, for display contexts that show
/// fractional mallas or kilograms.
pub fn convert_dp(
    quantity: Decimal,
    from: QuantityUnit,
    to: QuantityUnit,
    dp: u32,
    mode: RoundingMode,
) -> Decimal {
    convert(quantity, from, to).round_dp_with_strategy(dp, mode.strategy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_to_manojos() {
        let manojos = convert(
            Decimal::from(9600),
            QuantityUnit::Unidad,
            QuantityUnit::Manojo,
        );
        assert_eq!(manojos, Decimal::from(100));
    }

    #[test]
    fn test_manojos_to_mallas_fractional() {
        let mallas = convert_dp(
            Decimal::from(100),
            QuantityUnit::Manojo,
            QuantityUnit::Malla,
            2,
            RoundingMode::Nearest,
        );
        assert_eq!(mallas, Decimal::new(3333, 2));
    }

    #[test]
    fn test_round_trip_is_identity() {
        let q = Decimal::new(12345, 1);
        let there = convert(q, QuantityUnit::Malla, QuantityUnit::Kilogramo);
        let back = convert(there, QuantityUnit::Kilogramo, QuantityUnit::Malla);
        assert!((back - q).abs() < Decimal::new(1, 10));
    }

    #[test]
    fn test_negative_quantity_clamps_to_zero() {
        let r = convert(
            Decimal::from(-50),
            QuantityUnit::Unidad,
            QuantityUnit::Manojo,
        );
        assert_eq!(r, Decimal::ZERO);
    }

    #[test]
    fn test_rounding_modes_differ() {
        let q = Decimal::from(100); // 100 manojos = 33.33.. mallas
        let up = convert_rounded(q, QuantityUnit::Manojo, QuantityUnit::Malla, RoundingMode::Up);
        let down =
            convert_rounded(q, QuantityUnit::Manojo, QuantityUnit::Malla, RoundingMode::Down);
        assert_eq!(up, Decimal::from(34));
        assert_eq!(down, Decimal::from(33));
    }

    #[test]
    fn test_malla_ratio_consistency() {
        assert_eq!(CONCHITAS_POR_MALLA, 288);
        let one_malla_in_manojos = convert(
            Decimal::ONE,
            QuantityUnit::Malla,
            QuantityUnit::Manojo,
        );
        assert_eq!(one_malla_in_manojos, Decimal::from(MANOJOS_POR_MALLA));
    }
}
