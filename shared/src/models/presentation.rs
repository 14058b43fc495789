//! Presentation (packaging/grading) templates

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage key for the user's presentation templates, kept identical to the
/// browser local-storage key the frontend reads.
pub const PRESENTATIONS_STORAGE_KEY: &str = "conchas-abanico:presentations";

/// A packaging template (e.g., "malla 15kg") with its sub-measures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    pub id: Uuid,
    pub name: String,
    pub total_kg: Decimal,
    pub measures: Vec<PresentationMeasure>,
}

/// A sub-measure of a presentation, each with its own price per kilogram
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationMeasure {
    pub name: String,
    pub kg: Decimal,
    pub price_per_kg: Decimal,
}

impl Presentation {
    /// Sum of the measure weights; callers compare it against `total_kg`
    pub fn measures_kg(&self) -> Decimal {
        self.measures.iter().map(|m| m.kg).sum()
    }
}
