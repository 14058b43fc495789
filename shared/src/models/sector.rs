//! Sector models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Lot;

/// A cultivation sector: a named area of the concession holding seeding lots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sector {
    pub id: Uuid,
    pub name: String,
    /// Location within the bay (e.g., "Sechura - zona norte")
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A sector together with the lots it owns
#[derive(Debug, Clone, Serialize)]
pub struct SectorWithLots {
    #[serde(flatten)]
    pub sector: Sector,
    pub lots: Vec<Lot>,
}
