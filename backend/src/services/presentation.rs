//! Presentation template repository
//!
//! The frontend keeps the user's packaging templates under a single storage
//! key; this service is the explicit load()/save() interface behind it,
//! backed by one JSONB row.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Presentation, PresentationMeasure, PRESENTATIONS_STORAGE_KEY};

/// Presentation template repository
#[derive(Clone)]
pub struct PresentationService {
    db: PgPool,
}

impl PresentationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Load the saved templates, falling back to the defaults when nothing
    /// has been saved yet.
    pub async fn load(&self) -> AppResult<Vec<Presentation>> {
        let value: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT value FROM app_settings WHERE key = $1")
                .bind(PRESENTATIONS_STORAGE_KEY)
                .fetch_optional(&self.db)
                .await?;

        match value {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| AppError::Internal(format!("Malformed presentation templates: {}", e))),
            None => Ok(default_presentations()),
        }
    }

    /// Save the full template set, replacing whatever was stored
    pub async fn save(&self, presentations: Vec<Presentation>) -> AppResult<Vec<Presentation>> {
        for presentation in &presentations {
            if presentation.name.trim().is_empty() {
                return Err(AppError::Validation {
                    field: "name".to_string(),
                    message: "Presentation name cannot be empty".to_string(),
                    message_es: "El nombre de la presentación no puede estar vacío".to_string(),
                });
            }
            if presentation.total_kg < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "total_kg".to_string(),
                    message: "Presentation weight cannot be negative".to_string(),
                    message_es: "El peso de la presentación no puede ser negativo".to_string(),
                });
            }
            for measure in &presentation.measures {
                if measure.kg < Decimal::ZERO || measure.price_per_kg < Decimal::ZERO {
                    return Err(AppError::Validation {
                        field: "measures".to_string(),
                        message: "Measure weights and prices cannot be negative".to_string(),
                        message_es: "Los pesos y precios de las medidas no pueden ser negativos"
                            .to_string(),
                    });
                }
            }
        }

        let value = serde_json::to_value(&presentations)
            .map_err(|e| AppError::Internal(format!("Template serialization error: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO app_settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()
            "#,
        )
        .bind(PRESENTATIONS_STORAGE_KEY)
        .bind(&value)
        .execute(&self.db)
        .await?;

        Ok(presentations)
    }
}

/// Templates offered before the user saves a configuration
pub fn default_presentations() -> Vec<Presentation> {
    vec![
        Presentation {
            id: Uuid::new_v4(),
            name: "Malla 15kg".to_string(),
            total_kg: Decimal::from(15),
            measures: vec![PresentationMeasure {
                name: "malla completa".to_string(),
                kg: Decimal::from(15),
                price_per_kg: Decimal::from(12),
            }],
        },
        Presentation {
            id: Uuid::new_v4(),
            name: "Media malla".to_string(),
            total_kg: Decimal::new(75, 1),
            measures: vec![PresentationMeasure {
                name: "media malla".to_string(),
                kg: Decimal::new(75, 1),
                price_per_kg: Decimal::from(12),
            }],
        },
    ]
}
