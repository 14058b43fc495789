//! Price list management service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Pricing;

/// Pricing service for the size-category price list
#[derive(Clone)]
pub struct PricingService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct PricingRow {
    id: Uuid,
    size_category: String,
    price_per_unit: Decimal,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PricingRow> for Pricing {
    fn from(row: PricingRow) -> Self {
        Pricing {
            id: row.id,
            size_category: row.size_category,
            price_per_unit: row.price_per_unit,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRICING_COLUMNS: &str =
    "id, size_category, price_per_unit, is_active, created_at, updated_at";

/// Input for creating a price entry
#[derive(Debug, Deserialize)]
pub struct CreatePriceInput {
    pub size_category: String,
    pub price_per_unit: Decimal,
    /// When true the new entry becomes the authoritative one for its
    /// category, deactivating its siblings
    pub activate: Option<bool>,
}

impl PricingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the full price list, active and inactive entries
    pub async fn get_pricing(&self) -> AppResult<Vec<Pricing>> {
        let rows = sqlx::query_as::<_, PricingRow>(&format!(
            "SELECT {} FROM pricing ORDER BY size_category ASC, created_at DESC",
            PRICING_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Pricing::from).collect())
    }

    /// Get only the active entries, one per size category
    pub async fn get_active_pricing(&self) -> AppResult<Vec<Pricing>> {
        let rows = sqlx::query_as::<_, PricingRow>(&format!(
            "SELECT {} FROM pricing WHERE is_active = true ORDER BY size_category ASC",
            PRICING_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Pricing::from).collect())
    }

    /// Create a price entry for a size category
    pub async fn create_price(&self, input: CreatePriceInput) -> AppResult<Pricing> {
        let category = input.size_category.trim().to_string();
        if category.is_empty() {
            return Err(AppError::Validation {
                field: "size_category".to_string(),
                message: "Size category cannot be empty".to_string(),
                message_es: "La categoría de talla no puede estar vacía".to_string(),
            });
        }
        if input.price_per_unit < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "price_per_unit".to_string(),
                message: "Price cannot be negative".to_string(),
                message_es: "El precio no puede ser negativo".to_string(),
            });
        }

        let activate = input.activate.unwrap_or(false);
        let mut tx = self.db.begin().await?;

        if activate {
            sqlx::query("UPDATE pricing SET is_active = false, updated_at = now() WHERE size_category = $1")
                .bind(&category)
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, PricingRow>(&format!(
            r#"
            INSERT INTO pricing (size_category, price_per_unit, is_active)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            PRICING_COLUMNS
        ))
        .bind(&category)
        .bind(input.price_per_unit)
        .bind(activate)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Pricing::from(row))
    }

    /// Make an entry the authoritative price for its category
    pub async fn activate_price(&self, price_id: Uuid) -> AppResult<Pricing> {
        let category: String =
            sqlx::query_scalar("SELECT size_category FROM pricing WHERE id = $1")
                .bind(price_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Price entry".to_string()))?;

        let mut tx = self.db.begin().await?;

        sqlx::query("UPDATE pricing SET is_active = false, updated_at = now() WHERE size_category = $1")
            .bind(&category)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, PricingRow>(&format!(
            "UPDATE pricing SET is_active = true, updated_at = now() WHERE id = $1 RETURNING {}",
            PRICING_COLUMNS
        ))
        .bind(price_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Pricing::from(row))
    }

    /// Delete a price entry
    pub async fn delete_price(&self, price_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM pricing WHERE id = $1")
            .bind(price_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Price entry".to_string()));
        }

        Ok(())
    }
}
