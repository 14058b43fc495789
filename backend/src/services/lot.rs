//! Seeding lot management service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Lot, LotStatus};
use shared::validation::{validate_lot_quantities, validate_sizes};

/// Lot service for managing seeding lots
#[derive(Clone)]
pub struct LotService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct LotRow {
    id: Uuid,
    sector_id: Uuid,
    origin: String,
    entry_date: NaiveDate,
    projected_harvest_date: NaiveDate,
    initial_quantity: i64,
    current_quantity: i64,
    average_size: Decimal,
    min_size: Decimal,
    max_size: Decimal,
    status: String,
    cost: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LotRow {
    pub(crate) fn into_lot(self) -> AppResult<Lot> {
        let status = LotStatus::from_str(&self.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown lot status '{}'", self.status)))?;
        Ok(Lot {
            id: self.id,
            sector_id: self.sector_id,
            origin: self.origin,
            entry_date: self.entry_date,
            projected_harvest_date: self.projected_harvest_date,
            initial_quantity: self.initial_quantity,
            current_quantity: self.current_quantity,
            average_size: self.average_size,
            min_size: self.min_size,
            max_size: self.max_size,
            status,
            cost: self.cost,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const LOT_COLUMNS: &str = "id, sector_id, origin, entry_date, projected_harvest_date, \
     initial_quantity, current_quantity, average_size, min_size, max_size, status, cost, \
     created_at, updated_at";

/// Input for creating a lot
#[derive(Debug, Deserialize)]
pub struct CreateLotInput {
    pub sector_id: Uuid,
    pub origin: String,
    pub entry_date: NaiveDate,
    pub projected_harvest_date: NaiveDate,
    pub initial_quantity: i64,
    pub average_size: Option<Decimal>,
    pub min_size: Option<Decimal>,
    pub max_size: Option<Decimal>,
    pub cost: Decimal,
}

/// Input for updating a lot
#[derive(Debug, Deserialize)]
pub struct UpdateLotInput {
    pub origin: Option<String>,
    pub projected_harvest_date: Option<NaiveDate>,
    pub current_quantity: Option<i64>,
    pub average_size: Option<Decimal>,
    pub min_size: Option<Decimal>,
    pub max_size: Option<Decimal>,
    pub status: Option<LotStatus>,
    pub cost: Option<Decimal>,
    /// Status normally advances monotonically; a manual correction may move
    /// it backwards when this flag is set.
    pub correction: Option<bool>,
}

impl LotService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all lots
    pub async fn get_lots(&self) -> AppResult<Vec<Lot>> {
        let rows = sqlx::query_as::<_, LotRow>(&format!(
            "SELECT {} FROM lots ORDER BY entry_date DESC",
            LOT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(LotRow::into_lot).collect()
    }

    /// Get the lots of a sector
    pub async fn get_lots_by_sector(&self, sector_id: Uuid) -> AppResult<Vec<Lot>> {
        let rows = sqlx::query_as::<_, LotRow>(&format!(
            "SELECT {} FROM lots WHERE sector_id = $1 ORDER BY entry_date DESC",
            LOT_COLUMNS
        ))
        .bind(sector_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(LotRow::into_lot).collect()
    }

    /// Get a lot by ID
    pub async fn get_lot(&self, lot_id: Uuid) -> AppResult<Lot> {
        let row = sqlx::query_as::<_, LotRow>(&format!(
            "SELECT {} FROM lots WHERE id = $1",
            LOT_COLUMNS
        ))
        .bind(lot_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Lot".to_string()))?;

        row.into_lot()
    }

    /// Create a new seeding lot. The lot starts as `seeded` with its full
    /// initial quantity.
    pub async fn create_lot(&self, input: CreateLotInput) -> AppResult<Lot> {
        if input.initial_quantity <= 0 {
            return Err(AppError::Validation {
                field: "initial_quantity".to_string(),
                message: "Initial quantity must be greater than 0".to_string(),
                message_es: "La cantidad inicial debe ser mayor a 0".to_string(),
            });
        }
        if input.cost < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "cost".to_string(),
                message: "Seeding cost cannot be negative".to_string(),
                message_es: "El costo de siembra no puede ser negativo".to_string(),
            });
        }

        let average = input.average_size.unwrap_or(Decimal::ZERO);
        let min = input.min_size.unwrap_or(average);
        let max = input.max_size.unwrap_or(average);
        validate_sizes(min, average, max).map_err(|msg| AppError::Validation {
            field: "sizes".to_string(),
            message: msg.to_string(),
            message_es: format!("Tallas inválidas: {}", msg),
        })?;

        // Validate sector exists
        let sector_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sectors WHERE id = $1")
            .bind(input.sector_id)
            .fetch_one(&self.db)
            .await?;
        if sector_exists == 0 {
            return Err(AppError::NotFound("Sector".to_string()));
        }

        let row = sqlx::query_as::<_, LotRow>(&format!(
            r#"
            INSERT INTO lots (sector_id, origin, entry_date, projected_harvest_date,
                              initial_quantity, current_quantity, average_size, min_size,
                              max_size, status, cost)
            VALUES ($1, $2, $3, $4, $5, $5, $6, $7, $8, 'seeded', $9)
            RETURNING {}
            "#,
            LOT_COLUMNS
        ))
        .bind(input.sector_id)
        .bind(&input.origin)
        .bind(input.entry_date)
        .bind(input.projected_harvest_date)
        .bind(input.initial_quantity)
        .bind(average)
        .bind(min)
        .bind(max)
        .bind(input.cost)
        .fetch_one(&self.db)
        .await?;

        row.into_lot()
    }

    /// Update a lot. Status advances monotonically unless the update is an
    /// explicit correction; mortality only reduces the current quantity.
    pub async fn update_lot(&self, lot_id: Uuid, input: UpdateLotInput) -> AppResult<Lot> {
        let existing = self.get_lot(lot_id).await?;

        let status = match input.status {
            Some(next) => {
                let correction = input.correction.unwrap_or(false);
                if !correction && !existing.status.can_advance_to(next) {
                    return Err(AppError::InvalidStateTransition(format!(
                        "Lot status cannot go back from '{}' to '{}' without a correction",
                        existing.status, next
                    )));
                }
                next
            }
            None => existing.status,
        };

        let current_quantity = input.current_quantity.unwrap_or(existing.current_quantity);
        validate_lot_quantities(existing.initial_quantity, current_quantity).map_err(|msg| {
            AppError::Validation {
                field: "current_quantity".to_string(),
                message: msg.to_string(),
                message_es: format!("Cantidad inválida: {}", msg),
            }
        })?;

        let average = input.average_size.unwrap_or(existing.average_size);
        let min = input.min_size.unwrap_or(existing.min_size);
        let max = input.max_size.unwrap_or(existing.max_size);
        validate_sizes(min, average, max).map_err(|msg| AppError::Validation {
            field: "sizes".to_string(),
            message: msg.to_string(),
            message_es: format!("Tallas inválidas: {}", msg),
        })?;

        let origin = input.origin.unwrap_or(existing.origin);
        let projected = input
            .projected_harvest_date
            .unwrap_or(existing.projected_harvest_date);
        let cost = input.cost.unwrap_or(existing.cost);

        let row = sqlx::query_as::<_, LotRow>(&format!(
            r#"
            UPDATE lots
            SET origin = $1, projected_harvest_date = $2, current_quantity = $3,
                average_size = $4, min_size = $5, max_size = $6, status = $7,
                cost = $8, updated_at = now()
            WHERE id = $9
            RETURNING {}
            "#,
            LOT_COLUMNS
        ))
        .bind(&origin)
        .bind(projected)
        .bind(current_quantity)
        .bind(average)
        .bind(min)
        .bind(max)
        .bind(status.as_str())
        .bind(cost)
        .bind(lot_id)
        .fetch_one(&self.db)
        .await?;

        row.into_lot()
    }
}
