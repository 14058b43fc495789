//! Sector management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Sector, SectorWithLots};

use super::lot::LotService;

/// Sector service for managing cultivation sectors
#[derive(Clone)]
pub struct SectorService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct SectorRow {
    id: Uuid,
    name: String,
    location: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SectorRow> for Sector {
    fn from(row: SectorRow) -> Self {
        Sector {
            id: row.id,
            name: row.name,
            location: row.location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a sector
#[derive(Debug, Deserialize)]
pub struct CreateSectorInput {
    pub name: String,
    pub location: String,
}

/// Input for updating a sector
#[derive(Debug, Deserialize)]
pub struct UpdateSectorInput {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl SectorService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all sectors
    pub async fn get_sectors(&self) -> AppResult<Vec<Sector>> {
        let rows = sqlx::query_as::<_, SectorRow>(
            "SELECT id, name, location, created_at, updated_at FROM sectors ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Sector::from).collect())
    }

    /// Get a sector with the lots it owns
    pub async fn get_sector_with_lots(&self, sector_id: Uuid) -> AppResult<SectorWithLots> {
        let row = sqlx::query_as::<_, SectorRow>(
            "SELECT id, name, location, created_at, updated_at FROM sectors WHERE id = $1",
        )
        .bind(sector_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sector".to_string()))?;

        let lots = LotService::new(self.db.clone())
            .get_lots_by_sector(sector_id)
            .await?;

        Ok(SectorWithLots {
            sector: Sector::from(row),
            lots,
        })
    }

    /// Create a new sector
    pub async fn create_sector(&self, input: CreateSectorInput) -> AppResult<Sector> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Sector name cannot be empty".to_string(),
                message_es: "El nombre del sector no puede estar vacío".to_string(),
            });
        }

        let row = sqlx::query_as::<_, SectorRow>(
            r#"
            INSERT INTO sectors (name, location)
            VALUES ($1, $2)
            RETURNING id, name, location, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.location)
        .fetch_one(&self.db)
        .await?;

        Ok(Sector::from(row))
    }

    /// Update a sector
    pub async fn update_sector(
        &self,
        sector_id: Uuid,
        input: UpdateSectorInput,
    ) -> AppResult<Sector> {
        let existing = sqlx::query_as::<_, (String, String)>(
            "SELECT name, location FROM sectors WHERE id = $1",
        )
        .bind(sector_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sector".to_string()))?;

        let name = input.name.unwrap_or(existing.0);
        let location = input.location.unwrap_or(existing.1);

        let row = sqlx::query_as::<_, SectorRow>(
            r#"
            UPDATE sectors
            SET name = $1, location = $2, updated_at = now()
            WHERE id = $3
            RETURNING id, name, location, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&location)
        .bind(sector_id)
        .fetch_one(&self.db)
        .await?;

        Ok(Sector::from(row))
    }

    /// Delete a sector. Lots are never deleted, so a sector with lots
    /// cannot be removed.
    pub async fn delete_sector(&self, sector_id: Uuid) -> AppResult<()> {
        let lot_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM lots WHERE sector_id = $1")
                .bind(sector_id)
                .fetch_one(&self.db)
                .await?;

        if lot_count > 0 {
            return Err(AppError::Validation {
                field: "sector_id".to_string(),
                message: "Cannot delete a sector that has lots".to_string(),
                message_es: "No se puede eliminar un sector con siembras".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM sectors WHERE id = $1")
            .bind(sector_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Sector".to_string()));
        }

        Ok(())
    }
}
