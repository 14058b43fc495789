//! Growth monitoring service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{LotStatus, MonitoringRecord};
use shared::validation::validate_sizes;

use super::lot::LotService;

/// Monitoring service for growth and mortality samplings
#[derive(Clone)]
pub struct MonitoringService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct MonitoringRow {
    id: Uuid,
    lot_id: Uuid,
    date: NaiveDate,
    sampled_quantity: i64,
    average_size: Decimal,
    min_size: Decimal,
    max_size: Decimal,
    estimated_survival: i64,
    observations: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<MonitoringRow> for MonitoringRecord {
    fn from(row: MonitoringRow) -> Self {
        MonitoringRecord {
            id: row.id,
            lot_id: row.lot_id,
            date: row.date,
            sampled_quantity: row.sampled_quantity,
            average_size: row.average_size,
            min_size: row.min_size,
            max_size: row.max_size,
            estimated_survival: row.estimated_survival,
            observations: row.observations,
            created_at: row.created_at,
        }
    }
}

const MONITORING_COLUMNS: &str = "id, lot_id, date, sampled_quantity, average_size, min_size, \
     max_size, estimated_survival, observations, created_at";

/// Input for recording a monitoring sample
#[derive(Debug, Deserialize)]
pub struct CreateMonitoringInput {
    pub lot_id: Uuid,
    pub date: NaiveDate,
    pub sampled_quantity: i64,
    pub average_size: Decimal,
    pub min_size: Decimal,
    pub max_size: Decimal,
    pub estimated_survival: i64,
    pub observations: Option<String>,
}

impl MonitoringService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the monitoring history of a lot, newest first
    pub async fn get_monitorings_by_lot(&self, lot_id: Uuid) -> AppResult<Vec<MonitoringRecord>> {
        let rows = sqlx::query_as::<_, MonitoringRow>(&format!(
            "SELECT {} FROM monitorings WHERE lot_id = $1 ORDER BY date DESC",
            MONITORING_COLUMNS
        ))
        .bind(lot_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(MonitoringRecord::from).collect())
    }

    /// Record a monitoring sample and fold it into the lot: sizes move to
    /// the sampled values, the current quantity drops to the estimated
    /// survival (mortality only reduces), and a freshly seeded lot starts
    /// growing.
    pub async fn create_monitoring(
        &self,
        input: CreateMonitoringInput,
    ) -> AppResult<MonitoringRecord> {
        if input.sampled_quantity <= 0 {
            return Err(AppError::Validation {
                field: "sampled_quantity".to_string(),
                message: "Sampled quantity must be greater than 0".to_string(),
                message_es: "La cantidad muestreada debe ser mayor a 0".to_string(),
            });
        }
        validate_sizes(input.min_size, input.average_size, input.max_size).map_err(|msg| {
            AppError::Validation {
                field: "sizes".to_string(),
                message: msg.to_string(),
                message_es: format!("Tallas inválidas: {}", msg),
            }
        })?;

        let lot = LotService::new(self.db.clone()).get_lot(input.lot_id).await?;

        if input.estimated_survival < 0 || input.estimated_survival > lot.current_quantity {
            return Err(AppError::Validation {
                field: "estimated_survival".to_string(),
                message: "Estimated survival must be between 0 and the lot's current quantity"
                    .to_string(),
                message_es:
                    "La supervivencia estimada debe estar entre 0 y la cantidad actual de la siembra"
                        .to_string(),
            });
        }

        let next_status = if lot.status == LotStatus::Seeded {
            LotStatus::Growing
        } else {
            lot.status
        };

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, MonitoringRow>(&format!(
            r#"
            INSERT INTO monitorings (lot_id, date, sampled_quantity, average_size, min_size,
                                     max_size, estimated_survival, observations)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            MONITORING_COLUMNS
        ))
        .bind(input.lot_id)
        .bind(input.date)
        .bind(input.sampled_quantity)
        .bind(input.average_size)
        .bind(input.min_size)
        .bind(input.max_size)
        .bind(input.estimated_survival)
        .bind(&input.observations)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE lots
            SET current_quantity = $1, average_size = $2, min_size = $3, max_size = $4,
                status = $5, updated_at = now()
            WHERE id = $6
            "#,
        )
        .bind(input.estimated_survival)
        .bind(input.average_size)
        .bind(input.min_size)
        .bind(input.max_size)
        .bind(next_status.as_str())
        .bind(input.lot_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(MonitoringRecord::from(row))
    }
}
