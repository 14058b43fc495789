//! Harvest plan management service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{HarvestPlan, HarvestStatus, LotStatus, QuantityDistribution};
use shared::validation::validate_distribution;

use super::lot::LotService;

/// Harvest service for planning and recording harvests
#[derive(Clone)]
pub struct HarvestService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct HarvestPlanRow {
    id: Uuid,
    lot_id: Uuid,
    sector_id: Uuid,
    planned_date: NaiveDate,
    actual_date: Option<NaiveDate>,
    estimated_quantity: i64,
    actual_quantity: Option<i64>,
    distribution: Option<serde_json::Value>,
    total_actual_cost: Option<Decimal>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl HarvestPlanRow {
    pub(crate) fn into_plan(self) -> AppResult<HarvestPlan> {
        let status = HarvestStatus::from_str(&self.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown harvest status '{}'", self.status))
        })?;
        let distribution = match self.distribution {
            Some(value) => Some(serde_json::from_value(value).map_err(|e| {
                AppError::Internal(format!("Malformed harvest distribution: {}", e))
            })?),
            None => None,
        };
        Ok(HarvestPlan {
            id: self.id,
            lot_id: self.lot_id,
            sector_id: self.sector_id,
            planned_date: self.planned_date,
            actual_date: self.actual_date,
            estimated_quantity: self.estimated_quantity,
            actual_quantity: self.actual_quantity,
            distribution,
            total_actual_cost: self.total_actual_cost,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub(crate) const PLAN_COLUMNS: &str = "id, lot_id, sector_id, planned_date, actual_date, \
     estimated_quantity, actual_quantity, distribution, total_actual_cost, status, \
     created_at, updated_at";

/// Input for creating a harvest plan
#[derive(Debug, Deserialize)]
pub struct CreatePlanInput {
    pub lot_id: Uuid,
    pub planned_date: NaiveDate,
    pub estimated_quantity: i64,
}

/// Input for updating a plan before it runs
#[derive(Debug, Deserialize)]
pub struct UpdatePlanInput {
    pub planned_date: Option<NaiveDate>,
    pub estimated_quantity: Option<i64>,
}

/// Input for completing a harvest
#[derive(Debug, Deserialize)]
pub struct CompleteHarvestInput {
    pub actual_date: NaiveDate,
    pub actual_quantity: i64,
    pub distribution: Option<QuantityDistribution>,
    pub total_actual_cost: Option<Decimal>,
}

impl HarvestService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all harvest plans
    pub async fn get_plans(&self) -> AppResult<Vec<HarvestPlan>> {
        let rows = sqlx::query_as::<_, HarvestPlanRow>(&format!(
            "SELECT {} FROM harvest_plans ORDER BY planned_date DESC",
            PLAN_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(HarvestPlanRow::into_plan).collect()
    }

    /// Get harvest plans for a specific lot
    pub async fn get_plans_by_lot(&self, lot_id: Uuid) -> AppResult<Vec<HarvestPlan>> {
        let rows = sqlx::query_as::<_, HarvestPlanRow>(&format!(
            "SELECT {} FROM harvest_plans WHERE lot_id = $1 ORDER BY planned_date DESC",
            PLAN_COLUMNS
        ))
        .bind(lot_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(HarvestPlanRow::into_plan).collect()
    }

    /// Get a harvest plan by ID
    pub async fn get_plan(&self, plan_id: Uuid) -> AppResult<HarvestPlan> {
        let row = sqlx::query_as::<_, HarvestPlanRow>(&format!(
            "SELECT {} FROM harvest_plans WHERE id = $1",
            PLAN_COLUMNS
        ))
        .bind(plan_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Harvest plan".to_string()))?;

        row.into_plan()
    }

    /// Create a new harvest plan against a lot
    pub async fn create_plan(&self, input: CreatePlanInput) -> AppResult<HarvestPlan> {
        if input.estimated_quantity <= 0 {
            return Err(AppError::Validation {
                field: "estimated_quantity".to_string(),
                message: "Estimated quantity must be greater than 0".to_string(),
                message_es: "La cantidad estimada debe ser mayor a 0".to_string(),
            });
        }

        let lot = LotService::new(self.db.clone()).get_lot(input.lot_id).await?;
        if lot.status == LotStatus::Empty {
            return Err(AppError::Validation {
                field: "lot_id".to_string(),
                message: "Cannot plan a harvest on an empty lot".to_string(),
                message_es: "No se puede planificar una cosecha en una siembra vacía".to_string(),
            });
        }

        let row = sqlx::query_as::<_, HarvestPlanRow>(&format!(
            r#"
            INSERT INTO harvest_plans (lot_id, sector_id, planned_date, estimated_quantity, status)
            VALUES ($1, $2, $3, $4, 'planned')
            RETURNING {}
            "#,
            PLAN_COLUMNS
        ))
        .bind(lot.id)
        .bind(lot.sector_id)
        .bind(input.planned_date)
        .bind(input.estimated_quantity)
        .fetch_one(&self.db)
        .await?;

        row.into_plan()
    }

    /// Update a plan that has not started yet
    pub async fn update_plan(&self, plan_id: Uuid, input: UpdatePlanInput) -> AppResult<HarvestPlan> {
        let existing = self.get_plan(plan_id).await?;
        if existing.status != HarvestStatus::Planned {
            return Err(AppError::InvalidStateTransition(format!(
                "Only planned harvests can be edited, this one is '{}'",
                existing.status
            )));
        }

        let planned_date = input.planned_date.unwrap_or(existing.planned_date);
        let estimated_quantity = input
            .estimated_quantity
            .unwrap_or(existing.estimated_quantity);
        if estimated_quantity <= 0 {
            return Err(AppError::Validation {
                field: "estimated_quantity".to_string(),
                message: "Estimated quantity must be greater than 0".to_string(),
                message_es: "La cantidad estimada debe ser mayor a 0".to_string(),
            });
        }

        let row = sqlx::query_as::<_, HarvestPlanRow>(&format!(
            r#"
            UPDATE harvest_plans
            SET planned_date = $1, estimated_quantity = $2, updated_at = now()
            WHERE id = $3
            RETURNING {}
            "#,
            PLAN_COLUMNS
        ))
        .bind(planned_date)
        .bind(estimated_quantity)
        .bind(plan_id)
        .fetch_one(&self.db)
        .await?;

        row.into_plan()
    }

    /// Move a plan from planned to in_progress
    pub async fn start_plan(&self, plan_id: Uuid) -> AppResult<HarvestPlan> {
        self.transition(plan_id, HarvestStatus::InProgress).await
    }

    /// Cancel a plan that has not completed
    pub async fn cancel_plan(&self, plan_id: Uuid) -> AppResult<HarvestPlan> {
        self.transition(plan_id, HarvestStatus::Cancelled).await
    }

    async fn transition(&self, plan_id: Uuid, next: HarvestStatus) -> AppResult<HarvestPlan> {
        let existing = self.get_plan(plan_id).await?;
        if !existing.status.can_transition_to(next) {
            return Err(AppError::InvalidStateTransition(format!(
                "Harvest plan cannot move from '{}' to '{}'",
                existing.status, next
            )));
        }

        let row = sqlx::query_as::<_, HarvestPlanRow>(&format!(
            "UPDATE harvest_plans SET status = $1, updated_at = now() WHERE id = $2 RETURNING {}",
            PLAN_COLUMNS
        ))
        .bind(next.as_str())
        .bind(plan_id)
        .fetch_one(&self.db)
        .await?;

        row.into_plan()
    }

    /// Complete a harvest: record the actual quantities and costs, reduce
    /// the lot and mark it harvested.
    pub async fn complete_plan(
        &self,
        plan_id: Uuid,
        input: CompleteHarvestInput,
    ) -> AppResult<HarvestPlan> {
        let existing = self.get_plan(plan_id).await?;
        if !existing.status.can_transition_to(HarvestStatus::Completed) {
            return Err(AppError::InvalidStateTransition(format!(
                "Harvest plan cannot move from '{}' to 'completed'",
                existing.status
            )));
        }

        if input.actual_quantity < 0 {
            return Err(AppError::Validation {
                field: "actual_quantity".to_string(),
                message: "Actual quantity cannot be negative".to_string(),
                message_es: "La cantidad real no puede ser negativa".to_string(),
            });
        }
        if let Some(cost) = input.total_actual_cost {
            if cost < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "total_actual_cost".to_string(),
                    message: "Harvest cost cannot be negative".to_string(),
                    message_es: "El costo de cosecha no puede ser negativo".to_string(),
                });
            }
        }
        if let Some(ref distribution) = input.distribution {
            validate_distribution(distribution).map_err(|msg| AppError::Validation {
                field: "distribution".to_string(),
                message: msg.to_string(),
                message_es: format!("Distribución inválida: {}", msg),
            })?;
        }

        let distribution_json = input
            .distribution
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::Internal(format!("Distribution serialization error: {}", e)))?;

        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            UPDATE harvest_plans
            SET status = 'completed', actual_date = $1, actual_quantity = $2,
                distribution = $3, total_actual_cost = $4, updated_at = now()
            WHERE id = $5
            "#,
        )
        .bind(input.actual_date)
        .bind(input.actual_quantity)
        .bind(&distribution_json)
        .bind(input.total_actual_cost)
        .bind(plan_id)
        .execute(&mut *tx)
        .await?;

        // Harvested units leave the lot; the count never drops below zero
        sqlx::query(
            r#"
            UPDATE lots
            SET current_quantity = GREATEST(current_quantity - $1, 0),
                status = 'harvested', updated_at = now()
            WHERE id = $2
            "#,
        )
        .bind(input.actual_quantity)
        .bind(existing.lot_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_plan(plan_id).await
    }
}
