//! Income records and income statement closures

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{
    ClosureStatus, HarvestStatus, IncomeRecord, IncomeStatementClosure, IncomeStatus,
    QuantityDistribution,
};
use shared::validation::{validate_closure, validate_distribution};

use super::harvest::HarvestService;

/// Income service for realized revenues and period closures
#[derive(Clone)]
pub struct IncomeService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct IncomeRecordRow {
    id: Uuid,
    harvest_plan_id: Uuid,
    quantity: i64,
    total_amount: Decimal,
    status: String,
    distribution: Option<serde_json::Value>,
    sale_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl IncomeRecordRow {
    pub(crate) fn into_record(self) -> AppResult<IncomeRecord> {
        let status = IncomeStatus::from_str(&self.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown income status '{}'", self.status))
        })?;
        let distribution = match self.distribution {
            Some(value) => Some(serde_json::from_value(value).map_err(|e| {
                AppError::Internal(format!("Malformed income distribution: {}", e))
            })?),
            None => None,
        };
        Ok(IncomeRecord {
            id: self.id,
            harvest_plan_id: self.harvest_plan_id,
            quantity: self.quantity,
            total_amount: self.total_amount,
            status,
            distribution,
            sale_date: self.sale_date,
            created_at: self.created_at,
        })
    }
}

pub(crate) const INCOME_COLUMNS: &str =
    "id, harvest_plan_id, quantity, total_amount, status, distribution, sale_date, created_at";

#[derive(Debug, Clone, sqlx::FromRow)]
struct ClosureRow {
    id: Uuid,
    period_start_date: NaiveDate,
    period_end_date: NaiveDate,
    total_revenues: Decimal,
    total_expenses: Decimal,
    gross_profit: Decimal,
    net_profit: Decimal,
    profit_margin: Decimal,
    status: String,
    included_harvest_ids: Vec<Uuid>,
    closed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl ClosureRow {
    fn into_closure(self) -> AppResult<IncomeStatementClosure> {
        let status = ClosureStatus::from_str(&self.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown closure status '{}'", self.status))
        })?;
        Ok(IncomeStatementClosure {
            id: self.id,
            period_start_date: self.period_start_date,
            period_end_date: self.period_end_date,
            total_revenues: self.total_revenues,
            total_expenses: self.total_expenses,
            gross_profit: self.gross_profit,
            net_profit: self.net_profit,
            profit_margin: self.profit_margin,
            status,
            included_harvest_ids: self.included_harvest_ids,
            closed_at: self.closed_at,
            created_at: self.created_at,
        })
    }
}

const CLOSURE_COLUMNS: &str = "id, period_start_date, period_end_date, total_revenues, \
     total_expenses, gross_profit, net_profit, profit_margin, status, included_harvest_ids, \
     closed_at, created_at";

/// Input for confirming realized income against a completed harvest
#[derive(Debug, Deserialize)]
pub struct CreateIncomeInput {
    pub harvest_plan_id: Uuid,
    pub quantity: i64,
    pub total_amount: Decimal,
    pub distribution: Option<QuantityDistribution>,
    pub sale_date: NaiveDate,
}

/// Input for creating a closure snapshot. The caller supplies the numbers;
/// the identity gross = revenues - expenses is validated before anything is
/// written.
#[derive(Debug, Deserialize)]
pub struct CreateClosureInput {
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub total_revenues: Decimal,
    pub total_expenses: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
    pub profit_margin: Decimal,
    pub included_harvest_ids: Vec<Uuid>,
}

impl IncomeService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Income records
    // ------------------------------------------------------------------

    /// Get all income records
    pub async fn get_income_records(&self) -> AppResult<Vec<IncomeRecord>> {
        let rows = sqlx::query_as::<_, IncomeRecordRow>(&format!(
            "SELECT {} FROM income_records ORDER BY sale_date DESC",
            INCOME_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(IncomeRecordRow::into_record).collect()
    }

    /// Get an income record by ID
    pub async fn get_income_record(&self, record_id: Uuid) -> AppResult<IncomeRecord> {
        let row = sqlx::query_as::<_, IncomeRecordRow>(&format!(
            "SELECT {} FROM income_records WHERE id = $1",
            INCOME_COLUMNS
        ))
        .bind(record_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Income record".to_string()))?;

        row.into_record()
    }

    /// Confirm realized income for a completed harvest plan. Each plan takes
    /// at most one active record; the check is a lookup, not a constraint.
    pub async fn create_income_record(&self, input: CreateIncomeInput) -> AppResult<IncomeRecord> {
        if input.total_amount < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "total_amount".to_string(),
                message: "Income amount cannot be negative".to_string(),
                message_es: "El monto del ingreso no puede ser negativo".to_string(),
            });
        }
        if input.quantity < 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity cannot be negative".to_string(),
                message_es: "La cantidad no puede ser negativa".to_string(),
            });
        }
        if let Some(ref distribution) = input.distribution {
            validate_distribution(distribution).map_err(|msg| AppError::Validation {
                field: "distribution".to_string(),
                message: msg.to_string(),
                message_es: format!("Distribución inválida: {}", msg),
            })?;
        }

        let plan = HarvestService::new(self.db.clone())
            .get_plan(input.harvest_plan_id)
            .await?;
        if plan.status != HarvestStatus::Completed {
            return Err(AppError::Validation {
                field: "harvest_plan_id".to_string(),
                message: "Income can only be recorded against a completed harvest".to_string(),
                message_es: "Solo se puede registrar ingreso sobre una cosecha completada"
                    .to_string(),
            });
        }

        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM income_records WHERE harvest_plan_id = $1 AND status != 'cancelled'",
        )
        .bind(input.harvest_plan_id)
        .fetch_one(&self.db)
        .await?;
        if existing > 0 {
            return Err(AppError::DuplicateEntry("harvest_plan_id".to_string()));
        }

        let distribution_json = input
            .distribution
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::Internal(format!("Distribution serialization error: {}", e)))?;

        let row = sqlx::query_as::<_, IncomeRecordRow>(&format!(
            r#"
            INSERT INTO income_records (harvest_plan_id, quantity, total_amount, status, distribution, sale_date)
            VALUES ($1, $2, $3, 'confirmed', $4, $5)
            RETURNING {}
            "#,
            INCOME_COLUMNS
        ))
        .bind(input.harvest_plan_id)
        .bind(input.quantity)
        .bind(input.total_amount)
        .bind(&distribution_json)
        .bind(input.sale_date)
        .fetch_one(&self.db)
        .await?;

        row.into_record()
    }

    /// Cancel an income record, letting the estimate speak again
    pub async fn cancel_income_record(&self, record_id: Uuid) -> AppResult<IncomeRecord> {
        let existing = self.get_income_record(record_id).await?;
        if existing.status == IncomeStatus::Cancelled {
            return Err(AppError::InvalidStateTransition(
                "Income record is already cancelled".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, IncomeRecordRow>(&format!(
            "UPDATE income_records SET status = 'cancelled' WHERE id = $1 RETURNING {}",
            INCOME_COLUMNS
        ))
        .bind(record_id)
        .fetch_one(&self.db)
        .await?;

        row.into_record()
    }

    // ------------------------------------------------------------------
    // Income statement closures
    // ------------------------------------------------------------------

    /// Get all closures
    pub async fn get_closures(&self) -> AppResult<Vec<IncomeStatementClosure>> {
        let rows = sqlx::query_as::<_, ClosureRow>(&format!(
            "SELECT {} FROM income_closures ORDER BY period_start_date DESC",
            CLOSURE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(ClosureRow::into_closure).collect()
    }

    /// Get a closure by ID
    pub async fn get_closure(&self, closure_id: Uuid) -> AppResult<IncomeStatementClosure> {
        let row = sqlx::query_as::<_, ClosureRow>(&format!(
            "SELECT {} FROM income_closures WHERE id = $1",
            CLOSURE_COLUMNS
        ))
        .bind(closure_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Income statement closure".to_string()))?;

        row.into_closure()
    }

    /// Create a draft closure after validating the gross-profit identity
    pub async fn create_closure(
        &self,
        input: CreateClosureInput,
    ) -> AppResult<IncomeStatementClosure> {
        let candidate = IncomeStatementClosure {
            id: Uuid::new_v4(),
            period_start_date: input.period_start_date,
            period_end_date: input.period_end_date,
            total_revenues: input.total_revenues,
            total_expenses: input.total_expenses,
            gross_profit: input.gross_profit,
            net_profit: input.net_profit,
            profit_margin: input.profit_margin,
            status: ClosureStatus::Draft,
            included_harvest_ids: input.included_harvest_ids.clone(),
            closed_at: None,
            created_at: Utc::now(),
        };
        validate_closure(&candidate).map_err(|msg| AppError::Validation {
            field: "gross_profit".to_string(),
            message: msg.to_string(),
            message_es: format!("Cierre inválido: {}", msg),
        })?;

        let row = sqlx::query_as::<_, ClosureRow>(&format!(
            r#"
            INSERT INTO income_closures (period_start_date, period_end_date, total_revenues,
                                         total_expenses, gross_profit, net_profit, profit_margin,
                                         status, included_harvest_ids)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'draft', $8)
            RETURNING {}
            "#,
            CLOSURE_COLUMNS
        ))
        .bind(input.period_start_date)
        .bind(input.period_end_date)
        .bind(input.total_revenues)
        .bind(input.total_expenses)
        .bind(input.gross_profit)
        .bind(input.net_profit)
        .bind(input.profit_margin)
        .bind(&input.included_harvest_ids)
        .fetch_one(&self.db)
        .await?;

        row.into_closure()
    }

    /// Finalize a draft closure, freezing its numbers
    pub async fn finalize_closure(&self, closure_id: Uuid) -> AppResult<IncomeStatementClosure> {
        let existing = self.get_closure(closure_id).await?;
        if existing.status == ClosureStatus::Final {
            return Err(AppError::InvalidStateTransition(
                "Closure is already final".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, ClosureRow>(&format!(
            "UPDATE income_closures SET status = 'final', closed_at = now() WHERE id = $1 RETURNING {}",
            CLOSURE_COLUMNS
        ))
        .bind(closure_id)
        .fetch_one(&self.db)
        .await?;

        row.into_closure()
    }

    /// Delete a closure. Final closures are frozen snapshots and stay.
    pub async fn delete_closure(&self, closure_id: Uuid) -> AppResult<()> {
        let existing = self.get_closure(closure_id).await?;
        if existing.status == ClosureStatus::Final {
            return Err(AppError::InvalidStateTransition(
                "A final closure cannot be deleted".to_string(),
            ));
        }

        sqlx::query("DELETE FROM income_closures WHERE id = $1")
            .bind(closure_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
