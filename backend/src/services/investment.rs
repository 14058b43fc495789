//! Investment and distribution management service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{
    Distribution, DistributionStatus, Investment, InvestmentStatus,
};
use shared::validation::{validate_amount, validate_percentage};

/// Investment service for investor stakes and their payouts
#[derive(Clone)]
pub struct InvestmentService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct InvestmentRow {
    id: Uuid,
    investor_id: Uuid,
    lot_id: Uuid,
    amount: Decimal,
    percentage: Decimal,
    status: String,
    total_distributed: Decimal,
    investment_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl InvestmentRow {
    pub(crate) fn into_investment(self) -> AppResult<Investment> {
        let status = InvestmentStatus::from_str(&self.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown investment status '{}'", self.status))
        })?;
        Ok(Investment {
            id: self.id,
            investor_id: self.investor_id,
            lot_id: self.lot_id,
            amount: self.amount,
            percentage: self.percentage,
            status,
            total_distributed: self.total_distributed,
            investment_date: self.investment_date,
            created_at: self.created_at,
        })
    }
}

const INVESTMENT_COLUMNS: &str = "id, investor_id, lot_id, amount, percentage, status, \
     total_distributed, investment_date, created_at";

#[derive(Debug, Clone, sqlx::FromRow)]
struct DistributionRow {
    id: Uuid,
    investment_id: Uuid,
    distributed_amount: Decimal,
    original_investment: Decimal,
    roi: Decimal,
    status: String,
    distribution_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl DistributionRow {
    fn into_distribution(self) -> AppResult<Distribution> {
        let status = DistributionStatus::from_str(&self.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown distribution status '{}'", self.status))
        })?;
        Ok(Distribution {
            id: self.id,
            investment_id: self.investment_id,
            distributed_amount: self.distributed_amount,
            original_investment: self.original_investment,
            roi: self.roi,
            status,
            distribution_date: self.distribution_date,
            created_at: self.created_at,
        })
    }
}

const DISTRIBUTION_COLUMNS: &str = "id, investment_id, distributed_amount, original_investment, \
     roi, status, distribution_date, created_at";

/// Input for registering an investment
#[derive(Debug, Deserialize)]
pub struct CreateInvestmentInput {
    pub investor_id: Uuid,
    pub lot_id: Uuid,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub investment_date: NaiveDate,
}

/// Input for disbursing a payout against an investment
#[derive(Debug, Deserialize)]
pub struct CreateDistributionInput {
    pub investment_id: Uuid,
    pub distributed_amount: Decimal,
    pub distribution_date: NaiveDate,
}

impl InvestmentService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all investments
    pub async fn get_investments(&self) -> AppResult<Vec<Investment>> {
        let rows = sqlx::query_as::<_, InvestmentRow>(&format!(
            "SELECT {} FROM investments ORDER BY investment_date DESC",
            INVESTMENT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(InvestmentRow::into_investment).collect()
    }

    /// Get an investment by ID
    pub async fn get_investment(&self, investment_id: Uuid) -> AppResult<Investment> {
        let row = sqlx::query_as::<_, InvestmentRow>(&format!(
            "SELECT {} FROM investments WHERE id = $1",
            INVESTMENT_COLUMNS
        ))
        .bind(investment_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Investment".to_string()))?;

        row.into_investment()
    }

    /// Register a new investment in a lot
    pub async fn create_investment(&self, input: CreateInvestmentInput) -> AppResult<Investment> {
        validate_amount(input.amount).map_err(|msg| AppError::Validation {
            field: "amount".to_string(),
            message: msg.to_string(),
            message_es: format!("Monto inválido: {}", msg),
        })?;
        validate_percentage(input.percentage).map_err(|msg| AppError::Validation {
            field: "percentage".to_string(),
            message: msg.to_string(),
            message_es: format!("Porcentaje inválido: {}", msg),
        })?;

        let lot_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lots WHERE id = $1")
            .bind(input.lot_id)
            .fetch_one(&self.db)
            .await?;
        if lot_exists == 0 {
            return Err(AppError::NotFound("Lot".to_string()));
        }

        let row = sqlx::query_as::<_, InvestmentRow>(&format!(
            r#"
            INSERT INTO investments (investor_id, lot_id, amount, percentage, status, investment_date)
            VALUES ($1, $2, $3, $4, 'active', $5)
            RETURNING {}
            "#,
            INVESTMENT_COLUMNS
        ))
        .bind(input.investor_id)
        .bind(input.lot_id)
        .bind(input.amount)
        .bind(input.percentage)
        .bind(input.investment_date)
        .fetch_one(&self.db)
        .await?;

        row.into_investment()
    }

    /// Cancel an investment that has received no payouts yet
    pub async fn cancel_investment(&self, investment_id: Uuid) -> AppResult<Investment> {
        let existing = self.get_investment(investment_id).await?;
        if existing.total_distributed > Decimal::ZERO {
            return Err(AppError::InvalidStateTransition(
                "An investment with distributions cannot be cancelled".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, InvestmentRow>(&format!(
            "UPDATE investments SET status = 'cancelled' WHERE id = $1 RETURNING {}",
            INVESTMENT_COLUMNS
        ))
        .bind(investment_id)
        .fetch_one(&self.db)
        .await?;

        row.into_investment()
    }

    /// Get all distributions, newest first
    pub async fn get_distributions(&self) -> AppResult<Vec<Distribution>> {
        let rows = sqlx::query_as::<_, DistributionRow>(&format!(
            "SELECT {} FROM distributions ORDER BY distribution_date DESC",
            DISTRIBUTION_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(DistributionRow::into_distribution).collect()
    }

    /// Get the distributions of one investment
    pub async fn get_distributions_by_investment(
        &self,
        investment_id: Uuid,
    ) -> AppResult<Vec<Distribution>> {
        let rows = sqlx::query_as::<_, DistributionRow>(&format!(
            "SELECT {} FROM distributions WHERE investment_id = $1 ORDER BY distribution_date DESC",
            DISTRIBUTION_COLUMNS
        ))
        .bind(investment_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(DistributionRow::into_distribution).collect()
    }

    /// Disburse a payout against an investment. The ROI is computed from the
    /// original investment amount; the investment's running total moves in
    /// the same transaction and the stake becomes `distributed` once the
    /// payouts cover it.
    pub async fn create_distribution(
        &self,
        input: CreateDistributionInput,
    ) -> AppResult<Distribution> {
        validate_amount(input.distributed_amount).map_err(|msg| AppError::Validation {
            field: "distributed_amount".to_string(),
            message: msg.to_string(),
            message_es: format!("Monto inválido: {}", msg),
        })?;

        let investment = self.get_investment(input.investment_id).await?;
        if investment.status == InvestmentStatus::Cancelled {
            return Err(AppError::InvalidStateTransition(
                "Cannot distribute against a cancelled investment".to_string(),
            ));
        }

        let roi = Distribution::compute_roi(input.distributed_amount, investment.amount);
        let new_total = investment.total_distributed + input.distributed_amount;
        let new_status = if new_total >= investment.amount {
            InvestmentStatus::Distributed
        } else {
            investment.status
        };

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, DistributionRow>(&format!(
            r#"
            INSERT INTO distributions (investment_id, distributed_amount, original_investment,
                                       roi, status, distribution_date)
            VALUES ($1, $2, $3, $4, 'pending', $5)
            RETURNING {}
            "#,
            DISTRIBUTION_COLUMNS
        ))
        .bind(investment.id)
        .bind(input.distributed_amount)
        .bind(investment.amount)
        .bind(roi)
        .bind(input.distribution_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE investments SET total_distributed = $1, status = $2 WHERE id = $3",
        )
        .bind(new_total)
        .bind(new_status.as_str())
        .bind(investment.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_distribution()
    }

    /// Mark a pending distribution as paid
    pub async fn mark_distribution_paid(&self, distribution_id: Uuid) -> AppResult<Distribution> {
        let row = sqlx::query_as::<_, DistributionRow>(&format!(
            "SELECT {} FROM distributions WHERE id = $1",
            DISTRIBUTION_COLUMNS
        ))
        .bind(distribution_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Distribution".to_string()))?;

        let existing = row.into_distribution()?;
        if existing.status == DistributionStatus::Paid {
            return Err(AppError::InvalidStateTransition(
                "Distribution is already paid".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, DistributionRow>(&format!(
            "UPDATE distributions SET status = 'paid' WHERE id = $1 RETURNING {}",
            DISTRIBUTION_COLUMNS
        ))
        .bind(distribution_id)
        .fetch_one(&self.db)
        .await?;

        row.into_distribution()
    }
}
