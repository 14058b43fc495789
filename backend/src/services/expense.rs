//! Expense management service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Expense, ExpenseCategory};

/// Expense service for operational expense records
#[derive(Clone)]
pub struct ExpenseService {
    db: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ExpenseRow {
    id: Uuid,
    lot_id: Option<Uuid>,
    sector_id: Option<Uuid>,
    date: NaiveDate,
    category: String,
    description: String,
    amount: Decimal,
    created_at: DateTime<Utc>,
}

impl ExpenseRow {
    pub(crate) fn into_expense(self) -> AppResult<Expense> {
        let category = ExpenseCategory::from_str(&self.category).ok_or_else(|| {
            AppError::Internal(format!("Unknown expense category '{}'", self.category))
        })?;
        Ok(Expense {
            id: self.id,
            lot_id: self.lot_id,
            sector_id: self.sector_id,
            date: self.date,
            category,
            description: self.description,
            amount: self.amount,
            created_at: self.created_at,
        })
    }
}

pub(crate) const EXPENSE_COLUMNS: &str =
    "id, lot_id, sector_id, date, category, description, amount, created_at";

/// Input for recording an expense
#[derive(Debug, Deserialize)]
pub struct CreateExpenseInput {
    pub lot_id: Option<Uuid>,
    pub sector_id: Option<Uuid>,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: Decimal,
}

/// Query filters for listing expenses
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseQuery {
    pub lot_id: Option<Uuid>,
    pub sector_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExpenseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List expenses, optionally narrowed by lot, sector or date range
    pub async fn get_expenses(&self, query: &ExpenseQuery) -> AppResult<Vec<Expense>> {
        let start = query
            .start_date
            .unwrap_or(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default());
        let end = query
            .end_date
            .unwrap_or(NaiveDate::from_ymd_opt(2100, 12, 31).unwrap_or_default());

        let rows = sqlx::query_as::<_, ExpenseRow>(&format!(
            r#"
            SELECT {}
            FROM expenses
            WHERE date BETWEEN $1 AND $2
              AND ($3::uuid IS NULL OR lot_id = $3)
              AND ($4::uuid IS NULL OR sector_id = $4)
            ORDER BY date DESC
            "#,
            EXPENSE_COLUMNS
        ))
        .bind(start)
        .bind(end)
        .bind(query.lot_id)
        .bind(query.sector_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(ExpenseRow::into_expense).collect()
    }

    /// Record a new expense
    pub async fn create_expense(&self, input: CreateExpenseInput) -> AppResult<Expense> {
        if input.amount < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: "Expense amount cannot be negative".to_string(),
                message_es: "El monto del gasto no puede ser negativo".to_string(),
            });
        }

        if let Some(lot_id) = input.lot_id {
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lots WHERE id = $1")
                .bind(lot_id)
                .fetch_one(&self.db)
                .await?;
            if exists == 0 {
                return Err(AppError::NotFound("Lot".to_string()));
            }
        }
        if let Some(sector_id) = input.sector_id {
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sectors WHERE id = $1")
                .bind(sector_id)
                .fetch_one(&self.db)
                .await?;
            if exists == 0 {
                return Err(AppError::NotFound("Sector".to_string()));
            }
        }

        let row = sqlx::query_as::<_, ExpenseRow>(&format!(
            r#"
            INSERT INTO expenses (lot_id, sector_id, date, category, description, amount)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            EXPENSE_COLUMNS
        ))
        .bind(input.lot_id)
        .bind(input.sector_id)
        .bind(input.date)
        .bind(input.category.as_str())
        .bind(&input.description)
        .bind(input.amount)
        .fetch_one(&self.db)
        .await?;

        row.into_expense()
    }

    /// Delete an expense
    pub async fn delete_expense(&self, expense_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(expense_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Expense".to_string()));
        }

        Ok(())
    }
}
