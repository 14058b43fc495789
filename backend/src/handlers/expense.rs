//! Expense HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::expense::{CreateExpenseInput, ExpenseQuery, ExpenseService};
use crate::AppState;

/// List expenses, optionally filtered by lot, sector or date range
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpenseQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ExpenseService::new(state.db.clone());
    let expenses = service.get_expenses(&query).await?;
    Ok(Json(serde_json::json!({ "expenses": expenses })))
}

/// Record a new expense
pub async fn create_expense(
    State(state): State<AppState>,
    Json(input): Json<CreateExpenseInput>,
) -> AppResult<impl IntoResponse> {
    let service = ExpenseService::new(state.db.clone());
    let expense = service.create_expense(input).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// Delete an expense
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = ExpenseService::new(state.db.clone());
    service.delete_expense(expense_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
