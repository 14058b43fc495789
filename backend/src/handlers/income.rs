//! Income record and closure HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::income::{CreateClosureInput, CreateIncomeInput, IncomeService};
use crate::AppState;

/// List all income records
pub async fn list_income_records(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = IncomeService::new(state.db.clone());
    let records = service.get_income_records().await?;
    Ok(Json(serde_json::json!({ "income_records": records })))
}

/// Get a specific income record
pub async fn get_income_record(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = IncomeService::new(state.db.clone());
    let record = service.get_income_record(record_id).await?;
    Ok(Json(record))
}

/// Confirm realized income for a completed harvest
pub async fn create_income_record(
    State(state): State<AppState>,
    Json(input): Json<CreateIncomeInput>,
) -> AppResult<impl IntoResponse> {
    let service = IncomeService::new(state.db.clone());
    let record = service.create_income_record(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Cancel an income record
pub async fn cancel_income_record(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = IncomeService::new(state.db.clone());
    let record = service.cancel_income_record(record_id).await?;
    Ok(Json(record))
}

/// List all income statement closures
pub async fn list_closures(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = IncomeService::new(state.db.clone());
    let closures = service.get_closures().await?;
    Ok(Json(serde_json::json!({ "closures": closures })))
}

/// Get a specific closure
pub async fn get_closure(
    State(state): State<AppState>,
    Path(closure_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = IncomeService::new(state.db.clone());
    let closure = service.get_closure(closure_id).await?;
    Ok(Json(closure))
}

/// Create a draft closure
pub async fn create_closure(
    State(state): State<AppState>,
    Json(input): Json<CreateClosureInput>,
) -> AppResult<impl IntoResponse> {
    let service = IncomeService::new(state.db.clone());
    let closure = service.create_closure(input).await?;
    Ok((StatusCode::CREATED, Json(closure)))
}

/// Finalize a draft closure
pub async fn finalize_closure(
    State(state): State<AppState>,
    Path(closure_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = IncomeService::new(state.db.clone());
    let closure = service.finalize_closure(closure_id).await?;
    Ok(Json(closure))
}

/// Delete a draft closure
pub async fn delete_closure(
    State(state): State<AppState>,
    Path(closure_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = IncomeService::new(state.db.clone());
    service.delete_closure(closure_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
