//! Investment and distribution HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::investment::{
    CreateDistributionInput, CreateInvestmentInput, InvestmentService,
};
use crate::AppState;

/// List all investments
pub async fn list_investments(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = InvestmentService::new(state.db.clone());
    let investments = service.get_investments().await?;
    Ok(Json(serde_json::json!({ "investments": investments })))
}

/// Get a specific investment
pub async fn get_investment(
    State(state): State<AppState>,
    Path(investment_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = InvestmentService::new(state.db.clone());
    let investment = service.get_investment(investment_id).await?;
    Ok(Json(investment))
}

/// Register an investment
pub async fn create_investment(
    State(state): State<AppState>,
    Json(input): Json<CreateInvestmentInput>,
) -> AppResult<impl IntoResponse> {
    let service = InvestmentService::new(state.db.clone());
    let investment = service.create_investment(input).await?;
    Ok((StatusCode::CREATED, Json(investment)))
}

/// Cancel an investment with no payouts
pub async fn cancel_investment(
    State(state): State<AppState>,
    Path(investment_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = InvestmentService::new(state.db.clone());
    let investment = service.cancel_investment(investment_id).await?;
    Ok(Json(investment))
}

/// List all distributions
pub async fn list_distributions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = InvestmentService::new(state.db.clone());
    let distributions = service.get_distributions().await?;
    Ok(Json(serde_json::json!({ "distributions": distributions })))
}

/// List the distributions of one investment
pub async fn get_distributions_by_investment(
    State(state): State<AppState>,
    Path(investment_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = InvestmentService::new(state.db.clone());
    let distributions = service.get_distributions_by_investment(investment_id).await?;
    Ok(Json(serde_json::json!({ "distributions": distributions })))
}

/// Disburse a payout against an investment
pub async fn create_distribution(
    State(state): State<AppState>,
    Json(input): Json<CreateDistributionInput>,
) -> AppResult<impl IntoResponse> {
    let service = InvestmentService::new(state.db.clone());
    let distribution = service.create_distribution(input).await?;
    Ok((StatusCode::CREATED, Json(distribution)))
}

/// Mark a distribution as paid
pub async fn mark_distribution_paid(
    State(state): State<AppState>,
    Path(distribution_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = InvestmentService::new(state.db.clone());
    let distribution = service.mark_distribution_paid(distribution_id).await?;
    Ok(Json(distribution))
}
