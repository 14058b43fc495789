//! Price list HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::pricing::{CreatePriceInput, PricingService};
use crate::AppState;

/// List the full price list
pub async fn list_pricing(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = PricingService::new(state.db.clone());
    let pricing = service.get_pricing().await?;
    Ok(Json(serde_json::json!({ "pricing": pricing })))
}

/// List only the active price entries
pub async fn list_active_pricing(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = PricingService::new(state.db.clone());
    let pricing = service.get_active_pricing().await?;
    Ok(Json(serde_json::json!({ "pricing": pricing })))
}

/// Create a price entry
pub async fn create_price(
    State(state): State<AppState>,
    Json(input): Json<CreatePriceInput>,
) -> AppResult<impl IntoResponse> {
    let service = PricingService::new(state.db.clone());
    let price = service.create_price(input).await?;
    Ok((StatusCode::CREATED, Json(price)))
}

/// Activate a price entry for its category
pub async fn activate_price(
    State(state): State<AppState>,
    Path(price_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = PricingService::new(state.db.clone());
    let price = service.activate_price(price_id).await?;
    Ok(Json(price))
}

/// Delete a price entry
pub async fn delete_price(
    State(state): State<AppState>,
    Path(price_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = PricingService::new(state.db.clone());
    service.delete_price(price_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
