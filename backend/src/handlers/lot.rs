//! Seeding lot HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::lot::{CreateLotInput, LotService, UpdateLotInput};
use crate::AppState;

/// List all lots
pub async fn list_lots(State(state): State<AppState>) -> impl IntoResponse {
    let service = LotService::new(state.db.clone());

    match service.get_lots().await {
        Ok(lots) => (StatusCode::OK, Json(serde_json::json!({ "lots": lots }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific lot
pub async fn get_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = LotService::new(state.db.clone());

    match service.get_lot(lot_id).await {
        Ok(lot) => (StatusCode::OK, Json(lot)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new seeding lot
pub async fn create_lot(
    State(state): State<AppState>,
    Json(input): Json<CreateLotInput>,
) -> impl IntoResponse {
    let service = LotService::new(state.db.clone());

    match service.create_lot(input).await {
        Ok(lot) => (StatusCode::CREATED, Json(lot)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a lot
pub async fn update_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    Json(input): Json<UpdateLotInput>,
) -> impl IntoResponse {
    let service = LotService::new(state.db.clone());

    match service.update_lot(lot_id, input).await {
        Ok(lot) => (StatusCode::OK, Json(lot)).into_response(),
        Err(e) => e.into_response(),
    }
}
