//! Sector management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::sector::{CreateSectorInput, SectorService, UpdateSectorInput};
use crate::AppState;

/// List all sectors
pub async fn list_sectors(State(state): State<AppState>) -> impl IntoResponse {
    let service = SectorService::new(state.db.clone());

    match service.get_sectors().await {
        Ok(sectors) => {
            (StatusCode::OK, Json(serde_json::json!({ "sectors": sectors }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a sector with its lots
pub async fn get_sector(
    State(state): State<AppState>,
    Path(sector_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SectorService::new(state.db.clone());

    match service.get_sector_with_lots(sector_id).await {
        Ok(sector) => (StatusCode::OK, Json(sector)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new sector
pub async fn create_sector(
    State(state): State<AppState>,
    Json(input): Json<CreateSectorInput>,
) -> impl IntoResponse {
    let service = SectorService::new(state.db.clone());

    match service.create_sector(input).await {
        Ok(sector) => (StatusCode::CREATED, Json(sector)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a sector
pub async fn update_sector(
    State(state): State<AppState>,
    Path(sector_id): Path<Uuid>,
    Json(input): Json<UpdateSectorInput>,
) -> impl IntoResponse {
    let service = SectorService::new(state.db.clone());

    match service.update_sector(sector_id, input).await {
        Ok(sector) => (StatusCode::OK, Json(sector)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a sector without lots
pub async fn delete_sector(
    State(state): State<AppState>,
    Path(sector_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SectorService::new(state.db.clone());

    match service.delete_sector(sector_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
