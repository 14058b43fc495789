//! Growth monitoring HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::monitoring::{CreateMonitoringInput, MonitoringService};
use crate::AppState;

/// Get the monitoring history of a lot
pub async fn get_monitorings_by_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = MonitoringService::new(state.db.clone());
    let monitorings = service.get_monitorings_by_lot(lot_id).await?;
    Ok(Json(serde_json::json!({ "monitorings": monitorings })))
}

/// Record a monitoring sample
pub async fn create_monitoring(
    State(state): State<AppState>,
    Json(input): Json<CreateMonitoringInput>,
) -> AppResult<impl IntoResponse> {
    let service = MonitoringService::new(state.db.clone());
    let monitoring = service.create_monitoring(input).await?;
    Ok((StatusCode::CREATED, Json(monitoring)))
}
