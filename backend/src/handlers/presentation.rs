//! Presentation template HTTP handlers

use axum::{extract::State, response::IntoResponse, Json};

use crate::error::AppResult;
use crate::services::presentation::PresentationService;
use crate::AppState;
use shared::models::Presentation;

/// Load the saved presentation templates
pub async fn get_presentations(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = PresentationService::new(state.db.clone());
    let presentations = service.load().await?;
    Ok(Json(serde_json::json!({ "presentations": presentations })))
}

/// Save the presentation template configuration
pub async fn save_presentations(
    State(state): State<AppState>,
    Json(presentations): Json<Vec<Presentation>>,
) -> AppResult<impl IntoResponse> {
    let service = PresentationService::new(state.db.clone());
    let saved = service.save(presentations).await?;
    Ok(Json(serde_json::json!({ "presentations": saved })))
}
