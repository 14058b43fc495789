//! User HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::user::{CreateUserInput, UserService};
use crate::AppState;

/// List all users
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = UserService::new(state.db.clone());
    let users = service.get_users().await?;
    Ok(Json(serde_json::json!({ "users": users })))
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> AppResult<impl IntoResponse> {
    let service = UserService::new(state.db.clone());
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = UserService::new(state.db.clone());
    service.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
