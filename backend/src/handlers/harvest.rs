//! Harvest plan HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::harvest::{
    CompleteHarvestInput, CreatePlanInput, HarvestService, UpdatePlanInput,
};
use crate::AppState;

/// List all harvest plans
pub async fn list_harvest_plans(State(state): State<AppState>) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service.get_plans().await {
        Ok(plans) => {
            (StatusCode::OK, Json(serde_json::json!({ "harvest_plans": plans }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get harvest plans for a specific lot
pub async fn get_plans_by_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service.get_plans_by_lot(lot_id).await {
        Ok(plans) => {
            (StatusCode::OK, Json(serde_json::json!({ "harvest_plans": plans }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific harvest plan
pub async fn get_harvest_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service.get_plan(plan_id).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new harvest plan
pub async fn create_harvest_plan(
    State(state): State<AppState>,
    Json(input): Json<CreatePlanInput>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service.create_plan(input).await {
        Ok(plan) => (StatusCode::CREATED, Json(plan)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a planned harvest
pub async fn update_harvest_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    Json(input): Json<UpdatePlanInput>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service.update_plan(plan_id, input).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Start a harvest
pub async fn start_harvest_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service.start_plan(plan_id).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Complete a harvest with its actual figures
pub async fn complete_harvest_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    Json(input): Json<CompleteHarvestInput>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service.complete_plan(plan_id, input).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Cancel a harvest plan
pub async fn cancel_harvest_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.db.clone());

    match service.cancel_plan(plan_id).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => e.into_response(),
    }
}
