use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::despacho_dto::ApiResponse;
use crate::dto::viaje_dto::{
    NextStatesResponse, TransitionHistoryEntry, TransitionRequest, ViajeResponse,
};
use crate::middleware::identity::CallerIdentity;
use crate::services::viaje_state_service::TransitionOutcome;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_viaje_router() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_viaje))
        .route("/:id/transition", post(transition_viaje))
        .route("/:id/next-states", get(next_states))
        .route("/:id/history", get(history))
}

async fn get_viaje(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ViajeResponse>, AppError> {
    let controller = state.viaje_controller();
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn transition_viaje(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CallerIdentity(caller): CallerIdentity,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<ApiResponse<TransitionOutcome>>, AppError> {
    let controller = state.viaje_controller();
    let response = controller.transition(id, &caller, request).await?;
    Ok(Json(response))
}

async fn next_states(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    CallerIdentity(caller): CallerIdentity,
) -> Result<Json<NextStatesResponse>, AppError> {
    let controller = state.viaje_controller();
    let response = controller.next_states(id, &caller).await?;
    Ok(Json(response))
}

async fn history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TransitionHistoryEntry>>, AppError> {
    let controller = state.viaje_controller();
    let response = controller.history(id).await?;
    Ok(Json(response))
}
