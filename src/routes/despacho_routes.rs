use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::despacho_dto::{ApiResponse, CreateDespachoRequest, DespachoResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_despacho_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_despacho))
        .route("/:id", get(get_despacho))
}

async fn create_despacho(
    State(state): State<AppState>,
    Json(request): Json<CreateDespachoRequest>,
) -> Result<Json<ApiResponse<DespachoResponse>>, AppError> {
    let controller = state.despacho_controller();
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_despacho(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DespachoResponse>, AppError> {
    let controller = state.despacho_controller();
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}
