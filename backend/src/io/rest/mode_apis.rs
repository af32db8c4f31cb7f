//! # REST API for the Store Mode
//!
//! `test` mode points every collection at its `test_` namespace so staff can
//! rehearse without touching production records.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{StoreModeRequest, StoreModeResponse};
use tracing::info;

use crate::io::rest::viewer::AdminOnly;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_mode).put(set_mode))
}

pub async fn get_mode(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/mode");
    Json(StoreModeResponse {
        mode: state.store_mode_service.current_mode(),
    })
}

pub async fn set_mode(
    State(state): State<AppState>,
    _admin: AdminOnly,
    Json(request): Json<StoreModeRequest>,
) -> impl IntoResponse {
    info!("PUT /api/mode - request: {:?}", request);
    let mode = state.store_mode_service.set_mode(request.mode);
    (StatusCode::OK, Json(StoreModeResponse { mode }))
}
