//! # REST API for the Class Type Catalog

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use shared::{CreateClassTypeRequest, RenameClassTypeRequest};
use tracing::info;

use crate::io::rest::error_response;
use crate::io::rest::mappers::ClassTypeMapper;
use crate::io::rest::viewer::AdminOnly;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_class_types).post(create_class_type))
        .route("/:id", put(rename_class_type).delete(delete_class_type))
}

/// Catalog in display order
pub async fn list_class_types(State(state): State<AppState>) -> Response {
    info!("GET /api/class-types");

    match state.class_type_service.catalog().await {
        Ok(catalog) => (StatusCode::OK, Json(ClassTypeMapper::to_list_dto(&catalog))).into_response(),
        Err(e) => error_response(e, "list class types"),
    }
}

pub async fn create_class_type(
    State(state): State<AppState>,
    _admin: AdminOnly,
    Json(request): Json<CreateClassTypeRequest>,
) -> Response {
    info!("POST /api/class-types - request: {:?}", request);

    match state
        .class_type_service
        .add_class_type(ClassTypeMapper::to_create_command(request))
        .await
    {
        Ok(class_type) => (StatusCode::CREATED, Json(ClassTypeMapper::to_dto(&class_type))).into_response(),
        Err(e) => error_response(e, "add class type"),
    }
}

pub async fn rename_class_type(
    State(state): State<AppState>,
    _admin: AdminOnly,
    Path(id): Path<String>,
    Json(request): Json<RenameClassTypeRequest>,
) -> Response {
    info!("PUT /api/class-types/{} - request: {:?}", id, request);

    match state
        .class_type_service
        .rename_class_type(ClassTypeMapper::to_rename_command(id, request))
        .await
    {
        Ok(class_type) => (StatusCode::OK, Json(ClassTypeMapper::to_dto(&class_type))).into_response(),
        Err(e) => error_response(e, "rename class type"),
    }
}

pub async fn delete_class_type(
    State(state): State<AppState>,
    _admin: AdminOnly,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/class-types/{}", id);

    match state.class_type_service.remove_class_type(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, "remove class type"),
    }
}
