//! # REST API Interface Layer
//!
//! HTTP endpoints for payroll reports and the records behind them.
//!
//! ## Error Translation
//!
//! Services return `anyhow::Error`. Handlers downcast it to pick a status:
//! - lookups of unknown teachers, lessons or class types: `404`
//! - other validation failures: `400`
//! - anything else (storage, I/O): `500`, with the detail only in the log

pub mod class_type_apis;
pub mod lesson_apis;
pub mod mappers;
pub mod mode_apis;
pub mod report_apis;
pub mod teacher_apis;
pub mod viewer;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use tracing::{error, warn};

use crate::domain::DomainError;
use crate::storage::StorageError;
use crate::AppState;

/// All `/api` routes
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/reports", report_apis::router())
        .nest("/lessons", lesson_apis::router())
        .nest("/teachers", teacher_apis::router())
        .nest("/class-types", class_type_apis::router())
        .nest("/mode", mode_apis::router())
}

/// HTTP status for a service error
pub fn status_for(error: &anyhow::Error) -> StatusCode {
    if let Some(domain_error) = error.downcast_ref::<DomainError>() {
        return if domain_error.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };
    }
    match error.downcast_ref::<StorageError>() {
        Some(StorageError::NotFound { .. }) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed operation and turn it into a response
pub fn error_response(error: anyhow::Error, action: &str) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        error!("Failed to {}: {:#}", action, error);
        (status, format!("Error trying to {}", action)).into_response()
    } else {
        warn!("Rejected request to {}: {}", action, error);
        (status, error.to_string()).into_response()
    }
}
