//! # Music School Backend
//!
//! Payroll reporting and lesson record keeping for a music school.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (payroll engine, services)
//!     ↓
//! Storage Layer (record store façade)
//! ```
//!
//! Reports are never stored. Each request re-reads lessons, teachers and the
//! class type catalog and aggregates them for the caller's window and role.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::{
    ClassTypeService, LessonService, PayrollService, StoreModeService, TeacherService,
};
use crate::io::rest::viewer::{STAFF_ROLE_HEADER, TEACHER_ID_HEADER};
use crate::storage::{file_store::verify_readable, FileRecordStore, RecordStore};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub lesson_service: LessonService,
    pub teacher_service: TeacherService,
    pub class_type_service: ClassTypeService,
    pub payroll_service: PayrollService,
    pub store_mode_service: StoreModeService,
}

impl AppState {
    /// Wire every service onto one shared store
    pub fn with_store(store: Arc<dyn RecordStore>, report_cache: bool) -> Self {
        let teacher_service = TeacherService::new(store.clone());
        let class_type_service = ClassTypeService::new(store.clone());
        let lesson_service = LessonService::new(
            store.clone(),
            teacher_service.clone(),
            class_type_service.clone(),
        );
        let payroll_service = PayrollService::new(store.clone(), class_type_service.clone(), report_cache);
        let store_mode_service = StoreModeService::new(store);

        Self {
            lesson_service,
            teacher_service,
            class_type_service,
            payroll_service,
            store_mode_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Opening record store at {}", config.data_directory.display());
    let store = FileRecordStore::new(&config.data_directory)?;
    store.set_mode(config.mode);
    verify_readable(&store).await?;

    info!("Setting up application state (mode: {}, report cache: {})", config.mode, config.report_cache);
    Ok(AppState::with_store(Arc::new(store), config.report_cache))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(STAFF_ROLE_HEADER),
            HeaderName::from_static(TEACHER_ID_HEADER),
        ]);

    Ok(Router::new()
        .nest("/api", io::rest::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
