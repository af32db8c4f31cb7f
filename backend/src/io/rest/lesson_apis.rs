//! # REST API for Lessons
//!
//! Listing, scheduling, editing and completion of lessons.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{CreateLessonRequest, ReportWindow, SetLessonCompletionRequest, UpdateLessonRequest};
use tracing::info;

use crate::domain::commands::lessons::LessonListQuery;
use crate::domain::models::Lesson;
use crate::io::rest::error_response;
use crate::io::rest::mappers::LessonMapper;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LessonListParams {
    pub month: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl LessonListParams {
    fn into_query(self) -> Result<LessonListQuery, String> {
        let window = match (self.month, self.start, self.end) {
            (None, None, None) => None,
            (Some(month), None, None) => Some(
                ReportWindow::parse_month(&month)
                    .ok_or_else(|| format!("Invalid month '{}', expected YYYY-MM", month))?,
            ),
            (None, Some(start), Some(end)) => Some(ReportWindow::Range { start, end }),
            _ => return Err("Provide either month or both start and end".to_string()),
        };
        Ok(LessonListQuery { window })
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lessons).post(create_lesson))
        .route("/:id", get(get_lesson).put(update_lesson).delete(delete_lesson))
        .route("/:id/completion", put(set_lesson_completion))
}

/// Attach class type labels from the current catalog
async fn lesson_response(state: &AppState, status: StatusCode, lesson: Lesson) -> Response {
    match state.class_type_service.catalog().await {
        Ok(catalog) => (status, Json(LessonMapper::to_dto(lesson, &catalog))).into_response(),
        Err(e) => error_response(e, "load class types"),
    }
}

pub async fn list_lessons(
    State(state): State<AppState>,
    Query(params): Query<LessonListParams>,
) -> Response {
    info!("GET /api/lessons - params: {:?}", params);

    let query = match params.into_query() {
        Ok(query) => query,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    let lessons = match state.lesson_service.list_lessons(query).await {
        Ok(lessons) => lessons,
        Err(e) => return error_response(e, "list lessons"),
    };
    match state.class_type_service.catalog().await {
        Ok(catalog) => (StatusCode::OK, Json(LessonMapper::to_list_dto(lessons, &catalog))).into_response(),
        Err(e) => error_response(e, "load class types"),
    }
}

pub async fn get_lesson(State(state): State<AppState>, Path(lesson_id): Path<String>) -> Response {
    info!("GET /api/lessons/{}", lesson_id);

    match state.lesson_service.get_lesson(&lesson_id).await {
        Ok(lesson) => lesson_response(&state, StatusCode::OK, lesson).await,
        Err(e) => error_response(e, "get lesson"),
    }
}

pub async fn create_lesson(
    State(state): State<AppState>,
    Json(request): Json<CreateLessonRequest>,
) -> Response {
    info!("POST /api/lessons - request: {:?}", request);

    let command = LessonMapper::to_create_command(request);
    match state.lesson_service.create_lesson(command).await {
        Ok(lesson) => lesson_response(&state, StatusCode::CREATED, lesson).await,
        Err(e) => error_response(e, "create lesson"),
    }
}

pub async fn update_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    Json(request): Json<UpdateLessonRequest>,
) -> Response {
    info!("PUT /api/lessons/{} - request: {:?}", lesson_id, request);

    let command = LessonMapper::to_update_command(lesson_id, request);
    match state.lesson_service.update_lesson(command).await {
        Ok(lesson) => lesson_response(&state, StatusCode::OK, lesson).await,
        Err(e) => error_response(e, "update lesson"),
    }
}

pub async fn set_lesson_completion(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    Json(request): Json<SetLessonCompletionRequest>,
) -> Response {
    info!("PUT /api/lessons/{}/completion - request: {:?}", lesson_id, request);

    match state.lesson_service.set_completion(&lesson_id, request.is_completed).await {
        Ok(lesson) => lesson_response(&state, StatusCode::OK, lesson).await,
        Err(e) => error_response(e, "set lesson completion"),
    }
}

pub async fn delete_lesson(State(state): State<AppState>, Path(lesson_id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/lessons/{}", lesson_id);

    match state.lesson_service.delete_lesson(&lesson_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, "delete lesson"),
    }
}
