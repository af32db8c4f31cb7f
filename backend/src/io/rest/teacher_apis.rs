//! # REST API for Teachers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use shared::{CreateTeacherRequest, UpdateTeacherRequest};
use tracing::info;

use crate::io::rest::error_response;
use crate::io::rest::mappers::TeacherMapper;
use crate::io::rest::viewer::AdminOnly;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teachers).post(create_teacher))
        .route("/:id", put(update_teacher).delete(delete_teacher))
}

pub async fn list_teachers(State(state): State<AppState>) -> Response {
    info!("GET /api/teachers");

    match state.teacher_service.list_teachers().await {
        Ok(teachers) => (StatusCode::OK, Json(TeacherMapper::to_list_dto(teachers))).into_response(),
        Err(e) => error_response(e, "list teachers"),
    }
}

pub async fn create_teacher(
    State(state): State<AppState>,
    _admin: AdminOnly,
    Json(request): Json<CreateTeacherRequest>,
) -> Response {
    info!("POST /api/teachers - request: {:?}", request);

    match state
        .teacher_service
        .create_teacher(TeacherMapper::to_create_command(request))
        .await
    {
        Ok(teacher) => (StatusCode::CREATED, Json(TeacherMapper::to_dto(teacher))).into_response(),
        Err(e) => error_response(e, "create teacher"),
    }
}

/// Rename or change the commission rate; existing lessons keep their cost
pub async fn update_teacher(
    State(state): State<AppState>,
    _admin: AdminOnly,
    Path(teacher_id): Path<String>,
    Json(request): Json<UpdateTeacherRequest>,
) -> Response {
    info!("PUT /api/teachers/{} - request: {:?}", teacher_id, request);

    match state
        .teacher_service
        .update_teacher(TeacherMapper::to_update_command(teacher_id, request))
        .await
    {
        Ok(teacher) => (StatusCode::OK, Json(TeacherMapper::to_dto(teacher))).into_response(),
        Err(e) => error_response(e, "update teacher"),
    }
}

pub async fn delete_teacher(
    State(state): State<AppState>,
    _admin: AdminOnly,
    Path(teacher_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/teachers/{}", teacher_id);

    match state.teacher_service.delete_teacher(&teacher_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, "delete teacher"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{decode, send, send_as, test_app};
    use serde_json::json;
    use shared::{Teacher, TeacherListResponse};

    #[tokio::test]
    async fn test_teacher_lifecycle() {
        let app = test_app();

        let (status, bytes) = send(&app, "POST", "/teachers", Some(json!({"name": "Zoe", "commission_rate": 55}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let zoe: Teacher = decode(&bytes);
        send(&app, "POST", "/teachers", Some(json!({"name": "Abe", "commission_rate": 40}))).await;

        let (_, bytes) = send(&app, "GET", "/teachers", None).await;
        let listed: TeacherListResponse = decode(&bytes);
        let names: Vec<&str> = listed.teachers.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Abe", "Zoe"]);

        let (status, bytes) = send(&app, "PUT", &format!("/teachers/{}", zoe.id), Some(json!({"commission_rate": 65}))).await;
        assert_eq!(status, StatusCode::OK);
        let updated: Teacher = decode(&bytes);
        assert_eq!(updated.commission_rate, 65);
        assert_eq!(updated.name, "Zoe");

        let (status, _) = send(&app, "DELETE", &format!("/teachers/{}", zoe.id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "PUT", &format!("/teachers/{}", zoe.id), Some(json!({"name": "Z"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rate_above_100_is_rejected() {
        let app = test_app();
        let (status, _) = send(&app, "POST", "/teachers", Some(json!({"name": "Max", "commission_rate": 120}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_roster_edits_need_admin() {
        let app = test_app();
        let (_, bytes) = send(&app, "POST", "/teachers", Some(json!({"name": "Ana", "commission_rate": 60}))).await;
        let ana: Teacher = decode(&bytes);
        let staff = [("x-staff-role", "staff"), ("x-teacher-id", ana.id.as_str())];

        let (status, _) = send_as(&app, "POST", "/teachers", Some(json!({"name": "Eve", "commission_rate": 90})), &staff).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let path = format!("/teachers/{}", ana.id);
        let (status, _) = send_as(&app, "PUT", &path, Some(json!({"commission_rate": 100})), &staff).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send_as(&app, "DELETE", &path, None, &[]).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, bytes) = send_as(&app, "GET", "/teachers", None, &staff).await;
        assert_eq!(status, StatusCode::OK);
        let listed: TeacherListResponse = decode(&bytes);
        assert_eq!(listed.teachers.len(), 1);
        assert_eq!(listed.teachers[0].commission_rate, 60);
    }
}
