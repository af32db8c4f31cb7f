//! Caller identity from request headers.
//!
//! Authentication happens upstream; the proxy in front of this service sets
//! `X-Staff-Role` (`admin` or `staff`) and, for staff linked to a teacher,
//! `X-Teacher-Id`. A request without a role is treated as staff with no linked
//! teacher and therefore sees no payroll rows.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
};

use crate::domain::Viewer;

pub const STAFF_ROLE_HEADER: &str = "x-staff-role";
pub const TEACHER_ID_HEADER: &str = "x-teacher-id";

/// Extractor yielding the [`Viewer`] for the current request
#[derive(Debug, Clone)]
pub struct CallerViewer(pub Viewer);

#[async_trait]
impl<S> FromRequestParts<S> for CallerViewer
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        viewer_from_headers(&parts.headers)
            .map(CallerViewer)
            .map_err(|message| (StatusCode::BAD_REQUEST, message))
    }
}

/// Guard for admin-only routes: mode switches and roster/catalog edits
#[derive(Debug, Clone, Copy)]
pub struct AdminOnly;

#[async_trait]
impl<S> FromRequestParts<S> for AdminOnly
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CallerViewer(viewer) = CallerViewer::from_request_parts(parts, state).await?;
        match viewer {
            Viewer::Admin => Ok(AdminOnly),
            Viewer::Staff { .. } => Err((StatusCode::FORBIDDEN, "Admin role required".to_string())),
        }
    }
}

pub fn viewer_from_headers(headers: &HeaderMap) -> Result<Viewer, String> {
    let role = header_text(headers, STAFF_ROLE_HEADER)?;
    let teacher_id = header_text(headers, TEACHER_ID_HEADER)?;

    match role.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("admin") => Ok(Viewer::Admin),
        Some("staff") | None => Ok(Viewer::Staff { teacher_id }),
        Some(other) => Err(format!("Unknown staff role: {}", other)),
    }
}

/// Trimmed header value; blank counts as absent
fn header_text(headers: &HeaderMap, name: &str) -> Result<Option<String>, String> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };
    let text = value
        .to_str()
        .map_err(|_| format!("Header {} is not valid text", name))?
        .trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}
