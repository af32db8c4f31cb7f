//! # REST API for Payroll Reports
//!
//! Window selection is either `month=YYYY-MM` or an inclusive
//! `start=YYYY-MM-DD&end=YYYY-MM-DD` range. `search`, `sort` and `direction`
//! are optional; a sort key without a direction sorts descending.
//! `select=<key>` is a column click applied to that sort: the active key
//! flips direction, another key starts descending. The response echoes the
//! resulting sort.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{ReportWindow, SortDirection, SortKey, SortState};
use tracing::info;

use crate::domain::commands::reports::PayrollReportQuery;
use crate::io::rest::mappers::ReportMapper;
use crate::io::rest::viewer::CallerViewer;
use crate::io::rest::error_response;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PayrollReportParams {
    pub month: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub direction: Option<SortDirection>,
    pub select: Option<SortKey>,
}

impl PayrollReportParams {
    pub fn into_query(self) -> Result<PayrollReportQuery, String> {
        let window = match (self.month, self.start, self.end) {
            (Some(month), None, None) => ReportWindow::parse_month(&month)
                .ok_or_else(|| format!("Invalid month '{}', expected YYYY-MM", month))?,
            (None, Some(start), Some(end)) => ReportWindow::Range { start, end },
            _ => return Err("Provide either month or both start and end".to_string()),
        };

        let mut sort = match (self.sort, self.direction) {
            (None, None) => SortState::default(),
            (Some(key), direction) => SortState {
                key,
                direction: direction.unwrap_or(SortDirection::Descending),
            },
            (None, Some(direction)) => SortState {
                direction,
                ..SortState::default()
            },
        };
        if let Some(key) = self.select {
            sort.select(key);
        }

        Ok(PayrollReportQuery {
            window,
            search: self.search,
            sort,
        })
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payroll", get(get_payroll_report))
        .route("/payroll/chart", get(get_payroll_chart))
        .route("/payroll/export", get(export_payroll_csv))
}

/// Payroll table for the caller's visible teachers
pub async fn get_payroll_report(
    State(state): State<AppState>,
    CallerViewer(viewer): CallerViewer,
    Query(params): Query<PayrollReportParams>,
) -> Response {
    info!("GET /api/reports/payroll - viewer: {:?}, params: {:?}", viewer, params);

    let query = match params.into_query() {
        Ok(query) => query,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    match state.payroll_service.payroll_report(&viewer, query).await {
        Ok(report) => (StatusCode::OK, Json(ReportMapper::to_report_dto(report))).into_response(),
        Err(e) => error_response(e, "build payroll report"),
    }
}

pub async fn get_payroll_chart(
    State(state): State<AppState>,
    CallerViewer(viewer): CallerViewer,
    Query(params): Query<PayrollReportParams>,
) -> Response {
    info!("GET /api/reports/payroll/chart - viewer: {:?}, params: {:?}", viewer, params);

    let query = match params.into_query() {
        Ok(query) => query,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    match state.payroll_service.payroll_chart(&viewer, query).await {
        Ok(chart) => (StatusCode::OK, Json(chart)).into_response(),
        Err(e) => error_response(e, "build payroll chart"),
    }
}

/// CSV download of the payroll table
pub async fn export_payroll_csv(
    State(state): State<AppState>,
    CallerViewer(viewer): CallerViewer,
    Query(params): Query<PayrollReportParams>,
) -> Response {
    info!("GET /api/reports/payroll/export - viewer: {:?}, params: {:?}", viewer, params);

    let query = match params.into_query() {
        Ok(query) => query,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    match state.payroll_service.payroll_export(&viewer, query).await {
        Ok(export) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export.filename),
                ),
            ],
            export.csv_content,
        )
            .into_response(),
        Err(e) => error_response(e, "export payroll"),
    }
}
