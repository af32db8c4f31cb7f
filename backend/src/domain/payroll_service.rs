//! Payroll reporting.
//!
//! Every report is derived from a fresh snapshot of lessons, teachers and the
//! class type catalog: scope to the viewer, aggregate, then search and sort
//! for the table, chart and export. Nothing is persisted.
//!
//! The scoped aggregate may be memoized in a single slot keyed by window,
//! viewer and store version. Any write to the store bumps the version, so a
//! stale entry is never served.

use anyhow::Result;
use shared::{PayrollChartResponse, PayrollExportResponse, PayrollRecord, ReportSummary, ReportWindow, SortState};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::domain::class_type_service::ClassTypeService;
use crate::domain::commands::reports::PayrollReportQuery;
use crate::domain::error::DomainError;
use crate::domain::export_service::ExportService;
use crate::domain::models::ClassTypeCatalog;
use crate::domain::payroll_chart::PayrollChartService;
use crate::domain::payroll_engine::aggregate_payroll;
use crate::domain::payroll_table::PayrollTableService;
use crate::domain::visibility::Viewer;
use crate::storage::{LessonRepository, RecordStore, TeacherRepository};

/// A payroll table ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollReport {
    pub window: ReportWindow,
    pub catalog: ClassTypeCatalog,
    pub records: Vec<PayrollRecord>,
    pub summary: ReportSummary,
    pub sort: SortState,
}

/// Aggregate for one (window, viewer) before search and sort
#[derive(Debug)]
struct ScopedPayroll {
    catalog: ClassTypeCatalog,
    records: Vec<PayrollRecord>,
    summary: ReportSummary,
}

#[derive(Debug, Clone, PartialEq)]
struct CacheKey {
    window: ReportWindow,
    viewer: Viewer,
    version: u64,
}

#[derive(Clone)]
pub struct PayrollService {
    store: Arc<dyn RecordStore>,
    lesson_repository: LessonRepository,
    teacher_repository: TeacherRepository,
    class_type_service: ClassTypeService,
    table_service: PayrollTableService,
    chart_service: PayrollChartService,
    export_service: ExportService,
    cache: Option<Arc<Mutex<Option<(CacheKey, Arc<ScopedPayroll>)>>>>,
}

impl PayrollService {
    pub fn new(store: Arc<dyn RecordStore>, class_type_service: ClassTypeService, use_cache: bool) -> Self {
        Self {
            lesson_repository: LessonRepository::new(store.clone()),
            teacher_repository: TeacherRepository::new(store.clone()),
            store,
            class_type_service,
            table_service: PayrollTableService::new(),
            chart_service: PayrollChartService::new(),
            export_service: ExportService::new(),
            cache: use_cache.then(|| Arc::new(Mutex::new(None))),
        }
    }

    /// Scoped, aggregated, searched and sorted payroll for the viewer
    pub async fn payroll_report(&self, viewer: &Viewer, query: PayrollReportQuery) -> Result<PayrollReport> {
        let scoped = self.scoped_payroll(viewer, &query.window).await?;
        let records = self
            .table_service
            .apply(scoped.records.clone(), query.search.as_deref(), &query.sort);

        info!(
            "Payroll report {}: {} of {} records shown",
            query.window.label(),
            records.len(),
            scoped.records.len()
        );

        Ok(PayrollReport {
            window: query.window,
            catalog: scoped.catalog.clone(),
            records,
            summary: scoped.summary.clone(),
            sort: query.sort,
        })
    }

    /// Per class type totals of the records the table would show
    pub async fn payroll_chart(&self, viewer: &Viewer, query: PayrollReportQuery) -> Result<PayrollChartResponse> {
        let report = self.payroll_report(viewer, query).await?;
        let slices = self.chart_service.class_type_totals(&report.records, &report.catalog);
        debug!("Chart for {} has {} slices", report.window.label(), slices.len());
        Ok(PayrollChartResponse {
            window: report.window,
            slices,
        })
    }

    /// CSV of the table in its current search and sort
    pub async fn payroll_export(&self, viewer: &Viewer, query: PayrollReportQuery) -> Result<PayrollExportResponse> {
        let report = self.payroll_report(viewer, query).await?;
        self.export_service
            .export_payroll_csv(&report.window, &report.catalog, &report.records)
    }

    async fn scoped_payroll(&self, viewer: &Viewer, window: &ReportWindow) -> Result<Arc<ScopedPayroll>> {
        if !window.is_valid() {
            return Err(DomainError::InvalidWindow(window.label()).into());
        }

        // Read the version before the data: a write that lands mid-load leaves
        // the entry keyed to a version that is already stale.
        let key = CacheKey {
            window: window.clone(),
            viewer: viewer.clone(),
            version: self.store.version(),
        };

        if let Some(cache) = &self.cache {
            let slot = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some((cached_key, scoped)) = slot.as_ref() {
                if *cached_key == key {
                    debug!("Payroll cache hit for {} (version {})", window.label(), key.version);
                    return Ok(scoped.clone());
                }
            }
        }

        let scoped = Arc::new(self.compute_scoped(viewer, window).await?);

        if let Some(cache) = &self.cache {
            let mut slot = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            *slot = Some((key, scoped.clone()));
        }
        Ok(scoped)
    }

    async fn compute_scoped(&self, viewer: &Viewer, window: &ReportWindow) -> Result<ScopedPayroll> {
        let lessons = self.lesson_repository.list().await?;
        let mut teachers = self.teacher_repository.list().await?;
        teachers.sort_by(|a, b| a.name.cmp(&b.name));
        let catalog = self.class_type_service.catalog().await?;

        let visible = viewer.visible_teachers(&teachers);
        let aggregate = aggregate_payroll(&lessons, &visible, window, &catalog);

        let summary = ReportSummary {
            total_pay: aggregate
                .records
                .iter()
                .fold(0i64, |total, record| total.saturating_add(record.total_pay)),
            total_lessons: aggregate.records.iter().map(|record| record.total_lessons).sum(),
            total_hours: aggregate.records.iter().map(|record| record.total_hours).sum(),
            revenue: viewer.can_see_revenue().then_some(aggregate.revenue),
        };

        debug!(
            "Aggregated {} lessons into {} payroll records for {}",
            lessons.len(),
            aggregate.records.len(),
            window.label()
        );

        Ok(ScopedPayroll {
            catalog,
            records: aggregate.records,
            summary,
        })
    }
}
