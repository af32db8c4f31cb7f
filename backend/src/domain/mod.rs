//! # Domain Module
//!
//! Business logic for music school payroll: lessons, teachers, the class type
//! catalog and the payroll reports built from them.
//!
//! ## Module Organization
//!
//! - **payroll_engine**: Pure aggregation of completed lessons into per-teacher records
//! - **visibility**: Role-based scoping of which teachers a viewer may see
//! - **payroll_table**: Search and sort over aggregated records
//! - **payroll_chart**: Per class type totals for charting
//! - **export_service**: CSV rendering of the payroll table
//! - **payroll_service**: Orchestrates a report from a fresh store snapshot
//! - **lesson_service**, **teacher_service**, **class_type_service**: Record management
//! - **store_mode_service**: Production/test namespace switch
//!
//! ## Business Rules
//!
//! - Only completed lessons dated inside the report window count
//! - A lesson's cost is snapshotted when it is priced; commission rate changes
//!   are never retroactive
//! - Staff see only the teacher their account is linked to and never revenue
//! - Class types missing from the catalog still aggregate under their raw id

pub mod class_type_service;
pub mod commands;
pub mod error;
pub mod export_service;
pub mod lesson_service;
pub mod models;
pub mod payroll_chart;
pub mod payroll_engine;
pub mod payroll_service;
pub mod payroll_table;
pub mod store_mode_service;
pub mod teacher_service;
pub mod visibility;

pub use class_type_service::ClassTypeService;
pub use error::DomainError;
pub use export_service::ExportService;
pub use lesson_service::LessonService;
pub use payroll_chart::PayrollChartService;
pub use payroll_service::{PayrollReport, PayrollService};
pub use payroll_table::PayrollTableService;
pub use store_mode_service::StoreModeService;
pub use teacher_service::TeacherService;
pub use visibility::Viewer;
