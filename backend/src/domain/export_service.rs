//! Export service domain logic.
//!
//! Renders the currently searched and sorted payroll table as CSV for
//! download. The content starts with a UTF-8 byte-order mark so spreadsheet
//! tools pick the right encoding for accented teacher names.
//!
//! Columns: teacher, lessons, hours (one decimal), one amount column per
//! catalog class type in catalog order, total pay.

use anyhow::Result;
use csv::Writer;
use shared::{PayrollExportResponse, PayrollRecord, ReportWindow};
use tracing::info;

use crate::domain::models::ClassTypeCatalog;

pub const UTF8_BOM: &str = "\u{feff}";

/// Export service that handles all export-related business logic
#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Encode payroll records as CSV
    pub fn export_payroll_csv(
        &self,
        window: &ReportWindow,
        catalog: &ClassTypeCatalog,
        records: &[PayrollRecord],
    ) -> Result<PayrollExportResponse> {
        let mut writer = Writer::from_writer(Vec::new());

        let mut header = vec![
            "Teacher".to_string(),
            "Lessons".to_string(),
            "Hours".to_string(),
        ];
        header.extend(catalog.entries().iter().map(|class_type| class_type.name.clone()));
        header.push("Total Pay".to_string());
        writer.write_record(&header)?;

        for record in records {
            let mut row = vec![
                record.teacher_name.clone(),
                record.total_lessons.to_string(),
                format!("{:.1}", record.total_hours),
            ];
            row.extend(
                catalog
                    .entries()
                    .iter()
                    .map(|class_type| record.class_type_amount(&class_type.id).to_string()),
            );
            row.push(record.total_pay.to_string());
            writer.write_record(&row)?;
        }

        let body = String::from_utf8(writer.into_inner()?)?;
        let mut csv_content = String::with_capacity(UTF8_BOM.len() + body.len());
        csv_content.push_str(UTF8_BOM);
        csv_content.push_str(&body);

        let response = PayrollExportResponse {
            filename: Self::payroll_filename(window),
            csv_content,
            record_count: records.len(),
        };

        info!(
            "Exported {} payroll records ({} bytes) as {}",
            response.record_count,
            response.csv_content.len(),
            response.filename
        );

        Ok(response)
    }

    /// `payroll_<window>.csv`
    pub fn payroll_filename(window: &ReportWindow) -> String {
        format!("payroll_{}.csv", window.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ClassType;
    use chrono::NaiveDate;
    use shared::BreakdownEntry;
    use std::collections::BTreeMap;

    fn class_types() -> Vec<ClassType> {
        vec![
            ClassType { id: "PRIVATE".to_string(), name: "Private".to_string() },
            ClassType { id: "GROUP".to_string(), name: "Group".to_string() },
        ]
    }

    fn record(name: &str) -> PayrollRecord {
        let mut breakdown = BTreeMap::new();
        breakdown.insert("PRIVATE".to_string(), BreakdownEntry { count: 1, hours: 1.0, amount: 600 });
        breakdown.insert("GROUP".to_string(), BreakdownEntry { count: 1, hours: 0.5, amount: 900 });
        PayrollRecord {
            teacher_id: "a".to_string(),
            teacher_name: name.to_string(),
            total_hours: 1.5,
            total_lessons: 2,
            total_pay: 1500,
            breakdown,
        }
    }

    #[test]
    fn test_csv_layout() {
        let service = ExportService::new();
        let window = ReportWindow::Month { year: 2024, month: 3 };

        let export = service
            .export_payroll_csv(&window, &ClassTypeCatalog::new(class_types()), &[record("Ana Lima")])
            .unwrap();

        assert!(export.csv_content.starts_with(UTF8_BOM));
        let lines: Vec<&str> = export.csv_content[UTF8_BOM.len()..].lines().collect();
        assert_eq!(lines[0], "Teacher,Lessons,Hours,Private,Group,Total Pay");
        assert_eq!(lines[1], "Ana Lima,2,1.5,600,900,1500");
        assert_eq!(export.record_count, 1);
        assert_eq!(export.filename, "payroll_2024-03.csv");
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let service = ExportService::new();
        let window = ReportWindow::Month { year: 2024, month: 3 };

        let export = service
            .export_payroll_csv(&window, &ClassTypeCatalog::new(class_types()), &[record("Lima, Ana")])
            .unwrap();
        assert!(export.csv_content.contains("\"Lima, Ana\",2,"));
    }

    #[test]
    fn test_missing_class_type_columns_export_zero() {
        let service = ExportService::new();
        let window = ReportWindow::Month { year: 2024, month: 3 };
        let mut catalog = class_types();
        catalog.push(ClassType { id: "THEORY".to_string(), name: "Theory".to_string() });

        let export = service.export_payroll_csv(&window, &ClassTypeCatalog::new(catalog), &[record("Ana")]).unwrap();
        assert!(export.csv_content.contains("Ana,2,1.5,600,900,0,1500"));
    }

    #[test]
    fn test_range_filename() {
        let window = ReportWindow::Range {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        };
        assert_eq!(
            ExportService::payroll_filename(&window),
            "payroll_2024-03-01_2024-03-15.csv"
        );
    }
}
