use crate::domain::PayrollReport;
use crate::io::rest::mappers::ClassTypeMapper;
use shared::PayrollReportResponse;

pub struct ReportMapper;

impl ReportMapper {
    pub fn to_report_dto(report: PayrollReport) -> PayrollReportResponse {
        PayrollReportResponse {
            class_types: ClassTypeMapper::to_catalog_dto(&report.catalog),
            window: report.window,
            records: report.records,
            summary: report.summary,
            sort: report.sort,
        }
    }
}
