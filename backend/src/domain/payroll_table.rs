//! Payroll table domain logic.
//!
//! Search and ordering over aggregated payroll records, as shown in the
//! payroll table.
//!
//! ## Rules
//!
//! - Search is a case-insensitive substring match on the teacher name;
//!   records that don't match are dropped from the result
//! - Exactly one sort key is active at a time
//! - Teacher names compare ignoring case, like search does
//! - Sorting is stable, so records with equal keys keep their prior order in
//!   both directions
//! - Average pay is `total_pay / total_lessons`, zero for teachers with no lessons
//! - Sorting by a class type uses that type's breakdown amount, zero when absent

use shared::{PayrollRecord, SortDirection, SortKey, SortState};
use std::cmp::Ordering;

#[derive(Clone, Default)]
pub struct PayrollTableService;

impl PayrollTableService {
    pub fn new() -> Self {
        Self
    }

    /// Keep only records whose teacher name contains `term`, ignoring case.
    /// A blank term keeps everything.
    pub fn search(&self, records: Vec<PayrollRecord>, term: &str) -> Vec<PayrollRecord> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|record| record.teacher_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Stable in-place sort by the active key
    pub fn sort(&self, records: &mut [PayrollRecord], sort: &SortState) {
        records.sort_by(|a, b| {
            let ordering = Self::compare(a, b, &sort.key);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    /// Search then sort
    pub fn apply(
        &self,
        records: Vec<PayrollRecord>,
        search: Option<&str>,
        sort: &SortState,
    ) -> Vec<PayrollRecord> {
        let mut records = match search {
            Some(term) => self.search(records, term),
            None => records,
        };
        self.sort(&mut records, sort);
        records
    }

    fn compare(a: &PayrollRecord, b: &PayrollRecord, key: &SortKey) -> Ordering {
        match key {
            SortKey::TeacherName => a
                .teacher_name
                .to_lowercase()
                .cmp(&b.teacher_name.to_lowercase())
                .then_with(|| a.teacher_name.cmp(&b.teacher_name)),
            SortKey::TotalPay => a.total_pay.cmp(&b.total_pay),
            SortKey::TotalLessons => a.total_lessons.cmp(&b.total_lessons),
            SortKey::TotalHours => a.total_hours.total_cmp(&b.total_hours),
            SortKey::AveragePay => a.average_pay().total_cmp(&b.average_pay()),
            SortKey::ClassType(id) => a.class_type_amount(id).cmp(&b.class_type_amount(id)),
        }
    }
}
