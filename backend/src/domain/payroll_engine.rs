//! # Payroll Aggregation Engine
//!
//! Turns a flat list of lessons into one [`PayrollRecord`] per teacher for a
//! date window, plus the tuition revenue of the same lessons.
//!
//! ## Algorithm
//!
//! 1. Keep lessons that are completed and dated inside the window.
//! 2. Seed a record for every in-scope teacher with a zero breakdown slot for
//!    each catalog class type, so empty columns still report zero.
//! 3. Fold each kept lesson into its teacher's record: minutes, lesson count,
//!    cost, and the breakdown slot of its class type (created on demand for
//!    types no longer in the catalog).
//! 4. Sum `price` over every completed in-window lesson for revenue. Revenue
//!    is a school-wide figure, so it ignores the teacher scope and includes
//!    lessons of teachers no longer on the roster.
//!
//! Durations are accumulated as whole minutes and converted to hours once at
//! the end, which keeps the output identical across repeated runs.
//!
//! The engine is a pure function: no I/O, no shared state, no errors. Missing
//! prices and costs count as zero, and money sums saturate instead of
//! overflowing.

use shared::{BreakdownEntry, PayrollRecord, ReportWindow};
use std::collections::{BTreeMap, HashMap};

use crate::domain::models::{ClassTypeCatalog, Lesson, Teacher};

/// Output of one aggregation run
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollAggregate {
    /// One record per in-scope teacher, in the order the teachers were given
    pub records: Vec<PayrollRecord>,
    /// Sum of `price` over all completed in-window lessons, regardless of scope
    pub revenue: i64,
}

#[derive(Default)]
struct SlotTotals {
    count: u32,
    minutes: u64,
    amount: i64,
}

struct TeacherTotals {
    minutes: u64,
    lessons: u32,
    pay: i64,
    slots: BTreeMap<String, SlotTotals>,
}

impl TeacherTotals {
    fn seeded(catalog: &ClassTypeCatalog) -> Self {
        Self {
            minutes: 0,
            lessons: 0,
            pay: 0,
            slots: catalog
                .ids()
                .map(|id| (id.to_string(), SlotTotals::default()))
                .collect(),
        }
    }

    fn add(&mut self, lesson: &Lesson) {
        let minutes = u64::from(lesson.duration_minutes);
        let cost = lesson.cost_or_zero();

        self.minutes += minutes;
        self.lessons += 1;
        self.pay = self.pay.saturating_add(cost);

        let slot = self.slots.entry(lesson.class_type.clone()).or_default();
        slot.count += 1;
        slot.minutes += minutes;
        slot.amount = slot.amount.saturating_add(cost);
    }

    fn into_record(self, teacher: &Teacher) -> PayrollRecord {
        PayrollRecord {
            teacher_id: teacher.id.clone(),
            teacher_name: teacher.name.clone(),
            total_hours: minutes_to_hours(self.minutes),
            total_lessons: self.lessons,
            total_pay: self.pay,
            breakdown: self
                .slots
                .into_iter()
                .map(|(id, slot)| {
                    (
                        id,
                        BreakdownEntry {
                            count: slot.count,
                            hours: minutes_to_hours(slot.minutes),
                            amount: slot.amount,
                        },
                    )
                })
                .collect(),
        }
    }
}

fn minutes_to_hours(minutes: u64) -> f64 {
    minutes as f64 / 60.0
}

/// Whether a lesson counts toward payroll and revenue for `window`
pub fn counts_toward(lesson: &Lesson, window: &ReportWindow) -> bool {
    lesson.is_completed && window.contains(lesson.date)
}

/// Aggregate payroll for the given teachers.
///
/// `teachers` must already be narrowed to what the caller may see; lessons of
/// any other teacher get no record. Only revenue looks past the scope, and
/// callers that may not see it discard it.
pub fn aggregate_payroll(
    lessons: &[Lesson],
    teachers: &[&Teacher],
    window: &ReportWindow,
    catalog: &ClassTypeCatalog,
) -> PayrollAggregate {
    let positions: HashMap<&str, usize> = teachers
        .iter()
        .enumerate()
        .map(|(index, teacher)| (teacher.id.as_str(), index))
        .collect();

    let mut totals: Vec<TeacherTotals> = teachers
        .iter()
        .map(|_| TeacherTotals::seeded(catalog))
        .collect();
    let mut revenue: i64 = 0;

    for lesson in lessons.iter().filter(|lesson| counts_toward(lesson, window)) {
        revenue = revenue.saturating_add(lesson.price_or_zero());
        if let Some(&index) = positions.get(lesson.teacher_id.as_str()) {
            totals[index].add(lesson);
        }
    }

    let records = totals
        .into_iter()
        .zip(teachers.iter())
        .map(|(teacher_totals, teacher)| teacher_totals.into_record(teacher))
        .collect();

    PayrollAggregate { records, revenue }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{commission_cost, ClassType};
    use chrono::NaiveDate;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn march() -> ReportWindow {
        ReportWindow::Month { year: 2024, month: 3 }
    }

    fn catalog() -> ClassTypeCatalog {
        ClassTypeCatalog::new(vec![
            ClassType { id: "PRIVATE".to_string(), name: "Private".to_string() },
            ClassType { id: "GROUP".to_string(), name: "Group".to_string() },
        ])
    }

    fn teacher(id: &str, name: &str, rate: u8) -> Teacher {
        Teacher { id: id.to_string(), name: name.to_string(), commission_rate: rate }
    }

    fn lesson(id: &str, teacher: &Teacher, day: &str, minutes: u32, class_type: &str, price: i64, done: bool) -> Lesson {
        Lesson {
            id: id.to_string(),
            teacher_id: teacher.id.clone(),
            student_ids: vec!["s1".to_string()],
            date: date(day),
            start_time: "15:00".to_string(),
            duration_minutes: minutes,
            class_type: class_type.to_string(),
            price: Some(price),
            cost: commission_cost(price, teacher.commission_rate),
            is_completed: done,
        }
    }

    fn assert_reconciles(record: &PayrollRecord) {
        let amount: i64 = record.breakdown.values().map(|entry| entry.amount).sum();
        let count: u32 = record.breakdown.values().map(|entry| entry.count).sum();
        assert_eq!(amount, record.total_pay, "breakdown amount for {}", record.teacher_name);
        assert_eq!(count, record.total_lessons, "breakdown count for {}", record.teacher_name);
    }

    #[test]
    fn test_mixed_completion_scenario() {
        let a = teacher("a", "Teacher A", 60);
        let lessons = vec![
            lesson("l1", &a, "2024-03-04", 60, "PRIVATE", 1000, true),
            lesson("l2", &a, "2024-03-05", 60, "PRIVATE", 2000, false),
            lesson("l3", &a, "2024-03-06", 60, "GROUP", 1500, true),
        ];

        let result = aggregate_payroll(&lessons, &[&a], &march(), &catalog());
        let record = &result.records[0];

        assert_eq!(record.total_lessons, 2);
        assert_eq!(record.total_pay, 1500);
        assert_eq!(record.breakdown["PRIVATE"].count, 1);
        assert_eq!(record.breakdown["PRIVATE"].amount, 600);
        assert_eq!(record.breakdown["GROUP"].count, 1);
        assert_eq!(record.breakdown["GROUP"].amount, 900);
        assert_eq!(result.revenue, 2500);
        assert_reconciles(record);
    }

    #[test]
    fn test_incomplete_lessons_contribute_nothing() {
        let a = teacher("a", "Teacher A", 50);
        let lessons = vec![
            lesson("l1", &a, "2024-03-04", 90, "PRIVATE", 4000, false),
            lesson("l2", &a, "2024-03-20", 30, "GROUP", 800, false),
        ];

        let result = aggregate_payroll(&lessons, &[&a], &march(), &catalog());
        let record = &result.records[0];

        assert_eq!(record.total_lessons, 0);
        assert_eq!(record.total_pay, 0);
        assert_eq!(record.total_hours, 0.0);
        assert_eq!(result.revenue, 0);
    }

    #[test]
    fn test_teacher_without_lessons_still_reported_with_zero_slots() {
        let a = teacher("a", "Teacher A", 60);
        let b = teacher("b", "Teacher B", 40);
        let lessons = vec![lesson("l1", &a, "2024-03-04", 60, "PRIVATE", 1000, true)];

        let result = aggregate_payroll(&lessons, &[&a, &b], &march(), &catalog());

        assert_eq!(result.records.len(), 2);
        let empty = &result.records[1];
        assert_eq!(empty.teacher_id, "b");
        assert_eq!(empty.total_lessons, 0);
        assert_eq!(empty.breakdown.len(), 2);
        assert_eq!(empty.breakdown["GROUP"], BreakdownEntry::default());
    }

    #[test]
    fn test_unknown_class_type_gets_its_own_slot() {
        let a = teacher("a", "Teacher A", 50);
        let lessons = vec![
            lesson("l1", &a, "2024-03-04", 60, "PRIVATE", 1000, true),
            lesson("l2", &a, "2024-03-05", 45, "WORKSHOP", 2000, true),
        ];

        let result = aggregate_payroll(&lessons, &[&a], &march(), &catalog());
        let record = &result.records[0];

        assert_eq!(record.breakdown.len(), 3);
        assert_eq!(record.breakdown["WORKSHOP"].count, 1);
        assert_eq!(record.breakdown["WORKSHOP"].amount, 1000);
        assert_eq!(record.breakdown["WORKSHOP"].hours, 0.75);
        assert_reconciles(record);
    }

    #[test]
    fn test_missing_cost_and_price_count_as_zero() {
        let a = teacher("a", "Teacher A", 50);
        let mut legacy = lesson("l1", &a, "2024-03-04", 60, "PRIVATE", 1000, true);
        legacy.cost = None;
        legacy.price = None;

        let result = aggregate_payroll(&[legacy], &[&a], &march(), &catalog());
        let record = &result.records[0];

        assert_eq!(record.total_lessons, 1);
        assert_eq!(record.total_pay, 0);
        assert_eq!(record.total_hours, 1.0);
        assert_eq!(result.revenue, 0);
        assert_reconciles(record);
    }

    #[test]
    fn test_window_boundaries() {
        let a = teacher("a", "Teacher A", 50);
        let lessons = vec![
            lesson("feb", &a, "2024-02-29", 60, "PRIVATE", 1000, true),
            lesson("first", &a, "2024-03-01", 60, "PRIVATE", 1000, true),
            lesson("last", &a, "2024-03-31", 60, "PRIVATE", 1000, true),
            lesson("apr", &a, "2024-04-01", 60, "PRIVATE", 1000, true),
        ];

        let month = aggregate_payroll(&lessons, &[&a], &march(), &catalog());
        assert_eq!(month.records[0].total_lessons, 2);

        let range = ReportWindow::Range {
            start: date("2024-02-29"),
            end: date("2024-03-01"),
        };
        let ranged = aggregate_payroll(&lessons, &[&a], &range, &catalog());
        assert_eq!(ranged.records[0].total_lessons, 2);
        assert_eq!(ranged.revenue, 2000);
    }

    #[test]
    fn test_out_of_scope_teachers_are_ignored() {
        let a = teacher("a", "Teacher A", 50);
        let b = teacher("b", "Teacher B", 50);
        let lessons = vec![
            lesson("l1", &a, "2024-03-04", 60, "PRIVATE", 1000, true),
            lesson("l2", &b, "2024-03-04", 60, "PRIVATE", 3000, true),
        ];

        let result = aggregate_payroll(&lessons, &[&b], &march(), &catalog());
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].teacher_id, "b");
        assert_eq!(result.records[0].total_pay, 1500);
    }

    #[test]
    fn test_revenue_includes_lessons_of_teachers_off_the_roster() {
        let a = teacher("a", "Teacher A", 50);
        let gone = teacher("gone", "Former Teacher", 50);
        let lessons = vec![
            lesson("l1", &a, "2024-03-04", 60, "PRIVATE", 1000, true),
            lesson("l2", &gone, "2024-03-05", 60, "PRIVATE", 3000, true),
            lesson("l3", &gone, "2024-03-06", 60, "PRIVATE", 9000, false),
        ];

        let result = aggregate_payroll(&lessons, &[&a], &march(), &catalog());
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].total_pay, 500);
        assert_eq!(result.revenue, 4000);
    }

    #[test]
    fn test_money_sums_saturate() {
        let a = teacher("a", "Teacher A", 50);
        let mut first = lesson("l1", &a, "2024-03-04", 60, "PRIVATE", 1, true);
        first.price = Some(i64::MAX);
        first.cost = Some(i64::MAX);
        let second = lesson("l2", &a, "2024-03-05", 60, "PRIVATE", 1000, true);

        let result = aggregate_payroll(&[first, second], &[&a], &march(), &catalog());
        assert_eq!(result.revenue, i64::MAX);
        assert_eq!(result.records[0].total_pay, i64::MAX);
        assert_eq!(result.records[0].breakdown["PRIVATE"].amount, i64::MAX);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let a = teacher("a", "Teacher A", 55);
        let b = teacher("b", "Teacher B", 45);
        let lessons = vec![
            lesson("l1", &a, "2024-03-04", 50, "PRIVATE", 1234, true),
            lesson("l2", &b, "2024-03-08", 70, "GROUP", 999, true),
            lesson("l3", &a, "2024-03-09", 20, "LEGACY", 500, true),
        ];

        let first = aggregate_payroll(&lessons, &[&a, &b], &march(), &catalog());
        let second = aggregate_payroll(&lessons, &[&a, &b], &march(), &catalog());
        assert_eq!(first, second);
        for record in &first.records {
            assert_reconciles(record);
        }
    }

    #[test]
    fn test_hours_accumulate_from_minutes() {
        let a = teacher("a", "Teacher A", 50);
        let lessons = vec![
            lesson("l1", &a, "2024-03-04", 20, "PRIVATE", 100, true),
            lesson("l2", &a, "2024-03-05", 20, "PRIVATE", 100, true),
            lesson("l3", &a, "2024-03-06", 20, "PRIVATE", 100, true),
        ];

        let result = aggregate_payroll(&lessons, &[&a], &march(), &catalog());
        assert_eq!(result.records[0].total_hours, 1.0);
        assert_eq!(result.records[0].breakdown["PRIVATE"].hours, 1.0);
    }
}
