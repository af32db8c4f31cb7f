//! # Payroll Chart Data Preparation
//!
//! Reduces the visible payroll records to one total per catalog class type,
//! ready for a pie or bar chart. Categories that sum to exactly zero are left
//! out rather than drawn as empty slices.

use shared::{ChartSlice, PayrollRecord};

use crate::domain::models::ClassTypeCatalog;

#[derive(Clone, Default)]
pub struct PayrollChartService;

impl PayrollChartService {
    pub fn new() -> Self {
        Self
    }

    /// Category totals in catalog order
    pub fn class_type_totals(
        &self,
        records: &[PayrollRecord],
        catalog: &ClassTypeCatalog,
    ) -> Vec<ChartSlice> {
        catalog
            .entries()
            .iter()
            .map(|class_type| ChartSlice {
                class_type_id: class_type.id.clone(),
                label: class_type.name.clone(),
                amount: records.iter().fold(0i64, |total, record| {
                    total.saturating_add(record.class_type_amount(&class_type.id))
                }),
            })
            .filter(|slice| slice.amount != 0)
            .collect()
    }
}
