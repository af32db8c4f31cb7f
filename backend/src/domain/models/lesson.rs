//! Domain model for a lesson.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub teacher_id: String,
    #[serde(default)]
    pub student_ids: Vec<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: String,
    pub duration_minutes: u32,
    #[serde(rename = "type")]
    pub class_type: String,
    /// Absent on some historical records
    #[serde(default)]
    pub price: Option<i64>,
    /// Teacher payout fixed at creation time; absent on some historical records
    #[serde(default)]
    pub cost: Option<i64>,
    #[serde(default)]
    pub is_completed: bool,
}

impl Lesson {
    pub fn generate_id() -> String {
        format!("lesson-{}", Uuid::new_v4())
    }

    pub fn price_or_zero(&self) -> i64 {
        self.price.unwrap_or(0)
    }

    pub fn cost_or_zero(&self) -> i64 {
        self.cost.unwrap_or(0)
    }
}

/// Teacher payout for a lesson: `price * rate / 100`, rounded half up to
/// whole currency units. Callers reject negative prices beforehand.
///
/// `None` when the price is too large to price without overflowing.
pub fn commission_cost(price: i64, commission_rate: u8) -> Option<i64> {
    price
        .checked_mul(i64::from(commission_rate))?
        .checked_add(50)
        .map(|scaled| scaled / 100)
}
