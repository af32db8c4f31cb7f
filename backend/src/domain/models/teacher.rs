//! Domain model for a teacher.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    /// Percentage of lesson price paid out, applied when a lesson is created
    #[serde(default)]
    pub commission_rate: u8,
}

impl Teacher {
    pub fn generate_id() -> String {
        format!("teacher-{}", Uuid::new_v4())
    }
}

pub const MAX_COMMISSION_RATE: u8 = 100;
