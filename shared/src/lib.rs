use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A single scheduled teaching session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    /// ID of the teacher giving the lesson
    pub teacher_id: String,
    /// Students attending (group lessons have several)
    pub student_ids: Vec<String>,
    /// Local calendar date, no time zone
    pub date: NaiveDate,
    /// Wall-clock start time, e.g. "16:30"
    pub start_time: String,
    pub duration_minutes: u32,
    /// Class type id; may reference a type no longer in the catalog
    pub class_type: String,
    /// Display label for the class type (raw id when the type was removed)
    pub class_type_label: String,
    /// Tuition charged, integer currency units
    pub price: i64,
    /// Amount payable to the teacher, fixed when the lesson was created
    pub cost: i64,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    /// Percentage of the lesson price paid to the teacher (0-100)
    pub commission_rate: u8,
}

/// Admin-configurable class category (e.g. private, group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassType {
    /// User-defined short code
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLessonRequest {
    pub teacher_id: String,
    #[serde(default)]
    pub student_ids: Vec<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub duration_minutes: u32,
    pub class_type: String,
    pub price: i64,
}

/// Partial lesson update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateLessonRequest {
    pub teacher_id: Option<String>,
    pub student_ids: Option<Vec<String>>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub duration_minutes: Option<u32>,
    pub class_type: Option<String>,
    pub price: Option<i64>,
    /// Re-derive cost from the teacher's current commission rate
    #[serde(default)]
    pub recompute_cost: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLessonCompletionRequest {
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonListResponse {
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTeacherRequest {
    pub name: String,
    pub commission_rate: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTeacherRequest {
    pub name: Option<String>,
    pub commission_rate: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherListResponse {
    pub teachers: Vec<Teacher>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateClassTypeRequest {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameClassTypeRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTypeListResponse {
    pub class_types: Vec<ClassType>,
}

/// Which namespace of the record store is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    #[default]
    Production,
    /// Isolated namespace, collections carry a `test_` prefix
    Test,
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreMode::Production => write!(f, "production"),
            StoreMode::Test => write!(f, "test"),
        }
    }
}

impl FromStr for StoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(StoreMode::Production),
            "test" => Ok(StoreMode::Test),
            other => Err(format!("Unknown store mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreModeRequest {
    pub mode: StoreMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreModeResponse {
    pub mode: StoreMode,
}

/// Date window a report is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWindow {
    /// A whole calendar month
    Month { year: i32, month: u32 },
    /// Inclusive date range
    Range { start: NaiveDate, end: NaiveDate },
}

impl ReportWindow {
    /// Parse a `YYYY-MM` month string
    pub fn parse_month(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u32>().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(ReportWindow::Month { year, month })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            ReportWindow::Month { year, month } => date.year() == *year && date.month() == *month,
            ReportWindow::Range { start, end } => *start <= date && date <= *end,
        }
    }

    /// Ranges must not end before they start and months must be 1-12
    pub fn is_valid(&self) -> bool {
        match self {
            ReportWindow::Month { month, .. } => (1..=12).contains(month),
            ReportWindow::Range { start, end } => start <= end,
        }
    }

    /// Short label used in filenames: `2024-03` or `2024-03-01_2024-03-31`
    pub fn label(&self) -> String {
        match self {
            ReportWindow::Month { year, month } => format!("{:04}-{:02}", year, month),
            ReportWindow::Range { start, end } => {
                format!("{}_{}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
            }
        }
    }
}

/// Per class type slice of a payroll record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub count: u32,
    pub hours: f64,
    pub amount: i64,
}

/// Derived payroll aggregate for one teacher within a date window.
/// Never persisted; recomputed on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub teacher_id: String,
    pub teacher_name: String,
    pub total_hours: f64,
    pub total_lessons: u32,
    pub total_pay: i64,
    /// Keyed by class type id; catalog types are always present
    pub breakdown: BTreeMap<String, BreakdownEntry>,
}

impl PayrollRecord {
    /// Average pay per lesson, zero when the teacher gave no lessons
    pub fn average_pay(&self) -> f64 {
        if self.total_lessons == 0 {
            0.0
        } else {
            self.total_pay as f64 / self.total_lessons as f64
        }
    }

    /// Accumulated amount for a class type, zero when absent
    pub fn class_type_amount(&self, class_type_id: &str) -> i64 {
        self.breakdown
            .get(class_type_id)
            .map(|entry| entry.amount)
            .unwrap_or(0)
    }
}

/// Column a payroll table can be ordered by
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortKey {
    TeacherName,
    TotalPay,
    TotalLessons,
    TotalHours,
    AveragePay,
    /// Amount accumulated for one class type id
    ClassType(String),
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::TeacherName => write!(f, "teacher_name"),
            SortKey::TotalPay => write!(f, "total_pay"),
            SortKey::TotalLessons => write!(f, "total_lessons"),
            SortKey::TotalHours => write!(f, "total_hours"),
            SortKey::AveragePay => write!(f, "average_pay"),
            SortKey::ClassType(id) => write!(f, "class_type:{}", id),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = s.strip_prefix("class_type:") {
            if id.is_empty() {
                return Err("Class type sort key needs an id".to_string());
            }
            return Ok(SortKey::ClassType(id.to_string()));
        }
        match s {
            "teacher_name" | "name" => Ok(SortKey::TeacherName),
            "total_pay" => Ok(SortKey::TotalPay),
            "total_lessons" => Ok(SortKey::TotalLessons),
            "total_hours" => Ok(SortKey::TotalHours),
            "average_pay" => Ok(SortKey::AveragePay),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

impl TryFrom<String> for SortKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The single active sort of a payroll table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::TotalPay,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Select a column: the active one flips direction, a new one starts descending
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.toggled();
        } else {
            self.key = key;
            self.direction = SortDirection::Descending;
        }
    }
}

/// Totals across all visible records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_pay: i64,
    pub total_lessons: u32,
    pub total_hours: f64,
    /// School-wide tuition revenue, only present for admins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollReportResponse {
    pub window: ReportWindow,
    /// Catalog columns in display order
    pub class_types: Vec<ClassType>,
    pub records: Vec<PayrollRecord>,
    pub summary: ReportSummary,
    pub sort: SortState,
}

/// One category of the payroll chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub class_type_id: String,
    pub label: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollChartResponse {
    pub window: ReportWindow,
    pub slices: Vec<ChartSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollExportResponse {
    pub filename: String,
    /// UTF-8 CSV including the byte-order mark
    pub csv_content: String,
    pub record_count: usize,
}
