//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod lessons {
    use chrono::NaiveDate;
    use shared::ReportWindow;

    #[derive(Debug, Clone)]
    pub struct CreateLessonCommand {
        pub teacher_id: String,
        pub student_ids: Vec<String>,
        pub date: NaiveDate,
        pub start_time: String,
        pub duration_minutes: u32,
        pub class_type: String,
        pub price: i64,
    }

    /// Partial update; `None` leaves a field untouched
    #[derive(Debug, Clone, Default)]
    pub struct UpdateLessonCommand {
        pub lesson_id: String,
        pub teacher_id: Option<String>,
        pub student_ids: Option<Vec<String>>,
        pub date: Option<NaiveDate>,
        pub start_time: Option<String>,
        pub duration_minutes: Option<u32>,
        pub class_type: Option<String>,
        pub price: Option<i64>,
        pub recompute_cost: bool,
    }

    #[derive(Debug, Clone, Default)]
    pub struct LessonListQuery {
        pub window: Option<ReportWindow>,
    }
}

pub mod teachers {
    #[derive(Debug, Clone)]
    pub struct CreateTeacherCommand {
        pub name: String,
        pub commission_rate: u8,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateTeacherCommand {
        pub teacher_id: String,
        pub name: Option<String>,
        pub commission_rate: Option<u8>,
    }
}

pub mod class_types {
    #[derive(Debug, Clone)]
    pub struct CreateClassTypeCommand {
        pub id: String,
        pub name: String,
    }

    #[derive(Debug, Clone)]
    pub struct RenameClassTypeCommand {
        pub id: String,
        pub name: String,
    }
}

pub mod reports {
    use shared::{ReportWindow, SortState};

    #[derive(Debug, Clone)]
    pub struct PayrollReportQuery {
        pub window: ReportWindow,
        pub search: Option<String>,
        pub sort: SortState,
    }

    impl PayrollReportQuery {
        pub fn for_window(window: ReportWindow) -> Self {
            Self {
                window,
                search: None,
                sort: SortState::default(),
            }
        }
    }
}
