use thiserror::Error;

/// Validation and lookup failures raised by domain services
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("Teacher not found: {0}")]
    TeacherNotFound(String),
    #[error("Lesson not found: {0}")]
    LessonNotFound(String),
    #[error("Class type not found: {0}")]
    ClassTypeNotFound(String),
    #[error("Class type already exists: {0}")]
    DuplicateClassType(String),
    #[error("Commission rate must be between 0 and 100, got {0}")]
    InvalidCommissionRate(u8),
    #[error("Lesson duration must be positive")]
    InvalidDuration,
    #[error("Lesson price cannot be negative: {0}")]
    NegativePrice(i64),
    #[error("Lesson price is too large: {0}")]
    PriceOutOfRange(i64),
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("Invalid report window: {0}")]
    InvalidWindow(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::TeacherNotFound(_)
                | DomainError::LessonNotFound(_)
                | DomainError::ClassTypeNotFound(_)
        )
    }
}
