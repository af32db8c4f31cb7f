//! Conversions between the public DTOs in `shared` and domain types

pub mod class_type_mapper;
pub mod lesson_mapper;
pub mod report_mapper;
pub mod teacher_mapper;

pub use class_type_mapper::ClassTypeMapper;
pub use lesson_mapper::LessonMapper;
pub use report_mapper::ReportMapper;
pub use teacher_mapper::TeacherMapper;
