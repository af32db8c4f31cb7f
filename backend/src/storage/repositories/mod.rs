//! Typed repositories over the record store.
//!
//! Each repository decodes the JSON items of one collection into its domain
//! model. Items that no longer decode (hand-edited or written by an older
//! client) are skipped with a warning instead of failing the whole read.

pub mod record_repository;

pub use record_repository::{
    ClassTypeRepository, LessonRepository, Record, RecordRepository, TeacherRepository,
};
