//! Domain models as stored in the record store.
//!
//! Field names follow the camelCase JSON used by the persistence façade.

pub mod class_type;
pub mod lesson;
pub mod teacher;

pub use class_type::*;
pub use lesson::*;
pub use teacher::*;
