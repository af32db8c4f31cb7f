//! # Storage Module
//!
//! Handles all data persistence for the music school backend.
//!
//! The domain layer only sees the [`RecordStore`] façade: generic collection
//! CRUD over JSON items with a production/test mode switch. Two
//! implementations are provided:
//!
//! - **FileRecordStore**: one JSON file per collection in the data directory
//! - **MemoryRecordStore**: process-local, used by tests
//!
//! Typed repositories in [`repositories`] decode items into domain models.

pub mod file_store;
pub mod memory_store;
pub mod records;
pub mod repositories;
pub mod traits;

pub use file_store::FileRecordStore;
pub use memory_store::MemoryRecordStore;
pub use records::StorageError;
pub use repositories::{ClassTypeRepository, LessonRepository, TeacherRepository};
pub use traits::{Collection, RecordStore};
