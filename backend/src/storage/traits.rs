//! # Storage Traits
//!
//! The record store is the persistence façade the rest of the backend talks to.
//! It exposes generic collection CRUD over JSON items, the same shape as the
//! school's REST key-value proxy: `get(collection)`, `add/update/delete(collection, item)`
//! and a production/test mode switch.
//!
//! Every successful mutation bumps a version counter. Report caching keys on
//! that counter, so there is no other invalidation logic to keep in sync.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use shared::StoreMode;
use std::fmt;

/// Named collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Lessons,
    Teachers,
    ClassTypes,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Lessons => "lessons",
            Collection::Teachers => "teachers",
            Collection::ClassTypes => "class_types",
        }
    }

    /// Physical table name; test mode lives in a `test_` prefixed namespace
    pub fn table_name(&self, mode: StoreMode) -> String {
        match mode {
            StoreMode::Production => self.name().to_string(),
            StoreMode::Test => format!("test_{}", self.name()),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Trait defining the interface of the record store
///
/// Writes are last-write-wins at the record level. There is no optimistic
/// concurrency check.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every item of a collection in insertion order
    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>>;

    /// Append a new item; fails if an item with the same `id` exists
    async fn add(&self, collection: Collection, item: Value) -> Result<()>;

    /// Replace the item with the same `id`; fails if it does not exist
    async fn update(&self, collection: Collection, item: Value) -> Result<()>;

    /// Remove an item by id
    /// Returns true if the item was found and deleted, false otherwise
    async fn delete(&self, collection: Collection, id: &str) -> Result<bool>;

    /// Switch between the production and test namespaces
    fn set_mode(&self, mode: StoreMode);

    fn mode(&self) -> StoreMode;

    /// Monotonic token incremented on every mutation and mode switch
    fn version(&self) -> u64;
}
