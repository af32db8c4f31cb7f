//! # In-Memory Record Store
//!
//! Keeps every collection in a process-local map. Used by tests and for
//! throwaway runs where nothing should touch the disk.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use shared::StoreMode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use super::records::{insert_item, remove_item, replace_item};
use super::traits::{Collection, RecordStore};

#[derive(Default)]
pub struct MemoryRecordStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    mode: Mutex<StoreMode>,
    version: AtomicU64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, collection: Collection) -> String {
        collection.table_name(self.mode())
    }

    fn bump(&self) {
        self.version.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>> {
        let table = self.table(collection);
        let tables = self.tables.lock().map_err(|_| anyhow!("record store lock poisoned"))?;
        Ok(tables.get(&table).cloned().unwrap_or_default())
    }

    async fn add(&self, collection: Collection, item: Value) -> Result<()> {
        let table = self.table(collection);
        {
            let mut tables = self.tables.lock().map_err(|_| anyhow!("record store lock poisoned"))?;
            let items = tables.entry(table.clone()).or_default();
            insert_item(&table, items, item)?;
        }
        self.bump();
        debug!("Added item to {}", table);
        Ok(())
    }

    async fn update(&self, collection: Collection, item: Value) -> Result<()> {
        let table = self.table(collection);
        {
            let mut tables = self.tables.lock().map_err(|_| anyhow!("record store lock poisoned"))?;
            let items = tables.entry(table.clone()).or_default();
            replace_item(&table, items, item)?;
        }
        self.bump();
        debug!("Updated item in {}", table);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        let table = self.table(collection);
        let removed = {
            let mut tables = self.tables.lock().map_err(|_| anyhow!("record store lock poisoned"))?;
            tables
                .get_mut(&table)
                .map(|items| remove_item(items, id))
                .unwrap_or(false)
        };
        if removed {
            self.bump();
            debug!("Deleted {} from {}", id, table);
        }
        Ok(removed)
    }

    fn set_mode(&self, mode: StoreMode) {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner) = mode;
        self.bump();
    }

    fn mode(&self) -> StoreMode {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}
