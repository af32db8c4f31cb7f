//! # File Record Store
//!
//! A record store that keeps each collection as a JSON array in its own file
//! under the data directory.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── lessons.json
//! ├── teachers.json
//! ├── class_types.json
//! ├── test_lessons.json       ← test mode namespace
//! ├── test_teachers.json
//! └── test_class_types.json
//! ```
//!
//! Writes go to a temp file first and are renamed into place. A missing file
//! reads as an empty collection.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use shared::StoreMode;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::fs;
use tracing::{debug, info};

use super::records::{insert_item, remove_item, replace_item};
use super::traits::{Collection, RecordStore};

pub struct FileRecordStore {
    base_directory: PathBuf,
    mode: Mutex<StoreMode>,
    version: AtomicU64,
    /// Serialises read-modify-write cycles
    write_lock: tokio::sync::Mutex<()>,
}

impl FileRecordStore {
    /// Create a store rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            std::fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            mode: Mutex::new(StoreMode::Production),
            version: AtomicU64::new(0),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.base_directory
            .join(format!("{}.json", collection.table_name(self.mode())))
    }

    async fn read_items(&self, path: &Path) -> Result<Vec<Value>> {
        if !fs::try_exists(path).await? {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<Value> = serde_json::from_str(&content)
            .with_context(|| format!("Malformed collection file {}", path.display()))?;
        Ok(items)
    }

    async fn write_items(&self, path: &Path, items: &[Value]) -> Result<()> {
        let content = serde_json::to_vec_pretty(items)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)
            .await
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path).await?;
        debug!("Saved {} items to {}", items.len(), path.display());
        Ok(())
    }

    fn table_label(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    fn bump(&self) {
        self.version.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>> {
        let path = self.collection_path(collection);
        self.read_items(&path).await
    }

    async fn add(&self, collection: Collection, item: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.collection_path(collection);
        let mut items = self.read_items(&path).await?;
        insert_item(&Self::table_label(&path), &mut items, item)?;
        self.write_items(&path, &items).await?;
        self.bump();
        Ok(())
    }

    async fn update(&self, collection: Collection, item: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.collection_path(collection);
        let mut items = self.read_items(&path).await?;
        replace_item(&Self::table_label(&path), &mut items, item)?;
        self.write_items(&path, &items).await?;
        self.bump();
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let path = self.collection_path(collection);
        let mut items = self.read_items(&path).await?;
        if !remove_item(&mut items, id) {
            return Ok(false);
        }
        self.write_items(&path, &items).await?;
        self.bump();
        Ok(true)
    }

    fn set_mode(&self, mode: StoreMode) {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner) = mode;
        self.bump();
        info!("Record store switched to {} mode", mode);
    }

    fn mode(&self) -> StoreMode {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for FileRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRecordStore")
            .field("base_directory", &self.base_directory)
            .field("mode", &self.mode())
            .finish()
    }
}

/// Fails loudly when a collection file exists but cannot be parsed
pub async fn verify_readable(store: &FileRecordStore) -> Result<()> {
    for collection in [Collection::Lessons, Collection::Teachers, Collection::ClassTypes] {
        store
            .get_all(collection)
            .await
            .map_err(|e| anyhow!("Collection {} is unreadable: {:#}", collection, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_items_persist_across_store_instances() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = FileRecordStore::new(temp_dir.path()).unwrap();
            store
                .add(Collection::Teachers, json!({"id": "t1", "name": "Ana", "commissionRate": 60}))
                .await
                .unwrap();
        }

        let reopened = FileRecordStore::new(temp_dir.path()).unwrap();
        let teachers = reopened.get_all(Collection::Teachers).await.unwrap();
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0]["name"], "Ana");
        assert!(temp_dir.path().join("teachers.json").exists());
    }

    #[tokio::test]
    async fn test_test_mode_writes_prefixed_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(temp_dir.path()).unwrap();

        store.set_mode(StoreMode::Test);
        store.add(Collection::Lessons, json!({"id": "l1"})).await.unwrap();

        assert!(temp_dir.path().join("test_lessons.json").exists());
        assert!(!temp_dir.path().join("lessons.json").exists());

        store.set_mode(StoreMode::Production);
        assert!(store.get_all(Collection::Lessons).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(temp_dir.path()).unwrap();

        store.add(Collection::ClassTypes, json!({"id": "PRIVATE", "name": "Private"})).await.unwrap();
        store
            .update(Collection::ClassTypes, json!({"id": "PRIVATE", "name": "Private lesson"}))
            .await
            .unwrap();
        let items = store.get_all(Collection::ClassTypes).await.unwrap();
        assert_eq!(items[0]["name"], "Private lesson");

        assert!(store.delete(Collection::ClassTypes, "PRIVATE").await.unwrap());
        assert!(!store.delete(Collection::ClassTypes, "PRIVATE").await.unwrap());
        assert!(store.get_all(Collection::ClassTypes).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("lessons.json"), "{not json").unwrap();
        let store = FileRecordStore::new(temp_dir.path()).unwrap();

        assert!(store.get_all(Collection::Lessons).await.is_err());
        assert!(verify_readable(&store).await.is_err());
    }
}
