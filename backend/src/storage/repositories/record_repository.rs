use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::warn;

use crate::domain::models::{ClassType, Lesson, Teacher};
use crate::storage::traits::{Collection, RecordStore};

/// A domain model that lives in a record store collection
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

impl Record for Lesson {
    const COLLECTION: Collection = Collection::Lessons;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Teacher {
    const COLLECTION: Collection = Collection::Teachers;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for ClassType {
    const COLLECTION: Collection = Collection::ClassTypes;

    fn id(&self) -> &str {
        &self.id
    }
}

pub struct RecordRepository<T> {
    store: Arc<dyn RecordStore>,
    _record: PhantomData<fn() -> T>,
}

pub type LessonRepository = RecordRepository<Lesson>;
pub type TeacherRepository = RecordRepository<Teacher>;
pub type ClassTypeRepository = RecordRepository<ClassType>;

impl<T> Clone for RecordRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> RecordRepository<T> {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// All decodable records in store order
    pub async fn list(&self) -> Result<Vec<T>> {
        let items = self.store.get_all(T::COLLECTION).await?;
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<T>(item) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping undecodable item in {}: {}", T::COLLECTION, e),
            }
        }
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(self.list().await?.into_iter().find(|record| record.id() == id))
    }

    pub async fn store(&self, record: &T) -> Result<()> {
        self.store.add(T::COLLECTION, serde_json::to_value(record)?).await
    }

    pub async fn update(&self, record: &T) -> Result<()> {
        self.store.update(T::COLLECTION, serde_json::to_value(record)?).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.store.delete(T::COLLECTION, id).await
    }
}
