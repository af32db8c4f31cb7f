//! Class type catalog management.
//!
//! Removing or renaming a class type never touches lessons that reference it.
//! Reports fall back to the raw id for types that are no longer in the catalog.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::class_types::{CreateClassTypeCommand, RenameClassTypeCommand};
use crate::domain::error::DomainError;
use crate::domain::models::{ClassType, ClassTypeCatalog};
use crate::storage::{ClassTypeRepository, RecordStore};

#[derive(Clone)]
pub struct ClassTypeService {
    class_type_repository: ClassTypeRepository,
}

impl ClassTypeService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            class_type_repository: ClassTypeRepository::new(store),
        }
    }

    /// Current catalog in display order
    pub async fn catalog(&self) -> Result<ClassTypeCatalog> {
        Ok(ClassTypeCatalog::new(self.class_type_repository.list().await?))
    }

    pub async fn add_class_type(&self, command: CreateClassTypeCommand) -> Result<ClassType> {
        let id = command.id.trim();
        if id.is_empty() {
            return Err(DomainError::EmptyField("Class type id").into());
        }
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyField("Class type name").into());
        }
        if self.catalog().await?.contains(id) {
            return Err(DomainError::DuplicateClassType(id.to_string()).into());
        }

        let class_type = ClassType {
            id: id.to_string(),
            name: name.to_string(),
        };
        self.class_type_repository.store(&class_type).await?;

        info!("Added class type {} ({})", class_type.id, class_type.name);
        Ok(class_type)
    }

    pub async fn rename_class_type(&self, command: RenameClassTypeCommand) -> Result<ClassType> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyField("Class type name").into());
        }
        let mut class_type = self
            .class_type_repository
            .get(&command.id)
            .await?
            .ok_or_else(|| DomainError::ClassTypeNotFound(command.id.clone()))?;

        class_type.name = name.to_string();
        self.class_type_repository.update(&class_type).await?;
        Ok(class_type)
    }

    pub async fn remove_class_type(&self, id: &str) -> Result<()> {
        if !self.class_type_repository.delete(id).await? {
            return Err(DomainError::ClassTypeNotFound(id.to_string()).into());
        }
        info!("Removed class type {}; historical lessons keep the raw id", id);
        Ok(())
    }
}
