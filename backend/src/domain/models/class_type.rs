//! Class type catalog.
//!
//! The catalog is an ordered, versionless lookup table. Lessons keep the raw
//! class type id they were created with; when that id has since been removed
//! from the catalog it resolves to a legacy entry labelled by the id itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassType {
    pub id: String,
    pub name: String,
}

/// Result of looking a lesson's class type up in the current catalog
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedClassType<'a> {
    Known(&'a ClassType),
    /// Not in the catalog any more; carries the raw id
    Legacy(String),
}

impl ResolvedClassType<'_> {
    pub fn label(&self) -> String {
        match self {
            ResolvedClassType::Known(class_type) => class_type.name.clone(),
            ResolvedClassType::Legacy(id) => id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassTypeCatalog {
    entries: Vec<ClassType>,
}

impl ClassTypeCatalog {
    pub fn new(entries: Vec<ClassType>) -> Self {
        Self { entries }
    }

    /// Entries in display order
    pub fn entries(&self) -> &[ClassType] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn resolve(&self, id: &str) -> ResolvedClassType<'_> {
        match self.entries.iter().find(|entry| entry.id == id) {
            Some(entry) => ResolvedClassType::Known(entry),
            None => ResolvedClassType::Legacy(id.to_string()),
        }
    }

    pub fn label(&self, id: &str) -> String {
        self.resolve(id).label()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ClassTypeCatalog {
        ClassTypeCatalog::new(vec![
            ClassType { id: "PRIVATE".to_string(), name: "Private".to_string() },
            ClassType { id: "GROUP".to_string(), name: "Group".to_string() },
        ])
    }

    #[test]
    fn test_resolve_known_and_legacy_types() {
        let catalog = catalog();
        assert!(matches!(catalog.resolve("GROUP"), ResolvedClassType::Known(ct) if ct.name == "Group"));
        assert_eq!(catalog.resolve("TRIAL"), ResolvedClassType::Legacy("TRIAL".to_string()));
        assert_eq!(catalog.label("PRIVATE"), "Private");
        assert_eq!(catalog.label("TRIAL"), "TRIAL");
    }

    #[test]
    fn test_ids_keep_catalog_order() {
        let catalog = catalog();
        let ids: Vec<&str> = catalog.ids().collect();
        assert_eq!(ids, vec!["PRIVATE", "GROUP"]);
    }
}
