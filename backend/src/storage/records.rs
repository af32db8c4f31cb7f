//! Helpers shared by the record store implementations for manipulating a
//! collection held as a list of JSON items.

use serde_json::Value;
use thiserror::Error;

/// Errors raised by the record store itself
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Item in {collection} has no string `id` field")]
    MissingId { collection: String },
    #[error("Item {id} already exists in {collection}")]
    DuplicateId { collection: String, id: String },
    #[error("Item {id} not found in {collection}")]
    NotFound { collection: String, id: String },
}

/// Extract the string `id` of an item
pub fn item_id(item: &Value) -> Option<&str> {
    item.get("id").and_then(Value::as_str)
}

fn require_id(table: &str, item: &Value) -> Result<String, StorageError> {
    item_id(item)
        .map(str::to_string)
        .ok_or_else(|| StorageError::MissingId {
            collection: table.to_string(),
        })
}

pub fn insert_item(table: &str, items: &mut Vec<Value>, item: Value) -> Result<(), StorageError> {
    let id = require_id(table, &item)?;
    if items.iter().any(|existing| item_id(existing) == Some(id.as_str())) {
        return Err(StorageError::DuplicateId {
            collection: table.to_string(),
            id,
        });
    }
    items.push(item);
    Ok(())
}

pub fn replace_item(table: &str, items: &mut [Value], item: Value) -> Result<(), StorageError> {
    let id = require_id(table, &item)?;
    match items
        .iter_mut()
        .find(|existing| item_id(existing) == Some(id.as_str()))
    {
        Some(slot) => {
            *slot = item;
            Ok(())
        }
        None => Err(StorageError::NotFound {
            collection: table.to_string(),
            id,
        }),
    }
}

/// Returns true if an item was removed
pub fn remove_item(items: &mut Vec<Value>, id: &str) -> bool {
    let before = items.len();
    items.retain(|existing| item_id(existing) != Some(id));
    items.len() != before
}
