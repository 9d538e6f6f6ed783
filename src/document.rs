//! Document mapping and conversion utilities.

use bson::{Bson, Document, oid::ObjectId};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{StoreError, StoreResult};

/// Extension trait for typed access into schema-less records.
pub trait DocumentExt {
    /// Get a string value from the document.
    fn get_str(&self, key: &str) -> StoreResult<&str>;

    /// Get an optional string value.
    fn get_str_opt(&self, key: &str) -> Option<&str>;

    /// Get an i32 value.
    fn get_i32(&self, key: &str) -> StoreResult<i32>;

    /// Get an optional i32 value.
    fn get_i32_opt(&self, key: &str) -> Option<i32>;

    /// Get a nested document.
    fn get_document(&self, key: &str) -> StoreResult<&Document>;

    /// Convert to a typed struct.
    fn to_struct<T: DeserializeOwned>(&self) -> StoreResult<T>;

    /// Get the `_id` field as ObjectId.
    fn id(&self) -> StoreResult<ObjectId>;
}

impl DocumentExt for Document {
    fn get_str(&self, key: &str) -> StoreResult<&str> {
        self.get_str(key)
            .map_err(|_| StoreError::invalid_input(format!("field '{}' is not a string", key)))
    }

    fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.get_str(key).ok()
    }

    fn get_i32(&self, key: &str) -> StoreResult<i32> {
        self.get_i32(key)
            .map_err(|_| StoreError::invalid_input(format!("field '{}' is not an i32", key)))
    }

    fn get_i32_opt(&self, key: &str) -> Option<i32> {
        self.get_i32(key).ok()
    }

    fn get_document(&self, key: &str) -> StoreResult<&Document> {
        self.get_document(key)
            .map_err(|_| StoreError::invalid_input(format!("field '{}' is not a document", key)))
    }

    fn to_struct<T: DeserializeOwned>(&self) -> StoreResult<T> {
        bson::from_document(self.clone()).map_err(|e| StoreError::serialization(e.to_string()))
    }

    fn id(&self) -> StoreResult<ObjectId> {
        self.get_object_id("_id")
            .map_err(|_| StoreError::invalid_input("field '_id' is not an ObjectId"))
    }
}

/// Convert a struct to a BSON document.
pub fn to_document<T: Serialize>(value: &T) -> StoreResult<Document> {
    bson::to_document(value).map_err(|e| StoreError::serialization(e.to_string()))
}

/// Convert a BSON document to a struct.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> StoreResult<T> {
    bson::from_document(doc).map_err(|e| StoreError::serialization(e.to_string()))
}

/// Parse a JSON object into a BSON document.
///
/// Useful when the caller hands over dictionary-shaped input as JSON text,
/// e.g. a query typed into a dashboard.
pub fn from_json(json: &str) -> StoreResult<Document> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| StoreError::serialization(format!("invalid JSON: {}", e)))?;
    match bson::to_bson(&value).map_err(|e| StoreError::serialization(e.to_string()))? {
        Bson::Document(doc) => Ok(doc),
        other => Err(StoreError::invalid_input(format!(
            "expected a JSON object, got {:?}",
            other.element_type()
        ))),
    }
}

/// Parse an ObjectId from a string.
pub fn parse_object_id(s: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(s).map_err(StoreError::from)
}

/// Create a new ObjectId.
pub fn new_object_id() -> ObjectId {
    ObjectId::new()
}
