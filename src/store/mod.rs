//! Generic record store: named collections of JSON records with store-side
//! id assignment and projection+filter queries. The default backend keeps
//! everything in memory, standing in for the remote record store.

pub mod query;
pub mod seed;

pub use query::Query;

use crate::config::{Config, StoreBackend};
use crate::error::ServiceError;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

pub const EMPLOYEES: &str = "employees";
pub const DEPARTMENTS: &str = "departments";
pub const ATTENDANCE: &str = "attendance";

pub struct RecordStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

/// Read the `Id` key every stored record carries.
pub fn record_id(record: &Value) -> Option<u64> {
    record.get("Id").and_then(Value::as_u64)
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Build the store the configuration asks for. The remote backend needs
    /// its project id and public key up front; failing that we refuse to
    /// start rather than crash on first use.
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        match config.store_backend {
            StoreBackend::Mock => {
                let store = Self::new();
                if config.seed_demo_data {
                    seed::load_demo_data(&store)?;
                }
                Ok(store)
            }
            StoreBackend::Remote => {
                if config.project_id.is_none() || config.public_key.is_none() {
                    return Err(ServiceError::BackendUnavailable(
                        "backend not configured: PROJECT_ID and PUBLIC_KEY are required \
                         for the remote record store"
                            .to_string(),
                    ));
                }
                Err(ServiceError::BackendUnavailable(
                    "remote record store client is not available in this build; \
                     set STORE_BACKEND=mock"
                        .to_string(),
                ))
            }
        }
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<Value>>>, ServiceError> {
        self.collections
            .read()
            .map_err(|_| ServiceError::BackendUnavailable("record store lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<Value>>>, ServiceError> {
        self.collections
            .write()
            .map_err(|_| ServiceError::BackendUnavailable("record store lock poisoned".to_string()))
    }

    /// All records in `collection` matching `query`, projected. An unknown
    /// collection reads as empty.
    pub fn select(&self, collection: &str, query: &Query) -> Result<Vec<Value>, ServiceError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| query.matches(r))
                    .map(|r| query.project(r))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// A single record by id; `None` when absent.
    pub fn get(&self, collection: &str, id: u64) -> Result<Option<Value>, ServiceError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)))
            .cloned())
    }

    /// Insert a record, assigning `Id = max(Id) + 1` within the collection.
    /// Returns the stored record.
    pub fn insert(&self, collection: &str, record: Value) -> Result<Value, ServiceError> {
        let Value::Object(mut obj) = record else {
            return Err(ServiceError::validation("Payload must be a JSON object"));
        };

        let mut collections = self.write()?;
        let records = collections.entry(collection.to_string()).or_default();
        let next_id = records
            .iter()
            .filter_map(record_id)
            .max()
            .unwrap_or(0)
            + 1;
        obj.insert("Id".to_string(), Value::from(next_id));

        let stored = Value::Object(obj);
        records.push(stored.clone());
        Ok(stored)
    }

    /// Merge the supplied fields into the record with `id`. The `Id` field
    /// is immutable and ignored if present in the patch. Returns the updated
    /// record, or `None` when the id is absent.
    pub fn update(
        &self,
        collection: &str,
        id: u64,
        patch: Value,
    ) -> Result<Option<Value>, ServiceError> {
        let Value::Object(patch) = patch else {
            return Err(ServiceError::validation("Payload must be a JSON object"));
        };
        if patch.is_empty() {
            return Err(ServiceError::validation("No fields provided for update"));
        }

        let mut collections = self.write()?;
        let Some(records) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(record) = records.iter_mut().find(|r| record_id(r) == Some(id)) else {
            return Ok(None);
        };

        if let Some(obj) = record.as_object_mut() {
            for (key, value) in patch {
                if key == "Id" {
                    continue;
                }
                obj.insert(key, value);
            }
        }
        Ok(Some(record.clone()))
    }

    /// Remove and return the record with `id`, or `None` when absent.
    pub fn delete(&self, collection: &str, id: u64) -> Result<Option<Value>, ServiceError> {
        let mut collections = self.write()?;
        let Some(records) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(index) = records.iter().position(|r| record_id(r) == Some(id)) else {
            return Ok(None);
        };
        Ok(Some(records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_assigns_sequential_ids() {
        let store = RecordStore::new();
        let a = store.insert("things", json!({ "name": "a" })).unwrap();
        let b = store.insert("things", json!({ "name": "b" })).unwrap();
        assert_eq!(record_id(&a), Some(1));
        assert_eq!(record_id(&b), Some(2));
    }

    #[test]
    fn ids_grow_past_deleted_maximum_holes() {
        let store = RecordStore::new();
        store.insert("things", json!({ "n": 1 })).unwrap();
        store.insert("things", json!({ "n": 2 })).unwrap();
        store.delete("things", 1).unwrap();
        let c = store.insert("things", json!({ "n": 3 })).unwrap();
        assert_eq!(record_id(&c), Some(3));
    }

    #[test]
    fn update_merges_fields_and_keeps_id() {
        let store = RecordStore::new();
        store
            .insert("things", json!({ "name": "a", "color": "red" }))
            .unwrap();
        let updated = store
            .update("things", 1, json!({ "color": "blue", "Id": 99 }))
            .unwrap()
            .unwrap();
        assert_eq!(updated, json!({ "Id": 1, "name": "a", "color": "blue" }));
    }

    #[test]
    fn update_rejects_empty_or_non_object_payloads() {
        let store = RecordStore::new();
        store.insert("things", json!({ "n": 1 })).unwrap();
        assert!(matches!(
            store.update("things", 1, json!({})),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            store.update("things", 1, json!([1, 2])),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn delete_returns_the_removed_record() {
        let store = RecordStore::new();
        store.insert("things", json!({ "name": "a" })).unwrap();
        let removed = store.delete("things", 1).unwrap().unwrap();
        assert_eq!(removed["name"], "a");
        assert_eq!(store.get("things", 1).unwrap(), None);
        assert_eq!(store.delete("things", 1).unwrap(), None);
    }

    #[test]
    fn select_on_unknown_collection_is_empty() {
        let store = RecordStore::new();
        assert!(store.select("nothing", &Query::new()).unwrap().is_empty());
    }

    #[test]
    fn select_filters_and_projects() {
        let store = RecordStore::new();
        store
            .insert("emps", json!({ "name": "Ann", "department": "Engineering" }))
            .unwrap();
        store
            .insert("emps", json!({ "name": "Bob", "department": "Sales" }))
            .unwrap();

        let rows = store
            .select(
                "emps",
                &Query::new().eq("department", "Engineering").fields(&["name"]),
            )
            .unwrap();
        assert_eq!(rows, vec![json!({ "name": "Ann" })]);
    }
}
