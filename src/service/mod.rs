//! Typed CRUD + domain-query façades over the record store. Each service is
//! constructed once with a shared store handle and injected into handlers
//! through `web::Data`; there is no global state.

pub mod attendance;
pub mod department;
pub mod employee;

pub use attendance::AttendanceService;
pub use department::DepartmentService;
pub use employee::EmployeeService;

use crate::error::ServiceError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a stored record into its typed entity. A record that no longer
/// fits the entity shape is a store-side problem, not caller input.
pub(crate) fn decode<T: DeserializeOwned>(
    entity: &'static str,
    value: Value,
) -> Result<T, ServiceError> {
    serde_json::from_value(value).map_err(|e| {
        ServiceError::BackendUnavailable(format!("malformed {entity} record: {e}"))
    })
}

pub(crate) fn decode_all<T: DeserializeOwned>(
    entity: &'static str,
    values: Vec<Value>,
) -> Result<Vec<T>, ServiceError> {
    values.into_iter().map(|v| decode(entity, v)).collect()
}

/// Merge `patch` over `current` the way the store's update does, without
/// persisting. Lets services type-check an update before writing it.
pub(crate) fn merge_preview(current: Value, patch: &Value) -> Result<Value, ServiceError> {
    let Some(patch) = patch.as_object() else {
        return Err(ServiceError::validation("Payload must be a JSON object"));
    };
    if patch.is_empty() {
        return Err(ServiceError::validation("No fields provided for update"));
    }

    let mut merged = current;
    if let Some(obj) = merged.as_object_mut() {
        for (key, value) in patch {
            if key == "Id" {
                continue;
            }
            obj.insert(key.clone(), value.clone());
        }
    }
    Ok(merged)
}
