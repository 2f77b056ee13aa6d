use crate::error::ServiceError;
use crate::model::employee::{Employee, EmployeeStatus, NewEmployee};
use crate::service::{decode, decode_all, merge_preview};
use crate::store::{EMPLOYEES, Query, RecordStore};
use serde_json::Value;
use std::sync::Arc;

const ENTITY: &str = "Employee";

/// Fields the directory search looks through, case-insensitively.
const SEARCH_FIELDS: &[&str] = &["firstName", "lastName", "email", "role", "department"];

#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<RecordStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Employee>, ServiceError> {
        decode_all(ENTITY, self.store.select(EMPLOYEES, &Query::new())?)
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Employee, ServiceError> {
        let record = self
            .store
            .get(EMPLOYEES, id)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        decode(ENTITY, record)
    }

    pub async fn create(&self, new: NewEmployee) -> Result<Employee, ServiceError> {
        validate(
            &new.first_name,
            &new.last_name,
            &new.email,
            &new.phone,
            &new.role,
            &new.department,
        )?;
        let record = serde_json::to_value(&new)
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        decode(ENTITY, self.store.insert(EMPLOYEES, record)?)
    }

    /// Merge the supplied fields into the employee. The patch is
    /// type-checked against the full entity shape before anything is
    /// written; the id is immutable.
    pub async fn update(&self, id: u64, patch: Value) -> Result<Employee, ServiceError> {
        let current = self
            .store
            .get(EMPLOYEES, id)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        let merged = merge_preview(current, &patch)?;
        let employee: Employee = serde_json::from_value(merged)
            .map_err(|e| ServiceError::validation(format!("Invalid employee update: {e}")))?;
        validate(
            &employee.first_name,
            &employee.last_name,
            &employee.email,
            &employee.phone,
            &employee.role,
            &employee.department,
        )?;

        self.store
            .update(EMPLOYEES, id, patch)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        Ok(employee)
    }

    /// Remove the employee and return the removed record.
    pub async fn delete(&self, id: u64) -> Result<Employee, ServiceError> {
        let removed = self
            .store
            .delete(EMPLOYEES, id)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        decode(ENTITY, removed)
    }

    /// Case-insensitive substring search across name, email, role and
    /// department.
    pub async fn search(&self, text: &str) -> Result<Vec<Employee>, ServiceError> {
        let query = Query::new().any_contains_ci(SEARCH_FIELDS, text);
        decode_all(ENTITY, self.store.select(EMPLOYEES, &query)?)
    }

    pub async fn get_by_department(&self, department: &str) -> Result<Vec<Employee>, ServiceError> {
        let query = Query::new().eq("department", department);
        decode_all(ENTITY, self.store.select(EMPLOYEES, &query)?)
    }

    pub async fn get_by_status(
        &self,
        status: EmployeeStatus,
    ) -> Result<Vec<Employee>, ServiceError> {
        let query = Query::new().eq("status", status.to_string());
        decode_all(ENTITY, self.store.select(EMPLOYEES, &query)?)
    }
}

// Shared by create and update; update re-validates the merged entity so a
// patch cannot blank a required field.
fn validate(
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    role: &str,
    department: &str,
) -> Result<(), ServiceError> {
    if first_name.trim().is_empty() {
        return Err(ServiceError::validation("First name is required"));
    }
    if last_name.trim().is_empty() {
        return Err(ServiceError::validation("Last name is required"));
    }
    if email.trim().is_empty() {
        return Err(ServiceError::validation("Email is required"));
    }
    if !email_is_plausible(email) {
        return Err(ServiceError::validation("Email is invalid"));
    }
    if phone.trim().is_empty() {
        return Err(ServiceError::validation("Phone is required"));
    }
    if role.trim().is_empty() {
        return Err(ServiceError::validation("Role is required"));
    }
    if department.trim().is_empty() {
        return Err(ServiceError::validation("Department is required"));
    }
    Ok(())
}

/// Same shape the submission form checks: non-blank local part, `@`, and a
/// dotted domain.
fn email_is_plausible(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
