use crate::error::ServiceError;
use crate::model::department::{Department, DepartmentWithCount, NewDepartment};
use crate::service::{decode, decode_all, merge_preview};
use crate::store::{DEPARTMENTS, EMPLOYEES, Query, RecordStore};
use serde_json::Value;
use std::sync::Arc;

const ENTITY: &str = "Department";

#[derive(Clone)]
pub struct DepartmentService {
    store: Arc<RecordStore>,
}

impl DepartmentService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Department>, ServiceError> {
        decode_all(ENTITY, self.store.select(DEPARTMENTS, &Query::new())?)
    }

    /// Departments with their employee count, computed from the employees
    /// collection on every read rather than stored denormalized.
    pub async fn get_all_with_counts(&self) -> Result<Vec<DepartmentWithCount>, ServiceError> {
        let departments = self.get_all().await?;
        departments
            .into_iter()
            .map(|d| {
                let count = self.employee_count(&d.name)?;
                Ok(DepartmentWithCount::new(d, count))
            })
            .collect()
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Department, ServiceError> {
        let record = self
            .store
            .get(DEPARTMENTS, id)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        decode(ENTITY, record)
    }

    pub async fn get_by_id_with_count(&self, id: u64) -> Result<DepartmentWithCount, ServiceError> {
        let department = self.get_by_id(id).await?;
        let count = self.employee_count(&department.name)?;
        Ok(DepartmentWithCount::new(department, count))
    }

    pub async fn create(&self, new: NewDepartment) -> Result<Department, ServiceError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Department name is required"));
        }
        if self.name_taken(name, None)? {
            return Err(ServiceError::validation(format!(
                "A department named '{name}' already exists"
            )));
        }

        let record = serde_json::to_value(&NewDepartment {
            name: name.to_string(),
            manager_id: new.manager_id,
        })
        .map_err(|e| ServiceError::validation(e.to_string()))?;
        decode(ENTITY, self.store.insert(DEPARTMENTS, record)?)
    }

    pub async fn update(&self, id: u64, patch: Value) -> Result<Department, ServiceError> {
        let current = self
            .store
            .get(DEPARTMENTS, id)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        let merged = merge_preview(current, &patch)?;
        let mut department: Department = serde_json::from_value(merged)
            .map_err(|e| ServiceError::validation(format!("Invalid department update: {e}")))?;

        // Names are stored trimmed; the uniqueness check must see the same
        // form create persists.
        let name = department.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::validation("Department name is required"));
        }
        if self.name_taken(&name, Some(id))? {
            return Err(ServiceError::validation(format!(
                "A department named '{name}' already exists"
            )));
        }
        department.name = name.clone();

        let mut patch = patch;
        if let Some(obj) = patch.as_object_mut() {
            if obj.contains_key("name") {
                obj.insert("name".to_string(), Value::String(name));
            }
        }
        self.store
            .update(DEPARTMENTS, id, patch)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        Ok(department)
    }

    /// Delete is refused while any employee still references the department
    /// by name; relationships are value-matched, so a dangling name would
    /// orphan those employees silently.
    pub async fn delete(&self, id: u64) -> Result<Department, ServiceError> {
        let department = self.get_by_id(id).await?;
        if self.employee_count(&department.name)? > 0 {
            return Err(ServiceError::validation(
                "Cannot delete department with existing employees. \
                 Please reassign employees first.",
            ));
        }

        let removed = self
            .store
            .delete(DEPARTMENTS, id)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        decode(ENTITY, removed)
    }

    fn employee_count(&self, name: &str) -> Result<usize, ServiceError> {
        let query = Query::new().eq("department", name).fields(&["Id"]);
        Ok(self.store.select(EMPLOYEES, &query)?.len())
    }

    fn name_taken(&self, name: &str, except_id: Option<u64>) -> Result<bool, ServiceError> {
        let existing = self
            .store
            .select(DEPARTMENTS, &Query::new().eq("name", name))?;
        Ok(existing
            .iter()
            .any(|r| crate::store::record_id(r) != except_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::{EmployeeStatus, NewEmployee};
    use crate::service::EmployeeService;
    use chrono::NaiveDate;
    use serde_json::json;

    fn services() -> (DepartmentService, EmployeeService) {
        let store = Arc::new(RecordStore::new());
        (
            DepartmentService::new(store.clone()),
            EmployeeService::new(store),
        )
    }

    async fn add_employee(employees: &EmployeeService, department: &str) {
        employees
            .create(NewEmployee {
                first_name: "Ann".to_string(),
                last_name: "Tester".to_string(),
                email: "ann@teamcore.io".to_string(),
                phone: "+1-555-0000".to_string(),
                role: "Engineer".to_string(),
                department: department.to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                status: EmployeeStatus::Active,
                profile_photo: None,
            })
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn employee_count_is_computed_on_read() {
        let (departments, employees) = services();
        departments
            .create(NewDepartment {
                name: "Engineering".to_string(),
                manager_id: None,
            })
            .await
            .unwrap();

        let before = departments.get_all_with_counts().await.unwrap();
        assert_eq!(before[0].employee_count, 0);

        add_employee(&employees, "Engineering").await;
        let after = departments.get_all_with_counts().await.unwrap();
        assert_eq!(after[0].employee_count, 1);
    }

    #[actix_web::test]
    async fn delete_is_refused_while_employees_reference_the_department() {
        let (departments, employees) = services();
        let dept = departments
            .create(NewDepartment {
                name: "Engineering".to_string(),
                manager_id: None,
            })
            .await
            .unwrap();
        add_employee(&employees, "Engineering").await;

        assert!(matches!(
            departments.delete(dept.id).await,
            Err(ServiceError::Validation(_))
        ));

        employees.delete(1).await.unwrap();
        let removed = departments.delete(dept.id).await.unwrap();
        assert_eq!(removed.name, "Engineering");
    }

    #[actix_web::test]
    async fn duplicate_names_are_rejected() {
        let (departments, _) = services();
        departments
            .create(NewDepartment {
                name: "Sales".to_string(),
                manager_id: None,
            })
            .await
            .unwrap();

        assert!(matches!(
            departments
                .create(NewDepartment {
                    name: "Sales".to_string(),
                    manager_id: None,
                })
                .await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[actix_web::test]
    async fn update_trims_the_name_and_rechecks_uniqueness() {
        let (departments, _) = services();
        departments
            .create(NewDepartment {
                name: "Sales".to_string(),
                manager_id: None,
            })
            .await
            .unwrap();
        let dept = departments
            .create(NewDepartment {
                name: "Support".to_string(),
                manager_id: None,
            })
            .await
            .unwrap();

        // Whitespace padding must not slip past the duplicate check.
        assert!(matches!(
            departments.update(dept.id, json!({ "name": " Sales " })).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            departments.update(dept.id, json!({ "name": "   " })).await,
            Err(ServiceError::Validation(_))
        ));

        let renamed = departments
            .update(dept.id, json!({ "name": "  Ops  " }))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Ops");
        assert_eq!(departments.get_by_id(dept.id).await.unwrap().name, "Ops");
    }

    #[actix_web::test]
    async fn update_can_keep_its_own_name() {
        let (departments, _) = services();
        let dept = departments
            .create(NewDepartment {
                name: "Sales".to_string(),
                manager_id: None,
            })
            .await
            .unwrap();

        let updated = departments
            .update(dept.id, json!({ "managerId": 7 }))
            .await
            .unwrap();
        assert_eq!(updated.manager_id, Some(7));
        assert_eq!(updated.name, "Sales");
    }
}
