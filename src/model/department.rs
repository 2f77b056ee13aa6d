use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(rename = "Id")]
    #[schema(example = 1)]
    pub id: u64,

    /// Unique display key; employees reference it by value.
    #[schema(example = "Engineering")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 3, nullable = true)]
    pub manager_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    #[schema(example = "Engineering")]
    pub name: String,
    #[serde(default)]
    #[schema(example = 3, nullable = true)]
    pub manager_id: Option<u64>,
}

/// Department as served by the API: the stored record plus the employee
/// count computed on read (never stored denormalized).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentWithCount {
    #[serde(rename = "Id")]
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<u64>,
    #[schema(example = 12)]
    pub employee_count: usize,
}

impl DepartmentWithCount {
    pub fn new(department: Department, employee_count: usize) -> Self {
        Self {
            id: department.id,
            name: department.name,
            manager_id: department.manager_id,
            employee_count,
        }
    }
}
