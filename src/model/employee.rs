use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum EmployeeStatus {
    Active,
    #[serde(rename = "On Leave")]
    #[strum(serialize = "On Leave")]
    OnLeave,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "Id": 1,
        "firstName": "John",
        "lastName": "Doe",
        "email": "john.doe@teamcore.io",
        "phone": "+1-555-0142",
        "role": "Software Engineer",
        "department": "Engineering",
        "startDate": "2024-01-15",
        "status": "Active"
    })
)]
pub struct Employee {
    /// Immutable once assigned by the store.
    #[serde(rename = "Id")]
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "john.doe@teamcore.io", format = "email")]
    pub email: String,

    #[schema(example = "+1-555-0142")]
    pub phone: String,

    #[schema(example = "Software Engineer")]
    pub role: String,

    /// Matches a Department name by value; never a live reference.
    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "Active")]
    pub status: EmployeeStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(nullable = true)]
    pub profile_photo: Option<String>,
}

/// Payload for creating an employee; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "john.doe@teamcore.io", format = "email")]
    pub email: String,
    #[schema(example = "+1-555-0142")]
    pub phone: String,
    #[schema(example = "Software Engineer")]
    pub role: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(nullable = true)]
    pub profile_photo: Option<String>,
}
