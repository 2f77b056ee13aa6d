use crate::error::ServiceError;
use crate::model::employee::{Employee, EmployeeStatus, NewEmployee};
use crate::service::EmployeeService;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Case-insensitive substring match across name, email, role and department
    pub search: Option<String>,
    /// Filter by exact department name
    pub department: Option<String>,
    /// Filter by status (Active, On Leave, Terminated)
    pub status: Option<String>,
}

/// List employees, optionally filtered
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Matching employees", body = Vec<Employee>),
        (status = 400, description = "Unknown status filter")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    employees: web::Data<EmployeeService>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ServiceError> {
    debug!(?query, "Listing employees");

    let mut result = match query.search.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => employees.search(text).await?,
        _ => employees.get_all().await?,
    };

    if let Some(department) = &query.department {
        result.retain(|e| &e.department == department);
    }
    if let Some(status) = &query.status {
        let status = EmployeeStatus::from_str(status)
            .map_err(|_| ServiceError::validation(format!("Unknown status '{status}'")))?;
        result.retain(|e| e.status == status);
    }

    Ok(HttpResponse::Ok().json(result))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = NewEmployee,
    responses(
        (status = 200, description = "Employee created", body = Employee),
        (status = 400, description = "Required field missing or malformed", body = Object, example = json!({
            "message": "Email is invalid"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    employees: web::Data<EmployeeService>,
    payload: web::Json<NewEmployee>,
) -> Result<HttpResponse, ServiceError> {
    let created = employees.create(payload.into_inner()).await?;
    tracing::info!(employee_id = created.id, "Employee created");
    Ok(HttpResponse::Ok().json(created))
}

/// Get an employee by id
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    employees: web::Data<EmployeeService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    let employee = employees.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Update an employee; supplied fields are merged, the id is immutable
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Invalid update payload"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    employees: web::Data<EmployeeService>,
    path: web::Path<u64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    let updated = employees
        .update(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete an employee; returns the removed record
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    employees: web::Data<EmployeeService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    let id = path.into_inner();
    let removed = employees.delete(id).await?;
    tracing::info!(employee_id = id, "Employee deleted");
    Ok(HttpResponse::Ok().json(removed))
}
