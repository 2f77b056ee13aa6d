use crate::error::ServiceError;
use crate::model::department::{Department, DepartmentWithCount, NewDepartment};
use crate::service::DepartmentService;
use actix_web::{HttpResponse, web};
use serde_json::Value;

/// List departments with computed employee counts
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    responses(
        (status = 200, description = "All departments", body = Vec<DepartmentWithCount>)
    ),
    tag = "Department"
)]
pub async fn list_departments(
    departments: web::Data<DepartmentService>,
) -> Result<HttpResponse, ServiceError> {
    let all = departments.get_all_with_counts().await?;
    Ok(HttpResponse::Ok().json(all))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/api/v1/departments",
    request_body = NewDepartment,
    responses(
        (status = 200, description = "Department created", body = Department),
        (status = 400, description = "Name missing or already taken", body = Object, example = json!({
            "message": "Department name is required"
        }))
    ),
    tag = "Department"
)]
pub async fn create_department(
    departments: web::Data<DepartmentService>,
    payload: web::Json<NewDepartment>,
) -> Result<HttpResponse, ServiceError> {
    let created = departments.create(payload.into_inner()).await?;
    tracing::info!(department_id = created.id, name = %created.name, "Department created");
    Ok(HttpResponse::Ok().json(created))
}

/// Get a department by id, with its computed employee count
#[utoipa::path(
    get,
    path = "/api/v1/departments/{id}",
    params(("id" = u64, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department found", body = DepartmentWithCount),
        (status = 404, description = "Department not found")
    ),
    tag = "Department"
)]
pub async fn get_department(
    departments: web::Data<DepartmentService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    let department = departments.get_by_id_with_count(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(department))
}

/// Update a department; supplied fields are merged, the id is immutable
#[utoipa::path(
    put,
    path = "/api/v1/departments/{id}",
    params(("id" = u64, Path, description = "Department ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 400, description = "Invalid update payload"),
        (status = 404, description = "Department not found")
    ),
    tag = "Department"
)]
pub async fn update_department(
    departments: web::Data<DepartmentService>,
    path: web::Path<u64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    let updated = departments
        .update(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete a department; refused while employees still reference it
#[utoipa::path(
    delete,
    path = "/api/v1/departments/{id}",
    params(("id" = u64, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department deleted", body = Department),
        (status = 400, description = "Employees still assigned", body = Object, example = json!({
            "message": "Cannot delete department with existing employees. Please reassign employees first."
        })),
        (status = 404, description = "Department not found")
    ),
    tag = "Department"
)]
pub async fn delete_department(
    departments: web::Data<DepartmentService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    let id = path.into_inner();
    let removed = departments.delete(id).await?;
    tracing::info!(department_id = id, name = %removed.name, "Department deleted");
    Ok(HttpResponse::Ok().json(removed))
}
