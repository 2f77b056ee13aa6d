use crate::config::Config;
use crate::error::ServiceError;
use crate::report;
use crate::service::{AttendanceService, DepartmentService, EmployeeService};
use actix_web::{HttpResponse, web};
use chrono::Local;
use futures::try_join;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct TrendQuery {
    /// Window size in days; defaults to the configured trend window
    #[param(example = 30)]
    pub days: Option<u32>,
}

/// Company-wide overview statistics
#[utoipa::path(
    get,
    path = "/api/v1/reports/overview",
    responses(
        (status = 200, description = "Employee and attendance overview", body = report::OverviewReport)
    ),
    tag = "Reports"
)]
pub async fn overview(
    employees: web::Data<EmployeeService>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, ServiceError> {
    let (employees, attendance) = try_join!(employees.get_all(), attendance.get_all())?;
    let report = report::overview(&employees, &attendance, Local::now().date_naive());
    Ok(HttpResponse::Ok().json(report))
}

/// Per-department rollup
#[utoipa::path(
    get,
    path = "/api/v1/reports/departments",
    responses(
        (status = 200, description = "Rollup per department", body = Vec<report::DepartmentReport>)
    ),
    tag = "Reports"
)]
pub async fn departments(
    departments: web::Data<DepartmentService>,
    employees: web::Data<EmployeeService>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, ServiceError> {
    let (departments, employees, attendance) = try_join!(
        departments.get_all(),
        employees.get_all(),
        attendance.get_all()
    )?;
    let rollup = report::department_rollup(&departments, &employees, &attendance);
    Ok(HttpResponse::Ok().json(rollup))
}

/// Rolling attendance trend, oldest day first
#[utoipa::path(
    get,
    path = "/api/v1/reports/attendance",
    params(TrendQuery),
    responses(
        (status = 200, description = "One entry per day in the window", body = Vec<report::TrendDay>)
    ),
    tag = "Reports"
)]
pub async fn attendance_trend(
    attendance: web::Data<AttendanceService>,
    config: web::Data<Config>,
    query: web::Query<TrendQuery>,
) -> Result<HttpResponse, ServiceError> {
    let days = query.days.unwrap_or(config.trend_days).clamp(1, 365);
    let records = attendance.get_all().await?;
    let trend = report::attendance_trend(&records, Local::now().date_naive(), days);
    Ok(HttpResponse::Ok().json(trend))
}
