use crate::error::{LocationFailure, ServiceError};
use crate::model::attendance::{AttendanceRecord, NewAttendanceRecord};
use crate::model::location::GeoPoint;
use crate::report;
use crate::service::AttendanceService;
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Restrict to one employee
    pub employee_id: Option<u64>,
    /// Records for exactly this date
    #[param(value_type = Option<String>, example = "2026-08-27")]
    pub date: Option<NaiveDate>,
    /// Range start (inclusive); use together with end_date
    #[param(value_type = Option<String>, example = "2026-08-01")]
    pub start_date: Option<NaiveDate>,
    /// Range end (inclusive)
    #[param(value_type = Option<String>, example = "2026-08-31")]
    pub end_date: Option<NaiveDate>,
}

/// Clock payload. Location is a precondition: when the browser could not
/// produce a position the client reports the failure reason instead and the
/// attempt is refused with the matching message.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClockRequest {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    #[schema(example = "permission_denied", nullable = true)]
    pub location_error: Option<LocationFailure>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CalendarQuery {
    /// Restrict to one employee's records
    pub employee_id: Option<u64>,
    #[param(example = 2026)]
    pub year: i32,
    #[param(example = 8)]
    pub month: u32,
}

/// List attendance records, optionally filtered
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Matching attendance records", body = Vec<AttendanceRecord>),
        (status = 400, description = "Half-open date range")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    attendance: web::Data<AttendanceService>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ServiceError> {
    let mut records = match (query.date, query.start_date, query.end_date) {
        (Some(date), _, _) => attendance.get_by_date(date).await?,
        (None, Some(start), Some(end)) => attendance.get_by_date_range(start, end).await?,
        (None, Some(_), None) | (None, None, Some(_)) => {
            return Err(ServiceError::validation(
                "start_date and end_date must be supplied together",
            ));
        }
        (None, None, None) => match query.employee_id {
            Some(employee_id) => attendance.get_by_employee_id(employee_id).await?,
            None => attendance.get_all().await?,
        },
    };
    if let Some(employee_id) = query.employee_id {
        records.retain(|r| r.employee_id == employee_id);
    }

    Ok(HttpResponse::Ok().json(records))
}

/// Record an attendance entry directly, outside the clock flow
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = NewAttendanceRecord,
    responses(
        (status = 200, description = "Record created", body = AttendanceRecord),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn create_attendance_record(
    attendance: web::Data<AttendanceService>,
    payload: web::Json<NewAttendanceRecord>,
) -> Result<HttpResponse, ServiceError> {
    let record = attendance.create(payload.into_inner()).await?;
    tracing::info!(
        employee_id = record.employee_id,
        record_id = record.id,
        "Attendance record created"
    );
    Ok(HttpResponse::Ok().json(record))
}

/// Get an attendance record by id
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{id}",
    params(("id" = u64, Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Record found", body = AttendanceRecord),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance_record(
    attendance: web::Data<AttendanceService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    let record = attendance.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Delete an attendance record; returns the removed record
#[utoipa::path(
    delete,
    path = "/api/v1/attendance/{id}",
    params(("id" = u64, Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Record deleted", body = AttendanceRecord),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance_record(
    attendance: web::Data<AttendanceService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    let removed = attendance.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(removed))
}

/// Check in for today
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Checked in successfully", body = AttendanceRecord),
        (status = 400, description = "Already checked in today, or location unavailable", body = Object, example = json!({
            "message": "Already checked in today"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    attendance: web::Data<AttendanceService>,
    payload: web::Json<ClockRequest>,
) -> Result<HttpResponse, ServiceError> {
    let location = require_location(&payload)?;
    let record = attendance
        .check_in(payload.employee_id, Some(location))
        .await?;
    tracing::info!(employee_id = payload.employee_id, record_id = record.id, "Checked in");
    Ok(HttpResponse::Ok().json(record))
}

/// Check out of today's open session
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-out",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Checked out successfully", body = AttendanceRecord),
        (status = 400, description = "No active check-in found for today, or location unavailable", body = Object, example = json!({
            "message": "No active check-in found for today"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    attendance: web::Data<AttendanceService>,
    payload: web::Json<ClockRequest>,
) -> Result<HttpResponse, ServiceError> {
    let location = require_location(&payload)?;
    let record = attendance
        .check_out(payload.employee_id, Some(location))
        .await?;
    tracing::info!(
        employee_id = payload.employee_id,
        hours_worked = record.hours_worked,
        "Checked out"
    );
    Ok(HttpResponse::Ok().json(record))
}

/// Today's attendance snapshot
#[utoipa::path(
    get,
    path = "/api/v1/attendance/today",
    responses(
        (status = 200, description = "Per-status counts for today", body = report::TodaySnapshot)
    ),
    tag = "Attendance"
)]
pub async fn today(
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, ServiceError> {
    let date = Local::now().date_naive();
    let records = attendance.get_by_date(date).await?;
    Ok(HttpResponse::Ok().json(report::today_snapshot(&records, date)))
}

/// Month calendar grid of per-day statuses
#[utoipa::path(
    get,
    path = "/api/v1/attendance/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "One entry per day of the month", body = Vec<report::CalendarDay>),
        (status = 400, description = "Invalid year or month")
    ),
    tag = "Attendance"
)]
pub async fn calendar(
    attendance: web::Data<AttendanceService>,
    query: web::Query<CalendarQuery>,
) -> Result<HttpResponse, ServiceError> {
    let records = attendance
        .get_by_month(query.employee_id, query.year, query.month)
        .await?;
    let grid = report::month_calendar(&records, query.year, query.month)
        .ok_or_else(|| ServiceError::validation("Invalid year or month"))?;
    Ok(HttpResponse::Ok().json(grid))
}

fn require_location(payload: &ClockRequest) -> Result<GeoPoint, ServiceError> {
    if let Some(reason) = payload.location_error {
        warn!(employee_id = payload.employee_id, %reason, "Clock attempt without location");
        return Err(ServiceError::LocationUnavailable(reason));
    }
    payload
        .location
        .ok_or(ServiceError::LocationUnavailable(
            LocationFailure::PositionUnavailable,
        ))
}
