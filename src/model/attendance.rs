use crate::model::location::GeoPoint;
use chrono::{NaiveDate, NaiveTime};
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
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "Id": 7,
        "employeeId": 1,
        "date": "2026-08-27",
        "checkInTime": "09:00:00",
        "checkOutTime": "17:30:00",
        "status": "Present",
        "hoursWorked": 8.5
    })
)]
pub struct AttendanceRecord {
    #[serde(rename = "Id")]
    pub id: u64,

    pub employee_id: u64,

    /// One record is intended per (employee, date).
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,

    /// Wall-clock local time-of-day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "09:00:00")]
    pub check_in_time: Option<NaiveTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "17:30:00")]
    pub check_out_time: Option<NaiveTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_location: Option<GeoPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_location: Option<GeoPoint>,

    pub status: AttendanceStatus,

    /// Set at checkout, rounded to 2 decimal places.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 8.5)]
    pub hours_worked: Option<f64>,
}

impl AttendanceRecord {
    /// An open session: checked in, not yet checked out.
    pub fn is_open_session(&self) -> bool {
        self.check_in_time.is_some() && self.check_out_time.is_none()
    }
}

/// Payload for recording a day directly, outside the clock flow — absent or
/// leave markers, or manual corrections.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendanceRecord {
    pub employee_id: u64,

    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "09:00:00")]
    pub check_in_time: Option<NaiveTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "17:30:00")]
    pub check_out_time: Option<NaiveTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_location: Option<GeoPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_location: Option<GeoPoint>,

    pub status: AttendanceStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_worked: Option<f64>,
}
