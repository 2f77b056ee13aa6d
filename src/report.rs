//! Aggregation over the full entity collections. Every function here is
//! pure: it reads the slices it is given and returns a fresh value, so
//! recomputing on each request is safe and cheap (linear scans).

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::department::Department;
use crate::model::employee::{Employee, EmployeeStatus};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewReport {
    #[schema(example = 42)]
    pub total_employees: usize,
    pub active_employees: usize,
    pub on_leave: usize,
    pub terminated: usize,
    /// Present records / all records for the current month, percent, 1 dp.
    #[schema(example = 93.5)]
    pub attendance_rate: f64,
    /// Attendance records counted for the current month.
    pub monthly_attendance: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentReport {
    #[serde(rename = "Id")]
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<u64>,
    pub total_employees: usize,
    pub active_employees: usize,
    #[schema(example = 88.2)]
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrendDay {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub present: usize,
    pub absent: usize,
    pub leave: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodaySnapshot {
    pub present: usize,
    pub absent: usize,
    pub on_leave: usize,
    pub total: usize,
    /// Present / total, percent, rounded to the nearest integer.
    #[schema(example = 92)]
    pub attendance_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Weekend,
    Present,
    Absent,
    Leave,
}

/// One cell of the month calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarDay {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: DayStatus,
}

pub fn overview(
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    today: NaiveDate,
) -> OverviewReport {
    let monthly: Vec<&AttendanceRecord> = attendance
        .iter()
        .filter(|r| r.date.year() == today.year() && r.date.month() == today.month())
        .collect();
    let present = monthly
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();

    OverviewReport {
        total_employees: employees.len(),
        active_employees: count_status(employees, EmployeeStatus::Active),
        on_leave: count_status(employees, EmployeeStatus::OnLeave),
        terminated: count_status(employees, EmployeeStatus::Terminated),
        attendance_rate: rate_1dp(present, monthly.len()),
        monthly_attendance: monthly.len(),
    }
}

/// Per-department rollup. Employees match by `department == name`;
/// attendance records count toward a department when their employee
/// resolves into it.
pub fn department_rollup(
    departments: &[Department],
    employees: &[Employee],
    attendance: &[AttendanceRecord],
) -> Vec<DepartmentReport> {
    departments
        .iter()
        .map(|dept| {
            let members: Vec<&Employee> = employees
                .iter()
                .filter(|e| e.department == dept.name)
                .collect();
            let active = members
                .iter()
                .filter(|e| e.status == EmployeeStatus::Active)
                .count();

            let dept_attendance: Vec<&AttendanceRecord> = attendance
                .iter()
                .filter(|r| members.iter().any(|e| e.id == r.employee_id))
                .collect();
            let present = dept_attendance
                .iter()
                .filter(|r| r.status == AttendanceStatus::Present)
                .count();

            DepartmentReport {
                id: dept.id,
                name: dept.name.clone(),
                manager_id: dept.manager_id,
                total_employees: members.len(),
                active_employees: active,
                attendance_rate: rate_1dp(present, dept_attendance.len()),
            }
        })
        .collect()
}

/// Per-day status counts for the last `days` calendar dates including
/// `today`, oldest first. Always returns exactly `days` entries; dates with
/// no records count zero.
pub fn attendance_trend(
    attendance: &[AttendanceRecord],
    today: NaiveDate,
    days: u32,
) -> Vec<TrendDay> {
    (0..days as i64)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let on_day: Vec<&AttendanceRecord> =
                attendance.iter().filter(|r| r.date == date).collect();
            TrendDay {
                date,
                present: count_attendance(&on_day, AttendanceStatus::Present),
                absent: count_attendance(&on_day, AttendanceStatus::Absent),
                leave: count_attendance(&on_day, AttendanceStatus::Leave),
                total: on_day.len(),
            }
        })
        .collect()
}

pub fn today_snapshot(attendance: &[AttendanceRecord], today: NaiveDate) -> TodaySnapshot {
    let on_day: Vec<&AttendanceRecord> = attendance.iter().filter(|r| r.date == today).collect();
    let present = count_attendance(&on_day, AttendanceStatus::Present);

    let rate = if on_day.is_empty() {
        0
    } else {
        (present as f64 / on_day.len() as f64 * 100.0).round() as u32
    };

    TodaySnapshot {
        present,
        absent: count_attendance(&on_day, AttendanceStatus::Absent),
        on_leave: count_attendance(&on_day, AttendanceStatus::Leave),
        total: on_day.len(),
        attendance_rate: rate,
    }
}

/// Calendar grid for one month: weekends marked as such, weekdays take the
/// status of the first matching record, defaulting to absent.
pub fn month_calendar(
    attendance: &[AttendanceRecord],
    year: i32,
    month: u32,
) -> Option<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let mut days = Vec::with_capacity(31);
    let mut date = first;
    while date.month() == month {
        let status = if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            DayStatus::Weekend
        } else {
            match attendance.iter().find(|r| r.date == date).map(|r| r.status) {
                Some(AttendanceStatus::Present) => DayStatus::Present,
                Some(AttendanceStatus::Leave) => DayStatus::Leave,
                Some(AttendanceStatus::Absent) | None => DayStatus::Absent,
            }
        };
        days.push(CalendarDay { date, status });
        // succ_opt runs out at chrono's maximum date; stop instead of panicking.
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    Some(days)
}

fn count_status(employees: &[Employee], status: EmployeeStatus) -> usize {
    employees.iter().filter(|e| e.status == status).count()
}

fn count_attendance(records: &[&AttendanceRecord], status: AttendanceStatus) -> usize {
    records.iter().filter(|r| r.status == status).count()
}

/// Percent rounded to 1 decimal place; 0.0 when the denominator is 0.
fn rate_1dp(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (numerator as f64 / denominator as f64 * 1000.0).round() / 10.0
}
