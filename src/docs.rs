use crate::api::attendance::ClockRequest;
use crate::api::employee::EmployeeQuery;
use crate::error::LocationFailure;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, NewAttendanceRecord};
use crate::model::department::{Department, DepartmentWithCount, NewDepartment};
use crate::model::employee::{Employee, EmployeeStatus, NewEmployee};
use crate::model::location::GeoPoint;
use crate::report::{
    CalendarDay, DayStatus, DepartmentReport, OverviewReport, TodaySnapshot, TrendDay,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TeamCore API",
        version = "1.0.0",
        description = r#"
## TeamCore Employee Management

This API powers **TeamCore**, an employee-management system covering the
employee directory, departments, attendance tracking and reporting.

### Key Features
- **Employee Directory**
  - Create, update, list, search and view employee profiles
- **Departments**
  - Organize the team into departments with computed headcounts
- **Attendance**
  - Daily check-in/check-out with location capture, month calendar,
    today's snapshot
- **Reports**
  - Company overview, per-department rollups, rolling attendance trend

### Response Format
- JSON-based RESTful responses
- Errors carry a `message` field

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::department::list_departments,
        crate::api::department::create_department,
        crate::api::department::get_department,
        crate::api::department::update_department,
        crate::api::department::delete_department,

        crate::api::attendance::list_attendance,
        crate::api::attendance::create_attendance_record,
        crate::api::attendance::get_attendance_record,
        crate::api::attendance::delete_attendance_record,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::today,
        crate::api::attendance::calendar,

        crate::api::report::overview,
        crate::api::report::departments,
        crate::api::report::attendance_trend,
    ),
    components(
        schemas(
            Employee,
            NewEmployee,
            EmployeeStatus,
            EmployeeQuery,
            Department,
            NewDepartment,
            DepartmentWithCount,
            AttendanceRecord,
            NewAttendanceRecord,
            AttendanceStatus,
            ClockRequest,
            GeoPoint,
            LocationFailure,
            OverviewReport,
            DepartmentReport,
            TrendDay,
            TodaySnapshot,
            CalendarDay,
            DayStatus
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Department", description = "Department management APIs"),
        (name = "Attendance", description = "Attendance and time-clock APIs"),
        (name = "Reports", description = "Aggregated reporting APIs"),
    )
)]
pub struct ApiDoc;
