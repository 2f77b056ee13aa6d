use crate::error::ServiceError;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, NewAttendanceRecord};
use crate::model::location::GeoPoint;
use crate::service::{decode, decode_all, merge_preview};
use crate::store::{ATTENDANCE, EMPLOYEES, Query, RecordStore};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde_json::{Value, json};
use std::sync::Arc;

const ENTITY: &str = "Attendance record";

#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<RecordStore>,
}

impl AttendanceService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<AttendanceRecord>, ServiceError> {
        decode_all(ENTITY, self.store.select(ATTENDANCE, &Query::new())?)
    }

    pub async fn get_by_id(&self, id: u64) -> Result<AttendanceRecord, ServiceError> {
        let record = self
            .store
            .get(ATTENDANCE, id)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        decode(ENTITY, record)
    }

    pub async fn get_by_employee_id(
        &self,
        employee_id: u64,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let query = Query::new().eq("employeeId", employee_id);
        decode_all(ENTITY, self.store.select(ATTENDANCE, &query)?)
    }

    pub async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let query = Query::new().eq("date", date.to_string());
        decode_all(ENTITY, self.store.select(ATTENDANCE, &query)?)
    }

    /// Records with `start <= date <= end`; dates order lexicographically in
    /// their ISO form.
    pub async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let query = Query::new()
            .gte("date", start.to_string())
            .lte("date", end.to_string());
        decode_all(ENTITY, self.store.select(ATTENDANCE, &query)?)
    }

    /// Record a day directly, outside the clock flow. Used for absent and
    /// leave markers and for manual corrections.
    pub async fn create(&self, new: NewAttendanceRecord) -> Result<AttendanceRecord, ServiceError> {
        self.require_employee(new.employee_id)?;
        let record = serde_json::to_value(&new)
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        decode(ENTITY, self.store.insert(ATTENDANCE, record)?)
    }

    /// Records within one calendar month, matched on the ISO date prefix.
    pub async fn get_by_month(
        &self,
        employee_id: Option<u64>,
        year: i32,
        month: u32,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let prefix = format!("{year:04}-{month:02}-");
        let mut query = Query::new().starts_with("date", &prefix);
        if let Some(employee_id) = employee_id {
            query = query.eq("employeeId", employee_id);
        }
        decode_all(ENTITY, self.store.select(ATTENDANCE, &query)?)
    }

    pub async fn update(&self, id: u64, patch: Value) -> Result<AttendanceRecord, ServiceError> {
        let current = self
            .store
            .get(ATTENDANCE, id)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        let merged = merge_preview(current, &patch)?;
        let record: AttendanceRecord = serde_json::from_value(merged)
            .map_err(|e| ServiceError::validation(format!("Invalid attendance update: {e}")))?;

        self.store
            .update(ATTENDANCE, id, patch)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        Ok(record)
    }

    pub async fn delete(&self, id: u64) -> Result<AttendanceRecord, ServiceError> {
        let removed = self
            .store
            .delete(ATTENDANCE, id)?
            .ok_or(ServiceError::not_found(ENTITY))?;
        decode(ENTITY, removed)
    }

    /// Open a session for today. Fails with `AlreadyCheckedIn` when an open
    /// session already exists for (employee, today); any other same-day
    /// record that never reached checkout (absent/leave markers, records
    /// without a check-in) is treated as stale and discarded first.
    pub async fn check_in(
        &self,
        employee_id: u64,
        location: Option<GeoPoint>,
    ) -> Result<AttendanceRecord, ServiceError> {
        self.check_in_at(employee_id, location, Local::now().naive_local())
            .await
    }

    /// Close today's open session. Fails with `NoActiveCheckIn` when there
    /// is none. Hours worked are derived from today's date combined with
    /// both stored times and rounded to 2 decimal places.
    pub async fn check_out(
        &self,
        employee_id: u64,
        location: Option<GeoPoint>,
    ) -> Result<AttendanceRecord, ServiceError> {
        self.check_out_at(employee_id, location, Local::now().naive_local())
            .await
    }

    pub(crate) async fn check_in_at(
        &self,
        employee_id: u64,
        location: Option<GeoPoint>,
        now: NaiveDateTime,
    ) -> Result<AttendanceRecord, ServiceError> {
        self.require_employee(employee_id)?;

        let date = now.date();
        let todays = self.records_for(employee_id, date).await?;
        if todays.iter().any(AttendanceRecord::is_open_session) {
            return Err(ServiceError::AlreadyCheckedIn);
        }
        for stale in todays.iter().filter(|r| r.check_out_time.is_none()) {
            self.store.delete(ATTENDANCE, stale.id)?;
        }

        let record = json!({
            "employeeId": employee_id,
            "date": date.to_string(),
            "checkInTime": truncated_time(now),
            "checkInLocation": location,
            "status": AttendanceStatus::Present,
        });
        decode(ENTITY, self.store.insert(ATTENDANCE, record)?)
    }

    pub(crate) async fn check_out_at(
        &self,
        employee_id: u64,
        location: Option<GeoPoint>,
        now: NaiveDateTime,
    ) -> Result<AttendanceRecord, ServiceError> {
        self.require_employee(employee_id)?;

        let date = now.date();
        let open = self
            .records_for(employee_id, date)
            .await?
            .into_iter()
            .find(AttendanceRecord::is_open_session)
            .ok_or(ServiceError::NoActiveCheckIn)?;

        // Open session, so check_in_time is present.
        let check_in_time = open.check_in_time.ok_or(ServiceError::NoActiveCheckIn)?;
        let check_out_time = truncated_time(now);

        // Both timestamps take today's date; a session that actually spans
        // midnight computes a wrong (negative) duration.
        let worked = date.and_time(check_out_time) - date.and_time(check_in_time);
        let hours_worked = round2(worked.num_seconds() as f64 / 3600.0);

        self.update(
            open.id,
            json!({
                "checkOutTime": check_out_time,
                "checkOutLocation": location,
                "hoursWorked": hours_worked,
            }),
        )
        .await
    }

    async fn records_for(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let query = Query::new()
            .eq("employeeId", employee_id)
            .eq("date", date.to_string());
        decode_all(ENTITY, self.store.select(ATTENDANCE, &query)?)
    }

    // References are value-matched; reject writes against employees that do
    // not exist rather than accumulating orphan records.
    fn require_employee(&self, employee_id: u64) -> Result<(), ServiceError> {
        self.store
            .get(EMPLOYEES, employee_id)?
            .map(|_| ())
            .ok_or(ServiceError::not_found("Employee"))
    }
}

fn truncated_time(now: NaiveDateTime) -> chrono::NaiveTime {
    now.time().with_nanosecond(0).unwrap_or_else(|| now.time())
}

fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
