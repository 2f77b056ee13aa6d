//! Demo data for the in-memory backend, mirroring the sample records the
//! application ships with so the dashboard and reports have something to
//! show on a fresh start.

use crate::error::ServiceError;
use crate::store::{ATTENDANCE, DEPARTMENTS, EMPLOYEES, RecordStore};
use chrono::{Datelike, Duration, Local, Weekday};
use serde_json::json;

pub fn load_demo_data(store: &RecordStore) -> Result<(), ServiceError> {
    for (name, manager_id) in [
        ("Engineering", Some(1)),
        ("Sales", Some(4)),
        ("Human Resources", Some(6)),
        ("Marketing", None),
    ] {
        store.insert(
            DEPARTMENTS,
            json!({ "name": name, "managerId": manager_id }),
        )?;
    }

    let employees = [
        ("Sarah", "Chen", "sarah.chen@teamcore.io", "+1-555-0101", "Engineering Manager", "Engineering", "2021-03-15", "Active"),
        ("Marcus", "Webb", "marcus.webb@teamcore.io", "+1-555-0102", "Software Engineer", "Engineering", "2022-07-01", "Active"),
        ("Priya", "Patel", "priya.patel@teamcore.io", "+1-555-0103", "Software Engineer", "Engineering", "2023-01-09", "On Leave"),
        ("Diego", "Ramos", "diego.ramos@teamcore.io", "+1-555-0104", "Sales Manager", "Sales", "2020-11-02", "Active"),
        ("Emma", "Fischer", "emma.fischer@teamcore.io", "+1-555-0105", "Sales Rep", "Sales", "2023-05-22", "Active"),
        ("Olu", "Adeyemi", "olu.adeyemi@teamcore.io", "+1-555-0106", "HR Specialist", "Human Resources", "2022-02-14", "Active"),
        ("Nina", "Kovacs", "nina.kovacs@teamcore.io", "+1-555-0107", "Marketing Coordinator", "Marketing", "2024-08-01", "Active"),
        ("Tom", "Berger", "tom.berger@teamcore.io", "+1-555-0108", "Sales Rep", "Sales", "2021-09-13", "Terminated"),
    ];
    for (first, last, email, phone, role, department, start, status) in employees {
        store.insert(
            EMPLOYEES,
            json!({
                "firstName": first,
                "lastName": last,
                "email": email,
                "phone": phone,
                "role": role,
                "department": department,
                "startDate": start,
                "status": status,
            }),
        )?;
    }

    // Two weeks of weekday attendance for the non-terminated staff, with a
    // sprinkling of absences and leave days.
    let today = Local::now().date_naive();
    for days_back in (0..14).rev() {
        let date = today - Duration::days(days_back);
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        for employee_id in 1..=7u64 {
            let status = match (days_back as u64 + employee_id) % 9 {
                0 => "Absent",
                4 => "Leave",
                _ => "Present",
            };
            let record = if status == "Present" {
                let check_in = format!("08:{:02}:00", 45 + employee_id);
                let check_out = format!("17:{:02}:00", 10 + employee_id);
                json!({
                    "employeeId": employee_id,
                    "date": date.to_string(),
                    "checkInTime": check_in,
                    "checkOutTime": check_out,
                    "status": status,
                    "hoursWorked": 8.42,
                })
            } else {
                json!({
                    "employeeId": employee_id,
                    "date": date.to_string(),
                    "status": status,
                })
            };
            store.insert(ATTENDANCE, record)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Query;

    #[test]
    fn demo_data_populates_every_collection() {
        let store = RecordStore::new();
        load_demo_data(&store).unwrap();

        assert_eq!(store.select(DEPARTMENTS, &Query::new()).unwrap().len(), 4);
        assert_eq!(store.select(EMPLOYEES, &Query::new()).unwrap().len(), 8);
        assert!(!store.select(ATTENDANCE, &Query::new()).unwrap().is_empty());
    }
}
