pub mod attendance;
pub mod department;
pub mod employee;
pub mod report;

#[cfg(test)]
mod tests {
    use crate::config::{Config, StoreBackend};
    use crate::routes;
    use crate::service::{AttendanceService, DepartmentService, EmployeeService};
    use crate::store::RecordStore;
    use actix_web::{App, test, web::Data};
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use std::sync::Arc;

    fn test_config() -> Config {
        Config {
            server_addr: "127.0.0.1:0".to_string(),
            api_prefix: "/api/v1".to_string(),
            store_backend: StoreBackend::Mock,
            project_id: None,
            public_key: None,
            seed_demo_data: false,
            trend_days: 30,
            rate_api_per_min: 1000,
            rate_clock_per_min: 60,
        }
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:34567".parse().unwrap()
    }

    macro_rules! test_app {
        () => {{
            let store = Arc::new(RecordStore::new());
            let config = test_config();
            let config_data = config.clone();
            test::init_service(
                App::new()
                    .app_data(Data::new(EmployeeService::new(store.clone())))
                    .app_data(Data::new(DepartmentService::new(store.clone())))
                    .app_data(Data::new(AttendanceService::new(store.clone())))
                    .app_data(Data::new(config))
                    .configure(move |cfg| routes::configure(cfg, config_data.clone())),
            )
            .await
        }};
    }

    fn sample_employee() -> Value {
        json!({
            "firstName": "Ann",
            "lastName": "Tester",
            "email": "ann@teamcore.io",
            "phone": "+1-555-0000",
            "role": "Engineer",
            "department": "Engineering",
            "startDate": "2024-01-15",
            "status": "Active"
        })
    }

    #[actix_web::test]
    async fn employee_crud_round_trip() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/employees")
            .peer_addr(peer())
            .set_json(sample_employee())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["Id"], 1);
        assert_eq!(created["firstName"], "Ann");

        let req = test::TestRequest::get()
            .uri("/api/v1/employees/1")
            .peer_addr(peer())
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);

        let req = test::TestRequest::put()
            .uri("/api/v1/employees/1")
            .peer_addr(peer())
            .set_json(json!({ "role": "Senior Engineer" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["role"], "Senior Engineer");

        let req = test::TestRequest::delete()
            .uri("/api/v1/employees/1")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get()
            .uri("/api/v1/employees/1")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Employee not found");
    }

    #[actix_web::test]
    async fn check_in_requires_a_location() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/employees")
            .peer_addr(peer())
            .set_json(sample_employee())
            .to_request();
        let _: Value = test::call_and_read_body_json(&app, req).await;

        // Client reports a geolocation failure: refused with its message.
        let req = test::TestRequest::post()
            .uri("/api/v1/attendance/check-in")
            .peer_addr(peer())
            .set_json(json!({ "employeeId": 1, "locationError": "permission_denied" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Location access denied by user");

        // No coordinates and no reason behaves as position unavailable.
        let req = test::TestRequest::post()
            .uri("/api/v1/attendance/check-in")
            .peer_addr(peer())
            .set_json(json!({ "employeeId": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Location information unavailable");
    }

    #[actix_web::test]
    async fn double_check_in_is_rejected() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/employees")
            .peer_addr(peer())
            .set_json(sample_employee())
            .to_request();
        let _: Value = test::call_and_read_body_json(&app, req).await;

        let clock = json!({
            "employeeId": 1,
            "location": { "latitude": 23.8103, "longitude": 90.4125, "accuracy": 10.0 }
        });

        let req = test::TestRequest::post()
            .uri("/api/v1/attendance/check-in")
            .peer_addr(peer())
            .set_json(clock.clone())
            .to_request();
        let record: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(record["status"], "Present");
        assert_eq!(record["checkInLocation"]["latitude"], 23.8103);

        let req = test::TestRequest::post()
            .uri("/api/v1/attendance/check-in")
            .peer_addr(peer())
            .set_json(clock)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Already checked in today");
    }

    #[actix_web::test]
    async fn absence_marker_posts_directly() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/employees")
            .peer_addr(peer())
            .set_json(sample_employee())
            .to_request();
        let _: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/attendance")
            .peer_addr(peer())
            .set_json(json!({ "employeeId": 1, "date": "2026-08-27", "status": "Absent" }))
            .to_request();
        let record: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(record["Id"], 1);
        assert_eq!(record["status"], "Absent");

        let req = test::TestRequest::get()
            .uri("/api/v1/attendance?date=2026-08-27")
            .peer_addr(peer())
            .to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn half_open_date_range_is_rejected() {
        let app = test_app!();

        for uri in [
            "/api/v1/attendance?start_date=2026-08-01",
            "/api/v1/attendance?end_date=2026-08-31",
        ] {
            let req = test::TestRequest::get()
                .uri(uri)
                .peer_addr(peer())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(
                body["message"],
                "start_date and end_date must be supplied together"
            );
        }
    }

    #[actix_web::test]
    async fn overview_report_handles_an_empty_store() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/reports/overview")
            .peer_addr(peer())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["totalEmployees"], 0);
        assert_eq!(body["attendanceRate"], 0.0);
    }

    #[actix_web::test]
    async fn trend_window_defaults_to_configured_days() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/reports/attendance")
            .peer_addr(peer())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 30);

        let req = test::TestRequest::get()
            .uri("/api/v1/reports/attendance?days=7")
            .peer_addr(peer())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 7);
    }

    #[actix_web::test]
    async fn unknown_status_filter_is_a_validation_error() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/employees?status=Retired")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn department_delete_guard_surfaces_over_http() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/departments")
            .peer_addr(peer())
            .set_json(json!({ "name": "Engineering" }))
            .to_request();
        let dept: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(dept["Id"], 1);

        let req = test::TestRequest::post()
            .uri("/api/v1/employees")
            .peer_addr(peer())
            .set_json(sample_employee())
            .to_request();
        let _: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::delete()
            .uri("/api/v1/departments/1")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        // Department list shows the computed headcount.
        let req = test::TestRequest::get()
            .uri("/api/v1/departments")
            .peer_addr(peer())
            .to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list[0]["employeeCount"], 1);
    }
}
