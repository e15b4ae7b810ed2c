use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use transit_fleet::config::EnvironmentConfig;
use transit_fleet::repositories::{FleetStorage, MemoryFleetRepository};
use transit_fleet::{create_app_router, AppState};

struct TestApp {
    router: Router,
    repo: MemoryFleetRepository,
}

impl TestApp {
    fn new() -> Self {
        let repo = MemoryFleetRepository::new();
        let state = AppState::new(Arc::new(repo.clone()), EnvironmentConfig::default());
        Self {
            router: create_app_router(state),
            repo,
        }
    }

    async fn send(&self, method: &str, uri: &str, user: Option<(&str, bool)>, body: Option<Vec<u8>>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((user_id, is_staff)) = user {
            builder = builder
                .header("x-user-id", user_id)
                .header("x-user-staff", if is_staff { "true" } else { "false" });
        }
        let body = match body {
            Some(bytes) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, Some(("1", false)), None).await
    }

    async fn post_json(&self, uri: &str, staff: bool, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(("1", staff)), Some(serde_json::to_vec(&body).unwrap()))
            .await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, Some(("1", false)), None).await
    }

    async fn seed_vehicle(&self, vehicle_id: &str, vehicle_type: &str, capacity: u32) {
        let (status, _) = self
            .post_json(
                "/api/vehicles",
                false,
                json!({
                    "vehicle_id": vehicle_id,
                    "vehicle_type": vehicle_type,
                    "capacity": capacity,
                    "last_maintenance": "2024-01-01"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    async fn seed_route(&self, route_number: &str) {
        let (status, _) = self
            .post_json(
                "/api/routes",
                false,
                json!({"route_number": route_number, "start_point": "Center", "end_point": "Airport"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    async fn seed_assignment(&self, vehicle_id: &str, route_number: &str, start: &str, end: &str) -> (StatusCode, Value) {
        self.post_json(
            "/api/assignments",
            false,
            json!({
                "vehicle_id": vehicle_id,
                "route_number": route_number,
                "driver_name": "Ana",
                "start_time": start,
                "end_time": end
            }),
        )
        .await
    }
}

fn maintenance_body() -> Value {
    json!({
        "maintenance_date": "2024-06-01",
        "description": "test maintenance",
        "cost": "100.00"
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_identity_is_401() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/api/vehicles", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication credentials were not provided.");
}

#[tokio::test]
async fn test_staff_records_maintenance() {
    let app = TestApp::new();
    app.seed_vehicle("V1", "BUS", 60).await;

    let (status, body) = app
        .post_json("/api/vehicles/V1/maintenance", true, maintenance_body())
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Maintenance log added successfully.");
    assert_eq!(app.repo.maintenance_log_count().await, 1);

    let (status, vehicle) = app.get("/api/vehicles/V1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vehicle["last_maintenance"], "2024-06-01");

    let (status, history) = app.get("/api/vehicles/V1/maintenance").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["logs"].as_array().unwrap().len(), 1);
    assert_eq!(history["logs"][0]["description"], "test maintenance");
    assert_eq!(history["total_cost"], "100.00");
}

#[tokio::test]
async fn test_non_staff_cannot_record_maintenance() {
    let app = TestApp::new();
    app.seed_vehicle("V1", "BUS", 60).await;

    let (status, body) = app
        .post_json("/api/vehicles/V1/maintenance", false, maintenance_body())
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You do not have permission to perform this action.");
    assert_eq!(app.repo.maintenance_log_count().await, 0);

    let vehicle = app.repo.get_vehicle("V1").await.unwrap().unwrap();
    assert_eq!(vehicle.last_maintenance.to_string(), "2024-01-01");
}

#[tokio::test]
async fn test_maintenance_for_unknown_vehicle_is_404() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json("/api/vehicles/NOPE/maintenance", true, maintenance_body())
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("NOPE"));
}

#[tokio::test]
async fn test_maintenance_payload_errors_are_400() {
    let app = TestApp::new();
    app.seed_vehicle("V1", "BUS", 60).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/vehicles/V1/maintenance",
            Some(("1", true)),
            Some(b"not json".to_vec()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON");

    let (status, body) = app
        .post_json(
            "/api/vehicles/V1/maintenance",
            true,
            json!({"maintenance_date": "2024-06-01", "description": "x"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: 'cost'");

    let (status, body) = app
        .post_json(
            "/api/vehicles/V1/maintenance",
            true,
            json!({"maintenance_date": "2024-06-01", "description": "x", "cost": "-5.00"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Ensure this value is greater than or equal to 0.");

    assert_eq!(app.repo.maintenance_log_count().await, 0);
}

#[tokio::test]
async fn test_vehicle_capacity_rule() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/vehicles",
            false,
            json!({
                "vehicle_id": "V1",
                "vehicle_type": "BUS",
                "capacity": 101,
                "last_maintenance": "2024-01-01"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Buses cannot have a capacity greater than 100.");

    app.seed_vehicle("T1", "TRAM", 250).await;
    app.seed_vehicle("S1", "SUBWAY", 1200).await;

    let (status, body) = app
        .send(
            "PUT",
            "/api/vehicles/T1",
            Some(("1", false)),
            Some(serde_json::to_vec(&json!({"capacity": 251})).unwrap()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Trams cannot have a capacity greater than 250.");

    let vehicle = app.repo.get_vehicle("T1").await.unwrap().unwrap();
    assert_eq!(vehicle.capacity, 250);
}

#[tokio::test]
async fn test_duplicate_vehicle_is_409() {
    let app = TestApp::new();
    app.seed_vehicle("V1", "BUS", 60).await;

    let (status, _) = app
        .post_json(
            "/api/vehicles",
            false,
            json!({
                "vehicle_id": "V1",
                "vehicle_type": "TRAM",
                "capacity": 80,
                "last_maintenance": "2024-01-01"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_assignment_rules() {
    let app = TestApp::new();
    app.seed_vehicle("V1", "BUS", 60).await;
    app.seed_route("42").await;

    let (status, body) = app.seed_assignment("V1", "42", "10:00:00", "09:00:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "End time must be after start time.");

    let (status, _) = app.seed_assignment("V1", "42", "09:00:00", "10:00:00").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.seed_assignment("V1", "42", "09:00:00", "10:00:00").await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Solapamiento con otra ventana: se permite
    let (status, _) = app.seed_assignment("V1", "42", "09:30:00", "10:30:00").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.seed_assignment("V9", "42", "11:00:00", "12:00:00").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_route_detail_orders_assignments() {
    let app = TestApp::new();
    app.seed_vehicle("V1", "BUS", 60).await;
    app.seed_vehicle("V2", "TRAM", 200).await;
    app.seed_route("42").await;

    app.seed_assignment("V2", "42", "14:00:00", "15:00:00").await;
    app.seed_assignment("V1", "42", "08:00:00", "09:00:00").await;

    let (status, body) = app.get("/api/routes/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["route"]["route_number"], "42");

    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0]["vehicle_id"], "V1");
    assert_eq!(assignments[0]["capacity"], 60);
    assert_eq!(assignments[1]["vehicle_type"], "TRAM");

    let (status, _) = app.get("/api/routes/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_route_efficiency_report() {
    let app = TestApp::new();
    app.seed_vehicle("V1", "BUS", 50).await;
    app.seed_vehicle("V2", "BUS", 70).await;
    app.seed_vehicle("V3", "TRAM", 80).await;
    app.seed_route("1").await;
    app.seed_route("2").await;

    app.seed_assignment("V1", "1", "08:00:00", "09:00:00").await;
    app.seed_assignment("V2", "1", "09:00:00", "10:00:00").await;
    app.seed_assignment("V3", "1", "10:00:00", "11:00:00").await;

    let (status, body) = app.get("/api/reports/route-efficiency").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["route"]["route_number"], "1");
    assert_eq!(rows[0]["total_capacity"], 200);
    assert_eq!(rows[0]["assignment_count"], 3);
    let average = rows[0]["average_capacity"].as_f64().unwrap();
    assert!((average - 66.666_666).abs() < 1e-4);

    assert_eq!(rows[1]["route"]["route_number"], "2");
    assert_eq!(rows[1]["total_capacity"], Value::Null);
    assert_eq!(rows[1]["average_capacity"], Value::Null);
    assert_eq!(rows[1]["assignment_count"], 0);
}

#[tokio::test]
async fn test_deleting_vehicle_cascades() {
    let app = TestApp::new();
    app.seed_vehicle("V1", "BUS", 60).await;
    app.seed_route("42").await;
    app.seed_assignment("V1", "42", "08:00:00", "09:00:00").await;
    app.post_json("/api/vehicles/V1/maintenance", true, maintenance_body())
        .await;

    let (status, _) = app.delete("/api/vehicles/V1").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.repo.assignment_count().await, 0);
    assert_eq!(app.repo.maintenance_log_count().await, 0);

    let (status, _) = app.delete("/api/vehicles/V1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_route_cascades() {
    let app = TestApp::new();
    app.seed_vehicle("V1", "BUS", 60).await;
    app.seed_route("42").await;
    let (_, assignment) = app.seed_assignment("V1", "42", "08:00:00", "09:00:00").await;
    let id = assignment["id"].as_str().unwrap().to_string();

    let (status, _) = app.delete("/api/routes/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.repo.assignment_count().await, 0);

    let (status, _) = app.delete(&format!("/api/assignments/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/api/assignments/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
