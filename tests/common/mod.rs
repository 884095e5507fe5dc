#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use airline_ops_backend::{entities::aircraft, routes, AppState, Config};

pub struct TestApp {
    pub server: TestServer,
    pub db: DatabaseConnection,
}

/// Bring up the real router over an in-memory database with the real
/// migrations applied, plus two aircraft with known capacities.
pub async fn spawn_app() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to test database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    seed_aircraft(&db, "AC_prop", "Test Prop", 2).await;
    seed_aircraft(&db, "AC_jet", "Test Jet", 150).await;

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
    };

    let state = AppState {
        db: db.clone(),
        config,
    };

    let server = TestServer::new(routes::create_router(state)).expect("Failed to start test server");

    TestApp { server, db }
}

async fn seed_aircraft(db: &DatabaseConnection, id: &str, name: &str, capacity: i32) {
    aircraft::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        capacity: Set(capacity),
    }
    .insert(db)
    .await
    .expect("Failed to seed aircraft");
}

/// Create a flight and return its JSON body, asserting 201.
pub async fn create_flight(
    server: &TestServer,
    destination: &str,
    departure_date: &str,
    aircraft_id: &str,
) -> serde_json::Value {
    let response = server
        .post("/api/flights")
        .json(&serde_json::json!({
            "destination": destination,
            "departure_date": departure_date,
            "aircraft_id": aircraft_id,
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<serde_json::Value>()
}

pub async fn post_booking(server: &TestServer, flight_id: &str, booker_name: &str) -> TestResponse {
    server
        .post("/api/bookings")
        .json(&serde_json::json!({
            "flight_id": flight_id,
            "booker_name": booker_name,
        }))
        .await
}

/// Create a booking and return its JSON body, asserting 201.
pub async fn create_booking(
    server: &TestServer,
    flight_id: &str,
    booker_name: &str,
) -> serde_json::Value {
    let response = post_booking(server, flight_id, booker_name).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<serde_json::Value>()
}

/// Booker names on a flight, in the order the API returns them.
pub async fn flight_bookers(server: &TestServer, flight_id: &str) -> Vec<String> {
    let response = server
        .get(&format!("/api/flights/{}/bookings", flight_id))
        .await;
    response.assert_status(StatusCode::OK);

    response
        .json::<serde_json::Value>()
        .as_array()
        .expect("bookings list")
        .iter()
        .map(|b| b["booker_name"].as_str().unwrap().to_string())
        .collect()
}
