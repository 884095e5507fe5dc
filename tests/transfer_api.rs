mod common;

use axum::http::StatusCode;
use common::*;

async fn transfer(
    app: &TestApp,
    booking_id: &str,
    target_flight_id: &str,
) -> axum_test::TestResponse {
    app.server
        .post(&format!("/api/bookings/{}/transfer", booking_id))
        .json(&serde_json::json!({ "target_flight_id": target_flight_id }))
        .await
}

#[tokio::test]
async fn transfer_moves_a_booking_between_same_destination_flights() {
    let app = spawn_app().await;

    let f1 = create_flight(&app.server, "Paris", "2026-09-01T10:00:00Z", "AC_jet").await;
    let f1_id = f1["id"].as_str().unwrap();
    let f2 = create_flight(&app.server, "Paris", "2026-09-02T10:00:00Z", "AC_jet").await;
    let f2_id = f2["id"].as_str().unwrap();

    let booking = create_booking(&app.server, f1_id, "Alice").await;
    let booking_id = booking["id"].as_str().unwrap();

    let response = transfer(&app, booking_id, f2_id).await;
    response.assert_status(StatusCode::OK);

    // Same booking, same booker, new flight
    let moved = response.json::<serde_json::Value>();
    assert_eq!(moved["id"], booking["id"]);
    assert_eq!(moved["booker_name"], "Alice");
    assert_eq!(moved["flight_id"], f2_id);

    assert!(flight_bookers(&app.server, f1_id).await.is_empty());
    assert_eq!(flight_bookers(&app.server, f2_id).await, vec!["Alice"]);
}

#[tokio::test]
async fn transfer_rejects_destination_mismatch() {
    let app = spawn_app().await;

    let paris = create_flight(&app.server, "Paris", "2026-09-01T10:00:00Z", "AC_jet").await;
    let paris_id = paris["id"].as_str().unwrap();
    let rome = create_flight(&app.server, "Rome", "2026-09-03T10:00:00Z", "AC_jet").await;

    let booking = create_booking(&app.server, paris_id, "Alice").await;
    let booking_id = booking["id"].as_str().unwrap();

    let response = transfer(&app, booking_id, rome["id"].as_str().unwrap()).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "Destination of target flight must be the same as the original flight"
    );

    // Booking unchanged
    assert_eq!(flight_bookers(&app.server, paris_id).await, vec!["Alice"]);
}

#[tokio::test]
async fn transfer_rejects_full_target_flight() {
    let app = spawn_app().await;

    let f1 = create_flight(&app.server, "Paris", "2026-09-01T10:00:00Z", "AC_jet").await;
    let f1_id = f1["id"].as_str().unwrap();
    // Capacity 2, filled below
    let f2 = create_flight(&app.server, "Paris", "2026-09-02T10:00:00Z", "AC_prop").await;
    let f2_id = f2["id"].as_str().unwrap();

    create_booking(&app.server, f2_id, "Bob").await;
    create_booking(&app.server, f2_id, "Carol").await;

    let booking = create_booking(&app.server, f1_id, "Alice").await;
    let booking_id = booking["id"].as_str().unwrap();

    let response = transfer(&app, booking_id, f2_id).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "No available seats on the target flight"
    );

    assert_eq!(flight_bookers(&app.server, f1_id).await, vec!["Alice"]);

    // A freed seat makes the same transfer succeed
    let bookings = app
        .server
        .get(&format!("/api/flights/{}/bookings", f2_id))
        .await
        .json::<serde_json::Value>();
    let bob_id = bookings.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();
    app.server
        .delete(&format!("/api/bookings/{}", bob_id))
        .await
        .assert_status(StatusCode::OK);

    transfer(&app, booking_id, f2_id).await.assert_status(StatusCode::OK);
    assert_eq!(
        flight_bookers(&app.server, f2_id).await,
        vec!["Alice", "Carol"]
    );
}

#[tokio::test]
async fn transfer_rejects_duplicate_booker_on_target() {
    let app = spawn_app().await;

    let f1 = create_flight(&app.server, "Paris", "2026-09-01T10:00:00Z", "AC_jet").await;
    let f1_id = f1["id"].as_str().unwrap();
    let f2 = create_flight(&app.server, "Paris", "2026-09-02T10:00:00Z", "AC_jet").await;
    let f2_id = f2["id"].as_str().unwrap();

    let booking = create_booking(&app.server, f1_id, "Alice").await;
    create_booking(&app.server, f2_id, "Alice").await;

    let response = transfer(&app, booking["id"].as_str().unwrap(), f2_id).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "This person already has a booking on the target flight"
    );

    assert_eq!(flight_bookers(&app.server, f1_id).await, vec!["Alice"]);
}

#[tokio::test]
async fn transfer_validates_and_404s() {
    let app = spawn_app().await;

    let flight = create_flight(&app.server, "Paris", "2026-09-01T10:00:00Z", "AC_jet").await;
    let flight_id = flight["id"].as_str().unwrap();
    let booking = create_booking(&app.server, flight_id, "Alice").await;
    let booking_id = booking["id"].as_str().unwrap();

    let response = app
        .server
        .post(&format!("/api/bookings/{}/transfer", booking_id))
        .json(&serde_json::json!({}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "Missing required field: target_flight_id"
    );

    let response = transfer(&app, "BK_nope", flight_id).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "Booking not found"
    );

    let response = transfer(&app, booking_id, "FL_nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "Target flight not found"
    );

    // Nothing moved
    assert_eq!(flight_bookers(&app.server, flight_id).await, vec!["Alice"]);
}
