use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{aircraft, bookings, flights};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Fleet
        .route("/aircraft", get(aircraft::list_aircraft))
        // Flight catalog
        .route("/flights", get(flights::list_flights))
        .route("/flights", post(flights::create_flight))
        .route("/flights/{id}", get(flights::get_flight))
        .route("/flights/{id}", put(flights::update_flight))
        .route("/flights/{id}", delete(flights::delete_flight))
        .route("/flights/{id}/bookings", get(bookings::list_flight_bookings))
        // Booking ledger
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/{id}", put(bookings::update_booking))
        .route("/bookings/{id}", delete(bookings::delete_booking))
        .route("/bookings/{id}/transfer", post(bookings::transfer_booking));

    Router::new().nest("/api", api_routes).with_state(state)
}
