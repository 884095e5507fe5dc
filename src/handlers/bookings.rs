use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::{aircraft, booking, flight};
use crate::error::{AppError, AppResult};
use crate::utils::id::generate_id;
use crate::AppState;

const ALREADY_BOOKED_MSG: &str = "This person already has a booking on this flight";
const ALREADY_BOOKED_TARGET_MSG: &str = "This person already has a booking on the target flight";

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub flight_id: Option<String>,
    pub booker_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    pub booker_name: Option<String>,
    pub flight_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferBookingRequest {
    pub target_flight_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingWithFlightResponse {
    pub id: String,
    pub flight_id: String,
    pub booker_name: String,
    pub destination: String,
    pub departure_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// List bookings for a flight, alphabetical by booker.
/// An unknown flight yields an empty list, not an error.
pub async fn list_flight_bookings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<booking::Model>>> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::FlightId.eq(&id))
        .order_by_asc(booking::Column::BookerName)
        .all(&state.db)
        .await?;

    Ok(Json(bookings))
}

/// List all bookings with flight info, by departure then booker
pub async fn list_bookings(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookingWithFlightResponse>>> {
    let bookings = booking::Entity::find().all(&state.db).await?;
    let flights = flight::Entity::find().all(&state.db).await?;

    let mut responses: Vec<BookingWithFlightResponse> = bookings
        .into_iter()
        .filter_map(|b| {
            let f = flights.iter().find(|f| f.id == b.flight_id)?;
            Some(BookingWithFlightResponse {
                id: b.id,
                flight_id: b.flight_id,
                booker_name: b.booker_name,
                destination: f.destination.clone(),
                departure_date: f.departure_date.with_timezone(&Utc),
                created_at: b.created_at.with_timezone(&Utc),
            })
        })
        .collect();

    responses.sort_by(|a, b| {
        a.departure_date
            .cmp(&b.departure_date)
            .then_with(|| a.booker_name.cmp(&b.booker_name))
    });

    Ok(Json(responses))
}

/// Create a booking
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<booking::Model>)> {
    let (Some(flight_id), Some(booker_name)) = (payload.flight_id, payload.booker_name) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };
    if flight_id.is_empty() || booker_name.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let flight = flight::Entity::find_by_id(&flight_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    let aircraft = aircraft::Entity::find_by_id(&flight.aircraft_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Aircraft not found".to_string()))?;

    // Uniqueness and seat count are checked and acted on in one
    // transaction; the unique index still backs the uniqueness check
    // should a concurrent insert slip between check and write.
    let txn = state.db.begin().await?;

    let existing = booking::Entity::find()
        .filter(booking::Column::FlightId.eq(&flight_id))
        .filter(booking::Column::BookerName.eq(&booker_name))
        .one(&txn)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(ALREADY_BOOKED_MSG.to_string()));
    }

    let booked = booking::Entity::find()
        .filter(booking::Column::FlightId.eq(&flight_id))
        .count(&txn)
        .await?;

    if booked >= aircraft.capacity as u64 {
        return Err(AppError::Capacity(
            "No available seats on this flight".to_string(),
        ));
    }

    let new_booking = booking::ActiveModel {
        id: Set(generate_id("BK")),
        flight_id: Set(flight_id),
        booker_name: Set(booker_name),
        created_at: Set(Utc::now().into()),
    };

    let booking = new_booking.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(ALREADY_BOOKED_MSG.to_string())
        }
        _ => AppError::from(e),
    })?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Rename the booker on a booking.
///
/// The optional `flight_id` only steers the uniqueness re-check (falling
/// back to the booking's stored flight); it is never persisted. Moving a
/// booking is the transfer endpoint's job.
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBookingRequest>,
) -> AppResult<Json<booking::Model>> {
    let Some(booker_name) = payload.booker_name.filter(|n| !n.is_empty()) else {
        return Err(AppError::BadRequest(
            "Missing required field: booker_name".to_string(),
        ));
    };

    let booking = booking::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let check_flight_id = payload
        .flight_id
        .unwrap_or_else(|| booking.flight_id.clone());

    let duplicate = booking::Entity::find()
        .filter(booking::Column::FlightId.eq(&check_flight_id))
        .filter(booking::Column::BookerName.eq(&booker_name))
        .filter(booking::Column::Id.ne(&id))
        .one(&state.db)
        .await?;

    if duplicate.is_some() {
        return Err(AppError::Conflict(ALREADY_BOOKED_MSG.to_string()));
    }

    let mut active: booking::ActiveModel = booking.into();
    active.booker_name = Set(booker_name);

    let updated = active.update(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(ALREADY_BOOKED_MSG.to_string())
        }
        _ => AppError::from(e),
    })?;

    Ok(Json(updated))
}

/// Delete a booking, freeing its seat
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let result = booking::Entity::delete_by_id(&id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Booking not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Booking deleted successfully" })))
}

/// Transfer a booking to another flight with the same destination.
///
/// Checks run in order, first failure wins: booking exists, target
/// flight exists, destinations match, booker not already on the target,
/// target has a free seat. Only then does the booking's flight reference
/// change; id and booker name are untouched.
pub async fn transfer_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TransferBookingRequest>,
) -> AppResult<Json<booking::Model>> {
    let Some(target_flight_id) = payload.target_flight_id.filter(|t| !t.is_empty()) else {
        return Err(AppError::BadRequest(
            "Missing required field: target_flight_id".to_string(),
        ));
    };

    let booking = booking::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    // Destination is read from the booking's current flight, never from
    // the client.
    let current_flight = flight::Entity::find_by_id(&booking.flight_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Current flight not found".to_string()))?;

    let target_flight = flight::Entity::find_by_id(&target_flight_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Target flight not found".to_string()))?;

    let target_aircraft = aircraft::Entity::find_by_id(&target_flight.aircraft_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Aircraft not found".to_string()))?;

    if current_flight.destination != target_flight.destination {
        return Err(AppError::BadRequest(
            "Destination of target flight must be the same as the original flight".to_string(),
        ));
    }

    let txn = state.db.begin().await?;

    let existing = booking::Entity::find()
        .filter(booking::Column::FlightId.eq(&target_flight_id))
        .filter(booking::Column::BookerName.eq(&booking.booker_name))
        .one(&txn)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(ALREADY_BOOKED_TARGET_MSG.to_string()));
    }

    let booked = booking::Entity::find()
        .filter(booking::Column::FlightId.eq(&target_flight_id))
        .count(&txn)
        .await?;

    if booked >= target_aircraft.capacity as u64 {
        return Err(AppError::Capacity(
            "No available seats on the target flight".to_string(),
        ));
    }

    // Single-row update; the source seat frees itself since counts are
    // always derived.
    let mut active: booking::ActiveModel = booking.into();
    active.flight_id = Set(target_flight_id);

    let updated = active.update(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(ALREADY_BOOKED_TARGET_MSG.to_string())
        }
        _ => AppError::from(e),
    })?;

    txn.commit().await?;

    Ok(Json(updated))
}
