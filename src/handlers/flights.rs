use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::{aircraft, booking, flight};
use crate::error::{AppError, AppResult};
use crate::utils::id::generate_id;
use crate::utils::time::parse_departure;
use crate::AppState;

const DUPLICATE_FLIGHT_MSG: &str =
    "Flight with the same destination and departure date already exists";

#[derive(Debug, Deserialize)]
pub struct FlightRequest {
    pub departure_date: Option<String>,
    pub destination: Option<String>,
    pub aircraft_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FlightResponse {
    pub id: String,
    pub departure_date: DateTime<Utc>,
    pub destination: String,
    pub aircraft_id: String,
    pub aircraft_name: String,
    pub aircraft_capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl FlightResponse {
    fn new(flight: flight::Model, aircraft: &aircraft::Model) -> Self {
        Self {
            id: flight.id,
            departure_date: flight.departure_date.with_timezone(&Utc),
            destination: flight.destination,
            aircraft_id: flight.aircraft_id,
            aircraft_name: aircraft.name.clone(),
            aircraft_capacity: aircraft.capacity,
            created_at: flight.created_at.with_timezone(&Utc),
        }
    }
}

/// Validated create/update payload. Missing or blank fields and an
/// unparseable departure are rejected before any business rule runs.
struct FlightInput {
    departure_date: DateTimeWithTimeZone,
    destination: String,
    aircraft_id: String,
}

impl FlightInput {
    fn from_request(payload: FlightRequest) -> Result<Self, AppError> {
        let (Some(departure_date), Some(destination), Some(aircraft_id)) =
            (payload.departure_date, payload.destination, payload.aircraft_id)
        else {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        };

        if departure_date.is_empty() || destination.is_empty() || aircraft_id.is_empty() {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        }

        let departure_date = parse_departure(&departure_date)
            .ok_or_else(|| AppError::BadRequest("Invalid departure date".to_string()))?;

        Ok(Self {
            departure_date: departure_date.into(),
            destination,
            aircraft_id,
        })
    }
}

async fn find_aircraft(db: &sea_orm::DatabaseConnection, id: &str) -> AppResult<aircraft::Model> {
    aircraft::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal("Aircraft not found".to_string()))
}

/// List all flights with aircraft info, soonest departure first
pub async fn list_flights(State(state): State<AppState>) -> AppResult<Json<Vec<FlightResponse>>> {
    let flights = flight::Entity::find()
        .order_by_asc(flight::Column::DepartureDate)
        .all(&state.db)
        .await?;
    let aircraft = aircraft::Entity::find().all(&state.db).await?;

    let responses: Vec<FlightResponse> = flights
        .into_iter()
        .filter_map(|f| {
            let ac = aircraft.iter().find(|a| a.id == f.aircraft_id)?;
            Some(FlightResponse::new(f, ac))
        })
        .collect();

    Ok(Json(responses))
}

/// Get a single flight
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FlightResponse>> {
    let flight = flight::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    let aircraft = find_aircraft(&state.db, &flight.aircraft_id).await?;

    Ok(Json(FlightResponse::new(flight, &aircraft)))
}

/// Create a flight
pub async fn create_flight(
    State(state): State<AppState>,
    Json(payload): Json<FlightRequest>,
) -> AppResult<(StatusCode, Json<FlightResponse>)> {
    let input = FlightInput::from_request(payload)?;

    // Advisory duplicate-pair check; the unique index is authoritative
    let duplicate = flight::Entity::find()
        .filter(flight::Column::Destination.eq(&input.destination))
        .filter(flight::Column::DepartureDate.eq(input.departure_date))
        .one(&state.db)
        .await?;

    if duplicate.is_some() {
        return Err(AppError::Conflict(DUPLICATE_FLIGHT_MSG.to_string()));
    }

    let new_flight = flight::ActiveModel {
        id: Set(generate_id("FL")),
        destination: Set(input.destination),
        departure_date: Set(input.departure_date),
        aircraft_id: Set(input.aircraft_id),
        created_at: Set(Utc::now().into()),
    };

    let flight = new_flight.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(DUPLICATE_FLIGHT_MSG.to_string())
        }
        _ => AppError::from(e),
    })?;

    let aircraft = find_aircraft(&state.db, &flight.aircraft_id).await?;

    Ok((StatusCode::CREATED, Json(FlightResponse::new(flight, &aircraft))))
}

/// Update a flight
pub async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FlightRequest>,
) -> AppResult<Json<FlightResponse>> {
    let input = FlightInput::from_request(payload)?;

    let flight = flight::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    // Duplicate-pair check, excluding the flight being updated
    let duplicate = flight::Entity::find()
        .filter(flight::Column::Destination.eq(&input.destination))
        .filter(flight::Column::DepartureDate.eq(input.departure_date))
        .filter(flight::Column::Id.ne(&id))
        .one(&state.db)
        .await?;

    if duplicate.is_some() {
        return Err(AppError::Conflict(DUPLICATE_FLIGHT_MSG.to_string()));
    }

    let mut active: flight::ActiveModel = flight.into();
    active.destination = Set(input.destination);
    active.departure_date = Set(input.departure_date);
    active.aircraft_id = Set(input.aircraft_id);

    let updated = active.update(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(DUPLICATE_FLIGHT_MSG.to_string())
        }
        _ => AppError::from(e),
    })?;

    let aircraft = find_aircraft(&state.db, &updated.aircraft_id).await?;

    Ok(Json(FlightResponse::new(updated, &aircraft)))
}

/// Delete a flight and the bookings it owns
pub async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let txn = state.db.begin().await?;

    // Dependents first, so no partial deletion is ever observable
    booking::Entity::delete_many()
        .filter(booking::Column::FlightId.eq(&id))
        .exec(&txn)
        .await?;

    let result = flight::Entity::delete_by_id(&id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Flight not found".to_string()));
    }

    txn.commit().await?;

    Ok(Json(serde_json::json!({ "message": "Flight deleted successfully" })))
}
