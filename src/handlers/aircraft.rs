use axum::{extract::State, Json};
use sea_orm::{EntityTrait, QueryOrder};

use crate::entities::aircraft;
use crate::error::AppResult;
use crate::AppState;

/// List the fleet
pub async fn list_aircraft(State(state): State<AppState>) -> AppResult<Json<Vec<aircraft::Model>>> {
    let aircraft = aircraft::Entity::find()
        .order_by_asc(aircraft::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(aircraft))
}
