use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{error::AppError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trip/:trip_id/itinerary", get(planner))
        .route("/trip/:trip_id/itinerary/api/save", post(save_itinerary))
        .route("/trip/:trip_id/itinerary/api/load", get(load_itinerary))
}

#[derive(Template)]
#[template(path = "itinerary.html")]
struct ItineraryTemplate {
    trip_id: String,
    trip_name: String,
}

async fn planner(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Response, AppError> {
    let trip = state
        .store
        .fetch_trip(&trip_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(AskamaTemplateResponse::into_response(ItineraryTemplate {
        trip_name: trip.display_name(),
        trip_id: trip.id,
    }))
}

/// Stores the day-by-day plan wholesale. The payload is opaque to the
/// server; concurrent saves are last-write-wins.
async fn save_itinerary(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    state
        .store
        .fetch_trip(&trip_id)
        .await?
        .ok_or(AppError::NotFound)?;
    state.store.update_itinerary(&trip_id, &payload).await?;
    Ok(Json(json!({ "status": "success" })))
}

async fn load_itinerary(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let trip = state
        .store
        .fetch_trip(&trip_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(trip.itinerary_data))
}
