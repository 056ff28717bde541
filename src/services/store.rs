use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use sqlx::{sqlite::SqliteRow, Row};
use tracing::warn;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        response::{NewResponse, TripResponse},
        trip::{LocationDetail, Trip},
    },
};

/// Data access for trips and responses. List- and map-valued fields live in
/// JSON text columns; decoding is lenient so one bad row never takes down a
/// whole page.
#[derive(Clone)]
pub struct TripStore {
    db: DbPool,
}

impl TripStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn insert_trip(&self, trip: &Trip) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO trips \
             (id, name, creator_name, durations, seasons, locations, location_details, itinerary_data, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&trip.id)
        .bind(&trip.name)
        .bind(&trip.creator_name)
        .bind(to_json(&trip.durations)?)
        .bind(to_json(&trip.seasons)?)
        .bind(to_json(&trip.locations)?)
        .bind(to_json(&trip.location_details)?)
        .bind(to_json(&trip.itinerary_data)?)
        .bind(trip.created_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    pub async fn fetch_trip(&self, id: &str) -> Result<Option<Trip>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, creator_name, durations, seasons, locations, location_details, itinerary_data, created_at \
             FROM trips WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        row.map(|row| trip_from_row(&row)).transpose()
    }

    pub async fn update_itinerary(&self, id: &str, payload: &Value) -> Result<(), AppError> {
        sqlx::query("UPDATE trips SET itinerary_data = ? WHERE id = ?")
            .bind(to_json(payload)?)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    pub async fn insert_response(&self, new: NewResponse) -> Result<TripResponse, AppError> {
        let timestamp = Utc::now();
        let result = sqlx::query(
            "INSERT INTO responses \
             (trip_id, participant_name, location, duration, seasons, dates, months, timestamp) \
             VALUES (?, ?, ?, ?, ?, ?, '[]', ?)",
        )
        .bind(&new.trip_id)
        .bind(&new.participant_name)
        .bind(&new.location)
        .bind(&new.duration)
        .bind(to_json(&new.seasons)?)
        .bind(to_json(&new.dates)?)
        .bind(timestamp)
        .execute(&self.db)
        .await?;

        Ok(TripResponse {
            id: result.last_insert_rowid(),
            trip_id: new.trip_id,
            participant_name: new.participant_name,
            location: new.location,
            duration: new.duration,
            seasons: new.seasons,
            dates: new.dates,
            months: Vec::new(),
            timestamp,
        })
    }

    /// All responses for a trip in submission order.
    pub async fn list_responses(&self, trip_id: &str) -> Result<Vec<TripResponse>, AppError> {
        let rows = sqlx::query(
            "SELECT id, trip_id, participant_name, location, duration, seasons, dates, months, timestamp \
             FROM responses WHERE trip_id = ? ORDER BY id",
        )
        .bind(trip_id)
        .fetch_all(&self.db)
        .await?;
        rows.iter().map(response_from_row).collect()
    }

    pub async fn count_responses(&self, trip_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM responses WHERE trip_id = ?")
            .bind(trip_id)
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }
}

fn trip_from_row(row: &SqliteRow) -> Result<Trip, AppError> {
    Ok(Trip {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        creator_name: row.try_get("creator_name")?,
        durations: decode_list(row.try_get("durations")?),
        seasons: decode_list(row.try_get("seasons")?),
        locations: decode_list(row.try_get("locations")?),
        location_details: decode_details(row.try_get("location_details")?),
        itinerary_data: decode_value(row.try_get("itinerary_data")?),
        created_at: row.try_get("created_at")?,
    })
}

fn response_from_row(row: &SqliteRow) -> Result<TripResponse, AppError> {
    Ok(TripResponse {
        id: row.try_get("id")?,
        trip_id: row.try_get("trip_id")?,
        participant_name: row.try_get("participant_name")?,
        location: row.try_get("location")?,
        duration: row.try_get("duration")?,
        seasons: decode_list(row.try_get("seasons")?),
        dates: decode_list(row.try_get("dates")?),
        months: decode_list(row.try_get("months")?),
        timestamp: row.try_get("timestamp")?,
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|err| AppError::Other(err.into()))
}

fn decode_list(raw: String) -> Vec<String> {
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!("skipping undecodable list column: {err}");
        Vec::new()
    })
}

fn decode_details(raw: String) -> HashMap<String, LocationDetail> {
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!("skipping undecodable location_details column: {err}");
        HashMap::new()
    })
}

fn decode_value(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or_else(|_| Value::Array(Vec::new()))
}
