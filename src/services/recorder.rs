use crate::{
    error::AppError,
    models::{
        response::{NewResponse, TripResponse},
        trip::Trip,
    },
    services::store::TripStore,
};

/// Raw submit-form input for one participant response.
#[derive(Debug, Clone, Default)]
pub struct ResponseInput {
    pub location: Option<String>,
    pub duration: Option<String>,
    pub seasons: Vec<String>,
    pub dates: String,
    pub participant_name: String,
}

#[derive(Debug)]
pub enum RecordOutcome {
    Saved(TripResponse),
    Rejected(Vec<String>),
}

/// Validates and appends one response to the trip. Location and duration are
/// only required when the trip offers a real choice; omitted single options
/// and empty season picks fall back to the trip's allowed sets. Responses
/// always append, never replace.
pub async fn record_response(
    store: &TripStore,
    trip: &Trip,
    input: ResponseInput,
) -> Result<RecordOutcome, AppError> {
    let allowed_locations = trip.allowed_locations();
    let location = input.location.filter(|v| !v.trim().is_empty());
    let duration = input.duration.filter(|v| !v.trim().is_empty());
    let dates_raw = input.dates.trim();

    let mut errors = Vec::new();
    if allowed_locations.len() > 1 && location.is_none() {
        errors.push("Missing destination.".to_string());
    }
    if trip.durations.len() > 1 && duration.is_none() {
        errors.push("Missing duration.".to_string());
    }
    if dates_raw.is_empty() {
        errors.push("Missing dates.".to_string());
    }
    if !errors.is_empty() {
        return Ok(RecordOutcome::Rejected(errors));
    }

    // Free-form date entry: trim pieces, drop empties, no calendar checks.
    // Unparseable entries are stored and later skipped by the aggregator.
    let dates: Vec<String> = dates_raw
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect();

    let participant_name = input.participant_name.trim();
    let new = NewResponse {
        trip_id: trip.id.clone(),
        participant_name: (!participant_name.is_empty()).then(|| participant_name.to_string()),
        location: location.unwrap_or_else(|| {
            allowed_locations
                .first()
                .map(|l| l.code.clone())
                .unwrap_or_default()
        }),
        duration: duration.unwrap_or_else(|| trip.durations.first().cloned().unwrap_or_default()),
        seasons: if input.seasons.is_empty() {
            trip.seasons.clone()
        } else {
            input.seasons
        },
        dates,
    };

    let saved = store.insert_response(new).await?;
    Ok(RecordOutcome::Saved(saved))
}
