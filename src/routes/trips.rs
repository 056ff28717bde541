use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Host, Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::{cookie::CookieJar, Form};
use serde::Deserialize;

use crate::{
    cookies::{self, FlashMessage, MyTrips},
    error::AppError,
    models::trip::{legacy_city, SeasonChoice, Trip},
    services::{
        recorder::{record_response, RecordOutcome, ResponseInput},
        summary::{summarize, CategoryTotals, TallyRow},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/trip/:trip_id", get(plan_view).post(plan_submit))
}

/// A destination choice with its map artifact resolved to a servable URL.
struct LocationChoice {
    code: String,
    name: String,
    src: String,
    alt: String,
}

#[derive(Template)]
#[template(path = "plan_trip.html")]
struct PlanTripTemplate {
    flashes: Vec<FlashMessage>,
    trip_id: String,
    trip_name: String,
    share_url: String,
    locations: Vec<LocationChoice>,
    durations: Vec<String>,
    seasons: Vec<SeasonChoice>,
    months: Vec<&'static str>,
    location_stats: Vec<TallyRow>,
    duration_stats: Vec<TallyRow>,
    season_stats: Vec<TallyRow>,
    month_stats: Vec<TallyRow>,
    top_dates: Vec<TallyRow>,
    totals: CategoryTotals,
}

async fn plan_view(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Host(host): Host,
    jar: CookieJar,
    my_trips: MyTrips,
) -> Result<Response, AppError> {
    let trip = state
        .store
        .fetch_trip(&trip_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let (jar, flashes) = cookies::take_flashes(jar);

    // Pre-feature trips carry no location_details and serve the fixed city
    // maps from static assets instead of the per-trip map area.
    let legacy = trip.location_details.is_empty();
    let locations: Vec<LocationChoice> = trip
        .allowed_locations()
        .into_iter()
        .map(|loc| LocationChoice {
            src: if legacy {
                format!("/static/{}", loc.src)
            } else {
                format!("/maps/{}", loc.src)
            },
            code: loc.code,
            name: loc.name,
            alt: loc.alt,
        })
        .collect();

    let responses = state.store.list_responses(&trip.id).await?;
    let summary = summarize(&responses);
    let location_stats = summary
        .locations
        .iter()
        .map(|row| TallyRow {
            label: location_label(&trip, &row.label),
            count: row.count,
        })
        .collect();

    let template = PlanTripTemplate {
        flashes,
        share_url: format!("http://{host}/trip/{}", trip.id),
        trip_name: trip.display_name(),
        locations,
        durations: trip.durations.clone(),
        seasons: trip.allowed_seasons(),
        months: trip.allowed_months(),
        location_stats,
        duration_stats: summary.durations.clone(),
        season_stats: summary.seasons.clone(),
        month_stats: summary.months.clone(),
        top_dates: summary.top_dates(5),
        totals: summary.totals.clone(),
        trip_id: trip.id,
    };

    let jar = cookies::remember_trip(jar, &my_trips.0, &trip_id);
    Ok((jar, AskamaTemplateResponse::into_response(template)).into_response())
}

fn location_label(trip: &Trip, code: &str) -> String {
    trip.location_details
        .get(code)
        .map(|d| d.name.clone())
        .or_else(|| legacy_city(code).map(|d| d.name))
        .unwrap_or_else(|| code.to_string())
}

#[derive(Deserialize)]
struct PlanForm {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    seasons: Vec<String>,
    #[serde(default)]
    dates: String,
    #[serde(default)]
    participant_name: String,
}

/// Records one participant response. Submissions always append; there is no
/// participant identity to deduplicate on.
async fn plan_submit(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    jar: CookieJar,
    Form(form): Form<PlanForm>,
) -> Result<Response, AppError> {
    let trip = state
        .store
        .fetch_trip(&trip_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let input = ResponseInput {
        location: form.location,
        duration: form.duration,
        seasons: form.seasons,
        dates: form.dates,
        participant_name: form.participant_name,
    };

    let back = format!("/trip/{trip_id}");
    let flashes = match record_response(&state.store, &trip, input).await? {
        RecordOutcome::Saved(_) => vec![FlashMessage::success("Preferences recorded!")],
        RecordOutcome::Rejected(messages) => {
            messages.into_iter().map(FlashMessage::error).collect()
        }
    };
    let jar = cookies::set_flashes(jar, &flashes);
    Ok((jar, Redirect::to(&back)).into_response())
}
