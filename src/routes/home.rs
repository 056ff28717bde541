use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::{cookie::CookieJar, Form};
use serde::Deserialize;

use crate::{
    cookies::{self, FlashMessage, MyTrips},
    error::AppError,
    models::trip::{SeasonChoice, DEFAULT_DURATIONS, SEASONS},
    services::builder::{build_trip, TripBuild, TripInput},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/create", get(create_form).post(create_submit))
}

struct TripCard {
    id: String,
    name: String,
    responses: i64,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    flashes: Vec<FlashMessage>,
    trips: Vec<TripCard>,
}

/// Lists the trips this browser has created or visited. Ids that no longer
/// resolve are dropped silently.
async fn home(
    State(state): State<AppState>,
    jar: CookieJar,
    my_trips: MyTrips,
) -> Result<Response, AppError> {
    let (jar, flashes) = cookies::take_flashes(jar);

    let mut trips = Vec::new();
    for id in &my_trips.0 {
        if let Some(trip) = state.store.fetch_trip(id).await? {
            let responses = state.store.count_responses(&trip.id).await?;
            trips.push(TripCard {
                name: trip.display_name(),
                id: trip.id,
                responses,
            });
        }
    }

    Ok((
        jar,
        AskamaTemplateResponse::into_response(HomeTemplate { flashes, trips }),
    )
        .into_response())
}

#[derive(Template)]
#[template(path = "create_trip.html")]
struct CreateTripTemplate {
    flashes: Vec<FlashMessage>,
    durations: Vec<&'static str>,
    seasons: Vec<SeasonChoice>,
}

async fn create_form(jar: CookieJar) -> Response {
    let (jar, flashes) = cookies::take_flashes(jar);
    (
        jar,
        AskamaTemplateResponse::into_response(CreateTripTemplate {
            flashes,
            durations: DEFAULT_DURATIONS.to_vec(),
            seasons: SEASONS.to_vec(),
        }),
    )
        .into_response()
}

#[derive(Deserialize)]
struct CreateTripForm {
    #[serde(default)]
    trip_name: String,
    #[serde(default)]
    names: String,
    #[serde(default)]
    destinations: String,
    #[serde(default)]
    durations: Vec<String>,
    #[serde(default)]
    seasons: Vec<String>,
}

async fn create_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    my_trips: MyTrips,
    Form(form): Form<CreateTripForm>,
) -> Result<Response, AppError> {
    let input = TripInput {
        name: form.trip_name,
        creator_name: form.names,
        destinations: form.destinations,
        durations: form.durations,
        seasons: form.seasons,
    };

    match build_trip(&state.store, &state.maps, input).await? {
        TripBuild::Created(trip) => {
            let jar = cookies::remember_trip(jar, &my_trips.0, &trip.id);
            Ok((jar, Redirect::to(&format!("/trip/{}", trip.id))).into_response())
        }
        TripBuild::Rejected(messages) => {
            let flashes: Vec<FlashMessage> =
                messages.into_iter().map(FlashMessage::error).collect();
            let jar = cookies::set_flashes(jar, &flashes);
            Ok((jar, Redirect::to("/create")).into_response())
        }
    }
}
