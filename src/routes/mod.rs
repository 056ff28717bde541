pub mod home;
pub mod itinerary;
pub mod trips;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(home::router())
        .merge(trips::router())
        .merge(itinerary::router())
        .nest_service("/static", ServeDir::new("static"))
        .nest_service("/maps", ServeDir::new(state.config.map_root.clone()))
        .with_state(state)
}
