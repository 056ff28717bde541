use crate::{
    config::AppConfig,
    db::DbPool,
    services::{maps::MapService, store::TripStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub store: TripStore,
    pub maps: MapService,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool, store: TripStore, maps: MapService) -> Self {
        Self {
            config,
            db,
            store,
            maps,
        }
    }
}
