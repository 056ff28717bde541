use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use askama::Template;
use tokio::fs;

use crate::error::AppError;

/// Renders one self-contained Leaflet page per destination, stored under
/// `<root>/<trip_id>/<slug>.html` so artifacts of different trips never
/// collide.
#[derive(Clone)]
pub struct MapService {
    root: Arc<PathBuf>,
}

#[derive(Template)]
#[template(path = "map.html")]
struct MapTemplate<'a> {
    name: &'a str,
    lat: f64,
    lon: f64,
}

impl MapService {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_structure(&self) -> Result<(), AppError> {
        fs::create_dir_all(self.root()).await?;
        Ok(())
    }

    pub fn trip_dir(&self, trip_id: &str) -> PathBuf {
        self.root().join(trip_id)
    }

    /// Writes the artifact and returns its path relative to the map root,
    /// which is what gets stored in `location_details.src`.
    pub async fn render(
        &self,
        trip_id: &str,
        slug: &str,
        name: &str,
        lat: f64,
        lon: f64,
    ) -> Result<String, AppError> {
        let dir = self.trip_dir(trip_id);
        fs::create_dir_all(&dir).await?;

        let html = MapTemplate { name, lat, lon }
            .render()
            .map_err(|err| AppError::Other(err.into()))?;
        let filename = format!("{slug}.html");
        fs::write(dir.join(&filename), html).await?;

        Ok(format!("{trip_id}/{filename}"))
    }
}
