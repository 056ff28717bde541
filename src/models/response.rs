use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripResponse {
    pub id: i64,
    pub trip_id: String,
    pub participant_name: Option<String>,
    pub location: String,
    pub duration: String,
    pub seasons: Vec<String>,
    pub dates: Vec<String>,
    /// Explicit month picks from rows written by an earlier form version.
    /// New submissions leave this empty and months are derived from dates.
    #[serde(default)]
    pub months: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// A response as assembled by the submit handler, before the store assigns
/// an id and timestamp.
#[derive(Debug, Clone)]
pub struct NewResponse {
    pub trip_id: String,
    pub participant_name: Option<String>,
    pub location: String,
    pub duration: String,
    pub seasons: Vec<String>,
    pub dates: Vec<String>,
}
