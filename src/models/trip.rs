use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_DURATIONS: [&str; 3] = ["Day trip", "Weekend", "Full vacation"];

/// Season choices offered on the creation and planning forms.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeasonChoice {
    pub name: &'static str,
    pub image: &'static str,
}

pub const SEASONS: [SeasonChoice; 4] = [
    SeasonChoice {
        name: "Spring",
        image: "images/spring.png",
    },
    SeasonChoice {
        name: "Summer",
        image: "images/summer.png",
    },
    SeasonChoice {
        name: "Fall",
        image: "images/fall.png",
    },
    SeasonChoice {
        name: "Winter",
        image: "images/winter.png",
    },
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationDetail {
    pub code: String,
    pub name: String,
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub creator_name: Option<String>,
    pub durations: Vec<String>,
    pub seasons: Vec<String>,
    pub locations: Vec<String>,
    pub location_details: HashMap<String, LocationDetail>,
    pub itinerary_data: Value,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Destination choices in creation order. Trips created before custom
    /// destinations existed have an empty `location_details` map and only
    /// resolve through the legacy city table.
    pub fn allowed_locations(&self) -> Vec<LocationDetail> {
        if self.location_details.is_empty() {
            self.locations
                .iter()
                .filter_map(|code| legacy_city(code))
                .collect()
        } else {
            self.locations
                .iter()
                .filter_map(|code| self.location_details.get(code).cloned())
                .collect()
        }
    }

    pub fn allowed_seasons(&self) -> Vec<SeasonChoice> {
        SEASONS
            .iter()
            .filter(|s| self.seasons.iter().any(|name| name == s.name))
            .copied()
            .collect()
    }

    /// Months a participant can reasonably pick, derived from the allowed
    /// seasons, deduplicated in season order.
    pub fn allowed_months(&self) -> Vec<&'static str> {
        let mut months = Vec::new();
        for season in &self.seasons {
            for &month in months_of_season(season) {
                if !months.contains(&month) {
                    months.push(month);
                }
            }
        }
        months
    }

    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Trip {}", &self.id[..self.id.len().min(6)])
        } else {
            self.name.clone()
        }
    }
}

fn months_of_season(season: &str) -> &'static [&'static str] {
    match season {
        "Winter" => &["December"],
        "Spring" => &["March", "April", "May"],
        "Summer" => &["June", "July", "August"],
        "Fall" => &["September", "October", "November"],
        _ => &[],
    }
}

/// Fixed city table kept for trips that predate creator-supplied
/// destinations.
pub fn legacy_city(code: &str) -> Option<LocationDetail> {
    let (name, src) = match code {
        "paris" => ("Paris", "images/paris.html"),
        "berlin" => ("Berlin", "images/berlin.html"),
        "rome" => ("Rome", "images/rome.html"),
        "london" => ("London", "images/london.html"),
        _ => return None,
    };
    Some(LocationDetail {
        code: code.to_string(),
        name: name.to_string(),
        src: src.to_string(),
        alt: format!("Map of {name}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip_with_seasons(seasons: &[&str]) -> Trip {
        Trip {
            id: "abc123".into(),
            name: "Test".into(),
            creator_name: None,
            durations: vec!["Weekend".into()],
            seasons: seasons.iter().map(|s| s.to_string()).collect(),
            locations: Vec::new(),
            location_details: HashMap::new(),
            itinerary_data: Value::Array(Vec::new()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn months_follow_season_order_without_duplicates() {
        let trip = trip_with_seasons(&["Fall", "Winter"]);
        assert_eq!(
            trip.allowed_months(),
            vec!["September", "October", "November", "December"]
        );
    }

    #[test]
    fn unknown_season_contributes_no_months() {
        let trip = trip_with_seasons(&["Monsoon"]);
        assert!(trip.allowed_months().is_empty());
    }

    #[test]
    fn legacy_trip_resolves_through_city_table() {
        let mut trip = trip_with_seasons(&["Spring"]);
        trip.locations = vec!["rome".into(), "atlantis".into()];
        let allowed = trip.allowed_locations();
        assert_eq!(allowed.len(), 1);
        assert_eq!(allowed[0].name, "Rome");
    }
}
