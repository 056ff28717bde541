use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::trip::{LocationDetail, Trip, DEFAULT_DURATIONS, SEASONS},
    services::{maps::MapService, store::TripStore},
};

/// Raw form input for trip creation. `destinations` is the textarea value,
/// one `Name,Latitude,Longitude` line per destination.
#[derive(Debug, Clone, Default)]
pub struct TripInput {
    pub name: String,
    pub creator_name: String,
    pub destinations: String,
    pub durations: Vec<String>,
    pub seasons: Vec<String>,
}

#[derive(Debug)]
pub enum TripBuild {
    Created(Trip),
    Rejected(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Validates the input, renders one map artifact per parseable destination
/// and persists the trip. Nothing is persisted on rejection; artifacts
/// already written when a later step fails stay behind as orphans.
pub async fn build_trip(
    store: &TripStore,
    maps: &MapService,
    input: TripInput,
) -> Result<TripBuild, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Ok(TripBuild::Rejected(vec![
            "Please provide a title for your trip.".into(),
        ]));
    }

    if input.destinations.lines().all(|line| line.trim().is_empty()) {
        return Ok(TripBuild::Rejected(vec![
            "Please enter at least one destination.".into(),
        ]));
    }

    let destinations = parse_destinations(&input.destinations);
    if destinations.is_empty() {
        return Ok(TripBuild::Rejected(vec![
            "None of the destinations could be parsed.".into(),
        ]));
    }

    let trip_id = Uuid::new_v4().simple().to_string();
    let mut locations = Vec::new();
    let mut location_details: HashMap<String, LocationDetail> = HashMap::new();

    for dest in &destinations {
        let base_slug = slugify(&dest.name);
        let mut slug = base_slug.clone();
        let mut counter = 1;
        while location_details.contains_key(&slug) {
            slug = format!("{base_slug}_{counter}");
            counter += 1;
        }

        let src = maps.render(&trip_id, &slug, &dest.name, dest.lat, dest.lon).await?;
        location_details.insert(
            slug.clone(),
            LocationDetail {
                code: slug.clone(),
                name: dest.name.clone(),
                src,
                alt: format!("Map of {}", dest.name),
            },
        );
        locations.push(slug);
    }

    let creator_name = input.creator_name.trim();
    let trip = Trip {
        id: trip_id,
        name: name.to_string(),
        creator_name: (!creator_name.is_empty()).then(|| creator_name.to_string()),
        durations: if input.durations.is_empty() {
            DEFAULT_DURATIONS.iter().map(|d| d.to_string()).collect()
        } else {
            input.durations
        },
        seasons: if input.seasons.is_empty() {
            SEASONS.iter().map(|s| s.name.to_string()).collect()
        } else {
            input.seasons
        },
        locations,
        location_details,
        itinerary_data: Value::Array(Vec::new()),
        created_at: Utc::now(),
    };

    store.insert_trip(&trip).await?;
    info!("created trip {} with {} destinations", trip.id, trip.locations.len());
    Ok(TripBuild::Created(trip))
}

/// Parses `Name,Latitude,Longitude` lines, silently skipping lines with the
/// wrong field count or non-numeric coordinates.
pub fn parse_destinations(input: &str) -> Vec<Destination> {
    input
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return None;
            }
            let lat: f64 = parts[1].parse().ok()?;
            let lon: f64 = parts[2].parse().ok()?;
            Some(Destination {
                name: parts[0].to_string(),
                lat,
                lon,
            })
        })
        .collect()
}

/// Lowercases alphanumeric runs and joins them with single underscores.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    let mut gap = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('_');
            }
            gap = false;
            slug.extend(ch.to_lowercase());
        } else {
            gap = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("Paris"), "paris");
        assert_eq!(slugify("New York City"), "new_york_city");
        assert_eq!(slugify("  São Paulo! "), "são_paulo");
        assert_eq!(slugify("--a--b--"), "a_b");
    }

    #[test]
    fn parse_skips_bad_lines() {
        let input = "Paris,48.8566,2.3522\njust a note\nBerlin,north,13.4\n\nRome,41.9028,12.4964";
        let parsed = parse_destinations(input);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "Paris");
        assert_eq!(parsed[1].name, "Rome");
        assert!((parsed[1].lat - 41.9028).abs() < 1e-9);
    }

    #[test]
    fn parse_rejects_extra_fields() {
        assert!(parse_destinations("Paris,48.85,2.35,extra").is_empty());
    }
}
