use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use time::Duration;

pub const MY_TRIPS_COOKIE: &str = "my_trips";
pub const FLASH_COOKIE: &str = "flash";

const MY_TRIPS_MAX_AGE: Duration = Duration::days(365);

/// Trip ids this browser has created or visited, read from the `my_trips`
/// cookie. An absent or undecodable cookie reads as an empty list.
#[derive(Debug, Clone, Default)]
pub struct MyTrips(pub Vec<String>);

#[async_trait]
impl<S> FromRequestParts<S> for MyTrips
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self(decode_ids(
            jar.get(MY_TRIPS_COOKIE).map(|c| c.value()),
        )))
    }
}

impl MyTrips {
    pub fn contains(&self, trip_id: &str) -> bool {
        self.0.iter().any(|id| id == trip_id)
    }
}

pub fn decode_ids(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|value| serde_json::from_str(value).ok())
        .unwrap_or_default()
}

/// Appends `trip_id` to the `my_trips` cookie unless already present.
/// Returns the jar unchanged when nothing needs updating.
pub fn remember_trip(jar: CookieJar, known: &[String], trip_id: &str) -> CookieJar {
    if known.iter().any(|id| id == trip_id) {
        return jar;
    }
    let mut ids: Vec<String> = known.to_vec();
    ids.push(trip_id.to_string());
    let encoded = serde_json::to_string(&ids).unwrap_or_else(|_| "[]".into());
    jar.add(
        Cookie::build((MY_TRIPS_COOKIE, encoded))
            .path("/")
            .max_age(MY_TRIPS_MAX_AGE)
            .build(),
    )
}

/// One flashed message, shown once on the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: String,
    pub message: String,
}

impl FlashMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: "error".into(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: "success".into(),
            message: message.into(),
        }
    }
}

pub fn set_flashes(jar: CookieJar, messages: &[FlashMessage]) -> CookieJar {
    let encoded = serde_json::to_string(messages).unwrap_or_else(|_| "[]".into());
    jar.add(Cookie::build((FLASH_COOKIE, encoded)).path("/").build())
}

/// Reads and clears pending flash messages. Undecodable cookies read as no
/// messages.
pub fn take_flashes(jar: CookieJar) -> (CookieJar, Vec<FlashMessage>) {
    let messages = jar
        .get(FLASH_COOKIE)
        .and_then(|c| serde_json::from_str(c.value()).ok())
        .unwrap_or_default();
    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
    (jar, messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undecodable_cookie_reads_empty() {
        assert!(decode_ids(Some("not json")).is_empty());
        assert!(decode_ids(Some("{\"a\":1}")).is_empty());
        assert!(decode_ids(None).is_empty());
    }

    #[test]
    fn decode_round_trip() {
        let ids = decode_ids(Some(r#"["a","b"]"#));
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn remember_trip_deduplicates() {
        let jar = CookieJar::new();
        let jar = remember_trip(jar, &[], "a");
        let stored = decode_ids(jar.get(MY_TRIPS_COOKIE).map(|c| c.value()));
        assert_eq!(stored, vec!["a".to_string()]);

        // Visiting again with "a" already known leaves the jar untouched.
        let jar = remember_trip(CookieJar::new(), &stored, "a");
        assert!(jar.get(MY_TRIPS_COOKIE).is_none());

        let jar = remember_trip(CookieJar::new(), &stored, "b");
        let stored = decode_ids(jar.get(MY_TRIPS_COOKIE).map(|c| c.value()));
        assert_eq!(stored, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn flashes_are_consumed() {
        let jar = set_flashes(CookieJar::new(), &[FlashMessage::error("Missing dates.")]);
        let (jar, messages) = take_flashes(jar);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "Missing dates.");
        let (_, again) = take_flashes(jar);
        assert!(again.is_empty());
    }
}
