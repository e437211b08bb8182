//! Near-Earth-object feed: request, response classification, parsing.
//!
//! The feed groups objects under date keys. Keys are read in document order
//! (serde_json `preserve_order`) so asteroids appear in the order served.
//! A single bad entry is skipped with a warning; a bad response shape fails
//! the whole batch.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use orrery_web::fetch::{self, TextResponse};

/// Why no asteroids could be loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    /// The service answered with a non-success status.
    Status(u16),
    /// The request never completed.
    Transport(String),
    /// The body is not a feed.
    Malformed(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Status(code) => write!(f, "feed returned HTTP {code}"),
            FeedError::Transport(msg) => write!(f, "feed request failed: {msg}"),
            FeedError::Malformed(msg) => write!(f, "malformed feed: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

/// One object of the feed, reduced to what the scene needs.
#[derive(Debug, Clone, PartialEq)]
pub struct NeoObject {
    pub name: String,
    pub diameter_min_km: f64,
    pub diameter_max_km: f64,
    pub miss_distance_km: f64,
    /// As served, for display.
    pub miss_distance_text: String,
    pub relative_velocity_km_s: f64,
    /// As served, for display.
    pub relative_velocity_text: String,
    pub hazardous: bool,
}

// ── Wire format ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WireObject {
    name: String,
    is_potentially_hazardous_asteroid: bool,
    estimated_diameter: WireDiameters,
    close_approach_data: Vec<WireApproach>,
}

#[derive(Deserialize)]
struct WireDiameters {
    kilometers: WireRange,
}

#[derive(Deserialize)]
struct WireRange {
    estimated_diameter_min: f64,
    estimated_diameter_max: f64,
}

#[derive(Deserialize)]
struct WireApproach {
    miss_distance: WireMiss,
    relative_velocity: WireVelocity,
}

#[derive(Deserialize)]
struct WireMiss {
    kilometers: String,
}

#[derive(Deserialize)]
struct WireVelocity {
    kilometers_per_second: String,
}

fn parse_decimal(field: &str, text: &str) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{field} is not a number: {text:?}"))
}

impl TryFrom<WireObject> for NeoObject {
    type Error = String;

    fn try_from(wire: WireObject) -> Result<Self, String> {
        let approach = wire
            .close_approach_data
            .into_iter()
            .next()
            .ok_or_else(|| "no close approach data".to_string())?;
        let range = wire.estimated_diameter.kilometers;
        Ok(NeoObject {
            name: wire.name,
            diameter_min_km: range.estimated_diameter_min,
            diameter_max_km: range.estimated_diameter_max,
            miss_distance_km: parse_decimal("miss distance", &approach.miss_distance.kilometers)?,
            miss_distance_text: approach.miss_distance.kilometers,
            relative_velocity_km_s: parse_decimal(
                "relative velocity",
                &approach.relative_velocity.kilometers_per_second,
            )?,
            relative_velocity_text: approach.relative_velocity.kilometers_per_second,
            hazardous: wire.is_potentially_hazardous_asteroid,
        })
    }
}

/// Best-effort label for an entry that failed to parse.
fn entry_label(entry: &Value, date: &str, index: usize) -> String {
    match entry.get("name").and_then(Value::as_str) {
        Some(name) => format!("'{name}'"),
        None => format!("{date}[{index}]"),
    }
}

/// Parse a feed body into objects, flattening all dates in document order.
pub fn parse_feed(body: &str) -> Result<Vec<NeoObject>, FeedError> {
    let root: Value =
        serde_json::from_str(body).map_err(|e| FeedError::Malformed(e.to_string()))?;
    let by_date = root
        .get("near_earth_objects")
        .and_then(Value::as_object)
        .ok_or_else(|| FeedError::Malformed("missing near_earth_objects".into()))?;

    let mut out = Vec::new();
    for (date, entries) in by_date {
        let Some(entries) = entries.as_array() else {
            log::warn!("feed date {} is not a list; skipped", date);
            continue;
        };
        for (i, entry) in entries.iter().enumerate() {
            let parsed = WireObject::deserialize(entry)
                .map_err(|e| e.to_string())
                .and_then(NeoObject::try_from);
            match parsed {
                Ok(neo) => out.push(neo),
                Err(reason) => {
                    log::warn!("skipping feed entry {}: {}", entry_label(entry, date, i), reason);
                }
            }
        }
    }
    Ok(out)
}

/// Turn a completed HTTP exchange into objects or a `FeedError`.
pub fn classify(response: TextResponse) -> Result<Vec<NeoObject>, FeedError> {
    if !response.ok() {
        return Err(FeedError::Status(response.status));
    }
    parse_feed(&response.body)
}

/// GET the feed once. No retry.
pub async fn fetch_feed(url: &str) -> Result<Vec<NeoObject>, FeedError> {
    let response = fetch::get_text(url)
        .await
        .map_err(|e| FeedError::Transport(e.0))?;
    classify(response)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Feed entry JSON in the service's shape.
    pub(crate) fn entry(name: &str, min: f64, max: f64, miss: &str, vel: &str, hazardous: bool) -> String {
        format!(
            r#"{{
                "name": "{name}",
                "is_potentially_hazardous_asteroid": {hazardous},
                "estimated_diameter": {{
                    "kilometers": {{ "estimated_diameter_min": {min}, "estimated_diameter_max": {max} }}
                }},
                "close_approach_data": [{{
                    "miss_distance": {{ "kilometers": "{miss}" }},
                    "relative_velocity": {{ "kilometers_per_second": "{vel}" }}
                }}]
            }}"#
        )
    }

    #[test]
    fn parses_single_entry() {
        let body = format!(
            r#"{{"near_earth_objects": {{"2024-05-01": [{}]}}}}"#,
            entry("(2024 AB)", 0.1, 0.3, "50000000", "10", true)
        );
        let neos = parse_feed(&body).unwrap();
        assert_eq!(neos.len(), 1);
        let n = &neos[0];
        assert_eq!(n.name, "(2024 AB)");
        assert_eq!(n.diameter_max_km, 0.3);
        assert_eq!(n.miss_distance_km, 50_000_000.0);
        assert_eq!(n.miss_distance_text, "50000000");
        assert_eq!(n.relative_velocity_km_s, 10.0);
        assert!(n.hazardous);
    }

    #[test]
    fn dates_flatten_in_document_order() {
        let body = format!(
            r#"{{"near_earth_objects": {{
                "2024-05-02": [{}, {}],
                "2024-05-01": [{}]
            }}}}"#,
            entry("b1", 0.1, 0.2, "1", "1", false),
            entry("b2", 0.1, 0.2, "1", "1", false),
            entry("a1", 0.1, 0.2, "1", "1", false),
        );
        let names: Vec<_> = parse_feed(&body).unwrap().into_iter().map(|n| n.name).collect();
        assert_eq!(names, ["b1", "b2", "a1"]);
    }

    #[test]
    fn bad_entries_are_skipped() {
        let body = format!(
            r#"{{"near_earth_objects": {{"d": [
                {{"name": "no fields"}},
                {},
                {},
                {}
            ]}}}}"#,
            entry("bad miss", 0.1, 0.2, "far", "1", false),
            entry("good", 0.1, 0.2, "384400.5", "12.5", false),
            r#"{"name":"no approach","is_potentially_hazardous_asteroid":false,
                "estimated_diameter":{"kilometers":{"estimated_diameter_min":1,"estimated_diameter_max":2}},
                "close_approach_data":[]}"#,
        );
        let neos = parse_feed(&body).unwrap();
        assert_eq!(neos.len(), 1);
        assert_eq!(neos[0].name, "good");
        assert_eq!(neos[0].relative_velocity_km_s, 12.5);
    }

    #[test]
    fn empty_feed_is_ok() {
        assert!(parse_feed(r#"{"near_earth_objects": {}}"#).unwrap().is_empty());
    }

    #[test]
    fn bad_shapes_are_malformed() {
        assert!(matches!(parse_feed("<html>"), Err(FeedError::Malformed(_))));
        assert!(matches!(parse_feed(r#"{"links": {}}"#), Err(FeedError::Malformed(_))));
        assert!(matches!(
            parse_feed(r#"{"near_earth_objects": []}"#),
            Err(FeedError::Malformed(_))
        ));
    }

    #[test]
    fn non_success_status_is_an_error() {
        let resp = TextResponse { status: 429, body: String::new() };
        assert_eq!(classify(resp), Err(FeedError::Status(429)));
        let resp = TextResponse {
            status: 200,
            body: r#"{"near_earth_objects": {}}"#.into(),
        };
        assert_eq!(classify(resp), Ok(Vec::new()));
    }

    #[test]
    fn error_messages() {
        assert_eq!(FeedError::Status(500).to_string(), "feed returned HTTP 500");
        assert_eq!(
            FeedError::Transport("offline".into()).to_string(),
            "feed request failed: offline"
        );
    }
}
