//! Page-supplied settings. Every field has a default, so `{}` (or an empty
//! string) is a valid configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FEED_ENDPOINT: &str = "https://api.nasa.gov/neo/rest/v1/feed";
/// The feed service's shared public key. Rate-limited; deployments should
/// pass their own through `api_key`.
pub const DEFAULT_API_KEY: &str = "DEMO_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub feed_endpoint: String,
    pub api_key: String,
    /// Delay between dismissing the intro overlay and fetching, in ms.
    pub intro_delay_ms: u32,
    /// Intro overlay element; absent from the page means fetch at boot.
    pub landing_page_id: String,
    pub start_button_id: String,
    /// Segments per axis of each asteroid sphere before roughening.
    pub asteroid_segments: u32,
    /// Largest per-axis vertex offset applied to asteroid spheres.
    pub roughness: f32,
    pub start_running: bool,
    /// Pins the RNG for reproducible shapes and placement.
    pub rng_seed: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            feed_endpoint: DEFAULT_FEED_ENDPOINT.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            intro_delay_ms: 1000,
            landing_page_id: "landing-page".to_string(),
            start_button_id: "start-button".to_string(),
            asteroid_segments: 16,
            roughness: 0.1,
            start_running: true,
            rng_seed: None,
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse `json`, falling back to defaults (with a warning) when it is bad.
    pub fn from_json_or_default(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("bad tracker config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Feed query for a single day (`YYYY-MM-DD`) as both window ends.
    /// Query values are form-encoded.
    pub fn feed_url(&self, date: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("start_date", date)
            .append_pair("end_date", date)
            .append_pair("api_key", &self.api_key)
            .finish();
        format!("{}?{}", self.feed_endpoint, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_partial_configs_use_defaults() {
        assert_eq!(TrackerConfig::from_json_or_default(""), TrackerConfig::default());
        let c = TrackerConfig::from_json_or_default(r#"{"api_key":"abc123"}"#);
        assert_eq!(c.api_key, "abc123");
        assert_eq!(c.feed_endpoint, DEFAULT_FEED_ENDPOINT);
        assert_eq!(c.intro_delay_ms, 1000);
    }

    #[test]
    fn malformed_config_falls_back() {
        let c = TrackerConfig::from_json_or_default("{ api_key: ");
        assert_eq!(c, TrackerConfig::default());
        assert!(TrackerConfig::from_json(r#"{"roughness":"lots"}"#).is_err());
    }

    #[test]
    fn feed_url_uses_one_day_window() {
        let c = TrackerConfig {
            api_key: "KEY".into(),
            ..TrackerConfig::default()
        };
        assert_eq!(
            c.feed_url("2024-05-01"),
            "https://api.nasa.gov/neo/rest/v1/feed?start_date=2024-05-01&end_date=2024-05-01&api_key=KEY"
        );
    }

    #[test]
    fn feed_url_escapes_query_values() {
        let c = TrackerConfig {
            api_key: "a&b=c #d".into(),
            ..TrackerConfig::default()
        };
        let url = c.feed_url("2024-05-01");
        assert!(url.ends_with("&api_key=a%26b%3Dc+%23d"), "{}", url);
        assert_eq!(url.matches('&').count(), 2);
        assert!(!url.contains('#'));
    }
}
