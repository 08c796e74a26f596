//! Runtime configuration shared through Leptos context.

use log::{info, warn};
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_GEOJSON_URL: &str = "/oceanus_map.geojson";
/// Id of an optional `<script type="application/json">` holding overrides.
const CONFIG_ELEMENT_ID: &str = "dashboard-config";

/// Where the dashboards fetch their data from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Prefix for every backend endpoint, without a trailing slash.
	pub api_base: String,
	/// Static polygon collection served next to the app.
	pub geojson_url: String,
	/// Forward cookies with API requests.
	pub with_credentials: bool,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base: option_env!("DASHBOARD_API_BASE")
				.unwrap_or(DEFAULT_API_BASE)
				.trim_end_matches('/')
				.to_string(),
			geojson_url: DEFAULT_GEOJSON_URL.into(),
			with_credentials: true,
		}
	}
}

impl AppConfig {
	/// Parse a JSON config, filling unspecified keys with defaults.
	pub fn from_json(raw: &str) -> crate::error::Result<Self> {
		let mut config: AppConfig = serde_json::from_str(raw)?;
		config.api_base = config.api_base.trim_end_matches('/').to_string();
		Ok(config)
	}

	/// Config embedded in the host page, or the defaults when absent or invalid.
	pub fn from_document() -> Self {
		let raw = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.text_content());
		let Some(raw) = raw else {
			return Self::default();
		};
		match Self::from_json(&raw) {
			Ok(config) => {
				info!("Using embedded config, API at {}", config.api_base);
				config
			}
			Err(e) => {
				warn!("Ignoring invalid embedded config: {e}");
				Self::default()
			}
		}
	}

	/// Absolute path of an API endpoint, e.g. `endpoint("entities")`.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.api_base, path.trim_start_matches('/'))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config = AppConfig::from_json(r#"{"api_base": "http://localhost:8000/"}"#).unwrap();
		assert_eq!(config.api_base, "http://localhost:8000");
		assert_eq!(config.geojson_url, DEFAULT_GEOJSON_URL);
		assert!(config.with_credentials);
	}

	#[test]
	fn endpoint_joins_without_double_slash() {
		let config = AppConfig {
			api_base: "/api".into(),
			..AppConfig::default()
		};
		assert_eq!(config.endpoint("/graph-skeleton"), "/api/graph-skeleton");
		assert_eq!(config.endpoint("entities"), "/api/entities");
	}
}
