//! Airport route graph as exported by the backend (graphology node/edge lists).

use serde::{Deserialize, Deserializer, Serialize};

/// Categorical attributes an airport can be filtered and coloured by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AirportField {
	/// ISO country code.
	Country,
	/// Continent code.
	Continent,
	/// Sub-national region.
	Region,
	/// City name.
	City,
}

impl AirportField {
	/// Lower-case name used in filters and labels.
	pub fn as_str(self) -> &'static str {
		match self {
			AirportField::Country => "country",
			AirportField::Continent => "continent",
			AirportField::Region => "region",
			AirportField::City => "city",
		}
	}
}

/// Attributes attached to every airport node. All optional on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirportAttributes {
	pub iata: Option<String>,
	pub icao: Option<String>,
	pub city: Option<String>,
	pub descr: Option<String>,
	pub region: Option<String>,
	pub runways: Option<i64>,
	pub longest: Option<i64>,
	pub altitude: Option<i64>,
	pub country: Option<String>,
	pub continent: Option<String>,
	pub lat: Option<f64>,
	pub lon: Option<f64>,
	pub x: Option<f64>,
	pub y: Option<f64>,
}

impl AirportAttributes {
	/// Value of a categorical field, if present.
	pub fn field(&self, field: AirportField) -> Option<&str> {
		match field {
			AirportField::Country => self.country.as_deref(),
			AirportField::Continent => self.continent.as_deref(),
			AirportField::Region => self.region.as_deref(),
			AirportField::City => self.city.as_deref(),
		}
	}

	/// Longitude/latitude pair when both are present and finite.
	pub fn lon_lat(&self) -> Option<(f64, f64)> {
		match (self.lon, self.lat) {
			(Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() => Some((lon, lat)),
			_ => None,
		}
	}

	/// Label shown on the canvas.
	pub fn label(&self) -> Option<String> {
		self.iata
			.clone()
			.filter(|code| code != "UNKNOWN")
			.or_else(|| self.city.clone())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirportNode {
	#[serde(deserialize_with = "key_as_string")]
	pub key: String,
	#[serde(default)]
	pub attributes: AirportAttributes,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteAttributes {
	pub dist: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteEdge {
	#[serde(deserialize_with = "key_as_string")]
	pub key: String,
	#[serde(deserialize_with = "key_as_string")]
	pub source: String,
	#[serde(deserialize_with = "key_as_string")]
	pub target: String,
	#[serde(default)]
	pub attributes: RouteAttributes,
}

/// `{ nodes, edges }` as returned by `/simple-filtered-graph`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AirportGraph {
	#[serde(default)]
	pub nodes: Vec<AirportNode>,
	#[serde(default)]
	pub edges: Vec<RouteEdge>,
}

impl AirportGraph {
	/// Decode leniently: malformed nodes or edges are dropped with a warning.
	pub fn from_value(value: serde_json::Value) -> crate::error::Result<Self> {
		#[derive(Deserialize)]
		struct Raw {
			#[serde(default)]
			nodes: Vec<serde_json::Value>,
			#[serde(default)]
			edges: Vec<serde_json::Value>,
		}
		let raw: Raw = serde_json::from_value(value)?;
		Ok(Self {
			nodes: super::decode_records("airport", raw.nodes),
			edges: super::decode_records("route", raw.edges),
		})
	}

	pub fn node(&self, key: &str) -> Option<&AirportNode> {
		self.nodes.iter().find(|n| n.key == key)
	}
}

/// Option lists for the categorical filters (`/airport_attributes`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirportFilterOptions {
	pub country: Vec<String>,
	pub continent: Vec<String>,
	pub region: Vec<String>,
	pub city: Vec<String>,
}

impl AirportFilterOptions {
	pub fn options(&self, field: AirportField) -> &[String] {
		match field {
			AirportField::Country => &self.country,
			AirportField::Continent => &self.continent,
			AirportField::Region => &self.region,
			AirportField::City => &self.city,
		}
	}
}

/// Graph ids come from Neo4j and may arrive as integers.
pub(crate) fn key_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Key {
		Str(String),
		Int(i64),
	}
	Ok(match Key::deserialize(deserializer)? {
		Key::Str(s) => s,
		Key::Int(i) => i.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn integer_keys_are_normalized() {
		let graph = AirportGraph::from_value(json!({
			"nodes": [
				{"key": 1, "attributes": {"iata": "FRA", "country": "DE", "lat": 50.0, "lon": 8.5}},
				{"key": "2", "attributes": {"iata": "MUC", "country": "DE"}}
			],
			"edges": [{"key": 7, "source": 1, "target": "2", "attributes": {"dist": 300}}]
		}))
		.unwrap();
		assert_eq!(graph.nodes[0].key, "1");
		assert_eq!(graph.edges[0].source, "1");
		assert_eq!(graph.edges[0].attributes.dist, Some(300));
		assert_eq!(graph.nodes[1].attributes.lon_lat(), None);
	}

	#[test]
	fn malformed_records_are_skipped() {
		let graph = AirportGraph::from_value(json!({
			"nodes": [{"key": "a"}, {"attributes": {}}, null],
			"edges": [{"key": "e", "source": "a"}]
		}))
		.unwrap();
		assert_eq!(graph.nodes.len(), 1);
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn label_prefers_known_iata() {
		let attrs = AirportAttributes {
			iata: Some("UNKNOWN".into()),
			city: Some("Bremen".into()),
			..Default::default()
		};
		assert_eq!(attrs.label().as_deref(), Some("Bremen"));
	}
}
