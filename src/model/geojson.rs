//! The static Oceanus region map (`oceanus_map.geojson`).

use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
	#[serde(rename = "Name", default)]
	pub name: String,
	#[serde(rename = "Description", default)]
	pub description: Option<String>,
	#[serde(rename = "Activities", default)]
	pub activities: Option<Vec<String>>,
	#[serde(rename = "type", default)]
	pub feature_type: String,
	#[serde(rename = "Kind", default)]
	pub kind: String,
	#[serde(default)]
	pub fish_species_present: Option<Vec<String>>,
}

impl FeatureProperties {
	pub fn activities(&self) -> &[String] {
		self.activities.as_deref().unwrap_or_default()
	}
}

/// Only points and simple polygons appear in the map; anything else is kept
/// but never matches a coordinate lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
	Point { coordinates: [f64; 2] },
	Polygon { coordinates: Vec<Vec<[f64; 2]>> },
	#[serde(other)]
	Unsupported,
}

impl Geometry {
	/// Exterior ring first, holes after, as GeoJSON orders them.
	pub fn to_polygon(&self) -> Option<Polygon<f64>> {
		let Geometry::Polygon { coordinates } = self else {
			return None;
		};
		let mut rings = coordinates.iter().map(|ring| {
			LineString::new(
				ring.iter()
					.map(|&[x, y]| Coord { x, y })
					.collect::<Vec<_>>(),
			)
		});
		let exterior = rings.next()?;
		Some(Polygon::new(exterior, rings.collect()))
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
	#[serde(default)]
	pub properties: FeatureProperties,
	pub geometry: Geometry,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
	#[serde(default)]
	pub features: Vec<Feature>,
}

impl FeatureCollection {
	/// Decode leniently; features with broken geometry are dropped.
	pub fn from_value(value: serde_json::Value) -> crate::error::Result<Self> {
		#[derive(Deserialize)]
		struct Raw {
			#[serde(default)]
			features: Vec<serde_json::Value>,
		}
		let raw: Raw = serde_json::from_value(value)?;
		Ok(Self {
			features: super::decode_records("feature", raw.features),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn polygon_with_hole_keeps_interior_ring() {
		let geometry: Geometry = serde_json::from_value(json!({
			"type": "Polygon",
			"coordinates": [
				[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
				[[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]]
			]
		}))
		.unwrap();
		let polygon = geometry.to_polygon().unwrap();
		assert_eq!(polygon.exterior().0.len(), 5);
		assert_eq!(polygon.interiors().len(), 1);
	}

	#[test]
	fn unknown_geometry_types_do_not_fail_the_collection() {
		let fc = FeatureCollection::from_value(json!({
			"type": "FeatureCollection",
			"features": [
				{"type": "Feature", "properties": {"Name": "Line"},
				 "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}},
				{"type": "Feature", "properties": {"Name": "Dock"},
				 "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}
			]
		}))
		.unwrap();
		assert_eq!(fc.features.len(), 2);
		assert_eq!(fc.features[0].geometry, Geometry::Unsupported);
		assert!(fc.features[1].geometry.to_polygon().is_none());
	}
}
