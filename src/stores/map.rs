use std::collections::HashMap;

use geo::{Intersects, Point, Polygon};
use leptos::prelude::*;
use log::info;

use super::tracked;
use crate::api::{ApiClient, FetchStatus, RequestTracker};
use crate::model::entity::Place;
use crate::model::geojson::{Feature, FeatureCollection, FeatureProperties};

/// Kind, activities and type of a named region.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneProperties {
	pub kind: String,
	pub activities: Vec<String>,
	pub zone_type: String,
}

/// Region polygons and the place-to-region assignment derived from them.
#[derive(Clone, Debug, Default)]
pub struct MapState {
	features: Vec<Feature>,
	polygons: Vec<Option<Polygon<f64>>>,
	zone_properties: HashMap<String, ZoneProperties>,
	feature_properties: HashMap<String, FeatureProperties>,
	feature_places: HashMap<String, Vec<Place>>,
	place_parent: HashMap<String, String>,
}

impl MapState {
	/// Replace the polygon collection and rebuild the name lookups.
	pub fn set_features(&mut self, collection: FeatureCollection) {
		self.features = collection.features;
		self.polygons = self.features.iter().map(|f| f.geometry.to_polygon()).collect();
		self.zone_properties.clear();
		self.feature_properties.clear();
		for feature in &self.features {
			let props = &feature.properties;
			if props.name.is_empty() {
				continue;
			}
			self.zone_properties.insert(
				props.name.clone(),
				ZoneProperties {
					kind: props.kind.clone(),
					activities: props.activities().to_vec(),
					zone_type: props.feature_type.clone(),
				},
			);
			self.feature_properties
				.insert(props.name.clone(), props.clone());
		}
	}

	pub fn features(&self) -> &[Feature] {
		&self.features
	}

	pub fn is_loaded(&self) -> bool {
		!self.features.is_empty()
	}

	/// Every polygon feature containing the point. Points on a polygon
	/// boundary count as contained.
	pub fn features_by_coordinates(&self, lon: f64, lat: f64) -> Vec<&Feature> {
		let point = Point::new(lon, lat);
		self.features
			.iter()
			.zip(&self.polygons)
			.filter(|(_, polygon)| polygon.as_ref().is_some_and(|p| p.intersects(&point)))
			.map(|(feature, _)| feature)
			.collect()
	}

	pub fn add_place_to_feature(&mut self, feature_name: &str, place: Place) {
		self.feature_places
			.entry(feature_name.to_string())
			.or_default()
			.push(place);
	}

	pub fn set_place_parent(&mut self, place_id: &str, feature_name: &str) {
		self.place_parent
			.insert(place_id.to_string(), feature_name.to_string());
	}

	/// Assign each not yet assigned place to the first region containing it.
	/// Returns how many places got a region.
	pub fn assign_places(&mut self, places: &[Place]) -> usize {
		let mut assigned = 0;
		for place in places {
			if self.place_parent.contains_key(&place.id) {
				continue;
			}
			let Some(name) = self
				.features_by_coordinates(place.lon, place.lat)
				.first()
				.map(|f| f.properties.name.clone())
			else {
				continue;
			};
			self.add_place_to_feature(&name, place.clone());
			self.set_place_parent(&place.id, &name);
			assigned += 1;
		}
		assigned
	}

	pub fn features_by_kind(&self, kind: &str) -> Vec<&Feature> {
		self.features
			.iter()
			.filter(|f| f.properties.kind == kind)
			.collect()
	}

	pub fn feature_by_name(&self, name: &str) -> Option<&Feature> {
		self.features.iter().find(|f| f.properties.name == name)
	}

	pub fn features_by_activity(&self, activity: &str) -> Vec<&Feature> {
		self.features
			.iter()
			.filter(|f| f.properties.activities().iter().any(|a| a == activity))
			.collect()
	}

	pub fn features_by_type(&self, feature_type: &str) -> Vec<&Feature> {
		self.features
			.iter()
			.filter(|f| f.properties.feature_type == feature_type)
			.collect()
	}

	/// Distinct kinds in first-seen order.
	pub fn all_kinds(&self) -> Vec<String> {
		let mut kinds: Vec<String> = Vec::new();
		for feature in &self.features {
			let kind = &feature.properties.kind;
			if !kind.is_empty() && !kinds.contains(kind) {
				kinds.push(kind.clone());
			}
		}
		kinds
	}

	/// Distinct activities in first-seen order.
	pub fn all_activities(&self) -> Vec<String> {
		let mut activities: Vec<String> = Vec::new();
		for activity in self.features.iter().flat_map(|f| f.properties.activities()) {
			if !activities.contains(activity) {
				activities.push(activity.clone());
			}
		}
		activities
	}

	pub fn zone_properties(&self, zone: &str) -> Option<&ZoneProperties> {
		self.zone_properties.get(zone)
	}

	pub fn feature_properties(&self, name: &str) -> Option<&FeatureProperties> {
		self.feature_properties.get(name)
	}

	pub fn places_by_feature(&self, name: &str) -> &[Place] {
		self.feature_places
			.get(name)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	pub fn parent_feature_by_place(&self, place_id: &str) -> Option<&str> {
		self.place_parent.get(place_id).map(String::as_str)
	}
}

#[derive(Clone, Copy)]
pub struct MapStore {
	state: RwSignal<MapState>,
	tracker: RwSignal<RequestTracker>,
}

impl MapStore {
	pub fn new() -> Self {
		Self {
			state: RwSignal::new(MapState::default()),
			tracker: RwSignal::new(RequestTracker::default()),
		}
	}

	pub fn state(&self) -> ReadSignal<MapState> {
		self.state.read_only()
	}

	pub fn status(&self) -> Signal<FetchStatus> {
		let tracker = self.tracker;
		Signal::derive(move || tracker.with(|t| t.status().clone()))
	}

	/// Fetch the static polygon collection. Callers skip this once features
	/// are loaded.
	pub async fn load_geojson_data(&self, api: &ApiClient) {
		if let Some(collection) = tracked(self.tracker, "region map", api.geojson()).await {
			info!("Loaded {} map features", collection.features.len());
			self.state.update(|s| s.set_features(collection));
		}
	}

	pub fn assign_places(&self, places: &[Place]) {
		let assigned = self
			.state
			.try_update(|s| s.assign_places(places))
			.unwrap_or(0);
		info!("Assigned {assigned} of {} places to regions", places.len());
	}
}

impl Default for MapStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn square(name: &str, kind: &str, x0: f64, y0: f64, size: f64) -> serde_json::Value {
		json!({
			"type": "Feature",
			"properties": {"Name": name, "Kind": kind, "type": "Entity.Location.Region",
				"Activities": ["Fishing", kind]},
			"geometry": {"type": "Polygon", "coordinates": [[
				[x0, y0], [x0 + size, y0], [x0 + size, y0 + size], [x0, y0 + size], [x0, y0]
			]]}
		})
	}

	fn state() -> MapState {
		let mut state = MapState::default();
		state.set_features(
			FeatureCollection::from_value(json!({
				"type": "FeatureCollection",
				"features": [
					square("Tithonia", "Island", 0.0, 0.0, 2.0),
					square("Haacklee", "Island", 10.0, 10.0, 2.0),
					// overlaps the corner of Haacklee
					square("Nemo Reef", "Fishing Ground", 11.0, 11.0, 2.0),
					{"type": "Feature", "properties": {"Name": "Buoy", "Kind": "Buoy"},
					 "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}}
				]
			}))
			.unwrap(),
		);
		state
	}

	fn place(id: &str, lon: f64, lat: f64) -> Place {
		serde_json::from_value(json!({"id": id, "lon": lon, "lat": lat, "zone": "commercial"}))
			.unwrap()
	}

	#[test]
	fn point_inside_one_polygon_resolves_to_it() {
		let state = state();
		let hits = state.features_by_coordinates(1.0, 1.0);
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].properties.name, "Tithonia");
		assert!(state.features_by_coordinates(50.0, 50.0).is_empty());
	}

	#[test]
	fn assignment_uses_first_match_and_skips_outside_points() {
		let mut state = state();
		let places = [
			place("a", 11.5, 11.5),
			place("b", 1.0, 1.5),
			place("c", -5.0, -5.0),
		];
		assert_eq!(state.assign_places(&places), 2);
		assert_eq!(state.parent_feature_by_place("a"), Some("Haacklee"));
		assert_eq!(state.parent_feature_by_place("b"), Some("Tithonia"));
		assert_eq!(state.parent_feature_by_place("c"), None);
		assert_eq!(state.places_by_feature("Haacklee").len(), 1);
		assert!(state.places_by_feature("Nemo Reef").is_empty());
	}

	#[test]
	fn assignment_is_memoized() {
		let mut state = state();
		let places = [place("a", 1.0, 1.0)];
		state.assign_places(&places);
		assert_eq!(state.assign_places(&places), 0);
		assert_eq!(state.places_by_feature("Tithonia").len(), 1);
	}

	#[test]
	fn lookups_by_kind_activity_and_name() {
		let state = state();
		assert_eq!(state.features_by_kind("Island").len(), 2);
		assert_eq!(state.features_by_activity("Fishing").len(), 3);
		assert_eq!(state.features_by_type("Entity.Location.Region").len(), 3);
		assert_eq!(
			state.all_kinds(),
			vec!["Island", "Fishing Ground", "Buoy"]
		);
		assert_eq!(state.all_activities(), vec!["Fishing", "Island", "Fishing Ground"]);
		assert_eq!(state.zone_properties("Haacklee").unwrap().kind, "Island");
		assert!(state.feature_by_name("Buoy").is_some());
		assert!(state.feature_properties("Nowhere").is_none());
	}
}
