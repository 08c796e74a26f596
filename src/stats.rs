//! Count aggregations behind the bar charts.

use std::collections::HashMap;

use crate::model::airport::{AirportField, AirportGraph};
use crate::model::entity::Place;
use crate::stores::filter::{FilterPatch, Filters};
use crate::stores::map::MapState;

pub const UNKNOWN: &str = "Unknown";

/// Attributes the node distribution chart can group by.
pub const CHARTABLE: [AirportField; 3] = [
	AirportField::Continent,
	AirportField::Region,
	AirportField::Country,
];

/// One bar: label and count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bar {
	pub name: String,
	pub count: usize,
}

/// Sort by count descending, then name, so equal bars keep a stable order.
fn into_bars(counts: HashMap<String, usize>) -> Vec<Bar> {
	let mut bars: Vec<Bar> = counts
		.into_iter()
		.map(|(name, count)| Bar { name, count })
		.collect();
	bars.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
	bars
}

/// Nodes per value of `field`; missing values are grouped under `Unknown`.
pub fn node_distribution(graph: &AirportGraph, field: AirportField) -> Vec<Bar> {
	let mut counts: HashMap<String, usize> = HashMap::new();
	for node in &graph.nodes {
		let value = node.attributes.field(field).unwrap_or(UNKNOWN);
		*counts.entry(value.to_string()).or_default() += 1;
	}
	into_bars(counts)
}

/// Clicking a bar narrows the matching filter to include that value and
/// drills down to countries. `Unknown` bars and already selected values
/// produce no patch.
pub fn bar_click(filters: &Filters, field: AirportField, value: &str) -> (Option<FilterPatch>, AirportField) {
	if value == UNKNOWN {
		return (None, field);
	}
	let current = filters.field(field);
	let patch = (!current.iter().any(|v| v == value)).then(|| {
		let mut values = current.to_vec();
		values.push(value.to_string());
		FilterPatch::field(field, values)
	});
	(patch, AirportField::Country)
}

/// Places per containing region, from the memoized assignment.
pub fn places_per_region(map: &MapState, places: &[Place]) -> Vec<Bar> {
	let mut counts: HashMap<String, usize> = HashMap::new();
	for place in places {
		let region = map.parent_feature_by_place(&place.id).unwrap_or(UNKNOWN);
		*counts.entry(region.to_string()).or_default() += 1;
	}
	into_bars(counts)
}

/// Occurrences of each string, e.g. visited place ids.
pub fn tally<'a, I: IntoIterator<Item = &'a str>>(values: I) -> Vec<Bar> {
	let mut counts: HashMap<String, usize> = HashMap::new();
	for value in values {
		*counts.entry(value.to_string()).or_default() += 1;
	}
	into_bars(counts)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn graph() -> AirportGraph {
		AirportGraph::from_value(json!({
			"nodes": [
				{"key": "1", "attributes": {"continent": "EU", "country": "DE"}},
				{"key": "2", "attributes": {"continent": "EU", "country": "FR"}},
				{"key": "3", "attributes": {"continent": "NA", "country": "US"}},
				{"key": "4", "attributes": {}}
			]
		}))
		.unwrap()
	}

	#[test]
	fn distribution_sorted_by_count_with_unknown_bucket() {
		let bars = node_distribution(&graph(), AirportField::Continent);
		let names: Vec<_> = bars.iter().map(|b| (b.name.as_str(), b.count)).collect();
		assert_eq!(names, vec![("EU", 2), ("NA", 1), (UNKNOWN, 1)]);
	}

	#[test]
	fn bar_click_appends_once_and_drills_down() {
		let mut filters = Filters::default();
		let (patch, next) = bar_click(&filters, AirportField::Continent, "EU");
		assert_eq!(next, AirportField::Country);
		filters.merge(patch.unwrap());
		assert_eq!(filters.continent, vec!["EU".to_string()]);

		let (again, _) = bar_click(&filters, AirportField::Continent, "EU");
		assert!(again.is_none());

		let (unknown, stay) = bar_click(&filters, AirportField::Region, UNKNOWN);
		assert!(unknown.is_none());
		assert_eq!(stay, AirportField::Region);
	}

	#[test]
	fn tally_counts_repeats() {
		let bars = tally(["p1", "p2", "p1"]);
		assert_eq!(bars[0], Bar { name: "p1".into(), count: 2 });
	}
}
