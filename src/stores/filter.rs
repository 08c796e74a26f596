use leptos::prelude::*;
use serde::Serialize;

use crate::model::airport::AirportField;

/// Filters of the airport explorer. Categorical lists are ANDed across
/// fields and ORed within a field by the backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters {
	pub country: Vec<String>,
	pub continent: Vec<String>,
	pub region: Vec<String>,
	pub city: Vec<String>,
	pub min_degree: Option<i64>,
	pub max_degree: Option<i64>,
	pub min_runways: Option<i64>,
	pub max_runways: Option<i64>,
	pub top_n: Option<i64>,
}

/// JSON body of `/simple-filtered-graph`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoricalFilters<'a> {
	pub country: &'a [String],
	pub continent: &'a [String],
	pub region: &'a [String],
	pub city: &'a [String],
}

/// A partial update. `None` leaves a field alone; for numeric bounds
/// `Some(None)` clears the bound.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterPatch {
	pub country: Option<Vec<String>>,
	pub continent: Option<Vec<String>>,
	pub region: Option<Vec<String>>,
	pub city: Option<Vec<String>>,
	pub min_degree: Option<Option<i64>>,
	pub max_degree: Option<Option<i64>>,
	pub min_runways: Option<Option<i64>>,
	pub max_runways: Option<Option<i64>>,
	pub top_n: Option<Option<i64>>,
}

impl FilterPatch {
	/// Replace the selection of one categorical field.
	pub fn field(field: AirportField, values: Vec<String>) -> Self {
		let mut patch = Self::default();
		match field {
			AirportField::Country => patch.country = Some(values),
			AirportField::Continent => patch.continent = Some(values),
			AirportField::Region => patch.region = Some(values),
			AirportField::City => patch.city = Some(values),
		}
		patch
	}
}

/// One line of the "Active Filters" overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveFilter {
	Selected { key: &'static str, count: usize },
	Bound { key: &'static str, value: i64 },
}

impl Filters {
	/// Shallow merge: every field present in the patch replaces the current one.
	pub fn merge(&mut self, patch: FilterPatch) {
		let FilterPatch {
			country,
			continent,
			region,
			city,
			min_degree,
			max_degree,
			min_runways,
			max_runways,
			top_n,
		} = patch;
		if let Some(v) = country {
			self.country = v;
		}
		if let Some(v) = continent {
			self.continent = v;
		}
		if let Some(v) = region {
			self.region = v;
		}
		if let Some(v) = city {
			self.city = v;
		}
		if let Some(v) = min_degree {
			self.min_degree = v;
		}
		if let Some(v) = max_degree {
			self.max_degree = v;
		}
		if let Some(v) = min_runways {
			self.min_runways = v;
		}
		if let Some(v) = max_runways {
			self.max_runways = v;
		}
		if let Some(v) = top_n {
			self.top_n = v;
		}
	}

	/// All categorical lists empty, all numeric bounds unset.
	pub fn reset(&mut self) {
		*self = Filters::default();
	}

	pub fn field(&self, field: AirportField) -> &[String] {
		match field {
			AirportField::Country => &self.country,
			AirportField::Continent => &self.continent,
			AirportField::Region => &self.region,
			AirportField::City => &self.city,
		}
	}

	pub fn categorical(&self) -> CategoricalFilters<'_> {
		CategoricalFilters {
			country: &self.country,
			continent: &self.continent,
			region: &self.region,
			city: &self.city,
		}
	}

	/// Numeric bounds as query parameters; unset bounds are omitted.
	pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
		[
			("min", self.min_degree),
			("max", self.max_degree),
			("min_runways", self.min_runways),
			("max_runways", self.max_runways),
			("top_n", self.top_n),
		]
		.into_iter()
		.filter_map(|(k, v)| v.map(|v| (k, v.to_string())))
		.collect()
	}

	pub fn active(&self) -> Vec<ActiveFilter> {
		let lists = [
			("country", &self.country),
			("continent", &self.continent),
			("region", &self.region),
			("city", &self.city),
		];
		let bounds = [("minDegree", self.min_degree), ("maxDegree", self.max_degree)];
		lists
			.into_iter()
			.filter(|(_, v)| !v.is_empty())
			.map(|(key, v)| ActiveFilter::Selected { key, count: v.len() })
			.chain(
				bounds
					.into_iter()
					.filter_map(|(key, v)| v.map(|value| ActiveFilter::Bound { key, value })),
			)
			.collect()
	}
}

/// Reactive handle to the airport explorer filters.
#[derive(Clone, Copy)]
pub struct FilterStore {
	filters: RwSignal<Filters>,
}

impl FilterStore {
	pub fn new() -> Self {
		Self {
			filters: RwSignal::new(Filters::default()),
		}
	}

	pub fn filters(&self) -> ReadSignal<Filters> {
		self.filters.read_only()
	}

	pub fn set_filters(&self, patch: FilterPatch) {
		self.filters.update(|f| f.merge(patch));
	}

	pub fn reset_filters(&self) {
		self.filters.update(Filters::reset);
	}
}

impl Default for FilterStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn merge_replaces_arrays_and_reset_restores_defaults() {
		let mut filters = Filters::default();
		filters.merge(FilterPatch::field(AirportField::Country, vec!["DE".into()]));
		filters.merge(FilterPatch::field(AirportField::Country, vec!["USA".into()]));
		assert_eq!(filters.country, vec!["USA".to_string()]);
		assert!(filters.continent.is_empty());
		assert!(filters.region.is_empty());
		assert!(filters.city.is_empty());

		filters.reset();
		let once = filters.clone();
		filters.reset();
		assert_eq!(filters, once);
		assert_eq!(filters, Filters::default());
	}

	#[test]
	fn numeric_bounds_can_be_cleared_and_are_not_validated() {
		let mut filters = Filters::default();
		filters.merge(FilterPatch {
			min_degree: Some(Some(50)),
			max_degree: Some(Some(3)),
			..Default::default()
		});
		assert_eq!(
			filters.query_pairs(),
			vec![("min", "50".to_string()), ("max", "3".to_string())]
		);
		filters.merge(FilterPatch {
			max_degree: Some(None),
			..Default::default()
		});
		assert_eq!(filters.min_degree, Some(50));
		assert_eq!(filters.max_degree, None);
	}

	#[test]
	fn categorical_body_serializes_all_four_lists() {
		let mut filters = Filters::default();
		filters.region.push("US-CA".into());
		let body = serde_json::to_value(filters.categorical()).unwrap();
		assert_eq!(
			body,
			serde_json::json!({"country": [], "continent": [], "region": ["US-CA"], "city": []})
		);
	}

	#[test]
	fn overview_lists_only_set_filters() {
		let mut filters = Filters::default();
		filters.city = vec!["Berlin".into(), "Hamburg".into()];
		filters.max_degree = Some(10);
		filters.top_n = Some(5);
		assert_eq!(
			filters.active(),
			vec![
				ActiveFilter::Selected { key: "city", count: 2 },
				ActiveFilter::Bound { key: "maxDegree", value: 10 },
			]
		);
	}
}
