use std::collections::BTreeSet;

use leptos::prelude::*;

/// Attribute a filter chip constrains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKind {
	/// Containing map region (feature name).
	Island,
	/// Place zone classification.
	Zone,
	/// Map feature kind.
	Kind,
	/// Map feature activity.
	Activity,
}

/// One `{type, value}` chip shared across the linked views.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinkFilter {
	pub kind: FilterKind,
	pub value: String,
}

impl LinkFilter {
	pub fn new(kind: FilterKind, value: impl Into<String>) -> Self {
		Self {
			kind,
			value: value.into(),
		}
	}
}

/// Cross-view selection and hover state of the investigation dashboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkingState {
	pub active_filters: Vec<LinkFilter>,
	pub hovered_filters: Vec<LinkFilter>,
	pub highlighted_place_ids: Vec<String>,
	pub brushed_places: Vec<String>,
	pub highlighted_trips: Vec<String>,
	pub hovered_place_id: Option<String>,
	pub selected_person_id: Option<String>,
	pub selected_entity_id: Option<String>,
	pub selected_industry: Option<String>,
}

impl LinkingState {
	/// Remove an equal chip if present, otherwise append it.
	pub fn toggle_filter(&mut self, filter: LinkFilter) {
		match self.active_filters.iter().position(|f| *f == filter) {
			Some(idx) => {
				self.active_filters.remove(idx);
			}
			None => self.active_filters.push(filter),
		}
	}

	pub fn is_active(&self, filter: &LinkFilter) -> bool {
		self.active_filters.contains(filter)
	}

	pub fn is_hovered(&self, filter: &LinkFilter) -> bool {
		self.hovered_filters.contains(filter)
	}

	/// Whether an item carrying `values` survives the active chips. Kinds are
	/// ANDed, values within a kind ORed; kinds without chips do not constrain.
	pub fn passes(&self, values: &[(FilterKind, &str)]) -> bool {
		let kinds: BTreeSet<FilterKind> = self.active_filters.iter().map(|f| f.kind).collect();
		kinds.into_iter().all(|kind| {
			self.active_filters
				.iter()
				.filter(|f| f.kind == kind)
				.any(|f| values.contains(&(kind, f.value.as_str())))
		})
	}

	pub fn clear_all_filters(&mut self) {
		self.active_filters.clear();
		self.brushed_places.clear();
	}
}

#[derive(Clone, Copy)]
pub struct LinkingStore {
	state: RwSignal<LinkingState>,
}

impl LinkingStore {
	pub fn new() -> Self {
		Self {
			state: RwSignal::new(LinkingState::default()),
		}
	}

	pub fn state(&self) -> ReadSignal<LinkingState> {
		self.state.read_only()
	}

	pub fn toggle_filter(&self, filter: LinkFilter) {
		self.state.update(|s| s.toggle_filter(filter));
	}

	pub fn set_hovered_filters(&self, filters: Vec<LinkFilter>) {
		self.state.update(|s| s.hovered_filters = filters);
	}

	pub fn set_highlighted_place_ids(&self, ids: Vec<String>) {
		self.state.update(|s| s.highlighted_place_ids = ids);
	}

	pub fn set_brushed_places(&self, places: Vec<String>) {
		self.state.update(|s| s.brushed_places = places);
	}

	pub fn set_highlighted_trips(&self, trips: Vec<String>) {
		self.state.update(|s| s.highlighted_trips = trips);
	}

	pub fn set_hovered_place_id(&self, id: Option<String>) {
		self.state.update(|s| s.hovered_place_id = id);
	}

	pub fn select_person(&self, id: Option<String>) {
		self.state.update(|s| s.selected_person_id = id);
	}

	pub fn select_entity(&self, id: Option<String>) {
		self.state.update(|s| s.selected_entity_id = id);
	}

	pub fn select_industry(&self, industry: Option<String>) {
		self.state.update(|s| s.selected_industry = industry);
	}

	pub fn clear_all_filters(&self) {
		self.state.update(LinkingState::clear_all_filters);
	}
}

impl Default for LinkingStore {
	fn default() -> Self {
		Self::new()
	}
}
