use std::collections::HashSet;

use leptos::prelude::*;

use crate::graph_index::{GraphIndex, Neighborhood};
use crate::model::airport::{AirportAttributes, AirportField};

/// Which endpoint comparison edges are coloured by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeColorAttribute {
	#[default]
	None,
	/// Both endpoints in the same country.
	National,
	/// Endpoints in different countries.
	International,
	/// Endpoints on different continents.
	Intercontinental,
}

impl EdgeColorAttribute {
	pub const ALL: [EdgeColorAttribute; 4] = [
		EdgeColorAttribute::None,
		EdgeColorAttribute::National,
		EdgeColorAttribute::International,
		EdgeColorAttribute::Intercontinental,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			EdgeColorAttribute::None => "none",
			EdgeColorAttribute::National => "national",
			EdgeColorAttribute::International => "international",
			EdgeColorAttribute::Intercontinental => "intercontinental",
		}
	}

	pub fn parse(raw: &str) -> Self {
		Self::ALL
			.into_iter()
			.find(|a| a.as_str() == raw)
			.unwrap_or_default()
	}
}

/// Node attributes available for categorical colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeColorAttribute {
	Region,
	Continent,
}

impl NodeColorAttribute {
	pub fn field(self) -> AirportField {
		match self {
			NodeColorAttribute::Region => AirportField::Region,
			NodeColorAttribute::Continent => AirportField::Continent,
		}
	}
}

/// Encoding selections plus the hover highlight of the airport canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightState {
	pub color_attribute: Option<NodeColorAttribute>,
	pub edge_color_attribute: EdgeColorAttribute,
	pub size_by_degree: bool,
	pub hovered_node_id: Option<String>,
	pub hovered_node_data: Option<AirportAttributes>,
	pub highlighted_nodes: HashSet<String>,
	pub highlighted_edges: HashSet<String>,
}

impl Default for HighlightState {
	fn default() -> Self {
		Self {
			color_attribute: None,
			edge_color_attribute: EdgeColorAttribute::None,
			size_by_degree: true,
			hovered_node_id: None,
			hovered_node_data: None,
			highlighted_nodes: HashSet::new(),
			highlighted_edges: HashSet::new(),
		}
	}
}

impl HighlightState {
	/// Replace all four highlight fields together.
	pub fn set_highlight(
		&mut self,
		node_id: Option<String>,
		data: Option<AirportAttributes>,
		nodes: HashSet<String>,
		edges: HashSet<String>,
	) {
		self.hovered_node_id = node_id;
		self.hovered_node_data = data;
		self.highlighted_nodes = nodes;
		self.highlighted_edges = edges;
	}

	pub fn clear_highlight(&mut self) {
		self.set_highlight(None, None, HashSet::new(), HashSet::new());
	}

	/// Highlight `node_id` and its one-hop neighbourhood.
	pub fn hover(&mut self, index: &GraphIndex, node_id: &str, data: Option<AirportAttributes>) {
		let Neighborhood { nodes, edges } = index.neighborhood(node_id);
		self.set_highlight(Some(node_id.to_string()), data, nodes, edges);
	}

	pub fn is_active(&self) -> bool {
		!self.highlighted_nodes.is_empty()
	}
}

/// Reactive handle; every action is a single signal update.
#[derive(Clone, Copy)]
pub struct HighlightStore {
	state: RwSignal<HighlightState>,
}

impl HighlightStore {
	pub fn new() -> Self {
		Self {
			state: RwSignal::new(HighlightState::default()),
		}
	}

	pub fn state(&self) -> ReadSignal<HighlightState> {
		self.state.read_only()
	}

	pub fn set_color_attribute(&self, attribute: Option<NodeColorAttribute>) {
		self.state.update(|s| s.color_attribute = attribute);
	}

	pub fn set_edge_color_attribute(&self, attribute: EdgeColorAttribute) {
		self.state.update(|s| s.edge_color_attribute = attribute);
	}

	pub fn set_size_by_degree(&self, enabled: bool) {
		self.state.update(|s| s.size_by_degree = enabled);
	}

	pub fn hover(&self, index: &GraphIndex, node_id: &str, data: Option<AirportAttributes>) {
		self.state.update(|s| s.hover(index, node_id, data));
	}

	pub fn clear_highlight(&self) {
		self.state.update(HighlightState::clear_highlight);
	}
}

impl Default for HighlightStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn index() -> GraphIndex {
		GraphIndex::new([("1", "FRA", "MUC"), ("2", "MUC", "TXL"), ("3", "JFK", "LAX")])
	}

	#[test]
	fn clear_resets_all_highlight_fields_but_keeps_encodings() {
		let mut state = HighlightState {
			color_attribute: Some(NodeColorAttribute::Continent),
			..Default::default()
		};
		state.hover(&index(), "MUC", Some(AirportAttributes::default()));
		assert!(state.is_active());

		state.clear_highlight();
		assert_eq!(state.hovered_node_id, None);
		assert_eq!(state.hovered_node_data, None);
		assert!(state.highlighted_nodes.is_empty());
		assert!(state.highlighted_edges.is_empty());
		assert_eq!(state.color_attribute, Some(NodeColorAttribute::Continent));
	}

	#[test]
	fn rapid_hover_sequence_keeps_last_write() {
		let index = index();
		let mut state = HighlightState::default();
		state.hover(&index, "FRA", None);
		state.clear_highlight();
		state.hover(&index, "JFK", None);

		assert_eq!(state.hovered_node_id.as_deref(), Some("JFK"));
		let expected: HashSet<String> = ["JFK", "LAX"].map(String::from).into();
		assert_eq!(state.highlighted_nodes, expected);
		assert_eq!(state.highlighted_edges, HashSet::from(["3".to_string()]));
	}

	#[test]
	fn hover_without_clear_fully_replaces_previous_sets() {
		let index = index();
		let mut state = HighlightState::default();
		state.hover(&index, "MUC", None);
		state.hover(&index, "LAX", None);
		assert!(!state.highlighted_nodes.contains("MUC"));
		assert!(!state.highlighted_edges.contains("1"));
	}

	#[test]
	fn edge_attribute_parse_falls_back_to_none() {
		assert_eq!(
			EdgeColorAttribute::parse("intercontinental"),
			EdgeColorAttribute::Intercontinental
		);
		assert_eq!(EdgeColorAttribute::parse("bogus"), EdgeColorAttribute::None);
	}
}
