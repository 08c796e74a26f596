use std::collections::HashSet;

use crate::encoding::{ColorMap, EdgeView, NodeView};
use crate::model::airport::{AirportAttributes, AirportField, AirportGraph};
use crate::model::entity::{EntityGraph, Node};
use crate::stores::highlight::HighlightState;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	/// Longitude/latitude; nodes with a position are pinned to the map.
	pub lon_lat: Option<(f64, f64)>,
	/// Entity type for knowledge graph nodes.
	pub kind: Option<String>,
	pub attributes: AirportAttributes,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub id: String,
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl From<&AirportGraph> for GraphData {
	fn from(graph: &AirportGraph) -> Self {
		Self {
			nodes: graph
				.nodes
				.iter()
				.map(|n| GraphNode {
					id: n.key.clone(),
					label: n.attributes.label(),
					lon_lat: n.attributes.lon_lat(),
					kind: None,
					attributes: n.attributes.clone(),
				})
				.collect(),
			links: graph
				.edges
				.iter()
				.map(|e| GraphLink {
					id: e.key.clone(),
					source: e.source.clone(),
					target: e.target.clone(),
				})
				.collect(),
		}
	}
}

impl GraphData {
	/// Knowledge graph nodes passing `keep`, and the relations between them.
	pub fn from_entities(graph: &EntityGraph, keep: impl Fn(&Node) -> bool) -> Self {
		let nodes: Vec<GraphNode> = graph
			.nodes
			.iter()
			.filter(|n| keep(n))
			.map(|n| GraphNode {
				id: n.id().to_string(),
				label: Some(n.label().to_string()),
				lon_lat: None,
				kind: Some(n.kind().as_str().to_string()),
				attributes: Default::default(),
			})
			.collect();
		let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		let links = graph
			.edges
			.iter()
			.filter_map(|e| {
				let (source, target) = e.endpoints();
				(known.contains(source) && known.contains(target)).then(|| GraphLink {
					id: e.id(),
					source: source.to_string(),
					target: target.to_string(),
				})
			})
			.collect();
		Self { nodes, links }
	}
}

/// Which node value feeds the categorical colour map.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CategorySource {
	#[default]
	None,
	Field(AirportField),
	Kind,
}

impl CategorySource {
	pub fn category<'a>(&self, node: &'a GraphNode) -> Option<&'a str> {
		match self {
			CategorySource::None => None,
			CategorySource::Field(field) => node.attributes.field(*field),
			CategorySource::Kind => node.kind.as_deref(),
		}
	}
}

/// Everything the renderer reads each frame besides positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Encoding {
	pub highlight: HighlightState,
	pub colors: Option<ColorMap>,
	pub category: CategorySource,
}

impl Encoding {
	/// Rebuild the colour map from scratch for the current category source.
	pub fn new(highlight: HighlightState, data: &GraphData, category: CategorySource) -> Self {
		let colors = (category != CategorySource::None)
			.then(|| ColorMap::build(data.nodes.iter().filter_map(|n| category.category(n))));
		Self {
			highlight,
			colors,
			category,
		}
	}

	/// Colours are present only while a category source is selected.
	pub fn node_view(&self) -> NodeView<'_> {
		NodeView {
			colors: self.colors.as_ref(),
			..NodeView::new(&self.highlight, None)
		}
	}

	pub fn edge_view(&self) -> EdgeView<'_> {
		EdgeView::new(&self.highlight)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn entity_links_to_filtered_out_nodes_are_dropped() {
		let graph = EntityGraph::from_value(json!({
			"nodes": [
				{"type": "ENTITY_PERSON", "id": "Boss", "name": "The Boss"},
				{"type": "entity.organization", "id": "Sailor Shift"},
				{"type": "plan", "id": "pl1", "short_title": "Expand dock"}
			],
			"edges": [
				{"type": "participant_plan_person", "source": "pl1", "target": "Boss"},
				{"type": "participant_plan_organization", "source": "pl1", "target": "Sailor Shift"}
			]
		}))
		.unwrap();
		let data = GraphData::from_entities(&graph, |n| !matches!(n, Node::Organization(_)));
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links.len(), 1);
		assert_eq!(data.nodes[1].label.as_deref(), Some("Expand dock"));
	}

	#[test]
	fn encoding_builds_colors_only_for_a_category() {
		let data = GraphData {
			nodes: vec![GraphNode {
				id: "n".into(),
				kind: Some("TOPIC".into()),
				..Default::default()
			}],
			links: vec![],
		};
		let none = Encoding::new(HighlightState::default(), &data, CategorySource::None);
		assert!(none.colors.is_none());
		let by_kind = Encoding::new(HighlightState::default(), &data, CategorySource::Kind);
		assert_eq!(by_kind.colors.unwrap().len(), 1);
	}
}
