use std::collections::HashSet;

use super::color::{ColorMap, DEFAULT_NODE_COLOR, DIMMED_COLOR};
use super::size::{DEFAULT_NODE_SIZE, degree_size};
use crate::stores::highlight::HighlightState;

/// Render attributes of one node for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
	pub color: String,
	pub size: f64,
	pub dimmed: bool,
	/// Drawing order; higher draws later.
	pub z_index: u8,
	pub show_label: bool,
}

/// Snapshot of the view state a node reducer reads.
#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a> {
	pub highlighted: &'a HashSet<String>,
	pub hovered: Option<&'a str>,
	/// Present only while a colour-by attribute is selected.
	pub colors: Option<&'a ColorMap>,
	pub size_by_degree: bool,
}

impl<'a> NodeView<'a> {
	pub fn new(state: &'a HighlightState, colors: Option<&'a ColorMap>) -> Self {
		Self {
			highlighted: &state.highlighted_nodes,
			hovered: state.hovered_node_id.as_deref(),
			colors: state.color_attribute.and(colors),
			size_by_degree: state.size_by_degree,
		}
	}
}

/// Highlight dimming wins over categorical colour, which wins over the
/// default colour.
pub fn reduce_node(id: &str, degree: usize, category: Option<&str>, view: &NodeView<'_>) -> NodeStyle {
	let size = if view.size_by_degree {
		degree_size(degree)
	} else {
		DEFAULT_NODE_SIZE
	};
	let highlight_active = !view.highlighted.is_empty();

	if highlight_active && !view.highlighted.contains(id) {
		return NodeStyle {
			color: DIMMED_COLOR.into(),
			size,
			dimmed: true,
			z_index: 0,
			show_label: false,
		};
	}

	let color = match view.colors {
		Some(colors) => colors.get(category.unwrap_or_default()).to_string(),
		None => DEFAULT_NODE_COLOR.to_string(),
	};
	let hovered = view.hovered == Some(id);
	NodeStyle {
		color,
		size,
		dimmed: false,
		z_index: if hovered {
			2
		} else if highlight_active {
			1
		} else {
			0
		},
		show_label: highlight_active,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::stores::highlight::NodeColorAttribute;

	#[test]
	fn highlight_dims_nodes_outside_the_set_even_when_coloring() {
		let colors = ColorMap::build(["EU", "NA"]);
		let state = HighlightState {
			color_attribute: Some(NodeColorAttribute::Continent),
			hovered_node_id: Some("FRA".into()),
			highlighted_nodes: ["FRA", "MUC"].map(String::from).into(),
			..Default::default()
		};
		let view = NodeView::new(&state, Some(&colors));

		let outside = reduce_node("JFK", 3, Some("NA"), &view);
		assert!(outside.dimmed);
		assert_eq!(outside.color, DIMMED_COLOR);

		let hovered = reduce_node("FRA", 3, Some("EU"), &view);
		assert!(!hovered.dimmed);
		assert_eq!(hovered.color, colors.get("EU"));
		assert_eq!(hovered.z_index, 2);
		assert_eq!(reduce_node("MUC", 1, Some("EU"), &view).z_index, 1);
	}

	#[test]
	fn color_map_ignored_without_selected_attribute() {
		let colors = ColorMap::build(["EU"]);
		let state = HighlightState::default();
		let style = reduce_node("FRA", 0, Some("EU"), &NodeView::new(&state, Some(&colors)));
		assert_eq!(style.color, DEFAULT_NODE_COLOR);
		assert_eq!(style.size, degree_size(0));
	}

	#[test]
	fn fixed_size_when_degree_sizing_is_off() {
		let state = HighlightState {
			size_by_degree: false,
			..Default::default()
		};
		let style = reduce_node("FRA", 250, None, &NodeView::new(&state, None));
		assert_eq!(style.size, DEFAULT_NODE_SIZE);
	}
}
