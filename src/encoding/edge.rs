use std::collections::HashSet;

use super::color::{DEFAULT_EDGE_COLOR, DIMMED_COLOR};
use crate::model::airport::AirportAttributes;
use crate::stores::highlight::{EdgeColorAttribute, HighlightState};

const NATIONAL_COLOR: &str = "#2ca02c";
const INTERNATIONAL_COLOR: &str = "#ff7f0e";
const INTERCONTINENTAL_COLOR: &str = "#9467bd";
const OTHER_COLOR: &str = "#55556a";

/// Endpoint attributes an edge class is derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Endpoint<'a> {
	pub country: Option<&'a str>,
	pub continent: Option<&'a str>,
}

impl<'a> From<&'a AirportAttributes> for Endpoint<'a> {
	fn from(attrs: &'a AirportAttributes) -> Self {
		Self {
			country: attrs.country.as_deref(),
			continent: attrs.continent.as_deref(),
		}
	}
}

fn differs(a: Option<&str>, b: Option<&str>) -> Option<bool> {
	Some(a? != b?)
}

/// Whether an edge falls in the class `mode` selects. `None` when the mode is
/// off or an endpoint lacks the compared attribute.
pub fn classify(mode: EdgeColorAttribute, source: Endpoint<'_>, target: Endpoint<'_>) -> Option<bool> {
	match mode {
		EdgeColorAttribute::None => None,
		EdgeColorAttribute::National => differs(source.country, target.country).map(|d| !d),
		EdgeColorAttribute::International => differs(source.country, target.country),
		EdgeColorAttribute::Intercontinental => differs(source.continent, target.continent),
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
	pub color: String,
	pub hidden: bool,
	pub highlighted: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct EdgeView<'a> {
	pub highlighted: &'a HashSet<String>,
	pub highlight_active: bool,
	pub mode: EdgeColorAttribute,
}

impl<'a> EdgeView<'a> {
	pub fn new(state: &'a HighlightState) -> Self {
		Self {
			highlighted: &state.highlighted_edges,
			highlight_active: state.is_active(),
			mode: state.edge_color_attribute,
		}
	}
}

/// Edges outside an active highlight are hidden; otherwise the selected
/// class colours matching edges and mutes the rest.
pub fn reduce_edge(id: &str, source: Endpoint<'_>, target: Endpoint<'_>, view: &EdgeView<'_>) -> EdgeStyle {
	if view.highlight_active && !view.highlighted.contains(id) {
		return EdgeStyle {
			color: DIMMED_COLOR.into(),
			hidden: true,
			highlighted: false,
		};
	}
	let color = match classify(view.mode, source, target) {
		None if view.mode != EdgeColorAttribute::None => OTHER_COLOR,
		None => DEFAULT_EDGE_COLOR,
		Some(false) => OTHER_COLOR,
		Some(true) => match view.mode {
			EdgeColorAttribute::National => NATIONAL_COLOR,
			EdgeColorAttribute::International => INTERNATIONAL_COLOR,
			EdgeColorAttribute::Intercontinental => INTERCONTINENTAL_COLOR,
			EdgeColorAttribute::None => DEFAULT_EDGE_COLOR,
		},
	};
	EdgeStyle {
		color: color.into(),
		hidden: false,
		highlighted: view.highlight_active,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn at(country: &'static str, continent: &'static str) -> Endpoint<'static> {
		Endpoint {
			country: Some(country),
			continent: Some(continent),
		}
	}

	#[test]
	fn classes_compare_current_endpoint_attributes() {
		let (fra, muc, cdg, jfk) = (at("DE", "EU"), at("DE", "EU"), at("FR", "EU"), at("US", "NA"));
		use EdgeColorAttribute::*;

		assert_eq!(classify(National, fra, muc), Some(true));
		assert_eq!(classify(National, fra, cdg), Some(false));
		assert_eq!(classify(International, fra, cdg), Some(true));
		assert_eq!(classify(International, fra, jfk), Some(true));
		assert_eq!(classify(Intercontinental, fra, cdg), Some(false));
		assert_eq!(classify(Intercontinental, fra, jfk), Some(true));
		assert_eq!(classify(None, fra, jfk), Option::None);
		assert_eq!(classify(National, fra, Endpoint::default()), Option::None);
	}

	#[test]
	fn highlight_hides_unrelated_edges_before_classification() {
		let state = HighlightState {
			edge_color_attribute: EdgeColorAttribute::International,
			highlighted_nodes: ["a", "b"].map(String::from).into(),
			highlighted_edges: HashSet::from(["ab".to_string()]),
			..Default::default()
		};
		let view = EdgeView::new(&state);
		let (de, us) = (at("DE", "EU"), at("US", "NA"));

		assert!(reduce_edge("cd", de, us, &view).hidden);
		let style = reduce_edge("ab", de, us, &view);
		assert!(!style.hidden && style.highlighted);
		assert_eq!(style.color, INTERNATIONAL_COLOR);
		assert_eq!(reduce_edge("ab", de, de, &view).color, OTHER_COLOR);
	}

	#[test]
	fn default_color_when_no_class_selected() {
		let state = HighlightState::default();
		let style = reduce_edge("x", at("DE", "EU"), at("US", "NA"), &EdgeView::new(&state));
		assert_eq!(style.color, DEFAULT_EDGE_COLOR);
		assert!(!style.hidden);
	}
}
