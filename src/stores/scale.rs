use leptos::prelude::*;

use crate::model::entity::{GraphMembership, Node};

/// Dataset and industry selections driving the comparison charts.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleState {
	/// `"all"` or a graph membership tag.
	pub active_dataset: String,
	pub exclude_organizations: bool,
	pub left_industry: String,
	pub right_industry: String,
	pub datasets: Vec<String>,
	pub industries: Vec<String>,
}

impl Default for ScaleState {
	fn default() -> Self {
		Self {
			active_dataset: "all".into(),
			exclude_organizations: false,
			left_industry: "large vessel".into(),
			right_industry: "tourism".into(),
			datasets: Vec::new(),
			industries: Vec::new(),
		}
	}
}

impl ScaleState {
	pub fn active_membership(&self) -> Option<GraphMembership> {
		GraphMembership::from_tag(&self.active_dataset)
	}

	/// Whether a node is shown under the current dataset selection.
	pub fn includes(&self, node: &Node) -> bool {
		if self.exclude_organizations && matches!(node, Node::Organization(_)) {
			return false;
		}
		match self.active_membership() {
			Some(m) => node.in_graph().contains(&m),
			None => true,
		}
	}
}

#[derive(Clone, Copy)]
pub struct ScaleStore {
	state: RwSignal<ScaleState>,
}

impl ScaleStore {
	pub fn new() -> Self {
		Self {
			state: RwSignal::new(ScaleState::default()),
		}
	}

	pub fn state(&self) -> ReadSignal<ScaleState> {
		self.state.read_only()
	}

	pub fn set_datasets(&self, datasets: Vec<String>) {
		self.state.update(|s| s.datasets = datasets);
	}

	pub fn set_industries(&self, industries: Vec<String>) {
		self.state.update(|s| s.industries = industries);
	}

	pub fn set_active_dataset(&self, dataset: String) {
		self.state.update(|s| s.active_dataset = dataset);
	}

	pub fn set_exclude_organizations(&self, exclude: bool) {
		self.state.update(|s| s.exclude_organizations = exclude);
	}

	pub fn set_left_industry(&self, industry: String) {
		self.state.update(|s| s.left_industry = industry);
	}

	pub fn set_right_industry(&self, industry: String) {
		self.state.update(|s| s.right_industry = industry);
	}
}

impl Default for ScaleStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn dataset_selection_filters_by_membership() {
		let org: Node =
			serde_json::from_value(json!({"type": "entity.organization", "id": "o", "in_graph": ["jo"]}))
				.unwrap();
		let topic: Node =
			serde_json::from_value(json!({"type": "topic", "id": "t", "in_graph": ["tr"]})).unwrap();

		let mut state = ScaleState::default();
		assert!(state.includes(&org) && state.includes(&topic));

		state.active_dataset = "tr".into();
		assert!(!state.includes(&org));
		assert!(state.includes(&topic));

		state.active_dataset = "jo".into();
		state.exclude_organizations = true;
		assert!(!state.includes(&org));
	}
}
