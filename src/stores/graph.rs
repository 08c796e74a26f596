use leptos::prelude::*;
use log::info;

use super::tracked;
use crate::api::{ApiClient, FetchStatus, RequestTracker};
use crate::graph_index::GraphIndex;
use crate::model::airport::{AirportFilterOptions, AirportGraph};
use crate::model::entity::{EntityGraph, Node};
use crate::model::insight::EntityTopicSentiment;
use crate::stores::filter::Filters;

/// The currently displayed airport graph and its adjacency.
#[derive(Clone, Debug, Default)]
pub struct AirportGraphState {
	pub graph: Option<AirportGraph>,
	pub index: GraphIndex,
	pub filter_options: Option<AirportFilterOptions>,
}

impl AirportGraphState {
	pub fn set_graph(&mut self, graph: AirportGraph) {
		self.index = GraphIndex::new(
			graph
				.edges
				.iter()
				.map(|e| (e.key.as_str(), e.source.as_str(), e.target.as_str())),
		);
		self.graph = Some(graph);
	}
}

#[derive(Clone, Copy)]
pub struct AirportGraphStore {
	state: RwSignal<AirportGraphState>,
	graph_tracker: RwSignal<RequestTracker>,
	options_tracker: RwSignal<RequestTracker>,
}

impl AirportGraphStore {
	pub fn new() -> Self {
		Self {
			state: RwSignal::new(AirportGraphState::default()),
			graph_tracker: RwSignal::new(RequestTracker::default()),
			options_tracker: RwSignal::new(RequestTracker::default()),
		}
	}

	pub fn state(&self) -> ReadSignal<AirportGraphState> {
		self.state.read_only()
	}

	pub fn status(&self) -> Signal<FetchStatus> {
		let tracker = self.graph_tracker;
		Signal::derive(move || tracker.with(|t| t.status().clone()))
	}

	pub fn options_status(&self) -> Signal<FetchStatus> {
		let tracker = self.options_tracker;
		Signal::derive(move || tracker.with(|t| t.status().clone()))
	}

	pub fn set_graph(&self, graph: AirportGraph) {
		self.state.update(|s| s.set_graph(graph));
	}

	pub async fn load_filter_options(&self, api: &ApiClient) {
		if let Some(options) =
			tracked(self.options_tracker, "filter options", api.airport_attributes()).await
		{
			self.state.update(|s| s.filter_options = Some(options));
		}
	}

	/// Refetch the graph for `filters`. Only the newest request is applied.
	pub async fn apply_filters(&self, api: &ApiClient, filters: Filters) {
		if let Some(graph) = tracked(
			self.graph_tracker,
			"filtered graph",
			api.simple_filtered_graph(&filters),
		)
		.await
		{
			info!(
				"Loaded airport graph: {} nodes, {} edges",
				graph.nodes.len(),
				graph.edges.len()
			);
			self.set_graph(graph);
		}
	}
}

impl Default for AirportGraphStore {
	fn default() -> Self {
		Self::new()
	}
}

/// Knowledge graph skeleton and per-entity topic sentiments.
#[derive(Clone, Debug, Default)]
pub struct SkeletonState {
	pub skeleton: EntityGraph,
	pub index: GraphIndex,
	pub sentiment_per_topic: Vec<EntityTopicSentiment>,
}

impl SkeletonState {
	pub fn set_skeleton(&mut self, skeleton: EntityGraph) {
		let ids: Vec<String> = skeleton.edges.iter().map(|e| e.id()).collect();
		self.index = GraphIndex::new(skeleton.edges.iter().zip(&ids).map(|(e, id)| {
			let (s, t) = e.endpoints();
			(id.as_str(), s, t)
		}));
		self.skeleton = skeleton;
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.skeleton.nodes.iter().find(|n| n.id() == id)
	}
}

#[derive(Clone, Copy)]
pub struct SkeletonStore {
	state: RwSignal<SkeletonState>,
	skeleton_tracker: RwSignal<RequestTracker>,
	sentiment_tracker: RwSignal<RequestTracker>,
}

impl SkeletonStore {
	pub fn new() -> Self {
		Self {
			state: RwSignal::new(SkeletonState::default()),
			skeleton_tracker: RwSignal::new(RequestTracker::default()),
			sentiment_tracker: RwSignal::new(RequestTracker::default()),
		}
	}

	pub fn state(&self) -> ReadSignal<SkeletonState> {
		self.state.read_only()
	}

	pub fn status(&self) -> Signal<FetchStatus> {
		let tracker = self.skeleton_tracker;
		Signal::derive(move || tracker.with(|t| t.status().clone()))
	}

	pub async fn init(&self, api: &ApiClient) {
		if let Some(skeleton) = tracked(self.skeleton_tracker, "graph skeleton", api.graph_skeleton()).await {
			self.state.update(|s| s.set_skeleton(skeleton));
		}
		if let Some(sentiments) = tracked(self.sentiment_tracker, "sentiments", api.sentiments()).await {
			self.state.update(|s| s.sentiment_per_topic = sentiments);
		}
	}
}

impl Default for SkeletonStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn set_graph_rebuilds_index_wholesale() {
		let mut state = AirportGraphState::default();
		state.set_graph(
			AirportGraph::from_value(json!({
				"nodes": [{"key": "a"}, {"key": "b"}],
				"edges": [{"key": "ab", "source": "a", "target": "b"}]
			}))
			.unwrap(),
		);
		assert_eq!(state.index.degree("a"), 1);

		state.set_graph(AirportGraph::default());
		assert_eq!(state.index.degree("a"), 0);
		assert!(state.graph.as_ref().unwrap().nodes.is_empty());
	}

	#[test]
	fn skeleton_edges_are_indexed_by_derived_id() {
		let mut state = SkeletonState::default();
		state.set_skeleton(
			EntityGraph::from_value(json!({
				"nodes": [{"type": "trip", "id": "tr1"}, {"type": "place", "id": "p1", "lat": 0.0, "lon": 0.0}],
				"edges": [{"type": "trip_to_place", "source": "tr1", "target": "p1", "time": "08:00"}]
			}))
			.unwrap(),
		);
		let hood = state.index.neighborhood("p1");
		assert!(hood.edges.contains("trip_to_place:tr1->p1"));
		assert_eq!(state.node("tr1").map(Node::label), Some("tr1"));
	}

	#[test]
	fn filter_options_failure_is_reported_apart_from_the_graph() {
		let store = AirportGraphStore::new();
		store.options_tracker.update(|t| {
			let ticket = t.begin();
			t.finish(ticket, &Err::<(), _>("HTTP error! status: 502"));
		});
		assert_eq!(
			store.options_status().get_untracked(),
			FetchStatus::Failed("HTTP error! status: 502".into())
		);
		assert_eq!(store.status().get_untracked(), FetchStatus::Idle);
	}
}
