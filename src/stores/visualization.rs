use std::collections::BTreeMap;

use futures::future::join_all;
use leptos::prelude::*;

use super::tracked;
use crate::api::{ApiClient, FetchStatus, RequestTracker};
use crate::error::Result;
use crate::model::entity::GraphMembership;
use crate::model::insight::{AlignmentMatrix, DatasetCounts, IndustrySentiment, TripActivity};

/// Positive / negative / neutral stance counts of one industry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndustryBreakdown {
	pub industry: String,
	pub positive: usize,
	pub negative: usize,
	pub neutral: usize,
}

impl IndustryBreakdown {
	pub fn total(&self) -> usize {
		self.positive + self.negative + self.neutral
	}
}

/// Count stances per industry, sorted by industry name. Records without a
/// score count as neutral.
pub fn industry_breakdown(records: &[IndustrySentiment]) -> Vec<IndustryBreakdown> {
	let mut by_industry: BTreeMap<&str, IndustryBreakdown> = BTreeMap::new();
	for record in records {
		let entry = by_industry
			.entry(record.industry.as_str())
			.or_insert_with(|| IndustryBreakdown {
				industry: record.industry.clone(),
				..Default::default()
			});
		match record.sentiment {
			Some(s) if s > 0.0 => entry.positive += 1,
			Some(s) if s < 0.0 => entry.negative += 1,
			_ => entry.neutral += 1,
		}
	}
	by_industry.into_values().collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualizationState {
	pub datasets_to_fetch: Vec<GraphMembership>,
	pub dataset_node_counts: Vec<DatasetCounts>,
	pub industry_sentiment_raw: Vec<IndustrySentiment>,
	pub industry_similarity: AlignmentMatrix,
	pub trip_activity: Vec<TripActivity>,
}

#[derive(Clone, Copy)]
pub struct VisualizationStore {
	state: RwSignal<VisualizationState>,
	counts_tracker: RwSignal<RequestTracker>,
	sentiment_tracker: RwSignal<RequestTracker>,
	similarity_tracker: RwSignal<RequestTracker>,
	trips_tracker: RwSignal<RequestTracker>,
}

fn status_of(tracker: RwSignal<RequestTracker>) -> Signal<FetchStatus> {
	Signal::derive(move || tracker.with(|t| t.status().clone()))
}

impl VisualizationStore {
	pub fn new() -> Self {
		Self {
			state: RwSignal::new(VisualizationState {
				datasets_to_fetch: GraphMembership::ALL.to_vec(),
				..Default::default()
			}),
			counts_tracker: RwSignal::new(RequestTracker::default()),
			sentiment_tracker: RwSignal::new(RequestTracker::default()),
			similarity_tracker: RwSignal::new(RequestTracker::default()),
			trips_tracker: RwSignal::new(RequestTracker::default()),
		}
	}

	pub fn state(&self) -> ReadSignal<VisualizationState> {
		self.state.read_only()
	}

	pub fn dataset_counts_status(&self) -> Signal<FetchStatus> {
		status_of(self.counts_tracker)
	}

	pub fn industry_sentiment_status(&self) -> Signal<FetchStatus> {
		status_of(self.sentiment_tracker)
	}

	pub fn similarity_status(&self) -> Signal<FetchStatus> {
		status_of(self.similarity_tracker)
	}

	pub fn trip_activity_status(&self) -> Signal<FetchStatus> {
		status_of(self.trips_tracker)
	}

	pub async fn init(&self, api: &ApiClient) {
		futures::join!(
			self.load_dataset_node_counts(api),
			self.load_industry_sentiments(api),
			self.load_industry_similarity(api, true),
		);
	}

	pub async fn load_dataset_node_counts(&self, api: &ApiClient) {
		let datasets = self.state.with_untracked(|s| s.datasets_to_fetch.clone());
		let fetch = async {
			join_all(datasets.into_iter().map(|d| api.dataset_counts(d)))
				.await
				.into_iter()
				.collect::<Result<Vec<_>>>()
		};
		if let Some(counts) = tracked(self.counts_tracker, "dataset node counts", fetch).await {
			self.state.update(|s| s.dataset_node_counts = counts);
		}
	}

	pub async fn load_industry_sentiments(&self, api: &ApiClient) {
		if let Some(records) = tracked(
			self.sentiment_tracker,
			"industry sentiment breakdown",
			api.industry_sentiments(),
		)
		.await
		{
			self.state.update(|s| s.industry_sentiment_raw = records);
		}
	}

	pub async fn load_industry_similarity(&self, api: &ApiClient, weight: bool) {
		if let Some(matrix) = tracked(
			self.similarity_tracker,
			"industry interest alignment",
			api.industry_alignment(weight),
		)
		.await
		{
			self.state.update(|s| s.industry_similarity = matrix);
		}
	}

	/// Person selection changes fire quickly; stale trip lists are dropped.
	pub async fn load_trip_activity(&self, api: &ApiClient, person_id: &str) {
		if let Some(trips) = tracked(
			self.trips_tracker,
			"trip activity",
			api.trip_activity(person_id),
		)
		.await
		{
			self.state.update(|s| s.trip_activity = trips);
		}
	}
}

impl Default for VisualizationStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn stance(industry: &str, sentiment: Option<f64>) -> IndustrySentiment {
		IndustrySentiment {
			industry: industry.into(),
			sentiment,
			entity_id: None,
			topic_id: None,
			in_graph: Vec::new(),
		}
	}

	#[test]
	fn breakdown_counts_stances_per_industry() {
		let rows = industry_breakdown(&[
			stance("tourism", Some(0.8)),
			stance("tourism", Some(-1.0)),
			stance("large vessel", Some(0.0)),
			stance("tourism", None),
			stance("large vessel", Some(-0.2)),
		]);
		assert_eq!(
			rows,
			vec![
				IndustryBreakdown {
					industry: "large vessel".into(),
					positive: 0,
					negative: 1,
					neutral: 1,
				},
				IndustryBreakdown {
					industry: "tourism".into(),
					positive: 1,
					negative: 1,
					neutral: 1,
				},
			]
		);
		assert_eq!(rows[1].total(), 3);
	}
}
