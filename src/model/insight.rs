//! Pre-aggregated analytics payloads behind the chart panels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::airport::key_as_string;
use super::entity::{lenient_f64, EntityKind, GraphMembership};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopicSentiment {
	#[serde(deserialize_with = "key_as_string")]
	pub topic_id: String,
	#[serde(default, deserialize_with = "lenient_f64")]
	pub sentiment: Option<f64>,
	#[serde(default)]
	pub sentiment_recorded_in: Vec<GraphMembership>,
	#[serde(default)]
	pub topic_industry: Option<Vec<String>>,
}

/// One row of `/retrieve-sentiments`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityTopicSentiment {
	#[serde(deserialize_with = "key_as_string")]
	pub entity_id: String,
	pub entity_type: EntityKind,
	#[serde(default)]
	pub node_in_graph: Vec<GraphMembership>,
	#[serde(default)]
	pub topic_sentiments: Vec<TopicSentiment>,
}

/// One participant stance from `/industry-pro-contra-sentiments`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndustrySentiment {
	pub industry: String,
	#[serde(default, deserialize_with = "lenient_f64")]
	pub sentiment: Option<f64>,
	#[serde(default)]
	pub entity_id: Option<String>,
	#[serde(default)]
	pub topic_id: Option<String>,
	#[serde(default)]
	pub in_graph: Vec<GraphMembership>,
}

/// `/industry-interest-alignment`: industry by industry similarity.
pub type AlignmentMatrix = BTreeMap<String, BTreeMap<String, f64>>;

/// One visited place of a trip, from `/trip-activity-by-person`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripActivity {
	#[serde(deserialize_with = "key_as_string")]
	pub trip_id: String,
	#[serde(default)]
	pub date: String,
	#[serde(default)]
	pub start: String,
	#[serde(default)]
	pub end: String,
	#[serde(default)]
	pub place_id: Option<String>,
	#[serde(default)]
	pub time: Option<String>,
}

/// Node/edge totals of one source corpus, derived from
/// `/dataset-specific-nodes-edges`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCounts {
	pub dataset: GraphMembership,
	pub nodes: usize,
	pub edges: usize,
}

impl DatasetCounts {
	/// The endpoint returns `{ <collection>: [...] }`; only lengths matter here.
	pub fn from_value(
		dataset: GraphMembership,
		value: serde_json::Value,
	) -> crate::error::Result<Self> {
		let groups: BTreeMap<String, Vec<serde_json::Value>> = serde_json::from_value(value)?;
		let count = |key: &str| groups.get(key).map_or(0, Vec::len);
		Ok(Self {
			dataset,
			nodes: count("nodes"),
			edges: count("links").max(count("edges")),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn dataset_counts_use_collection_lengths() {
		let counts = DatasetCounts::from_value(
			GraphMembership::Filah,
			json!({"nodes": [{}, {}, {}], "links": [{}]}),
		)
		.unwrap();
		assert_eq!(counts.nodes, 3);
		assert_eq!(counts.edges, 1);
	}

	#[test]
	fn entity_sentiment_row_decodes() {
		let row: EntityTopicSentiment = serde_json::from_value(json!({
			"entity_id": "Seal",
			"entity_type": "ENTITY_PERSON",
			"node_in_graph": ["fi"],
			"topic_sentiments": [
				{"topic_id": "deep_fishing_dock", "sentiment": -0.5,
				 "sentiment_recorded_in": ["fi"], "topic_industry": null}
			]
		}))
		.unwrap();
		assert_eq!(row.entity_type, EntityKind::Person);
		assert_eq!(row.topic_sentiments[0].sentiment, Some(-0.5));
		assert!(row.topic_sentiments[0].topic_industry.is_none());
	}
}
