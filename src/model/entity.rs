//! Oceanus knowledge graph: typed nodes and relations.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::airport::key_as_string;

/// Entity collections the `/entities` endpoint can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
	#[serde(rename = "ENTITY_PERSON")]
	Person,
	#[serde(rename = "ENTITY_ORGANIZATION")]
	Organization,
	#[serde(rename = "DISCUSSION")]
	Discussion,
	#[serde(rename = "PLACE")]
	Place,
	#[serde(rename = "ROADMAP_PLACE")]
	RoadmapPlace,
	#[serde(rename = "MEETING")]
	Meeting,
	#[serde(rename = "PLAN")]
	Plan,
	#[serde(rename = "TOPIC")]
	Topic,
	#[serde(rename = "TRIP")]
	Trip,
}

impl EntityKind {
	/// Query parameter value.
	pub fn as_str(self) -> &'static str {
		match self {
			EntityKind::Person => "ENTITY_PERSON",
			EntityKind::Organization => "ENTITY_ORGANIZATION",
			EntityKind::Discussion => "DISCUSSION",
			EntityKind::Place => "PLACE",
			EntityKind::RoadmapPlace => "ROADMAP_PLACE",
			EntityKind::Meeting => "MEETING",
			EntityKind::Plan => "PLAN",
			EntityKind::Topic => "TOPIC",
			EntityKind::Trip => "TRIP",
		}
	}
}

/// Source corpus a node or relation was recorded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GraphMembership {
	/// Journalist
	#[serde(rename = "jo")]
	Journalist,
	/// Filah
	#[serde(rename = "fi")]
	Filah,
	/// Trout
	#[serde(rename = "tr")]
	Trout,
}

impl GraphMembership {
	pub const ALL: [GraphMembership; 3] = [
		GraphMembership::Journalist,
		GraphMembership::Filah,
		GraphMembership::Trout,
	];

	pub fn tag(self) -> &'static str {
		match self {
			GraphMembership::Journalist => "jo",
			GraphMembership::Filah => "fi",
			GraphMembership::Trout => "tr",
		}
	}

	pub fn from_tag(tag: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|m| m.tag() == tag)
	}
}

impl fmt::Display for GraphMembership {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.tag())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
	#[serde(deserialize_with = "key_as_string")]
	pub id: String,
	#[serde(default)]
	pub in_graph: Vec<GraphMembership>,
	pub lat: f64,
	pub lon: f64,
	#[serde(default)]
	pub zone: String,
	#[serde(default)]
	pub zone_detail: Option<String>,
	#[serde(default)]
	pub label: String,
	#[serde(default)]
	pub parent: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
	#[serde(deserialize_with = "key_as_string")]
	pub id: String,
	#[serde(default)]
	pub in_graph: Vec<GraphMembership>,
	#[serde(default)]
	pub short_title: String,
	#[serde(default)]
	pub long_title: String,
	#[serde(default)]
	pub plan_type: String,
	#[serde(default)]
	pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Discussion {
	#[serde(deserialize_with = "key_as_string")]
	pub id: String,
	#[serde(default)]
	pub in_graph: Vec<GraphMembership>,
	#[serde(default)]
	pub short_title: String,
	#[serde(default)]
	pub long_title: String,
	#[serde(default)]
	pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organization {
	#[serde(deserialize_with = "key_as_string")]
	pub id: String,
	#[serde(default)]
	pub in_graph: Vec<GraphMembership>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Person {
	#[serde(deserialize_with = "key_as_string")]
	pub id: String,
	#[serde(default)]
	pub in_graph: Vec<GraphMembership>,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub role: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Topic {
	#[serde(deserialize_with = "key_as_string")]
	pub id: String,
	#[serde(default)]
	pub in_graph: Vec<GraphMembership>,
	#[serde(default)]
	pub short_topic: String,
	#[serde(default)]
	pub long_topic: String,
	#[serde(default)]
	pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
	#[serde(deserialize_with = "key_as_string")]
	pub id: String,
	#[serde(default)]
	pub in_graph: Vec<GraphMembership>,
	#[serde(default)]
	pub date: String,
	#[serde(default)]
	pub start: String,
	#[serde(default)]
	pub end: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
	#[serde(deserialize_with = "key_as_string")]
	pub id: String,
	#[serde(default)]
	pub in_graph: Vec<GraphMembership>,
	#[serde(default)]
	pub date: String,
	#[serde(default)]
	pub label: String,
}

/// A node of the knowledge graph, discriminated by its `type` field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
	#[serde(rename = "place")]
	Place(Place),
	#[serde(rename = "plan")]
	Plan(Plan),
	#[serde(rename = "discussion")]
	Discussion(Discussion),
	#[serde(rename = "entity.organization")]
	Organization(Organization),
	#[serde(rename = "ENTITY_PERSON")]
	Person(Person),
	#[serde(rename = "topic")]
	Topic(Topic),
	#[serde(rename = "trip")]
	Trip(Trip),
	#[serde(rename = "meeting")]
	Meeting(Meeting),
}

impl Node {
	pub fn id(&self) -> &str {
		match self {
			Node::Place(n) => &n.id,
			Node::Plan(n) => &n.id,
			Node::Discussion(n) => &n.id,
			Node::Organization(n) => &n.id,
			Node::Person(n) => &n.id,
			Node::Topic(n) => &n.id,
			Node::Trip(n) => &n.id,
			Node::Meeting(n) => &n.id,
		}
	}

	pub fn in_graph(&self) -> &[GraphMembership] {
		match self {
			Node::Place(n) => &n.in_graph,
			Node::Plan(n) => &n.in_graph,
			Node::Discussion(n) => &n.in_graph,
			Node::Organization(n) => &n.in_graph,
			Node::Person(n) => &n.in_graph,
			Node::Topic(n) => &n.in_graph,
			Node::Trip(n) => &n.in_graph,
			Node::Meeting(n) => &n.in_graph,
		}
	}

	pub fn kind(&self) -> EntityKind {
		match self {
			Node::Place(_) => EntityKind::Place,
			Node::Plan(_) => EntityKind::Plan,
			Node::Discussion(_) => EntityKind::Discussion,
			Node::Organization(_) => EntityKind::Organization,
			Node::Person(_) => EntityKind::Person,
			Node::Topic(_) => EntityKind::Topic,
			Node::Trip(_) => EntityKind::Trip,
			Node::Meeting(_) => EntityKind::Meeting,
		}
	}

	/// Human readable name, falling back to the id.
	pub fn label(&self) -> &str {
		let label = match self {
			Node::Place(n) => n.label.as_str(),
			Node::Plan(n) => n.short_title.as_str(),
			Node::Discussion(n) => n.short_title.as_str(),
			Node::Person(n) => n.name.as_str(),
			Node::Topic(n) => n.short_topic.as_str(),
			Node::Meeting(n) => n.label.as_str(),
			Node::Organization(_) | Node::Trip(_) => "",
		};
		if label.is_empty() { self.id() } else { label }
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
	#[serde(deserialize_with = "key_as_string")]
	pub source: String,
	#[serde(deserialize_with = "key_as_string")]
	pub target: String,
}

/// Person or organization taking part in a plan or discussion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participation {
	#[serde(deserialize_with = "key_as_string")]
	pub source: String,
	#[serde(deserialize_with = "key_as_string")]
	pub target: String,
	#[serde(default, deserialize_with = "lenient_f64")]
	pub sentiment: Option<f64>,
	#[serde(default)]
	pub reason: Option<String>,
	#[serde(default)]
	pub industry: Option<String>,
}

/// A relation of the knowledge graph, discriminated by its `type` field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Edge {
	#[serde(rename = "trip_to_place")]
	TripToPlace {
		#[serde(deserialize_with = "key_as_string")]
		source: String,
		#[serde(deserialize_with = "key_as_string")]
		target: String,
		#[serde(default)]
		time: String,
	},
	#[serde(rename = "trip_to_person")]
	TripToPerson(Link),
	#[serde(rename = "participant_plan_person")]
	PlanToPerson(Participation),
	#[serde(rename = "about_discussion_plan")]
	DiscussionToPlan {
		#[serde(deserialize_with = "key_as_string")]
		source: String,
		#[serde(deserialize_with = "key_as_string")]
		target: String,
		#[serde(default)]
		status: String,
	},
	#[serde(rename = "plan_topic")]
	PlanToTopic(Link),
	#[serde(rename = "travel_plan_place")]
	PlanToPlace(Link),
	#[serde(rename = "about_discussion_topic")]
	DiscussionToTopic(Link),
	#[serde(rename = "part_of_meeting_discussion")]
	MeetingToDiscussion(Link),
	#[serde(rename = "part_of_meeting_plan")]
	MeetingToPlan(Link),
	#[serde(rename = "participant_discussion_person")]
	DiscussionToPerson(Participation),
	#[serde(rename = "refers_to_discussion_place")]
	DiscussionToPlace(Link),
	#[serde(rename = "participant_discussion_organization")]
	DiscussionToOrganization(Participation),
	#[serde(rename = "participant_plan_organization")]
	PlanToOrganization(Participation),
}

impl Edge {
	pub fn endpoints(&self) -> (&str, &str) {
		match self {
			Edge::TripToPlace { source, target, .. }
			| Edge::DiscussionToPlan { source, target, .. } => (source, target),
			Edge::TripToPerson(l)
			| Edge::PlanToTopic(l)
			| Edge::PlanToPlace(l)
			| Edge::DiscussionToTopic(l)
			| Edge::MeetingToDiscussion(l)
			| Edge::MeetingToPlan(l)
			| Edge::DiscussionToPlace(l) => (&l.source, &l.target),
			Edge::PlanToPerson(p)
			| Edge::DiscussionToPerson(p)
			| Edge::DiscussionToOrganization(p)
			| Edge::PlanToOrganization(p) => (&p.source, &p.target),
		}
	}

	/// Wire discriminator of this relation.
	pub fn relation(&self) -> &'static str {
		match self {
			Edge::TripToPlace { .. } => "trip_to_place",
			Edge::TripToPerson(_) => "trip_to_person",
			Edge::PlanToPerson(_) => "participant_plan_person",
			Edge::DiscussionToPlan { .. } => "about_discussion_plan",
			Edge::PlanToTopic(_) => "plan_topic",
			Edge::PlanToPlace(_) => "travel_plan_place",
			Edge::DiscussionToTopic(_) => "about_discussion_topic",
			Edge::MeetingToDiscussion(_) => "part_of_meeting_discussion",
			Edge::MeetingToPlan(_) => "part_of_meeting_plan",
			Edge::DiscussionToPerson(_) => "participant_discussion_person",
			Edge::DiscussionToPlace(_) => "refers_to_discussion_place",
			Edge::DiscussionToOrganization(_) => "participant_discussion_organization",
			Edge::PlanToOrganization(_) => "participant_plan_organization",
		}
	}

	pub fn participation(&self) -> Option<&Participation> {
		match self {
			Edge::PlanToPerson(p)
			| Edge::DiscussionToPerson(p)
			| Edge::DiscussionToOrganization(p)
			| Edge::PlanToOrganization(p) => Some(p),
			_ => None,
		}
	}

	/// Stable id derived from relation and endpoints; the wire format has none.
	pub fn id(&self) -> String {
		let (source, target) = self.endpoints();
		format!("{}:{source}->{target}", self.relation())
	}
}

/// `{ nodes, links }` skeleton of the whole knowledge graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityGraph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

impl EntityGraph {
	/// Decode leniently, accepting either `edges` or `links` for the relation list.
	pub fn from_value(value: serde_json::Value) -> crate::error::Result<Self> {
		#[derive(Deserialize)]
		struct Raw {
			#[serde(default)]
			nodes: Vec<serde_json::Value>,
			#[serde(default, alias = "links")]
			edges: Vec<serde_json::Value>,
		}
		let raw: Raw = serde_json::from_value(value)?;
		Ok(Self {
			nodes: super::decode_records("node", raw.nodes),
			edges: super::decode_records("edge", raw.edges),
		})
	}
}

/// Sentiment scores arrive as numbers, numeric strings or `null`.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Num(f64),
		Str(String),
	}
	Ok(match Option::<Raw>::deserialize(deserializer)? {
		Some(Raw::Num(n)) => Some(n),
		Some(Raw::Str(s)) => s.trim().parse().ok(),
		None => None,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn nodes_decode_by_type_tag() {
		let node: Node = serde_json::from_value(json!({
			"type": "place", "id": "p1", "lat": 39.1, "lon": -165.2,
			"zone": "commercial", "label": "Haacklee Harbor", "in_graph": ["jo", "tr"]
		}))
		.unwrap();
		assert_eq!(node.id(), "p1");
		assert_eq!(node.kind(), EntityKind::Place);
		assert_eq!(
			node.in_graph(),
			&[GraphMembership::Journalist, GraphMembership::Trout]
		);

		let org: Node =
			serde_json::from_value(json!({"type": "entity.organization", "id": 12})).unwrap();
		assert_eq!(org.id(), "12");
		assert_eq!(org.label(), "12");
	}

	#[test]
	fn place_without_coordinates_is_rejected() {
		let res = serde_json::from_value::<Node>(json!({"type": "place", "id": "p2"}));
		assert!(res.is_err());
	}

	#[test]
	fn participant_edges_accept_string_sentiment() {
		let edge: Edge = serde_json::from_value(json!({
			"type": "participant_plan_person", "source": "plan_1", "target": "Boss",
			"role": "participant", "sentiment": "0.5", "industry": "tourism"
		}))
		.unwrap();
		let p = edge.participation().unwrap();
		assert_eq!(p.sentiment, Some(0.5));
		assert_eq!(edge.endpoints(), ("plan_1", "Boss"));
		assert_eq!(edge.id(), "participant_plan_person:plan_1->Boss");
	}

	#[test]
	fn skeleton_accepts_links_alias() {
		let graph = EntityGraph::from_value(json!({
			"nodes": [{"type": "topic", "id": "t1"}, {"type": "unknown", "id": "x"}],
			"links": [{"type": "plan_topic", "source": "pl", "target": "t1", "role": "plan"}]
		}))
		.unwrap();
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.edges.len(), 1);
	}
}
