use futures::future::join_all;
use leptos::prelude::*;
use log::{error, info};

use crate::api::{ApiClient, FetchStatus, RequestTracker};
use crate::error::AppError;
use crate::model::entity::{
	EntityKind, Meeting, Node, Organization, Person, Place, Plan, Topic, Trip,
};

/// Collections loaded by `init`, in the order they are requested.
const INIT_KINDS: [EntityKind; 7] = [
	EntityKind::Organization,
	EntityKind::Place,
	EntityKind::Meeting,
	EntityKind::Plan,
	EntityKind::Topic,
	EntityKind::Trip,
	EntityKind::Person,
];

/// Typed entity collections, each replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityState {
	pub persons: Vec<Person>,
	pub organizations: Vec<Organization>,
	pub places: Vec<Place>,
	pub meetings: Vec<Meeting>,
	pub plans: Vec<Plan>,
	pub topics: Vec<Topic>,
	pub trips: Vec<Trip>,
}

macro_rules! pick {
	($nodes:expr, $variant:path) => {
		$nodes
			.into_iter()
			.filter_map(|n| match n {
				$variant(inner) => Some(inner),
				_ => None,
			})
			.collect()
	};
}

impl EntityState {
	/// Replace the collection for `kind`. Nodes of another type are dropped.
	pub fn set(&mut self, kind: EntityKind, nodes: Vec<Node>) {
		match kind {
			EntityKind::Person => self.persons = pick!(nodes, Node::Person),
			EntityKind::Organization => self.organizations = pick!(nodes, Node::Organization),
			EntityKind::Place | EntityKind::RoadmapPlace => self.places = pick!(nodes, Node::Place),
			EntityKind::Meeting => self.meetings = pick!(nodes, Node::Meeting),
			EntityKind::Plan => self.plans = pick!(nodes, Node::Plan),
			EntityKind::Topic => self.topics = pick!(nodes, Node::Topic),
			EntityKind::Trip => self.trips = pick!(nodes, Node::Trip),
			EntityKind::Discussion => {}
		}
	}

	pub fn person(&self, id: &str) -> Option<&Person> {
		self.persons.iter().find(|p| p.id == id)
	}

	pub fn place(&self, id: &str) -> Option<&Place> {
		self.places.iter().find(|p| p.id == id)
	}
}

#[derive(Clone, Copy)]
pub struct EntityStore {
	state: RwSignal<EntityState>,
	tracker: RwSignal<RequestTracker>,
}

impl EntityStore {
	pub fn new() -> Self {
		Self {
			state: RwSignal::new(EntityState::default()),
			tracker: RwSignal::new(RequestTracker::default()),
		}
	}

	pub fn state(&self) -> ReadSignal<EntityState> {
		self.state.read_only()
	}

	pub fn status(&self) -> Signal<FetchStatus> {
		let tracker = self.tracker;
		Signal::derive(move || tracker.with(|t| t.status().clone()))
	}

	/// Fetch every collection concurrently. Collections that fail keep their
	/// previous contents; the status reports the first failure.
	pub async fn init(&self, api: &ApiClient) {
		let Some(ticket) = self.tracker.try_update(RequestTracker::begin) else {
			return;
		};
		let results = join_all(INIT_KINDS.map(|kind| async move { (kind, api.entities(kind).await) }))
			.await;

		let mut first_error: Option<AppError> = None;
		let mut loaded = Vec::new();
		for (kind, result) in results {
			match result {
				Ok(nodes) => loaded.push((kind, nodes)),
				Err(e) => {
					error!("Error fetching {} entities: {e}", kind.as_str());
					first_error.get_or_insert(e);
				}
			}
		}
		let outcome = first_error.map_or(Ok(()), Err);
		if self.tracker.try_update(|t| t.finish(ticket, &outcome)) != Some(true) {
			return;
		}
		self.state.update(|s| {
			for (kind, nodes) in loaded {
				s.set(kind, nodes);
			}
		});
		self.state.with_untracked(|s| {
			info!(
				"Loaded {} persons, {} places, {} trips",
				s.persons.len(),
				s.places.len(),
				s.trips.len()
			)
		});
	}
}

impl Default for EntityStore {
	fn default() -> Self {
		Self::new()
	}
}
