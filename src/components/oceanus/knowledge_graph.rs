//! Force-laid-out knowledge graph skeleton with dataset scoping and an
//! entity detail panel.

use leptos::prelude::*;

use crate::components::force_graph::{CategorySource, Encoding, ForceGraphCanvas, GraphData, Layout};
use crate::components::status::FetchStatusLine;
use crate::encoding::color::{SENTIMENT_MID, sentiment_color};
use crate::model::entity::{Edge, EntityGraph, GraphMembership, Node, Participation};
use crate::model::insight::{EntityTopicSentiment, TopicSentiment};
use crate::stores::graph::{SkeletonState, SkeletonStore};
use crate::stores::highlight::HighlightState;
use crate::stores::linking::LinkingStore;
use crate::stores::scale::ScaleStore;

/// Topic stances of one entity, restricted to those recorded in `dataset`
/// when one is selected.
pub fn entity_sentiments<'a>(
	rows: &'a [EntityTopicSentiment],
	entity_id: &str,
	dataset: Option<GraphMembership>,
) -> Vec<&'a TopicSentiment> {
	rows.iter()
		.filter(|row| row.entity_id == entity_id)
		.flat_map(|row| &row.topic_sentiments)
		.filter(|t| dataset.is_none_or(|d| t.sentiment_recorded_in.contains(&d)))
		.collect()
}

/// Plans and discussions the entity takes part in, with the stance it took.
/// Participation edges run from the plan or discussion to the participant.
pub fn participations<'a>(graph: &'a EntityGraph, entity_id: &str) -> Vec<(&'a str, &'a Participation)> {
	graph
		.edges
		.iter()
		.filter_map(Edge::participation)
		.filter_map(|p| match (p.source == entity_id, p.target == entity_id) {
			(_, true) => Some((p.source.as_str(), p)),
			(true, false) => Some((p.target.as_str(), p)),
			_ => None,
		})
		.collect()
}

/// One participation as listed in the entity details.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipationRow {
	pub label: String,
	pub color: String,
	pub reason: String,
}

pub fn participation_rows(state: &SkeletonState, entity_id: &str) -> Vec<ParticipationRow> {
	participations(&state.skeleton, entity_id)
		.into_iter()
		.map(|(other, p)| ParticipationRow {
			label: state.node(other).map_or(other, Node::label).to_string(),
			color: p.sentiment.map_or(SENTIMENT_MID.to_string(), sentiment_color),
			reason: p.reason.clone().unwrap_or_default(),
		})
		.collect()
}

/// Clicking a person also makes them the subject of the trip timeline.
fn selected_person(state: &SkeletonState, clicked: &str) -> Option<String> {
	matches!(state.node(clicked), Some(Node::Person(_))).then(|| clicked.to_string())
}

#[component]
fn DatasetScope() -> impl IntoView {
	let scale = expect_context::<ScaleStore>();
	let state = scale.state();

	view! {
		<div class="dataset-scope">
			<label>
				"Dataset"
				<select
					prop:value=move || state.with(|s| s.active_dataset.clone())
					on:change=move |ev| scale.set_active_dataset(event_target_value(&ev))
				>
					<option value="all">"all"</option>
					{move || {
						state
							.with(|s| s.datasets.clone())
							.into_iter()
							.map(|tag| {
								let value = tag.clone();
								view! { <option value=value>{tag}</option> }
							})
							.collect_view()
					}}
				</select>
			</label>
			<label>
				<input
					type="checkbox"
					prop:checked=move || state.with(|s| s.exclude_organizations)
					on:change=move |ev| scale.set_exclude_organizations(event_target_checked(&ev))
				/>
				"Exclude organizations"
			</label>
		</div>
	}
}

#[component]
fn EntityDetails() -> impl IntoView {
	let skeleton = expect_context::<SkeletonStore>().state();
	let linking = expect_context::<LinkingStore>().state();
	let scale = expect_context::<ScaleStore>().state();

	move || {
		let id = linking.with(|l| l.selected_entity_id.clone())?;
		let dataset = scale.with(|s| s.active_membership());
		skeleton.with(|s| {
			let node = s.node(&id)?;
			let sentiments = entity_sentiments(&s.sentiment_per_topic, &id, dataset)
				.into_iter()
				.map(|t| {
					let color = t.sentiment.map_or(SENTIMENT_MID.to_string(), sentiment_color);
					let score = t.sentiment.map_or("n/a".to_string(), |v| format!("{v:+.2}"));
					view! {
						<li>
							<span class="swatch" style:background-color=color></span>
							{format!("{} {score}", t.topic_id)}
						</li>
					}
				})
				.collect_view();
			let taken_part = participation_rows(s, &id)
				.into_iter()
				.map(|row| {
					view! {
						<li title=row.reason>
							<span class="swatch" style:background-color=row.color></span>
							{row.label}
						</li>
					}
				})
				.collect_view();
			let datasets = node
				.in_graph()
				.iter()
				.map(|m| m.tag())
				.collect::<Vec<_>>()
				.join(", ");
			Some(view! {
				<section class="entity-details">
					<h4>{node.label().to_string()}</h4>
					<p class="muted">{format!("{} - {datasets}", node.kind().as_str())}</p>
					<ul class="topic-sentiments">{sentiments}</ul>
					<ul class="participations">{taken_part}</ul>
				</section>
			})
		})
	}
}

#[component]
pub fn KnowledgeGraph() -> impl IntoView {
	let store = expect_context::<SkeletonStore>();
	let skeleton = store.state();
	let scale = expect_context::<ScaleStore>().state();
	let linking = expect_context::<LinkingStore>();
	let highlight = RwSignal::new(HighlightState::default());

	let data = Memo::new(move |_| {
		scale.with(|sc| skeleton.with(|s| GraphData::from_entities(&s.skeleton, |n| sc.includes(n))))
	});
	let encoding = Memo::new(move |_| {
		data.with(|d| Encoding::new(highlight.get(), d, CategorySource::Kind))
	});

	let on_hover = Callback::new(move |id: Option<String>| match id {
		Some(id) => skeleton.with_untracked(|s| highlight.update(|h| h.hover(&s.index, &id, None))),
		None => highlight.update(HighlightState::clear_highlight),
	});
	let on_click = Callback::new(move |id: String| {
		if let Some(person) = skeleton.with_untracked(|s| selected_person(s, &id)) {
			linking.select_person(Some(person));
		}
		linking.select_entity(Some(id));
	});

	view! {
		<section class="knowledge-graph">
			<h3>"Knowledge graph"</h3>
			<DatasetScope />
			<FetchStatusLine status=store.status() what="graph skeleton" />
			<div class="graph-canvas">
				<ForceGraphCanvas data=data encoding=encoding layout=Layout::Force on_hover=on_hover on_click=on_click />
			</div>
			<EntityDetails />
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn sentiments_follow_entity_and_dataset() {
		let rows: Vec<EntityTopicSentiment> = serde_json::from_value(json!([
			{
				"entity_id": "Boss",
				"entity_type": "ENTITY_PERSON",
				"topic_sentiments": [
					{"topic_id": "t1", "sentiment": 0.5, "sentiment_recorded_in": ["jo"]},
					{"topic_id": "t2", "sentiment": -1, "sentiment_recorded_in": ["fi", "tr"]}
				]
			},
			{"entity_id": "Other", "entity_type": "ENTITY_PERSON", "topic_sentiments": [{"topic_id": "t3"}]}
		]))
		.unwrap();

		assert_eq!(entity_sentiments(&rows, "Boss", None).len(), 2);
		let fi = entity_sentiments(&rows, "Boss", Some(GraphMembership::Filah));
		assert_eq!(fi.len(), 1);
		assert_eq!(fi[0].topic_id, "t2");
		assert!(entity_sentiments(&rows, "Nobody", None).is_empty());
	}

	#[test]
	fn participations_name_the_plan_or_discussion() {
		let graph = EntityGraph::from_value(json!({
			"nodes": [],
			"edges": [
				{"type": "participant_plan_person", "source": "plan1", "target": "Boss", "sentiment": "0.8"},
				{"type": "participant_discussion_person", "source": "talk", "target": "Boss", "reason": "quota"},
				{"type": "participant_plan_person", "source": "plan1", "target": "Other"},
				{"type": "trip_to_person", "source": "trip", "target": "Boss"}
			]
		}))
		.unwrap();

		let found = participations(&graph, "Boss");
		let others: Vec<_> = found.iter().map(|(other, _)| *other).collect();
		assert_eq!(others, vec!["plan1", "talk"]);
		assert_eq!(found[0].1.sentiment, Some(0.8));
		assert_eq!(participations(&graph, "plan1").len(), 2);
	}

	#[test]
	fn participation_rows_label_and_color_each_participation() {
		let mut state = SkeletonState::default();
		state.set_skeleton(
			EntityGraph::from_value(json!({
				"nodes": [
					{"type": "plan", "id": "plan1", "short_title": "Expand the harbour"},
					{"type": "ENTITY_PERSON", "id": "Boss", "name": "The Boss"}
				],
				"edges": [
					{"type": "participant_plan_person", "source": "plan1", "target": "Boss", "sentiment": 1.0, "reason": "jobs"},
					{"type": "participant_discussion_person", "source": "talk", "target": "Boss"}
				]
			}))
			.unwrap(),
		);

		let rows = participation_rows(&state, "Boss");
		assert_eq!(rows.len(), participations(&state.skeleton, "Boss").len());
		assert_eq!(rows[0].label, "Expand the harbour");
		assert_eq!(rows[0].color, sentiment_color(1.0));
		assert_eq!(rows[0].reason, "jobs");
		assert_eq!(selected_person(&state, "Boss").as_deref(), Some("Boss"));
		assert_eq!(selected_person(&state, "plan1"), None);
		// unknown counterparts fall back to their id
		assert_eq!(rows[1].label, "talk");
		assert_eq!(rows[1].color, SENTIMENT_MID);
	}
}
