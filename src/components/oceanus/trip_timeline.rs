use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::components::bar_chart::BarChart;
use crate::components::status::FetchStatusLine;
use crate::encoding::color::NEUTRAL_BASE;
use crate::model::insight::TripActivity;
use crate::stats::tally;
use crate::stores::entity::EntityStore;
use crate::stores::linking::LinkingStore;
use crate::stores::visualization::VisualizationStore;

/// One trip with the places it visited, in visit order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripSummary {
	pub trip_id: String,
	pub date: String,
	pub start: String,
	pub end: String,
	pub place_ids: Vec<String>,
}

/// Fold per-place activity rows into trips, ordered by date then start time.
pub fn group_trips(records: &[TripActivity]) -> Vec<TripSummary> {
	let mut trips: Vec<TripSummary> = Vec::new();
	for record in records {
		let idx = match trips.iter().position(|t| t.trip_id == record.trip_id) {
			Some(idx) => idx,
			None => {
				trips.push(TripSummary {
					trip_id: record.trip_id.clone(),
					date: record.date.clone(),
					start: record.start.clone(),
					end: record.end.clone(),
					place_ids: Vec::new(),
				});
				trips.len() - 1
			}
		};
		if let Some(place) = &record.place_id {
			trips[idx].place_ids.push(place.clone());
		}
	}
	trips.sort_by(|a, b| (&a.date, &a.start).cmp(&(&b.date, &b.start)));
	trips
}

/// Trips of the selected person. Hovering a trip highlights its places on the
/// region map.
#[component]
pub fn TripTimeline() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let viz = expect_context::<VisualizationStore>();
	let entities = expect_context::<EntityStore>().state();
	let linking = expect_context::<LinkingStore>();

	let person = move || linking.state().with(|l| l.selected_person_id.clone());
	Effect::new(move |_| {
		if let Some(id) = person() {
			let api = api.clone();
			spawn_local(async move { viz.load_trip_activity(&api, &id).await });
		}
	});

	let trips = Memo::new(move |_| viz.state().with(|s| group_trips(&s.trip_activity)));
	let visited = Signal::derive(move || {
		viz.state().with(|s| tally(s.trip_activity.iter().filter_map(|t| t.place_id.as_deref())))
	});
	let place_label = move |id: &str| {
		entities.with(|e| e.place(id).map_or_else(|| id.to_string(), |p| p.label.clone()))
	};

	let person_options = move || {
		entities.with(|e| {
			e.persons
				.iter()
				.map(|p| {
					let shown = if p.name.is_empty() { p.id.clone() } else { p.name.clone() };
					view! { <option value=p.id.clone()>{shown}</option> }
				})
				.collect_view()
		})
	};

	let rows = move || {
		let highlighted = linking.state().with(|l| l.highlighted_trips.clone());
		trips
			.get()
			.into_iter()
			.map(|trip| {
				let is_highlighted = highlighted.contains(&trip.trip_id);
				let places = trip.place_ids.iter().map(|id| place_label(id)).collect::<Vec<_>>().join(" -> ");
				let (trip_id, place_ids) = (trip.trip_id.clone(), trip.place_ids.clone());
				view! {
					<li
						class="trip"
						class:active=is_highlighted
						on:mouseenter=move |_| {
							linking.set_highlighted_trips(vec![trip_id.clone()]);
							linking.set_highlighted_place_ids(place_ids.clone());
						}
						on:mouseleave=move |_| {
							linking.set_highlighted_trips(Vec::new());
							linking.set_highlighted_place_ids(Vec::new());
						}
					>
						<span class="trip-time">{format!("{} {}-{}", trip.date, trip.start, trip.end)}</span>
						<span class="trip-places">{places}</span>
					</li>
				}
			})
			.collect_view()
	};

	view! {
		<section class="trip-timeline">
			<h3>"Trips"</h3>
			<label>
				"Person"
				<select
					prop:value=move || person().unwrap_or_default()
					on:change=move |ev| {
						let id = event_target_value(&ev);
						linking.select_person((!id.is_empty()).then_some(id));
					}
				>
					<option value="">"Select a person"</option>
					{person_options}
				</select>
			</label>
			<FetchStatusLine status=viz.trip_activity_status() what="trip activity" />
			<ul class="trips">{rows}</ul>
			<h4>"Most visited"</h4>
			<BarChart bars=visited color=NEUTRAL_BASE />
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn rows_fold_into_date_ordered_trips() {
		let records: Vec<TripActivity> = serde_json::from_value(json!([
			{"trip_id": "t2", "date": "2040-10-02", "start": "08:00", "end": "10:00", "place_id": "dock"},
			{"trip_id": 7, "date": "2040-10-01", "start": "09:00", "end": "11:00", "place_id": "hall"},
			{"trip_id": "t2", "date": "2040-10-02", "start": "08:00", "end": "10:00", "place_id": "reef"},
			{"trip_id": "t3", "date": "2040-10-01", "start": "07:00", "end": "08:00"}
		]))
		.unwrap();

		let trips = group_trips(&records);
		let order: Vec<_> = trips.iter().map(|t| t.trip_id.as_str()).collect();
		assert_eq!(order, vec!["t3", "7", "t2"]);
		assert_eq!(trips[2].place_ids, vec!["dock", "reef"]);
		assert!(trips[0].place_ids.is_empty());
	}
}
