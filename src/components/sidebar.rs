//! Airport explorer sidebar: filters, encodings and the apply/reset actions.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::components::graph_overview::GraphOverview;
use crate::components::status::FetchStatusLine;
use crate::model::airport::AirportField;
use crate::stores::filter::{FilterPatch, FilterStore};
use crate::stores::graph::AirportGraphStore;
use crate::stores::highlight::{EdgeColorAttribute, HighlightStore, NodeColorAttribute};

/// Display order of the categorical filters.
const FILTER_FIELDS: [(AirportField, &str); 4] = [
	(AirportField::Region, "Region"),
	(AirportField::Country, "Country"),
	(AirportField::City, "City"),
	(AirportField::Continent, "Continent"),
];

/// `values` with `value` added or removed.
fn toggle_value(values: &[String], value: &str, on: bool) -> Vec<String> {
	let mut next: Vec<String> = values.iter().filter(|v| *v != value).cloned().collect();
	if on {
		next.push(value.to_string());
	}
	next
}

/// Empty or unparsable input clears the bound.
fn parse_bound(raw: &str) -> Option<i64> {
	raw.trim().parse().ok()
}

fn color_attribute_value(attribute: Option<NodeColorAttribute>) -> &'static str {
	match attribute {
		None => "none",
		Some(NodeColorAttribute::Region) => "region",
		Some(NodeColorAttribute::Continent) => "continent",
	}
}

fn parse_color_attribute(raw: &str) -> Option<NodeColorAttribute> {
	match raw {
		"region" => Some(NodeColorAttribute::Region),
		"continent" => Some(NodeColorAttribute::Continent),
		_ => None,
	}
}

#[component]
fn FilterSelect(field: AirportField, label: &'static str) -> impl IntoView {
	let filters = expect_context::<FilterStore>();
	let graph = expect_context::<AirportGraphStore>();
	let options = move || {
		graph
			.state()
			.with(|s| s.filter_options.as_ref().map(|o| o.options(field).to_vec()))
	};

	view! {
		<fieldset class="filter-select">
			<legend>{label}</legend>
			{move || match options() {
				None => view! { <p class="muted">"Loading filters..."</p> }.into_any(),
				Some(options) => options
					.into_iter()
					.map(|option| {
						let shown = if option.is_empty() { "Unknown".to_string() } else { option.clone() };
						let checked_value = option.clone();
						let checked = move || filters.filters().with(|f| f.field(field).contains(&checked_value));
						view! {
							<label class="option">
								<input
									type="checkbox"
									prop:checked=checked
									on:change=move |ev| {
										let on = event_target_checked(&ev);
										let values = filters
											.filters()
											.with_untracked(|f| toggle_value(f.field(field), &option, on));
										filters.set_filters(FilterPatch::field(field, values));
									}
								/>
								{shown}
							</label>
						}
					})
					.collect_view()
					.into_any(),
			}}
		</fieldset>
	}
}

#[component]
fn BoundInput(label: &'static str, value: Signal<Option<i64>>, on_set: Callback<Option<i64>>) -> impl IntoView {
	view! {
		<label class="bound">
			{label}
			<input
				type="number"
				prop:value=move || value.get().map(|v| v.to_string()).unwrap_or_default()
				on:change=move |ev| on_set.run(parse_bound(&event_target_value(&ev)))
			/>
		</label>
	}
}

#[component]
fn NumericFilters() -> impl IntoView {
	let store = expect_context::<FilterStore>();
	let filters = store.filters();

	view! {
		<fieldset class="numeric-filters">
			<legend>"Bounds"</legend>
			<BoundInput
				label="Min degree"
				value=Signal::derive(move || filters.with(|f| f.min_degree))
				on_set=Callback::new(move |v| store.set_filters(FilterPatch { min_degree: Some(v), ..Default::default() }))
			/>
			<BoundInput
				label="Max degree"
				value=Signal::derive(move || filters.with(|f| f.max_degree))
				on_set=Callback::new(move |v| store.set_filters(FilterPatch { max_degree: Some(v), ..Default::default() }))
			/>
			<BoundInput
				label="Min runways"
				value=Signal::derive(move || filters.with(|f| f.min_runways))
				on_set=Callback::new(move |v| store.set_filters(FilterPatch { min_runways: Some(v), ..Default::default() }))
			/>
			<BoundInput
				label="Max runways"
				value=Signal::derive(move || filters.with(|f| f.max_runways))
				on_set=Callback::new(move |v| store.set_filters(FilterPatch { max_runways: Some(v), ..Default::default() }))
			/>
			<BoundInput
				label="Top N by degree"
				value=Signal::derive(move || filters.with(|f| f.top_n))
				on_set=Callback::new(move |v| store.set_filters(FilterPatch { top_n: Some(v), ..Default::default() }))
			/>
		</fieldset>
	}
}

/// Colour, edge class and size selections of the canvas.
#[component]
pub fn EncodingControls() -> impl IntoView {
	let highlight = expect_context::<HighlightStore>();
	let state = highlight.state();

	view! {
		<fieldset class="encoding-controls">
			<legend>"Encoding"</legend>
			<label>
				"Node colour"
				<select
					prop:value=move || color_attribute_value(state.with(|s| s.color_attribute))
					on:change=move |ev| highlight.set_color_attribute(parse_color_attribute(&event_target_value(&ev)))
				>
					<option value="none">"None"</option>
					<option value="region">"Region"</option>
					<option value="continent">"Continent"</option>
				</select>
			</label>
			<label>
				"Edge class"
				<select
					prop:value=move || state.with(|s| s.edge_color_attribute.as_str())
					on:change=move |ev| highlight.set_edge_color_attribute(EdgeColorAttribute::parse(&event_target_value(&ev)))
				>
					{EdgeColorAttribute::ALL
						.into_iter()
						.map(|a| view! { <option value=a.as_str()>{a.as_str()}</option> })
						.collect_view()}
				</select>
			</label>
			<label>
				<input
					type="checkbox"
					prop:checked=move || state.with(|s| s.size_by_degree)
					on:change=move |ev| highlight.set_size_by_degree(event_target_checked(&ev))
				/>
				"Size by degree"
			</label>
		</fieldset>
	}
}

#[component]
pub fn Sidebar() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let filters = expect_context::<FilterStore>();
	let graph = expect_context::<AirportGraphStore>();
	let status = graph.status();

	let apply = move |_| {
		let api = api.clone();
		let current = filters.filters().get_untracked();
		spawn_local(async move { graph.apply_filters(&api, current).await });
	};

	view! {
		<aside class="sidebar">
			<h2>"Filters"</h2>
			<div class="sidebar-body">
				{FILTER_FIELDS
					.into_iter()
					.map(|(field, label)| view! { <FilterSelect field=field label=label /> })
					.collect_view()}
				<NumericFilters />
				<EncodingControls />
			</div>
			<GraphOverview />
			<FetchStatusLine status=graph.options_status() what="filter options" />
			<FetchStatusLine status=status what="graph" />
			<div class="sidebar-actions">
				<button class="primary" on:click=apply disabled=move || status.with(|s| s.is_loading())>
					"Apply Filters"
				</button>
				<button class="bordered" on:click=move |_| filters.reset_filters()>
					"Reset Filters"
				</button>
			</div>
		</aside>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn toggle_value_adds_once_and_removes() {
		let values = vec!["DE".to_string()];
		assert_eq!(toggle_value(&values, "FR", true), vec!["DE", "FR"]);
		assert_eq!(toggle_value(&values, "DE", true), vec!["DE"]);
		assert!(toggle_value(&values, "DE", false).is_empty());
	}

	#[test]
	fn blank_bound_clears_and_values_pass_through_unvalidated() {
		assert_eq!(parse_bound(""), None);
		assert_eq!(parse_bound(" 12 "), Some(12));
		assert_eq!(parse_bound("-3"), Some(-3));
		assert_eq!(parse_bound("abc"), None);
	}

	#[test]
	fn color_attribute_select_values_round_trip() {
		for attribute in [None, Some(NodeColorAttribute::Region), Some(NodeColorAttribute::Continent)] {
			assert_eq!(parse_color_attribute(color_attribute_value(attribute)), attribute);
		}
	}
}
