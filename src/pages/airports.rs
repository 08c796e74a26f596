use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::components::force_graph::{CategorySource, Encoding, ForceGraphCanvas, GraphData, Layout};
use crate::components::graph_stats::GraphStats;
use crate::components::sidebar::Sidebar;
use crate::encoding::ColorMap;
use crate::model::airport::AirportAttributes;
use crate::stores::filter::FilterStore;
use crate::stores::graph::AirportGraphStore;
use crate::stores::highlight::{HighlightState, HighlightStore};

fn describe_airport(attrs: &AirportAttributes) -> Vec<(&'static str, String)> {
	let mut rows = Vec::new();
	let mut text = |key, value: Option<&String>| {
		if let Some(v) = value.filter(|v| !v.is_empty()) {
			rows.push((key, v.clone()));
		}
	};
	text("Name", attrs.descr.as_ref());
	text("City", attrs.city.as_ref());
	text("Country", attrs.country.as_ref());
	text("Region", attrs.region.as_ref());
	text("Continent", attrs.continent.as_ref());
	if let Some(runways) = attrs.runways {
		rows.push(("Runways", runways.to_string()));
	}
	if let Some(longest) = attrs.longest {
		rows.push(("Longest runway", format!("{longest} ft")));
	}
	rows
}

const LEGEND_LIMIT: usize = 12;

/// First legend entries by value, and how many were left out.
fn legend_entries(colors: &ColorMap) -> (Vec<(String, String)>, usize) {
	let shown: Vec<(String, String)> = colors
		.legend()
		.into_iter()
		.take(LEGEND_LIMIT)
		.map(|(value, color)| (value.to_string(), color.to_string()))
		.collect();
	let hidden = colors.len() - shown.len();
	(shown, hidden)
}

#[component]
fn ColorLegend(#[prop(into)] colors: Signal<Option<ColorMap>>) -> impl IntoView {
	move || {
		colors.with(|colors| {
			let colors = colors.as_ref().filter(|c| !c.is_empty())?;
			let (shown, hidden) = legend_entries(colors);
			let rows = shown
				.into_iter()
				.map(|(value, color)| {
					view! {
						<li>
							<span class="swatch" style:background-color=color></span>
							{value}
						</li>
					}
				})
				.collect_view();
			Some(view! {
				<ul class="color-legend">
					{rows}
					{(hidden > 0).then(|| view! { <li class="muted">{format!("+{hidden} more")}</li> })}
				</ul>
			})
		})
	}
}

#[component]
fn HoverCard() -> impl IntoView {
	let highlight = expect_context::<HighlightStore>().state();

	move || {
		highlight.with(|h| {
			let attrs = h.hovered_node_data.as_ref()?;
			let title = attrs.label().unwrap_or_else(|| h.hovered_node_id.clone().unwrap_or_default());
			let rows = describe_airport(attrs)
				.into_iter()
				.map(|(k, v)| view! { <dt>{k}</dt><dd>{v}</dd> })
				.collect_view();
			Some(view! {
				<div class="hover-card">
					<h4>{title}</h4>
					<dl>{rows}</dl>
					<p class="muted">{format!("{} connected airports", h.highlighted_nodes.len().saturating_sub(1))}</p>
				</div>
			})
		})
	}
}

/// Airport route graph over a map, with filters and statistics.
#[component]
pub fn Airports() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let graph = expect_context::<AirportGraphStore>();
	let filters = expect_context::<FilterStore>();
	let highlight = expect_context::<HighlightStore>();

	spawn_local(async move {
		let current = filters.filters().get_untracked();
		futures::join!(graph.load_filter_options(&api), graph.apply_filters(&api, current));
	});

	let data = Memo::new(move |_| {
		graph
			.state()
			.with(|s| s.graph.as_ref().map(GraphData::from).unwrap_or_default())
	});
	// Colour map rebuilt only when the graph or the colour attribute changes.
	let colored = Memo::new(move |_| {
		let category = highlight
			.state()
			.with(|h| h.color_attribute)
			.map_or(CategorySource::None, |a| CategorySource::Field(a.field()));
		data.with(|d| Encoding::new(HighlightState::default(), d, category))
	});
	let encoding = Memo::new(move |_| Encoding {
		highlight: highlight.state().get(),
		..colored.get()
	});

	let on_hover = Callback::new(move |id: Option<String>| match id {
		Some(id) => graph.state().with_untracked(|s| {
			let data = s
				.graph
				.as_ref()
				.and_then(|g| g.node(&id))
				.map(|n| n.attributes.clone());
			highlight.hover(&s.index, &id, data);
		}),
		None => highlight.clear_highlight(),
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="dashboard airports">
				<div class="map-graph">
					<ForceGraphCanvas data=data encoding=encoding layout=Layout::Geographic on_hover=on_hover />
					<div class="graph-overlay">
						<h1>"Airport Routes"</h1>
						<p class="subtitle">"Hover an airport to highlight its routes. Scroll to zoom. Drag to pan."</p>
					</div>
					<HoverCard />
					<ColorLegend colors=Signal::derive(move || colored.with(|e| e.colors.clone())) />
				</div>
				<GraphStats />
				<Sidebar />
			</div>
		</ErrorBoundary>
	}
}
