use leptos::prelude::*;

use crate::components::bar_chart::BarChart;
use crate::encoding::color::DEFAULT_NODE_COLOR;
use crate::model::airport::AirportField;
use crate::stats::{CHARTABLE, bar_click, node_distribution};
use crate::stores::filter::FilterStore;
use crate::stores::graph::AirportGraphStore;

fn parse_field(raw: &str) -> AirportField {
	CHARTABLE
		.into_iter()
		.find(|f| f.as_str() == raw)
		.unwrap_or(AirportField::Continent)
}

/// Node distribution by a chartable attribute. Clicking a bar narrows the
/// matching filter and drills down to countries.
#[component]
pub fn GraphStats() -> impl IntoView {
	let graph = expect_context::<AirportGraphStore>().state();
	let filters = expect_context::<FilterStore>();
	let field = RwSignal::new(AirportField::Continent);

	let bars = Signal::derive(move || {
		let field = field.get();
		graph.with(|s| s.graph.as_ref().map(|g| node_distribution(g, field)).unwrap_or_default())
	});
	let selected = Signal::derive(move || filters.filters().with(|f| f.field(field.get()).to_vec()));
	let on_select = Callback::new(move |value: String| {
		let (patch, next) = filters.filters().with_untracked(|f| bar_click(f, field.get_untracked(), &value));
		if let Some(patch) = patch {
			filters.set_filters(patch);
		}
		field.set(next);
	});

	view! {
		<section class="graph-stats">
			<h3>"Graph Statistics"</h3>
			<p>
				{move || graph.with(|s| s.graph.as_ref().map_or(0, |g| g.nodes.len()))}
				" nodes, "
				{move || graph.with(|s| s.graph.as_ref().map_or(0, |g| g.edges.len()))}
				" edges"
			</p>
			<label>
				"Group by"
				<select
					prop:value=move || field.get().as_str()
					on:change=move |ev| field.set(parse_field(&event_target_value(&ev)))
				>
					{CHARTABLE
						.into_iter()
						.map(|f| view! { <option value=f.as_str()>{f.as_str()}</option> })
						.collect_view()}
				</select>
			</label>
			<BarChart bars=bars on_select=on_select selected=selected color=DEFAULT_NODE_COLOR />
		</section>
	}
}
