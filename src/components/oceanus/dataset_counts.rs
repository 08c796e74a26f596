use leptos::prelude::*;

use crate::components::status::FetchStatusLine;
use crate::encoding::color::dataset_color;
use crate::stores::scale::ScaleStore;
use crate::stores::visualization::VisualizationStore;

/// Clicking the active dataset again goes back to all datasets.
fn next_dataset(active: &str, clicked: &str) -> String {
	if active == clicked { "all".into() } else { clicked.into() }
}

/// Node and edge totals per source corpus; a row click scopes the views to it.
#[component]
pub fn DatasetCounts() -> impl IntoView {
	let viz = expect_context::<VisualizationStore>();
	let state = viz.state();
	let scale = expect_context::<ScaleStore>();

	let rows = move || {
		let active = scale.state().with(|s| s.active_dataset.clone());
		state.with(|s| {
			let max = s.dataset_node_counts.iter().map(|c| c.nodes).max().unwrap_or(0).max(1);
			s.dataset_node_counts
				.iter()
				.map(|counts| {
					let tag = counts.dataset.tag();
					let width = format!("{:.1}%", 100.0 * counts.nodes as f64 / max as f64);
					let is_active = active == tag;
					let next = next_dataset(&active, tag);
					view! {
						<div class="bar-row" class:active=is_active on:click=move |_| scale.set_active_dataset(next.clone())>
							<span class="bar-label">{tag}</span>
							<span class="bar" style:width=width style:background-color=dataset_color(tag)></span>
							<span class="bar-count">{format!("{} nodes / {} edges", counts.nodes, counts.edges)}</span>
						</div>
					}
				})
				.collect_view()
		})
	};

	view! {
		<section class="dataset-counts">
			<h3>"Datasets"</h3>
			<FetchStatusLine status=viz.dataset_counts_status() what="dataset counts" />
			<div class="bar-chart">{rows}</div>
		</section>
	}
}
