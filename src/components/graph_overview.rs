use leptos::prelude::*;

use crate::stores::filter::{ActiveFilter, FilterStore};
use crate::stores::graph::AirportGraphStore;

fn describe(filter: &ActiveFilter) -> String {
	match filter {
		ActiveFilter::Selected { key, count } => format!("{key}: {count} selected"),
		ActiveFilter::Bound { key, value } => format!("{key}: {value}"),
	}
}

/// Node/edge counts of the shown graph and the filters currently set.
#[component]
pub fn GraphOverview() -> impl IntoView {
	let graph = expect_context::<AirportGraphStore>().state();
	let filters = expect_context::<FilterStore>().filters();

	let counts = move || graph.with(|s| s.graph.as_ref().map(|g| (g.nodes.len(), g.edges.len())));
	let active = move || filters.with(|f| f.active());

	view! {
		<section class="graph-overview">
			<h3>"Overview"</h3>
			<h4>"Graph"</h4>
			{move || match counts() {
				Some((nodes, edges)) => view! {
					<p>{format!("Nodes: {nodes}")}</p>
					<p>{format!("Edges: {edges}")}</p>
				}
				.into_any(),
				None => view! { <p class="muted">"Loading graph data..."</p> }.into_any(),
			}}
			<h4>"Active Filters"</h4>
			{move || {
				let active = active();
				if active.is_empty() {
					view! { <p class="muted">"No filters applied."</p> }.into_any()
				} else {
					view! {
						<ul>{active.iter().map(|f| view! { <li>{describe(f)}</li> }).collect_view()}</ul>
					}
					.into_any()
				}
			}}
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::stores::filter::Filters;

	#[test]
	fn lists_show_counts_and_degree_bounds_show_values() {
		let filters = Filters {
			country: vec!["US".into(), "CA".into()],
			min_degree: Some(3),
			top_n: Some(10),
			..Default::default()
		};
		let lines: Vec<String> = filters.active().iter().map(describe).collect();
		assert_eq!(lines, vec!["country: 2 selected", "minDegree: 3"]);
	}
}
