use leptos::prelude::*;

use crate::stats::Bar;

/// Horizontal bars scaled to the largest count.
#[component]
pub fn BarChart(
	#[prop(into)] bars: Signal<Vec<Bar>>,
	/// Called with the bar name on click.
	#[prop(optional, into)]
	on_select: Option<Callback<String>>,
	/// Names drawn emphasized, e.g. the active filter values.
	#[prop(optional, into)]
	selected: Option<Signal<Vec<String>>>,
	#[prop(default = "#e22352")] color: &'static str,
) -> impl IntoView {
	view! {
		<div class="bar-chart">
			{move || {
				bars.with(|bars| {
					let max = bars.iter().map(|b| b.count).max().unwrap_or(0).max(1);
					let selected = selected.map(|s| s.get()).unwrap_or_default();
					bars.iter()
						.map(|bar| {
							let name = bar.name.clone();
							let width = format!("{:.1}%", 100.0 * bar.count as f64 / max as f64);
							let active = selected.contains(&bar.name);
							view! {
								<div
									class="bar-row"
									class:active=active
									on:click=move |_| {
										if let Some(cb) = on_select {
											cb.run(name.clone());
										}
									}
								>
									<span class="bar-label">{bar.name.clone()}</span>
									<span class="bar" style:width=width style:background-color=color></span>
									<span class="bar-count">{bar.count}</span>
								</div>
							}
						})
						.collect_view()
				})
			}}
		</div>
	}
}
