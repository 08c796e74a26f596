use leptos::prelude::*;

use crate::stores::linking::{FilterKind, LinkFilter, LinkingStore};

fn kind_label(kind: FilterKind) -> &'static str {
	match kind {
		FilterKind::Island => "island",
		FilterKind::Zone => "zone",
		FilterKind::Kind => "kind",
		FilterKind::Activity => "activity",
	}
}

pub(crate) fn chip_text(filter: &LinkFilter) -> String {
	format!("{}: {}", kind_label(filter.kind), filter.value)
}

/// Active cross-view chips; clicking one removes it.
#[component]
pub fn FilterChips() -> impl IntoView {
	let linking = expect_context::<LinkingStore>();
	let active = move || linking.state().with(|s| s.active_filters.clone());

	view! {
		<div class="filter-chips">
			{move || {
				let active = active();
				if active.is_empty() {
					return view! { <span class="muted">"No active filters"</span> }.into_any();
				}
				active
					.into_iter()
					.map(|filter| {
						let text = chip_text(&filter);
						view! {
							<button class="chip active" on:click=move |_| linking.toggle_filter(filter.clone())>
								{text}" x"
							</button>
						}
					})
					.collect_view()
					.into_any()
			}}
			<button class="bordered" on:click=move |_| linking.clear_all_filters()>
				"Clear all"
			</button>
		</div>
	}
}
