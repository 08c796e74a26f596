use leptos::prelude::*;

use crate::api::FetchStatus;

/// Loading and failure notice for one fetch action; renders nothing otherwise.
#[component]
pub fn FetchStatusLine(#[prop(into)] status: Signal<FetchStatus>, #[prop(into)] what: String) -> impl IntoView {
	move || {
		status.with(|s| {
			if s.is_loading() {
				return Some(view! { <p class="status loading">{format!("Loading {what}...")}</p> }.into_any());
			}
			s.error()
				.map(|e| view! { <p class="status error">{format!("Could not load {what}: {e}")}</p> }.into_any())
		})
	}
}
