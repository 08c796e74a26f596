use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Page not found"</h1>
			<p>
				<A href="/">"Airport explorer"</A>
				" | "
				<A href="/oceanus">"Oceanus dashboard"</A>
			</p>
		</div>
	}
}
