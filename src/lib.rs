//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod components;
mod config;
mod encoding;
mod error;
mod graph_index;
mod model;
mod pages;
mod stats;
mod stores;

// Top-Level pages
use crate::pages::airports::Airports;
use crate::pages::not_found::NotFound;
use crate::pages::oceanus::Oceanus;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::stores::entity::EntityStore;
use crate::stores::filter::FilterStore;
use crate::stores::graph::{AirportGraphStore, SkeletonStore};
use crate::stores::highlight::HighlightStore;
use crate::stores::linking::LinkingStore;
use crate::stores::map::MapStore;
use crate::stores::scale::ScaleStore;
use crate::stores::visualization::VisualizationStore;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Stores live for the whole app so state survives navigation between
/// dashboards.
fn provide_stores() {
	provide_context(ApiClient::new(AppConfig::from_document()));
	provide_context(FilterStore::new());
	provide_context(AirportGraphStore::new());
	provide_context(HighlightStore::new());
	provide_context(LinkingStore::new());
	provide_context(MapStore::new());
	provide_context(EntityStore::new());
	provide_context(SkeletonStore::new());
	provide_context(ScaleStore::new());
	provide_context(VisualizationStore::new());
}

#[component]
fn Nav() -> impl IntoView {
	view! {
		<nav class="top-nav">
			<A href="/">"Airports"</A>
			<A href="/oceanus">"Oceanus"</A>
		</nav>
	}
}

/// An app router which renders both dashboards and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_stores();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Graph Dashboards" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Nav />
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Airports />
					<Route path=path!("/oceanus") view=Oceanus />
				</Routes>
			</main>
		</Router>
	}
}
