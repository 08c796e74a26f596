use leptos::prelude::*;
use log::info;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::components::oceanus::{
	AlignmentMatrixView, DatasetCounts, FilterChips, IndustrySentimentChart, KnowledgeGraph, RegionCounts, RegionDetails,
	RegionMap, TripTimeline, alignment_matrix::industries,
};
use crate::model::entity::GraphMembership;
use crate::stores::entity::EntityStore;
use crate::stores::graph::SkeletonStore;
use crate::stores::map::MapStore;
use crate::stores::scale::ScaleStore;
use crate::stores::visualization::VisualizationStore;

/// Linked investigation views over the Oceanus knowledge graph.
#[component]
pub fn Oceanus() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let map = expect_context::<MapStore>();
	let entities = expect_context::<EntityStore>();
	let skeleton = expect_context::<SkeletonStore>();
	let scale = expect_context::<ScaleStore>();
	let viz = expect_context::<VisualizationStore>();

	scale.set_datasets(GraphMembership::ALL.into_iter().map(|m| m.tag().to_string()).collect());

	// Places are assigned to regions only once both are loaded.
	let api_map = api.clone();
	spawn_local(async move {
		if !map.state().with_untracked(|s| s.is_loaded()) {
			map.load_geojson_data(&api_map).await;
		}
		entities.init(&api_map).await;
		let places = entities.state().with_untracked(|e| e.places.clone());
		map.assign_places(&places);
	});

	let api_graph = api.clone();
	spawn_local(async move { skeleton.init(&api_graph).await });

	spawn_local(async move {
		viz.init(&api).await;
		let industries = viz.state().with_untracked(|s| industries(&s.industry_similarity));
		info!("Loaded alignment for {} industries", industries.len());
		scale.set_industries(industries);
	});

	view! {
		<div class="dashboard oceanus">
			<header class="oceanus-header">
				<h1>"Oceanus"</h1>
				<FilterChips />
			</header>
			<div class="oceanus-grid">
				<div class="panel map">
					<RegionMap />
					<RegionDetails />
					<RegionCounts />
				</div>
				<div class="panel graph">
					<KnowledgeGraph />
				</div>
				<div class="panel datasets">
					<DatasetCounts />
					<IndustrySentimentChart />
				</div>
				<div class="panel alignment">
					<AlignmentMatrixView />
				</div>
				<div class="panel trips">
					<TripTimeline />
				</div>
			</div>
		</div>
	}
}
