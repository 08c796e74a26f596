//! SVG region map with places, zone/kind legends and places-per-region bars.

use leptos::prelude::*;

use crate::components::bar_chart::BarChart;
use crate::components::oceanus::filter_chips::chip_text;
use crate::components::status::FetchStatusLine;
use crate::encoding::color::{NEUTRAL_BASE, hash_color, zone_color};
use crate::model::entity::Place;
use crate::model::geojson::{Feature, Geometry};
use crate::stats::places_per_region;
use crate::stores::entity::EntityStore;
use crate::stores::linking::{FilterKind, LinkFilter, LinkingState, LinkingStore};
use crate::stores::map::{MapState, MapStore};

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 420.0;
const ZONES: [&str; 4] = ["government", "commercial", "residential", "industrial"];

fn coordinates(geometry: &Geometry) -> Vec<[f64; 2]> {
	match geometry {
		Geometry::Polygon { coordinates } => coordinates.iter().flatten().copied().collect(),
		Geometry::Point { coordinates } => vec![*coordinates],
		Geometry::Unsupported => Vec::new(),
	}
}

/// Linear fit of the collection's bounding box into the SVG viewport,
/// preserving aspect ratio, north up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapProjection {
	min_x: f64,
	max_y: f64,
	scale: f64,
}

impl MapProjection {
	pub fn fit(features: &[Feature], width: f64, height: f64) -> Self {
		let coords = features.iter().flat_map(|f| coordinates(&f.geometry));
		let (mut min_x, mut min_y, mut max_x, mut max_y) =
			(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
		for [x, y] in coords {
			min_x = min_x.min(x);
			min_y = min_y.min(y);
			max_x = max_x.max(x);
			max_y = max_y.max(y);
		}
		if !(min_x.is_finite() && max_x > min_x && max_y > min_y) {
			return Self { min_x: 0.0, max_y: 0.0, scale: 1.0 };
		}
		Self {
			min_x,
			max_y,
			scale: (width / (max_x - min_x)).min(height / (max_y - min_y)),
		}
	}

	pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
		((lon - self.min_x) * self.scale, (self.max_y - lat) * self.scale)
	}

	/// SVG path data for a polygon, one closed subpath per ring.
	pub fn path(&self, rings: &[Vec<[f64; 2]>]) -> String {
		let mut d = String::new();
		for ring in rings {
			for (i, &[lon, lat]) in ring.iter().enumerate() {
				let (x, y) = self.project(lon, lat);
				d.push_str(&format!("{}{x:.1},{y:.1}", if i == 0 { "M" } else { "L" }));
			}
			d.push('Z');
		}
		d
	}
}

/// Linkable attributes of a place: its region, zone, and the region's kind
/// and activities.
pub fn place_values<'a>(map: &'a MapState, place: &'a Place) -> Vec<(FilterKind, &'a str)> {
	let mut values = vec![(FilterKind::Zone, place.zone.as_str())];
	if let Some(region) = map.parent_feature_by_place(&place.id) {
		values.push((FilterKind::Island, region));
		if let Some(zone) = map.zone_properties(region) {
			values.push((FilterKind::Kind, zone.kind.as_str()));
			values.extend(zone.activities.iter().map(|a| (FilterKind::Activity, a.as_str())));
		}
	}
	values
}

fn feature_passes(linking: &LinkingState, feature: &Feature) -> bool {
	let props = &feature.properties;
	let mut values = vec![
		(FilterKind::Island, props.name.as_str()),
		(FilterKind::Kind, props.kind.as_str()),
	];
	values.extend(props.activities().iter().map(|a| (FilterKind::Activity, a.as_str())));
	// Place-level chips do not hide regions.
	let region_chips = LinkingState {
		active_filters: linking
			.active_filters
			.iter()
			.filter(|f| matches!(f.kind, FilterKind::Island | FilterKind::Kind | FilterKind::Activity))
			.cloned()
			.collect(),
		..Default::default()
	};
	region_chips.passes(&values)
}

#[component]
fn Legend(
	#[prop(into)] title: String,
	kind: FilterKind,
	#[prop(into)] values: Signal<Vec<String>>,
	color: fn(&str) -> String,
) -> impl IntoView {
	let linking = expect_context::<LinkingStore>();
	view! {
		<div class="legend">
			<span class="legend-title">{title}</span>
			{move || {
				values
					.get()
					.into_iter()
					.map(|value| {
						let filter = LinkFilter::new(kind, value.clone());
						let (check, toggle, hover) = (filter.clone(), filter.clone(), filter);
						view! {
							<button
								class="chip"
								class:active=move || linking.state().with(|s| s.is_active(&check))
								style:border-color=color(&value)
								on:click=move |_| linking.toggle_filter(toggle.clone())
								on:mouseenter=move |_| linking.set_hovered_filters(vec![hover.clone()])
								on:mouseleave=move |_| linking.set_hovered_filters(Vec::new())
							>
								{value.clone()}
							</button>
						}
					})
					.collect_view()
			}}
		</div>
	}
}

#[component]
pub fn RegionMap() -> impl IntoView {
	let map_store = expect_context::<MapStore>();
	let entity_store = expect_context::<EntityStore>();
	let (map, entities) = (map_store.state(), entity_store.state());
	let linking = expect_context::<LinkingStore>();

	let projection = Memo::new(move |_| map.with(|m| MapProjection::fit(m.features(), WIDTH, HEIGHT)));

	let regions = move || {
		let proj = projection.get();
		map.with(|m| {
			linking.state().with(|l| {
				m.features()
					.iter()
					.filter_map(|feature| {
						let Geometry::Polygon { coordinates } = &feature.geometry else {
							return None;
						};
						let name = feature.properties.name.clone();
						let island = LinkFilter::new(FilterKind::Island, name.clone());
						let hovered = l.is_hovered(&island);
						let active = l.is_active(&island);
						let faded = !feature_passes(l, feature);
						let (toggle, hover) = (island.clone(), island);
						let title = m.zone_properties(&name).map_or_else(|| name.clone(), |z| format!("{name} ({})", z.kind));
						Some(view! {
							<path
								class="region"
								class:active=active
								class:hovered=hovered
								class:faded=faded
								d=proj.path(coordinates)
								fill=hash_color(&feature.properties.kind)
								fill-rule="evenodd"
								on:click=move |_| linking.toggle_filter(toggle.clone())
								on:mouseenter=move |_| linking.set_hovered_filters(vec![hover.clone()])
								on:mouseleave=move |_| linking.set_hovered_filters(Vec::new())
							>
								<title>{title}</title>
							</path>
						})
					})
					.collect_view()
			})
		})
	};

	let places = move || {
		let proj = projection.get();
		map.with(|m| {
			linking.state().with(|l| {
				entities.with(|e| {
					e.places
						.iter()
						.map(|place| {
							let (x, y) = proj.project(place.lon, place.lat);
							let emphasized = l.hovered_place_id.as_deref() == Some(place.id.as_str())
								|| l.highlighted_place_ids.contains(&place.id)
								|| l.brushed_places.contains(&place.id);
							let faded = !l.passes(&place_values(m, place));
							let (enter_id, label) = (place.id.clone(), place.label.clone());
							view! {
								<circle
									class="place"
									class:faded=faded
									cx=format!("{x:.1}")
									cy=format!("{y:.1}")
									r=if emphasized { "6" } else { "3" }
									fill=zone_color(&place.zone)
									on:mouseenter=move |_| linking.set_hovered_place_id(Some(enter_id.clone()))
									on:mouseleave=move |_| linking.set_hovered_place_id(None)
								>
									<title>{label}</title>
								</circle>
							}
						})
						.collect_view()
				})
			})
		})
	};

	let kinds = Signal::derive(move || map.with(MapState::all_kinds));
	let activities = Signal::derive(move || map.with(MapState::all_activities));
	let zones = Signal::derive(|| ZONES.map(String::from).to_vec());

	view! {
		<section class="region-map">
			<h3>"Oceanus"</h3>
			<FetchStatusLine status=map_store.status() what="region map" />
			<FetchStatusLine status=entity_store.status() what="entities" />
			<svg viewBox=format!("0 0 {WIDTH} {HEIGHT}") class="map">
				<g class="regions">{regions}</g>
				<g class="places">{places}</g>
			</svg>
			<Legend title="Zone" kind=FilterKind::Zone values=zones color=|z| zone_color(z).to_string() />
			<Legend title="Kind" kind=FilterKind::Kind values=kinds color=hash_color />
			<Legend title="Activity" kind=FilterKind::Activity values=activities color=|_| NEUTRAL_BASE.to_string() />
		</section>
	}
}

/// Regions named by a chip. Only island, kind and activity chips address
/// regions.
pub fn focused_regions<'a>(map: &'a MapState, filter: &LinkFilter) -> Vec<&'a Feature> {
	match filter.kind {
		FilterKind::Island => map.feature_by_name(&filter.value).into_iter().collect(),
		FilterKind::Kind => map.features_by_kind(&filter.value),
		FilterKind::Activity => map.features_by_activity(&filter.value),
		FilterKind::Zone => Vec::new(),
	}
}

fn addresses_regions(kind: FilterKind) -> bool {
	matches!(kind, FilterKind::Island | FilterKind::Kind | FilterKind::Activity)
}

/// The hovered chip wins over the most recently activated one.
fn focus(linking: &LinkingState) -> Option<LinkFilter> {
	linking
		.hovered_filters
		.iter()
		.chain(linking.active_filters.iter().rev())
		.find(|f| addresses_regions(f.kind))
		.cloned()
}

/// Properties and places of the regions under the current focus. Clicking a
/// place brushes it on the map.
#[component]
pub fn RegionDetails() -> impl IntoView {
	let map = expect_context::<MapStore>().state();
	let linking = expect_context::<LinkingStore>();

	let toggle_brush = move |id: String| {
		let mut brushed = linking.state().with_untracked(|l| l.brushed_places.clone());
		match brushed.iter().position(|p| *p == id) {
			Some(i) => {
				brushed.remove(i);
			}
			None => brushed.push(id),
		}
		linking.set_brushed_places(brushed);
	};

	move || {
		let filter = linking.state().with(focus)?;
		let brushed = linking.state().with(|l| l.brushed_places.clone());
		map.with(|m| {
			let regions = focused_regions(m, &filter);
			if regions.is_empty() {
				return None;
			}
			let rows = regions
				.into_iter()
				.map(|feature| {
					let name = feature.properties.name.clone();
					let props = m.feature_properties(&name).unwrap_or(&feature.properties);
					let (kind, zone_type, activities) = match m.zone_properties(&name) {
						Some(zone) => (zone.kind.clone(), zone.zone_type.clone(), zone.activities.join(", ")),
						None => (props.kind.clone(), props.feature_type.clone(), props.activities().join(", ")),
					};
					let same_type = m.features_by_type(&zone_type).len();
					let places = m
						.places_by_feature(&name)
						.iter()
						.map(|place| {
							let id = place.id.clone();
							let label = if place.label.is_empty() { place.id.clone() } else { place.label.clone() };
							view! {
								<li class="place" class:brushed=brushed.contains(&place.id) on:click=move |_| toggle_brush(id.clone())>
									{label}
								</li>
							}
						})
						.collect_view();
					view! {
						<div class="region-detail">
							<h5>{name}</h5>
							<p class="muted">
								{format!("{kind} - {zone_type} ({same_type} of this type)")}
							</p>
							<p>{props.description.clone().unwrap_or_default()}</p>
							<p class="muted">{activities}</p>
							<ul class="region-places">{places}</ul>
						</div>
					}
				})
				.collect_view();
			Some(view! {
				<section class="region-details">
					<h4>{chip_text(&filter)}</h4>
					{rows}
				</section>
			})
		})
	}
}

/// Places per containing region; clicking a bar toggles that region's chip.
#[component]
pub fn RegionCounts() -> impl IntoView {
	let map = expect_context::<MapStore>().state();
	let entities = expect_context::<EntityStore>().state();
	let linking = expect_context::<LinkingStore>();

	let bars = Signal::derive(move || map.with(|m| entities.with(|e| places_per_region(m, &e.places))));
	let selected = Signal::derive(move || {
		linking.state().with(|l| {
			l.active_filters
				.iter()
				.filter(|f| f.kind == FilterKind::Island)
				.map(|f| f.value.clone())
				.collect()
		})
	});
	let on_select = Callback::new(move |region: String| linking.toggle_filter(LinkFilter::new(FilterKind::Island, region)));

	view! {
		<section class="region-counts">
			<h3>"Places per region"</h3>
			<BarChart bars=bars on_select=on_select selected=selected color=NEUTRAL_BASE />
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::geojson::FeatureCollection;
	use serde_json::json;

	fn collection() -> FeatureCollection {
		FeatureCollection::from_value(json!({
			"features": [
				{
					"properties": {"Name": "Haacklee", "Kind": "city", "Activities": ["Fishing"]},
					"geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]}
				},
				{
					"properties": {"Name": "Reef", "Kind": "Ecological Preserve"},
					"geometry": {"type": "Polygon", "coordinates": [[[3.0, 3.0], [4.0, 3.0], [4.0, 4.0], [3.0, 3.0]]]}
				}
			]
		}))
		.unwrap()
	}

	fn place(id: &str, lon: f64, lat: f64, zone: &str) -> Place {
		serde_json::from_value(json!({"id": id, "lon": lon, "lat": lat, "zone": zone})).unwrap()
	}

	#[test]
	fn projection_fits_bounds_north_up() {
		let proj = MapProjection::fit(&collection().features, 400.0, 400.0);
		assert_eq!(proj.project(0.0, 4.0), (0.0, 0.0));
		assert_eq!(proj.project(4.0, 0.0), (400.0, 400.0));
		assert!(proj.path(&[vec![[0.0, 0.0], [1.0, 1.0]]]).starts_with("M0.0,400.0L100.0,300.0Z"));
	}

	#[test]
	fn empty_collection_projects_identity() {
		let proj = MapProjection::fit(&[], 400.0, 400.0);
		assert_eq!(proj.project(1.0, -2.0), (1.0, 2.0));
	}

	#[test]
	fn place_values_inherit_region_kind_and_activities() {
		let mut map = MapState::default();
		map.set_features(collection());
		let dock = place("dock", 1.0, 0.5, "commercial");
		map.assign_places(std::slice::from_ref(&dock));

		let values = place_values(&map, &dock);
		assert!(values.contains(&(FilterKind::Island, "Haacklee")));
		assert!(values.contains(&(FilterKind::Kind, "city")));
		assert!(values.contains(&(FilterKind::Activity, "Fishing")));

		let mut linking = LinkingState::default();
		linking.toggle_filter(LinkFilter::new(FilterKind::Island, "Haacklee"));
		assert!(linking.passes(&values));
		linking.toggle_filter(LinkFilter::new(FilterKind::Zone, "industrial"));
		assert!(!linking.passes(&values));
	}

	#[test]
	fn chips_focus_the_regions_they_name() {
		let mut map = MapState::default();
		map.set_features(collection());
		let names = |filter: LinkFilter| -> Vec<String> {
			focused_regions(&map, &filter).iter().map(|f| f.properties.name.clone()).collect()
		};
		assert_eq!(names(LinkFilter::new(FilterKind::Island, "Reef")), vec!["Reef"]);
		assert_eq!(names(LinkFilter::new(FilterKind::Activity, "Fishing")), vec!["Haacklee"]);
		assert!(names(LinkFilter::new(FilterKind::Zone, "industrial")).is_empty());

		let mut linking = LinkingState::default();
		linking.toggle_filter(LinkFilter::new(FilterKind::Kind, "city"));
		linking.toggle_filter(LinkFilter::new(FilterKind::Zone, "industrial"));
		assert_eq!(focus(&linking), Some(LinkFilter::new(FilterKind::Kind, "city")));
		linking.hovered_filters = vec![LinkFilter::new(FilterKind::Island, "Reef")];
		assert_eq!(focus(&linking), Some(LinkFilter::new(FilterKind::Island, "Reef")));
	}

	#[test]
	fn zone_chips_do_not_fade_regions() {
		let features = collection().features;
		let mut linking = LinkingState::default();
		linking.toggle_filter(LinkFilter::new(FilterKind::Zone, "industrial"));
		assert!(feature_passes(&linking, &features[1]));
		linking.toggle_filter(LinkFilter::new(FilterKind::Kind, "city"));
		assert!(feature_passes(&linking, &features[0]));
		assert!(!feature_passes(&linking, &features[1]));
	}
}
