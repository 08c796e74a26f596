use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{GraphData, GraphNode};
use crate::graph_index::GraphIndex;

/// World units per degree of longitude/latitude.
pub const MAP_SCALE: f64 = 4.0;
/// World-space radius of a node of size 1.
pub const NODE_RADIUS: f64 = 1.5;
pub const HIT_RADIUS: f64 = 6.0;

/// How node positions are obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
	/// Every node is pinned at its projected longitude/latitude.
	Geographic,
	/// Positions come from the physics simulation.
	#[default]
	Force,
}

/// Equirectangular projection into world space.
pub fn project(lon: f64, lat: f64) -> (f64, f64) {
	(lon * MAP_SCALE, -lat * MAP_SCALE)
}

/// Simple pseudo-random number generator (deterministic for consistency).
pub fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Stand-in coordinates for a node without a position.
fn fallback_lon_lat(i: usize) -> (f64, f64) {
	(
		rand_simple(2 * i) * 360.0 - 180.0,
		rand_simple(2 * i + 1) * 160.0 - 80.0,
	)
}

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub node: GraphNode,
	pub degree: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Pointer hover on the canvas; the highlight sets themselves live in a store.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub highlight_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, String>,
	pub layout: Layout,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	ids: HashMap<DefaultNodeIdx, String>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, layout: Layout, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let known: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		let index = GraphIndex::new(
			data.links
				.iter()
				.filter(|l| known.contains(l.source.as_str()) && known.contains(l.target.as_str()))
				.map(|l| (l.id.as_str(), l.source.as_str(), l.target.as_str())),
		);

		let mut id_to_idx = HashMap::new();
		let mut ids = HashMap::new();
		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y) = match layout {
				Layout::Geographic => {
					let (lon, lat) = node.lon_lat.unwrap_or_else(|| fallback_lon_lat(i));
					project(lon, lat)
				}
				Layout::Force => {
					let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
					(100.0 * angle.cos(), 100.0 * angle.sin())
				}
			};
			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: layout == Layout::Geographic,
				user_data: NodeInfo {
					node: node.clone(),
					degree: index.degree(&node.id),
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
			ids.insert(idx, node.id.clone());
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				graph.add_edge(src, tgt, EdgeData { user_data: link.id.clone() });
			}
		}

		Self {
			graph,
			layout,
			transform: initial_transform(layout, width, height),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: layout == Layout::Force,
			flow_time: 0.0,
			ids,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<&str> {
		self.ids.get(&idx).map(String::as_str)
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		if self.hover.node == node {
			return false;
		}
		if self.hover.node.is_none() {
			self.hover.highlight_t = 0.0;
		}
		self.hover.node = node;
		true
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
	}

	pub fn tick(&mut self, dt: f32) {
		if self.animation_running {
			self.graph.update(dt);
		}
		self.flow_time += dt as f64;

		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * 1.8 * dt as f64;
		if self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
	}
}

/// Centre the origin; the geographic layout is zoomed to fit the whole map.
fn initial_transform(layout: Layout, width: f64, height: f64) -> ViewTransform {
	let k = match layout {
		Layout::Geographic => (width / (360.0 * MAP_SCALE)).min(height / (180.0 * MAP_SCALE)),
		Layout::Force => 1.0,
	};
	ViewTransform {
		x: width / 2.0,
		y: height / 2.0,
		k: if k > 0.0 { k } else { 1.0 },
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::GraphLink;

	fn data() -> GraphData {
		let node = |id: &str, lon_lat: Option<(f64, f64)>| GraphNode {
			id: id.into(),
			lon_lat,
			..Default::default()
		};
		GraphData {
			nodes: vec![
				node("FRA", Some((8.57, 50.03))),
				node("MUC", Some((11.79, 48.35))),
				node("XXX", None),
			],
			links: vec![
				GraphLink { id: "1".into(), source: "FRA".into(), target: "MUC".into() },
				GraphLink { id: "2".into(), source: "FRA".into(), target: "gone".into() },
			],
		}
	}

	#[test]
	fn geographic_layout_pins_nodes_at_projected_coordinates() {
		let state = ForceGraphState::new(&data(), Layout::Geographic, 800.0, 400.0);
		let (fx, fy) = project(8.57, 50.03);
		let mut seen = 0;
		state.graph.visit_nodes(|node| {
			assert!(node.data.is_anchor);
			if node.data.user_data.node.id == "FRA" {
				assert!((node.x() as f64 - fx).abs() < 1e-3);
				assert!((node.y() as f64 - fy).abs() < 1e-3);
				assert_eq!(node.data.user_data.degree, 1);
			}
			seen += 1;
		});
		assert_eq!(seen, 3);
		assert!(!state.animation_running);
	}

	#[test]
	fn degree_counts_parallel_edges_and_self_loops_once() {
		let mut data = data();
		data.links.push(GraphLink { id: "3".into(), source: "MUC".into(), target: "FRA".into() });
		data.links.push(GraphLink { id: "4".into(), source: "MUC".into(), target: "MUC".into() });
		let state = ForceGraphState::new(&data, Layout::Force, 800.0, 600.0);
		let mut degrees = HashMap::new();
		state.graph.visit_nodes(|n| {
			degrees.insert(n.data.user_data.node.id.clone(), n.data.user_data.degree);
		});
		assert_eq!(degrees["FRA"], 2);
		assert_eq!(degrees["MUC"], 3);
		assert_eq!(degrees["XXX"], 0);
	}

	#[test]
	fn missing_coordinates_get_deterministic_fallbacks_on_the_map() {
		let (lon, lat) = fallback_lon_lat(7);
		assert_eq!((lon, lat), fallback_lon_lat(7));
		assert!((-180.0..=180.0).contains(&lon));
		assert!((-80.0..=80.0).contains(&lat));
	}

	#[test]
	fn links_to_unknown_nodes_are_skipped() {
		let state = ForceGraphState::new(&data(), Layout::Force, 800.0, 600.0);
		let mut edges = Vec::new();
		state.graph.visit_edges(|_, _, e| edges.push(e.user_data.clone()));
		assert_eq!(edges, vec!["1".to_string()]);
	}

	#[test]
	fn hover_reports_changes_only() {
		let mut state = ForceGraphState::new(&data(), Layout::Force, 800.0, 600.0);
		let mut first = None;
		state.graph.visit_nodes(|n| {
			if n.data.user_data.node.id == "FRA" {
				first = Some(n.index());
			}
		});
		assert!(state.set_hover(first));
		assert!(!state.set_hover(first));
		assert_eq!(state.node_id(first.unwrap()), Some("FRA"));
		assert!(state.set_hover(None));
	}
}
