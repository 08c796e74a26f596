use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, Layout, MAP_SCALE, NODE_RADIUS};
use super::types::Encoding;
use crate::encoding::{Endpoint, NodeStyle, reduce_edge, reduce_node};

const BACKGROUND: &str = "#1a1a2e";
const GRATICULE: &str = "rgba(255, 255, 255, 0.06)";
const GRATICULE_STEP: f64 = 30.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, encoding: &Encoding, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	if state.layout == Layout::Geographic {
		draw_graticule(state, ctx);
	}
	draw_edges(state, encoding, ctx);
	draw_nodes(state, encoding, ctx);
	ctx.restore();
}

/// Meridians and parallels standing in for the base map.
fn draw_graticule(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (half_w, half_h) = (180.0 * MAP_SCALE, 90.0 * MAP_SCALE);
	ctx.set_stroke_style_str(GRATICULE);
	ctx.set_line_width(1.0 / state.transform.k);
	ctx.begin_path();
	let mut lon = -180.0;
	while lon <= 180.0 {
		ctx.move_to(lon * MAP_SCALE, -half_h);
		ctx.line_to(lon * MAP_SCALE, half_h);
		lon += GRATICULE_STEP;
	}
	let mut lat = -90.0;
	while lat <= 90.0 {
		ctx.move_to(-half_w, lat * MAP_SCALE);
		ctx.line_to(half_w, lat * MAP_SCALE);
		lat += GRATICULE_STEP;
	}
	ctx.stroke();
}

fn draw_edges(state: &ForceGraphState, encoding: &Encoding, ctx: &CanvasRenderingContext2d) {
	let view = encoding.edge_view();
	let k = state.transform.k;
	let (line_width, dash, gap) = (1.0 / k, 8.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, edge| {
		let style = reduce_edge(
			&edge.user_data,
			Endpoint::from(&n1.data.user_data.node.attributes),
			Endpoint::from(&n2.data.user_data.node.attributes),
			&view,
		);
		if style.hidden {
			return;
		}
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);

		ctx.set_stroke_style_str(&style.color);
		if style.highlighted {
			ctx.set_global_alpha(0.6 + 0.3 * t);
			ctx.set_line_width(line_width * (1.0 + 0.5 * t));
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		} else {
			ctx.set_global_alpha(0.5);
			ctx.set_line_width(line_width);
		}
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	});
	ctx.set_global_alpha(1.0);
}

struct Placed {
	x: f64,
	y: f64,
	hovered: bool,
	label: Option<String>,
	style: NodeStyle,
}

fn draw_nodes(state: &ForceGraphState, encoding: &Encoding, ctx: &CanvasRenderingContext2d) {
	let view = encoding.node_view();
	let (t, k) = (ease_out_cubic(state.hover.highlight_t), state.transform.k);

	let mut placed = Vec::new();
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		placed.push(Placed {
			x: node.x() as f64,
			y: node.y() as f64,
			hovered: state.is_hovered(node.index()),
			label: info.node.label.clone(),
			style: reduce_node(
				&info.node.id,
				info.degree,
				encoding.category.category(&info.node),
				&view,
			),
		});
	});
	placed.sort_by_key(|p| p.style.z_index);

	let font = format!("{}px sans-serif", 10.0 / k.max(0.5));
	for p in placed {
		let radius = NODE_RADIUS * p.style.size;
		ctx.set_global_alpha(if p.style.dimmed { 0.35 } else { 1.0 });

		if p.hovered && t > 0.01 {
			let glow_radius = radius * (1.8 + 1.2 * t);
			if let Ok(gradient) = ctx.create_radial_gradient(p.x, p.y, radius * 0.3, p.x, p.y, glow_radius) {
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", 0.35 * t));
				let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", 0.1 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(p.x, p.y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&p.style.color);
		ctx.fill();

		if p.hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		if let Some(label) = p.label.as_deref().filter(|_| p.style.show_label || p.hovered) {
			ctx.set_fill_style_str("white");
			ctx.set_font(&font);
			let _ = ctx.fill_text(label, p.x + radius + 3.0 / k, p.y + 3.0 / k);
		}
	}
	ctx.set_global_alpha(1.0);
}
