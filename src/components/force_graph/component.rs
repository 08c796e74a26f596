use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{ForceGraphState, Layout};
use super::types::{Encoding, GraphData};

type Frame = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// One attached renderer and its animation loop.
struct Running {
	alive: Rc<Cell<bool>>,
	frame_id: Rc<Cell<Option<i32>>>,
	animate: Frame,
}

impl Running {
	/// Stop the loop before another renderer attaches.
	fn stop(self) {
		self.alive.set(false);
		if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.animate.borrow_mut().take();
	}
}

fn local_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] encoding: Signal<Encoding>,
	#[prop(default = Layout::Force)] layout: Layout,
	/// Called with the hovered node id, or `None` when the pointer leaves it.
	#[prop(optional, into)]
	on_hover: Option<Callback<Option<String>>>,
	/// Called with the id of a clicked node.
	#[prop(optional, into)]
	on_click: Option<Callback<String>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let running: Rc<RefCell<Option<Running>>> = Rc::new(RefCell::new(None));
	let state_init = state.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let data = data.get();
		if let Some(previous) = running.borrow_mut().take() {
			debug!("Tearing down previous graph renderer");
			previous.stop();
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let parent = canvas.parent_element();
		let (w, h) = (
			width.unwrap_or_else(|| parent.as_ref().map_or(800.0, |p| p.client_width() as f64)),
			height.unwrap_or_else(|| parent.as_ref().map_or(600.0, |p| p.client_height() as f64)),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("Canvas context is not a 2d context");
					return;
				}
			},
			_ => {
				error!("Canvas 2d context unavailable");
				return;
			}
		};
		*state_init.borrow_mut() = Some(ForceGraphState::new(&data, layout, w, h));

		let alive = Rc::new(Cell::new(true));
		let frame_id = Rc::new(Cell::new(None));
		let animate: Frame = Rc::new(RefCell::new(None));
		let (state_anim, animate_inner, alive_anim, frame_anim) =
			(state_init.clone(), animate.clone(), alive.clone(), frame_id.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.get() {
				return;
			}
			let drawn = match *state_anim.borrow_mut() {
				Some(ref mut s) => {
					s.tick(0.016);
					encoding.try_with_untracked(|enc| render::render(s, enc, &ctx))
				}
				None => Some(()),
			};
			// Canvas left the document or its owner was disposed.
			if drawn.is_none() || !canvas.is_connected() {
				alive_anim.set(false);
				return;
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				frame_anim.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}

		*running.borrow_mut() = Some(Running {
			alive,
			frame_id,
			animate,
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			let draggable = s.layout == Layout::Force;
			match s.node_at_position(x, y).filter(|_| draggable) {
				Some(idx) => {
					s.drag.active = true;
					s.drag.node_idx = Some(idx);
					s.drag.start_x = x;
					s.drag.start_y = y;
					s.graph.visit_nodes(|node| {
						if node.index() == idx {
							s.drag.node_start_x = node.x();
							s.drag.node_start_y = node.y();
						}
					});
				}
				None => {
					s.pan.active = true;
					s.pan.start_x = x;
					s.pan.start_y = y;
					s.pan.transform_start_x = s.transform.x;
					s.pan.transform_start_y = s.transform.y;
				}
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		let mut hovered_change = None;

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				if s.set_hover(hovered) {
					hovered_change = Some(hovered.and_then(|idx| s.node_id(idx)).map(str::to_string));
				}
			}

			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}

		// Invoked after the state borrow ends; the callback may update signals.
		if let (Some(change), Some(cb)) = (hovered_change, on_hover) {
			cb.run(change);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let left = match *state_ml.borrow_mut() {
			Some(ref mut s) => {
				s.drag.active = false;
				s.drag.node_idx = None;
				s.pan.active = false;
				s.set_hover(None)
			}
			None => false,
		};
		if let (true, Some(cb)) = (left, on_hover) {
			cb.run(None);
		}
	};

	let state_cl = state.clone();
	let on_canvas_click = move |ev: MouseEvent| {
		let (Some((x, y)), Some(cb)) = (local_position(canvas_ref, &ev), on_click) else {
			return;
		};
		let clicked = state_cl
			.borrow()
			.as_ref()
			.and_then(|s| s.node_at_position(x, y).and_then(|idx| s.node_id(idx)).map(str::to_string));
		if let Some(id) = clicked {
			cb.run(id);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.05, 40.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
