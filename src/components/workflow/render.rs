use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::background::{self, PatternShape};
use super::path::EdgePath;
use super::state::WorkflowState;
use super::types::{BackgroundVariant, FlowNode};

const NODE_RADIUS: f64 = 3.0;
const ARROW_SIZE: f64 = 10.0;
const SELECTED_SHADOW: &str = "rgba(26, 25, 43, 0.35)";

/// Paints one frame: background, then edges, then nodes on top.
pub fn render(state: &WorkflowState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.options.canvas_color);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_background(state, ctx);

	ctx.save();
	let _ = ctx.translate(state.viewport.x, state.viewport.y);
	let _ = ctx.scale(state.viewport.zoom, state.viewport.zoom);
	draw_edges(state, ctx);
	draw_connection_line(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_background(state: &WorkflowState, ctx: &CanvasRenderingContext2d) {
	let variant = state.variant();
	let shapes = background::pattern_for(
		variant,
		&state.viewport,
		state.width,
		state.height,
		state.options.background_gap,
	);
	ctx.set_fill_style_str(&state.options.background_color);
	ctx.set_stroke_style_str(&state.options.background_color);
	ctx.set_line_width(background::default_size(variant).min(1.0));

	ctx.begin_path();
	for shape in &shapes {
		match *shape {
			PatternShape::Dot { x, y, radius } => {
				ctx.move_to(x + radius, y);
				let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			}
			PatternShape::Segment { x1, y1, x2, y2 } => {
				ctx.move_to(x1, y1);
				ctx.line_to(x2, y2);
			}
		}
	}
	if variant == BackgroundVariant::Dots {
		ctx.fill();
	} else {
		ctx.stroke();
	}
}

fn stroke_curve(ctx: &CanvasRenderingContext2d, path: &EdgePath) {
	ctx.begin_path();
	ctx.move_to(path.p0.x, path.p0.y);
	ctx.bezier_curve_to(
		path.p1.x, path.p1.y, path.p2.x, path.p2.y, path.p3.x, path.p3.y,
	);
	ctx.stroke();
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, path: &EdgePath) {
	let (ux, uy) = path.end_direction();
	let tip = path.p3;
	let (back_x, back_y) = (tip.x - ux * ARROW_SIZE, tip.y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(back_x + px, back_y + py);
	ctx.line_to(tip.x, tip.y);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_edges(state: &WorkflowState, ctx: &CanvasRenderingContext2d) {
	for edge in state.edges() {
		let Some(path) = state.edge_path(edge) else {
			continue;
		};
		let selected = state.is_edge_selected(&edge.id);

		ctx.set_stroke_style_str(&edge.style.stroke);
		ctx.set_line_width(if selected { 2.0 } else { 1.0 });
		stroke_curve(ctx, &path);

		if let Some(marker) = &edge.style.marker_end {
			ctx.set_fill_style_str(&marker.color);
			draw_arrow(ctx, &path);
		}

		if edge.style.with_button {
			draw_edge_button(state, ctx, &path);
		}
	}
}

fn draw_edge_button(state: &WorkflowState, ctx: &CanvasRenderingContext2d, path: &EdgePath) {
	let mid = path.midpoint();
	let r = state.options.edge_button_radius;
	ctx.begin_path();
	let _ = ctx.arc(mid.x, mid.y, r, 0.0, 2.0 * PI);
	ctx.set_fill_style_str("#eee");
	ctx.fill();
	ctx.set_stroke_style_str("#fff");
	ctx.set_line_width(1.0);
	ctx.stroke();

	let arm = r * 0.4;
	ctx.begin_path();
	ctx.move_to(mid.x - arm, mid.y - arm);
	ctx.line_to(mid.x + arm, mid.y + arm);
	ctx.move_to(mid.x + arm, mid.y - arm);
	ctx.line_to(mid.x - arm, mid.y + arm);
	ctx.set_stroke_style_str("#555");
	ctx.set_line_width(1.5);
	ctx.stroke();
}

fn draw_connection_line(state: &WorkflowState, ctx: &CanvasRenderingContext2d) {
	if !state.connect.active {
		return;
	}
	let path = EdgePath::between(state.connect.from, state.connect.to);
	ctx.set_stroke_style_str("#b1b1b7");
	ctx.set_line_width(1.0);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(5.0),
		&JsValue::from_f64(5.0),
	));
	stroke_curve(ctx, &path);
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_nodes(state: &WorkflowState, ctx: &CanvasRenderingContext2d) {
	let k = state.viewport.zoom;
	for node in state.nodes() {
		let rect = state.node_rect(node);
		let selected = state.is_node_selected(&node.id);

		if selected {
			ctx.set_shadow_color(SELECTED_SHADOW);
			ctx.set_shadow_blur(4.0 * k);
		}
		rounded_rect(ctx, rect.x, rect.y, rect.width, rect.height, NODE_RADIUS);
		ctx.set_fill_style_str("#fff");
		ctx.fill();
		ctx.set_shadow_color("transparent");
		ctx.set_shadow_blur(0.0);

		ctx.set_stroke_style_str(&node.style.border_color);
		ctx.set_line_width(if selected { 1.5 } else { 1.0 });
		ctx.stroke();

		ctx.set_fill_style_str("#222");
		ctx.set_font("bold 12px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let c = rect.center();
		let _ = ctx.fill_text_with_max_width(&node.label, c.x, c.y, rect.width * 0.8);

		draw_handles(state, ctx, node);
	}
}

fn draw_handles(state: &WorkflowState, ctx: &CanvasRenderingContext2d, node: &FlowNode) {
	let r = state.options.handle_radius;
	let handles = std::iter::once(state.source_handle(node)).chain(state.target_handle(node));
	for h in handles {
		ctx.begin_path();
		let _ = ctx.arc(h.x, h.y, r, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("#1a192b");
		ctx.fill();
		ctx.set_stroke_style_str("#fff");
		ctx.set_line_width(1.0);
		ctx.stroke();
	}
}
