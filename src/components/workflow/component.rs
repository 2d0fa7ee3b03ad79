use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, DragEvent, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent,
	Window,
};

use super::config::CanvasOptions;
use super::error::WorkflowError;
use super::render;
use super::state::{DND_MIME, LabelEdit, WorkflowState};
use super::types::BackgroundVariant;

type SharedState = Rc<RefCell<Option<WorkflowState>>>;

/// Pointer position relative to the canvas element.
fn local_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Result<(f64, f64), WorkflowError> {
	let canvas: HtmlCanvasElement = canvas_ref
		.get_untracked()
		.ok_or(WorkflowError::CanvasNotReady)?;
	let rect = canvas.get_bounding_client_rect();
	Ok((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn editor_style(edit: Option<&LabelEdit>) -> String {
	match edit {
		Some(e) => format!(
			"position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
			 box-sizing: border-box; text-align: center; font-weight: bold; border: none; \
			 background: transparent; outline: none;",
			e.left, e.top, e.width, e.height
		),
		None => "display: none;".into(),
	}
}

/// Canvas hosting the workflow graph, with the background variant panel
/// and the zoom/fit/lock controls.
#[component]
pub fn WorkflowCanvas(
	/// Canvas tunables.
	#[prop(default = CanvasOptions::default())]
	options: CanvasOptions,
	/// Size the canvas to the window and follow its resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed width in px; defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height in px; defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let variant = RwSignal::new(BackgroundVariant::default());
	let locked = RwSignal::new(false);
	let editing = RwSignal::new(None::<LabelEdit>);

	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			warn!("No window, workflow canvas not started");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
			_ => None,
		};
		let Some(ctx) = ctx else {
			warn!("{}", WorkflowError::CanvasNotReady);
			return;
		};

		let mut initial = WorkflowState::new(options.clone(), w, h);
		initial.set_variant(variant.get_untracked());
		*state_init.borrow_mut() = Some(initial);
		info!("Workflow canvas ready ({}x{})", w, h);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref s) = *state_anim.borrow() {
				render::render(s, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Ok((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(canvas) = canvas_ref.get_untracked() {
			let _ = canvas.focus();
		}
		if let Some(ref mut s) = *state_md.borrow_mut() {
			let action = s.begin_pointer(x, y, ev.shift_key());
			debug!("Pointer down at ({x}, {y}): {:?}", action);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Ok((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.update_pointer(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Ok((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if let Some(edge_id) = s.end_pointer(x, y) {
				debug!("Connect gesture created {}", edge_id);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel_pointer();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Ok((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel_zoom(x, y, ev.delta_y());
		}
	};

	let on_dragover = move |ev: DragEvent| {
		ev.prevent_default();
		if let Some(dt) = ev.data_transfer() {
			dt.set_drop_effect("move");
		}
	};

	let state_dp = state.clone();
	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		let payload = ev.data_transfer().and_then(|dt| dt.get_data(DND_MIME).ok());
		let result = local_point(canvas_ref, &ev).and_then(|(x, y)| {
			match state_dp.borrow_mut().as_mut() {
				Some(s) => s.drop_module(payload, x, y),
				None => Err(WorkflowError::CanvasNotReady),
			}
		});
		match result {
			Ok(id) => debug!("Drop created node {}", id),
			Err(e) => debug!("Drop ignored: {}", e),
		}
	};

	let state_kd = state.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		if editing.get_untracked().is_some() {
			return;
		}
		if let Some(ref mut s) = *state_kd.borrow_mut() {
			match ev.key().as_str() {
				"Backspace" | "Delete" => {
					ev.prevent_default();
					let removed = s.delete_selected();
					debug!("Deleted {} selected item(s)", removed);
				}
				"Escape" => s.clear_selection(),
				_ => {}
			}
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Ok((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let edit = match state_dc.borrow().as_ref() {
			Some(s) if !s.is_locked() => s.node_at(x, y).and_then(|id| s.label_edit_for(&id)),
			_ => None,
		};
		if let Some(edit) = edit {
			editing.set(Some(edit));
			request_animation_frame(move || {
				if let Some(input) = input_ref.get_untracked() {
					let _ = input.focus();
					input.select();
				}
			});
		}
	};

	let state_in = state.clone();

	let close_editor = move || {
		editing.set(None);
		if let Some(canvas) = canvas_ref.get_untracked() {
			let _ = canvas.focus();
		}
	};
	let on_label_keydown = move |ev: KeyboardEvent| {
		if matches!(ev.key().as_str(), "Enter" | "Escape") {
			ev.prevent_default();
			close_editor();
		}
	};

	let variant_buttons = BackgroundVariant::ALL
		.into_iter()
		.map(|v| {
			let state_v = state.clone();
			view! {
				<button
					class=move || {
						if variant.get() == v { "variant-button active" } else { "variant-button" }
					}
					on:click=move |_| {
						variant.set(v);
						if let Some(ref mut s) = *state_v.borrow_mut() {
							s.set_variant(v);
						}
					}
				>
					{v.label()}
				</button>
			}
		})
		.collect_view();

	let (state_zi, state_zo, state_fv, state_lk) =
		(state.clone(), state.clone(), state.clone(), state.clone());

	view! {
		<div class="workflow-canvas" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="workflow-canvas__surface"
				tabindex="0"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:dragover=on_dragover
				on:drop=on_drop
				on:keydown=on_keydown
				on:dblclick=on_dblclick
				style="display: block; outline: none;"
			/>
			<div class="workflow-panel" style="position: absolute; top: 10px; left: 10px;">
				<p>"Variants : "</p>
				{variant_buttons}
			</div>
			<div
				class="workflow-controls"
				style="position: absolute; bottom: 10px; left: 10px; display: flex; flex-direction: column;"
			>
				<button
					title="zoom in"
					on:click=move |_| {
						if let Some(ref mut s) = *state_zi.borrow_mut() {
							s.zoom_in();
						}
					}
				>
					"+"
				</button>
				<button
					title="zoom out"
					on:click=move |_| {
						if let Some(ref mut s) = *state_zo.borrow_mut() {
							s.zoom_out();
						}
					}
				>
					"-"
				</button>
				<button
					title="fit view"
					on:click=move |_| {
						if let Some(ref mut s) = *state_fv.borrow_mut() {
							s.fit_view();
						}
					}
				>
					"fit"
				</button>
				<button
					title="toggle interactivity"
					on:click=move |_| {
						if let Some(ref mut s) = *state_lk.borrow_mut() {
							locked.set(s.toggle_lock());
						}
					}
				>
					{move || if locked.get() { "unlock" } else { "lock" }}
				</button>
			</div>
			<input
				node_ref=input_ref
				type="text"
				class="workflow-label-editor"
				style=move || editor_style(editing.get().as_ref())
				prop:value=move || editing.get().map(|e| e.value).unwrap_or_default()
				on:input=move |ev| {
					let value = event_target_value(&ev);
					let Some(node_id) = editing.get_untracked().map(|e| e.node_id) else {
						return;
					};
					if let Some(ref mut s) = *state_in.borrow_mut() {
						if let Err(e) = s.set_label(&node_id, &value) {
							warn!("Label edit dropped: {}", e);
						}
					}
					editing.update(|edit| {
						if let Some(edit) = edit {
							edit.value = value;
						}
					});
				}
				on:keydown=on_label_keydown
				on:blur=move |_| editing.set(None)
			/>
		</div>
	}
}
