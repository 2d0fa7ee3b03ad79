use leptos::prelude::*;
use log::warn;
use web_sys::DragEvent;

use super::state::DND_MIME;
use super::types::ModuleItem;

/// Palette of draggable modules. Dragging an entry onto a
/// [`WorkflowCanvas`](super::WorkflowCanvas) creates a node named after it.
#[component]
pub fn ModuleSidebar(
	/// Entries offered for dragging.
	#[prop(default = ModuleItem::default_palette())]
	modules: Vec<ModuleItem>,
) -> impl IntoView {
	let items = modules
		.into_iter()
		.map(|module| {
			let name = module.name.clone();
			let on_drag_start = move |ev: DragEvent| {
				let Some(dt) = ev.data_transfer() else {
					return;
				};
				if dt.set_data(DND_MIME, &name).is_err() {
					warn!("Could not attach module {:?} to drag", name);
				}
				dt.set_effect_allowed("move");
			};
			view! {
				<div
					class="dndnode input"
					data-module-id=module.id.to_string()
					draggable="true"
					on:dragstart=on_drag_start
				>
					<h1>{module.name}</h1>
				</div>
			}
		})
		.collect_view();

	view! {
		<aside class="module-sidebar" style="float: left;">
			<div class="module-sidebar__title">
				<p>"Modules"</p>
			</div>
			<div class="module-sidebar__items">{items}</div>
		</aside>
	}
}
