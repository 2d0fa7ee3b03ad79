use leptos::prelude::*;

use crate::components::workflow::{ModuleItem, ModuleSidebar, WorkflowCanvas};

/// Default Home Page: module palette on the left, workflow canvas beside it.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="workflow-page">
				<ModuleSidebar modules=ModuleItem::default_palette() />
				<div class="dndflow">
					<WorkflowCanvas />
				</div>
			</div>
		</ErrorBoundary>
	}
}
