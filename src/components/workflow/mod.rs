//! Drag-and-drop workflow canvas: graph model, editing logic and the
//! Leptos components that host it.

mod background;
mod component;
mod config;
mod error;
pub mod graph;
mod ids;
mod path;
mod render;
mod sidebar;
mod state;
mod types;
mod viewport;

pub use background::{PatternShape, pattern_for};
pub use component::WorkflowCanvas;
pub use config::CanvasOptions;
pub use error::WorkflowError;
pub use ids::IdGenerator;
pub use path::EdgePath;
pub use sidebar::ModuleSidebar;
pub use state::{
	DND_MIME, INITIAL_NODE_ID, LabelEdit, PointerAction, WorkflowState,
	parse_drop_payload,
};
pub use types::{
	BackgroundVariant, Connection, EdgeMarker, EdgeStyle, FlowEdge, FlowNode,
	ModuleItem, NodeKind, NodeStyle, XYPosition, edge_id,
};
pub use viewport::{Rect, Viewport, snap_to_grid};
