use std::collections::HashSet;

use log::{debug, info};

use super::config::CanvasOptions;
use super::error::WorkflowError;
use super::graph::{self, add_edge, edge_exists};
use super::ids::IdGenerator;
use super::path::EdgePath;
use super::types::{BackgroundVariant, Connection, FlowEdge, FlowNode, NodeKind, XYPosition};
use super::viewport::{Rect, Viewport, snap_to_grid};

/// MIME type of the drag payload carrying a module name.
pub const DND_MIME: &str = "application/x-workflow-module";
/// Id of the input node every canvas starts with.
pub const INITIAL_NODE_ID: &str = "1";

const EDGE_HIT_SAMPLES: usize = 20;

/// In-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Whether a node is being dragged.
	pub active: bool,
	/// Node under the pointer when the drag started.
	pub node_id: Option<String>,
	/// Screen x of the press.
	pub start_x: f64,
	/// Screen y of the press.
	pub start_y: f64,
	/// Node position at the press, in canvas coordinates.
	pub node_start: XYPosition,
}

/// In-progress background pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether the viewport is being panned.
	pub active: bool,
	/// Screen x of the last pointer event.
	pub last_x: f64,
	/// Screen y of the last pointer event.
	pub last_y: f64,
}

/// In-progress connect gesture, from a handle to the pointer.
#[derive(Clone, Debug, Default)]
pub struct ConnectState {
	/// Whether a connection line is being drawn.
	pub active: bool,
	/// Node whose handle was pressed; it becomes the edge source.
	pub source: Option<String>,
	/// Pressed handle, in canvas coordinates.
	pub from: XYPosition,
	/// Current pointer, in canvas coordinates.
	pub to: XYPosition,
}

/// What a pointer press on the canvas turned into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerAction {
	/// The remove button of this edge was pressed.
	RemovedEdge(String),
	/// A connect gesture started from this node's handle.
	Connecting(String),
	/// This node was selected and is being dragged.
	Dragging(String),
	/// This edge was selected.
	SelectedEdge(String),
	/// Nothing was hit, or the canvas is locked; the viewport pans.
	Panning,
}

/// Screen placement of the inline label editor.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelEdit {
	/// Node being renamed.
	pub node_id: String,
	/// Left edge in screen px, relative to the canvas.
	pub left: f64,
	/// Top edge in screen px, relative to the canvas.
	pub top: f64,
	/// Width in screen px.
	pub width: f64,
	/// Height in screen px.
	pub height: f64,
	/// Current label.
	pub value: String,
}

/// Accepts a drag payload unless it is absent or empty.
pub fn parse_drop_payload(raw: Option<String>) -> Result<String, WorkflowError> {
	match raw {
		Some(name) if !name.is_empty() => Ok(name),
		_ => Err(WorkflowError::MissingPayload),
	}
}

fn initial_nodes() -> Vec<FlowNode> {
	vec![FlowNode::new(
		INITIAL_NODE_ID,
		NodeKind::Input,
		"Test",
		XYPosition::new(250.0, 8.0),
	)]
}

/// Graph, viewport and gesture state of one workflow canvas.
pub struct WorkflowState {
	nodes: Vec<FlowNode>,
	edges: Vec<FlowEdge>,
	variant: BackgroundVariant,
	ids: IdGenerator,
	selected_nodes: HashSet<String>,
	selected_edges: HashSet<String>,
	locked: bool,
	/// Tunables the canvas was created with.
	pub options: CanvasOptions,
	/// Current pan and zoom.
	pub viewport: Viewport,
	/// Node drag in progress.
	pub drag: DragState,
	/// Background pan in progress.
	pub pan: PanState,
	/// Connect gesture in progress.
	pub connect: ConnectState,
	/// Canvas width in screen px.
	pub width: f64,
	/// Canvas height in screen px.
	pub height: f64,
}

impl WorkflowState {
	/// Canvas holding only the input node, framed by fit-view.
	pub fn new(options: CanvasOptions, width: f64, height: f64) -> Self {
		let mut state = Self {
			nodes: initial_nodes(),
			edges: Vec::new(),
			variant: BackgroundVariant::default(),
			ids: IdGenerator::new(),
			selected_nodes: HashSet::new(),
			selected_edges: HashSet::new(),
			locked: false,
			options,
			viewport: Viewport::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			connect: ConnectState::default(),
			width,
			height,
		};
		state.fit_view();
		state
	}

	/// Nodes in paint order; the last one is on top.
	pub fn nodes(&self) -> &[FlowNode] {
		&self.nodes
	}

	/// Edges in paint order.
	pub fn edges(&self) -> &[FlowEdge] {
		&self.edges
	}

	/// Node with the given id.
	pub fn node(&self, id: &str) -> Option<&FlowNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Current background pattern.
	pub fn variant(&self) -> BackgroundVariant {
		self.variant
	}

	/// Display-only: the graph is left untouched.
	pub fn set_variant(&mut self, variant: BackgroundVariant) {
		debug!("Background variant set to {:?}", variant);
		self.variant = variant;
	}

	/// Whether editing is frozen.
	pub fn is_locked(&self) -> bool {
		self.locked
	}

	/// Locking freezes node dragging, connecting and deletion; panning and
	/// zooming keep working.
	pub fn toggle_lock(&mut self) -> bool {
		self.locked = !self.locked;
		self.cancel_pointer();
		info!("Canvas interactivity {}", if self.locked { "locked" } else { "unlocked" });
		self.locked
	}

	// ------------------------------------------------------------------
	// Geometry
	// ------------------------------------------------------------------

	/// Node bounds in canvas coordinates.
	pub fn node_rect(&self, node: &FlowNode) -> Rect {
		Rect {
			x: node.position.x,
			y: node.position.y,
			width: self.options.node_width,
			height: self.options.node_height,
		}
	}

	/// Bottom handle, where outgoing edges start.
	pub fn source_handle(&self, node: &FlowNode) -> XYPosition {
		XYPosition::new(
			node.position.x + self.options.node_width / 2.0,
			node.position.y + self.options.node_height,
		)
	}

	/// Top handle, where incoming edges end. Input nodes have none.
	pub fn target_handle(&self, node: &FlowNode) -> Option<XYPosition> {
		node.kind.has_target_handle().then(|| {
			XYPosition::new(node.position.x + self.options.node_width / 2.0, node.position.y)
		})
	}

	/// Curve of `edge`, from the source's bottom handle to the top of the
	/// target. `None` while an endpoint is missing.
	pub fn edge_path(&self, edge: &FlowEdge) -> Option<EdgePath> {
		let source = self.node(&edge.source)?;
		let target = self.node(&edge.target)?;
		let end = XYPosition::new(
			target.position.x + self.options.node_width / 2.0,
			target.position.y,
		);
		Some(EdgePath::between(self.source_handle(source), end))
	}

	// ------------------------------------------------------------------
	// Hit testing (screen coordinates relative to the canvas element)
	// ------------------------------------------------------------------

	/// Topmost node under the point.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<String> {
		let p = self.viewport.project(sx, sy);
		self.nodes
			.iter()
			.rev()
			.find(|n| self.node_rect(n).contains(p))
			.map(|n| n.id.clone())
	}

	/// Node whose handle is under the point. The search stops at the topmost
	/// node hit, so a node body covers the handles of the nodes beneath it.
	pub fn handle_at(&self, sx: f64, sy: f64) -> Option<String> {
		let p = self.viewport.project(sx, sy);
		let radius = self.options.handle_radius * 2.0;
		let near = |h: XYPosition| {
			let (dx, dy) = (h.x - p.x, h.y - p.y);
			(dx * dx + dy * dy).sqrt() <= radius
		};
		for n in self.nodes.iter().rev() {
			if near(self.source_handle(n)) || self.target_handle(n).is_some_and(near) {
				return Some(n.id.clone());
			}
			if self.node_rect(n).contains(p) {
				return None;
			}
		}
		None
	}

	/// Edge whose remove button is under the point.
	pub fn edge_button_at(&self, sx: f64, sy: f64) -> Option<String> {
		let p = self.viewport.project(sx, sy);
		let radius = self.options.edge_button_radius;
		self.edges
			.iter()
			.filter(|e| e.style.with_button)
			.find(|e| {
				self.edge_path(e).is_some_and(|path| {
					let mid = path.midpoint();
					let (dx, dy) = (mid.x - p.x, mid.y - p.y);
					(dx * dx + dy * dy).sqrt() <= radius
				})
			})
			.map(|e| e.id.clone())
	}

	/// Closest edge within the hit distance of the point.
	pub fn edge_at(&self, sx: f64, sy: f64) -> Option<String> {
		let p = self.viewport.project(sx, sy);
		let max = self.options.edge_hit_distance / self.viewport.zoom;
		self.edges
			.iter()
			.filter_map(|e| {
				let d = self.edge_path(e)?.distance_to(p, EDGE_HIT_SAMPLES);
				(d <= max).then_some((d, e))
			})
			.min_by(|a, b| a.0.total_cmp(&b.0))
			.map(|(_, e)| e.id.clone())
	}

	// ------------------------------------------------------------------
	// Graph edits
	// ------------------------------------------------------------------

	/// Creates a node for the dropped module at the screen point and chains
	/// it to the previously dropped node (the input node for the first drop).
	pub fn drop_module(
		&mut self,
		payload: Option<String>,
		sx: f64,
		sy: f64,
	) -> Result<String, WorkflowError> {
		let label = parse_drop_payload(payload)?;
		let mut position = self.viewport.project(sx, sy);
		if self.options.snap_to_grid {
			position = snap_to_grid(position, self.options.snap_grid);
		}

		let id = self.ids.next_id();
		self.nodes
			.push(FlowNode::new(id.clone(), NodeKind::Default, label.clone(), position));
		info!("Dropped module {:?} as node {}", label, id);

		let source = self
			.ids
			.previous_id()
			.unwrap_or_else(|| INITIAL_NODE_ID.to_string());
		if self.node(&source).is_some() {
			add_edge(FlowEdge::between(source, id.clone()), &mut self.edges);
		} else {
			debug!("Chain source {} is gone, node {} left unlinked", source, id);
		}
		Ok(id)
	}

	/// Adds the edge `source -> target`. Returns the new edge id.
	pub fn connect(&mut self, connection: Connection) -> Result<String, WorkflowError> {
		let Connection { source, target } = connection;
		if source == target {
			return Err(WorkflowError::SelfConnection(source));
		}
		for id in [&source, &target] {
			if self.node(id).is_none() {
				return Err(WorkflowError::UnknownNode(id.clone()));
			}
		}
		if edge_exists(&source, &target, &self.edges) {
			return Err(WorkflowError::DuplicateEdge {
				from: source,
				to: target,
			});
		}
		let edge = FlowEdge::between(source, target);
		let id = edge.id.clone();
		self.edges.push(edge);
		info!("Connected {}", id);
		Ok(id)
	}

	/// Removes the nodes and re-links each one's incomers to its outgoers.
	/// Unknown ids are ignored. Returns the removed nodes.
	pub fn delete_nodes(&mut self, ids: &[&str]) -> Vec<FlowNode> {
		let deleted: Vec<&str> = ids
			.iter()
			.copied()
			.filter(|id| self.node(id).is_some())
			.collect();
		if deleted.is_empty() {
			return Vec::new();
		}

		self.edges = graph::rewire_deleted(&deleted, &self.nodes, &self.edges);
		let (removed, kept): (Vec<FlowNode>, Vec<FlowNode>) = std::mem::take(&mut self.nodes)
			.into_iter()
			.partition(|n| deleted.contains(&n.id.as_str()));
		self.nodes = kept;

		for node in &removed {
			self.selected_nodes.remove(&node.id);
		}
		self.selected_edges.retain(|id| self.edges.iter().any(|e| &e.id == id));
		info!("Deleted {} node(s), {} edge(s) remain", removed.len(), self.edges.len());
		removed
	}

	/// Removes one edge without re-linking. Returns whether it existed.
	pub fn remove_edge(&mut self, id: &str) -> bool {
		let before = self.edges.len();
		self.edges.retain(|e| e.id != id);
		self.selected_edges.remove(id);
		let removed = self.edges.len() != before;
		if removed {
			debug!("Removed edge {}", id);
		}
		removed
	}

	/// Deletes selected edges, then selected nodes. Returns how many
	/// nodes and edges were selected for deletion.
	pub fn delete_selected(&mut self) -> usize {
		if self.locked {
			return 0;
		}
		let edges: Vec<String> = self.selected_edges.iter().cloned().collect();
		for id in &edges {
			self.remove_edge(id);
		}
		// keep list order so re-wiring is deterministic
		let nodes: Vec<String> = self
			.nodes
			.iter()
			.filter(|n| self.selected_nodes.contains(&n.id))
			.map(|n| n.id.clone())
			.collect();
		let node_refs: Vec<&str> = nodes.iter().map(String::as_str).collect();
		self.delete_nodes(&node_refs);
		edges.len() + nodes.len()
	}

	/// Renames a node.
	pub fn set_label(&mut self, id: &str, label: &str) -> Result<(), WorkflowError> {
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or_else(|| WorkflowError::UnknownNode(id.to_string()))?;
		node.label = label.to_string();
		Ok(())
	}

	/// Moves a node, snapping to the grid when enabled.
	pub fn move_node(&mut self, id: &str, position: XYPosition) -> Result<(), WorkflowError> {
		let position = if self.options.snap_to_grid {
			snap_to_grid(position, self.options.snap_grid)
		} else {
			position
		};
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or_else(|| WorkflowError::UnknownNode(id.to_string()))?;
		node.position = position;
		Ok(())
	}

	// ------------------------------------------------------------------
	// Selection
	// ------------------------------------------------------------------

	fn select(set: &mut HashSet<String>, id: &str, additive: bool) {
		if additive {
			if !set.remove(id) {
				set.insert(id.to_string());
			}
		} else {
			set.clear();
			set.insert(id.to_string());
		}
	}

	/// Plain selection replaces; `additive` (shift) toggles membership.
	pub fn select_node(&mut self, id: &str, additive: bool) {
		if !additive {
			self.selected_edges.clear();
		}
		Self::select(&mut self.selected_nodes, id, additive);
	}

	/// Edge counterpart of [`Self::select_node`].
	pub fn select_edge(&mut self, id: &str, additive: bool) {
		if !additive {
			self.selected_nodes.clear();
		}
		Self::select(&mut self.selected_edges, id, additive);
	}

	/// Deselects everything.
	pub fn clear_selection(&mut self) {
		self.selected_nodes.clear();
		self.selected_edges.clear();
	}

	/// Whether the node is selected.
	pub fn is_node_selected(&self, id: &str) -> bool {
		self.selected_nodes.contains(id)
	}

	/// Whether the edge is selected.
	pub fn is_edge_selected(&self, id: &str) -> bool {
		self.selected_edges.contains(id)
	}

	// ------------------------------------------------------------------
	// Pointer interaction
	// ------------------------------------------------------------------

	/// Starts a gesture at the screen point. Hits are resolved in reverse
	/// paint order: handles and nodes, then edge buttons, then edges.
	pub fn begin_pointer(&mut self, sx: f64, sy: f64, additive: bool) -> PointerAction {
		if !self.locked {
			if let Some(node_id) = self.handle_at(sx, sy) {
				let from = self.viewport.project(sx, sy);
				self.connect = ConnectState {
					active: true,
					source: Some(node_id.clone()),
					from,
					to: from,
				};
				return PointerAction::Connecting(node_id);
			}
		}
		if let Some(node_id) = self.node_at(sx, sy) {
			self.select_node(&node_id, additive);
			if !self.locked {
				let node_start = self.node(&node_id).map(|n| n.position).unwrap_or_default();
				self.drag = DragState {
					active: true,
					node_id: Some(node_id.clone()),
					start_x: sx,
					start_y: sy,
					node_start,
				};
				return PointerAction::Dragging(node_id);
			}
		} else if let Some(edge_id) = self.edge_button_at(sx, sy).filter(|_| !self.locked) {
			self.remove_edge(&edge_id);
			return PointerAction::RemovedEdge(edge_id);
		} else if let Some(edge_id) = self.edge_at(sx, sy) {
			self.select_edge(&edge_id, additive);
			return PointerAction::SelectedEdge(edge_id);
		} else if !additive {
			self.clear_selection();
		}

		self.pan = PanState {
			active: true,
			last_x: sx,
			last_y: sy,
		};
		PointerAction::Panning
	}

	/// Advances the active gesture to the screen point.
	pub fn update_pointer(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			if let Some(id) = self.drag.node_id.clone() {
				let k = self.viewport.zoom;
				let position = XYPosition::new(
					self.drag.node_start.x + (sx - self.drag.start_x) / k,
					self.drag.node_start.y + (sy - self.drag.start_y) / k,
				);
				if let Err(e) = self.move_node(&id, position) {
					debug!("Drag cancelled: {}", e);
					self.drag = DragState::default();
				}
			}
		} else if self.connect.active {
			self.connect.to = self.viewport.project(sx, sy);
		} else if self.pan.active {
			self.viewport.pan_by(sx - self.pan.last_x, sy - self.pan.last_y);
			self.pan.last_x = sx;
			self.pan.last_y = sy;
		}
	}

	/// Finishes the current gesture. A connect gesture released over
	/// another node yields the new edge id.
	pub fn end_pointer(&mut self, sx: f64, sy: f64) -> Option<String> {
		let mut created = None;
		if self.connect.active {
			if let (Some(source), Some(target)) = (self.connect.source.clone(), self.node_at(sx, sy)) {
				match self.connect(Connection { source, target }) {
					Ok(id) => created = Some(id),
					Err(e) => debug!("Connection dropped: {}", e),
				}
			}
		}
		self.cancel_pointer();
		created
	}

	/// Drops any gesture in progress.
	pub fn cancel_pointer(&mut self) {
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.connect = ConnectState::default();
	}

	/// Screen rectangle and current text for editing the label of `id`.
	pub fn label_edit_for(&self, id: &str) -> Option<LabelEdit> {
		let node = self.node(id)?;
		let rect = self.node_rect(node);
		let (left, top) = self.viewport.to_screen(node.position);
		Some(LabelEdit {
			node_id: node.id.clone(),
			left,
			top,
			width: rect.width * self.viewport.zoom,
			height: rect.height * self.viewport.zoom,
			value: node.label.clone(),
		})
	}

	// ------------------------------------------------------------------
	// Viewport
	// ------------------------------------------------------------------

	/// Zooms about the pointer, in on wheel up and out on wheel down.
	pub fn wheel_zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.viewport
			.zoom_about(sx, sy, factor, self.options.min_zoom, self.options.max_zoom);
	}

	/// Controls "+": zooms about the canvas center.
	pub fn zoom_in(&mut self) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let step = self.options.zoom_step;
		self.viewport
			.zoom_about(cx, cy, step, self.options.min_zoom, self.options.max_zoom);
	}

	/// Controls "-": zooms about the canvas center.
	pub fn zoom_out(&mut self) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let step = 1.0 / self.options.zoom_step;
		self.viewport
			.zoom_about(cx, cy, step, self.options.min_zoom, self.options.max_zoom);
	}

	/// Frames all nodes. Leaves the viewport alone on an empty canvas.
	pub fn fit_view(&mut self) {
		let Some(bounds) = Rect::bounding(self.nodes.iter().map(|n| self.node_rect(n))) else {
			return;
		};
		self.viewport = Viewport::fit_bounds(
			bounds,
			self.width,
			self.height,
			self.options.min_zoom,
			self.options.max_zoom,
			self.options.fit_view_padding,
		);
	}

	/// Records the new canvas size in screen px.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> WorkflowState {
		let mut s = WorkflowState::new(CanvasOptions::default(), 800.0, 600.0);
		// identity transform keeps screen and canvas coordinates equal
		s.viewport = Viewport::default();
		s
	}

	fn pairs(s: &WorkflowState) -> Vec<(String, String)> {
		s.edges()
			.iter()
			.map(|e| (e.source.clone(), e.target.clone()))
			.collect()
	}

	// ========================================================================
	// Initialization
	// ========================================================================

	#[test]
	fn starts_with_single_input_node() {
		let s = WorkflowState::new(CanvasOptions::default(), 800.0, 600.0);
		assert_eq!(s.nodes().len(), 1);
		let node = &s.nodes()[0];
		assert_eq!(node.id, INITIAL_NODE_ID);
		assert_eq!(node.kind, NodeKind::Input);
		assert_eq!(node.label, "Test");
		assert_eq!(node.style.border_color, "#0041d0");
		assert!(s.edges().is_empty());
		assert_eq!(s.variant(), BackgroundVariant::Cross);
	}

	#[test]
	fn initial_fit_view_centers_input_node() {
		let s = WorkflowState::new(CanvasOptions::default(), 800.0, 600.0);
		let rect = s.node_rect(&s.nodes()[0]);
		assert_eq!(s.viewport.zoom, 2.0);
		assert_eq!(s.viewport.to_screen(rect.center()), (400.0, 300.0));
	}

	// ========================================================================
	// Drop payload
	// ========================================================================

	#[test]
	fn payload_must_be_present_and_non_empty() {
		assert_eq!(parse_drop_payload(None), Err(WorkflowError::MissingPayload));
		assert_eq!(
			parse_drop_payload(Some(String::new())),
			Err(WorkflowError::MissingPayload)
		);
		assert_eq!(parse_drop_payload(Some(" ".into())), Ok(" ".into()));
		assert_eq!(parse_drop_payload(Some("Box 2".into())), Ok("Box 2".into()));
	}

	#[test]
	fn drop_snaps_to_grid() {
		let mut s = state();
		let id = s.drop_module(Some("Box 1".into()), 101.0, 208.0).unwrap();
		assert_eq!(s.node(&id).unwrap().position, XYPosition::new(105.0, 210.0));
	}

	#[test]
	fn drop_projects_through_viewport() {
		let mut s = state();
		s.options.snap_to_grid = false;
		s.viewport = Viewport {
			x: 100.0,
			y: 50.0,
			zoom: 2.0,
		};
		let id = s.drop_module(Some("Box 1".into()), 300.0, 250.0).unwrap();
		assert_eq!(s.node(&id).unwrap().position, XYPosition::new(100.0, 100.0));
	}

	#[test]
	fn dropped_node_after_deleted_predecessor_is_unlinked() {
		let mut s = state();
		let first = s.drop_module(Some("Box 1".into()), 0.0, 200.0).unwrap();
		s.delete_nodes(&[first.as_str()]);
		let second = s.drop_module(Some("Box 2".into()), 0.0, 300.0).unwrap();
		assert!(s.edges().iter().all(|e| !e.touches(&second)));
	}

	// ========================================================================
	// Connect
	// ========================================================================

	#[test]
	fn connect_rejects_bad_requests() {
		let mut s = state();
		let a = s.drop_module(Some("Box 1".into()), 0.0, 200.0).unwrap();
		assert_eq!(
			s.connect(Connection {
				source: a.clone(),
				target: a.clone(),
			}),
			Err(WorkflowError::SelfConnection(a.clone()))
		);
		assert_eq!(
			s.connect(Connection {
				source: a.clone(),
				target: "nope".into(),
			}),
			Err(WorkflowError::UnknownNode("nope".into()))
		);
		assert!(matches!(
			s.connect(Connection {
				source: INITIAL_NODE_ID.into(),
				target: a.clone(),
			}),
			Err(WorkflowError::DuplicateEdge { .. })
		));
		assert_eq!(
			s.connect(Connection {
				source: a.clone(),
				target: INITIAL_NODE_ID.into(),
			}),
			Ok(format!("{a}->1"))
		);
	}

	#[test]
	fn connect_gesture_from_handle_to_node() {
		let mut s = state();
		let a = s.drop_module(Some("Box 1".into()), 0.0, 300.0).unwrap();
		let b = s.drop_module(Some("Box 2".into()), 450.0, 300.0).unwrap();
		// a's bottom handle sits at (75, 340)
		assert_eq!(s.begin_pointer(75.0, 340.0, false), PointerAction::Connecting(a.clone()));
		s.update_pointer(500.0, 310.0);
		assert!(s.connect.active);
		assert_eq!(s.connect.to, XYPosition::new(500.0, 310.0));
		let created = s.end_pointer(500.0, 310.0);
		assert_eq!(created, None, "a -> b already chained");
		assert!(!s.connect.active);

		let created = {
			// b's top handle is at (525, 300); release over a
			assert_eq!(s.begin_pointer(525.0, 300.0, false), PointerAction::Connecting(b.clone()));
			s.end_pointer(20.0, 320.0)
		};
		assert_eq!(created, Some(format!("{b}->{a}")));
	}

	#[test]
	fn connect_gesture_released_on_empty_canvas_adds_nothing() {
		let mut s = state();
		let before = s.edges().len();
		s.begin_pointer(325.0, 48.0, false);
		assert_eq!(s.end_pointer(700.0, 580.0), None);
		assert_eq!(s.edges().len(), before);
	}

	// ========================================================================
	// Pointer: drag, pan, selection, edge button
	// ========================================================================

	#[test]
	fn drag_moves_node_with_snapping() {
		let mut s = state();
		assert_eq!(
			s.begin_pointer(260.0, 20.0, false),
			PointerAction::Dragging(INITIAL_NODE_ID.into())
		);
		assert!(s.is_node_selected(INITIAL_NODE_ID));
		s.update_pointer(291.0, 49.0);
		s.end_pointer(291.0, 49.0);
		assert_eq!(
			s.node(INITIAL_NODE_ID).unwrap().position,
			XYPosition::new(285.0, 30.0)
		);
		assert!(!s.drag.active);
	}

	#[test]
	fn background_press_pans_and_clears_selection() {
		let mut s = state();
		s.select_node(INITIAL_NODE_ID, false);
		assert_eq!(s.begin_pointer(700.0, 500.0, false), PointerAction::Panning);
		assert!(!s.is_node_selected(INITIAL_NODE_ID));
		s.update_pointer(720.0, 490.0);
		assert_eq!((s.viewport.x, s.viewport.y), (20.0, -10.0));
		s.cancel_pointer();
		assert!(!s.pan.active);
	}

	#[test]
	fn edge_button_removes_edge() {
		let mut s = state();
		s.options.snap_to_grid = false;
		let id = s.drop_module(Some("Box 1".into()), 250.0, 200.0).unwrap();
		let edge = s.edges()[0].clone();
		let mid = s.edge_path(&edge).unwrap().midpoint();
		assert_eq!(s.edge_button_at(mid.x, mid.y), Some(edge.id.clone()));
		assert_eq!(
			s.begin_pointer(mid.x, mid.y, false),
			PointerAction::RemovedEdge(format!("1->{id}"))
		);
		assert!(s.edges().is_empty());
	}

	#[test]
	fn node_over_edge_button_takes_the_press() {
		let mut s = state();
		s.options.snap_to_grid = false;
		let a = s.drop_module(Some("Box 1".into()), 250.0, 200.0).unwrap();
		let b = s.drop_module(Some("Box 2".into()), 250.0, 400.0).unwrap();
		let hidden = s.edges()[0].clone();
		assert_eq!(hidden.id, format!("1->{a}"));
		let mid = s.edge_path(&hidden).unwrap().midpoint();
		s.move_node(&b, XYPosition::new(250.0, 104.0)).unwrap();
		assert_eq!(s.node_at(mid.x, mid.y), Some(b.clone()));

		assert_eq!(s.begin_pointer(mid.x, mid.y, false), PointerAction::Dragging(b));
		assert_eq!(s.edges().len(), 2);
		assert!(s.edges().iter().any(|e| e.id == hidden.id));
	}

	#[test]
	fn node_body_covers_handles_beneath_it() {
		let mut s = state();
		s.options.snap_to_grid = false;
		let a = s.drop_module(Some("Box 1".into()), 0.0, 200.0).unwrap();
		let b = s.drop_module(Some("Box 2".into()), 0.0, 400.0).unwrap();
		// a's bottom handle sits at (75, 240)
		assert_eq!(s.handle_at(75.0, 240.0), Some(a.clone()));

		s.move_node(&b, XYPosition::new(0.0, 220.0)).unwrap();
		assert_eq!(s.handle_at(75.0, 240.0), None);
		assert_eq!(s.begin_pointer(75.0, 240.0, false), PointerAction::Dragging(b.clone()));
		s.end_pointer(75.0, 240.0);

		s.move_node(&b, XYPosition::new(400.0, 400.0)).unwrap();
		assert_eq!(s.begin_pointer(75.0, 240.0, false), PointerAction::Connecting(a));
	}

	#[test]
	fn drag_of_deleted_node_is_cancelled() {
		let mut s = state();
		let a = s.drop_module(Some("Box 1".into()), 0.0, 200.0).unwrap();
		assert_eq!(s.begin_pointer(20.0, 220.0, false), PointerAction::Dragging(a.clone()));
		s.delete_nodes(&[a.as_str()]);
		s.update_pointer(60.0, 260.0);
		assert!(!s.drag.active);
		assert!(s.node(&a).is_none());
	}

	#[test]
	fn clicking_an_edge_selects_it() {
		let mut s = state();
		s.options.snap_to_grid = false;
		s.drop_module(Some("Box 1".into()), 250.0, 300.0).unwrap();
		let edge = s.edges()[0].clone();
		let p = s.edge_path(&edge).unwrap().eval(0.2);
		assert_eq!(
			s.begin_pointer(p.x, p.y, false),
			PointerAction::SelectedEdge(edge.id.clone())
		);
		assert!(s.is_edge_selected(&edge.id));
		assert_eq!(s.delete_selected(), 1);
		assert!(s.edges().is_empty());
		assert_eq!(s.nodes().len(), 2);
	}

	#[test]
	fn shift_toggles_selection() {
		let mut s = state();
		let a = s.drop_module(Some("Box 1".into()), 0.0, 200.0).unwrap();
		s.select_node(INITIAL_NODE_ID, false);
		s.select_node(&a, true);
		assert!(s.is_node_selected(INITIAL_NODE_ID) && s.is_node_selected(&a));
		s.select_node(&a, true);
		assert!(!s.is_node_selected(&a));
		s.select_node(&a, false);
		assert!(!s.is_node_selected(INITIAL_NODE_ID));
	}

	#[test]
	fn lock_blocks_edits_but_allows_panning() {
		let mut s = state();
		assert!(s.toggle_lock());
		assert_eq!(s.begin_pointer(260.0, 20.0, false), PointerAction::Panning);
		assert!(s.is_node_selected(INITIAL_NODE_ID));
		assert_eq!(s.delete_selected(), 0);
		assert_eq!(s.nodes().len(), 1);
		assert!(!s.toggle_lock());
	}

	// ========================================================================
	// Delete
	// ========================================================================

	#[test]
	fn delete_selected_rewires_around_node() {
		let mut s = state();
		let a = s.drop_module(Some("Box 1".into()), 0.0, 200.0).unwrap();
		let b = s.drop_module(Some("Box 2".into()), 0.0, 300.0).unwrap();
		s.select_node(&a, false);
		assert_eq!(s.delete_selected(), 1);
		assert!(s.node(&a).is_none());
		assert_eq!(pairs(&s), [(INITIAL_NODE_ID.to_string(), b)]);
		assert!(!s.is_node_selected(&a));
	}

	#[test]
	fn delete_unknown_node_is_noop() {
		let mut s = state();
		assert!(s.delete_nodes(&["ghost"]).is_empty());
		assert_eq!(s.nodes().len(), 1);
	}

	#[test]
	fn deleting_input_node_drops_its_edges() {
		let mut s = state();
		s.drop_module(Some("Box 1".into()), 0.0, 200.0).unwrap();
		let removed = s.delete_nodes(&[INITIAL_NODE_ID]);
		assert_eq!(removed.len(), 1);
		assert!(s.edges().is_empty());
	}

	// ========================================================================
	// Labels & viewport
	// ========================================================================

	#[test]
	fn label_edits() {
		let mut s = state();
		s.set_label(INITIAL_NODE_ID, "Start").unwrap();
		assert_eq!(s.node(INITIAL_NODE_ID).unwrap().label, "Start");
		assert_eq!(
			s.set_label("ghost", "x"),
			Err(WorkflowError::UnknownNode("ghost".into()))
		);
		let edit = s.label_edit_for(INITIAL_NODE_ID).unwrap();
		assert_eq!((edit.left, edit.top), (250.0, 8.0));
		assert_eq!((edit.width, edit.height), (150.0, 40.0));
		assert_eq!(edit.value, "Start");
	}

	#[test]
	fn zoom_controls_respect_bounds() {
		let mut s = state();
		for _ in 0..10 {
			s.zoom_in();
		}
		assert_eq!(s.viewport.zoom, 2.0);
		for _ in 0..10 {
			s.zoom_out();
		}
		assert_eq!(s.viewport.zoom, 0.5);
		s.wheel_zoom(10.0, 10.0, -1.0);
		assert!(s.viewport.zoom > 0.5);
	}
}
