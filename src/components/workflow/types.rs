//! Node, edge and palette records held by the workflow canvas.

/// Border color shared by every node.
pub const NODE_BORDER_COLOR: &str = "#0041d0";
/// Stroke and marker color shared by every edge.
pub const EDGE_COLOR: &str = "#4f7ddf";

/// Point in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct XYPosition {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl XYPosition {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Which handles a node exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeKind {
	/// Entry node: only exposes a source handle.
	Input,
	/// Target handle on top, source handle at the bottom.
	#[default]
	Default,
}

impl NodeKind {
	/// Whether edges may end on this kind of node.
	pub fn has_target_handle(self) -> bool {
		matches!(self, NodeKind::Default)
	}
}

/// Visual style of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
	/// CSS color of the border.
	pub border_color: String,
}

impl Default for NodeStyle {
	fn default() -> Self {
		Self {
			border_color: NODE_BORDER_COLOR.into(),
		}
	}
}

/// A box on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowNode {
	/// Unique id: `"1"` for the input node, `dndnode_N` for dropped ones.
	pub id: String,
	/// Handle layout.
	pub kind: NodeKind,
	/// Text drawn in the node; editable.
	pub label: String,
	/// Top-left corner in canvas coordinates.
	pub position: XYPosition,
	/// Visual style.
	pub style: NodeStyle,
}

impl FlowNode {
	/// Node with the default style.
	pub fn new(
		id: impl Into<String>,
		kind: NodeKind,
		label: impl Into<String>,
		position: XYPosition,
	) -> Self {
		Self {
			id: id.into(),
			kind,
			label: label.into(),
			position,
			style: NodeStyle::default(),
		}
	}
}

/// Filled arrowhead drawn at the target end of an edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMarker {
	/// CSS color of the arrowhead.
	pub color: String,
}

/// Visual style of an edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
	/// CSS color of the curve.
	pub stroke: String,
	/// Arrowhead at the target end, if any.
	pub marker_end: Option<EdgeMarker>,
	/// Draws the remove button at the edge midpoint.
	pub with_button: bool,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			stroke: EDGE_COLOR.into(),
			marker_end: Some(EdgeMarker {
				color: EDGE_COLOR.into(),
			}),
			with_button: true,
		}
	}
}

/// A directed link between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowEdge {
	/// `"{source}->{target}"`.
	pub id: String,
	/// Node the edge leaves.
	pub source: String,
	/// Node the edge enters.
	pub target: String,
	/// Visual style.
	pub style: EdgeStyle,
}

impl FlowEdge {
	/// Builds an edge with the default edge options and a pair-derived id.
	pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
		let (source, target) = (source.into(), target.into());
		Self {
			id: edge_id(&source, &target),
			source,
			target,
			style: EdgeStyle::default(),
		}
	}

	/// Whether `node_id` is either endpoint.
	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}
}

/// Id of the edge from `source` to `target`.
pub fn edge_id(source: &str, target: &str) -> String {
	format!("{source}->{target}")
}

/// A requested link between two nodes, as produced by the connect gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
	/// Node whose handle the gesture started on.
	pub source: String,
	/// Node the gesture was released over.
	pub target: String,
}

/// Background tiling pattern of the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackgroundVariant {
	/// Filled dots at every lattice point.
	Dots,
	/// Full horizontal and vertical grid lines.
	Lines,
	/// Small plus signs at every lattice point.
	#[default]
	Cross,
}

impl BackgroundVariant {
	/// Every variant, in panel order.
	pub const ALL: [BackgroundVariant; 3] = [
		BackgroundVariant::Dots,
		BackgroundVariant::Lines,
		BackgroundVariant::Cross,
	];

	/// Button caption.
	pub fn label(self) -> &'static str {
		match self {
			BackgroundVariant::Dots => "Dots",
			BackgroundVariant::Lines => "Lines",
			BackgroundVariant::Cross => "Cross",
		}
	}
}

/// An entry of the sidebar palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleItem {
	/// Position in the palette.
	pub id: u32,
	/// Drag payload; becomes the dropped node's label.
	pub name: String,
}

impl ModuleItem {
	/// `Box 1` to `Box 3`.
	pub fn default_palette() -> Vec<ModuleItem> {
		(1..=3)
			.map(|i| ModuleItem {
				id: i,
				name: format!("Box {}", i),
			})
			.collect()
	}
}
