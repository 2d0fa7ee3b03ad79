use thiserror::Error;

/// Reasons a canvas action was rejected. None of these reach the user;
/// the component logs them and leaves the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
	/// Drop event carried no module name.
	#[error("drop payload is missing or empty")]
	MissingPayload,

	/// Operation named a node that is not on the canvas.
	#[error("node {0} does not exist")]
	UnknownNode(String),

	/// Connect gesture released over its own node.
	#[error("cannot connect node {0} to itself")]
	SelfConnection(String),

	/// An edge with the same endpoints is already present.
	#[error("edge {from} -> {to} already exists")]
	DuplicateEdge {
		/// Source node id.
		from: String,
		/// Target node id.
		to: String,
	},

	/// Canvas element or its 2d context is not available yet.
	#[error("canvas is not ready")]
	CanvasNotReady,
}
