/// Tunables of a workflow canvas. Passed as a component prop; the defaults
/// reproduce the stock look and behaviour.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasOptions {
	/// Snap dropped and dragged nodes to `snap_grid`.
	pub snap_to_grid: bool,
	/// Grid cell size in canvas units.
	pub snap_grid: (f64, f64),
	/// Lower zoom bound.
	pub min_zoom: f64,
	/// Upper zoom bound.
	pub max_zoom: f64,
	/// Fraction of the content size left empty around it by fit-view.
	pub fit_view_padding: f64,
	/// Zoom factor of one Controls button press.
	pub zoom_step: f64,
	/// Node width in canvas units.
	pub node_width: f64,
	/// Node height in canvas units.
	pub node_height: f64,
	/// Drawn handle radius; presses within twice this distance hit it.
	pub handle_radius: f64,
	/// Radius of the remove button at an edge midpoint.
	pub edge_button_radius: f64,
	/// Pointer distance (screen px) within which an edge counts as hit.
	pub edge_hit_distance: f64,
	/// Lattice spacing of the background pattern.
	pub background_gap: f64,
	/// CSS color of the background pattern.
	pub background_color: String,
	/// CSS color behind the pattern.
	pub canvas_color: String,
}

impl Default for CanvasOptions {
	fn default() -> Self {
		Self {
			snap_to_grid: true,
			snap_grid: (15.0, 15.0),
			min_zoom: 0.5,
			max_zoom: 2.0,
			fit_view_padding: 0.1,
			zoom_step: 1.2,
			node_width: 150.0,
			node_height: 40.0,
			handle_radius: 4.0,
			edge_button_radius: 9.0,
			edge_hit_distance: 6.0,
			background_gap: 20.0,
			background_color: "#ccc".into(),
			canvas_color: "#fcfcfc".into(),
		}
	}
}
