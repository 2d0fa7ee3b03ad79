use super::types::XYPosition;

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Extent to the right of `x`.
	pub width: f64,
	/// Extent below `y`.
	pub height: f64,
}

impl Rect {
	/// Inclusive of the border.
	pub fn contains(&self, p: XYPosition) -> bool {
		p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
	}

	/// Midpoint of the rectangle.
	pub fn center(&self) -> XYPosition {
		XYPosition::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Smallest rectangle containing all of `rects`, or `None` when empty.
	pub fn bounding<I: IntoIterator<Item = Rect>>(rects: I) -> Option<Rect> {
		rects.into_iter().reduce(|a, b| {
			let (x0, y0) = (a.x.min(b.x), a.y.min(b.y));
			let (x1, y1) = (
				(a.x + a.width).max(b.x + b.width),
				(a.y + a.height).max(b.y + b.height),
			);
			Rect {
				x: x0,
				y: y0,
				width: x1 - x0,
				height: y1 - y0,
			}
		})
	}
}

/// Pan/zoom transform: `screen = canvas * zoom + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Horizontal pan in screen px.
	pub x: f64,
	/// Vertical pan in screen px.
	pub y: f64,
	/// Scale factor.
	pub zoom: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			zoom: 1.0,
		}
	}
}

impl Viewport {
	/// Screen point (relative to the canvas element) to canvas coordinates.
	pub fn project(&self, sx: f64, sy: f64) -> XYPosition {
		XYPosition::new((sx - self.x) / self.zoom, (sy - self.y) / self.zoom)
	}

	/// Inverse of [`Self::project`].
	pub fn to_screen(&self, p: XYPosition) -> (f64, f64) {
		(p.x * self.zoom + self.x, p.y * self.zoom + self.y)
	}

	/// Shifts the view by a screen-space delta.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	/// Multiplies the zoom by `factor`, keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_about(&mut self, sx: f64, sy: f64, factor: f64, min_zoom: f64, max_zoom: f64) {
		let new_zoom = (self.zoom * factor).clamp(min_zoom, max_zoom);
		let ratio = new_zoom / self.zoom;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.zoom = new_zoom;
	}

	/// Viewport that centers `bounds` in a `width` x `height` canvas.
	pub fn fit_bounds(
		bounds: Rect,
		width: f64,
		height: f64,
		min_zoom: f64,
		max_zoom: f64,
		padding: f64,
	) -> Viewport {
		let x_zoom = width / (bounds.width * (1.0 + padding));
		let y_zoom = height / (bounds.height * (1.0 + padding));
		let zoom = x_zoom.min(y_zoom);
		let zoom = if zoom.is_finite() { zoom.clamp(min_zoom, max_zoom) } else { max_zoom };
		let c = bounds.center();
		Viewport {
			x: width / 2.0 - c.x * zoom,
			y: height / 2.0 - c.y * zoom,
			zoom,
		}
	}
}

/// Rounds `p` to the nearest point of a `grid.0` x `grid.1` lattice.
pub fn snap_to_grid(p: XYPosition, grid: (f64, f64)) -> XYPosition {
	XYPosition::new(
		grid.0 * (p.x / grid.0).round(),
		grid.1 * (p.y / grid.1).round(),
	)
}
