//! Edge geometry: a vertical cubic bezier from a node's bottom handle to
//! another node's top handle.

use super::types::XYPosition;

const CURVATURE: f64 = 0.25;

/// Cubic bezier curve of a rendered edge, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePath {
	/// Start, on the source handle.
	pub p0: XYPosition,
	/// Control point below the source.
	pub p1: XYPosition,
	/// Control point above the target.
	pub p2: XYPosition,
	/// End, on the target handle.
	pub p3: XYPosition,
}

/// Distance the control points extend from a handle. Edges that run
/// upwards (target above source) still bulge out of the handles.
fn control_offset(distance: f64) -> f64 {
	if distance >= 0.0 {
		0.5 * distance
	} else {
		CURVATURE * 25.0 * (-distance).sqrt()
	}
}

impl EdgePath {
	/// Curve leaving `source` downwards and entering `target` from above.
	pub fn between(source: XYPosition, target: XYPosition) -> Self {
		let offset = control_offset(target.y - source.y);
		Self {
			p0: source,
			p1: XYPosition::new(source.x, source.y + offset),
			p2: XYPosition::new(target.x, target.y - offset),
			p3: target,
		}
	}

	/// Point on the curve at parameter `t` in `0.0..=1.0`.
	pub fn eval(&self, t: f64) -> XYPosition {
		let mt = 1.0 - t;
		let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
		XYPosition::new(
			a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
			a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
		)
	}

	/// Where the remove button of a button edge sits.
	pub fn midpoint(&self) -> XYPosition {
		self.eval(0.5)
	}

	/// Unit direction of the curve as it arrives at the target.
	pub fn end_direction(&self) -> (f64, f64) {
		let from = if self.p2 == self.p3 { self.p0 } else { self.p2 };
		let (dx, dy) = (self.p3.x - from.x, self.p3.y - from.y);
		let len = (dx * dx + dy * dy).sqrt();
		if len < f64::EPSILON {
			(0.0, 1.0)
		} else {
			(dx / len, dy / len)
		}
	}

	/// Approximate distance from `p` to the curve, sampled as `samples`
	/// straight segments.
	pub fn distance_to(&self, p: XYPosition, samples: usize) -> f64 {
		let samples = samples.max(1);
		let mut prev = self.eval(0.0);
		let mut best = f64::MAX;
		for i in 1..=samples {
			let curr = self.eval(i as f64 / samples as f64);
			best = best.min(distance_to_segment_sq(p, prev, curr));
			prev = curr;
		}
		best.sqrt()
	}
}

fn distance_to_segment_sq(p: XYPosition, a: XYPosition, b: XYPosition) -> f64 {
	let (abx, aby) = (b.x - a.x, b.y - a.y);
	let (apx, apy) = (p.x - a.x, p.y - a.y);
	let len_sq = abx * abx + aby * aby;
	if len_sq < f64::EPSILON {
		return apx * apx + apy * apy;
	}
	let t = ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0);
	let (dx, dy) = (p.x - (a.x + t * abx), p.y - (a.y + t * aby));
	dx * dx + dy * dy
}
