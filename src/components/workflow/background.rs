//! Background tiling for the canvas.
//!
//! The pattern is generated in screen space for the visible area only, and
//! follows the viewport so it pans and zooms with the graph.

use super::types::BackgroundVariant;
use super::viewport::Viewport;

/// Below this on-screen spacing the pattern is too dense to be useful.
const MIN_SCREEN_GAP: f64 = 4.0;

/// A primitive of the background pattern, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum PatternShape {
	/// Filled circle.
	Dot { x: f64, y: f64, radius: f64 },
	/// Stroked line.
	Segment { x1: f64, y1: f64, x2: f64, y2: f64 },
}

/// Pattern size at zoom 1: dot diameter, line width, or cross arm length.
pub fn default_size(variant: BackgroundVariant) -> f64 {
	match variant {
		BackgroundVariant::Dots | BackgroundVariant::Lines => 1.0,
		BackgroundVariant::Cross => 6.0,
	}
}

/// Generate the shapes covering a `width` x `height` canvas.
///
/// `gap` is the lattice spacing in canvas units. Returns nothing when the
/// zoomed spacing falls below a few pixels.
pub fn pattern_for(
	variant: BackgroundVariant,
	viewport: &Viewport,
	width: f64,
	height: f64,
	gap: f64,
) -> Vec<PatternShape> {
	let step = gap * viewport.zoom;
	if step < MIN_SCREEN_GAP {
		return Vec::new();
	}

	// Lattice is anchored to the canvas origin, so wrap the pan offset
	let (offset_x, offset_y) = (viewport.x.rem_euclid(step), viewport.y.rem_euclid(step));
	let size = default_size(variant) * viewport.zoom;
	let mut shapes = Vec::new();

	match variant {
		BackgroundVariant::Lines => {
			let mut x = offset_x;
			while x < width + step {
				shapes.push(PatternShape::Segment {
					x1: x,
					y1: 0.0,
					x2: x,
					y2: height,
				});
				x += step;
			}
			let mut y = offset_y;
			while y < height + step {
				shapes.push(PatternShape::Segment {
					x1: 0.0,
					y1: y,
					x2: width,
					y2: y,
				});
				y += step;
			}
		}
		BackgroundVariant::Dots | BackgroundVariant::Cross => {
			let half = size / 2.0;
			let mut y = offset_y;
			while y < height + step {
				let mut x = offset_x;
				while x < width + step {
					if variant == BackgroundVariant::Dots {
						shapes.push(PatternShape::Dot {
							x,
							y,
							radius: half.max(0.5),
						});
					} else {
						shapes.push(PatternShape::Segment {
							x1: x - half,
							y1: y,
							x2: x + half,
							y2: y,
						});
						shapes.push(PatternShape::Segment {
							x1: x,
							y1: y - half,
							x2: x,
							y2: y + half,
						});
					}
					x += step;
				}
				y += step;
			}
		}
	}

	shapes
}

#[cfg(test)]
mod tests {
	use super::*;

	fn count_dots(shapes: &[PatternShape]) -> usize {
		shapes
			.iter()
			.filter(|s| matches!(s, PatternShape::Dot { .. }))
			.count()
	}

	// ========================================================================
	// Variants
	// ========================================================================

	#[test]
	fn lines_cover_both_axes() {
		let shapes = pattern_for(
			BackgroundVariant::Lines,
			&Viewport::default(),
			100.0,
			100.0,
			25.0,
		);
		assert!(shapes.contains(&PatternShape::Segment {
			x1: 25.0,
			y1: 0.0,
			x2: 25.0,
			y2: 100.0,
		}));
		assert!(shapes.contains(&PatternShape::Segment {
			x1: 0.0,
			y1: 50.0,
			x2: 100.0,
			y2: 50.0,
		}));
		assert_eq!(count_dots(&shapes), 0);
	}

	#[test]
	fn dots_only_produce_dots() {
		let shapes = pattern_for(
			BackgroundVariant::Dots,
			&Viewport::default(),
			100.0,
			100.0,
			20.0,
		);
		assert!(!shapes.is_empty());
		assert_eq!(count_dots(&shapes), shapes.len());
	}

	#[test]
	fn cross_draws_two_arms_per_lattice_point() {
		let shapes = pattern_for(
			BackgroundVariant::Cross,
			&Viewport::default(),
			40.0,
			40.0,
			20.0,
		);
		// lattice points at 0, 20, 40 on each axis
		assert_eq!(shapes.len(), 3 * 3 * 2);
		assert!(shapes.contains(&PatternShape::Segment {
			x1: 17.0,
			y1: 20.0,
			x2: 23.0,
			y2: 20.0,
		}));
	}

	// ========================================================================
	// Viewport
	// ========================================================================

	#[test]
	fn zoom_widens_spacing() {
		let vp = |zoom| Viewport {
			x: 0.0,
			y: 0.0,
			zoom,
		};
		let near = pattern_for(BackgroundVariant::Dots, &vp(2.0), 200.0, 200.0, 20.0);
		let far = pattern_for(BackgroundVariant::Dots, &vp(1.0), 200.0, 200.0, 20.0);
		assert!(near.len() < far.len());
	}

	#[test]
	fn tiny_spacing_renders_nothing() {
		let vp = Viewport {
			x: 0.0,
			y: 0.0,
			zoom: 0.1,
		};
		assert!(pattern_for(BackgroundVariant::Lines, &vp, 100.0, 100.0, 20.0).is_empty());
	}

	#[test]
	fn pan_by_whole_step_is_invisible() {
		let at = |x| Viewport { x, y: 0.0, zoom: 1.0 };
		let a = pattern_for(BackgroundVariant::Cross, &at(0.0), 100.0, 100.0, 20.0);
		let b = pattern_for(BackgroundVariant::Cross, &at(40.0), 100.0, 100.0, 20.0);
		assert_eq!(a, b);
	}

	#[test]
	fn negative_pan_wraps() {
		let vp = Viewport {
			x: -5.0,
			y: -5.0,
			zoom: 1.0,
		};
		let shapes = pattern_for(BackgroundVariant::Dots, &vp, 100.0, 100.0, 20.0);
		assert!(shapes.contains(&PatternShape::Dot {
			x: 15.0,
			y: 15.0,
			radius: 0.5,
		}));
	}
}
