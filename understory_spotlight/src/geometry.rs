// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure geometry helpers: centers, distances, and enclosing radii.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_spotlight::geometry::{max_corner_distance, TargetPosition};
//!
//! let rect = Rect::new(0.0, 0.0, 30.0, 40.0);
//! assert_eq!(max_corner_distance(Point::ZERO, rect), 50.0);
//!
//! // A target in the upper half of an 800pt tall container.
//! assert_eq!(TargetPosition::classify(120.0, 800.0), TargetPosition::Above);
//! assert_eq!(TargetPosition::classify(400.0, 800.0), TargetPosition::Below);
//! ```

use kurbo::{Point, Rect};

/// Fixed margin added around the radius computed by [`outer_circle_radius`].
pub const OUTER_CIRCLE_MARGIN: f64 = 40.0;

/// Factor applied to the holder radius when inflating the target bounds in
/// [`outer_circle_radius`].
pub const TARGET_EXPANSION_FACTOR: f64 = 1.1;

/// Returns the midpoint of `rect`.
#[inline]
pub fn center(rect: Rect) -> Point {
    rect.center()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Largest distance from `point` to any of the four corners of `rect`.
///
/// The result is the radius of the smallest circle centered at `point` that
/// covers the whole rectangle, wherever `point` sits relative to it.
pub fn max_corner_distance(point: Point, rect: Rect) -> f64 {
    [
        Point::new(rect.min_x(), rect.min_y()),
        Point::new(rect.max_x(), rect.min_y()),
        Point::new(rect.min_x(), rect.max_y()),
        Point::new(rect.max_x(), rect.max_y()),
    ]
    .into_iter()
    .map(|corner| distance(point, corner))
    .fold(0.0, f64::max)
}

/// Radius of a circle centered at `center` that encloses both the text block
/// and the target inflated by `1.1 * holder_radius`, plus a fixed margin.
pub fn outer_circle_radius(
    center: Point,
    text_bounds: Rect,
    target_bounds: Rect,
    holder_radius: f64,
) -> f64 {
    let expansion = TARGET_EXPANSION_FACTOR * holder_radius;
    let expanded = target_bounds.inflate(expansion, expansion);
    let text_radius = max_corner_distance(center, text_bounds);
    let target_radius = max_corner_distance(center, expanded);
    text_radius.max(target_radius) + OUTER_CIRCLE_MARGIN
}

/// Vertical placement of the target relative to its container.
///
/// Drives where the instruction panel goes: below an [`Above`](Self::Above)
/// target, above a [`Below`](Self::Below) one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetPosition {
    /// The target's center is in the upper half of the container.
    Above,
    /// The target's center is on or below the container's horizontal midline.
    Below,
}

impl TargetPosition {
    /// Classifies a vertical center against a container height.
    ///
    /// The midline itself counts as [`Below`](Self::Below).
    pub fn classify(center_y: f64, container_height: f64) -> Self {
        if center_y < container_height / 2.0 {
            Self::Above
        } else {
            Self::Below
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_is_never_closer_than_center() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(-50.0, 20.0, 80.0, 25.0),
            Rect::new(100.0, 100.0, 100.0, 100.0),
        ];
        let points = [
            Point::ZERO,
            Point::new(5.0, 5.0),
            Point::new(-300.0, 42.0),
            Point::new(1e4, -1e4),
        ];
        for rect in rects {
            for p in points {
                assert!(
                    max_corner_distance(p, rect) >= distance(p, center(rect)),
                    "corner closer than center for {p:?} / {rect:?}"
                );
            }
        }
    }

    #[test]
    fn max_corner_distance_picks_far_corner() {
        let rect = Rect::new(10.0, 10.0, 40.0, 50.0);
        // Far corner from the origin is (40, 50).
        let expected = Point::ZERO.distance(Point::new(40.0, 50.0));
        assert_eq!(max_corner_distance(Point::ZERO, rect), expected);
    }

    #[test]
    fn outer_radius_includes_margin() {
        let zero = Rect::from_center_size(Point::ZERO, (0.0, 0.0));
        assert_eq!(outer_circle_radius(Point::ZERO, zero, zero, 0.0), 40.0);
    }

    #[test]
    fn outer_radius_is_monotonic_in_holder_radius() {
        let c = Point::new(100.0, 100.0);
        let text = Rect::new(20.0, 300.0, 200.0, 360.0);
        let target = Rect::new(80.0, 80.0, 120.0, 120.0);
        let mut last = 0.0;
        for r in [0.0, 10.0, 44.0, 100.0, 400.0] {
            let radius = outer_circle_radius(c, text, target, r);
            assert!(radius >= last, "radius shrank at holder radius {r}");
            last = radius;
        }
    }

    #[test]
    fn outer_radius_is_monotonic_in_rect_sizes() {
        let c = Point::new(100.0, 100.0);
        let mut last = 0.0;
        for grow in [0.0, 5.0, 50.0, 500.0] {
            let text = Rect::new(20.0, 300.0, 200.0, 360.0).inflate(grow, grow);
            let target = Rect::new(80.0, 80.0, 120.0, 120.0).inflate(grow, grow);
            let radius = outer_circle_radius(c, text, target, 44.0);
            assert!(radius >= last, "radius shrank when rects grew by {grow}");
            last = radius;
        }
    }

    #[test]
    fn midline_is_below() {
        use TargetPosition::{Above, Below};

        assert_eq!(TargetPosition::classify(399.9, 800.0), Above);
        assert_eq!(TargetPosition::classify(400.0, 800.0), Below);
        assert_eq!(TargetPosition::classify(700.0, 800.0), Below);
    }
}
