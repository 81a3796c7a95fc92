// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cut-out mask for the dim layer.
//!
//! The mask is the view rectangle plus the hole outline in a single path,
//! filled with the even-odd rule so the hole is subtracted from the fill.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_spotlight::config::TargetShape;
//! use understory_spotlight::mask::build_mask;
//!
//! let bounds = Rect::new(0.0, 0.0, 400.0, 800.0);
//! let mask = build_mask(bounds, Point::new(200.0, 100.0), TargetShape::Circle, Size::new(88.0, 88.0));
//!
//! // Inside the hole: even winding, not painted.
//! assert!(!mask.covers(Point::new(200.0, 100.0)));
//! // Elsewhere: painted.
//! assert!(mask.covers(Point::new(200.0, 600.0)));
//! ```

use kurbo::{BezPath, Circle, Point, Rect, Shape, Size};
use peniko::Fill;

use crate::config::TargetShape;

/// Flattening tolerance used when converting shapes to path elements.
pub const MASK_TOLERANCE: f64 = 0.1;

/// A path and the fill rule it must be rendered with.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundMask {
    /// Outer rectangle followed by the hole outline, if any.
    pub path: BezPath,
    /// Always [`Fill::EvenOdd`].
    pub fill_rule: Fill,
}

impl BackgroundMask {
    /// Whether the dim layer is painted at `point` under the even-odd rule.
    pub fn covers(&self, point: Point) -> bool {
        self.path.winding(point).rem_euclid(2) == 1
    }
}

/// Builds the cut-out mask for a view of `bounds` with a `hole` sized hole
/// centered at `center`.
///
/// - [`TargetShape::Circle`]: circle of radius `hole.width / 2`.
/// - [`TargetShape::Rectangle`]: axis-aligned rectangle of size `hole`.
/// - [`TargetShape::None`]: no hole at all.
pub fn build_mask(bounds: Rect, center: Point, shape: TargetShape, hole: Size) -> BackgroundMask {
    let mut path = bounds.to_path(MASK_TOLERANCE);
    match shape {
        TargetShape::Circle => {
            let circle = Circle::new(center, hole.width * 0.5);
            path.extend(circle.path_elements(MASK_TOLERANCE));
        }
        TargetShape::Rectangle => {
            let rect = Rect::from_center_size(center, hole);
            path.extend(rect.path_elements(MASK_TOLERANCE));
        }
        TargetShape::None => {}
    }
    BackgroundMask {
        path,
        fill_rule: Fill::EvenOdd,
    }
}
