// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborator traits.
//!
//! The showcase never owns a view hierarchy. Hosts expose their elements and
//! surfaces through [`ElementHost`], take finished scenes through
//! [`OverlayHost`], measure text through [`TextMeasurer`], and run animations
//! through [`TweenDriver`](crate::animation::TweenDriver).
//!
//! All calls happen on the host's UI thread; nothing here is `Send`.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Insets, Rect, Size};
use peniko::Color;

use crate::color::StatusBarStyle;
use crate::config::FontDesc;
use crate::scene::OverlayScene;
use crate::tint::VisualNode;

/// Geometry of the surface an overlay attaches to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceMetrics {
    /// Surface bounds in its own coordinate space.
    pub bounds: Rect,
    /// Reserved edge margins (notches, status bars).
    pub safe_area: Insets,
    /// Full screen rectangle, in the same space as `bounds`.
    pub screen: Rect,
}

impl SurfaceMetrics {
    /// Metrics for a surface with no safe area that fills the screen.
    pub fn full_screen(bounds: Rect) -> Self {
        Self {
            bounds,
            safe_area: Insets::ZERO,
            screen: bounds,
        }
    }
}

/// Read access to the host's element tree.
///
/// Elements are cheap handles (ids, reference-counted pointers). A surface is
/// the top-level element an overlay can attach to, such as a window.
pub trait ElementHost {
    /// Handle to an element or surface.
    type Element: Clone + PartialEq + Debug;

    /// Returns the attachable surface `element` currently belongs to, or
    /// `None` if it is not attached to any.
    fn surface_of(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Surface used for showcases without a target.
    fn key_surface(&self) -> Option<Self::Element> {
        None
    }

    /// Metrics of a surface returned by [`surface_of`](Self::surface_of).
    fn surface_metrics(&self, surface: &Self::Element) -> SurfaceMetrics;

    /// Bounds of `element` expressed in the coordinate space of `ancestor`.
    fn bounds_in(&self, element: &Self::Element, ancestor: &Self::Element) -> Rect;

    /// Frame of `element` in its parent's coordinate space.
    fn frame(&self, element: &Self::Element) -> Rect;

    /// Direct children in back-to-front order.
    fn children(&self, element: &Self::Element) -> Vec<Self::Element>;

    /// Whether the element accepts user interaction.
    fn is_interactive(&self, element: &Self::Element) -> bool;

    /// The element's inherited tint color.
    fn tint_color(&self, element: &Self::Element) -> Option<Color>;

    /// Text color, if the element is a label.
    fn text_color(&self, _element: &Self::Element) -> Option<Color> {
        None
    }

    /// Title color in the normal state, if the element is a button.
    fn title_color(&self, _element: &Self::Element) -> Option<Color> {
        None
    }

    /// Content element of the cell at `section`/`row`, if that cell is loaded.
    fn table_cell_content(
        &self,
        _table: &Self::Element,
        _section: usize,
        _row: usize,
    ) -> Option<Self::Element> {
        None
    }

    /// Backing element of a bar button item, if the item has been realized.
    fn bar_item_view(&self, _item: &Self::Element) -> Option<Self::Element> {
        None
    }
}

/// Rendering side of the host: snapshots, attaching scenes, status bar.
pub trait OverlayHost: ElementHost {
    /// Detached visual copy of an element.
    type Snapshot: VisualNode + Clone + Debug;

    /// Captures a detached copy of `element` that can be moved and recolored
    /// without touching the live element.
    fn snapshot(&mut self, element: &Self::Element) -> Option<Self::Snapshot>;

    /// Attaches `scene` on top of `surface`, or replaces what this overlay
    /// previously attached there.
    fn present(&mut self, surface: &Self::Element, scene: &OverlayScene<Self::Snapshot>);

    /// Detaches every overlay part from `surface`.
    fn detach(&mut self, surface: &Self::Element);

    /// Current status bar style.
    fn status_bar_style(&self) -> StatusBarStyle {
        StatusBarStyle::Default
    }

    /// Requests a status bar style.
    fn set_status_bar_style(&mut self, _style: StatusBarStyle, _animated: bool) {}
}

/// A text block to measure.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRequest<'a> {
    /// Text content.
    pub text: &'a str,
    /// Font.
    pub font: &'a FontDesc,
    /// Wrap width; `None` lays the text out on unconstrained lines.
    pub max_width: Option<f64>,
    /// Line limit; `None` allows any number of lines.
    pub max_lines: Option<u32>,
}

/// Text measurement service.
pub trait TextMeasurer {
    /// Size the text block needs. Height is what matters when `max_width` is
    /// set; width is meaningful when it is not.
    fn measure(&self, request: &TextRequest<'_>) -> Size;
}
