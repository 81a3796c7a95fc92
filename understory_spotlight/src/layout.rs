// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout engine: from target geometry and configuration to a scene.
//!
//! Layout runs in two steps. [`overlay_geometry`] derives the transient
//! [`OverlayGeometry`] (center, classification, part bounds, panel frame);
//! [`layout_overlay`] builds the [`OverlayScene`] in its pre-come-in state
//! from it. Both are pure and are rerun on every show and resize.

use kurbo::{Insets, Point, Rect, Size};
use peniko::Color;

use crate::config::{DEFAULT_HOLDER_RADIUS, LayoutMode, ShowcaseConfig, TapTarget, TargetShape};
use crate::geometry::{self, TargetPosition};
use crate::host::{SurfaceMetrics, TextMeasurer};
use crate::mask::build_mask;
use crate::panel::{PanelInput, layout_panel, panel_frame};
use crate::scene::{BackgroundPart, OverlayScene, PartClip, PartVisual, TargetCopy};

/// Ripple and holder size when there is no target.
pub const DEFAULT_RIPPLE_SIZE: Size = Size::new(88.0, 88.0);

/// Everything layout depends on.
#[derive(Copy, Clone, Debug)]
pub struct LayoutInput<'a> {
    /// Normalized configuration.
    pub config: &'a ShowcaseConfig,
    /// Fresh metrics of the surface.
    pub metrics: SurfaceMetrics,
    /// Target bounds in surface coordinates.
    pub target: Option<Rect>,
    /// Effective holder radius.
    pub holder_radius: f64,
    /// Effective dim color, before the prompt alpha applies.
    pub background_color: Color,
}

/// Geometry derived from one layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayGeometry {
    /// Rectangle the overlay covers.
    pub container: Rect,
    /// Insets honored inside `container`.
    pub safe_area: Insets,
    /// Screen rectangle.
    pub screen: Rect,
    /// Target center, or the container center without a target.
    pub center: Point,
    /// Classification of `center` within the container.
    pub target_position: TargetPosition,
    /// Target bounds; an empty rectangle at `center` without a target.
    pub target: Rect,
    /// Ripple bounds, centered at `center`.
    pub ripple_bounds: Rect,
    /// Holder bounds, same as the ripple's.
    pub holder_bounds: Rect,
    /// Instruction panel frame.
    pub panel_frame: Rect,
    /// Holder radius used for the pass.
    pub holder_radius: f64,
}

impl OverlayGeometry {
    /// Radius of a circle around the target that also encloses `text_bounds`.
    pub fn outer_radius(&self, text_bounds: Rect) -> f64 {
        geometry::outer_circle_radius(self.center, text_bounds, self.target, self.holder_radius)
    }
}

/// Computes the geometry for one layout pass.
pub fn overlay_geometry(input: &LayoutInput<'_>) -> OverlayGeometry {
    let (container, safe_area) = match input.config.layout_mode {
        LayoutMode::SafeArea => (input.metrics.bounds, input.metrics.safe_area),
        LayoutMode::Screen => (input.metrics.screen, Insets::ZERO),
    };
    let center = input
        .target
        .map_or_else(|| container.center(), geometry::center);
    let target = input
        .target
        .unwrap_or_else(|| Rect::from_center_size(center, Size::ZERO));
    let target_position = TargetPosition::classify(center.y - container.y0, container.height());

    let radius = input.holder_radius;
    let ripple_size = match input.target {
        Some(t) => Size::new(t.width() + radius, t.height() + radius),
        None => DEFAULT_RIPPLE_SIZE,
    };
    let ripple_bounds = Rect::from_center_size(center, ripple_size);

    let panel_frame = panel_frame(&PanelInput {
        container,
        safe_area,
        screen: input.metrics.screen,
        shape: input.config.target_shape,
        position: target_position,
        target,
        holder_radius: radius,
    });

    OverlayGeometry {
        container,
        safe_area,
        screen: input.metrics.screen,
        center,
        target_position,
        target,
        ripple_bounds,
        holder_bounds: ripple_bounds,
        panel_frame,
        holder_radius: radius,
    }
}

/// Builds the scene in its pre-come-in state.
///
/// The holder starts at the configured initial scale, the ripple invisible,
/// the dim layer shrunk around the holder so that come-in grows it out to
/// the container, and the overlay fully transparent.
pub fn layout_overlay<N, M: TextMeasurer + ?Sized>(
    input: &LayoutInput<'_>,
    geometry: &OverlayGeometry,
    copy: Option<N>,
    measurer: &M,
) -> OverlayScene<N> {
    let config = input.config;
    let clip = match config.target_shape {
        TargetShape::Circle => PartClip::Circle,
        TargetShape::Rectangle | TargetShape::None => PartClip::None,
    };
    let part_size = geometry.ripple_bounds.size();
    let center = geometry.center;

    let mut ripple = PartVisual::new(part_size, center, config.animation.ripple_color, clip);
    ripple.alpha = 0.0;
    ripple.hidden = config.target_shape == TargetShape::None;

    let mut holder = PartVisual::new(part_size, center, config.target_holder_color, clip);
    holder.scale = config.animation.holder_initial_scale;

    let container = geometry.container;
    let local_bounds = Rect::from_origin_size(Point::ZERO, container.size());
    let local_center = center - container.origin().to_vec2();
    let mask = build_mask(local_bounds, local_center, config.target_shape, part_size);
    let alpha = config.background_prompt_alpha;
    let dim = input.background_color.with_alpha(alpha);
    let mut background = PartVisual::new(container.size(), center, dim, PartClip::None);
    let half_width = container.width() / 2.0;
    if half_width > 0.0 {
        background.scale = DEFAULT_HOLDER_RADIUS / half_width;
    }

    let target_copy = copy.map(|node| TargetCopy {
        node,
        frame: Rect::from_center_size(center, geometry.target.size()),
        interactive: config.tap_target == TapTarget::Target,
    });

    let panel = layout_panel(
        config,
        &PanelInput {
            container,
            safe_area: geometry.safe_area,
            screen: geometry.screen,
            shape: config.target_shape,
            position: geometry.target_position,
            target: geometry.target,
            holder_radius: geometry.holder_radius,
        },
        measurer,
    );

    OverlayScene {
        bounds: container,
        alpha: 0.0,
        background: BackgroundPart {
            visual: background,
            mask,
        },
        ripple,
        holder,
        target_copy,
        panel,
        tap_catcher: (config.tap_target == TapTarget::All).then_some(container),
    }
}
