// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay scene handed to hosts.
//!
//! A scene is plain data: four animatable parts, the detached target copy,
//! the instruction panel, and an optional full-surface tap catcher. All
//! geometry is in the coordinate space of the surface the overlay attaches to.
//!
//! Back to front, a host stacks the parts as: tap catcher, background (with
//! its mask), ripple, holder, target copy, panel.

use kurbo::{Point, Rect, Size};
use peniko::Color;

use crate::animation::{Change, PartKind, Property};
use crate::mask::BackgroundMask;
use crate::panel::PanelLayout;

/// Clip applied to a part.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PartClip {
    /// Unclipped rectangle.
    #[default]
    None,
    /// Clipped to the ellipse inscribed in the part's frame.
    Circle,
}

/// Visual state of one animatable part.
///
/// `scale` applies around `center`; `frame` is the unscaled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct PartVisual {
    /// Unscaled size.
    pub size: Size,
    /// Center point.
    pub center: Point,
    /// Uniform scale around `center`.
    pub scale: f64,
    /// Opacity in `0..=1`.
    pub alpha: f64,
    /// Fill color.
    pub color: Color,
    /// Clip shape.
    pub clip: PartClip,
    /// Whether the part is left out of rendering.
    pub hidden: bool,
}

impl PartVisual {
    /// A visible, unscaled, opaque part.
    pub fn new(size: Size, center: Point, color: Color, clip: PartClip) -> Self {
        Self {
            size,
            center,
            scale: 1.0,
            alpha: 1.0,
            color,
            clip,
            hidden: false,
        }
    }

    /// Unscaled frame.
    pub fn frame(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    /// Frame with `scale` applied.
    pub fn scaled_frame(&self) -> Rect {
        Rect::from_center_size(self.center, self.size * self.scale)
    }
}

/// The target's detached copy, placed over the target.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetCopy<N> {
    /// Host visual copy.
    pub node: N,
    /// Where the copy sits.
    pub frame: Rect,
    /// Whether taps on the copy dismiss the showcase.
    pub interactive: bool,
}

/// The dim layer.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundPart {
    /// Animatable state.
    pub visual: PartVisual,
    /// Cut-out mask, relative to the top-left of the unscaled frame.
    pub mask: BackgroundMask,
}

/// What a tap landed on. See [`OverlayScene::hit_test`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// The next action.
    Next,
    /// The skip action.
    Skip,
    /// An interactive panel outside both actions.
    Panel,
    /// The interactive target copy.
    TargetCopy,
    /// The full-surface tap catcher.
    TapCatcher,
}

/// Everything a host needs to render the showcase.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayScene<N> {
    /// Rectangle the overlay covers.
    pub bounds: Rect,
    /// Opacity of the whole overlay.
    pub alpha: f64,
    /// Dim layer.
    pub background: BackgroundPart,
    /// Pulsing ring.
    pub ripple: PartVisual,
    /// Solid disc or square behind the target copy.
    pub holder: PartVisual,
    /// Copy of the target, absent when the holder is transparent.
    pub target_copy: Option<TargetCopy<N>>,
    /// Instruction panel.
    pub panel: PanelLayout,
    /// Tap catcher rectangle, present only when any tap dismisses.
    pub tap_catcher: Option<Rect>,
}

impl<N> OverlayScene<N> {
    /// The part a change applies to. `None` for the overlay itself.
    fn part_mut(&mut self, part: PartKind) -> Option<&mut PartVisual> {
        match part {
            PartKind::Overlay => None,
            PartKind::Background => Some(&mut self.background.visual),
            PartKind::Ripple => Some(&mut self.ripple),
            PartKind::Holder => Some(&mut self.holder),
        }
    }

    /// Sets one property to its target value.
    pub fn apply(&mut self, change: &Change) {
        match (self.part_mut(change.part), change.property) {
            (Some(visual), Property::Scale(s)) => visual.scale = s,
            (Some(visual), Property::Alpha(a)) => visual.alpha = a,
            (Some(visual), Property::Center(c)) => visual.center = c,
            (None, Property::Alpha(a)) => self.alpha = a,
            // The overlay itself is neither moved nor scaled.
            (None, Property::Scale(_) | Property::Center(_)) => {}
        }
    }

    /// Applies every change in order.
    pub fn apply_all<'a>(&mut self, changes: impl IntoIterator<Item = &'a Change>) {
        for change in changes {
            self.apply(change);
        }
    }

    /// Finds what a tap at `point` lands on, front to back.
    ///
    /// The next/skip actions come first, then the interactive target copy,
    /// which stays reachable when the panel spans the whole safe area. Any
    /// other tap inside the panel never falls through to the parts behind it:
    /// an inert panel swallows it and yields `None`.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        let panel = &self.panel;
        let in_panel = panel.frame.contains(point);
        if in_panel && panel.interactive {
            if panel.next.interactive && panel.to_surface(panel.next.frame).contains(point) {
                return Some(HitTarget::Next);
            }
            if panel.skip.interactive && panel.to_surface(panel.skip.frame).contains(point) {
                return Some(HitTarget::Skip);
            }
        }
        if let Some(copy) = &self.target_copy
            && copy.interactive
            && copy.frame.contains(point)
        {
            return Some(HitTarget::TargetCopy);
        }
        if in_panel {
            return panel.interactive.then_some(HitTarget::Panel);
        }
        match self.tap_catcher {
            Some(catcher) if catcher.contains(point) => Some(HitTarget::TapCatcher),
            _ => None,
        }
    }
}
