// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instruction panel layout: where the panel goes and how its four text
//! blocks are stacked inside it.
//!
//! ## Placement
//!
//! - [`TargetShape::None`]: the whole safe area.
//! - Target [`Above`](TargetPosition::Above): from just under the target plus
//!   the holder radius, down to the bottom inset.
//! - Target [`Below`](TargetPosition::Below): from the top inset down to the
//!   target's top edge.
//!
//! The panel always spans the safe content width.
//!
//! ## Contents
//!
//! Panel-local frames: the primary label at the top (unlimited lines), the
//! secondary label right under it (3 lines max), and the next/skip actions
//! pinned to the bottom-right/bottom-left corners with the label margin on
//! every side of their text.

use alloc::string::String;

use kurbo::{Insets, Point, Rect, Size};
use peniko::Color;

use crate::config::{FontDesc, ShowcaseConfig, TargetShape, TextAlignment};
use crate::geometry::TargetPosition;
use crate::host::{TextMeasurer, TextRequest};

/// Line limit for the secondary label.
pub const SECONDARY_MAX_LINES: u32 = 3;

/// Line limit for the next/skip action labels.
pub const ACTION_MAX_LINES: u32 = 3;

/// A laid-out text block.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelLayout {
    /// Frame in panel-local coordinates.
    pub frame: Rect,
    /// Text content.
    pub text: String,
    /// Font.
    pub font: FontDesc,
    /// Text color.
    pub color: Color,
    /// Alignment inside `frame`.
    pub alignment: TextAlignment,
    /// Line limit; `None` is unlimited.
    pub max_lines: Option<u32>,
}

/// A tappable next/skip action.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionLayout {
    /// Text block; its frame is the text rect without padding.
    pub label: LabelLayout,
    /// Padded tap area in panel-local coordinates.
    pub frame: Rect,
    /// Whether the action responds to taps. False when its text is empty.
    pub interactive: bool,
}

/// The instruction panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelLayout {
    /// Panel frame in surface coordinates.
    pub frame: Rect,
    /// Title.
    pub primary: LabelLayout,
    /// Description.
    pub secondary: LabelLayout,
    /// Next action, bottom-right.
    pub next: ActionLayout,
    /// Skip action, bottom-left.
    pub skip: ActionLayout,
    /// Whether the panel takes taps at all. False when both actions are empty.
    pub interactive: bool,
}

impl PanelLayout {
    /// Converts a panel-local rectangle to surface coordinates.
    pub fn to_surface(&self, local: Rect) -> Rect {
        local + self.frame.origin().to_vec2()
    }
}

/// Inputs for [`panel_frame`] and [`layout_panel`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelInput {
    /// Rectangle the overlay covers, in surface coordinates.
    pub container: Rect,
    /// Safe area insets of `container`.
    pub safe_area: Insets,
    /// Screen rectangle in surface coordinates.
    pub screen: Rect,
    /// Cut-out shape.
    pub shape: TargetShape,
    /// Target classification.
    pub position: TargetPosition,
    /// Target bounds in surface coordinates.
    pub target: Rect,
    /// Effective holder radius.
    pub holder_radius: f64,
}

/// Computes the panel frame in surface coordinates.
pub fn panel_frame(input: &PanelInput) -> Rect {
    let c = input.container;
    let insets = input.safe_area;
    let x = c.x0 + insets.x0;
    let width = (c.width() - insets.x0 - insets.x1).max(0.0);
    let top = c.y0 + insets.y0;
    let bottom = c.y1 - insets.y1;

    let (y, height) = match (input.shape, input.position) {
        (TargetShape::None, _) => (top, c.height() - insets.y0 - insets.y1),
        (_, TargetPosition::Above) => {
            let y = input.target.max_y() + input.holder_radius;
            (y, bottom - y)
        }
        (_, TargetPosition::Below) => (top, input.target.min_y() - top),
    };
    Rect::from_origin_size(Point::new(x, y), Size::new(width, height.max(0.0)))
}

/// Width the primary and secondary labels wrap at.
///
/// A panel inset from the overlay's left edge loses half of that inset when
/// the overlay starts on screen; when the overlay spills past the screen's
/// right edge, the remaining width is halved so the text stays visible.
pub fn wrap_width(panel: Rect, container: Rect, screen: Rect) -> f64 {
    let min_x = panel.x0 - container.x0;
    let width = if container.x0 >= screen.x0 {
        panel.width() - min_x / 2.0
    } else if container.x1 > screen.x1 {
        (panel.width() - min_x) / 2.0
    } else {
        panel.width() - min_x
    };
    width.max(0.0)
}

/// Lays out the panel and its text blocks.
pub fn layout_panel<M: TextMeasurer + ?Sized>(
    config: &ShowcaseConfig,
    input: &PanelInput,
    measurer: &M,
) -> PanelLayout {
    let frame = panel_frame(input);
    let wrap = wrap_width(frame, input.container, input.screen);

    let primary = stacked_label(
        measurer,
        &config.primary_text,
        config.primary_font(),
        config.primary_text_color,
        config.primary_text_alignment,
        None,
        wrap,
        0.0,
    );
    let secondary = stacked_label(
        measurer,
        &config.secondary_text,
        config.secondary_font(),
        config.secondary_text_color,
        config.secondary_text_alignment,
        Some(SECONDARY_MAX_LINES),
        wrap,
        primary.frame.max_y(),
    );

    let margin = config.label_margin;
    let (width, height) = (frame.width(), frame.height());
    let next = action(
        measurer,
        &config.next_text,
        config.next_font(),
        config.next_text_color,
        margin,
        |padded| Point::new(width - padded.width, height - padded.height),
    );
    let skip = action(
        measurer,
        &config.skip_text,
        config.skip_font(),
        config.skip_text_color,
        margin,
        |padded| Point::new(0.0, height - padded.height),
    );
    let interactive = next.interactive || skip.interactive;

    PanelLayout {
        frame,
        primary,
        secondary,
        next,
        skip,
        interactive,
    }
}

fn stacked_label<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    font: FontDesc,
    color: Color,
    alignment: TextAlignment,
    max_lines: Option<u32>,
    wrap: f64,
    y: f64,
) -> LabelLayout {
    let height = measurer
        .measure(&TextRequest {
            text,
            font: &font,
            max_width: Some(wrap),
            max_lines,
        })
        .height;
    LabelLayout {
        frame: Rect::new(0.0, y, wrap, y + height),
        text: String::from(text),
        font,
        color,
        alignment,
        max_lines,
    }
}

fn action<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    font: FontDesc,
    color: Color,
    margin: f64,
    place: impl FnOnce(Size) -> Point,
) -> ActionLayout {
    let text_size = measurer.measure(&TextRequest {
        text,
        font: &font,
        max_width: None,
        max_lines: Some(ACTION_MAX_LINES),
    });
    let pad = 2.0 * margin;
    let padded = Size::new(text_size.width + pad, text_size.height + pad);
    let frame = Rect::from_origin_size(place(padded), padded);
    let text_frame = Rect::new(
        frame.x0 + margin,
        frame.y0 + margin,
        frame.x1 - margin,
        frame.y1 - margin,
    );
    ActionLayout {
        label: LabelLayout {
            frame: text_frame,
            text: String::from(text),
            font,
            color,
            alignment: TextAlignment::Center,
            max_lines: Some(ACTION_MAX_LINES),
        },
        frame,
        interactive: !text.is_empty(),
    }
}
