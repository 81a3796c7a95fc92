// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Showcase configuration: colors, sizes, text, fonts and animation timing.
//!
//! [`ShowcaseConfig::default`] is the one shared default set; every
//! controller copies it and callers adjust their copy through the `with_*`
//! methods or the public fields.
//!
//! ```
//! use understory_spotlight::config::{ShowcaseConfig, TapTarget, TargetShape};
//!
//! let config = ShowcaseConfig::default()
//!     .with_primary_text("Compose")
//!     .with_secondary_text("Start a new message from here")
//!     .with_shape(TargetShape::Rectangle)
//!     .with_tap_target(TapTarget::All);
//!
//! assert_eq!(config.target_holder_radius, 44.0);
//! assert!(config.validate().is_ok());
//! ```

use alloc::string::String;
use core::fmt;

use peniko::Color;

/// Shape of the cut-out, ripple, and holder around the target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetShape {
    /// Circular hole; ripple and holder are clipped to circles.
    #[default]
    Circle,
    /// Rectangular hole the size of the ripple.
    Rectangle,
    /// No hole; the dim layer covers everything and the ripple is hidden.
    None,
}

/// Which taps dismiss the showcase, besides the next/skip actions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TapTarget {
    /// A tap anywhere on the overlay dismisses it.
    All,
    /// Only a tap on the target copy dismisses it.
    Target,
    /// Only the next/skip actions dismiss it.
    #[default]
    None,
}

/// Horizontal text alignment for the primary and secondary labels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    /// Leading edge, following the script direction.
    #[default]
    Natural,
    /// Left edge.
    Left,
    /// Centered.
    Center,
    /// Right edge.
    Right,
    /// Justified.
    Justified,
}

/// Font weight requested from the text measurer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Regular,
    /// Bold weight.
    Bold,
}

/// A font as understood by the host's text measurer.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDesc {
    /// Font family name; `None` selects the host's system font.
    pub family: Option<String>,
    /// Point size.
    pub size: f64,
    /// Weight.
    pub weight: FontWeight,
}

impl FontDesc {
    /// The host's regular system font at `size`.
    pub const fn system(size: f64) -> Self {
        Self {
            family: None,
            size,
            weight: FontWeight::Regular,
        }
    }

    /// The host's bold system font at `size`.
    pub const fn bold_system(size: f64) -> Self {
        Self {
            family: None,
            size,
            weight: FontWeight::Bold,
        }
    }
}

/// Which rectangle the overlay is laid out against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Track the container surface and keep content inside its safe area.
    #[default]
    SafeArea,
    /// Legacy behavior: lay out against the full screen rectangle and ignore
    /// safe area insets.
    Screen,
}

/// Timing and scale parameters for the come-in, pulse, and go-out phases.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Come-in duration in seconds.
    pub come_in_duration: f64,
    /// Go-out duration in seconds.
    pub go_out_duration: f64,
    /// Scale the holder starts from during come-in.
    pub holder_initial_scale: f64,
    /// Ripple fill color.
    pub ripple_color: Color,
    /// Peak ripple opacity during a pulse.
    pub ripple_alpha: f64,
    /// Ripple scale at the start of each pulse.
    pub ripple_start_scale: f64,
    /// Duration of the growing half of a pulse, in seconds.
    pub ripple_start_duration: f64,
    /// Ripple and holder scale at the peak of a pulse.
    pub ripple_end_scale: f64,
    /// Duration of the shrinking half of a pulse, in seconds.
    pub ripple_end_duration: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            come_in_duration: 0.5,
            go_out_duration: 0.5,
            holder_initial_scale: 1.0 / 2.2,
            ripple_color: Color::WHITE,
            ripple_alpha: DEFAULT_RIPPLE_ALPHA,
            ripple_start_scale: 1.1,
            ripple_start_duration: 0.5,
            ripple_end_scale: 1.6,
            ripple_end_duration: 0.5,
        }
    }
}

impl AnimationConfig {
    /// Length of one pulse cycle in seconds.
    pub fn pulse_period(&self) -> f64 {
        self.ripple_start_duration + self.ripple_end_duration
    }
}

/// Default background prompt and target tint: Material blue `#2196F3`.
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::from_rgba8(0x21, 0x96, 0xF3, 0xFF);

/// Default holder radius, also the reference radius the background grows from.
pub const DEFAULT_HOLDER_RADIUS: f64 = 44.0;

const DEFAULT_RIPPLE_ALPHA: f64 = 0.5;
const DEFAULT_PROMPT_ALPHA: f32 = 0.96;
const SECONDARY_TEXT_COLOR: Color = Color::from_rgba8(0xFF, 0xFF, 0xFF, 0xDE);

/// Every tunable of a showcase.
///
/// The controller takes a snapshot of this at `show` time, so changes made
/// while an overlay is visible apply to the next `show`.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowcaseConfig {
    /// Dim layer color. `None` uses the target's accent color, or
    /// [`DEFAULT_BACKGROUND_COLOR`] when the target has none.
    pub background_prompt_color: Option<Color>,
    /// Opacity applied to the dim layer color.
    pub background_prompt_alpha: f32,
    /// Cut-out shape.
    pub target_shape: TargetShape,
    /// Tap dismissal mode.
    pub tap_target: TapTarget,
    /// Recolor the target copy with [`target_tint_color`](Self::target_tint_color).
    pub should_set_tint_color: bool,
    /// Tint for the target copy. `None` uses the target's accent color, or
    /// [`DEFAULT_BACKGROUND_COLOR`] when the target has none.
    pub target_tint_color: Option<Color>,
    /// Extra size added around the target for the holder and ripple.
    pub target_holder_radius: f64,
    /// Holder fill. A fully transparent holder also suppresses the target copy.
    pub target_holder_color: Color,
    /// Padding around the next/skip actions.
    pub label_margin: f64,
    /// Title text.
    pub primary_text: String,
    /// Description text.
    pub secondary_text: String,
    /// Next action text; empty disables the action.
    pub next_text: String,
    /// Skip action text; empty disables the action.
    pub skip_text: String,
    /// Title color.
    pub primary_text_color: Color,
    /// Description color.
    pub secondary_text_color: Color,
    /// Next action color.
    pub next_text_color: Color,
    /// Skip action color.
    pub skip_text_color: Color,
    /// Title size, used when no title font is set.
    pub primary_text_size: f64,
    /// Description size, used when no description font is set.
    pub secondary_text_size: f64,
    /// Next action size, used when no next font is set.
    pub next_text_size: f64,
    /// Skip action size, used when no skip font is set.
    pub skip_text_size: f64,
    /// Title font override.
    pub primary_text_font: Option<FontDesc>,
    /// Description font override.
    pub secondary_text_font: Option<FontDesc>,
    /// Next action font override.
    pub next_text_font: Option<FontDesc>,
    /// Skip action font override.
    pub skip_text_font: Option<FontDesc>,
    /// Title alignment.
    pub primary_text_alignment: TextAlignment,
    /// Description alignment.
    pub secondary_text_alignment: TextAlignment,
    /// Animation timing.
    pub animation: AnimationConfig,
    /// Layout reference rectangle.
    pub layout_mode: LayoutMode,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            background_prompt_color: None,
            background_prompt_alpha: DEFAULT_PROMPT_ALPHA,
            target_shape: TargetShape::Circle,
            tap_target: TapTarget::None,
            should_set_tint_color: true,
            target_tint_color: None,
            target_holder_radius: DEFAULT_HOLDER_RADIUS,
            target_holder_color: Color::WHITE,
            label_margin: 20.0,
            primary_text: String::from("Awesome action"),
            secondary_text: String::from("Tap here to do some awesome thing"),
            next_text: String::from("Next"),
            skip_text: String::from("Skip"),
            primary_text_color: Color::WHITE,
            secondary_text_color: SECONDARY_TEXT_COLOR,
            next_text_color: SECONDARY_TEXT_COLOR,
            skip_text_color: SECONDARY_TEXT_COLOR,
            primary_text_size: 20.0,
            secondary_text_size: 15.0,
            next_text_size: 15.0,
            skip_text_size: 15.0,
            primary_text_font: None,
            secondary_text_font: None,
            next_text_font: None,
            skip_text_font: None,
            primary_text_alignment: TextAlignment::Natural,
            secondary_text_alignment: TextAlignment::Natural,
            animation: AnimationConfig::default(),
            layout_mode: LayoutMode::SafeArea,
        }
    }
}

impl ShowcaseConfig {
    /// Sets the title text.
    #[must_use]
    pub fn with_primary_text(mut self, text: impl Into<String>) -> Self {
        self.primary_text = text.into();
        self
    }

    /// Sets the description text.
    #[must_use]
    pub fn with_secondary_text(mut self, text: impl Into<String>) -> Self {
        self.secondary_text = text.into();
        self
    }

    /// Sets the next action text; empty disables the action.
    #[must_use]
    pub fn with_next_text(mut self, text: impl Into<String>) -> Self {
        self.next_text = text.into();
        self
    }

    /// Sets the skip action text; empty disables the action.
    #[must_use]
    pub fn with_skip_text(mut self, text: impl Into<String>) -> Self {
        self.skip_text = text.into();
        self
    }

    /// Sets the cut-out shape.
    #[must_use]
    pub fn with_shape(mut self, shape: TargetShape) -> Self {
        self.target_shape = shape;
        self
    }

    /// Sets the tap dismissal mode.
    #[must_use]
    pub fn with_tap_target(mut self, tap_target: TapTarget) -> Self {
        self.tap_target = tap_target;
        self
    }

    /// Overrides the dim layer color.
    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_prompt_color = Some(color);
        self
    }

    /// Overrides the target copy tint.
    #[must_use]
    pub fn with_tint_color(mut self, color: Color) -> Self {
        self.target_tint_color = Some(color);
        self
    }

    /// Sets the holder fill color.
    #[must_use]
    pub fn with_holder_color(mut self, color: Color) -> Self {
        self.target_holder_color = color;
        self
    }

    /// Sets the holder radius.
    #[must_use]
    pub fn with_holder_radius(mut self, radius: f64) -> Self {
        self.target_holder_radius = radius;
        self
    }

    /// Sets the animation timing.
    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Sets the layout reference rectangle.
    #[must_use]
    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    /// Effective title font.
    pub fn primary_font(&self) -> FontDesc {
        self.primary_text_font
            .clone()
            .unwrap_or(FontDesc::bold_system(self.primary_text_size))
    }

    /// Effective description font.
    pub fn secondary_font(&self) -> FontDesc {
        self.secondary_text_font
            .clone()
            .unwrap_or(FontDesc::system(self.secondary_text_size))
    }

    /// Effective next action font.
    pub fn next_font(&self) -> FontDesc {
        self.next_text_font
            .clone()
            .unwrap_or(FontDesc::system(self.next_text_size))
    }

    /// Effective skip action font.
    pub fn skip_font(&self) -> FontDesc {
        self.skip_text_font
            .clone()
            .unwrap_or(FontDesc::system(self.skip_text_size))
    }

    /// Whether the holder paints anything; a transparent holder means no target copy.
    pub fn holder_is_visible(&self) -> bool {
        self.target_holder_color.components[3] > 0.0
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 13] {
        let a = &self.animation;
        [
            ("target_holder_radius", self.target_holder_radius),
            ("label_margin", self.label_margin),
            ("primary_text_size", self.primary_text_size),
            ("secondary_text_size", self.secondary_text_size),
            ("next_text_size", self.next_text_size),
            ("skip_text_size", self.skip_text_size),
            ("come_in_duration", a.come_in_duration),
            ("go_out_duration", a.go_out_duration),
            ("holder_initial_scale", a.holder_initial_scale),
            ("ripple_start_scale", a.ripple_start_scale),
            ("ripple_start_duration", a.ripple_start_duration),
            ("ripple_end_scale", a.ripple_end_scale),
            ("ripple_end_duration", a.ripple_end_duration),
        ]
    }

    /// Checks that every size, scale, and duration is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError { field, value });
            }
        }
        Ok(())
    }

    /// Returns a copy with negative or non-finite numbers replaced by zero.
    ///
    /// Opacities are clamped to `0..=1`; a non-finite opacity falls back to
    /// its default.
    #[must_use]
    pub fn normalized(&self) -> Self {
        fn fix(v: &mut f64) {
            if !v.is_finite() || *v < 0.0 {
                *v = 0.0;
            }
        }
        let mut out = self.clone();
        fix(&mut out.target_holder_radius);
        fix(&mut out.label_margin);
        fix(&mut out.primary_text_size);
        fix(&mut out.secondary_text_size);
        fix(&mut out.next_text_size);
        fix(&mut out.skip_text_size);
        let a = &mut out.animation;
        fix(&mut a.come_in_duration);
        fix(&mut a.go_out_duration);
        fix(&mut a.holder_initial_scale);
        fix(&mut a.ripple_start_scale);
        fix(&mut a.ripple_start_duration);
        fix(&mut a.ripple_end_scale);
        fix(&mut a.ripple_end_duration);
        a.ripple_alpha = if a.ripple_alpha.is_finite() {
            a.ripple_alpha.clamp(0.0, 1.0)
        } else {
            DEFAULT_RIPPLE_ALPHA
        };
        out.background_prompt_alpha = if out.background_prompt_alpha.is_finite() {
            out.background_prompt_alpha.clamp(0.0, 1.0)
        } else {
            DEFAULT_PROMPT_ALPHA
        };
        out
    }
}

/// Error returned by [`ShowcaseConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigError {
    /// Name of the offending field.
    pub field: &'static str,
    /// The rejected value.
    pub value: f64,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` must be finite and non-negative, got {}",
            self.field, self.value
        )
    }
}

impl core::error::Error for ConfigError {}
