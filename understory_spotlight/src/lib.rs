// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_spotlight --heading-base-level=0

//! Understory Spotlight: a headless "material showcase" onboarding overlay.
//!
//! A showcase dims the screen, cuts a hole around one element, puts a
//! recolored copy of that element in a solid holder, pulses a ripple around
//! it, and explains it with a title, a description and optional next/skip
//! actions. This crate computes all of that as data and sequences the
//! animations; hosts render and animate.
//!
//! - **Geometry** ([`geometry`]): centers, corner distances, the enclosing
//!   circle radius and the above/below classification.
//! - **Mask** ([`mask`]): the even-odd cut-out path for the dim layer.
//! - **Panel** ([`panel`]): instruction panel placement and text layout.
//! - **Layout** ([`layout`]): the [`OverlayScene`] for a target and surface.
//! - **Animation** ([`animation`]): come-in, pulse and go-out as
//!   [`Tween`]s, sequenced by an explicit phase machine.
//! - **Controller** ([`ShowcaseController`]): show, complete, taps, resizes.
//!
//! Hosts plug in through [`ElementHost`], [`OverlayHost`], [`TextMeasurer`]
//! and [`TweenDriver`]. Lifecycle notifications are returned as
//! [`ShowcaseEvent`]s.
//!
//! ## Quick Start
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_spotlight::tint::NodeRole;
//! use understory_spotlight::{
//!     AnimationPhase, ShowcaseConfig, ShowcaseController, ShowcaseEvent, TargetRef, TweenOutcome,
//! };
//! use understory_spotlight_ref::RefHost;
//!
//! let mut host = RefHost::new();
//! let window = host.add_surface(Rect::new(0.0, 0.0, 390.0, 844.0));
//! let button = host.add_element(window, Rect::new(300.0, 60.0, 344.0, 104.0), NodeRole::Button);
//!
//! let mut showcase = ShowcaseController::new(
//!     ShowcaseConfig::default()
//!         .with_primary_text("Compose")
//!         .with_secondary_text("Start a new message here"),
//! );
//! showcase.set_target(&host, &TargetRef::Button(button));
//! showcase.show(&mut host, true);
//! assert_eq!(showcase.phase(), AnimationPhase::ComingIn);
//!
//! // The host plays the come-in and reports back; the pulse loop starts.
//! let come_in = host.finish_last_tween().unwrap();
//! showcase.on_tween_finished(&mut host, come_in, TweenOutcome::Finished);
//! assert_eq!(showcase.phase(), AnimationPhase::Pulsing);
//!
//! let events = showcase.complete(&mut host, true, false);
//! assert_eq!(events.as_slice(), &[ShowcaseEvent::WillDismiss { skipped: false }]);
//!
//! let go_out = host.finish_last_tween().unwrap();
//! let events = showcase.on_tween_finished(&mut host, go_out, TweenOutcome::Finished);
//! assert_eq!(events.as_slice(), &[ShowcaseEvent::DidDismiss { skipped: false }]);
//! assert!(host.attached(window).is_none());
//! ```
//!
//! ## Layout modes
//!
//! [`LayoutMode::SafeArea`] (the default) lays out inside the surface bounds
//! and honors its safe area insets. [`LayoutMode::Screen`] anchors to the
//! screen rectangle and ignores insets.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: float math backend, forwarded to Kurbo and Peniko.
//! - `tracing`: emit `tracing` debug events for phase transitions and ignored
//!   requests.

#![no_std]

extern crate alloc;

pub mod animation;
pub mod color;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod mask;
pub mod panel;
pub mod scene;
pub mod target;
pub mod tint;

pub use animation::{AnimationPhase, Easing, Tween, TweenDriver, TweenId, TweenOutcome};
pub use color::{StatusBarStyle, parse_hex_color};
pub use config::{AnimationConfig, ConfigError, LayoutMode, ShowcaseConfig, TapTarget, TargetShape};
pub use controller::{ShowOutcome, ShowcaseController, ShowcaseEvent, ShowcaseEvents};
pub use host::{ElementHost, OverlayHost, SurfaceMetrics, TextMeasurer, TextRequest};
pub use scene::OverlayScene;
pub use target::{TargetError, TargetRef};
