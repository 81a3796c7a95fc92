// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The showcase controller.
//!
//! [`ShowcaseController`] ties target resolution, layout and the animation
//! phases together. It owns no UI: every call takes the host, and every
//! lifecycle notification comes back as [`ShowcaseEvent`]s from the call that
//! caused it.
//!
//! A typical host:
//! 1. configures the controller and calls [`set_target`](ShowcaseController::set_target);
//! 2. calls [`show`](ShowcaseController::show);
//! 3. forwards taps to [`handle_tap`](ShowcaseController::handle_tap) and tween
//!    completions to [`on_tween_finished`](ShowcaseController::on_tween_finished);
//! 4. calls [`relayout`](ShowcaseController::relayout) when the surface resizes.

use core::fmt;

use kurbo::Point;
use peniko::Color;
use smallvec::SmallVec;

use crate::animation::{AnimationPhase, Animator, Transition, TweenDriver, TweenId, TweenOutcome};
use crate::color::StatusBarStyle;
use crate::config::{DEFAULT_BACKGROUND_COLOR, ShowcaseConfig, TapTarget};
use crate::host::{OverlayHost, TextMeasurer};
use crate::layout::{LayoutInput, OverlayGeometry, layout_overlay, overlay_geometry};
use crate::scene::{HitTarget, OverlayScene};
use crate::target::{ResolvedTarget, TargetError, TargetRef, resolve};
use crate::tint::recolor_copy;

/// Lifecycle notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShowcaseEvent {
    /// Dismissal started.
    WillDismiss {
        /// Whether the skip action caused it.
        skipped: bool,
    },
    /// Dismissal finished; every part is detached.
    DidDismiss {
        /// Whether the skip action caused it.
        skipped: bool,
    },
}

/// Events produced by one controller call, in order.
pub type ShowcaseEvents = SmallVec<[ShowcaseEvent; 2]>;

/// Result of [`ShowcaseController::show`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShowOutcome {
    /// The overlay is attached.
    Shown,
    /// No surface to attach to; nothing happened.
    NoSurface,
}

/// State of an attached showcase.
struct Presentation<H: OverlayHost> {
    surface: H::Element,
    config: ShowcaseConfig,
    geometry: OverlayGeometry,
    scene: OverlayScene<H::Snapshot>,
    /// Element the target copy was taken from.
    copy_source: Option<H::Element>,
    previous_status_bar: StatusBarStyle,
    animated: bool,
    skipped: bool,
}

/// Shows one spotlight at a time on behalf of a host `H`.
pub struct ShowcaseController<H: OverlayHost> {
    config: ShowcaseConfig,
    target: Option<ResolvedTarget<H::Element>>,
    animator: Animator,
    presentation: Option<Presentation<H>>,
}

impl<H: OverlayHost> fmt::Debug for ShowcaseController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowcaseController")
            .field("config", &self.config)
            .field("target", &self.target)
            .field("phase", &self.animator.phase())
            .field("surface", &self.presentation.as_ref().map(|p| &p.surface))
            .finish_non_exhaustive()
    }
}

impl<H: OverlayHost> Default for ShowcaseController<H> {
    fn default() -> Self {
        Self::new(ShowcaseConfig::default())
    }
}

impl<H: OverlayHost> ShowcaseController<H> {
    /// Creates a controller with no target.
    pub fn new(config: ShowcaseConfig) -> Self {
        Self {
            config,
            target: None,
            animator: Animator::new(),
            presentation: None,
        }
    }

    /// Configuration used by the next [`show`](Self::show).
    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    /// Mutable configuration. Changes apply from the next show.
    pub fn config_mut(&mut self) -> &mut ShowcaseConfig {
        &mut self.config
    }

    /// Replaces the configuration. Applies from the next show.
    pub fn set_config(&mut self, config: ShowcaseConfig) {
        self.config = config;
    }

    /// Resolves and stores `target`. Nothing is laid out until the next show.
    ///
    /// On failure the previous target is kept.
    pub fn try_set_target(
        &mut self,
        host: &H,
        target: &TargetRef<H::Element>,
    ) -> Result<(), TargetError> {
        self.target = Some(resolve(host, target)?);
        Ok(())
    }

    /// Like [`try_set_target`](Self::try_set_target), but ignores failures.
    pub fn set_target(&mut self, host: &H, target: &TargetRef<H::Element>) {
        if let Err(_err) = self.try_set_target(host, target) {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_err, "ignoring unresolvable showcase target");
        }
    }

    /// Forgets the target; the next show centers on the key surface.
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// The resolved target.
    pub fn target(&self) -> Option<&ResolvedTarget<H::Element>> {
        self.target.as_ref()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> AnimationPhase {
        self.animator.phase()
    }

    /// Tween currently in flight.
    pub fn active_tween(&self) -> Option<TweenId> {
        self.animator.active()
    }

    /// The scene as last laid out, with in-flight tweens at their end values.
    pub fn scene(&self) -> Option<&OverlayScene<H::Snapshot>> {
        self.presentation.as_ref().map(|p| &p.scene)
    }

    /// Geometry of the last layout pass.
    pub fn geometry(&self) -> Option<&OverlayGeometry> {
        self.presentation.as_ref().map(|p| &p.geometry)
    }

    /// Surface the overlay is attached to.
    pub fn surface(&self) -> Option<&H::Element> {
        self.presentation.as_ref().map(|p| &p.surface)
    }

    /// Tint for the target copy: configured, else the target's accent, else
    /// the default blue.
    pub fn tint_color(&self) -> Color {
        self.effective_tint(&self.config)
    }

    /// Dim layer color before alpha: configured, else the target's accent,
    /// else the default blue.
    pub fn background_color(&self) -> Color {
        self.effective_background(&self.config)
    }

    fn accent(&self) -> Option<Color> {
        self.target.as_ref().and_then(|t| t.accent)
    }

    fn effective_tint(&self, config: &ShowcaseConfig) -> Color {
        config
            .target_tint_color
            .or_else(|| self.accent())
            .unwrap_or(DEFAULT_BACKGROUND_COLOR)
    }

    fn effective_background(&self, config: &ShowcaseConfig) -> Color {
        config
            .background_prompt_color
            .or_else(|| self.accent())
            .unwrap_or(DEFAULT_BACKGROUND_COLOR)
    }

    fn target_element(&self) -> Option<H::Element> {
        self.target.as_ref().map(|t| t.element.clone())
    }

    fn holder_radius(&self, config: &ShowcaseConfig) -> f64 {
        self.target
            .as_ref()
            .and_then(|t| t.holder_radius)
            .unwrap_or(config.target_holder_radius)
    }

    fn teardown(&mut self, host: &mut H) {
        if let Some(presentation) = self.presentation.take() {
            host.detach(&presentation.surface);
            #[cfg(feature = "tracing")]
            tracing::debug!(surface = ?presentation.surface, "showcase detached");
        }
    }
}

impl<H> ShowcaseController<H>
where
    H: OverlayHost + TextMeasurer + TweenDriver,
{
    /// Lays out and attaches the overlay, then starts the come-in, or jumps to
    /// the shown state when `animated` is false.
    ///
    /// Showing again while attached replaces the previous layout.
    pub fn show(&mut self, host: &mut H, animated: bool) -> ShowOutcome {
        self.show_then(host, animated, || {})
    }

    /// [`show`](Self::show), calling `on_shown` once the overlay is attached
    /// and its entry has been issued.
    pub fn show_then(
        &mut self,
        host: &mut H,
        animated: bool,
        on_shown: impl FnOnce(),
    ) -> ShowOutcome {
        let surface = match &self.target {
            Some(target) => host.surface_of(&target.element),
            None => host.key_surface(),
        };
        let Some(surface) = surface else {
            #[cfg(feature = "tracing")]
            tracing::debug!("no surface to attach the showcase to");
            return ShowOutcome::NoSurface;
        };

        let previous_status_bar = match self.presentation.take() {
            Some(old) => {
                self.animator.cancel(host);
                host.detach(&old.surface);
                old.previous_status_bar
            }
            None => host.status_bar_style(),
        };
        self.animator.reset(host);

        let config = self.config.normalized();
        let copy = self.snapshot_copy(host, &config);
        let (geometry, mut scene) = self.lay_out(host, &surface, &config, copy);

        host.set_status_bar_style(
            StatusBarStyle::for_background(self.effective_background(&config)),
            animated,
        );

        let container_center = geometry.container.center();
        if animated {
            host.present(&surface, &scene);
            self.animator
                .come_in(&mut scene, &config.animation, container_center, host);
        } else {
            self.animator.snap_shown(&mut scene, container_center);
            host.present(&surface, &scene);
            self.animator
                .start_pulse(&mut scene, &config.animation, host);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?surface, animated, "showcase attached");

        self.presentation = Some(Presentation {
            surface,
            config,
            geometry,
            scene,
            copy_source: self.target_element(),
            previous_status_bar,
            animated,
            skipped: false,
        });
        on_shown();
        ShowOutcome::Shown
    }

    /// Dismisses the showcase.
    ///
    /// Returns [`ShowcaseEvent::WillDismiss`] right away. With `animated`, the
    /// matching [`ShowcaseEvent::DidDismiss`] comes from
    /// [`on_tween_finished`](Self::on_tween_finished) once the go-out
    /// succeeds; otherwise the overlay is torn down and both events are
    /// returned together.
    ///
    /// Does nothing when nothing is shown or a go-out is already running. A
    /// go-out that was interrupted can be completed again.
    pub fn complete(&mut self, host: &mut H, animated: bool, skipped: bool) -> ShowcaseEvents {
        let mut events = ShowcaseEvents::new();
        if matches!(
            self.animator.phase(),
            AnimationPhase::Idle | AnimationPhase::Dismissed
        ) || self.animator.is_dismissing()
        {
            return events;
        }
        let Some(presentation) = self.presentation.as_mut() else {
            return events;
        };

        presentation.skipped = skipped;
        host.set_status_bar_style(presentation.previous_status_bar, animated);
        events.push(ShowcaseEvent::WillDismiss { skipped });

        if animated {
            let container_center = presentation.geometry.container.center();
            self.animator
                .settle(&mut presentation.scene, container_center, host);
            host.present(&presentation.surface, &presentation.scene);
            self.animator.go_out(
                &mut presentation.scene,
                &presentation.config.animation,
                host,
            );
        } else {
            self.animator.dismiss_now(host);
            self.teardown(host);
            events.push(ShowcaseEvent::DidDismiss { skipped });
        }
        events
    }

    /// Routes a tap at `point`, in surface coordinates.
    ///
    /// Next dismisses unskipped and Skip dismisses skipped. With
    /// [`TapTarget::All`] a tap anywhere else dismisses unskipped; with
    /// [`TapTarget::Target`] only a tap on the target copy does. Taps inside
    /// an inert panel never dismiss.
    pub fn handle_tap(&mut self, host: &mut H, point: Point) -> ShowcaseEvents {
        if !matches!(
            self.animator.phase(),
            AnimationPhase::ComingIn | AnimationPhase::Pulsing
        ) {
            return ShowcaseEvents::new();
        }
        let Some(presentation) = &self.presentation else {
            return ShowcaseEvents::new();
        };
        let animated = presentation.animated;
        let skipped = match presentation.scene.hit_test(point) {
            Some(HitTarget::Next | HitTarget::TargetCopy | HitTarget::TapCatcher) => false,
            Some(HitTarget::Skip) => true,
            Some(HitTarget::Panel) if presentation.config.tap_target == TapTarget::All => false,
            Some(HitTarget::Panel) | None => return ShowcaseEvents::new(),
        };
        self.complete(host, animated, skipped)
    }

    /// Feeds the end of a tween back in. Completions of tweens that are no
    /// longer active are ignored.
    pub fn on_tween_finished(
        &mut self,
        host: &mut H,
        id: TweenId,
        outcome: TweenOutcome,
    ) -> ShowcaseEvents {
        let mut events = ShowcaseEvents::new();
        let Some(presentation) = self.presentation.as_mut() else {
            return events;
        };
        match self.animator.on_finished(
            id,
            outcome,
            &mut presentation.scene,
            &presentation.config.animation,
            host,
        ) {
            Transition::Dismissed => {
                let skipped = presentation.skipped;
                self.teardown(host);
                events.push(ShowcaseEvent::DidDismiss { skipped });
            }
            Transition::GoOutInterrupted => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?id, "showcase go-out interrupted; still attached");
            }
            Transition::Stale | Transition::Pulsing | Transition::PulseStopped => {}
        }
        events
    }

    /// Recomputes every part from fresh surface metrics and target bounds, and
    /// restarts the pulse on the new layout.
    ///
    /// Only a showcase that is coming in or pulsing is relaid out; a resize
    /// during come-in jumps straight to the shown state. The target copy is
    /// taken again when the target changed since it was last taken.
    pub fn relayout(&mut self, host: &mut H) {
        if !matches!(
            self.animator.phase(),
            AnimationPhase::ComingIn | AnimationPhase::Pulsing
        ) {
            return;
        }
        let Some(Presentation {
            surface,
            config,
            scene: old_scene,
            copy_source: old_copy_source,
            previous_status_bar,
            animated,
            skipped,
            ..
        }) = self.presentation.take()
        else {
            return;
        };
        self.animator.cancel(host);
        let copy_source = self.target_element();
        let copy = if old_copy_source == copy_source {
            old_scene.target_copy.map(|c| c.node)
        } else {
            self.snapshot_copy(host, &config)
        };
        let (geometry, mut scene) = self.lay_out(host, &surface, &config, copy);
        self.animator
            .snap_shown(&mut scene, geometry.container.center());
        host.present(&surface, &scene);
        self.animator
            .start_pulse(&mut scene, &config.animation, host);
        #[cfg(feature = "tracing")]
        tracing::debug!(container = ?geometry.container, "showcase relaid out");

        self.presentation = Some(Presentation {
            surface,
            config,
            geometry,
            scene,
            copy_source,
            previous_status_bar,
            animated,
            skipped,
        });
    }

    fn snapshot_copy(&self, host: &mut H, config: &ShowcaseConfig) -> Option<H::Snapshot> {
        if !config.holder_is_visible() {
            return None;
        }
        let target = self.target.as_ref()?;
        let mut copy = host.snapshot(&target.element)?;
        recolor_copy(
            &mut copy,
            self.effective_tint(config),
            config.should_set_tint_color,
        );
        Some(copy)
    }

    fn lay_out(
        &self,
        host: &H,
        surface: &H::Element,
        config: &ShowcaseConfig,
        copy: Option<H::Snapshot>,
    ) -> (OverlayGeometry, OverlayScene<H::Snapshot>) {
        let input = LayoutInput {
            config,
            metrics: host.surface_metrics(surface),
            target: self
                .target
                .as_ref()
                .map(|t| host.bounds_in(&t.element, surface)),
            holder_radius: self.holder_radius(config),
            background_color: self.effective_background(config),
        };
        let geometry = overlay_geometry(&input);
        let scene = layout_overlay(&input, &geometry, copy, host);
        (geometry, scene)
    }
}
