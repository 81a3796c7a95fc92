// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Showcase animations and the phase machine that sequences them.
//!
//! Animations are described as [`Tween`]s: timed keyframes of property
//! changes on the scene's parts. A host-side [`TweenDriver`] plays them and
//! reports back through
//! [`ShowcaseController::on_tween_finished`](crate::controller::ShowcaseController::on_tween_finished).
//!
//! ```text
//! Idle --come_in--> ComingIn --finished or interrupted--> Pulsing
//! Pulsing --go_out--> GoingOut --finished--> Dismissed
//!                     GoingOut --interrupted--> GoingOut (no tween, retryable)
//! ```
//!
//! When a tween is issued its end values are written into the scene right
//! away, so the scene always describes where the parts are headed.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;

use crate::config::AnimationConfig;
use crate::scene::OverlayScene;

/// Holder scale at the end of the first go-out keyframe.
pub const GO_OUT_HOLDER_SCALE: f64 = 0.4;
/// Background scale at the end of the first go-out keyframe.
pub const GO_OUT_BACKGROUND_SCALE: f64 = 1.3;
/// Fraction of the go-out spent shrinking the holder and fading the background.
pub const GO_OUT_SPLIT: f64 = 0.6;

/// Lifecycle phase of a showcase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    /// Not shown.
    #[default]
    Idle,
    /// Entry animation running.
    ComingIn,
    /// Shown; the idle pulse loops.
    Pulsing,
    /// Exit requested.
    GoingOut,
    /// Torn down.
    Dismissed,
}

/// Timing curve.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic ease in and out.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `0..=1` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// An animatable part of the scene.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// The whole overlay; only its alpha animates.
    Overlay,
    /// Dim layer.
    Background,
    /// Pulsing ring.
    Ripple,
    /// Disc behind the target copy.
    Holder,
}

/// A property's target value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Property {
    /// Uniform scale around the part's center.
    Scale(f64),
    /// Opacity.
    Alpha(f64),
    /// Center position.
    Center(Point),
}

/// One property change on one part.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Change {
    /// Part to change.
    pub part: PartKind,
    /// Value to reach.
    pub property: Property,
}

impl Change {
    /// Creates a change.
    pub const fn new(part: PartKind, property: Property) -> Self {
        Self { part, property }
    }
}

/// A slice of a tween's timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    /// Start, as a fraction of the tween duration.
    pub start: f64,
    /// Length, as a fraction of the tween duration.
    pub duration: f64,
    /// Values reached at `start + duration`.
    pub changes: Vec<Change>,
}

/// An animation for a host to play.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    /// Total length in seconds.
    pub duration: f64,
    /// Curve applied to the whole timeline.
    pub easing: Easing,
    /// Loop until cancelled.
    pub repeat: bool,
    /// Keyframes in timeline order.
    pub keyframes: Vec<Keyframe>,
}

impl Tween {
    /// A single-keyframe tween.
    pub fn single(duration: f64, easing: Easing, changes: Vec<Change>) -> Self {
        Self {
            duration,
            easing,
            repeat: false,
            keyframes: vec![Keyframe {
                start: 0.0,
                duration: 1.0,
                changes,
            }],
        }
    }

    /// Every change, in timeline order. Applying them all yields the end state.
    pub fn changes(&self) -> impl Iterator<Item = &Change> {
        self.keyframes.iter().flat_map(|k| k.changes.iter())
    }
}

/// Handle for a started tween.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

/// How a tween ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TweenOutcome {
    /// Ran to the end.
    Finished,
    /// Cancelled or cut short.
    Interrupted,
}

/// Plays tweens on the host.
pub trait TweenDriver {
    /// Starts `tween` on the parts most recently presented.
    fn start_tween(&mut self, tween: Tween) -> TweenId;

    /// Stops a running tween. Unknown ids are ignored.
    fn cancel_tween(&mut self, id: TweenId);
}

/// Result of feeding a tween completion to the [`Animator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Not the active tween.
    Stale,
    /// Come-in ended; the pulse started.
    Pulsing,
    /// The pulse loop stopped on its own.
    PulseStopped,
    /// Go-out finished; the showcase must be torn down.
    Dismissed,
    /// Go-out was cut short; the showcase stays up until completed again.
    GoOutInterrupted,
}

/// Entry state changes: where come-in leaves the parts.
pub fn shown_changes(holder_center: Point, container_center: Point) -> Vec<Change> {
    vec![
        Change::new(PartKind::Holder, Property::Scale(1.0)),
        Change::new(PartKind::Holder, Property::Center(holder_center)),
        Change::new(PartKind::Background, Property::Scale(1.0)),
        Change::new(PartKind::Background, Property::Alpha(1.0)),
        Change::new(PartKind::Background, Property::Center(container_center)),
        Change::new(PartKind::Overlay, Property::Alpha(1.0)),
    ]
}

/// The come-in tween.
pub fn come_in_tween(
    config: &AnimationConfig,
    holder_center: Point,
    container_center: Point,
) -> Tween {
    Tween::single(
        config.come_in_duration,
        Easing::EaseInOut,
        shown_changes(holder_center, container_center),
    )
}

/// The looping pulse tween, or `None` when its period is zero.
///
/// The first keyframe grows the holder and the ripple while the ripple fades
/// in; the second shrinks the holder back and fades the ripple out at its
/// start scale. Ripple changes are left out when `with_ripple` is false.
pub fn pulse_tween(config: &AnimationConfig, with_ripple: bool) -> Option<Tween> {
    let period = config.pulse_period();
    if period <= 0.0 {
        return None;
    }
    let mut grow = vec![Change::new(
        PartKind::Holder,
        Property::Scale(config.ripple_end_scale),
    )];
    let mut settle = vec![Change::new(PartKind::Holder, Property::Scale(1.0))];
    if with_ripple {
        grow.push(Change::new(
            PartKind::Ripple,
            Property::Alpha(config.ripple_alpha),
        ));
        grow.push(Change::new(
            PartKind::Ripple,
            Property::Scale(config.ripple_end_scale),
        ));
        settle.push(Change::new(PartKind::Ripple, Property::Alpha(0.0)));
        settle.push(Change::new(
            PartKind::Ripple,
            Property::Scale(config.ripple_start_scale),
        ));
    }
    let split = config.ripple_start_duration / period;
    Some(Tween {
        duration: period,
        easing: Easing::EaseInOut,
        repeat: true,
        keyframes: vec![
            Keyframe {
                start: 0.0,
                duration: split,
                changes: grow,
            },
            Keyframe {
                start: split,
                duration: 1.0 - split,
                changes: settle,
            },
        ],
    })
}

/// The go-out tween.
pub fn go_out_tween(config: &AnimationConfig) -> Tween {
    Tween {
        duration: config.go_out_duration,
        easing: Easing::Linear,
        repeat: false,
        keyframes: vec![
            Keyframe {
                start: 0.0,
                duration: GO_OUT_SPLIT,
                changes: vec![
                    Change::new(PartKind::Holder, Property::Scale(GO_OUT_HOLDER_SCALE)),
                    Change::new(
                        PartKind::Background,
                        Property::Scale(GO_OUT_BACKGROUND_SCALE),
                    ),
                    Change::new(PartKind::Background, Property::Alpha(0.0)),
                ],
            },
            Keyframe {
                start: GO_OUT_SPLIT,
                duration: 1.0 - GO_OUT_SPLIT,
                changes: vec![Change::new(PartKind::Overlay, Property::Alpha(0.0))],
            },
        ],
    }
}

/// Sequences come-in, pulse and go-out, with at most one tween in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animator {
    phase: AnimationPhase,
    active: Option<TweenId>,
}

impl Animator {
    /// An idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Tween currently in flight.
    pub fn active(&self) -> Option<TweenId> {
        self.active
    }

    /// Whether a go-out is already running.
    pub fn is_dismissing(&self) -> bool {
        self.phase == AnimationPhase::GoingOut && self.active.is_some()
    }

    /// Cancels any tween in flight and returns to [`AnimationPhase::Idle`].
    pub fn reset<D: TweenDriver + ?Sized>(&mut self, driver: &mut D) {
        self.cancel(driver);
        self.phase = AnimationPhase::Idle;
    }

    /// Cancels the tween in flight, if any. The phase is unchanged.
    pub fn cancel<D: TweenDriver + ?Sized>(&mut self, driver: &mut D) {
        if let Some(id) = self.active.take() {
            driver.cancel_tween(id);
        }
    }

    /// Starts the come-in from the scene's current (initial) state.
    pub fn come_in<N, D: TweenDriver + ?Sized>(
        &mut self,
        scene: &mut OverlayScene<N>,
        config: &AnimationConfig,
        container_center: Point,
        driver: &mut D,
    ) {
        self.cancel(driver);
        let tween = come_in_tween(config, scene.holder.center, container_center);
        self.phase = AnimationPhase::ComingIn;
        self.issue(scene, tween, driver);
        #[cfg(feature = "tracing")]
        tracing::debug!(tween = ?self.active, "showcase coming in");
    }

    /// Jumps to the shown state without animating it.
    pub fn snap_shown<N>(&mut self, scene: &mut OverlayScene<N>, container_center: Point) {
        scene.apply_all(&shown_changes(scene.holder.center, container_center));
        self.phase = AnimationPhase::ComingIn;
    }

    /// Enters [`AnimationPhase::Pulsing`] and starts the pulse loop.
    pub fn start_pulse<N, D: TweenDriver + ?Sized>(
        &mut self,
        scene: &mut OverlayScene<N>,
        config: &AnimationConfig,
        driver: &mut D,
    ) {
        self.cancel(driver);
        self.phase = AnimationPhase::Pulsing;
        if let Some(tween) = pulse_tween(config, !scene.ripple.hidden) {
            self.issue(scene, tween, driver);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(tween = ?self.active, "showcase pulsing");
    }

    /// Stops whatever runs and puts the scene in its shown state with the
    /// ripple removed, ready for the go-out.
    pub fn settle<N, D: TweenDriver + ?Sized>(
        &mut self,
        scene: &mut OverlayScene<N>,
        container_center: Point,
        driver: &mut D,
    ) {
        self.cancel(driver);
        scene.apply_all(&shown_changes(scene.holder.center, container_center));
        scene.apply(&Change::new(PartKind::Ripple, Property::Alpha(0.0)));
        scene.ripple.hidden = true;
    }

    /// Starts the go-out from the scene's current state.
    pub fn go_out<N, D: TweenDriver + ?Sized>(
        &mut self,
        scene: &mut OverlayScene<N>,
        config: &AnimationConfig,
        driver: &mut D,
    ) {
        self.cancel(driver);
        self.phase = AnimationPhase::GoingOut;
        self.issue(scene, go_out_tween(config), driver);
        #[cfg(feature = "tracing")]
        tracing::debug!(tween = ?self.active, "showcase going out");
    }

    /// Cancels everything and marks the showcase dismissed.
    pub fn dismiss_now<D: TweenDriver + ?Sized>(&mut self, driver: &mut D) {
        self.cancel(driver);
        self.phase = AnimationPhase::Dismissed;
    }

    /// Handles the end of tween `id`.
    pub fn on_finished<N, D: TweenDriver + ?Sized>(
        &mut self,
        id: TweenId,
        outcome: TweenOutcome,
        scene: &mut OverlayScene<N>,
        config: &AnimationConfig,
        driver: &mut D,
    ) -> Transition {
        if self.active != Some(id) {
            #[cfg(feature = "tracing")]
            tracing::debug!(?id, "ignoring stale tween completion");
            return Transition::Stale;
        }
        self.active = None;
        match self.phase {
            AnimationPhase::ComingIn => {
                self.start_pulse(scene, config, driver);
                Transition::Pulsing
            }
            AnimationPhase::GoingOut => match outcome {
                TweenOutcome::Finished => {
                    self.phase = AnimationPhase::Dismissed;
                    Transition::Dismissed
                }
                TweenOutcome::Interrupted => Transition::GoOutInterrupted,
            },
            AnimationPhase::Pulsing => Transition::PulseStopped,
            AnimationPhase::Idle | AnimationPhase::Dismissed => Transition::Stale,
        }
    }

    fn issue<N, D: TweenDriver + ?Sized>(
        &mut self,
        scene: &mut OverlayScene<N>,
        tween: Tween,
        driver: &mut D,
    ) {
        scene.apply_all(tween.changes());
        self.active = Some(driver.start_tween(tween));
    }
}
