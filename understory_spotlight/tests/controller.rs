// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Showcase lifecycle scenarios against the reference host.
//!
//! The reference host never runs tweens on its own: each test finishes or
//! interrupts them explicitly and feeds the outcome back to the controller.

use core::cell::Cell;

use kurbo::{Insets, Point, Rect};
use peniko::Color;
use understory_spotlight::animation::{PartKind, Property};
use understory_spotlight::tint::NodeRole;
use understory_spotlight::{
    AnimationPhase, OverlayHost, ShowOutcome, ShowcaseConfig, ShowcaseController, ShowcaseEvent,
    StatusBarStyle, SurfaceMetrics, TapTarget, TargetRef, TargetShape, TweenOutcome,
};
use understory_spotlight_ref::{HostEvent, RefElement, RefHost};

const TARGET: Rect = Rect::new(180.0, 100.0, 220.0, 140.0);

struct Fixture {
    host: RefHost,
    window: RefElement,
    button: RefElement,
    showcase: ShowcaseController<RefHost>,
}

fn fixture(config: ShowcaseConfig) -> Fixture {
    let mut host = RefHost::new();
    let window = host.add_surface(Rect::new(0.0, 0.0, 400.0, 800.0));
    let button = host.add_element(window, TARGET, NodeRole::Button);
    let mut showcase = ShowcaseController::new(config);
    showcase.set_target(&host, &TargetRef::Button(button));
    Fixture {
        host,
        window,
        button,
        showcase,
    }
}

impl Fixture {
    /// Shows animated and finishes the come-in.
    fn pulsing(mut self) -> Self {
        assert_eq!(self.showcase.show(&mut self.host, true), ShowOutcome::Shown);
        self.finish();
        assert_eq!(self.showcase.phase(), AnimationPhase::Pulsing);
        self
    }

    fn finish(&mut self) -> Vec<ShowcaseEvent> {
        self.end_last(TweenOutcome::Finished)
    }

    fn end_last(&mut self, outcome: TweenOutcome) -> Vec<ShowcaseEvent> {
        let id = self.host.finish_last_tween().unwrap();
        self.showcase
            .on_tween_finished(&mut self.host, id, outcome)
            .to_vec()
    }

    fn tap(&mut self, point: Point) -> Vec<ShowcaseEvent> {
        self.showcase.handle_tap(&mut self.host, point).to_vec()
    }

    fn panel_frame(&self) -> Rect {
        self.showcase.scene().unwrap().panel.frame
    }
}

#[test]
fn come_in_then_pulse() {
    let mut f = fixture(ShowcaseConfig::default());
    assert_eq!(f.showcase.show(&mut f.host, true), ShowOutcome::Shown);
    assert_eq!(f.showcase.phase(), AnimationPhase::ComingIn);

    // Presented in the pre-come-in state; the model already holds the end values.
    let presented = f.host.attached(f.window).unwrap();
    assert_eq!(presented.alpha, 0.0);
    assert_eq!(f.showcase.scene().unwrap().alpha, 1.0);
    assert_eq!(f.showcase.scene().unwrap().holder.scale, 1.0);

    let pending = f.host.pending_tweens();
    assert_eq!(pending.len(), 1);
    assert!(!pending[0].1.repeat);

    assert!(f.finish().is_empty());
    assert_eq!(f.showcase.phase(), AnimationPhase::Pulsing);
    let pending = f.host.pending_tweens();
    assert_eq!(pending.len(), 1);
    assert!(pending[0].1.repeat);
    assert_eq!(f.showcase.active_tween(), Some(pending[0].0));
}

#[test]
fn interrupted_come_in_still_pulses() {
    let mut f = fixture(ShowcaseConfig::default());
    f.showcase.show(&mut f.host, true);
    assert!(f.end_last(TweenOutcome::Interrupted).is_empty());
    assert_eq!(f.showcase.phase(), AnimationPhase::Pulsing);
}

#[test]
fn complete_cancels_pulse_then_dismisses_after_go_out() {
    let mut f = fixture(ShowcaseConfig::default()).pulsing();
    let pulse = f.showcase.active_tween().unwrap();

    let events = f.showcase.complete(&mut f.host, true, false).to_vec();
    assert_eq!(events, [ShowcaseEvent::WillDismiss { skipped: false }]);
    assert_eq!(f.showcase.phase(), AnimationPhase::GoingOut);
    assert!(f.host.events().contains(&HostEvent::TweenCancelled(pulse)));

    // Only the go-out is pending; no repeating tween is left behind.
    let pending = f.host.pending_tweens();
    assert_eq!(pending.len(), 1);
    assert!(!pending[0].1.repeat);

    // The pulse was settled before the go-out was presented.
    let presented = f.host.attached(f.window).unwrap();
    assert!(presented.ripple.hidden);
    assert_eq!(presented.holder.scale, 1.0);
    assert_eq!(presented.alpha, 1.0);

    let events = f.finish();
    assert_eq!(events, [ShowcaseEvent::DidDismiss { skipped: false }]);
    assert_eq!(f.showcase.phase(), AnimationPhase::Dismissed);
    assert!(f.host.attached(f.window).is_none());
    assert!(f.showcase.scene().is_none());
}

#[test]
fn go_out_shrinks_holder_and_fades() {
    let mut f = fixture(ShowcaseConfig::default()).pulsing();
    f.showcase.complete(&mut f.host, true, false);
    let (_, tween) = &f.host.pending_tweens()[0];
    let changes: Vec<_> = tween.changes().collect();
    assert!(
        changes
            .iter()
            .any(|c| c.part == PartKind::Holder && c.property == Property::Scale(0.4))
    );
    let scene = f.showcase.scene().unwrap();
    assert_eq!(scene.alpha, 0.0);
    assert_eq!(scene.background.visual.alpha, 0.0);
    assert_eq!(scene.background.visual.scale, 1.3);
}

#[test]
fn second_complete_during_go_out_is_ignored() {
    let mut f = fixture(ShowcaseConfig::default()).pulsing();
    f.showcase.complete(&mut f.host, true, false);
    assert!(f.showcase.complete(&mut f.host, true, true).is_empty());
    assert_eq!(f.host.pending_tweens().len(), 1);
    assert_eq!(f.finish(), [ShowcaseEvent::DidDismiss { skipped: false }]);
}

#[test]
fn interrupted_go_out_can_be_retried() {
    let mut f = fixture(ShowcaseConfig::default()).pulsing();
    f.showcase.complete(&mut f.host, true, true);

    assert!(f.end_last(TweenOutcome::Interrupted).is_empty());
    assert_eq!(f.showcase.phase(), AnimationPhase::GoingOut);
    assert!(f.host.attached(f.window).is_some());

    let events = f.showcase.complete(&mut f.host, true, true).to_vec();
    assert_eq!(events, [ShowcaseEvent::WillDismiss { skipped: true }]);
    // The retry starts from the shown state again.
    assert_eq!(f.host.attached(f.window).unwrap().alpha, 1.0);
    assert_eq!(f.finish(), [ShowcaseEvent::DidDismiss { skipped: true }]);
    assert!(f.host.attached(f.window).is_none());
}

#[test]
fn stale_completions_are_ignored() {
    let mut f = fixture(ShowcaseConfig::default());
    f.showcase.show(&mut f.host, true);
    let come_in = f.showcase.active_tween().unwrap();
    f.showcase.complete(&mut f.host, true, false);

    let events = f
        .showcase
        .on_tween_finished(&mut f.host, come_in, TweenOutcome::Interrupted);
    assert!(events.is_empty());
    assert_eq!(f.showcase.phase(), AnimationPhase::GoingOut);
    assert!(f.host.attached(f.window).is_some());
}

#[test]
fn immediate_show_and_complete() {
    let mut f = fixture(ShowcaseConfig::default());
    let shown = Cell::new(false);
    let outcome = f.showcase.show_then(&mut f.host, false, || shown.set(true));
    assert_eq!(outcome, ShowOutcome::Shown);
    assert!(shown.get());
    assert_eq!(f.showcase.phase(), AnimationPhase::Pulsing);
    assert_eq!(f.host.attached(f.window).unwrap().alpha, 1.0);

    let events = f.showcase.complete(&mut f.host, false, true).to_vec();
    assert_eq!(
        events,
        [
            ShowcaseEvent::WillDismiss { skipped: true },
            ShowcaseEvent::DidDismiss { skipped: true },
        ]
    );
    assert_eq!(f.showcase.phase(), AnimationPhase::Dismissed);
    assert!(f.host.attached(f.window).is_none());
    assert!(f.host.pending_tweens().is_empty());
}

#[test]
fn on_shown_runs_for_animated_show() {
    let mut f = fixture(ShowcaseConfig::default());
    let calls = Cell::new(0);
    f.showcase
        .show_then(&mut f.host, true, || calls.set(calls.get() + 1));
    assert_eq!(calls.get(), 1);
    assert_eq!(f.host.pending_tweens().len(), 1);
}

#[test]
fn complete_without_show_does_nothing() {
    let mut f = fixture(ShowcaseConfig::default());
    assert!(f.showcase.complete(&mut f.host, true, false).is_empty());
    assert!(f.host.events().is_empty());
}

#[test]
fn show_without_surface_is_a_no_op() {
    let mut f = fixture(ShowcaseConfig::default());
    f.host.remove_from_parent(f.button);
    let called = Cell::new(false);
    let outcome = f.showcase.show_then(&mut f.host, true, || called.set(true));
    assert_eq!(outcome, ShowOutcome::NoSurface);
    assert!(!called.get());
    assert_eq!(f.showcase.phase(), AnimationPhase::Idle);
    assert!(f.host.events().is_empty());
}

#[test]
fn untargeted_show_without_key_surface_is_a_no_op() {
    let mut host = RefHost::new();
    host.add_surface(Rect::new(0.0, 0.0, 400.0, 800.0));
    host.set_key_surface(None);
    let mut showcase = ShowcaseController::default();
    assert_eq!(showcase.show(&mut host, false), ShowOutcome::NoSurface);
    assert_eq!(host.attached_count(), 0);
}

#[test]
fn untargeted_show_centers_on_key_surface() {
    let mut host = RefHost::new();
    let window = host.add_surface(Rect::new(0.0, 0.0, 400.0, 800.0));
    let mut showcase = ShowcaseController::default();
    assert_eq!(showcase.show(&mut host, false), ShowOutcome::Shown);
    let geometry = showcase.geometry().unwrap();
    assert_eq!(geometry.center, Point::new(200.0, 400.0));
    assert!(showcase.scene().unwrap().target_copy.is_none());
    assert_eq!(showcase.surface(), Some(&window));
}

#[test]
fn showing_twice_keeps_one_part_set() {
    let mut f = fixture(ShowcaseConfig::default());
    f.showcase.show(&mut f.host, true);
    let first = f.showcase.active_tween().unwrap();
    f.showcase.show(&mut f.host, true);

    assert_eq!(f.host.attached_count(), 1);
    assert!(f.host.events().contains(&HostEvent::TweenCancelled(first)));
    assert_eq!(f.host.pending_tweens().len(), 1);
    assert_eq!(f.showcase.phase(), AnimationPhase::ComingIn);
}

#[test]
fn target_mode_with_transparent_holder_never_dismisses_on_target() {
    let config = ShowcaseConfig::default()
        .with_tap_target(TapTarget::Target)
        .with_holder_color(Color::TRANSPARENT);
    let mut f = fixture(config).pulsing();
    assert!(f.showcase.scene().unwrap().target_copy.is_none());
    assert!(f.tap(TARGET.center()).is_empty());
    assert!(f.tap(Point::new(10.0, 10.0)).is_empty());
    assert_eq!(f.showcase.phase(), AnimationPhase::Pulsing);
}

#[test]
fn target_mode_dismisses_on_target_copy_only() {
    let config = ShowcaseConfig::default().with_tap_target(TapTarget::Target);
    let mut f = fixture(config).pulsing();
    assert!(f.tap(Point::new(10.0, 10.0)).is_empty());
    assert_eq!(
        f.tap(TARGET.center()),
        [ShowcaseEvent::WillDismiss { skipped: false }]
    );
}

#[test]
fn target_copy_stays_tappable_when_panel_fills_safe_area() {
    let config = ShowcaseConfig::default()
        .with_shape(TargetShape::None)
        .with_tap_target(TapTarget::Target);
    let mut f = fixture(config).pulsing();
    assert!(f.panel_frame().contains(TARGET.center()));
    assert!(f.tap(Point::new(50.0, 400.0)).is_empty());
    assert_eq!(
        f.tap(TARGET.center()),
        [ShowcaseEvent::WillDismiss { skipped: false }]
    );
}

#[test]
fn all_mode_dismisses_anywhere() {
    let config = ShowcaseConfig::default().with_tap_target(TapTarget::All);
    let mut f = fixture(config).pulsing();
    assert_eq!(
        f.tap(Point::new(10.0, 10.0)),
        [ShowcaseEvent::WillDismiss { skipped: false }]
    );
}

#[test]
fn none_mode_only_listens_to_actions() {
    let mut f = fixture(ShowcaseConfig::default()).pulsing();
    assert!(f.tap(Point::new(10.0, 10.0)).is_empty());
    assert!(f.tap(TARGET.center()).is_empty());

    let scene = f.showcase.scene().unwrap();
    let skip = scene.panel.to_surface(scene.panel.skip.frame).center();
    assert_eq!(f.tap(skip), [ShowcaseEvent::WillDismiss { skipped: true }]);
}

#[test]
fn next_dismisses_unskipped() {
    let mut f = fixture(ShowcaseConfig::default()).pulsing();
    let scene = f.showcase.scene().unwrap();
    let next = scene.panel.to_surface(scene.panel.next.frame).center();
    assert_eq!(f.tap(next), [ShowcaseEvent::WillDismiss { skipped: false }]);
    assert_eq!(f.finish(), [ShowcaseEvent::DidDismiss { skipped: false }]);
}

#[test]
fn empty_actions_make_the_panel_inert() {
    let config = ShowcaseConfig::default()
        .with_tap_target(TapTarget::All)
        .with_next_text("")
        .with_skip_text("");
    let mut f = fixture(config).pulsing();
    let scene = f.showcase.scene().unwrap();
    assert!(!scene.panel.interactive);
    assert!(!scene.panel.next.interactive);
    assert!(!scene.panel.skip.interactive);

    let panel = f.panel_frame();
    for point in [
        panel.center(),
        Point::new(panel.x0 + 1.0, panel.y1 - 1.0),
        Point::new(panel.x1 - 1.0, panel.y1 - 1.0),
    ] {
        assert!(f.tap(point).is_empty(), "{point:?}");
    }
    // Outside the panel the catcher still works.
    assert_eq!(
        f.tap(Point::new(10.0, 10.0)),
        [ShowcaseEvent::WillDismiss { skipped: false }]
    );
}

#[test]
fn dark_background_asks_for_light_status_bar() {
    let dark = Color::from_rgba8(0x1A, 0x23, 0x7E, 0xFF);
    let f = fixture(ShowcaseConfig::default().with_background_color(dark)).pulsing();
    assert_eq!(f.host.current_status_bar(), StatusBarStyle::LightContent);
}

#[test]
fn status_bar_follows_background_and_is_restored() {
    let config = ShowcaseConfig::default().with_background_color(Color::WHITE);
    let mut f = fixture(config);
    f.host.set_status_bar_style(StatusBarStyle::LightContent, false);
    let mut f = f.pulsing();
    assert_eq!(f.host.current_status_bar(), StatusBarStyle::Default);

    f.showcase.complete(&mut f.host, true, false);
    assert_eq!(f.host.current_status_bar(), StatusBarStyle::LightContent);
    assert_eq!(f.finish(), [ShowcaseEvent::DidDismiss { skipped: false }]);
    assert_eq!(f.host.current_status_bar(), StatusBarStyle::LightContent);
}

#[test]
fn accent_colors_the_copy_and_dim_layer() {
    let accent = Color::from_rgba8(0xE9, 0x1E, 0x63, 0xFF);
    let mut f = fixture(ShowcaseConfig::default());
    f.host.set_foreground(f.button, accent);
    f.showcase.set_target(&f.host, &TargetRef::Button(f.button));
    f.showcase.show(&mut f.host, false);

    let scene = f.showcase.scene().unwrap();
    let copy = &scene.target_copy.as_ref().unwrap().node;
    assert_eq!(copy.template_image, Some(accent));
    assert_eq!(copy.text_color, Some(accent));
    assert_eq!(copy.enabled, Some(true));
    assert_eq!(scene.background.visual.color, accent.with_alpha(0.96));

    // Explicit configuration wins over the accent.
    let tint = Color::from_rgba8(0, 0, 0, 0xFF);
    f.showcase.config_mut().target_tint_color = Some(tint);
    f.showcase.show(&mut f.host, false);
    let scene = f.showcase.scene().unwrap();
    let copy = &scene.target_copy.as_ref().unwrap().node;
    assert_eq!(copy.tint, Some(tint));
}

#[test]
fn relayout_tracks_resizes_and_restarts_pulse() {
    let mut f = fixture(ShowcaseConfig::default()).pulsing();
    let old_pulse = f.showcase.active_tween().unwrap();

    let landscape = Rect::new(0.0, 0.0, 800.0, 400.0);
    let metrics = SurfaceMetrics {
        bounds: landscape,
        safe_area: Insets::new(44.0, 0.0, 44.0, 21.0),
        screen: landscape,
    };
    f.host.set_surface_metrics(f.window, metrics);
    f.host.set_frame(f.button, Rect::new(380.0, 300.0, 420.0, 340.0));
    f.showcase.relayout(&mut f.host);

    assert_eq!(f.showcase.phase(), AnimationPhase::Pulsing);
    let cancelled = HostEvent::TweenCancelled(old_pulse);
    assert!(f.host.events().contains(&cancelled));
    let new_pulse = f.showcase.active_tween().unwrap();
    assert_ne!(new_pulse, old_pulse);
    let pending = f.host.pending_tweens();
    assert!(pending.iter().any(|(id, t)| *id == new_pulse && t.repeat));

    let geometry = f.showcase.geometry().unwrap();
    assert_eq!(geometry.center, Point::new(400.0, 320.0));
    assert_eq!(geometry.panel_frame.x0, 44.0);
    assert_eq!(geometry.panel_frame.x1, 756.0);
    assert_eq!(geometry.panel_frame.y1, 300.0);
    let presented = f.host.attached(f.window).unwrap();
    assert_eq!(presented.bounds, landscape);
    let copy = presented.target_copy.as_ref().unwrap();
    assert_eq!(copy.node.source, f.button);
    assert_eq!(copy.frame, Rect::new(380.0, 300.0, 420.0, 340.0));
    assert_eq!(f.host.attached_count(), 1);
}

#[test]
fn relayout_copies_a_target_changed_while_shown() {
    let mut f = fixture(ShowcaseConfig::default()).pulsing();
    let frame = Rect::new(40.0, 600.0, 100.0, 640.0);
    let icon = f.host.add_element(f.window, frame, NodeRole::Image);
    f.showcase.set_target(&f.host, &TargetRef::Element(icon));
    f.showcase.relayout(&mut f.host);

    let copy = f.showcase.scene().unwrap().target_copy.as_ref().unwrap();
    assert_eq!(copy.node.source, icon);
    assert_eq!(copy.node.role, NodeRole::Image);
    assert_eq!(copy.frame, frame);
    let presented = f.host.attached(f.window).unwrap();
    assert_eq!(presented.target_copy.as_ref().unwrap().node.source, icon);
}

#[test]
fn relayout_is_ignored_when_not_shown() {
    let mut f = fixture(ShowcaseConfig::default());
    f.showcase.relayout(&mut f.host);
    assert!(f.host.events().is_empty());
    assert!(f.showcase.scene().is_none());
}

#[test]
fn controller_is_reusable_after_dismissal() {
    let mut f = fixture(ShowcaseConfig::default()).pulsing();
    f.showcase.complete(&mut f.host, false, false);
    assert_eq!(f.showcase.phase(), AnimationPhase::Dismissed);
    f = f.pulsing();
    assert_eq!(f.host.attached_count(), 1);
}
