//! Drag, scroll and tap scenarios against a linear host.

use slidekit_core::{Easing, EventKind, LinearFit, Point, SliderBuilder, SliderConfig};
use slidekit_test::{Harness, LinearHost, TimerCall};
use std::time::Duration;

fn config_at(slide: i64) -> SliderConfig {
    SliderConfig {
        slide_first: slide,
        ..SliderConfig::default()
    }
}

#[test]
fn test_fast_drag_advances_one_slide() {
    let mut harness = Harness::with_config(5, 300.0, config_at(2));
    harness.press(200.0, 100.0);
    harness.drag_to(170.0, 100.0).assert_position(2.1);
    harness.drag_to(140.0, 100.0).assert_position(2.2);
    harness.drag_to(110.0, 100.0).assert_position(2.3);
    assert_eq!(harness.last_move_suppressed(), Some(true));

    harness.release();
    let release = harness.last_release().unwrap();
    assert!(release.was_drag);
    assert!((release.velocity.velocity + 1.3125).abs() < 1e-9);
    assert_eq!(release.velocity.direction, -1.0);
    assert!((release.inertia - 0.65625f64.sqrt()).abs() < 1e-9);
    assert!((release.offset - 0.7).abs() < 1e-9);

    let animation = release.animation.unwrap();
    assert!(animation.relative);
    assert_eq!(animation.easing, Easing::ExpoOut);
    assert_eq!(animation.duration, Duration::from_millis(1200));
    assert_eq!(harness.host().last_animation(), Some(animation));

    harness.settle().assert_position(3.0).assert_current_slide(3);
}

#[test]
fn test_slow_drag_bounces_back() {
    let mut harness = Harness::with_config(5, 300.0, config_at(2)).frame_interval(100);
    harness
        .press(200.0, 0.0)
        .drag_to(190.0, 0.0)
        .drag_to(180.0, 0.0)
        .drag_to(170.0, 0.0)
        .release();

    let release = harness.last_release().unwrap();
    assert!((release.velocity.speed - 0.07).abs() < 1e-9);
    assert!((release.offset + 0.1).abs() < 1e-9);

    let animation = release.animation.unwrap();
    assert_eq!(animation.easing, Easing::BounceOut);
    assert_eq!(animation.duration, Duration::from_millis(600));

    harness.settle().assert_position(2.0);
}

#[test]
fn test_vertical_gesture_scrolls() {
    let mut harness = Harness::with_config(5, 300.0, config_at(2));
    harness.press(100.0, 100.0).drag_to(100.0, 130.0);
    assert_eq!(harness.last_move_suppressed(), Some(false));
    harness.drag_to(103.0, 160.0);
    assert_eq!(harness.last_move_suppressed(), Some(false));
    harness.release();

    let release = harness.last_release().unwrap();
    assert!(!release.was_drag);
    assert_eq!(release.offset, 0.0);
    let animation = release.animation.unwrap();
    assert_eq!(animation.easing, Easing::Linear);
    assert_eq!(animation.duration, Duration::ZERO);

    assert!(harness.host().positions().is_empty());
    harness.assert_position(2.0).assert_locked(false);
}

#[test]
fn test_tap_event_sequence() {
    let mut harness = Harness::new(3, 300.0);
    harness.press(50.0, 50.0).release();

    assert!(!harness.last_release().unwrap().was_drag);
    assert_eq!(harness.host().pause_count(), 1);
    harness.assert_event_kinds(&[
        EventKind::Loading,
        EventKind::AbortAnimation,
        EventKind::Start,
        EventKind::AbortAnimation,
        EventKind::Move,
        EventKind::AbortAnimation,
        EventKind::Finish,
        EventKind::Stop,
    ]);
}

#[test]
fn test_release_at_origin_drops_inertia() {
    let mut harness = Harness::with_config(5, 300.0, config_at(2));
    harness.press(200.0, 0.0).drag_to(100.0, 0.0).release_at(0.0, 0.0);

    let release = harness.last_release().unwrap();
    assert!(release.was_drag);
    assert_eq!(release.velocity.speed, 0.0);
    assert_eq!(release.inertia, 0.0);
    // back to the anchor at 2
    assert!((harness.position() + release.offset - 2.0).abs() < 1e-9);
}

#[test]
fn test_throttled_drag_defers_and_cancels() {
    let mut harness = Harness::throttled(5, 300.0, config_at(2));
    harness.press(200.0, 0.0);

    harness.drag_to(170.0, 0.0).assert_position(2.1);
    harness.drag_to(140.0, 0.0).assert_position(2.1);
    let timers = harness.timers().unwrap().clone();
    assert_eq!(timers.outstanding(), Some(Duration::from_millis(24)));

    harness.drag_to(110.0, 0.0).assert_position(2.1);
    assert_eq!(timers.scheduled(), 1);

    // the deferred redraw fires at 56ms, before the release at 64ms
    harness.release().assert_position(2.3);
    assert_eq!(
        timers.calls(),
        vec![
            TimerCall::Schedule(Duration::from_millis(24)),
            TimerCall::Fired,
            TimerCall::Schedule(Duration::from_millis(40)),
            TimerCall::Cancel,
        ]
    );
    assert_eq!(timers.outstanding(), None);

    let release = harness.last_release().unwrap();
    assert!((release.offset - 0.7).abs() < 1e-9);
}

#[test]
fn test_vsync_draws_every_move() {
    let config = SliderConfig {
        vsync: true,
        ..config_at(1)
    };
    let mut harness = Harness::throttled(5, 300.0, config);
    harness.press(200.0, 0.0);
    harness.drag_to(170.0, 0.0).assert_position(1.1);
    harness.drag_to(140.0, 0.0).assert_position(1.2);
    harness.release();
    assert_eq!(harness.timers().unwrap().scheduled(), 0);
}

#[test]
fn test_press_offsets_follow_viewport_and_container() {
    let host = LinearHost::new(300.0)
        .with_viewport_origin(Point::new(50.0, 0.0))
        .with_container_offset(20.0);
    let mut harness = Harness::from_builder(SliderBuilder::new(5), host, None);
    harness.press(200.0, 10.0);

    let session = harness.slider().gesture().session().unwrap();
    assert!((session.start_drag_anchor_position + 170.0 / 300.0).abs() < 1e-12);
    assert_eq!(session.start_offset_residual, -170.0);
    assert_eq!(session.start_position, 0.0);
}

#[test]
fn test_press_while_locked_replaces_session() {
    let mut harness = Harness::with_config(5, 300.0, config_at(2));
    harness.press(200.0, 0.0).drag_to(170.0, 0.0);
    harness.press(50.0, 0.0).assert_locked(true);

    let session = harness.slider().gesture().session().unwrap();
    assert_eq!(session.start_drag_coord, 50.0);
    assert!((session.start_position - 2.1).abs() < 1e-9);
    assert!(session.samples.is_empty());

    harness.release().assert_locked(false);
    assert!(!harness.last_release().unwrap().was_drag);
}

#[test]
fn test_release_without_press() {
    let mut harness = Harness::new(3, 300.0);
    harness.release_at(10.0, 10.0);
    let release = harness.last_release().unwrap();
    assert!(release.animation.is_none());
    assert!(harness.host().animations().is_empty());
}

#[test]
fn test_long_sample_history_is_capped() {
    let mut harness = Harness::new(40, 100.0).frame_interval(5);
    harness.press(3000.0, 0.0);
    for step in 1..=30 {
        harness.drag_to(3000.0 - f64::from(step) * 10.0, 0.0);
    }
    let session = harness.slider().gesture().session().unwrap();
    assert_eq!(session.samples.len(), 20);
    let fit: LinearFit = session.samples.fit(50.0).unwrap();
    assert!((fit.slope * 50.0 + 2.0).abs() < 1e-9);
}
