//! Construction, readiness, configuration updates and listeners.

use slidekit_core::{ConfigError, EventKind, SliderBuilder, SliderConfig, SliderEvent, SliderHost};
use slidekit_test::{Harness, LinearHost};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_yaml_config_drives_layout() {
    let yaml = "
carousel: true
panelsVisible: 2
slideFirst: -1
fps: 60
";
    let config = SliderConfig::from_yaml_str(yaml).unwrap();
    let harness = Harness::with_config(6, 100.0, config);

    let plan = *harness.slider().clone_plan();
    assert_eq!((plan.before, plan.after), (1, 1));
    harness.assert_position(5.0).assert_current_slide(5);
    assert_eq!(SliderHost::viewport_width(harness.host()), 200.0);
}

#[test]
fn test_extreme_slide_first_is_normalized() {
    let yaml = "carousel: true\nslideFirst: 9223372036854775807\n";
    let config = SliderConfig::from_yaml_str(yaml).unwrap();
    Harness::with_config(6, 100.0, config)
        .assert_position(1.0)
        .assert_current_slide(1);

    let yaml = "carousel: true\nslideFirst: -9223372036854775808\n";
    let config = SliderConfig::from_yaml_str(yaml).unwrap();
    Harness::with_config(6, 100.0, config).assert_current_slide(4);

    let config = SliderConfig {
        slide_first: i64::MAX,
        ..SliderConfig::default()
    };
    Harness::with_config(6, 100.0, config).assert_position(5.0);
}

#[test]
fn test_invalid_documents() {
    assert!(matches!(
        SliderConfig::from_json_str("{\"fps\": \"fast\"}"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        SliderConfig::from_yaml_str("carousel: [oops"),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn test_ready_emitted_once() {
    let mut harness = Harness::new(2, 100.0);
    harness.slider_mut().mark_ready();
    harness.slider_mut().mark_ready();
    assert!(harness.slider().state().ready);
    harness.assert_event_kinds(&[EventKind::Loading, EventKind::Ready]);
}

#[test]
fn test_update_relayouts_and_commits_position() {
    let config = SliderConfig {
        slide_first: 3,
        ..SliderConfig::default()
    };
    let mut harness = Harness::with_config(4, 100.0, config);
    harness.clear_events();

    assert!(harness.slider_mut().update(|c| {
        c.carousel = true;
        c.panels_visible = 2.0;
    }));
    harness.assert_event_kinds(&[EventKind::Updating, EventKind::Layout]);
    assert_eq!(harness.slider().range().panel_min(), 1);
    assert_eq!(harness.host().positions(), vec![3.0]);

    assert!(harness.slider_mut().update(|c| c.panels_visible = f64::NAN));
    assert_eq!(harness.slider().config().panels_visible, 1.0);
}

#[test]
fn test_update_refused_during_gesture() {
    let mut harness = Harness::new(4, 100.0);
    harness.press(50.0, 50.0);
    assert!(!harness.slider_mut().update(|c| c.carousel = true));
    assert!(!harness.slider().config().carousel);

    harness.release();
    assert!(harness.slider_mut().update(|c| c.carousel = true));
    assert!(harness.slider().config().carousel);
}

#[test]
fn test_filtered_listeners() {
    let stops = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&stops);
    let builder = SliderBuilder::new(5)
        .configure(|c| c.slide_first = 2)
        .on(EventKind::Stop, move |event| sink.borrow_mut().push(event.clone()));
    let mut harness = Harness::from_builder(builder, LinearHost::new(300.0), None);

    harness
        .press(200.0, 100.0)
        .drag_to(170.0, 100.0)
        .drag_to(140.0, 100.0)
        .release();

    assert_eq!(
        *stops.borrow(),
        vec![SliderEvent::Stop {
            x: 140.0,
            y: 100.0,
            was_drag: true
        }]
    );
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let mut harness = Harness::new(3, 100.0);
    let id = harness
        .slider_mut()
        .events_mut()
        .subscribe(EventKind::Start, move |_| *sink.borrow_mut() += 1);

    harness.press(10.0, 10.0).release();
    assert!(harness.slider_mut().events_mut().unsubscribe(id));
    harness.press(10.0, 10.0).release();

    assert_eq!(*count.borrow(), 1);
}
