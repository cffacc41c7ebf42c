//! Runtime tests for motif_app
//!
//! Drive the full app on the virtual clock and check what the resolved
//! frames present.

use std::time::Duration;

use motif_animation::Interpolate;
use motif_core::Size;
use motif_layout::ElementKind;

use crate::prelude::*;
use crate::widget::StateValue;

const FRAME: Duration = Duration::from_micros(16_667);

fn running_app() -> ShowcaseApp {
    let mut app = ShowcaseApp::new();
    app.mount();
    app.appear_all();
    app
}

fn run(app: &mut ShowcaseApp, secs: f32) {
    let frames = (secs / FRAME.as_secs_f32()).round() as u32;
    for _ in 0..frames {
        app.advance(FRAME);
    }
}

#[test]
fn test_spinner_rotates_continuously() {
    let mut app = running_app();
    app.advance(Duration::from_millis(250));
    let frame = app.frame().unwrap();
    let arc = frame.node(WidgetKind::SpinLoader, "arc").unwrap();
    assert!((arc.rotation - 90.0).abs() < 0.5, "rotation {}", arc.rotation);

    // Second turn: wraps back to the start instead of reversing
    app.advance(Duration::from_millis(1000));
    let frame = app.frame().unwrap();
    let arc = frame.node(WidgetKind::SpinLoader, "arc").unwrap();
    assert!((arc.rotation - 90.0).abs() < 0.5, "rotation {}", arc.rotation);
    assert!(arc.animating);

    // Re-firing appearance keeps the running rotation
    app.appear(WidgetKind::SpinLoader).unwrap();
    app.advance(Duration::from_millis(250));
    let frame = app.frame().unwrap();
    let arc = frame.node(WidgetKind::SpinLoader, "arc").unwrap();
    assert!((arc.rotation - 180.0).abs() < 0.5, "rotation {}", arc.rotation);
}

#[test]
fn test_dots_pulse_with_stagger() {
    let mut app = running_app();
    app.advance(Duration::from_millis(300));
    let frame = app.frame().unwrap();

    let scale = |i: usize| {
        frame
            .node(WidgetKind::DotLoader, &format!("dot{i}"))
            .unwrap()
            .scale
    };
    // Dot 0 is half-way down, dot 1 has just started, the rest still wait
    assert!((scale(0) - 0.5).abs() < 1e-3, "dot0 {}", scale(0));
    assert!((scale(1) - (1.0 - 0.1 / 0.6)).abs() < 1e-3, "dot1 {}", scale(1));
    for i in 2..5 {
        assert_eq!(scale(i), 1.0);
    }
}

#[test]
fn test_morphing_springs_then_settles() {
    let mut app = running_app();
    app.tap(WidgetKind::Morphing).unwrap();

    run(&mut app, 0.1);
    let frame = app.frame().unwrap();
    let button = frame.node(WidgetKind::Morphing, "button").unwrap();
    let width = button.frame.unwrap().width;
    assert!(width < 250.0 && width > 60.0, "width {width}");
    assert!(button.animating);
    // Layout follows the presented size
    assert!((button.bounds.size.width - width).abs() < 1e-3);

    run(&mut app, 3.0);
    let frame = app.frame().unwrap();
    let button = frame.node(WidgetKind::Morphing, "button").unwrap();
    assert_eq!(button.frame, Some(Size::new(60.0, 60.0)));
    assert_eq!(button.corner_radius, 30.0);
    assert!(!button.animating);

    // The play-driven properties keep pulsing
    let mic = frame.node(WidgetKind::Morphing, "mic").unwrap();
    assert!(mic.animating);
    let caption = frame.node(WidgetKind::Morphing, "caption").unwrap();
    assert_eq!(caption.kind, ElementKind::Text("Recording...".into()));
    assert!(caption.animating);
}

#[test]
fn test_play_animation_waits_for_delay() {
    let mut app = running_app();
    app.tap(WidgetKind::Morphing).unwrap();
    run(&mut app, 0.4);

    let frame = app.frame().unwrap();
    assert_eq!(frame.node(WidgetKind::Morphing, "mic").unwrap().scale, 1.0);
    assert_eq!(frame.node(WidgetKind::Morphing, "caption").unwrap().opacity, 1.0);
}

#[test]
fn test_scale_effect_blends_gradient() {
    let mut app = running_app();
    app.tap(WidgetKind::ScaleEffect).unwrap();
    run(&mut app, 0.1);

    let frame = app.frame().unwrap();
    let circle = frame.node(WidgetKind::ScaleEffect, "circle").unwrap();
    let fill = circle.fill.clone().unwrap();
    let first = crate::widgets::scale_effect::first_gradient();
    let second = crate::widgets::scale_effect::second_gradient();
    assert!(!fill.approx_eq(&first, 1e-3));
    assert!(!fill.approx_eq(&second, 1e-3));

    run(&mut app, 0.5);
    let frame = app.frame().unwrap();
    let circle = frame.node(WidgetKind::ScaleEffect, "circle").unwrap();
    assert_eq!(circle.fill, Some(first));
}

#[test]
fn test_progress_completes_and_stops() {
    let mut app = running_app();
    assert_eq!(app.timer_count(), 1);
    app.advance(Duration::from_secs(12));

    let frame = app.frame().unwrap();
    let state = &frame.widget(WidgetKind::ProgressLoader).unwrap().state;
    assert_eq!(state["percent"], StateValue::Number(100.0));
    assert_eq!(state["timer_active"], StateValue::Bool(false));
    assert_eq!(app.timer_count(), 0);

    let arc = frame.node(WidgetKind::ProgressLoader, "arc").unwrap();
    assert_eq!(arc.trim_end, 1.0);
    assert_eq!(arc.rotation, -90.0);
}

#[test]
fn test_unmount_releases_resources() {
    let mut app = running_app();
    let signals = app.signal_count();
    app.advance(Duration::from_secs(1));

    app.unmount(WidgetKind::ProgressLoader).unwrap();
    assert_eq!(app.timer_count(), 0);
    assert_eq!(app.signal_count(), signals - 2);
    assert!(app.frame().unwrap().root.find("progress_loader").is_none());

    assert!(matches!(
        app.tap(WidgetKind::ProgressLoader),
        Err(ShowcaseError::NotMounted(WidgetKind::ProgressLoader))
    ));
    assert!(app.unmount(WidgetKind::ProgressLoader).is_err());
}

#[test]
fn test_remount_starts_fresh() {
    let mut app = running_app();
    app.tap(WidgetKind::Morphing).unwrap();
    app.unmount(WidgetKind::Morphing).unwrap();
    app.mount_widget(WidgetKind::Morphing);

    assert_eq!(app.mounted(), WidgetKind::ALL.to_vec());
    let summary = app.summary(WidgetKind::Morphing).unwrap();
    assert_eq!(summary["is_stop"], StateValue::Bool(false));
    assert_eq!(summary["is_play"], StateValue::Bool(false));
}

#[test]
fn test_frame_exports() {
    let mut app = running_app();
    run(&mut app, 0.5);
    let frame = app.frame().unwrap();

    assert_eq!(frame.size.width, 390.0);
    assert!(frame.size.height >= 844.0);

    let json = frame.to_json().unwrap();
    assert!(json.contains("\"scale_effect\""));
    assert!(json.contains("\"is_dot_loading\": true"));

    let svg = frame.to_svg().unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("linearGradient"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_widgets_stack_vertically_in_order() {
    let app = running_app();
    let frame = app.frame().unwrap();

    let tops: Vec<f32> = WidgetKind::ALL
        .iter()
        .map(|k| frame.root.find(k.name()).unwrap().bounds.origin.y)
        .collect();
    assert!(tops.windows(2).all(|w| w[0] < w[1]), "tops {tops:?}");
}
