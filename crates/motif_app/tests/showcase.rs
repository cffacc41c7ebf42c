//! End-to-end showcase scenario

use std::time::Duration;

use motif_app::prelude::*;
use motif_layout::ElementKind;

const TICK: Duration = Duration::from_millis(500);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("motif_app=debug")
        .try_init();
}

#[test]
fn test_showcase_session() {
    init_tracing();

    let mut app = ShowcaseApp::new();
    app.mount();
    assert_eq!(app.mounted(), WidgetKind::ALL.to_vec());

    let frame = app.frame().unwrap();
    let order: Vec<_> = frame
        .root
        .children
        .iter()
        .map(|child| child.key.clone().unwrap_or_default())
        .collect();
    assert_eq!(order, WidgetKind::names());
    assert!(!frame.animating);

    app.appear_all();
    assert!(app.is_animating());
    assert_eq!(app.timer_count(), 1);

    for _ in 0..10 {
        app.advance(TICK);
    }
    assert_eq!(app.now(), Duration::from_secs(5));

    let frame = app.frame().unwrap();
    let label = frame.node(WidgetKind::ProgressLoader, "label").unwrap();
    assert_eq!(label.kind, ElementKind::Text("50%".into()));
    let progress = &frame.widget(WidgetKind::ProgressLoader).unwrap().state;
    assert_eq!(progress["progress"], StateValue::Number(0.5));
    assert!(frame.node(WidgetKind::SpinLoader, "arc").unwrap().animating);
    assert!(frame.node(WidgetKind::DotLoader, "dot4").unwrap().animating);

    app.tap(WidgetKind::ScaleEffect).unwrap();
    let summary = app.summary(WidgetKind::ScaleEffect).unwrap();
    for flag in ["circle_color_changed", "car_color_changed", "car_size_changed"] {
        assert_eq!(summary[flag], StateValue::Bool(true), "{flag}");
    }
}

#[test]
fn test_untapped_widgets_stay_still() {
    let mut app = ShowcaseApp::new();
    app.mount();
    app.advance(Duration::from_secs(2));

    let frame = app.frame().unwrap();
    assert!(!frame.animating);
    assert_eq!(app.timer_count(), 0);

    let car = frame.node(WidgetKind::ScaleEffect, "car").unwrap();
    assert_eq!(car.scale, 1.0);
    let label = frame.node(WidgetKind::ProgressLoader, "label").unwrap();
    assert_eq!(label.kind, ElementKind::Text("0%".into()));
}

#[test]
fn test_parse_widget_names() {
    assert_eq!("dot".parse::<WidgetKind>().unwrap(), WidgetKind::DotLoader);
    assert!(matches!(
        "slider".parse::<WidgetKind>(),
        Err(ShowcaseError::UnknownWidget(name)) if name == "slider"
    ));
}
