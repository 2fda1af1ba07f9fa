use super::*;
use crate::foundation::core::Insets;

fn layout() -> HostLayout {
    HostLayout::new(100.0, 50.0, 200.0, 100.0)
}

#[test]
fn pointer_percent_is_relative_and_clamped() {
    let l = layout();
    assert_eq!(pointer_percent(&l, Point::new(150.0, 75.0)), (25.0, 25.0));
    assert_eq!(pointer_percent(&l, Point::new(0.0, 500.0)), (0.0, 100.0));
    let flat = HostLayout::new(0.0, 0.0, 0.0, 10.0);
    assert_eq!(pointer_percent(&flat, Point::new(5.0, 5.0)), (0.0, 50.0));
}

#[test]
fn side_channel_formats_two_decimals() {
    let mut doc = Document::new();
    let id = doc
        .create_host(layout().with_padding(Insets::uniform(8.0)))
        .effect("glow-matrix")
        .with_text()
        .id();
    let mut rt = HoverRuntime::new(doc, FxConfig::default()).unwrap();
    assert_eq!(rt.attach_all(), 1);

    rt.pointer_move(id, Point::new(166.666, 80.0));
    let host = rt.document().get(id).unwrap();
    assert_eq!(host.style_property(PROP_POINTER_X), Some("33.33%"));
    assert_eq!(host.style_property(PROP_POINTER_Y), Some("30.00%"));
    assert!(rt.controller(id).is_none());
}

#[test]
fn attach_skips_unknown_and_repeats() {
    let mut doc = Document::new();
    let known = doc.create_host(layout()).effect("molecules").with_canvas().id();
    let unknown = doc.create_host(layout()).effect("sparkles").id();
    let empty = doc.create_host(layout()).effect("").id();
    let bare = doc.create_host(layout()).id();
    let mut rt = HoverRuntime::new(doc, FxConfig::default()).unwrap();

    assert_eq!(rt.attach_all(), 1);
    assert_eq!(rt.attach_all(), 0);
    assert!(rt.is_attached(known));
    for id in [unknown, empty, bare] {
        assert!(!rt.is_attached(id));
        rt.pointer_enter(id, Point::new(120.0, 60.0));
        assert!(rt.controller(id).is_none());
    }
    assert_eq!(rt.controllers_created(), 0);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = FxConfig {
        grace_period_ms: -1.0,
        ..FxConfig::default()
    };
    assert!(HoverRuntime::new(Document::new(), cfg).is_err());
}
