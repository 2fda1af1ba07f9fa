use super::*;

fn scene() -> SceneDef {
    SceneDef::from_json_str(
        r#"{
      "hosts": [
        { "key": "math", "x": 0, "y": 0, "width": 220, "height": 120,
          "padding": { "top": 8, "right": 8, "bottom": 8, "left": 8 },
          "effect": "glow-matrix" },
        { "key": "field", "x": 240, "y": 0, "width": 200, "height": 100,
          "effect": "vector-field" },
        { "key": "plain", "x": 480, "y": 0, "width": 100, "height": 100 }
      ],
      "theme": { "body_background": "rgb(10, 20, 30)" },
      "glyph_advance": 7.0,
      "script": [
        { "at_ms": 0, "event": "enter", "host": "math", "x": 30, "y": 30 },
        { "at_ms": 300, "event": "leave", "host": "math" },
        { "at_ms": 100, "event": "enter", "host": "field", "x": 300, "y": 50 },
        { "at_ms": 150, "event": "move", "host": "field", "x": 320, "y": 60 }
      ]
    }"#,
    )
    .unwrap()
}

#[test]
fn builds_hosts_in_scene_order() {
    let p = ScenePlayer::new(scene()).unwrap();
    assert_eq!(p.host_id("math"), Some(HostId(0)));
    assert_eq!(p.host_id("plain"), Some(HostId(2)));
    assert!(p.runtime().is_attached(HostId(0)));
    assert!(p.runtime().is_attached(HostId(1)));
    assert!(!p.runtime().is_attached(HostId(2)));
    assert_eq!(p.background(), Rgb8::new(10, 20, 30));
    assert_eq!(p.script_end_ms(), 300.0);

    let snap = p.snapshot();
    assert_eq!(snap.frames.len(), 2);
    assert_eq!(snap.frames[0].content, FrameContent::Text(String::new()));
}

#[test]
fn replays_steps_in_time_order() {
    let mut p = ScenePlayer::new(scene()).unwrap();
    p.advance_to(200.0);
    let snap = p.snapshot();
    assert_eq!(snap.at_ms, 200.0);

    let FrameContent::Text(text) = &snap.frames[0].content else {
        panic!("expected text");
    };
    assert_eq!(text.lines().count(), 8);
    assert!(text.lines().all(|l| l.chars().count() == 29));

    let FrameContent::Raster {
        width,
        height,
        rgba,
    } = &snap.frames[1].content
    else {
        panic!("expected raster");
    };
    assert_eq!((*width, *height), (200, 100));
    assert_eq!(rgba.len(), 200 * 100 * 4);
    assert!(rgba.chunks_exact(4).all(|px| px[3] == 255));
    assert!(rgba.chunks_exact(4).any(|px| px[..3] != [10, 20, 30]));
    assert_eq!(p.runtime().controllers_created(), 2);
}

#[test]
fn leave_clears_text_after_grace() {
    let mut p = ScenePlayer::new(scene()).unwrap();
    p.advance_to(300.0 + 259.0);
    let FrameContent::Text(text) = &p.snapshot().frames[0].content else {
        panic!("expected text");
    };
    assert!(!text.is_empty());

    p.advance_to(300.0 + 260.0);
    assert_eq!(
        p.snapshot().frames[0].content,
        FrameContent::Text(String::new())
    );
}

#[test]
fn replay_is_deterministic() {
    let mut a = ScenePlayer::new(scene()).unwrap();
    let mut b = ScenePlayer::new(scene()).unwrap();
    a.advance_to(250.0);
    b.advance_to(120.0);
    b.advance_to(250.0);
    assert_eq!(a.snapshot(), b.snapshot());
}
