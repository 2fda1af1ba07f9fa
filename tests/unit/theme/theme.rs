use super::*;

#[test]
fn reads_all_properties() {
    let style = StyleSheet::default()
        .with_property(PROP_ACCENT, "56, 189, 248")
        .with_property(PROP_ACCENT_2, "167, 139, 250")
        .with_property(PROP_INK, "15, 23, 42")
        .with_property(PROP_MUTED, "148, 163, 184")
        .with_property(PROP_WARM, "248, 113, 113")
        .with_property(PROP_COOL, "96, 165, 250")
        .with_body_background("rgb(250, 250, 247)");
    let theme = Theme::read(&style);
    assert_eq!(theme.accent, Rgb8::new(56, 189, 248));
    assert_eq!(theme.accent_2, Rgb8::new(167, 139, 250));
    assert_eq!(theme.ink, Rgb8::new(15, 23, 42));
    assert_eq!(theme.muted, Rgb8::new(148, 163, 184));
    assert_eq!(theme.warm, Rgb8::new(248, 113, 113));
    assert_eq!(theme.cool, Rgb8::new(96, 165, 250));
    assert_eq!(theme.background, Rgb8::new(250, 250, 247));
}

#[test]
fn missing_and_malformed_values_fall_back() {
    let style = StyleSheet::default()
        .with_property(PROP_ACCENT, "not a color")
        .with_body_background("transparent");
    let theme = Theme::read(&style);
    assert_eq!(theme.accent, Rgb8::BLACK);
    assert_eq!(theme.ink, Rgb8::BLACK);
    assert_eq!(theme.background, Rgb8::WHITE);

    let theme = Theme::read(&StyleSheet::default());
    assert_eq!(theme.background, Rgb8::WHITE);
}
