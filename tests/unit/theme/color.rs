use super::*;

#[test]
fn triple_parses_with_whitespace() {
    assert_eq!(parse_rgb_triple("56, 189, 248"), Rgb8::new(56, 189, 248));
    assert_eq!(parse_rgb_triple(" 1,2 ,3 "), Rgb8::new(1, 2, 3));
    assert_eq!(parse_rgb_triple("300, -4, 12.6"), Rgb8::new(255, 0, 13));
}

#[test]
fn triple_falls_back_to_black() {
    for bad in ["", "1,2", "1,2,3,4", "a,b,c", "1,,3", "NaN, 1, 2", "inf,1,2"] {
        assert_eq!(parse_rgb_triple(bad), Rgb8::BLACK, "input {bad:?}");
    }
}

#[test]
fn css_rgb_parses_legacy_and_modern_syntax() {
    assert_eq!(parse_css_rgb("rgb(12, 34, 56)"), Rgb8::new(12, 34, 56));
    assert_eq!(parse_css_rgb("rgba(12, 34, 56, 0.5)"), Rgb8::new(12, 34, 56));
    assert_eq!(parse_css_rgb("RGB(1 2 3 / 40%)"), Rgb8::new(1, 2, 3));
    assert_eq!(parse_css_rgb("rgb(100%, 0%, 50%)"), Rgb8::new(255, 0, 128));
}

#[test]
fn css_rgb_falls_back_to_white() {
    for bad in ["", "transparent", "#fff", "rgb(1, 2)", "rgb(1, 2, 3", "hsl(1, 2%, 3%)"] {
        assert_eq!(parse_css_rgb(bad), Rgb8::WHITE, "input {bad:?}");
    }
}
