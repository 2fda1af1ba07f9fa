use super::*;

#[test]
fn lerp_endpoints_and_rounding() {
    let a = Rgb8::new(0, 100, 255);
    let b = Rgb8::new(255, 101, 0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    // 127.5 rounds half away from zero.
    assert_eq!(a.lerp(b, 0.5), Rgb8::new(128, 101, 128));
}

#[test]
fn lerp_clamps_t() {
    let a = Rgb8::BLACK;
    let b = Rgb8::WHITE;
    assert_eq!(a.lerp(b, -3.0), a);
    assert_eq!(a.lerp(b, 7.0), b);
}

#[test]
fn with_alpha_scales_to_u8() {
    assert_eq!(Rgb8::new(1, 2, 3).with_alpha(1.0), [1, 2, 3, 255]);
    assert_eq!(Rgb8::new(1, 2, 3).with_alpha(0.0), [1, 2, 3, 0]);
    assert_eq!(Rgb8::new(1, 2, 3).with_alpha(0.5)[3], 128);
}

#[test]
fn insets_sums() {
    let i = Insets {
        top: 1.0,
        right: 2.0,
        bottom: 3.0,
        left: 4.0,
    };
    assert_eq!(i.horizontal(), 6.0);
    assert_eq!(i.vertical(), 4.0);
    assert_eq!(Insets::uniform(8.0).horizontal(), 16.0);
}
