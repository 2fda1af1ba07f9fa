use crate::foundation::core::Rgb8;

/// Parse a comma-separated numeric triple such as `"56, 189, 248"`.
///
/// Anything other than exactly three finite numbers yields [`Rgb8::BLACK`]. Components are
/// clamped to `[0, 255]` and rounded.
pub fn parse_rgb_triple(s: &str) -> Rgb8 {
    let mut out = [0u8; 3];
    let mut n = 0usize;
    for part in s.split(',') {
        if n == 3 {
            return Rgb8::BLACK;
        }
        let Some(v) = parse_channel(part.trim()) else {
            return Rgb8::BLACK;
        };
        out[n] = v;
        n += 1;
    }
    if n != 3 {
        return Rgb8::BLACK;
    }
    Rgb8::from(out)
}

/// Parse a computed `rgb(...)` / `rgba(...)` color string, ignoring alpha.
///
/// Accepts both the legacy comma syntax and the space/slash syntax. Anything unparseable yields
/// [`Rgb8::WHITE`].
pub fn parse_css_rgb(s: &str) -> Rgb8 {
    let s = s.trim().to_ascii_lowercase();
    let inner = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'));
    let Some(inner) = inner else {
        return Rgb8::WHITE;
    };

    let mut channels = inner
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let mut out = [0u8; 3];
    for slot in &mut out {
        let Some(v) = channels.next().and_then(parse_channel) else {
            return Rgb8::WHITE;
        };
        *slot = v;
    }
    Rgb8::from(out)
}

fn parse_channel(s: &str) -> Option<u8> {
    let (num, scale) = match s.strip_suffix('%') {
        Some(pct) => (pct.trim(), 255.0 / 100.0),
        None => (s, 1.0),
    };
    if num.is_empty() {
        return None;
    }
    let v: f64 = num.parse().ok()?;
    if !v.is_finite() {
        return None;
    }
    Some((v * scale).round().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/theme/color.rs"]
mod tests;
