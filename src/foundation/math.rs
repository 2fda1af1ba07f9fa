//! Small numeric helpers shared by the renderers.
//!
//! Jitter and noise are closed-form trigonometric functions of their inputs. Nothing here keeps
//! generator state except [`Rng64`], which backs the "random" draws (digits, molecule spawns)
//! and is seeded explicitly so sessions replay identically.

/// Deterministic SplitMix64 generator.
#[derive(Clone, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_01()
    }

    /// Uniform index in `[0, n)`. `n` must be non-zero.
    pub fn index(&mut self, n: usize) -> usize {
        ((self.next_f64_01() * n as f64) as usize).min(n.saturating_sub(1))
    }
}

/// Mix a seed with a per-host salt so hosts sharing a config seed still diverge.
pub fn mix_seed(seed: u64, salt: u64) -> u64 {
    let mut z = seed ^ salt.wrapping_mul(0xD6E8_FEB8_6659_FD93);
    z = (z ^ (z >> 32)).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z ^ (z >> 29)
}

/// Fractional part in `[0, 1)`, also for negative inputs.
#[inline]
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Sine hash of a coordinate pair into `[0, 1)`.
///
/// `fract(sin(x * 12.9898 + y * 78.233) * 43758.5453)`.
#[inline]
pub fn hash2(x: f64, y: f64) -> f64 {
    fract((x * 12.9898 + y * 78.233).sin() * 43_758.545_3)
}

/// Smooth, cheap field noise in `[-1, 1]` of position (logical units) and time (ms).
#[inline]
pub fn field_noise(x: f64, y: f64, t_ms: f64) -> f64 {
    let a = (x * 0.045 + t_ms * 0.001_1).sin() * (y * 0.052 - t_ms * 0.000_9).cos();
    let b = ((x + y) * 0.021 + t_ms * 0.001_7).sin();
    (a + 0.5 * b) / 1.5
}

/// `min(v, max)` for device pixel ratios, with non-finite or non-positive inputs treated as 1.
pub fn capped_dpr(dpr: f64, max: f64) -> f64 {
    if !dpr.is_finite() || dpr <= 0.0 {
        return 1.0;
    }
    dpr.min(max.max(1.0))
}

/// `round(x * y / 255)` for 8-bit channel math in 16-bit lanes.
pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
