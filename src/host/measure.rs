/// Measures rendered text width in logical units, in the font used by the hosts' text
/// containers.
pub trait TextMeasure {
    /// Width of `text` laid out on a single line.
    fn measure(&self, text: &str) -> f64;
}

/// Fixed-advance measurement, sufficient for the monospace digit grids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    /// Advance width of every glyph.
    pub advance: f64,
}

impl MonospaceMeasure {
    /// Measurement with the given per-glyph advance.
    pub const fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(7.8)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str) -> f64 {
        self.advance * text.chars().count() as f64
    }
}
