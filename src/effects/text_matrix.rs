//! `glow-matrix`: a grid of flickering digits written into the host's text container.
//!
//! The grid is regenerated in full on every tick; there is no persistent cell state.

use crate::config::TextMatrixConfig;
use crate::effects::pacing::GraceTimer;
use crate::effects::{Capabilities, EffectCx, FactoryCx, HoverEffect};
use crate::foundation::core::{Point, Size};
use crate::foundation::math::{Rng64, mix_seed};
use crate::host::element::HostId;
use crate::host::measure::TextMeasure;
use crate::runtime::scheduler::{Due, TaskHandle, TaskKind};

/// Registry name.
pub const NAME: &str = "glow-matrix";

/// Ten glyphs rendered off-screen to estimate the average glyph width.
pub(crate) const PROBE: &str = "0123456789";

/// Upper bound on either grid axis, so an oversized host cannot overflow the text buffer.
pub(crate) const MAX_GRID_CELLS: usize = 1024;

pub(crate) struct TextMatrix {
    host: HostId,
    tick: Option<TaskHandle>,
    clear: GraceTimer,
    rng: Rng64,
}

impl TextMatrix {
    pub(crate) fn create(cx: &mut FactoryCx<'_>) -> Option<Box<dyn HoverEffect>> {
        if cx.host.text.is_none() {
            tracing::debug!(host = %cx.host.id(), "glow-matrix: no text container");
            return None;
        }
        let host = cx.host.id();
        Some(Box::new(Self {
            host,
            tick: None,
            clear: GraceTimer::default(),
            rng: Rng64::new(mix_seed(cx.config.seed, host.0)),
        }))
    }

    fn paint(&mut self, cx: &mut EffectCx<'_>) {
        let cfg = &cx.config.text_matrix;
        let glyph = glyph_width(cx.measure, cfg);
        let (cols, rows) = grid_dims(cx.host.layout.content_size(), glyph, cfg);
        let text = noise_grid(&mut self.rng, cols, rows, cfg.blank_probability);
        if let Some(container) = cx.host.text.as_mut() {
            container.set_content(text);
        }
    }
}

impl HoverEffect for TextMatrix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ENTER_LEAVE
    }

    fn start(&mut self, cx: &mut EffectCx<'_>, _pointer: Option<Point>) {
        self.clear.cancel(cx.scheduler);
        if let Some(h) = self.tick.take() {
            cx.scheduler.cancel(h);
        }
        self.paint(cx);
        self.tick = Some(cx.scheduler.set_interval(
            self.host,
            TaskKind::Tick,
            cx.config.text_matrix.interval_ms,
        ));
    }

    fn stop(&mut self, cx: &mut EffectCx<'_>) {
        if let Some(h) = self.tick.take() {
            cx.scheduler.cancel(h);
        }
        self.clear.arm(cx.scheduler, self.host, cx.config.grace_period_ms);
    }

    fn on_task(&mut self, cx: &mut EffectCx<'_>, due: Due) {
        match due.kind {
            TaskKind::Tick if self.tick == Some(due.handle) => self.paint(cx),
            TaskKind::Clear if self.clear.fired(due.handle) => {
                if let Some(container) = cx.host.text.as_mut() {
                    container.clear();
                }
            }
            _ => {}
        }
    }

    fn is_running(&self) -> bool {
        self.tick.is_some()
    }
}

/// Average glyph width from the probe, falling back when the probe measures nothing.
pub(crate) fn glyph_width(measure: &dyn TextMeasure, cfg: &TextMatrixConfig) -> f64 {
    let w = measure.measure(PROBE) / PROBE.chars().count() as f64;
    if w.is_finite() && w > 0.0 {
        w
    } else {
        cfg.fallback_glyph_width
    }
}

/// `(cols, rows)` for a content box, honoring the configured minimums and [`MAX_GRID_CELLS`].
pub(crate) fn grid_dims(content: Size, glyph_width: f64, cfg: &TextMatrixConfig) -> (usize, usize) {
    let axis = |extent: f64, cell: f64, min: usize| {
        let n = (extent / cell).floor().clamp(0.0, MAX_GRID_CELLS as f64) as usize;
        n.max(min).min(MAX_GRID_CELLS)
    };
    (
        axis(content.width, glyph_width, cfg.min_cols),
        axis(content.height, cfg.row_height, cfg.min_rows),
    )
}

/// One frame of digits: `rows` lines of `cols` cells joined by `\n`.
pub(crate) fn noise_grid(
    rng: &mut Rng64,
    cols: usize,
    rows: usize,
    blank_probability: f64,
) -> String {
    let mut out = String::with_capacity(rows.saturating_mul(cols.saturating_add(1)));
    for r in 0..rows {
        if r > 0 {
            out.push('\n');
        }
        for _ in 0..cols {
            if rng.next_f64_01() < blank_probability {
                out.push(' ');
            } else {
                let d = rng.index(10) as u32;
                out.push(char::from_digit(d, 10).unwrap_or('0'));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/text_matrix.rs"]
mod tests;
