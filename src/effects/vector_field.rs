//! `vector-field`: short streamlines on a jittered grid, pulled toward the cursor.
//!
//! Each frame recomputes every segment from scratch: direction toward the cursor, bent by a
//! time-varying noise field that fades out near the cursor, with length and color driven by the
//! point's influence (proximity). Frames are capped below display rate by timestamp gating.

use crate::config::VectorFieldConfig;
use crate::effects::pacing::{FrameGate, GraceTimer};
use crate::effects::{Capabilities, EffectCx, FactoryCx, HoverEffect};
use crate::foundation::core::{Insets, Point, Rgb8, Size, Vec2};
use crate::foundation::math::{capped_dpr, field_noise, hash2};
use crate::host::element::HostId;
use crate::runtime::scheduler::{Due, TaskHandle, TaskKind};
use crate::theme::Theme;

/// Registry name.
pub const NAME: &str = "vector-field";

/// Segment length factor range; `[MIN, MIN + 1]` times the base length.
const LENGTH_MIN_FACTOR: f64 = 0.65;

pub(crate) struct VectorField {
    host: HostId,
    running: bool,
    frame: Option<TaskHandle>,
    gate: FrameGate,
    cursor: Point,
    has_cursor: bool,
    dpr: f64,
    size: Size,
    points: Vec<Point>,
    clear: GraceTimer,
    near: Rgb8,
    far: Rgb8,
    started_ms: f64,
}

/// One drawn segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Streamline {
    pub(crate) from: Point,
    pub(crate) to: Point,
    pub(crate) influence: f64,
}

impl VectorField {
    pub(crate) fn create(cx: &mut FactoryCx<'_>) -> Option<Box<dyn HoverEffect>> {
        Self::new(cx).map(|fx| Box::new(fx) as Box<dyn HoverEffect>)
    }

    fn new(cx: &mut FactoryCx<'_>) -> Option<Self> {
        let host = cx.host.id();
        let has_context = cx
            .host
            .canvas
            .as_mut()
            .is_some_and(|slot| slot.context().is_some());
        if !has_context {
            tracing::debug!(host = %host, "vector-field: no drawing surface");
            return None;
        }
        let theme = Theme::read(cx.style);
        Some(Self {
            host,
            running: false,
            frame: None,
            gate: FrameGate::new(cx.config.vector_field.max_fps),
            cursor: Point::ZERO,
            has_cursor: false,
            dpr: 1.0,
            size: Size::ZERO,
            points: Vec::new(),
            clear: GraceTimer::default(),
            near: theme.accent,
            far: theme.muted,
            started_ms: 0.0,
        })
    }

    /// Resize the backing store and regenerate the grid for the host's current box.
    ///
    /// Returns `false` when the surface cannot be (re)allocated.
    fn rebuild(&mut self, cx: &mut EffectCx<'_>) -> bool {
        self.dpr = capped_dpr(cx.host.device_pixel_ratio, cx.config.max_device_pixel_ratio);
        self.size = cx.host.layout.size();
        let padding = cx.host.layout.padding;
        let Some(surface) = cx.host.canvas.as_mut().and_then(|s| s.context()) else {
            return false;
        };
        if let Err(e) = surface.resize(self.size, self.dpr) {
            tracing::debug!(host = %self.host, error = %e, "vector-field: surface resize failed");
            return false;
        }
        self.points = build_grid(self.size, padding, &cx.config.vector_field);
        true
    }

    fn focus(&self, cfg: &VectorFieldConfig) -> Point {
        if self.has_cursor {
            self.cursor
        } else {
            Point::new(
                self.size.width * cfg.default_focus[0],
                self.size.height * cfg.default_focus[1],
            )
        }
    }

    fn draw(&mut self, cx: &mut EffectCx<'_>, ts_ms: f64) {
        let cfg = &cx.config.vector_field;
        let focus = self.focus(cfg);
        let max_d = influence_distance(self.size, cfg);
        let t = ts_ms - self.started_ms;
        let (near, far) = (self.near, self.far);
        let points = &self.points;
        let Some(surface) = cx.host.canvas.as_mut().and_then(|s| s.context()) else {
            return;
        };
        surface.paint(|p| {
            p.set_transform(crate::foundation::core::Affine::IDENTITY);
            for &pt in points {
                let s = streamline(pt, focus, max_d, t, cfg);
                let rgba = far
                    .lerp(near, s.influence)
                    .with_alpha(0.28 + 0.6 * s.influence);
                p.line(s.from, s.to, cfg.line_width, rgba);
            }
        });
        tracing::trace!(host = %self.host, segments = points.len(), "vector-field frame");
    }
}

impl HoverEffect for VectorField {
    fn name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn start(&mut self, cx: &mut EffectCx<'_>, pointer: Option<Point>) {
        self.clear.cancel(cx.scheduler);
        if let Some(h) = self.frame.take() {
            cx.scheduler.cancel(h);
        }
        if !self.rebuild(cx) {
            self.running = false;
            return;
        }
        if let Some(client) = pointer {
            self.cursor = cx.host.layout.to_local(client);
            self.has_cursor = true;
        }
        self.running = true;
        self.gate.reset();
        self.started_ms = cx.scheduler.now_ms();
        self.frame = Some(cx.scheduler.request_frame(self.host));
    }

    fn pointer_move(&mut self, cx: &mut EffectCx<'_>, pointer: Point) {
        self.cursor = cx.host.layout.to_local(pointer);
        self.has_cursor = true;
    }

    fn stop(&mut self, cx: &mut EffectCx<'_>) {
        self.running = false;
        self.has_cursor = false;
        if let Some(h) = self.frame.take() {
            cx.scheduler.cancel(h);
        }
        self.clear.arm(cx.scheduler, self.host, cx.config.grace_period_ms);
    }

    fn on_task(&mut self, cx: &mut EffectCx<'_>, due: Due) {
        match due.kind {
            TaskKind::Frame if self.frame == Some(due.handle) => {
                self.frame = None;
                if !self.running {
                    return;
                }
                if self.gate.admit(due.at_ms).is_some() {
                    self.draw(cx, due.at_ms);
                }
                self.frame = Some(cx.scheduler.request_frame(self.host));
            }
            TaskKind::Clear if self.clear.fired(due.handle) => {
                if let Some(surface) = cx.host.canvas.as_mut().and_then(|s| s.context()) {
                    surface.clear();
                }
            }
            _ => {}
        }
    }

    fn resize(&mut self, cx: &mut EffectCx<'_>) {
        if self.running && !self.rebuild(cx) {
            self.stop(cx);
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Jittered grid covering the padded interior.
///
/// Pure in `(size, padding, cfg)`: rebuilding at the same size yields identical points.
pub(crate) fn build_grid(size: Size, padding: Insets, cfg: &VectorFieldConfig) -> Vec<Point> {
    let s = cfg.spacing;
    let (x0, x1) = (padding.left + s * 0.5, size.width - padding.right);
    let (y0, y1) = (padding.top + s * 0.5, size.height - padding.bottom);
    let mut out = Vec::new();
    for j in 0.. {
        let y = y0 + f64::from(j) * s;
        if y >= y1 {
            break;
        }
        for i in 0.. {
            let x = x0 + f64::from(i) * s;
            if x >= x1 {
                break;
            }
            let jx = (hash2(x, y) - 0.5) * 2.0 * cfg.jitter;
            let jy = (hash2(y + 31.7, x - 17.3) - 0.5) * 2.0 * cfg.jitter;
            out.push(Point::new(x + jx, y + jy));
        }
    }
    out
}

/// Distance at which influence reaches zero.
pub(crate) fn influence_distance(size: Size, cfg: &VectorFieldConfig) -> f64 {
    cfg.min_influence_distance
        .max(cfg.influence_fraction * size.width.min(size.height))
}

/// The segment drawn for grid point `p` at elapsed time `t_ms`.
pub(crate) fn streamline(
    p: Point,
    focus: Point,
    max_d: f64,
    t_ms: f64,
    cfg: &VectorFieldConfig,
) -> Streamline {
    let d = focus - p;
    let dist = d.hypot();
    let toward = if dist > 1e-9 { d.atan2() } else { 0.0 };
    let influence = (1.0 - dist / max_d).clamp(0.0, 1.0);
    let angle = toward + field_noise(p.x, p.y, t_ms) * cfg.noise_strength * (1.0 - influence);
    let len = cfg.segment_length * (LENGTH_MIN_FACTOR + influence);
    Streamline {
        from: p,
        to: p + Vec2::from_angle(angle) * len,
        influence,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/vector_field.rs"]
mod tests;
