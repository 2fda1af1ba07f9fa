//! `molecules`: drifting, spinning molecule sprites that wrap around the host box.

use smallvec::SmallVec;

use crate::config::MoleculeConfig;
use crate::effects::molecules::{Element, ElementPalette, TEMPLATES, Template};
use crate::effects::pacing::{FrameGate, GraceTimer};
use crate::effects::{Capabilities, EffectCx, FactoryCx, HoverEffect};
use crate::foundation::core::{Affine, Point, Rgb8, Size, Vec2};
use crate::foundation::math::{Rng64, capped_dpr, mix_seed};
use crate::host::element::HostId;
use crate::render::surface::Painter;
use crate::runtime::scheduler::{Due, TaskHandle, TaskKind};
use crate::theme::Theme;

/// Registry name.
pub const NAME: &str = "molecules";

const BOND_ALPHA: f64 = 0.7;
const HYDROGEN_OUTLINE: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Atom {
    pub(crate) element: Element,
    pub(crate) offset: Point,
    pub(crate) radius: f64,
    pub(crate) color: Rgb8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bond {
    pub(crate) a: usize,
    pub(crate) b: usize,
    pub(crate) order: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Molecule {
    pub(crate) pos: Point,
    pub(crate) vel: Vec2,
    pub(crate) rotation: f64,
    pub(crate) spin: f64,
    pub(crate) atoms: SmallVec<[Atom; 8]>,
    pub(crate) bonds: SmallVec<[Bond; 8]>,
}

impl Molecule {
    fn from_template(t: &Template, palette: &ElementPalette) -> Self {
        Self {
            pos: Point::ZERO,
            vel: Vec2::ZERO,
            rotation: 0.0,
            spin: 0.0,
            atoms: t
                .atoms
                .iter()
                .map(|a| Atom {
                    element: a.element,
                    offset: a.offset,
                    radius: a.element.radius(),
                    color: palette.fill(a.element),
                })
                .collect(),
            bonds: t
                .bonds
                .iter()
                .map(|b| Bond {
                    a: b.a,
                    b: b.b,
                    order: b.order,
                })
                .collect(),
        }
    }

    /// Advance by `dt_s` seconds and wrap around `bounds` with `margin`.
    pub(crate) fn step(&mut self, dt_s: f64, bounds: Size, margin: f64) {
        self.pos += self.vel * dt_s;
        self.rotation += self.spin * dt_s;
        self.pos.x = wrap(self.pos.x, bounds.width, margin);
        self.pos.y = wrap(self.pos.y, bounds.height, margin);
    }

    fn pose(&self) -> Affine {
        Affine::translate(self.pos.to_vec2()) * Affine::rotate(self.rotation)
    }
}

/// Edge wrap: leaving past one margin re-enters at the opposite margin.
pub(crate) fn wrap(v: f64, extent: f64, margin: f64) -> f64 {
    if v < -margin {
        extent + margin
    } else if v > extent + margin {
        -margin
    } else {
        v
    }
}

/// Desired molecule count for a host box.
pub(crate) fn molecule_count(size: Size, cfg: &MoleculeConfig) -> usize {
    let area = (size.width * size.height).max(0.0);
    let n = (area / cfg.area_per_molecule).round() as usize;
    n.clamp(cfg.min_count, cfg.max_count)
}

/// Fresh random swarm inside `bounds`.
pub(crate) fn spawn_swarm(
    rng: &mut Rng64,
    bounds: Size,
    palette: &ElementPalette,
    cfg: &MoleculeConfig,
) -> Vec<Molecule> {
    (0..molecule_count(bounds, cfg))
        .map(|_| {
            let template = &TEMPLATES[rng.index(TEMPLATES.len())];
            let mut m = Molecule::from_template(template, palette);
            m.pos = Point::new(rng.range(0.0, bounds.width), rng.range(0.0, bounds.height));
            m.vel = Vec2::new(
                rng.range(-cfg.max_speed, cfg.max_speed),
                rng.range(-cfg.max_speed, cfg.max_speed),
            );
            m.rotation = rng.range(0.0, std::f64::consts::TAU);
            m.spin = rng.range(-cfg.max_spin, cfg.max_spin);
            m
        })
        .collect()
}

/// Perpendicular offsets of the parallel strokes of a bond of the given order.
pub(crate) fn bond_offsets(order: u8, separation: f64) -> SmallVec<[f64; 3]> {
    let k = order.clamp(1, 3);
    let mid = f64::from(k - 1) * 0.5;
    (0..k).map(|i| (f64::from(i) - mid) * separation).collect()
}

fn draw_molecule(
    p: &mut Painter<'_>,
    m: &Molecule,
    palette: &ElementPalette,
    cfg: &MoleculeConfig,
) {
    p.set_transform(m.pose());
    let bond_rgba = palette.bond.with_alpha(BOND_ALPHA);
    for b in &m.bonds {
        let (Some(a), Some(c)) = (m.atoms.get(b.a), m.atoms.get(b.b)) else {
            continue;
        };
        let axis = c.offset - a.offset;
        let len = axis.hypot();
        if len < 1e-9 {
            continue;
        }
        let normal = Vec2::new(-axis.y, axis.x) / len;
        for off in bond_offsets(b.order, cfg.bond_separation) {
            let shift = normal * off;
            p.line(a.offset + shift, c.offset + shift, cfg.bond_width, bond_rgba);
        }
    }
    for atom in &m.atoms {
        if atom.element == Element::H {
            p.circle(
                atom.offset,
                atom.radius + HYDROGEN_OUTLINE,
                palette.outline.with_alpha(1.0),
            );
        }
        p.circle(atom.offset, atom.radius, atom.color.with_alpha(1.0));
    }
}

pub(crate) struct MoleculeSwarm {
    host: HostId,
    running: bool,
    frame: Option<TaskHandle>,
    gate: FrameGate,
    dpr: f64,
    size: Size,
    molecules: Vec<Molecule>,
    palette: ElementPalette,
    rng: Rng64,
    clear: GraceTimer,
}

impl MoleculeSwarm {
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
            tracing::debug!(host = %host, "molecules: no drawing surface");
            return None;
        }
        Some(Self {
            host,
            running: false,
            frame: None,
            gate: FrameGate::new(cx.config.molecules.max_fps),
            dpr: 1.0,
            size: Size::ZERO,
            molecules: Vec::new(),
            palette: ElementPalette::from_theme(&Theme::read(cx.style)),
            rng: Rng64::new(mix_seed(cx.config.seed, host.0)),
            clear: GraceTimer::default(),
        })
    }

    fn rebuild(&mut self, cx: &mut EffectCx<'_>) -> bool {
        self.dpr = capped_dpr(cx.host.device_pixel_ratio, cx.config.max_device_pixel_ratio);
        self.size = cx.host.layout.size();
        let Some(surface) = cx.host.canvas.as_mut().and_then(|s| s.context()) else {
            return false;
        };
        if let Err(e) = surface.resize(self.size, self.dpr) {
            tracing::debug!(host = %self.host, error = %e, "molecules: surface resize failed");
            return false;
        }
        self.molecules =
            spawn_swarm(&mut self.rng, self.size, &self.palette, &cx.config.molecules);
        tracing::debug!(host = %self.host, count = self.molecules.len(), "molecules spawned");
        true
    }

    fn advance_and_draw(&mut self, cx: &mut EffectCx<'_>, elapsed_ms: f64) {
        let cfg = &cx.config.molecules;
        let dt_s = elapsed_ms.min(cfg.max_step_ms) / 1000.0;
        for m in &mut self.molecules {
            m.step(dt_s, self.size, cfg.wrap_margin);
        }
        let Some(surface) = cx.host.canvas.as_mut().and_then(|s| s.context()) else {
            return;
        };
        let (molecules, palette) = (&self.molecules, &self.palette);
        surface.paint(|p| {
            for m in molecules {
                draw_molecule(p, m, palette, cfg);
            }
        });
    }
}

impl HoverEffect for MoleculeSwarm {
    fn name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn start(&mut self, cx: &mut EffectCx<'_>, _pointer: Option<Point>) {
        self.clear.cancel(cx.scheduler);
        if let Some(h) = self.frame.take() {
            cx.scheduler.cancel(h);
        }
        if !self.rebuild(cx) {
            self.running = false;
            return;
        }
        self.running = true;
        self.gate.reset();
        self.frame = Some(cx.scheduler.request_frame(self.host));
    }

    fn stop(&mut self, cx: &mut EffectCx<'_>) {
        self.running = false;
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
                if let Some(elapsed) = self.gate.admit(due.at_ms) {
                    self.advance_and_draw(cx, elapsed);
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

#[cfg(test)]
#[path = "../../tests/unit/effects/molecule_swarm.rs"]
mod tests;
