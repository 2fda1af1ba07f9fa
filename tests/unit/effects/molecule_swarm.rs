use super::*;
use crate::config::FxConfig;
use crate::host::document::Document;
use crate::host::element::HostLayout;
use crate::host::measure::MonospaceMeasure;
use crate::runtime::scheduler::Scheduler;
use crate::theme::StyleSheet;

fn palette() -> ElementPalette {
    ElementPalette::from_theme(&Theme::read(&StyleSheet::default()))
}

#[test]
fn count_scales_with_area_and_clamps() {
    let cfg = MoleculeConfig::default();
    assert_eq!(molecule_count(Size::new(130.0, 100.0), &cfg), 8);
    assert_eq!(molecule_count(Size::new(0.0, 0.0), &cfg), 8);
    assert_eq!(molecule_count(Size::new(300.0, 230.0), &cfg), 11);
    assert_eq!(molecule_count(Size::new(1200.0, 800.0), &cfg), 14);
}

#[test]
fn swarm_spawns_inside_bounds_within_velocity_limits() {
    let cfg = MoleculeConfig::default();
    let bounds = Size::new(320.0, 200.0);
    let mut rng = Rng64::new(7);
    let swarm = spawn_swarm(&mut rng, bounds, &palette(), &cfg);
    assert_eq!(swarm.len(), molecule_count(bounds, &cfg));
    for m in &swarm {
        assert!((0.0..bounds.width).contains(&m.pos.x));
        assert!((0.0..bounds.height).contains(&m.pos.y));
        assert!(m.vel.x.abs() <= 12.0 && m.vel.y.abs() <= 12.0);
        assert!(m.spin.abs() <= 0.35);
        assert!(!m.atoms.is_empty());
    }

    let again = spawn_swarm(&mut Rng64::new(7), bounds, &palette(), &cfg);
    assert_eq!(swarm, again);
}

#[test]
fn wrap_crosses_to_opposite_margin_in_one_step() {
    let cfg = MoleculeConfig::default();
    let mut m = spawn_swarm(&mut Rng64::new(1), Size::new(130.0, 100.0), &palette(), &cfg)
        .remove(0);
    m.pos = Point::new(-23.9, 50.0);
    m.vel = Vec2::new(-10.0, 0.0);
    m.step(0.05, Size::new(130.0, 100.0), 24.0);
    assert_eq!(m.pos.x, 130.0 + 24.0);
    assert_eq!(m.pos.y, 50.0);

    m.pos = Point::new(60.0, 100.0 + 23.95);
    m.vel = Vec2::new(0.0, 10.0);
    m.step(0.05, Size::new(130.0, 100.0), 24.0);
    assert_eq!(m.pos.y, -24.0);

    assert_eq!(wrap(-24.0, 100.0, 24.0), -24.0);
    assert_eq!(wrap(124.0, 100.0, 24.0), 124.0);
}

#[test]
fn bond_offsets_are_centered() {
    assert_eq!(bond_offsets(1, 2.6).as_slice(), &[0.0]);
    assert_eq!(bond_offsets(2, 2.6).as_slice(), &[-1.3, 1.3]);
    assert_eq!(bond_offsets(3, 2.6).as_slice(), &[-2.6, 0.0, 2.6]);
}

struct Rig {
    doc: Document,
    id: HostId,
    sched: Scheduler,
    cfg: FxConfig,
    measure: MonospaceMeasure,
    fx: MoleculeSwarm,
}

impl Rig {
    fn new(layout: HostLayout) -> Self {
        let mut doc = Document::new();
        let cfg = FxConfig::default();
        let id = doc.create_host(layout).effect(NAME).with_canvas().id();
        let style = StyleSheet::default().with_property("--fx-ink", "15, 23, 42");
        let fx = {
            let mut fcx = FactoryCx {
                host: doc.get_mut(id).unwrap(),
                style: &style,
                config: &cfg,
            };
            MoleculeSwarm::new(&mut fcx).unwrap()
        };
        Self {
            doc,
            id,
            sched: Scheduler::new(cfg.frame_interval_ms),
            cfg,
            measure: MonospaceMeasure::default(),
            fx,
        }
    }

    fn with_cx(&mut self, f: impl FnOnce(&mut dyn HoverEffect, &mut EffectCx<'_>)) {
        let mut cx = EffectCx {
            host: self.doc.get_mut(self.id).unwrap(),
            scheduler: &mut self.sched,
            measure: &self.measure,
            config: &self.cfg,
        };
        f(&mut self.fx, &mut cx);
    }

    fn run_until(&mut self, until: f64) {
        while let Some(due) = self.sched.pop_due(until) {
            self.with_cx(|fx, cx| fx.on_task(cx, due));
        }
        self.sched.advance_clock(until);
    }

    fn surface(&self) -> &crate::render::surface::DrawingSurface {
        self.doc.get(self.id).unwrap().canvas.as_ref().unwrap().surface()
    }
}

#[test]
fn frames_cap_at_thirty_per_second() {
    let mut rig = Rig::new(HostLayout::new(0.0, 0.0, 130.0, 100.0));
    rig.with_cx(|fx, cx| fx.start(cx, None));
    rig.run_until(1000.0);
    let paints = rig.surface().paint_count();
    assert!((20..=31).contains(&paints), "paints {paints}");
    assert!(!rig.surface().is_blank());
}

#[test]
fn stop_then_clear_after_grace() {
    let mut rig = Rig::new(HostLayout::new(0.0, 0.0, 130.0, 100.0));
    rig.with_cx(|fx, cx| fx.start(cx, None));
    rig.run_until(300.0);
    rig.with_cx(|fx, cx| fx.stop(cx));
    rig.with_cx(|fx, cx| fx.stop(cx));
    assert_eq!(rig.sched.pending(), 1);
    rig.run_until(559.0);
    assert!(!rig.surface().is_blank());
    rig.run_until(560.0);
    assert!(rig.surface().is_blank());
    assert_eq!(rig.surface().clear_count(), 1);
}

#[test]
fn restart_before_grace_cancels_clear() {
    let mut rig = Rig::new(HostLayout::new(0.0, 0.0, 130.0, 100.0));
    rig.with_cx(|fx, cx| fx.start(cx, None));
    rig.run_until(100.0);
    rig.with_cx(|fx, cx| fx.stop(cx));
    rig.run_until(200.0);
    rig.with_cx(|fx, cx| fx.start(cx, None));
    rig.run_until(1200.0);
    assert_eq!(rig.surface().clear_count(), 0);
    assert!(rig.fx.is_running());
}

#[test]
fn capabilities_route_every_callback() {
    let rig = Rig::new(HostLayout::new(0.0, 0.0, 130.0, 100.0));
    assert_eq!(rig.fx.capabilities(), Capabilities::ALL);
    assert_eq!(rig.fx.name(), "molecules");
}

#[test]
fn resize_while_running_respawns_for_new_area() {
    let mut rig = Rig::new(HostLayout::new(0.0, 0.0, 130.0, 100.0));
    rig.with_cx(|fx, cx| fx.start(cx, None));
    rig.run_until(200.0);
    assert_eq!(rig.fx.molecules.len(), 8);
    let before: Vec<Point> = rig.fx.molecules.iter().map(|m| m.pos).collect();

    rig.doc.get_mut(rig.id).unwrap().layout = HostLayout::new(0.0, 0.0, 1200.0, 800.0);
    rig.with_cx(|fx, cx| fx.resize(cx));
    assert!(rig.fx.is_running());
    assert_eq!(rig.fx.size, Size::new(1200.0, 800.0));
    assert_eq!(rig.fx.molecules.len(), 14);
    assert_eq!(rig.surface().backing_size(), (1200, 800));
    let after: Vec<Point> = rig.fx.molecules.iter().map(|m| m.pos).collect();
    assert_ne!(before.as_slice(), &after[..before.len()]);
    for p in &after {
        assert!((0.0..1200.0).contains(&p.x) && (0.0..800.0).contains(&p.y));
    }
}

#[test]
fn resize_while_stopped_keeps_swarm() {
    let mut rig = Rig::new(HostLayout::new(0.0, 0.0, 130.0, 100.0));
    rig.with_cx(|fx, cx| fx.start(cx, None));
    rig.with_cx(|fx, cx| fx.stop(cx));
    let before = rig.fx.molecules.clone();
    rig.doc.get_mut(rig.id).unwrap().layout = HostLayout::new(0.0, 0.0, 1200.0, 800.0);
    rig.with_cx(|fx, cx| fx.resize(cx));
    assert_eq!(rig.fx.molecules, before);
    assert_eq!(rig.fx.size, Size::new(130.0, 100.0));
}
