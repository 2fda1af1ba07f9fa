use std::collections::{BTreeMap, HashMap};

use crate::config::FxConfig;
use crate::effects::{Capabilities, EffectCx, FactoryCx};
use crate::foundation::core::Point;
use crate::foundation::error::CardFxResult;
use crate::host::document::Document;
use crate::host::element::{HostElement, HostId, HostLayout};
use crate::host::measure::{MonospaceMeasure, TextMeasure};
use crate::runtime::controller::Controller;
use crate::runtime::registry::{EffectEntry, EffectRegistry};
use crate::runtime::scheduler::Scheduler;
use crate::theme::{StyleSheet, StyleSource};

/// Normalized pointer X, written for effects with pointer variables.
pub const PROP_POINTER_X: &str = "--mx";
/// Normalized pointer Y, written for effects with pointer variables.
pub const PROP_POINTER_Y: &str = "--my";

/// Attachment layer: owns the document, the registry, one lazily created controller per hovered
/// host and the task queue, and routes pointer events and due tasks to controllers.
pub struct HoverRuntime {
    document: Document,
    registry: EffectRegistry,
    attached: BTreeMap<HostId, EffectEntry>,
    controllers: HashMap<HostId, Controller>,
    scheduler: Scheduler,
    config: FxConfig,
    style: Box<dyn StyleSource>,
    measure: Box<dyn TextMeasure>,
    created: u64,
}

impl std::fmt::Debug for HoverRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoverRuntime")
            .field("hosts", &self.document.len())
            .field("attached", &self.attached.len())
            .field("controllers", &self.controllers.len())
            .field("now_ms", &self.scheduler.now_ms())
            .finish_non_exhaustive()
    }
}

impl HoverRuntime {
    /// Runtime over `document` with the built-in registry, an empty style and monospace
    /// measurement. Fails when `config` does not validate.
    pub fn new(document: Document, config: FxConfig) -> CardFxResult<Self> {
        config.validate()?;
        Ok(Self {
            document,
            registry: EffectRegistry::builtin(),
            attached: BTreeMap::new(),
            controllers: HashMap::new(),
            scheduler: Scheduler::new(config.frame_interval_ms),
            config,
            style: Box::new(StyleSheet::default()),
            measure: Box::new(MonospaceMeasure::default()),
            created: 0,
        })
    }

    pub fn with_registry(mut self, registry: EffectRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Computed style used for theme lookups at controller construction.
    pub fn with_style(mut self, style: impl StyleSource + 'static) -> Self {
        self.style = Box::new(style);
        self
    }

    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Attach every host declaring a registered effect. Returns how many were newly attached.
    #[tracing::instrument(skip(self), fields(hosts = self.document.len()))]
    pub fn attach_all(&mut self) -> usize {
        let n = self
            .document
            .ids()
            .into_iter()
            .filter(|&id| self.attach(id))
            .count();
        tracing::info!(attached = n, "hover effects attached");
        n
    }

    /// Attach one host. Returns `false` when it is missing, declares no registered effect, or is
    /// already attached.
    pub fn attach(&mut self, id: HostId) -> bool {
        if self.attached.contains_key(&id) {
            return false;
        }
        let Some(name) = self.document.get(id).and_then(HostElement::effect) else {
            return false;
        };
        let Some(entry) = self.registry.get(name).copied() else {
            tracing::debug!(host = %id, effect = name, "unknown effect, skipped");
            return false;
        };
        self.attached.insert(id, entry);
        true
    }

    pub fn is_attached(&self, id: HostId) -> bool {
        self.attached.contains_key(&id)
    }

    /// Pointer entered `id` at `client`. Constructs the controller on first enter.
    pub fn pointer_enter(&mut self, id: HostId, client: Point) {
        let Some(entry) = self.attached.get(&id).copied() else {
            return;
        };
        let Some(host) = self.document.get_mut(id) else {
            return;
        };
        if entry.pointer_vars {
            write_pointer_vars(host, client);
        }
        let controller = self.controllers.entry(id).or_insert_with(|| {
            let mut fcx = FactoryCx {
                host: &mut *host,
                style: self.style.as_ref(),
                config: &self.config,
            };
            let effect = (entry.factory)(&mut fcx);
            self.created += 1;
            tracing::debug!(host = %id, inert = effect.is_none(), "controller created");
            Controller::new(effect)
        });
        let mut cx = EffectCx {
            host,
            scheduler: &mut self.scheduler,
            measure: self.measure.as_ref(),
            config: &self.config,
        };
        controller.on_enter(&mut cx, client);
    }

    /// Pointer moved within `id`. Never constructs a controller.
    pub fn pointer_move(&mut self, id: HostId, client: Point) {
        let Some(entry) = self.attached.get(&id).copied() else {
            return;
        };
        let Some(host) = self.document.get_mut(id) else {
            return;
        };
        if entry.pointer_vars {
            write_pointer_vars(host, client);
        }
        if let Some(controller) = self.controllers.get_mut(&id) {
            let mut cx = EffectCx {
                host,
                scheduler: &mut self.scheduler,
                measure: self.measure.as_ref(),
                config: &self.config,
            };
            controller.on_move(&mut cx, client);
        }
    }

    /// Pointer left `id`.
    pub fn pointer_leave(&mut self, id: HostId) {
        let (Some(controller), Some(host)) =
            (self.controllers.get_mut(&id), self.document.get_mut(id))
        else {
            return;
        };
        let mut cx = EffectCx {
            host,
            scheduler: &mut self.scheduler,
            measure: self.measure.as_ref(),
            config: &self.config,
        };
        controller.on_leave(&mut cx);
    }

    /// Run every task due at or before `t_ms`, in order, then set the clock to `t_ms`.
    pub fn advance_to(&mut self, t_ms: f64) {
        while let Some(due) = self.scheduler.pop_due(t_ms) {
            let (Some(controller), Some(host)) = (
                self.controllers.get_mut(&due.owner),
                self.document.get_mut(due.owner),
            ) else {
                continue;
            };
            let mut cx = EffectCx {
                host,
                scheduler: &mut self.scheduler,
                measure: self.measure.as_ref(),
                config: &self.config,
            };
            controller.on_task(&mut cx, due);
        }
        self.scheduler.advance_clock(t_ms);
    }

    pub fn advance_by(&mut self, dt_ms: f64) {
        self.advance_to(self.scheduler.now_ms() + dt_ms.max(0.0));
    }

    /// Replace a host's layout box and let an active renderer rebuild for it.
    pub fn resize_host(&mut self, id: HostId, layout: HostLayout) {
        let Some(host) = self.document.get_mut(id) else {
            return;
        };
        host.layout = layout;
        if let Some(controller) = self.controllers.get_mut(&id) {
            let mut cx = EffectCx {
                host,
                scheduler: &mut self.scheduler,
                measure: self.measure.as_ref(),
                config: &self.config,
            };
            controller.on_resize(&mut cx);
        }
    }

    /// Detach and drop a host together with its controller and every task it owns.
    #[tracing::instrument(skip(self))]
    pub fn remove_host(&mut self, id: HostId) -> Option<HostElement> {
        let cancelled = self.scheduler.cancel_owner(id);
        let had_controller = self.controllers.remove(&id).is_some();
        self.attached.remove(&id);
        tracing::debug!(cancelled, had_controller, "host removed");
        self.document.remove(id)
    }

    /// Number of controllers constructed so far.
    pub fn controllers_created(&self) -> u64 {
        self.created
    }

    pub fn controller(&self, id: HostId) -> Option<&Controller> {
        self.controllers.get(&id)
    }

    /// Capabilities of the host's controller, once it exists.
    pub fn controller_capabilities(&self, id: HostId) -> Option<Capabilities> {
        self.controllers.get(&id).map(Controller::capabilities)
    }

    pub fn now_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &FxConfig {
        &self.config
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable document access for inserting hosts; follow with [`HoverRuntime::attach`].
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

/// Pointer position as a percentage of the host box, clamped to `[0, 100]`.
pub(crate) fn pointer_percent(layout: &HostLayout, client: Point) -> (f64, f64) {
    let size = layout.size();
    let local = layout.to_local(client);
    let pct = |v: f64, extent: f64| {
        if extent > 0.0 {
            (v / extent * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    };
    (pct(local.x, size.width), pct(local.y, size.height))
}

fn write_pointer_vars(host: &mut HostElement, client: Point) {
    let (x, y) = pointer_percent(&host.layout, client);
    host.set_style_property(PROP_POINTER_X, format!("{x:.2}%"));
    host.set_style_property(PROP_POINTER_Y, format!("{y:.2}%"));
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/attach.rs"]
mod tests;
