use crate::effects::{Capabilities, EffectCx, HoverEffect};
use crate::foundation::core::Point;
use crate::runtime::scheduler::Due;

/// Lifecycle dispatcher bound to one host.
///
/// A controller whose factory declined the host is inert: it exposes no callbacks and every
/// event is dropped.
pub struct Controller {
    effect: Option<Box<dyn HoverEffect>>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("effect", &self.name())
            .field("running", &self.is_running())
            .finish()
    }
}

impl Controller {
    pub(crate) fn new(effect: Option<Box<dyn HoverEffect>>) -> Self {
        Self { effect }
    }

    /// Callbacks this controller exposes.
    pub fn capabilities(&self) -> Capabilities {
        self.effect
            .as_ref()
            .map_or(Capabilities::NONE, |fx| fx.capabilities())
    }

    /// Effect name, or `None` for an inert controller.
    pub fn name(&self) -> Option<&'static str> {
        self.effect.as_ref().map(|fx| fx.name())
    }

    pub fn is_running(&self) -> bool {
        self.effect.as_ref().is_some_and(|fx| fx.is_running())
    }

    pub(crate) fn on_enter(&mut self, cx: &mut EffectCx<'_>, pointer: Point) {
        if let Some(fx) = self.effect.as_mut().filter(|fx| fx.capabilities().enter) {
            fx.start(cx, Some(pointer));
        }
    }

    pub(crate) fn on_move(&mut self, cx: &mut EffectCx<'_>, pointer: Point) {
        if let Some(fx) = self.effect.as_mut().filter(|fx| fx.capabilities().pointer_move) {
            fx.pointer_move(cx, pointer);
        }
    }

    pub(crate) fn on_leave(&mut self, cx: &mut EffectCx<'_>) {
        if let Some(fx) = self.effect.as_mut().filter(|fx| fx.capabilities().leave) {
            fx.stop(cx);
        }
    }

    pub(crate) fn on_task(&mut self, cx: &mut EffectCx<'_>, due: Due) {
        if let Some(fx) = self.effect.as_mut() {
            fx.on_task(cx, due);
        }
    }

    pub(crate) fn on_resize(&mut self, cx: &mut EffectCx<'_>) {
        if let Some(fx) = self.effect.as_mut() {
            fx.resize(cx);
        }
    }
}
