//! Hover-effect renderers and the interface the runtime drives them through.

pub(crate) mod molecule_swarm;
pub(crate) mod molecules;
pub(crate) mod pacing;
pub(crate) mod text_matrix;
pub(crate) mod vector_field;

use crate::config::FxConfig;
use crate::foundation::core::Point;
use crate::host::element::HostElement;
use crate::host::measure::TextMeasure;
use crate::runtime::scheduler::{Due, Scheduler};
use crate::theme::StyleSource;

/// Which lifecycle callbacks a controller exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Pointer entered the host.
    pub enter: bool,
    /// Pointer moved within the host.
    pub pointer_move: bool,
    /// Pointer left the host.
    pub leave: bool,
}

impl Capabilities {
    /// No callbacks: the effect degraded to nothing.
    pub const NONE: Self = Self {
        enter: false,
        pointer_move: false,
        leave: false,
    };
    /// Enter and leave only.
    pub const ENTER_LEAVE: Self = Self {
        enter: true,
        pointer_move: false,
        leave: true,
    };
    /// Every callback.
    pub const ALL: Self = Self {
        enter: true,
        pointer_move: true,
        leave: true,
    };

    /// `true` when no callback is exposed.
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

/// Everything a renderer may touch while handling one callback.
pub struct EffectCx<'a> {
    /// The host the renderer is bound to.
    pub host: &'a mut HostElement,
    /// Shared task queue; the clock value is the callback time.
    pub scheduler: &'a mut Scheduler,
    /// Text measurement in the hosts' font.
    pub measure: &'a dyn TextMeasure,
    /// Effect tunables.
    pub config: &'a FxConfig,
}

/// Inputs available to a factory when a controller is first constructed.
pub struct FactoryCx<'a> {
    /// The host being bound.
    pub host: &'a mut HostElement,
    /// Computed style for theme lookups.
    pub style: &'a dyn StyleSource,
    /// Effect tunables.
    pub config: &'a FxConfig,
}

/// A stateful renderer bound to one host element.
///
/// All methods run on the single UI thread. `stop` must cancel every pending reschedule before
/// returning and must tolerate being called while already stopped.
pub trait HoverEffect {
    /// Registry name of the effect.
    fn name(&self) -> &'static str;

    /// Callbacks this renderer wants routed to it.
    fn capabilities(&self) -> Capabilities;

    /// Begin rendering. `pointer` is the entering pointer position in client space.
    fn start(&mut self, cx: &mut EffectCx<'_>, pointer: Option<Point>);

    /// Pointer moved, in client space.
    fn pointer_move(&mut self, _cx: &mut EffectCx<'_>, _pointer: Point) {}

    /// Stop rendering and arm the grace-period clear.
    fn stop(&mut self, cx: &mut EffectCx<'_>);

    /// A task this renderer scheduled came due.
    fn on_task(&mut self, cx: &mut EffectCx<'_>, due: Due);

    /// The host's layout box changed.
    fn resize(&mut self, _cx: &mut EffectCx<'_>) {}

    /// `true` between `start` and `stop`.
    fn is_running(&self) -> bool;
}

/// Constructs a renderer for a host, or `None` when the host lacks what the effect needs.
pub type EffectFactory = fn(&mut FactoryCx<'_>) -> Option<Box<dyn HoverEffect>>;
