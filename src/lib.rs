//! cardfx renders decorative card hover effects headlessly.
//!
//! Hosts (cards) declare an effect by name. A [`HoverRuntime`] attaches to every host whose name
//! is registered, builds one controller per host on first pointer enter, and drives the renderer
//! from pointer events and a virtual-clock [`Scheduler`]:
//!
//! - `glow-matrix` writes a flickering digit grid into the host's text container
//! - `vector-field` draws cursor-attracted streamlines onto the host's drawing surface
//! - `molecules` draws drifting molecule sprites onto the host's drawing surface
//!
//! Drawing surfaces are CPU pixmaps, so every frame is reproducible and can be exported.
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub(crate) mod effects;
pub(crate) mod host;
pub(crate) mod render;
pub(crate) mod runtime;
/// Scene files and replay.
pub mod scene;
pub mod theme;

pub use crate::config::{FxConfig, MoleculeConfig, TextMatrixConfig, VectorFieldConfig};
pub use crate::effects::{Capabilities, EffectCx, EffectFactory, FactoryCx, HoverEffect};
pub use crate::foundation::core::{Affine, BezPath, Insets, Point, Rect, Rgb8, Size, Vec2};
pub use crate::foundation::error::{CardFxError, CardFxResult};
pub use crate::host::document::{Document, HostBuilder};
pub use crate::host::element::{CanvasSlot, HostElement, HostId, HostLayout, TextContainer};
pub use crate::host::measure::{MonospaceMeasure, TextMeasure};
pub use crate::render::surface::{DrawingSurface, Painter};
pub use crate::runtime::attach::{HoverRuntime, PROP_POINTER_X, PROP_POINTER_Y};
pub use crate::runtime::controller::Controller;
pub use crate::runtime::registry::{EffectEntry, EffectRegistry};
pub use crate::runtime::scheduler::{Due, Scheduler, TaskHandle, TaskKind};
pub use crate::scene::catalog::{CardListing, effect_for_card};
pub use crate::scene::model::SceneDef;
pub use crate::scene::player::{FrameContent, ScenePlayer, Snapshot};
pub use crate::theme::{StyleSheet, StyleSource, Theme};

/// Registry names of the built-in effects.
pub mod names {
    pub use crate::effects::molecule_swarm::NAME as MOLECULES;
    pub use crate::effects::text_matrix::NAME as GLOW_MATRIX;
    pub use crate::effects::vector_field::NAME as VECTOR_FIELD;
}
