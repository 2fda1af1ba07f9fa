use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context as _;

use crate::config::FxConfig;
use crate::effects::{molecule_swarm, text_matrix, vector_field};
use crate::foundation::core::Insets;
use crate::foundation::error::{CardFxError, CardFxResult};
use crate::scene::catalog::effect_for_card;
use crate::theme::StyleSheet;

/// Largest host extent, in CSS pixels, a scene may declare.
pub const MAX_HOST_EXTENT: f64 = 65_535.0;

fn extent_ok(v: f64) -> bool {
    (0.0..=MAX_HOST_EXTENT).contains(&v)
}

/// A replayable page: hosts, theme, config and a timed pointer script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    pub hosts: Vec<HostDef>,
    #[serde(default)]
    pub theme: StyleSheet,
    #[serde(default)]
    pub config: FxConfig,
    /// Per-glyph advance of the text containers' font.
    #[serde(default = "default_glyph_advance")]
    pub glyph_advance: f64,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

fn default_glyph_advance() -> f64 {
    7.8
}

fn default_dpr() -> f64 {
    1.0
}

/// Which descendant a host carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    None,
    Text,
    Canvas,
    /// A drawing surface whose context cannot be acquired.
    BrokenCanvas,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostDef {
    /// Scene-local name referenced by the script.
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub padding: Insets,
    #[serde(default = "default_dpr")]
    pub device_pixel_ratio: f64,
    /// Explicit effect attribute. When absent, derived from `title` and `file`.
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    /// Descendant kind. When absent, derived from the effect.
    #[serde(default)]
    pub surface: Option<SurfaceKind>,
}

impl HostDef {
    /// Declared effect, falling back to keyword assignment from the card title and file.
    pub fn resolved_effect(&self) -> Option<String> {
        if let Some(effect) = &self.effect {
            return Some(effect.clone());
        }
        let title = self.title.as_deref().unwrap_or_default();
        let file = self.file.as_deref().unwrap_or_default();
        if title.is_empty() && file.is_empty() {
            return None;
        }
        effect_for_card(title, file).map(str::to_string)
    }

    pub fn resolved_surface(&self) -> SurfaceKind {
        if let Some(kind) = self.surface {
            return kind;
        }
        match self.resolved_effect().as_deref() {
            Some(text_matrix::NAME) => SurfaceKind::Text,
            Some(vector_field::NAME | molecule_swarm::NAME) => SurfaceKind::Canvas,
            _ => SurfaceKind::None,
        }
    }
}

/// One scripted event at a scene time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptStep {
    pub at_ms: f64,
    #[serde(flatten)]
    pub event: ScriptEvent,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Pointer enters the host at client `(x, y)`.
    Enter { host: String, x: f64, y: f64 },
    Move { host: String, x: f64, y: f64 },
    Leave { host: String },
    /// New layout box size; position is kept.
    Resize {
        host: String,
        width: f64,
        height: f64,
    },
    Remove { host: String },
}

impl ScriptEvent {
    pub fn host(&self) -> &str {
        match self {
            Self::Enter { host, .. }
            | Self::Move { host, .. }
            | Self::Leave { host }
            | Self::Resize { host, .. }
            | Self::Remove { host } => host,
        }
    }
}

impl SceneDef {
    /// Parse and validate a JSON scene.
    pub fn from_json_str(s: &str) -> CardFxResult<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_path(path: &Path) -> CardFxResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> CardFxResult<()> {
        self.config.validate()?;
        if !(self.glyph_advance.is_finite() && self.glyph_advance >= 0.0) {
            return Err(CardFxError::validation("glyph_advance must be >= 0"));
        }
        let mut keys = BTreeSet::new();
        for h in &self.hosts {
            if !keys.insert(h.key.as_str()) {
                return Err(CardFxError::validation(format!(
                    "duplicate host key '{}'",
                    h.key
                )));
            }
            if !(extent_ok(h.width) && extent_ok(h.height)) {
                return Err(CardFxError::validation(format!(
                    "host '{}' size must be within 0..={MAX_HOST_EXTENT}",
                    h.key
                )));
            }
            if !(h.x.is_finite() && h.y.is_finite()) {
                return Err(CardFxError::validation(format!(
                    "host '{}' position must be finite",
                    h.key
                )));
            }
        }
        for step in &self.script {
            if !(step.at_ms.is_finite() && step.at_ms >= 0.0) {
                return Err(CardFxError::validation("script times must be >= 0"));
            }
            if let ScriptEvent::Resize { width, height, .. } = step.event
                && !(extent_ok(width) && extent_ok(height))
            {
                return Err(CardFxError::validation(format!(
                    "resize of '{}' must be within 0..={MAX_HOST_EXTENT}",
                    step.event.host()
                )));
            }
            if !keys.contains(step.event.host()) {
                return Err(CardFxError::validation(format!(
                    "script references unknown host '{}'",
                    step.event.host()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
