//! Theme colors read from the page's computed style.

pub(crate) mod color;

use std::collections::BTreeMap;

use crate::foundation::core::Rgb8;

pub use color::{parse_css_rgb, parse_rgb_triple};

/// Custom property holding the primary accent triple (near-cursor streamlines, chlorine).
pub const PROP_ACCENT: &str = "--fx-accent";
/// Custom property holding the secondary accent triple (sulfur).
pub const PROP_ACCENT_2: &str = "--fx-accent-2";
/// Custom property holding the foreground ink triple (carbon, hydrogen outline).
pub const PROP_INK: &str = "--fx-ink";
/// Custom property holding the muted triple (far-field streamlines, bonds).
pub const PROP_MUTED: &str = "--fx-muted";
/// Custom property holding the warm triple (oxygen).
pub const PROP_WARM: &str = "--fx-warm";
/// Custom property holding the cool triple (nitrogen).
pub const PROP_COOL: &str = "--fx-cool";

/// Read access to computed style values.
pub trait StyleSource {
    /// Computed value of a custom property on the document root, if set.
    fn custom_property(&self, name: &str) -> Option<String>;

    /// Computed `background-color` of the document body, if available.
    fn body_background(&self) -> Option<String>;
}

/// In-memory computed style, used by scenes and tests.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSheet {
    /// Custom properties, including the leading `--`.
    pub properties: BTreeMap<String, String>,
    /// Body background color string, e.g. `rgb(250, 250, 247)`.
    pub body_background: Option<String>,
}

impl StyleSheet {
    /// Builder-style property insertion.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Builder-style body background.
    pub fn with_body_background(mut self, value: impl Into<String>) -> Self {
        self.body_background = Some(value.into());
        self
    }
}

impl StyleSource for StyleSheet {
    fn custom_property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }

    fn body_background(&self) -> Option<String> {
        self.body_background.clone()
    }
}

/// Resolved theme colors, read once when a renderer is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Primary accent.
    pub accent: Rgb8,
    /// Secondary accent.
    pub accent_2: Rgb8,
    /// Foreground ink.
    pub ink: Rgb8,
    /// Muted foreground.
    pub muted: Rgb8,
    /// Warm highlight.
    pub warm: Rgb8,
    /// Cool highlight.
    pub cool: Rgb8,
    /// Body background.
    pub background: Rgb8,
}

impl Theme {
    /// Resolve all theme colors. Missing or malformed values fall back per parser.
    pub fn read(style: &dyn StyleSource) -> Self {
        let triple = |name: &str| {
            style
                .custom_property(name)
                .map(|v| parse_rgb_triple(&v))
                .unwrap_or(Rgb8::BLACK)
        };
        Self {
            accent: triple(PROP_ACCENT),
            accent_2: triple(PROP_ACCENT_2),
            ink: triple(PROP_INK),
            muted: triple(PROP_MUTED),
            warm: triple(PROP_WARM),
            cool: triple(PROP_COOL),
            background: style
                .body_background()
                .map(|v| parse_css_rgb(&v))
                .unwrap_or(Rgb8::WHITE),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/theme.rs"]
mod tests;
