use std::collections::BTreeMap;

use crate::foundation::core::{Insets, Point, Rect, Size};
use crate::render::surface::DrawingSurface;

/// Stable identifier of a host element within a [`crate::Document`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct HostId(pub u64);

impl std::fmt::Display for HostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "host#{}", self.0)
    }
}

/// Layout box of a host element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostLayout {
    /// Border box in client (viewport) coordinates.
    pub rect: Rect,
    /// Computed padding.
    #[serde(default)]
    pub padding: Insets,
}

impl HostLayout {
    /// Layout at `(x, y)` with the given size and no padding.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            rect: Rect::new(x, y, x + width, y + height),
            padding: Insets::default(),
        }
    }

    /// Builder-style padding.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Border-box size.
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    /// Size minus padding, floored at zero.
    pub fn content_size(&self) -> Size {
        let s = self.size();
        Size::new(
            (s.width - self.padding.horizontal()).max(0.0),
            (s.height - self.padding.vertical()).max(0.0),
        )
    }

    /// Translate a client-space point into host-local space.
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.rect.x0, client.y - self.rect.y0)
    }
}

/// Descendant text container written by the text-matrix effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextContainer {
    content: String,
    writes: u64,
    clears: u64,
}

impl TextContainer {
    /// Current text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the text content.
    pub fn set_content(&mut self, text: String) {
        self.content = text;
        self.writes += 1;
    }

    /// Empty the container.
    pub fn clear(&mut self) {
        self.content.clear();
        self.clears += 1;
    }

    /// Number of content replacements so far.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Number of clears so far.
    pub fn clear_count(&self) -> u64 {
        self.clears
    }
}

/// Descendant drawing-surface element.
#[derive(Debug, Default)]
pub struct CanvasSlot {
    surface: DrawingSurface,
    context_lost: bool,
}

impl CanvasSlot {
    /// A slot whose 2D context can be acquired.
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot whose 2D context acquisition fails.
    pub fn without_context() -> Self {
        Self {
            surface: DrawingSurface::new(),
            context_lost: true,
        }
    }

    /// Acquire the 2D drawing surface, or `None` when no context is available.
    pub fn context(&mut self) -> Option<&mut DrawingSurface> {
        if self.context_lost {
            return None;
        }
        Some(&mut self.surface)
    }

    /// Read-only view of the surface (for export and inspection).
    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }
}

/// A host element: a card that may declare a hover effect.
#[derive(Debug)]
pub struct HostElement {
    id: HostId,
    effect: Option<String>,
    /// Layout box.
    pub layout: HostLayout,
    /// Device pixel ratio of the display the host is on.
    pub device_pixel_ratio: f64,
    style: BTreeMap<String, String>,
    /// Text container descendant, if any.
    pub text: Option<TextContainer>,
    /// Drawing-surface descendant, if any.
    pub canvas: Option<CanvasSlot>,
}

impl HostElement {
    pub(crate) fn new(id: HostId, layout: HostLayout) -> Self {
        Self {
            id,
            effect: None,
            layout,
            device_pixel_ratio: 1.0,
            style: BTreeMap::new(),
            text: None,
            canvas: None,
        }
    }

    /// Identifier within the owning document.
    pub fn id(&self) -> HostId {
        self.id
    }

    /// Declared effect name, if non-empty.
    pub fn effect(&self) -> Option<&str> {
        self.effect.as_deref().filter(|s| !s.is_empty())
    }

    /// Set (or clear) the declared effect name.
    pub fn set_effect(&mut self, name: Option<String>) {
        self.effect = name;
    }

    /// Inline style property value.
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    /// Set an inline style property.
    pub fn set_style_property(&mut self, name: &str, value: String) {
        self.style.insert(name.to_string(), value);
    }
}
