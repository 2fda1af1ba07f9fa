use std::collections::BTreeMap;

use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::CardFxResult;
use crate::host::document::Document;
use crate::host::element::{HostId, HostLayout};
use crate::host::measure::MonospaceMeasure;
use crate::runtime::attach::HoverRuntime;
use crate::scene::model::{SceneDef, ScriptEvent, ScriptStep, SurfaceKind};
use crate::theme::Theme;

/// What a host shows at a point in time.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameContent {
    /// Text container content.
    Text(String),
    /// Drawing surface flattened to opaque RGBA8 over the body background.
    Raster {
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct HostFrame {
    pub key: String,
    pub content: FrameContent,
}

/// Every host's visible output at `at_ms`, in scene order.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub at_ms: f64,
    pub frames: Vec<HostFrame>,
}

/// Drives a [`HoverRuntime`] through a scene script.
#[derive(Debug)]
pub struct ScenePlayer {
    runtime: HoverRuntime,
    keys: Vec<(String, HostId)>,
    by_key: BTreeMap<String, HostId>,
    script: Vec<ScriptStep>,
    next_step: usize,
    background: Rgb8,
}

impl ScenePlayer {
    /// Build the document and runtime for `scene` and attach every declared effect.
    pub fn new(scene: SceneDef) -> CardFxResult<Self> {
        scene.validate()?;
        let mut document = Document::new();
        let mut keys = Vec::with_capacity(scene.hosts.len());
        for h in &scene.hosts {
            let layout = HostLayout::new(h.x, h.y, h.width, h.height).with_padding(h.padding);
            let mut b = document
                .create_host(layout)
                .device_pixel_ratio(h.device_pixel_ratio);
            if let Some(effect) = h.resolved_effect() {
                b = b.effect(effect);
            }
            b = match h.resolved_surface() {
                SurfaceKind::None => b,
                SurfaceKind::Text => b.with_text(),
                SurfaceKind::Canvas => b.with_canvas(),
                SurfaceKind::BrokenCanvas => b.with_broken_canvas(),
            };
            keys.push((h.key.clone(), b.id()));
        }

        let background = Theme::read(&scene.theme).background;
        let mut runtime = HoverRuntime::new(document, scene.config)?
            .with_style(scene.theme)
            .with_measure(MonospaceMeasure::new(scene.glyph_advance));
        runtime.attach_all();

        let mut script = scene.script;
        script.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Ok(Self {
            runtime,
            by_key: keys.iter().cloned().collect(),
            keys,
            script,
            next_step: 0,
            background,
        })
    }

    /// Replay script steps and due tasks up to `t_ms`, interleaved in time order.
    ///
    /// A step and a task due at the same instant run task-first.
    pub fn advance_to(&mut self, t_ms: f64) {
        while let Some(step) = self.script.get(self.next_step) {
            if step.at_ms > t_ms {
                break;
            }
            let step = step.clone();
            self.next_step += 1;
            self.runtime.advance_to(step.at_ms);
            self.apply(&step.event);
        }
        self.runtime.advance_to(t_ms);
    }

    fn apply(&mut self, event: &ScriptEvent) {
        let Some(&id) = self.by_key.get(event.host()) else {
            return;
        };
        tracing::trace!(host = %id, ?event, "script step");
        match *event {
            ScriptEvent::Enter { x, y, .. } => self.runtime.pointer_enter(id, Point::new(x, y)),
            ScriptEvent::Move { x, y, .. } => self.runtime.pointer_move(id, Point::new(x, y)),
            ScriptEvent::Leave { .. } => self.runtime.pointer_leave(id),
            ScriptEvent::Resize { width, height, .. } => {
                let Some(host) = self.runtime.document().get(id) else {
                    return;
                };
                let old = host.layout;
                let layout = HostLayout::new(old.rect.x0, old.rect.y0, width, height)
                    .with_padding(old.padding);
                self.runtime.resize_host(id, layout);
            }
            ScriptEvent::Remove { .. } => {
                self.runtime.remove_host(id);
            }
        }
    }

    /// Current output of every host that still exists and has a descendant.
    pub fn snapshot(&self) -> Snapshot {
        let doc = self.runtime.document();
        let frames = self
            .keys
            .iter()
            .filter_map(|(key, id)| {
                let host = doc.get(*id)?;
                let content = if let Some(text) = &host.text {
                    FrameContent::Text(text.content().to_string())
                } else {
                    let surface = host.canvas.as_ref()?.surface();
                    let (width, height) = surface.backing_size();
                    FrameContent::Raster {
                        width,
                        height,
                        rgba: surface.to_opaque_rgba8(self.background),
                    }
                };
                Some(HostFrame {
                    key: key.clone(),
                    content,
                })
            })
            .collect();
        Snapshot {
            at_ms: self.runtime.now_ms(),
            frames,
        }
    }

    pub fn host_id(&self, key: &str) -> Option<HostId> {
        self.by_key.get(key).copied()
    }

    pub fn runtime(&self) -> &HoverRuntime {
        &self.runtime
    }

    /// Time of the last scripted step, or zero for an empty script.
    pub fn script_end_ms(&self) -> f64 {
        self.script.last().map_or(0.0, |s| s.at_ms)
    }

    pub fn background(&self) -> Rgb8 {
        self.background
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/player.rs"]
mod tests;
