use std::collections::BTreeMap;

use crate::host::element::{CanvasSlot, HostElement, HostId, HostLayout, TextContainer};

/// Owning collection of host elements, iterated in insertion (id) order.
#[derive(Debug, Default)]
pub struct Document {
    hosts: BTreeMap<HostId, HostElement>,
    next_id: u64,
}

impl Document {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new host and return a builder handle to it.
    pub fn create_host(&mut self, layout: HostLayout) -> HostBuilder<'_> {
        let id = HostId(self.next_id);
        self.next_id += 1;
        let host = self
            .hosts
            .entry(id)
            .or_insert_with(|| HostElement::new(id, layout));
        HostBuilder { host }
    }

    /// Shared access to a host.
    pub fn get(&self, id: HostId) -> Option<&HostElement> {
        self.hosts.get(&id)
    }

    /// Exclusive access to a host.
    pub fn get_mut(&mut self, id: HostId) -> Option<&mut HostElement> {
        self.hosts.get_mut(&id)
    }

    /// Detach a host from the document, returning it.
    pub fn remove(&mut self, id: HostId) -> Option<HostElement> {
        self.hosts.remove(&id)
    }

    /// Ids of all hosts in order.
    pub fn ids(&self) -> Vec<HostId> {
        self.hosts.keys().copied().collect()
    }

    /// Number of hosts.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// `true` when the document has no hosts.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// Chained configuration of a freshly created host.
pub struct HostBuilder<'a> {
    host: &'a mut HostElement,
}

impl<'a> HostBuilder<'a> {
    /// Declare an effect name.
    pub fn effect(self, name: impl Into<String>) -> Self {
        self.host.set_effect(Some(name.into()));
        self
    }

    /// Set the device pixel ratio.
    pub fn device_pixel_ratio(self, dpr: f64) -> Self {
        self.host.device_pixel_ratio = dpr;
        self
    }

    /// Add a text container descendant.
    pub fn with_text(self) -> Self {
        self.host.text = Some(TextContainer::default());
        self
    }

    /// Add a drawing-surface descendant.
    pub fn with_canvas(self) -> Self {
        self.host.canvas = Some(CanvasSlot::new());
        self
    }

    /// Add a drawing-surface descendant whose context cannot be acquired.
    pub fn with_broken_canvas(self) -> Self {
        self.host.canvas = Some(CanvasSlot::without_context());
        self
    }

    /// Id of the host being built.
    pub fn id(&self) -> HostId {
        self.host.id()
    }

    /// Finish building and return the host.
    pub fn finish(self) -> &'a mut HostElement {
        self.host
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/document.rs"]
mod tests;
