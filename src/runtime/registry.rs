use std::collections::BTreeMap;

use crate::effects::{EffectFactory, molecule_swarm, text_matrix, vector_field};

/// A registered effect.
#[derive(Clone, Copy, Debug)]
pub struct EffectEntry {
    /// Builds the renderer for a host.
    pub factory: EffectFactory,
    /// Write the normalized pointer position (`--mx` / `--my`) onto the host on enter and move.
    pub pointer_vars: bool,
}

/// Immutable effect-name → factory map, built once.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    entries: BTreeMap<String, EffectEntry>,
}

impl EffectRegistry {
    /// The three built-in effects.
    pub fn builtin() -> Self {
        Self::from_entries([
            (
                text_matrix::NAME,
                EffectEntry {
                    factory: text_matrix::TextMatrix::create,
                    pointer_vars: true,
                },
            ),
            (
                vector_field::NAME,
                EffectEntry {
                    factory: vector_field::VectorField::create,
                    pointer_vars: false,
                },
            ),
            (
                molecule_swarm::NAME,
                EffectEntry {
                    factory: molecule_swarm::MoleculeSwarm::create,
                    pointer_vars: false,
                },
            ),
        ])
    }

    /// Registry from explicit entries. Later duplicates replace earlier ones.
    pub fn from_entries<N: Into<String>>(
        entries: impl IntoIterator<Item = (N, EffectEntry)>,
    ) -> Self {
        Self {
            entries: entries.into_iter().map(|(n, e)| (n.into(), e)).collect(),
        }
    }

    /// Exact-match lookup.
    pub fn get(&self, name: &str) -> Option<&EffectEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/registry.rs"]
mod tests;
