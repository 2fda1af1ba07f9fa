//! In-memory host elements (cards) and their descendants.

pub(crate) mod document;
pub(crate) mod element;
pub(crate) mod measure;
