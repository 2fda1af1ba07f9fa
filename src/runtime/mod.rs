//! Registry, controllers, attachment and the cooperative task queue.

pub(crate) mod attach;
pub(crate) mod controller;
pub(crate) mod registry;
pub(crate) mod scheduler;
