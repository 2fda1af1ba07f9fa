//! JSON scenes: a card page plus a timed pointer script, replayed against a [`crate::HoverRuntime`].

pub mod catalog;
pub mod model;
pub mod player;
