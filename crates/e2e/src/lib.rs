//! Helpers for tests running against a local development node.

pub mod nodes;
pub mod setup;
