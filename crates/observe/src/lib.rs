//! Logging initialisation shared by the binaries and the tests of this
//! workspace.
//!
//! Every log line is written to stderr. Stdout belongs to the binaries and
//! carries their machine-readable result.
pub mod config;
pub mod tracing;

pub use config::Config;
