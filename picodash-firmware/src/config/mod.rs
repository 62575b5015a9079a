//! Configuration loading
//!
//! Loads the dashboard configuration from flash or the embedded default.
//! Parsing is done by `picodash_core::config`.

pub mod loader;

pub use loader::{ConfigPersistence, LoadError};
