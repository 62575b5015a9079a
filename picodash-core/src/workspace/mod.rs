//! Workspaces
//!
//! A workspace is one configured screen: a name, how long it stays up,
//! which renderer draws it and that renderer's parameters. The registry
//! holds the validated list for the lifetime of the device.

mod definition;
mod params;
mod registry;

pub use definition::WorkspaceDefinition;
pub use params::{Param, ParamError, Params, MAX_PARAMS, MAX_PARAM_KEY_LEN, MAX_PARAM_VALUE_LEN};
pub use registry::{WorkspaceRegistry, FALLBACK_DISPLAY_TIME_MS, FALLBACK_NAME};
