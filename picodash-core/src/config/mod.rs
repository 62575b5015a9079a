//! Device configuration
//!
//! Types for the device configuration and the parsers that fill them from
//! text: a TOML subset for the main file and `KEY=value` lines for WiFi
//! credentials.

pub mod credentials;
pub mod error;
pub mod toml;
pub mod types;

pub use credentials::parse_credentials;
pub use error::ConfigError;
pub use toml::{parse_config, LineError, ParseError};
pub use types::*;
