//! WiFi credentials file
//!
//! Credentials can be stored separately from the main configuration as
//! plain lines:
//!
//! ```text
//! SSID=MyNetwork
//! PASSWORD=secret123
//! ```

use super::types::WifiCredentials;

/// Parse `SSID=` / `PASSWORD=` lines
///
/// Returns `None` unless both keys are present and non-empty. Other lines
/// are ignored.
pub fn parse_credentials(text: &str) -> Option<WifiCredentials> {
    let mut ssid = None;
    let mut password = None;

    for line in text.lines() {
        if let Some(value) = line.strip_prefix("SSID=") {
            ssid = Some(value.trim());
        } else if let Some(value) = line.strip_prefix("PASSWORD=") {
            password = Some(value.trim());
        }
    }

    match (ssid, password) {
        (Some(s), Some(p)) if !s.is_empty() && !p.is_empty() => WifiCredentials::new(s, p),
        _ => None,
    }
}
