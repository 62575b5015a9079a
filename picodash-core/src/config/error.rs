//! Configuration errors

use core::fmt;

use super::toml::LineError;

/// The workspace configuration is missing or invalid
///
/// Recovered locally: the caller swaps in the fallback registry, which
/// shows this error on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The configuration text could not be parsed
    Parse(LineError),
    /// The configuration lists no workspaces
    NoWorkspaces,
    /// More workspaces than the registry can hold
    TooManyWorkspaces,
    /// A workspace has a zero or negative display time
    InvalidDisplayTime { index: u8 },
    /// A workspace names a renderer that does not exist
    UnknownRenderer { index: u8 },
}

impl From<LineError> for ConfigError {
    fn from(e: LineError) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "line {}: {}", e.line, e.error),
            ConfigError::NoWorkspaces => f.write_str("no workspaces"),
            ConfigError::TooManyWorkspaces => f.write_str("too many workspaces"),
            ConfigError::InvalidDisplayTime { index } => {
                write!(f, "workspace {}: bad display_time", index + 1)
            }
            ConfigError::UnknownRenderer { index } => {
                write!(f, "workspace {}: unknown renderer", index + 1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseError;
    use core::fmt::Write;
    use heapless::String;

    #[test]
    fn test_display_messages() {
        let mut s: String<48> = String::new();
        write!(s, "{}", ConfigError::InvalidDisplayTime { index: 0 }).unwrap();
        assert_eq!(s.as_str(), "workspace 1: bad display_time");

        s.clear();
        let e = ConfigError::from(LineError {
            line: 7,
            error: ParseError::InvalidValue,
        });
        write!(s, "{}", e).unwrap();
        assert_eq!(s.as_str(), "line 7: invalid value");
    }
}
