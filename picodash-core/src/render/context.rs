//! Per-draw render context

use core::fmt;

use crate::clock::DateTime;
use crate::connectivity::ConnectivityState;
use crate::memory::MemoryStats;
use crate::workspace::Params;

/// Snapshot handed to a renderer for one draw
///
/// Built fresh for every draw and dropped afterwards.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub now: DateTime,
    pub connectivity: ConnectivityState,
    pub memory: MemoryStats,
    pub params: &'a Params,
    pub workspace_name: &'a str,
    /// Index of the workspace being drawn
    pub position: usize,
    /// Number of workspaces in the registry
    pub count: usize,
    pub auto_cycle: bool,
}

impl<'a> RenderContext<'a> {
    /// Parameter value, or `default` if unset
    pub fn param_or(&self, key: &str, default: &'a str) -> &'a str {
        self.params.get(key).unwrap_or(default)
    }

    /// Boolean parameter (`true`/`false`), or `default` if unset
    pub fn flag(&self, key: &'static str, default: bool) -> Result<bool, RenderError> {
        match self.params.get(key) {
            None => Ok(default),
            Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
            Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
            Some(_) => Err(RenderError::InvalidParam { key }),
        }
    }
}

/// A renderer could not draw its workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// A parameter has a value the renderer does not understand
    InvalidParam { key: &'static str },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidParam { key } => write!(f, "bad parameter '{}'", key),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clock::WallClock;

    /// Context with fixed values for renderer tests
    pub(crate) fn context(params: &Params) -> RenderContext<'_> {
        RenderContext {
            // 2021-01-01 13:05:09, a Friday
            now: WallClock::default().now(47_109_000),
            connectivity: ConnectivityState::Connected,
            memory: MemoryStats::new(150 * 1024, 50 * 1024),
            params,
            workspace_name: "Test",
            position: 1,
            count: 4,
            auto_cycle: true,
        }
    }

    #[test]
    fn test_flag() {
        let mut params = Params::new();
        params.insert("show_weekday", "False").unwrap();
        params.insert("show_memory", "maybe").unwrap();
        let ctx = context(&params);

        assert_eq!(ctx.flag("show_weekday", true), Ok(false));
        assert_eq!(ctx.flag("show_display", true), Ok(true));
        assert_eq!(
            ctx.flag("show_memory", true),
            Err(RenderError::InvalidParam { key: "show_memory" })
        );
    }

    #[test]
    fn test_param_or() {
        let mut params = Params::new();
        params.insert("title", "Hi").unwrap();
        let ctx = context(&params);
        assert_eq!(ctx.param_or("title", "Message"), "Hi");
        assert_eq!(ctx.param_or("label", "Current Time"), "Current Time");
    }
}
