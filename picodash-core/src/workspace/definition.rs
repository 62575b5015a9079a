//! Validated workspace definition

use heapless::String;

use super::Params;
use crate::config::MAX_NAME_LEN;
use crate::render::{Category, RendererKind};

/// Parameter carrying a configuration error for the diagnostics screen
pub(crate) const ERROR_PARAM: &str = "error";

/// One screen, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkspaceDefinition {
    pub name: String<MAX_NAME_LEN>,
    /// Dwell time while auto-cycling (always > 0)
    pub display_time_ms: u32,
    pub renderer: RendererKind,
    pub params: Params,
}

impl WorkspaceDefinition {
    /// Indicator category of this workspace
    ///
    /// A diagnostics screen that carries an error reports as a fault.
    pub fn category(&self) -> Category {
        if self.renderer == RendererKind::System && self.params.get(ERROR_PARAM).is_some() {
            Category::Fault
        } else {
            self.renderer.category()
        }
    }
}
