//! Workspace registry

use core::fmt::Write;
use core::ops::Index;

use heapless::{String, Vec};

use super::definition::ERROR_PARAM;
use super::{Params, WorkspaceDefinition, MAX_PARAM_VALUE_LEN};
use crate::config::{ConfigError, RawWorkspace, DEFAULT_DISPLAY_TIME_S, MAX_WORKSPACES};
use crate::render::RendererKind;

/// Name of the single workspace in a fallback registry
pub const FALLBACK_NAME: &str = "Diagnostics";

/// Dwell time of the fallback workspace
pub const FALLBACK_DISPLAY_TIME_MS: u32 = 10_000;

/// Ordered, non-empty list of workspaces
///
/// Built once at boot and never modified. The index of the diagnostics
/// workspace is resolved here so the scheduler does not search for it on
/// every button press.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkspaceRegistry {
    entries: Vec<WorkspaceDefinition, MAX_WORKSPACES>,
    diagnostics: Option<usize>,
    fallback: bool,
}

impl WorkspaceRegistry {
    /// Validate raw workspace entries
    ///
    /// Rejects the whole list on the first invalid entry.
    pub fn load(raw: &[RawWorkspace]) -> Result<Self, ConfigError> {
        if raw.is_empty() {
            return Err(ConfigError::NoWorkspaces);
        }
        if raw.len() > MAX_WORKSPACES {
            return Err(ConfigError::TooManyWorkspaces);
        }

        let mut entries = Vec::new();
        for (i, ws) in raw.iter().enumerate() {
            let index = i as u8;

            let display_time_s = ws.display_time_s.unwrap_or(DEFAULT_DISPLAY_TIME_S);
            if display_time_s <= 0 {
                return Err(ConfigError::InvalidDisplayTime { index });
            }

            let renderer = RendererKind::from_id(&ws.renderer)
                .ok_or(ConfigError::UnknownRenderer { index })?;

            let definition = WorkspaceDefinition {
                name: ws.name.clone(),
                display_time_ms: (display_time_s as u32).saturating_mul(1000),
                renderer,
                params: ws.params.clone(),
            };
            entries
                .push(definition)
                .map_err(|_| ConfigError::TooManyWorkspaces)?;
        }

        Ok(Self::from_entries(entries, false))
    }

    /// Single diagnostics workspace showing `error`
    pub fn fallback(error: &ConfigError) -> Self {
        let mut message: String<MAX_PARAM_VALUE_LEN> = String::new();
        // Truncated on overflow, which is fine for a screen message
        let _ = write!(message, "{}", error);

        let mut params = Params::new();
        // A fresh parameter set always has room for one short key
        let _ = params.insert(ERROR_PARAM, &message);

        let mut entries = Vec::new();
        let _ = entries.push(WorkspaceDefinition {
            name: String::try_from(FALLBACK_NAME).unwrap_or_default(),
            display_time_ms: FALLBACK_DISPLAY_TIME_MS,
            renderer: RendererKind::System,
            params,
        });

        Self::from_entries(entries, true)
    }

    /// Validate `raw`, substituting the fallback registry on failure
    ///
    /// The error is handed back so the caller can log it.
    pub fn load_or_fallback(raw: &[RawWorkspace]) -> (Self, Option<ConfigError>) {
        match Self::load(raw) {
            Ok(registry) => (registry, None),
            Err(e) => (Self::fallback(&e), Some(e)),
        }
    }

    fn from_entries(entries: Vec<WorkspaceDefinition, MAX_WORKSPACES>, fallback: bool) -> Self {
        let diagnostics = entries
            .iter()
            .position(|ws| ws.renderer == RendererKind::System);
        Self {
            entries,
            diagnostics,
            fallback,
        }
    }

    /// Workspace at `index`
    pub fn get(&self, index: usize) -> Option<&WorkspaceDefinition> {
        self.entries.get(index)
    }

    /// Number of workspaces (never zero)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first diagnostics (`system`) workspace
    pub fn diagnostics_index(&self) -> Option<usize> {
        self.diagnostics
    }

    /// True if this registry replaced an invalid configuration
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Iterate over the workspaces in display order
    pub fn iter(&self) -> impl Iterator<Item = &WorkspaceDefinition> {
        self.entries.iter()
    }
}

impl Index<usize> for WorkspaceRegistry {
    type Output = WorkspaceDefinition;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Category;

    fn raw(name: &str, display_time_s: Option<i32>, renderer: &str) -> RawWorkspace {
        RawWorkspace {
            name: String::try_from(name).unwrap(),
            display_time_s,
            renderer: String::try_from(renderer).unwrap(),
            params: Params::new(),
        }
    }

    #[test]
    fn test_load_valid() {
        let entries = [
            raw("Welcome", Some(8), "text"),
            raw("Time", Some(10), "time"),
            raw("Date", Some(15), "DateRenderer"),
        ];
        let registry = WorkspaceRegistry::load(&entries).unwrap();

        assert_eq!(registry.len(), 3);
        assert!(!registry.is_fallback());
        assert_eq!(registry[0].display_time_ms, 8_000);
        assert_eq!(registry[1].renderer, RendererKind::Time);
        assert_eq!(registry[2].renderer, RendererKind::Date);
        assert_eq!(registry.diagnostics_index(), None);
        assert!(registry.get(3).is_none());
    }

    #[test]
    fn test_default_display_time() {
        let registry = WorkspaceRegistry::load(&[raw("Clock", None, "time")]).unwrap();
        assert_eq!(registry[0].display_time_ms, 5_000);
    }

    #[test]
    fn test_zero_display_time_rejected() {
        let entries = [raw("A", Some(8), "text"), raw("B", Some(0), "time")];
        assert_eq!(
            WorkspaceRegistry::load(&entries).unwrap_err(),
            ConfigError::InvalidDisplayTime { index: 1 }
        );
        let entries = [raw("A", Some(-4), "text")];
        assert_eq!(
            WorkspaceRegistry::load(&entries).unwrap_err(),
            ConfigError::InvalidDisplayTime { index: 0 }
        );
    }

    #[test]
    fn test_unknown_renderer_rejected() {
        let entries = [raw("A", Some(8), "text"), raw("B", Some(8), "weather")];
        assert_eq!(
            WorkspaceRegistry::load(&entries).unwrap_err(),
            ConfigError::UnknownRenderer { index: 1 }
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(
            WorkspaceRegistry::load(&[]).unwrap_err(),
            ConfigError::NoWorkspaces
        );
    }

    #[test]
    fn test_diagnostics_index_is_first_system() {
        let entries = [
            raw("Welcome", None, "welcome"),
            raw("Info", None, "system"),
            raw("More", None, "SystemRenderer"),
        ];
        let registry = WorkspaceRegistry::load(&entries).unwrap();
        assert_eq!(registry.diagnostics_index(), Some(1));
    }

    #[test]
    fn test_load_or_fallback() {
        let entries = [raw("Bad", Some(0), "time")];
        let (registry, error) = WorkspaceRegistry::load_or_fallback(&entries);

        assert_eq!(error, Some(ConfigError::InvalidDisplayTime { index: 0 }));
        assert_eq!(registry.len(), 1);
        assert!(registry.is_fallback());
        assert_eq!(registry.diagnostics_index(), Some(0));

        let ws = &registry[0];
        assert_eq!(ws.name.as_str(), FALLBACK_NAME);
        assert_eq!(ws.display_time_ms, FALLBACK_DISPLAY_TIME_MS);
        assert_eq!(ws.renderer, RendererKind::System);
        assert_eq!(
            ws.params.get(ERROR_PARAM),
            Some("workspace 1: bad display_time")
        );
        assert_eq!(ws.category(), Category::Fault);
    }

    #[test]
    fn test_valid_system_workspace_is_info() {
        let registry = WorkspaceRegistry::load(&[raw("Info", None, "system")]).unwrap();
        assert_eq!(registry[0].category(), Category::Info);
    }
}
