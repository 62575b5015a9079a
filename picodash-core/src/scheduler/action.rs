//! Semantic user actions

/// A debounced user intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Move to the next workspace
    Next,
    /// Jump to the diagnostics workspace
    ShowDiagnostics,
    /// Pause or resume auto-cycling
    ToggleAutoCycle,
}
