//! Workspace cycling
//!
//! The [`CycleScheduler`] owns the registry, the cycle state, the draw
//! surface and the status indicator. Each tick it applies at most one
//! pending action (or advances the auto-cycle timer), then draws and
//! presents exactly one frame.

mod action;
mod cycle;

pub use action::Action;
pub use cycle::{CycleScheduler, CycleState, TickEnv, TickReport, Transition};
