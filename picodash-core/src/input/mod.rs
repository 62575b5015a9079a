//! Button input
//!
//! Raw button levels are debounced per button and mapped to semantic
//! actions through a fixed table:
//!
//! | Button | Action          |
//! |--------|-----------------|
//! | A      | Next            |
//! | B      | ShowDiagnostics |
//! | X      | (unused)        |
//! | Y      | ToggleAutoCycle |

mod controller;
mod debounce;

pub use controller::{ButtonFault, InputController};
pub use debounce::{Debouncer, Edge};

use crate::config::BUTTON_COUNT;
use crate::scheduler::Action;

/// Physical buttons on the Display Pack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    A,
    B,
    X,
    Y,
}

impl Button {
    /// All buttons in table order
    pub const ALL: [Button; BUTTON_COUNT] = [Button::A, Button::B, Button::X, Button::Y];

    /// Position in level arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// Action bound to this button
    pub fn action(self) -> Option<Action> {
        match self {
            Button::A => Some(Action::Next),
            Button::B => Some(Action::ShowDiagnostics),
            Button::X => None,
            Button::Y => Some(Action::ToggleAutoCycle),
        }
    }
}
