//! Input controller

use super::{Button, Debouncer, Edge};
use crate::config::{InputConfig, BUTTON_COUNT};
use crate::scheduler::Action;

/// Why a button is excluded from the action table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonFault {
    /// The pin could not be read (or is not fitted)
    Unreadable,
    /// Held pressed for longer than the stuck threshold
    Stuck,
}

/// Turns raw button levels into at most one action per poll
///
/// Levels are logical (`true` = pressed); any pin inversion has already
/// been applied by the driver. A faulted button produces no actions until
/// it reads released and stable again.
pub struct InputController {
    debouncers: [Debouncer; BUTTON_COUNT],
    faults: [Option<ButtonFault>; BUTTON_COUNT],
    stuck_ms: u32,
}

impl InputController {
    /// Create a new input controller
    pub fn new(config: &InputConfig) -> Self {
        Self {
            debouncers: [Debouncer::new(config.debounce_ms); BUTTON_COUNT],
            faults: [None; BUTTON_COUNT],
            stuck_ms: config.stuck_ms,
        }
    }

    /// Process one reading of every button
    ///
    /// `None` in `levels` means the button could not be read. When several
    /// buttons fire in the same poll, the last one in table order wins.
    pub fn poll(&mut self, now_ms: u64, levels: [Option<bool>; BUTTON_COUNT]) -> Option<Action> {
        let mut action = None;

        for button in Button::ALL {
            let i = button.index();
            let debouncer = &mut self.debouncers[i];
            let Some(pressed) = levels[i] else {
                self.faults[i] = Some(ButtonFault::Unreadable);
                debouncer.restart(now_ms);
                continue;
            };

            let edge = debouncer.update(pressed, now_ms);

            if self.faults[i].is_some() {
                if debouncer.is_settled_released(now_ms) {
                    self.faults[i] = None;
                }
                continue;
            }

            if debouncer.held_ms(now_ms) >= self.stuck_ms as u64 {
                self.faults[i] = Some(ButtonFault::Stuck);
                continue;
            }

            if edge == Some(Edge::Pressed) {
                if let Some(a) = button.action() {
                    action = Some(a);
                }
            }
        }

        action
    }

    /// Current fault on `button`, if any
    pub fn fault(&self, button: Button) -> Option<ButtonFault> {
        self.faults[button.index()]
    }
}
