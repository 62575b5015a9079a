//! Status indicator

use crate::color::Rgb;
use crate::render::Category;
use crate::scheduler::CycleState;
use crate::traits::{HardwareError, IndicatorLed};
use crate::workspace::WorkspaceDefinition;

/// Maps the displayed workspace to an LED colour
///
/// The colour comes from the workspace's category, scaled by the
/// configured brightness and halved while auto-cycle is paused. The LED is
/// only written when the colour changes.
pub struct StatusIndicator<L> {
    led: L,
    brightness: u8,
    shown: Option<Rgb>,
}

impl<L: IndicatorLed> StatusIndicator<L> {
    /// Create a new status indicator
    pub fn new(led: L, brightness: u8) -> Self {
        Self {
            led,
            brightness: brightness.min(100),
            shown: None,
        }
    }

    /// Colour for `workspace` given the cycle state
    pub fn color_for(&self, state: &CycleState, workspace: &WorkspaceDefinition) -> Rgb {
        let brightness = if state.auto_cycle_enabled {
            self.brightness
        } else {
            self.brightness / 2
        };
        workspace.category().color().scaled(brightness)
    }

    /// Show the colour for the current workspace
    pub fn update(
        &mut self,
        state: &CycleState,
        workspace: &WorkspaceDefinition,
    ) -> Result<(), HardwareError> {
        let color = self.color_for(state, workspace);
        self.show(color)
    }

    /// Boot colour
    pub fn startup(&mut self) -> Result<(), HardwareError> {
        self.show(Category::Greeting.color().scaled(self.brightness))
    }

    /// Fault colour, independent of any workspace
    pub fn fault(&mut self) -> Result<(), HardwareError> {
        self.show(Category::Fault.color().scaled(self.brightness))
    }

    /// Colour currently on the LED, if the last write succeeded
    pub fn shown(&self) -> Option<Rgb> {
        self.shown
    }

    fn show(&mut self, color: Rgb) -> Result<(), HardwareError> {
        if self.shown == Some(color) {
            return Ok(());
        }
        match self.led.set_color(color) {
            Ok(()) => {
                self.shown = Some(color);
                Ok(())
            }
            Err(e) => {
                // Retry on the next update
                self.shown = None;
                Err(e)
            }
        }
    }
}
