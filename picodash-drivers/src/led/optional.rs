//! LED that may be missing
//!
//! Lets the firmware keep running when the LED PWM could not be set up:
//! every update reports [`HardwareError::Unavailable`] instead.

use picodash_core::color::Rgb;
use picodash_core::traits::{HardwareError, IndicatorLed};

/// An indicator LED, or nothing
pub struct OptionalLed<L>(Option<L>);

impl<L: IndicatorLed> OptionalLed<L> {
    /// Wrap an LED that was set up
    pub fn present(led: L) -> Self {
        Self(Some(led))
    }

    /// No LED
    pub fn absent() -> Self {
        Self(None)
    }

    /// True if an LED is attached
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl<L: IndicatorLed> From<Option<L>> for OptionalLed<L> {
    fn from(led: Option<L>) -> Self {
        Self(led)
    }
}

impl<L: IndicatorLed> IndicatorLed for OptionalLed<L> {
    fn set_color(&mut self, color: Rgb) -> Result<(), HardwareError> {
        match &mut self.0 {
            Some(led) => led.set_color(color),
            None => Err(HardwareError::Unavailable),
        }
    }
}
