//! Button bank
//!
//! Reads the four Display Pack buttons as logical pressed/released
//! levels. Debouncing happens in the engine's input controller.

use picodash_core::config::{PinConfig, BUTTON_COUNT};
use picodash_hal::InputPin;

/// One configured button pin
pub struct ButtonPin<P> {
    pin: P,
    /// If true, pressed = pin LOW
    inverted: bool,
}

impl<P: InputPin> ButtonPin<P> {
    /// Create a new button pin
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    /// Create a button pin using the inversion from its config entry
    pub fn from_config(pin: P, config: &PinConfig) -> Self {
        Self::new(pin, config.inverted)
    }

    /// True if the button is held
    pub fn is_pressed(&self) -> bool {
        self.pin.is_high() != self.inverted
    }
}

/// Buttons A, B, X and Y in that order
///
/// A slot without a pin reads as `None`, which the input controller
/// reports as an unreadable button.
pub struct ButtonBank<P> {
    buttons: [Option<ButtonPin<P>>; BUTTON_COUNT],
}

impl<P: InputPin> ButtonBank<P> {
    /// Create a new button bank
    pub fn new(buttons: [Option<ButtonPin<P>>; BUTTON_COUNT]) -> Self {
        Self { buttons }
    }

    /// Current level of every button
    pub fn read(&self) -> [Option<bool>; BUTTON_COUNT] {
        let mut levels = [None; BUTTON_COUNT];
        for (level, button) in levels.iter_mut().zip(self.buttons.iter()) {
            *level = button.as_ref().map(ButtonPin::is_pressed);
        }
        levels
    }
}
