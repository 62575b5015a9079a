//! PWM backlight

use picodash_hal::PwmChannel;

/// Panel backlight on a PWM channel
pub struct Backlight<P> {
    pwm: P,
    percent: u8,
}

impl<P: PwmChannel> Backlight<P> {
    /// Create a new backlight at `percent` brightness
    pub fn new(pwm: P, percent: u8) -> Self {
        let mut backlight = Self { pwm, percent: 0 };
        backlight.set_brightness(percent);
        backlight
    }

    /// Set brightness (0-100, clamped)
    pub fn set_brightness(&mut self, percent: u8) {
        self.percent = percent.min(100);
        self.pwm.set_percent(self.percent);
    }

    /// Current brightness
    pub fn brightness(&self) -> u8 {
        self.percent
    }

    /// Turn the backlight off
    pub fn off(&mut self) {
        self.set_brightness(0);
    }
}
