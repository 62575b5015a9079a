//! PWM output abstraction
//!
//! A single duty-cycle channel. The dashboard uses three of them for the
//! RGB indicator LED and one for the panel backlight.

/// One PWM output channel
pub trait PwmChannel {
    /// Duty value that corresponds to a fully-on output
    fn max_duty(&self) -> u16;

    /// Set the raw duty value, clamped to `max_duty()`
    fn set_duty(&mut self, duty: u16);

    /// Set the duty as a fraction `num / denom` of full scale
    fn set_fraction(&mut self, num: u16, denom: u16) {
        let duty = if denom == 0 {
            0
        } else {
            let num = num.min(denom) as u32;
            (self.max_duty() as u32 * num / denom as u32) as u16
        };
        self.set_duty(duty);
    }

    /// Set the duty as a percentage (0-100)
    fn set_percent(&mut self, percent: u8) {
        self.set_fraction(percent.min(100) as u16, 100);
    }
}
