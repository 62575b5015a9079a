//! PWM wrappers
//!
//! The LED and backlight pins sit on PWM slices 2-4. A slice is split
//! into its A/B outputs and each one becomes a [`PwmChannel`].

use embassy_rp::pwm::{Config, PwmOutput};
use embedded_hal::pwm::SetDutyCycle;
use picodash_hal::PwmChannel;

/// PWM wrap value; ~1.9kHz at 125MHz with no divider
pub const PWM_TOP: u16 = 0xFFFF;

/// Slice configuration shared by every dashboard output
pub fn slice_config() -> Config {
    let mut config = Config::default();
    config.top = PWM_TOP;
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// One half of a PWM slice
pub struct RpPwm<'d> {
    out: PwmOutput<'d>,
}

impl<'d> RpPwm<'d> {
    /// Create a new channel from a split slice output
    pub fn new(out: PwmOutput<'d>) -> Self {
        Self { out }
    }
}

impl PwmChannel for RpPwm<'_> {
    fn max_duty(&self) -> u16 {
        self.out.max_duty_cycle()
    }

    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(self.out.max_duty_cycle());
        // Infallible on RP2040
        let _ = self.out.set_duty_cycle(duty);
    }
}
