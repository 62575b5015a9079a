//! PWM RGB LED
//!
//! Three PWM channels, one per colour. The Display Pack LED is common
//! anode, so a channel is lit when its pin is driven low.

use picodash_core::color::Rgb;
use picodash_core::traits::{HardwareError, IndicatorLed};
use picodash_hal::PwmChannel;

/// RGB LED on three PWM channels
pub struct RgbLed<R, G, B> {
    r: R,
    g: G,
    b: B,
    /// If true, full brightness = 0% duty
    active_low: bool,
}

impl<R: PwmChannel, G: PwmChannel, B: PwmChannel> RgbLed<R, G, B> {
    /// Create a new RGB LED, initially off
    pub fn new(r: R, g: G, b: B, active_low: bool) -> Self {
        let mut led = Self {
            r,
            g,
            b,
            active_low,
        };
        led.write(Rgb::BLACK);
        led
    }

    /// Create a new common-anode LED
    pub fn new_common_anode(r: R, g: G, b: B) -> Self {
        Self::new(r, g, b, true)
    }

    fn level(&self, c: u8) -> u16 {
        if self.active_low {
            255 - c as u16
        } else {
            c as u16
        }
    }

    fn write(&mut self, color: Rgb) {
        let (r, g, b) = (self.level(color.r), self.level(color.g), self.level(color.b));
        self.r.set_fraction(r, 255);
        self.g.set_fraction(g, 255);
        self.b.set_fraction(b, 255);
    }
}

impl<R: PwmChannel, G: PwmChannel, B: PwmChannel> IndicatorLed for RgbLed<R, G, B> {
    fn set_color(&mut self, color: Rgb) -> Result<(), HardwareError> {
        self.write(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock PWM channel with a 0-1000 range
    struct MockPwm {
        duty: u16,
    }

    impl MockPwm {
        fn new() -> Self {
            Self { duty: 500 }
        }
    }

    impl PwmChannel for MockPwm {
        fn max_duty(&self) -> u16 {
            1000
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty = duty.min(1000);
        }
    }

    fn duties(led: &RgbLed<MockPwm, MockPwm, MockPwm>) -> (u16, u16, u16) {
        (led.r.duty, led.g.duty, led.b.duty)
    }

    #[test]
    fn test_active_high_led() {
        let mut led = RgbLed::new(MockPwm::new(), MockPwm::new(), MockPwm::new(), false);

        // Initially off
        assert_eq!(duties(&led), (0, 0, 0));

        led.set_color(Rgb::new(255, 0, 51)).unwrap();
        assert_eq!(duties(&led), (1000, 0, 200));
    }

    #[test]
    fn test_common_anode_led() {
        let mut led = RgbLed::new_common_anode(MockPwm::new(), MockPwm::new(), MockPwm::new());

        // Off means all pins high
        assert_eq!(duties(&led), (1000, 1000, 1000));

        led.set_color(Rgb::RED).unwrap();
        assert_eq!(duties(&led), (0, 1000, 1000));

        led.set_color(Rgb::WHITE).unwrap();
        assert_eq!(duties(&led), (0, 0, 0));
    }

    #[test]
    fn test_led_trait() {
        fn check_led<L: IndicatorLed>(l: &mut L) {
            assert_eq!(l.set_color(Rgb::GREEN), Ok(()));
        }

        let mut led = RgbLed::new_common_anode(MockPwm::new(), MockPwm::new(), MockPwm::new());
        check_led(&mut led);
        assert_eq!(duties(&led).1, 0);
    }
}
