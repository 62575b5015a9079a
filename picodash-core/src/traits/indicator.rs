//! Indicator LED trait

use super::HardwareError;
use crate::color::Rgb;

/// An LED that can show an arbitrary colour
pub trait IndicatorLed {
    /// Show `color` until the next call
    fn set_color(&mut self, color: Rgb) -> Result<(), HardwareError>;
}
