//! 24-bit colours shared by the renderers and the indicator LED

/// An RGB colour, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const PURPLE: Rgb = Rgb::new(255, 0, 255);
    pub const DARK_ORANGE: Rgb = Rgb::new(255, 140, 0);

    /// Create a colour from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `percent` (0-100)
    pub fn scaled(self, percent: u8) -> Self {
        let p = percent.min(100) as u16;
        let scale = |c: u8| (c as u16 * p / 100) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Pack into RGB565 as used by the panel
    pub fn to_rgb565(self) -> u16 {
        ((self.r as u16 & 0xF8) << 8) | ((self.g as u16 & 0xFC) << 3) | (self.b as u16 >> 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled() {
        assert_eq!(Rgb::WHITE.scaled(50), Rgb::new(127, 127, 127));
        assert_eq!(Rgb::DARK_ORANGE.scaled(0), Rgb::BLACK);
        assert_eq!(Rgb::RED.scaled(200), Rgb::RED);
    }

    #[test]
    fn test_to_rgb565() {
        assert_eq!(Rgb::WHITE.to_rgb565(), 0xFFFF);
        assert_eq!(Rgb::RED.to_rgb565(), 0xF800);
        assert_eq!(Rgb::GREEN.to_rgb565(), 0x07E0);
        assert_eq!(Rgb::BLUE.to_rgb565(), 0x001F);
        assert_eq!(Rgb::BLACK.to_rgb565(), 0x0000);
    }
}
