//! Display Pack panel
//!
//! Pairs a framebuffer with the ST7789 so the engine sees one
//! [`DrawSurface`]: drawing stays in RAM until `present`.

use embedded_hal::spi::SpiBus;
use picodash_core::color::Rgb;
use picodash_core::traits::{DrawSurface, HardwareError, TextSize};
use picodash_hal::OutputPin;

use super::framebuffer::Framebuffer;
use super::st7789::St7789;

/// Framebuffered ST7789 panel
pub struct Panel<'a, SPI, CS, DC> {
    fb: Framebuffer<'a>,
    lcd: St7789<SPI, CS, DC>,
}

impl<'a, SPI, CS, DC> Panel<'a, SPI, CS, DC>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Create a new panel
    ///
    /// Returns `None` if the framebuffer size differs from the panel window.
    pub fn new(fb: Framebuffer<'a>, lcd: St7789<SPI, CS, DC>) -> Option<Self> {
        let g = lcd.geometry();
        if DrawSurface::size(&fb) != (g.width, g.height) {
            return None;
        }
        Some(Self { fb, lcd })
    }

    /// Direct access to the controller (sleep, display on/off)
    pub fn lcd(&mut self) -> &mut St7789<SPI, CS, DC> {
        &mut self.lcd
    }
}

impl<SPI, CS, DC> DrawSurface for Panel<'_, SPI, CS, DC>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    DC: OutputPin,
{
    fn size(&self) -> (u16, u16) {
        DrawSurface::size(&self.fb)
    }

    fn glyph_size(&self, size: TextSize) -> (u16, u16) {
        self.fb.glyph_size(size)
    }

    fn clear(&mut self, color: Rgb) {
        DrawSurface::clear(&mut self.fb, color);
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb) {
        self.fb.line(from, to, color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, color: Rgb) {
        self.fb.fill_rect(x, y, width, height, color);
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgb, size: TextSize) {
        self.fb.text(x, y, text, color, size);
    }

    fn present(&mut self) -> Result<(), HardwareError> {
        self.lcd
            .write_frame(self.fb.pixels())
            .map_err(|_| HardwareError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::st7789::tests::{MockPin, MockSpi};
    use crate::display::st7789::PanelGeometry;
    use embedded_hal::spi::{ErrorKind, ErrorType};

    const PIXELS: usize = 240 * 135;

    struct BrokenSpi;

    impl ErrorType for BrokenSpi {
        type Error = ErrorKind;
    }

    impl SpiBus<u8> for BrokenSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn flush(&mut self) -> Result<(), ErrorKind> {
            Ok(())
        }
    }

    fn lcd<SPI: SpiBus<u8>>(spi: SPI) -> St7789<SPI, MockPin, MockPin> {
        St7789::new(
            spi,
            MockPin::new(),
            MockPin::new(),
            PanelGeometry::DISPLAY_PACK,
        )
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let mut pixels = [0u16; PIXELS];
        let fb = Framebuffer::new(&mut pixels, 120, 135).unwrap();
        assert!(Panel::new(fb, lcd(MockSpi::new())).is_none());
    }

    #[test]
    fn test_present_sends_frame() {
        let mut pixels = [0u16; PIXELS];
        let fb = Framebuffer::new(&mut pixels, 240, 135).unwrap();
        let mut panel = match Panel::new(fb, lcd(MockSpi::new())) {
            Some(p) => p,
            None => panic!("panel rejected matching framebuffer"),
        };

        assert_eq!(DrawSurface::size(&panel), (240, 135));
        DrawSurface::clear(&mut panel, Rgb::WHITE);
        panel.present().unwrap();

        // Window setup, then every pixel as two bytes
        assert_eq!(panel.lcd().spi().total, 11 + PIXELS * 2);
    }

    #[test]
    fn test_present_bus_error() {
        let mut pixels = [0u16; PIXELS];
        let fb = Framebuffer::new(&mut pixels, 240, 135).unwrap();
        let Some(mut panel) = Panel::new(fb, lcd(BrokenSpi)) else {
            panic!("panel rejected matching framebuffer");
        };

        assert_eq!(panel.present(), Err(HardwareError::Bus));
    }
}
