//! ST7789 TFT Display Driver
//!
//! Driver for ST7789-based RGB565 panels via 4-wire SPI (CS + DC).
//! The Pimoroni Display Pack uses a 240x135 window of the controller's
//! 240x320 RAM in landscape orientation.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiBus;
use picodash_hal::OutputPin;

/// ST7789 commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// 16 bits per pixel (RGB565) on both interfaces
const COLMOD_16BIT: u8 = 0x55;

/// Pixels converted per SPI write
const CHUNK_PIXELS: usize = 64;

/// Visible window and orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    pub width: u16,
    pub height: u16,
    /// Column of the first visible pixel in controller RAM
    pub x_offset: u16,
    /// Row of the first visible pixel in controller RAM
    pub y_offset: u16,
    /// Memory access control (rotation and colour order)
    pub madctl: u8,
    /// The panel needs colour inversion for correct colours
    pub invert: bool,
}

impl PanelGeometry {
    /// Pimoroni Pico Display Pack, landscape
    pub const DISPLAY_PACK: PanelGeometry = PanelGeometry {
        width: 240,
        height: 135,
        x_offset: 40,
        y_offset: 53,
        madctl: 0x70,
        invert: true,
    };
}

/// ST7789 driver
pub struct St7789<SPI, CS, DC> {
    spi: SPI,
    cs: CS,
    dc: DC,
    geometry: PanelGeometry,
}

impl<SPI, CS, DC> St7789<SPI, CS, DC>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Create a new ST7789 driver
    pub fn new(spi: SPI, mut cs: CS, dc: DC, geometry: PanelGeometry) -> Self {
        cs.set_high();
        Self {
            spi,
            cs,
            dc,
            geometry,
        }
    }

    /// Initialize the display
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), SPI::Error> {
        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);

        self.command(cmd::COLMOD, &[COLMOD_16BIT])?;
        self.command(cmd::MADCTL, &[self.geometry.madctl])?;
        let inversion = if self.geometry.invert {
            cmd::INVON
        } else {
            cmd::INVOFF
        };
        self.command(inversion, &[])?;
        self.command(cmd::NORON, &[])?;
        delay.delay_ms(10);
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(10);

        Ok(())
    }

    /// Visible window
    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    /// Send a full frame of row-major RGB565 pixels
    ///
    /// Pixels are sent big-endian as the controller expects.
    pub fn write_frame(&mut self, pixels: &[u16]) -> Result<(), SPI::Error> {
        let g = self.geometry;
        self.set_window(0, 0, g.width - 1, g.height - 1)?;

        self.dc.set_high();
        self.cs.set_low();
        let result = self.write_pixels(pixels);
        self.cs.set_high();
        result
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), SPI::Error> {
        if on {
            self.command(cmd::DISPON, &[])
        } else {
            self.command(cmd::DISPOFF, &[])
        }
    }

    /// Enter or leave sleep mode
    pub fn set_sleep(&mut self, sleep: bool) -> Result<(), SPI::Error> {
        if sleep {
            self.command(cmd::SLPIN, &[])
        } else {
            self.command(cmd::SLPOUT, &[])
        }
    }

    #[cfg(test)]
    pub(crate) fn spi(&self) -> &SPI {
        &self.spi
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), SPI::Error> {
        let g = self.geometry;
        let (x0, x1) = (x0 + g.x_offset, x1 + g.x_offset);
        let (y0, y1) = (y0 + g.y_offset, y1 + g.y_offset);

        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();

        self.command(cmd::CASET, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::RASET, &[y0h, y0l, y1h, y1l])?;
        self.command(cmd::RAMWR, &[])
    }

    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), SPI::Error> {
        let mut bytes = [0u8; CHUNK_PIXELS * 2];
        for chunk in pixels.chunks(CHUNK_PIXELS) {
            for (i, px) in chunk.iter().enumerate() {
                bytes[i * 2..i * 2 + 2].copy_from_slice(&px.to_be_bytes());
            }
            self.spi.write(&bytes[..chunk.len() * 2])?;
        }
        self.spi.flush()
    }

    /// Send a command byte followed by its parameters
    fn command(&mut self, cmd: u8, data: &[u8]) -> Result<(), SPI::Error> {
        self.cs.set_low();
        self.dc.set_low();
        let mut result = self.spi.write(&[cmd]).and_then(|()| self.spi.flush());

        if result.is_ok() && !data.is_empty() {
            self.dc.set_high();
            result = self.spi.write(data).and_then(|()| self.spi.flush());
        }

        self.cs.set_high();
        result
    }
}
