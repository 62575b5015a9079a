//! RGB565 framebuffer
//!
//! Drawing goes to RAM first and the panel driver sends the whole buffer
//! in one transfer, so a frame is never visible half-drawn.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_8X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use picodash_core::color::Rgb;
use picodash_core::traits::{DrawSurface, HardwareError, TextSize};

/// Convert an engine colour to the panel's pixel format
pub fn to_rgb565(color: Rgb) -> Rgb565 {
    Rgb565::new(color.r >> 3, color.g >> 2, color.b >> 3)
}

fn font(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        TextSize::Normal => &FONT_8X13,
        TextSize::Large => &FONT_10X20,
    }
}

/// Row-major RGB565 pixel buffer
///
/// The buffer is borrowed so the firmware can place it in a static.
pub struct Framebuffer<'a> {
    pixels: &'a mut [u16],
    width: u16,
    height: u16,
}

impl<'a> Framebuffer<'a> {
    /// Create a new framebuffer over `pixels`
    ///
    /// Returns `None` if the slice is smaller than `width * height`.
    pub fn new(pixels: &'a mut [u16], width: u16, height: u16) -> Option<Self> {
        let len = width as usize * height as usize;
        let pixels = pixels.get_mut(..len)?;
        Some(Self {
            pixels,
            width,
            height,
        })
    }

    /// Raw pixels, row-major
    pub fn pixels(&self) -> &[u16] {
        self.pixels
    }

    /// Pixel at (x, y), if inside the buffer
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let raw = self.pixels[y as usize * self.width as usize + x as usize];
        Some(Rgb565::from(embedded_graphics::pixelcolor::raw::RawU16::new(raw)))
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = color.into_storage();
    }
}

impl DrawTarget for Framebuffer<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        let raw = color.into_storage();
        let width = self.width as usize;
        for y in area.top_left.y..=bottom_right.y {
            let row = y as usize * width;
            let start = row + area.top_left.x as usize;
            let end = row + bottom_right.x as usize + 1;
            self.pixels[start..end].fill(raw);
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer<'_> {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawSurface for Framebuffer<'_> {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn glyph_size(&self, size: TextSize) -> (u16, u16) {
        let s = font(size).character_size;
        (s.width as u16, s.height as u16)
    }

    fn clear(&mut self, color: Rgb) {
        self.pixels.fill(to_rgb565(color).into_storage());
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb) {
        let _ = Line::new(Point::new(from.0, from.1), Point::new(to.0, to.1))
            .into_styled(PrimitiveStyle::with_stroke(to_rgb565(color), 1))
            .draw(self);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, color: Rgb) {
        let area = Rectangle::new(Point::new(x, y), Size::new(width as u32, height as u32));
        let _ = self.fill_solid(&area, to_rgb565(color));
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgb, size: TextSize) {
        let style = MonoTextStyle::new(font(size), to_rgb565(color));
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }

    /// A bare framebuffer has no panel behind it
    fn present(&mut self) -> Result<(), HardwareError> {
        Ok(())
    }
}
