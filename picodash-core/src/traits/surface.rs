//! Draw surface trait
//!
//! The display driver exposes a frame buffer through this trait. Drawing
//! calls only touch the buffer; [`DrawSurface::present`] pushes it to the
//! panel.

use super::HardwareError;
use crate::color::Rgb;

/// Font sizes available to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// Body text
    Normal,
    /// Clock digits and other large readouts
    Large,
}

/// Primitive drawing operations on a frame buffer
pub trait DrawSurface {
    /// Surface size in pixels (width, height)
    fn size(&self) -> (u16, u16);

    /// Size of one character cell for `size` (width, height)
    fn glyph_size(&self, size: TextSize) -> (u16, u16);

    /// Fill the whole surface
    fn clear(&mut self, color: Rgb);

    /// Draw a 1px line between two points (inclusive)
    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb);

    /// Fill a rectangle
    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, color: Rgb);

    /// Draw text with its top-left corner at (x, y); text past the edge is clipped
    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgb, size: TextSize);

    /// Push the buffer to the panel
    fn present(&mut self) -> Result<(), HardwareError>;

    /// Pixel width of `text` at `size`
    fn text_width(&self, text: &str, size: TextSize) -> u16 {
        let (w, _) = self.glyph_size(size);
        (text.chars().count() as u16).saturating_mul(w)
    }

    /// Draw a 1px rectangle outline
    fn outline(&mut self, x: i32, y: i32, width: u16, height: u16, color: Rgb) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + width as i32 - 1;
        let bottom = y + height as i32 - 1;
        self.line((x, y), (right, y), color);
        self.line((x, y), (x, bottom), color);
        self.line((right, y), (right, bottom), color);
        self.line((x, bottom), (right, bottom), color);
    }
}
