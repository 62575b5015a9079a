//! Horizontal slide between workspaces
//!
//! During a slide the outgoing workspace is drawn shifted left by the
//! slide offset and the incoming one follows it in from the right edge.

use crate::color::Rgb;
use crate::traits::{DrawSurface, HardwareError, TextSize};

/// A surface whose origin is moved `dx` pixels to the right
///
/// `clear` only fills the shifted screen area, so two shifted draws can
/// share one frame. `present` is a no-op; the owner presents the frame.
pub struct Shifted<'a, S: ?Sized> {
    inner: &'a mut S,
    dx: i32,
}

impl<'a, S: DrawSurface + ?Sized> Shifted<'a, S> {
    pub fn new(inner: &'a mut S, dx: i32) -> Self {
        Self { inner, dx }
    }
}

impl<S: DrawSurface + ?Sized> DrawSurface for Shifted<'_, S> {
    fn size(&self) -> (u16, u16) {
        self.inner.size()
    }

    fn glyph_size(&self, size: TextSize) -> (u16, u16) {
        self.inner.glyph_size(size)
    }

    fn clear(&mut self, color: Rgb) {
        let (w, h) = self.inner.size();
        self.inner.fill_rect(self.dx, 0, w, h, color);
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb) {
        self.inner
            .line((from.0 + self.dx, from.1), (to.0 + self.dx, to.1), color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, color: Rgb) {
        self.inner.fill_rect(x + self.dx, y, width, height, color);
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgb, size: TextSize) {
        self.inner.text(x + self.dx, y, text, color, size);
    }

    fn present(&mut self) -> Result<(), HardwareError> {
        Ok(())
    }
}

/// Progress of a slide away from workspace `from`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slide {
    pub from: usize,
    pub progress_ms: u32,
}

impl Slide {
    pub const fn new(from: usize) -> Self {
        Self {
            from,
            progress_ms: 0,
        }
    }

    /// How far the outgoing workspace has moved left, in pixels
    pub fn offset(&self, width: u16, duration_ms: u32) -> i32 {
        if duration_ms == 0 {
            return width as i32;
        }
        let progress = self.progress_ms.min(duration_ms) as u64;
        (progress * width as u64 / duration_ms as u64) as i32
    }
}
