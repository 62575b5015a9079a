//! Free-form text renderer

use super::chrome::{self, BODY_TOP};
use super::{RenderContext, RenderError, Renderer};
use crate::color::Rgb;
use crate::traits::DrawSurface;

/// Characters per wrapped line
pub const WRAP_WIDTH: usize = 25;

const LINE_STEP: i32 = 20;

/// Splits text into lines of at most `width` characters
///
/// Explicit newlines always break. Long lines break at the last space that
/// fits; a word longer than the line is split.
pub struct WrapLines<'a> {
    rest: Option<&'a str>,
    width: usize,
}

impl<'a> WrapLines<'a> {
    /// Create a new wrapping iterator
    pub fn new(text: &'a str, width: usize) -> Self {
        Self {
            rest: Some(text),
            width: width.max(1),
        }
    }
}

impl<'a> Iterator for WrapLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        let (paragraph, after) = match rest.find('\n') {
            Some(nl) => (&rest[..nl], Some(&rest[nl + 1..])),
            None => (rest, None),
        };

        // First character that does not fit, if the paragraph is too long
        let Some((cut, c)) = paragraph.char_indices().nth(self.width) else {
            self.rest = after;
            return Some(paragraph);
        };

        // The overflowing character itself may be the space to break at
        let (line, remainder) = match paragraph[..cut + c.len_utf8()].rfind(' ') {
            Some(space) if space > 0 => (&paragraph[..space], &rest[space + 1..]),
            _ => (&paragraph[..cut], &rest[cut..]),
        };
        self.rest = Some(remainder);
        Some(line)
    }
}

/// Title and wrapped message
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn draw<S: DrawSurface + ?Sized>(
        &self,
        ctx: &RenderContext<'_>,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        let title = ctx.param_or("title", "Message");
        let text = ctx.param_or("text", "No message content");

        chrome::border(surface, Rgb::WHITE);
        chrome::header(surface, title, Rgb::WHITE);
        chrome::body_lines(
            surface,
            BODY_TOP,
            LINE_STEP,
            WrapLines::new(text, WRAP_WIDTH),
            Rgb::WHITE,
        );
        chrome::footer(surface, "A: Next", ctx.auto_cycle);

        Ok(())
    }
}
