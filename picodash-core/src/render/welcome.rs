//! Welcome screen

use super::chrome::{self, BODY_TOP, HEADER_Y, MARGIN};
use super::{RenderContext, RenderError, Renderer};
use crate::color::Rgb;
use crate::traits::{DrawSurface, TextSize};

const ACCENT: Rgb = Rgb::YELLOW;
const LINE_STEP: i32 = 16;

const DEFAULT_INSTRUCTIONS: &str = "Controls:\nA: Next Screen\nB: System Info\nY: Toggle Auto-Cycle";

/// Title, version and control hints
///
/// `instructions` is a newline-separated list (an array in the
/// configuration file).
pub struct WelcomeRenderer;

impl Renderer for WelcomeRenderer {
    fn draw<S: DrawSurface + ?Sized>(
        &self,
        ctx: &RenderContext<'_>,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        let title = ctx.param_or("title", "PicoDash");
        let version = ctx.param_or("version", "v1.0");
        let instructions = ctx.param_or("instructions", DEFAULT_INSTRUCTIONS);

        let (w, _) = surface.size();
        chrome::border(surface, ACCENT);
        surface.text(MARGIN, HEADER_Y, title, ACCENT, TextSize::Large);

        let version_x = w as i32 - MARGIN - surface.text_width(version, TextSize::Normal) as i32;
        surface.text(version_x, HEADER_Y, version, Rgb::WHITE, TextSize::Normal);

        chrome::body_lines(
            surface,
            BODY_TOP,
            LINE_STEP,
            instructions.split('\n'),
            Rgb::WHITE,
        );

        let wifi = if ctx.connectivity.is_connected() {
            "WiFi: ON"
        } else {
            "WiFi: OFF"
        };
        chrome::footer(surface, wifi, ctx.auto_cycle);
        Ok(())
    }
}
