//! Renderer dispatch

use heapless::String;

use super::chrome::{self, MARGIN};
use super::{
    format_line, DateRenderer, RenderContext, RenderError, Renderer, RendererKind,
    SystemRenderer, TextRenderer, TimeRenderer, WelcomeRenderer,
};
use crate::color::Rgb;
use crate::traits::{DrawSurface, TextSize};

/// Routes a draw to the renderer for a workspace
///
/// The surface is cleared before every draw. If the renderer fails, the
/// frame is replaced with an error banner and the error is returned for
/// logging; the surface is never left blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct RendererDispatcher;

impl RendererDispatcher {
    /// Create a new dispatcher
    pub const fn new() -> Self {
        Self
    }

    /// Draw one frame with the renderer for `kind`
    pub fn draw<S: DrawSurface + ?Sized>(
        &self,
        kind: RendererKind,
        ctx: &RenderContext<'_>,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        surface.clear(Rgb::BLACK);

        let result = match kind {
            RendererKind::Welcome => WelcomeRenderer.draw(ctx, surface),
            RendererKind::Time => TimeRenderer.draw(ctx, surface),
            RendererKind::Date => DateRenderer.draw(ctx, surface),
            RendererKind::System => SystemRenderer.draw(ctx, surface),
            RendererKind::Text => TextRenderer.draw(ctx, surface),
        };

        if let Err(e) = result {
            draw_error_banner(surface, ctx, &e);
        }
        result
    }
}

fn draw_error_banner<S: DrawSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    error: &RenderError,
) {
    let (w, _) = surface.size();
    surface.clear(Rgb::BLACK);
    chrome::border(surface, Rgb::RED);
    surface.fill_rect(0, 0, w, 30, Rgb::RED);
    surface.text(MARGIN, 8, "Render error", Rgb::WHITE, TextSize::Normal);

    surface.text(MARGIN, 45, ctx.workspace_name, Rgb::WHITE, TextSize::Normal);
    let message: String<48> = format_line(format_args!("{}", error));
    surface.text(MARGIN, 65, &message, Rgb::YELLOW, TextSize::Normal);

    chrome::footer(surface, "A: Next", ctx.auto_cycle);
}
