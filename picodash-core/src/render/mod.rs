//! Renderers
//!
//! Each renderer draws one kind of workspace onto a [`DrawSurface`] from a
//! [`RenderContext`]. The set is closed: [`RendererKind`] lists every
//! renderer and [`RendererDispatcher`] routes to them with a `match`.
//!
//! Screen layout shared by all renderers (240x135 panel):
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Title                    ●   │  y = 10
//! │ ──────────────────────────── │  y = 30
//! │ body                         │  y = 40..
//! │                              │
//! │ A: Next            Auto: ON  │  y = h - 25
//! └──────────────────────────────┘
//! ```

mod chrome;
mod clock_face;
mod context;
mod dispatcher;
mod kind;
mod slide;
mod system;
mod text;
mod welcome;

pub use chrome::splash;
pub use clock_face::{DateRenderer, TimeRenderer};
pub use context::{RenderContext, RenderError};
pub use dispatcher::RendererDispatcher;
pub use kind::{Category, RendererKind};
pub use slide::{Shifted, Slide};
pub use system::SystemRenderer;
pub use text::{TextRenderer, WrapLines};
pub use welcome::WelcomeRenderer;

use core::fmt::{self, Write};

use heapless::String;

use crate::traits::DrawSurface;

/// Draws one kind of workspace
pub trait Renderer {
    /// Draw onto a surface that has already been cleared
    ///
    /// Parameters are validated before anything is drawn where possible;
    /// on error the dispatcher replaces the frame with a fallback banner.
    fn draw<S: DrawSurface + ?Sized>(
        &self,
        ctx: &RenderContext<'_>,
        surface: &mut S,
    ) -> Result<(), RenderError>;
}

/// Format into a fixed-capacity line, truncating on overflow
pub(crate) fn format_line<const N: usize>(args: fmt::Arguments<'_>) -> String<N> {
    let mut line = String::new();
    let _ = line.write_fmt(args);
    line
}
