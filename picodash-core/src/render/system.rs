//! Diagnostics screen

use heapless::String;

use super::chrome::{self, BODY_TOP};
use super::{format_line, RenderContext, RenderError, Renderer, WrapLines};
use crate::color::Rgb;
use crate::connectivity::ConnectivityState;
use crate::traits::DrawSurface;

const ACCENT: Rgb = Rgb::GREEN;
const LINE_STEP: i32 = 16;
/// Characters that fit between the margins in the normal font
const ERROR_WRAP: usize = 27;

/// Memory, display and connectivity details
///
/// A workspace carrying an `error` parameter (the fallback registry) shows
/// that message first, in red.
pub struct SystemRenderer;

impl Renderer for SystemRenderer {
    fn draw<S: DrawSurface + ?Sized>(
        &self,
        ctx: &RenderContext<'_>,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        let show_memory = ctx.flag("show_memory", true)?;
        let show_display = ctx.flag("show_display", true)?;
        let title = ctx.param_or("title", "System Info");
        let error = ctx.params.get("error");

        let accent = if error.is_some() { Rgb::RED } else { ACCENT };
        chrome::border(surface, accent);
        chrome::header(surface, title, accent);

        let mut y = BODY_TOP;
        if let Some(message) = error {
            y = chrome::body_lines(
                surface,
                y,
                LINE_STEP,
                WrapLines::new(message, ERROR_WRAP),
                Rgb::RED,
            );
        }

        let (w, h) = surface.size();
        let mut lines: heapless::Vec<String<32>, 5> = heapless::Vec::new();

        if show_memory {
            let mem = ctx.memory;
            let _ = lines.push(format_line(format_args!("Free: {} KB", mem.free_bytes / 1024)));
            let _ = lines.push(format_line(format_args!(
                "Used: {} KB ({}%)",
                mem.used_bytes / 1024,
                mem.usage_percent()
            )));
        }
        if show_display {
            let _ = lines.push(format_line(format_args!("Display: {}x{}", w, h)));
        }
        let _ = lines.push(format_line(format_args!(
            "Screen: {}/{}",
            ctx.position + 1,
            ctx.count
        )));
        let _ = lines.push(match ctx.connectivity {
            ConnectivityState::Retrying { attempt, .. } => {
                format_line(format_args!("WiFi: Retrying #{}", attempt))
            }
            state => format_line(format_args!("WiFi: {}", state.label())),
        });

        chrome::body_lines(
            surface,
            y,
            LINE_STEP,
            lines.iter().map(String::as_str),
            Rgb::WHITE,
        );

        chrome::footer(surface, "A: Next", ctx.auto_cycle);
        Ok(())
    }
}
