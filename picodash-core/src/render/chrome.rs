//! Border, header and footer shared by the renderers

use crate::color::Rgb;
use crate::traits::{DrawSurface, TextSize};

pub(crate) const MARGIN: i32 = 10;
pub(crate) const HEADER_Y: i32 = 10;
pub(crate) const RULE_Y: i32 = 30;
pub(crate) const BODY_TOP: i32 = 40;
/// Body text stops this far above the bottom edge
pub(crate) const BODY_BOTTOM_GAP: i32 = 30;
/// Footer baseline distance from the bottom edge
pub(crate) const FOOTER_GAP: i32 = 25;

pub(crate) const FOOTER_COLOR: Rgb = Rgb::DARK_ORANGE;

/// X coordinate that centres `text` horizontally
pub(crate) fn centered_x<S: DrawSurface + ?Sized>(surface: &S, text: &str, size: TextSize) -> i32 {
    let (w, _) = surface.size();
    ((w as i32 - surface.text_width(text, size) as i32) / 2).max(0)
}

/// One-pixel frame around the whole surface
pub(crate) fn border<S: DrawSurface + ?Sized>(surface: &mut S, color: Rgb) {
    let (w, h) = surface.size();
    surface.outline(0, 0, w, h, color);
}

/// Title line with a rule underneath
pub(crate) fn header<S: DrawSurface + ?Sized>(surface: &mut S, title: &str, color: Rgb) {
    let (w, _) = surface.size();
    surface.text(MARGIN, HEADER_Y, title, color, TextSize::Normal);
    surface.line((MARGIN, RULE_Y), (w as i32 - MARGIN, RULE_Y), color);
}

/// Footer with a hint on the left and the auto-cycle state on the right
pub(crate) fn footer<S: DrawSurface + ?Sized>(surface: &mut S, hint: &str, auto_cycle: bool) {
    let (w, h) = surface.size();
    let y = h as i32 - FOOTER_GAP;
    let auto = if auto_cycle { "Auto: ON" } else { "Auto: OFF" };
    let auto_x = w as i32 - MARGIN - surface.text_width(auto, TextSize::Normal) as i32;

    surface.text(MARGIN, y, hint, FOOTER_COLOR, TextSize::Normal);
    surface.text(auto_x, y, auto, FOOTER_COLOR, TextSize::Normal);
}

/// Draw body lines from `top` downwards until the footer area
///
/// Returns the y coordinate below the last line drawn.
pub(crate) fn body_lines<'t, S, I>(
    surface: &mut S,
    top: i32,
    step: i32,
    lines: I,
    color: Rgb,
) -> i32
where
    S: DrawSurface + ?Sized,
    I: IntoIterator<Item = &'t str>,
{
    let (_, h) = surface.size();
    let limit = h as i32 - BODY_BOTTOM_GAP;
    let mut y = top;

    for line in lines {
        if y >= limit {
            break;
        }
        surface.text(MARGIN, y, line, color, TextSize::Normal);
        y += step;
    }

    y
}

/// Boot screen, drawn once before the first tick
pub fn splash<S: DrawSurface + ?Sized>(surface: &mut S) {
    let (_, h) = surface.size();
    let h = h as i32;

    surface.clear(Rgb::BLACK);
    border(surface, Rgb::YELLOW);

    let title = "PicoDash";
    let x = centered_x(surface, title, TextSize::Large);
    surface.text(x, h / 2 - 20, title, Rgb::YELLOW, TextSize::Large);

    let status = "Starting...";
    let x = centered_x(surface, status, TextSize::Normal);
    surface.text(x, h / 2 + 10, status, Rgb::WHITE, TextSize::Normal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::surface::mock::MockSurface;

    #[test]
    fn test_footer_positions() {
        let mut surface = MockSurface::new();
        footer(&mut surface, "A: Next", false);

        let hint = surface.find("A: Next").unwrap();
        assert_eq!((hint.x, hint.y), (10, 110));
        assert_eq!(hint.color, FOOTER_COLOR);

        // Right-aligned inside the margin
        let auto = surface.find("Auto: OFF").unwrap();
        assert_eq!(auto.x, 240 - 10 - 9 * 8);
    }

    #[test]
    fn test_body_lines_stop_above_footer() {
        let mut surface = MockSurface::new();
        let lines = ["one", "two", "three", "four", "five", "six"];
        body_lines(&mut surface, BODY_TOP, 20, lines, Rgb::WHITE);

        // 40, 60, 80, 100; 120 would overlap the footer
        assert_eq!(surface.texts.len(), 4);
        assert!(!surface.contains("five"));
    }

    #[test]
    fn test_splash() {
        let mut surface = MockSurface::new();
        splash(&mut surface);
        assert_eq!(surface.clears, 1);

        let title = surface.find("PicoDash").unwrap();
        assert_eq!(title.size, TextSize::Large);
        assert_eq!(title.x, (240 - 80) / 2);
        assert!(surface.contains("Starting..."));
    }
}
