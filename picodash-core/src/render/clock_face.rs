//! Time and date renderers

use heapless::String;

use super::chrome::{self, centered_x};
use super::{format_line, RenderContext, RenderError, Renderer};
use crate::clock::DateTime;
use crate::color::Rgb;
use crate::traits::{DrawSurface, TextSize};

const ACCENT: Rgb = Rgb::BLUE;

/// Time display formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeFormat {
    /// 24-hour with seconds
    HourMinuteSecond,
    /// 24-hour without seconds
    HourMinute,
    /// 12-hour with seconds and AM/PM
    TwelveHour,
}

impl TimeFormat {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("HH:MM:SS") {
            Some(TimeFormat::HourMinuteSecond)
        } else if s.eq_ignore_ascii_case("HH:MM") {
            Some(TimeFormat::HourMinute)
        } else if s.eq_ignore_ascii_case("12H") {
            Some(TimeFormat::TwelveHour)
        } else {
            None
        }
    }

    fn format(self, t: &DateTime) -> String<16> {
        match self {
            TimeFormat::HourMinuteSecond => format_line(format_args!(
                "{:02}:{:02}:{:02}",
                t.hour, t.minute, t.second
            )),
            TimeFormat::HourMinute => format_line(format_args!("{:02}:{:02}", t.hour, t.minute)),
            TimeFormat::TwelveHour => {
                let suffix = if t.hour < 12 { "AM" } else { "PM" };
                let hour = match t.hour % 12 {
                    0 => 12,
                    h => h,
                };
                format_line(format_args!(
                    "{}:{:02}:{:02} {}",
                    hour, t.minute, t.second, suffix
                ))
            }
        }
    }
}

/// Date display formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateFormat {
    Iso,
    DayFirst,
    MonthFirst,
}

impl DateFormat {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("YYYY-MM-DD") {
            Some(DateFormat::Iso)
        } else if s.eq_ignore_ascii_case("DD/MM/YYYY") {
            Some(DateFormat::DayFirst)
        } else if s.eq_ignore_ascii_case("MM/DD/YYYY") {
            Some(DateFormat::MonthFirst)
        } else {
            None
        }
    }

    fn format(self, t: &DateTime) -> String<16> {
        match self {
            DateFormat::Iso => {
                format_line(format_args!("{:04}-{:02}-{:02}", t.year, t.month, t.day))
            }
            DateFormat::DayFirst => {
                format_line(format_args!("{:02}/{:02}/{:04}", t.day, t.month, t.year))
            }
            DateFormat::MonthFirst => {
                format_line(format_args!("{:02}/{:02}/{:04}", t.month, t.day, t.year))
            }
        }
    }
}

/// Small square in the top-right corner, green while connected
fn wifi_dot<S: DrawSurface + ?Sized>(surface: &mut S, connected: bool) {
    let (w, _) = surface.size();
    let color = if connected { Rgb::GREEN } else { Rgb::RED };
    surface.fill_rect(w as i32 - 18, 12, 8, 8, color);
}

/// Live clock
pub struct TimeRenderer;

impl Renderer for TimeRenderer {
    fn draw<S: DrawSurface + ?Sized>(
        &self,
        ctx: &RenderContext<'_>,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        let format = match ctx.params.get("format") {
            None => TimeFormat::HourMinuteSecond,
            Some(f) => TimeFormat::parse(f).ok_or(RenderError::InvalidParam { key: "format" })?,
        };
        let label = ctx.param_or("label", "Current Time");

        chrome::border(surface, ACCENT);
        chrome::header(surface, label, ACCENT);
        wifi_dot(surface, ctx.connectivity.is_connected());

        let (_, h) = surface.size();
        let (_, glyph_h) = surface.glyph_size(TextSize::Large);
        let time = format.format(&ctx.now);
        let x = centered_x(surface, &time, TextSize::Large);
        let y = (h as i32 - glyph_h as i32) / 2;
        surface.text(x, y, &time, Rgb::WHITE, TextSize::Large);

        chrome::footer(surface, "A: Next", ctx.auto_cycle);
        Ok(())
    }
}

/// Calendar date with optional weekday
pub struct DateRenderer;

impl Renderer for DateRenderer {
    fn draw<S: DrawSurface + ?Sized>(
        &self,
        ctx: &RenderContext<'_>,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        let format = match ctx.params.get("format") {
            None => DateFormat::Iso,
            Some(f) => DateFormat::parse(f).ok_or(RenderError::InvalidParam { key: "format" })?,
        };
        let show_weekday = ctx.flag("show_weekday", true)?;
        let label = ctx.param_or("label", "Current Date");

        chrome::border(surface, ACCENT);
        chrome::header(surface, label, ACCENT);

        let (_, h) = surface.size();
        let mid = h as i32 / 2;
        let (_, glyph_h) = surface.glyph_size(TextSize::Large);

        let date = format.format(&ctx.now);
        let x = centered_x(surface, &date, TextSize::Large);
        surface.text(x, mid - glyph_h as i32, &date, Rgb::WHITE, TextSize::Large);

        if show_weekday {
            let day = ctx.now.weekday.name();
            let x = centered_x(surface, day, TextSize::Normal);
            surface.text(x, mid + 8, day, ACCENT, TextSize::Normal);
        }

        chrome::footer(surface, "A: Next", ctx.auto_cycle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::context::tests::context;
    use crate::traits::surface::mock::MockSurface;
    use crate::workspace::Params;

    fn draw_time(format: Option<&str>) -> (Result<(), RenderError>, MockSurface) {
        let mut params = Params::new();
        if let Some(f) = format {
            params.insert("format", f).unwrap();
        }
        let mut surface = MockSurface::new();
        let result = TimeRenderer.draw(&context(&params), &mut surface);
        (result, surface)
    }

    #[test]
    fn test_time_formats() {
        let (result, surface) = draw_time(None);
        assert!(result.is_ok());
        let time = surface.find("13:05:09").unwrap();
        assert_eq!(time.size, TextSize::Large);
        assert!(surface.contains("Current Time"));

        let (_, surface) = draw_time(Some("HH:MM"));
        assert!(surface.contains("13:05"));
        assert!(!surface.contains("13:05:09"));

        let (_, surface) = draw_time(Some("12h"));
        assert!(surface.contains("1:05:09 PM"));
    }

    #[test]
    fn test_twelve_hour_midnight() {
        let t = DateTime::from_unix(0);
        assert_eq!(TimeFormat::TwelveHour.format(&t).as_str(), "12:00:00 AM");
    }

    #[test]
    fn test_bad_time_format() {
        let (result, _) = draw_time(Some("hh-mm"));
        assert_eq!(result, Err(RenderError::InvalidParam { key: "format" }));
    }

    #[test]
    fn test_date_formats() {
        let t = DateTime::from_unix(1_609_459_200);
        assert_eq!(DateFormat::Iso.format(&t).as_str(), "2021-01-01");

        let t = DateTime::from_unix(1_704_067_199);
        assert_eq!(DateFormat::DayFirst.format(&t).as_str(), "31/12/2023");
        assert_eq!(DateFormat::MonthFirst.format(&t).as_str(), "12/31/2023");
    }

    #[test]
    fn test_date_renderer() {
        let mut params = Params::new();
        params.insert("label", "Today").unwrap();
        let mut surface = MockSurface::new();
        DateRenderer.draw(&context(&params), &mut surface).unwrap();

        assert!(surface.contains("Today"));
        assert!(surface.contains("2021-01-01"));
        assert!(surface.contains("Friday"));
    }

    #[test]
    fn test_date_without_weekday() {
        let mut params = Params::new();
        params.insert("show_weekday", "false").unwrap();
        let mut surface = MockSurface::new();
        DateRenderer.draw(&context(&params), &mut surface).unwrap();
        assert!(!surface.contains("Friday"));
    }

    #[test]
    fn test_date_bad_flag() {
        let mut params = Params::new();
        params.insert("show_weekday", "sometimes").unwrap();
        let mut surface = MockSurface::new();
        assert_eq!(
            DateRenderer.draw(&context(&params), &mut surface),
            Err(RenderError::InvalidParam {
                key: "show_weekday"
            })
        );
    }
}
