//! Simple TOML parser for the device configuration
//!
//! This is a minimal, allocation-free parser for the subset of TOML the
//! dashboard configuration uses. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Arrays of strings: `instructions = ["Controls:", "A: Next"]`
//! - [section] headers
//! - [[workspace]] array-of-tables headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Floats and datetime values
//! - Inline tables
//! - Dotted keys

use core::fmt;

use heapless::String;

use super::types::{
    DeviceConfig, PinConfig, RawWorkspace, WifiCredentials, BUTTON_COUNT, MAX_PASSWORD_LEN,
    MAX_SSID_LEN,
};
use crate::workspace::{ParamError, MAX_PARAM_VALUE_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line is neither a header, a comment nor `key = value`
    Syntax,
    /// Invalid section header
    InvalidSection,
    /// Invalid value type or range
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// String value longer than its field
    ValueTooLong,
    /// Invalid pin string
    InvalidPin,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseError::Syntax => "syntax error",
            ParseError::InvalidSection => "invalid section",
            ParseError::InvalidValue => "invalid value",
            ParseError::TooManyItems => "too many items",
            ParseError::ValueTooLong => "value too long",
            ParseError::InvalidPin => "invalid pin",
        })
    }
}

impl From<ParamError> for ParseError {
    fn from(e: ParamError) -> Self {
        match e {
            ParamError::TooMany => ParseError::TooManyItems,
            ParamError::KeyTooLong | ParamError::ValueTooLong => ParseError::ValueTooLong,
        }
    }
}

/// A parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineError {
    pub line: u16,
    pub error: ParseError,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Workspace,
    Wifi,
    Input,
    Connectivity,
    Memory,
    Display,
    Indicator,
    Clock,
}

/// Parse TOML configuration into DeviceConfig
pub fn parse_config(input: &str) -> Result<DeviceConfig, LineError> {
    let mut config = DeviceConfig::new();
    let mut section = Section::Root;
    let mut current_workspace: Option<RawWorkspace> = None;
    let mut line_no: u16 = 0;

    for line in input.lines() {
        line_no = line_no.saturating_add(1);
        let at = |error| LineError {
            line: line_no,
            error,
        };
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Array-of-tables header
        if line.starts_with("[[") {
            if !line.ends_with("]]") || line[2..line.len() - 2].trim() != "workspace" {
                return Err(at(ParseError::InvalidSection));
            }
            save_workspace(&mut config, &mut current_workspace).map_err(at)?;
            section = Section::Workspace;
            current_workspace = Some(RawWorkspace::default());
            continue;
        }

        // Plain section header
        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(at(ParseError::InvalidSection));
            }
            save_workspace(&mut config, &mut current_workspace).map_err(at)?;
            section = parse_section_header(&line[1..line.len() - 1]).map_err(at)?;
            if section == Section::Wifi && config.wifi.is_none() {
                config.wifi = Some(WifiCredentials::default());
            }
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(at(ParseError::Syntax))?;
        apply_value(section, key, value, &mut config, &mut current_workspace).map_err(at)?;
    }

    // Save final workspace
    save_workspace(&mut config, &mut current_workspace).map_err(|error| LineError {
        line: line_no,
        error,
    })?;

    Ok(config)
}

/// Parse a single-bracket section header
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "wifi" => Ok(Section::Wifi),
        "input" => Ok(Section::Input),
        "connectivity" => Ok(Section::Connectivity),
        "memory" => Ok(Section::Memory),
        "display" => Ok(Section::Display),
        "indicator" => Ok(Section::Indicator),
        "clock" => Ok(Section::Clock),
        // `[workspace]` is a mistake for `[[workspace]]`
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Remove a trailing `# comment` that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in value.char_indices() {
        match c {
            '\\' if in_string => {
                escaped = !escaped;
                continue;
            }
            '"' if !escaped => in_string = !in_string,
            '#' if !in_string => return value[..i].trim_end(),
            _ => {}
        }
        escaped = false;
    }

    value
}

/// Parse a string value
///
/// Double-quoted strings understand `\n`, `\t`, `\"` and `\\`. Unquoted
/// values are taken literally.
fn parse_string<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let mut out = String::new();

    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        unescape_into(&value[1..value.len() - 1], &mut out)?;
    } else {
        out.push_str(value).map_err(|_| ParseError::ValueTooLong)?;
    }

    Ok(out)
}

/// Append `raw` to `out`, resolving backslash escapes
fn unescape_into<const N: usize>(raw: &str, out: &mut String<N>) -> Result<(), ParseError> {
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        let c = if c == '\\' {
            match chars.next() {
                Some('n') => '\n',
                Some('t') => '\t',
                Some('"') => '"',
                Some('\\') => '\\',
                _ => return Err(ParseError::InvalidValue),
            }
        } else {
            c
        };
        out.push(c).map_err(|_| ParseError::ValueTooLong)?;
    }

    Ok(())
}

/// Parse an array of strings, joining the items with newlines
fn parse_string_list<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut out = String::new();
    let mut rest = inner.trim();
    let mut first = true;

    while !rest.is_empty() {
        let body = rest.strip_prefix('"').ok_or(ParseError::InvalidValue)?;
        let end = find_closing_quote(body).ok_or(ParseError::InvalidValue)?;

        if !first {
            out.push('\n').map_err(|_| ParseError::ValueTooLong)?;
        }
        unescape_into(&body[..end], &mut out)?;
        first = false;

        rest = body[end + 1..].trim_start();
        if let Some(after_comma) = rest.strip_prefix(',') {
            rest = after_comma.trim_start();
        } else if !rest.is_empty() {
            return Err(ParseError::InvalidValue);
        }
    }

    Ok(out)
}

/// Byte offset of the first unescaped `"` in `s`
fn find_closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            '\\' => escaped = !escaped,
            '"' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

/// Parse an integer value (underscore separators allowed)
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: String<24> = String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse an integer that must be greater than zero
fn parse_positive(value: &str) -> Result<u32, ParseError> {
    match parse_int::<u32>(value)? {
        0 => Err(ParseError::InvalidValue),
        n => Ok(n),
    }
}

/// Parse a percentage (0-100)
fn parse_percent(value: &str) -> Result<u8, ParseError> {
    match parse_int::<u8>(value)? {
        p @ 0..=100 => Ok(p),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like "gpio12", "!gpio12", "^!gpio12" or "none"
fn parse_pin(value: &str) -> Result<Option<PinConfig>, ParseError> {
    let text: String<16> = parse_string(value).map_err(|_| ParseError::InvalidPin)?;
    let mut s = text.as_str().trim();

    if s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    let mut pin = PinConfig::default();
    loop {
        if let Some(rest) = s.strip_prefix('^') {
            pin.pull_up = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('!') {
            pin.inverted = true;
            s = rest;
        } else {
            break;
        }
    }

    let num = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    pin.pin = num.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin.pin >= 30 {
        return Err(ParseError::InvalidPin);
    }

    Ok(Some(pin))
}

/// Render any value as parameter text
///
/// Strings are unquoted, lists are joined with newlines, everything else
/// is kept verbatim for the renderer to interpret.
fn param_text(value: &str) -> Result<String<MAX_PARAM_VALUE_LEN>, ParseError> {
    if value.starts_with('[') {
        parse_string_list(value)
    } else {
        parse_string(value)
    }
}

/// Button slot for an `[input]` key
fn button_slot(key: &str) -> Option<usize> {
    let slot = match key {
        "button_a" => 0,
        "button_b" => 1,
        "button_x" => 2,
        "button_y" => 3,
        _ => return None,
    };
    debug_assert!(slot < BUTTON_COUNT);
    Some(slot)
}

/// Apply a parsed value to the configuration
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
    current_workspace: &mut Option<RawWorkspace>,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {
            // No root-level keys; tolerated for forward compatibility
        }
        Section::Workspace => {
            let ws = current_workspace
                .as_mut()
                .ok_or(ParseError::InvalidSection)?;
            match key {
                "name" => ws.name = parse_string(value)?,
                "display_time" => ws.display_time_s = Some(parse_int(value)?),
                "renderer" => ws.renderer = parse_string(value)?,
                _ => ws.params.insert(key, &param_text(value)?)?,
            }
        }
        Section::Wifi => {
            let wifi = config.wifi.get_or_insert_with(WifiCredentials::default);
            match key {
                "ssid" => wifi.ssid = parse_string::<MAX_SSID_LEN>(value)?,
                "password" => wifi.password = parse_string::<MAX_PASSWORD_LEN>(value)?,
                _ => {}
            }
        }
        Section::Input => match key {
            "debounce_ms" => config.input.debounce_ms = parse_int(value)?,
            "stuck_ms" => config.input.stuck_ms = parse_positive(value)?,
            _ => {
                if let Some(slot) = button_slot(key) {
                    config.input.buttons[slot] = parse_pin(value)?;
                }
            }
        },
        Section::Connectivity => match key {
            "backoff_base_ms" => config.connectivity.backoff_base_ms = parse_positive(value)?,
            "backoff_ceiling_ms" => {
                config.connectivity.backoff_ceiling_ms = parse_positive(value)?
            }
            "connect_timeout_ms" => {
                config.connectivity.connect_timeout_ms = parse_positive(value)?
            }
            "poll_interval_ms" => config.connectivity.poll_interval_ms = parse_positive(value)?,
            _ => {}
        },
        Section::Memory => match key {
            "sample_interval_ms" => config.memory.sample_interval_ms = parse_positive(value)?,
            "reclaim_interval_ms" => config.memory.reclaim_interval_ms = parse_positive(value)?,
            _ => {}
        },
        Section::Display => match key {
            "tick_ms" => config.display.tick_ms = parse_positive(value)?,
            "brightness" => config.display.brightness = parse_percent(value)?,
            "auto_cycle" => config.display.auto_cycle = parse_bool(value)?,
            "transition_ms" => config.display.transition_ms = parse_int(value)?,
            _ => {}
        },
        Section::Indicator => {
            if key == "brightness" {
                config.indicator.brightness = parse_percent(value)?;
            }
        }
        Section::Clock => match key {
            "epoch" => config.clock.epoch_s = parse_int(value)?,
            "utc_offset_min" => config.clock.utc_offset_min = parse_int(value)?,
            _ => {}
        },
    }

    Ok(())
}

/// Move a finished workspace into the configuration
fn save_workspace(
    config: &mut DeviceConfig,
    current_workspace: &mut Option<RawWorkspace>,
) -> Result<(), ParseError> {
    if let Some(ws) = current_workspace.take() {
        config
            .workspaces
            .push(ws)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin() {
        let pin = parse_pin("gpio11").unwrap().unwrap();
        assert_eq!(pin.pin, 11);
        assert!(!pin.inverted);
        assert!(!pin.pull_up);

        let pin = parse_pin("!gpio12").unwrap().unwrap();
        assert_eq!(pin.pin, 12);
        assert!(pin.inverted);

        let pin = parse_pin("\"^!gpio15\"").unwrap().unwrap();
        assert_eq!(pin.pin, 15);
        assert!(pin.inverted);
        assert!(pin.pull_up);

        assert_eq!(parse_pin("\"none\"").unwrap(), None);
        assert_eq!(parse_pin("gpio30"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("pin4"), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("wifi"), Ok(Section::Wifi));
        assert_eq!(parse_section_header(" display "), Ok(Section::Display));
        assert_eq!(
            parse_section_header("workspace"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("42 # answer"), "42");
        assert_eq!(strip_comment("\"a # b\""), "\"a # b\"");
        assert_eq!(strip_comment("\"say \\\"hi\\\"\" # c"), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_parse_string_escapes() {
        let s: String<32> = parse_string("\"line one\\nline two\"").unwrap();
        assert_eq!(s.as_str(), "line one\nline two");

        let s: String<32> = parse_string("bare").unwrap();
        assert_eq!(s.as_str(), "bare");

        let r: Result<String<32>, _> = parse_string("\"bad \\q\"");
        assert_eq!(r, Err(ParseError::InvalidValue));

        let r: Result<String<4>, _> = parse_string("\"too long\"");
        assert_eq!(r, Err(ParseError::ValueTooLong));
    }

    #[test]
    fn test_parse_string_list() {
        let s: String<64> = parse_string_list(r#"["Controls:", "A: Next", "B: Info"]"#).unwrap();
        assert_eq!(s.as_str(), "Controls:\nA: Next\nB: Info");

        let s: String<64> = parse_string_list("[]").unwrap();
        assert!(s.is_empty());

        let r: Result<String<64>, _> = parse_string_list(r#"["a" "b"]"#);
        assert_eq!(r, Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_int_underscores() {
        assert_eq!(parse_int::<u32>("1_609_459_200"), Ok(1_609_459_200));
        assert_eq!(parse_int::<i32>("-3"), Ok(-3));
        assert_eq!(parse_int::<u32>("ten"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_workspaces() {
        let config_str = r#"
# Dashboard screens
[[workspace]]
name = "Welcome"
display_time = 8
renderer = "text"
title = "Hello"
text = "Line one\nLine two"

[[workspace]]
name = "Time"
display_time = 10
renderer = "time"
format = "HH:MM"

[[workspace]]
name = "Date"
renderer = "date"
show_weekday = false
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.workspaces.len(), 3);

        let ws = &config.workspaces[0];
        assert_eq!(ws.name.as_str(), "Welcome");
        assert_eq!(ws.display_time_s, Some(8));
        assert_eq!(ws.renderer.as_str(), "text");
        assert_eq!(ws.params.get("title"), Some("Hello"));
        assert_eq!(ws.params.get("text"), Some("Line one\nLine two"));

        assert_eq!(config.workspaces[1].params.get("format"), Some("HH:MM"));
        assert_eq!(config.workspaces[2].display_time_s, None);
        assert_eq!(config.workspaces[2].params.get("show_weekday"), Some("false"));
    }

    #[test]
    fn test_parse_device_sections() {
        let config_str = r#"
[wifi]
ssid = "home"
password = "hunter2hunter2"

[input]
debounce_ms = 30
button_x = "none"

[connectivity]
backoff_base_ms = 1000
backoff_ceiling_ms = 8000

[display]
tick_ms = 50
brightness = 80
auto_cycle = false
transition_ms = 0

[clock]
epoch = 1_700_000_000
utc_offset_min = -300
"#;

        let config = parse_config(config_str).unwrap();
        let wifi = config.wifi.unwrap();
        assert_eq!(wifi.ssid.as_str(), "home");
        assert_eq!(config.input.debounce_ms, 30);
        assert_eq!(config.input.buttons[2], None);
        assert_eq!(config.input.buttons[0].unwrap().pin, 12);
        assert_eq!(config.connectivity.backoff_base_ms, 1000);
        assert_eq!(config.connectivity.backoff_ceiling_ms, 8000);
        assert_eq!(config.connectivity.connect_timeout_ms, 10_000);
        assert_eq!(config.display.tick_ms, 50);
        assert_eq!(config.display.brightness, 80);
        assert!(!config.display.auto_cycle);
        assert_eq!(config.display.transition_ms, 0);
        assert_eq!(config.clock.epoch_s, 1_700_000_000);
        assert_eq!(config.clock.utc_offset_min, -300);
        assert!(config.workspaces.is_empty());
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = parse_config("[[workspace]]\nname = \"A\"\ndisplay_time = soon\n").unwrap_err();
        assert_eq!(
            err,
            LineError {
                line: 3,
                error: ParseError::InvalidValue
            }
        );

        let err = parse_config("\n[screens]\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.error, ParseError::InvalidSection);

        let err = parse_config("[display]\njust some words\n").unwrap_err();
        assert_eq!(err.error, ParseError::Syntax);

        let err = parse_config("[display]\ntick_ms = 0\n").unwrap_err();
        assert_eq!(err.error, ParseError::InvalidValue);
    }

    #[test]
    fn test_zero_display_time_is_kept_for_validation() {
        let config = parse_config("[[workspace]]\nrenderer = \"time\"\ndisplay_time = 0\n").unwrap();
        assert_eq!(config.workspaces[0].display_time_s, Some(0));
    }

    #[test]
    fn test_too_many_workspaces() {
        let mut text: String<512> = String::new();
        for _ in 0..13 {
            text.push_str("[[workspace]]\n").unwrap();
        }
        let err = parse_config(&text).unwrap_err();
        assert_eq!(err.error, ParseError::TooManyItems);
    }
}
