//! Theme color parsing

use ratatui::style::Color;
use std::collections::HashMap;

/// Parse hex color string (e.g., "#2ecc71" or "2ecc71")
pub fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.trim().trim_start_matches('#');
    if s.len() != 6 || !s.is_ascii() {
        return Err(format!("invalid hex color: expected 6 characters, got '{}'", s));
    }

    let channel = |range: std::ops::Range<usize>, name: &str| {
        u8::from_str_radix(&s[range], 16)
            .map_err(|_| format!("invalid hex color: bad {} component in '{}'", name, s))
    };

    Ok(Color::Rgb(
        channel(0..2, "red")?,
        channel(2..4, "green")?,
        channel(4..6, "blue")?,
    ))
}

/// Parse ANSI color name to ratatui Color
pub fn parse_ansi_name(name: &str) -> Option<Color> {
    match name.to_lowercase().replace('-', "_").as_str() {
        "default" | "reset" | "transparent" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "light_red" | "lightred" => Some(Color::LightRed),
        "light_green" | "lightgreen" => Some(Color::LightGreen),
        "light_yellow" | "lightyellow" => Some(Color::LightYellow),
        "light_blue" | "lightblue" => Some(Color::LightBlue),
        "light_magenta" | "lightmagenta" => Some(Color::LightMagenta),
        "light_cyan" | "lightcyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        _ => None,
    }
}

/// Resolve a color string: def reference, hex, or ANSI name
pub fn resolve_color(value: &str, defs: &HashMap<String, String>) -> Option<Color> {
    let value = value.trim();

    if let Some(hex) = defs.get(value) {
        return parse_hex(hex).ok();
    }

    if value.starts_with('#') {
        return parse_hex(value).ok();
    }

    parse_ansi_name(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#2ecc71"), Ok(Color::Rgb(46, 204, 113)));
        assert_eq!(parse_hex("2ECC71"), Ok(Color::Rgb(46, 204, 113)));
        assert!(parse_hex("#fff").is_err());
        assert!(parse_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_parse_ansi_name() {
        assert_eq!(parse_ansi_name("red"), Some(Color::Red));
        assert_eq!(parse_ansi_name("dark-gray"), Some(Color::DarkGray));
        assert_eq!(parse_ansi_name("transparent"), Some(Color::Reset));
        assert_eq!(parse_ansi_name("unknown"), None);
    }

    #[test]
    fn test_resolve_color() {
        let mut defs = HashMap::new();
        defs.insert("blue1".to_string(), "#5e81ac".to_string());

        assert_eq!(resolve_color("blue1", &defs), Some(Color::Rgb(94, 129, 172)));
        assert_eq!(resolve_color("#ff0000", &defs), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(resolve_color(" cyan ", &defs), Some(Color::Cyan));
        assert_eq!(resolve_color("notacolor", &defs), None);
    }
}
