//! Configuration file support for mdiff
//!
//! Config file location: `~/.config/mdiff/config.toml` (XDG_CONFIG_HOME)
//!
//! Example config:
//! ```toml
//! [ui]
//! line_numbers = true
//!
//! [ui.theme.defs]
//! blue1 = "#5e81ac"
//!
//! [ui.theme.colors]
//! diff_removed = "blue1"
//! diff_added = "red"
//!
//! [keys]
//! page_down = ["right", "pagedown", "space", "h"]
//! page_up = ["left", "pageup", "l"]
//!
//! [log]
//! file = "/tmp/mdiff.log"
//! level = "debug"
//! ```

use crate::color;
use crate::keys::Command;
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

// ============================================================================
// Theme Configuration
// ============================================================================

/// Color tokens; each value is a def name, a hex color, or an ANSI name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub text: Option<String>,
    pub text_muted: Option<String>,
    pub accent: Option<String>,
    pub border: Option<String>,
    pub title: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub diff_added: Option<String>,
    pub diff_removed: Option<String>,
}

/// Theme configuration (defs + tokens)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Named color definitions (e.g., blue1 = "#5e81ac")
    pub defs: HashMap<String, String>,
    pub colors: ThemeColors,
}

/// Theme tokens resolved to ratatui colors
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub border: Color,
    pub title: Color,
    pub warning: Color,
    pub error: Color,
    /// Lines only in the target (right pane)
    pub diff_added: Color,
    /// Lines only in the master (left pane)
    pub diff_removed: Color,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        ThemeConfig::default().resolve()
    }
}

impl ThemeConfig {
    /// Resolve theme config to concrete colors
    pub fn resolve(&self) -> ResolvedTheme {
        let resolve = |token: &Option<String>, fallback: Color| -> Color {
            token
                .as_deref()
                .and_then(|value| color::resolve_color(value, &self.defs))
                .unwrap_or(fallback)
        };
        let tokens = &self.colors;

        ResolvedTheme {
            text: resolve(&tokens.text, Color::Reset),
            text_muted: resolve(&tokens.text_muted, Color::DarkGray),
            accent: resolve(&tokens.accent, Color::Cyan),
            border: resolve(&tokens.border, Color::Cyan),
            title: resolve(&tokens.title, Color::White),
            warning: resolve(&tokens.warning, Color::Yellow),
            error: resolve(&tokens.error, Color::Red),
            // Historical palette: target-only lines red, master-only blue
            diff_added: resolve(&tokens.diff_added, Color::Red),
            diff_removed: resolve(&tokens.diff_removed, Color::Blue),
        }
    }
}

/// UI configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Prefix each row with its column-local line number
    pub line_numbers: bool,
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            theme: ThemeConfig::default(),
        }
    }
}

/// Key bindings per command. A missing entry keeps the default keys; an
/// empty list unbinds the command.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub next_target: Option<Vec<String>>,
    pub prev_target: Option<Vec<String>>,
    pub page_down: Option<Vec<String>>,
    pub page_up: Option<Vec<String>>,
    pub line_down: Option<Vec<String>>,
    pub line_up: Option<Vec<String>>,
    pub commit: Option<Vec<String>>,
    pub search: Option<Vec<String>>,
    pub help: Option<Vec<String>>,
    pub quit: Option<Vec<String>>,
}

impl KeysConfig {
    /// Configured keys for `command`, if overridden
    pub fn get(&self, command: Command) -> Option<&[String]> {
        let keys = match command {
            Command::NextTarget => &self.next_target,
            Command::PrevTarget => &self.prev_target,
            Command::PageDown => &self.page_down,
            Command::PageUp => &self.page_up,
            Command::LineDown => &self.line_down,
            Command::LineUp => &self.line_up,
            Command::Commit => &self.commit,
            Command::Search => &self.search,
            Command::Help => &self.help,
            Command::Quit => &self.quit,
        };
        keys.as_deref()
    }
}

/// Log configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file; logging is off when unset
    pub file: Option<PathBuf>,
    /// Maximum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

/// Root configuration
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub keys: KeysConfig,
    pub log: LogConfig,
}

impl Config {
    /// Get all possible config file paths in priority order
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("mdiff").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("mdiff").join("config.toml"));
        }

        // Platform-specific config dir (~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("mdiff").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        paths
    }

    /// Get the first existing config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|p| p.exists())
    }

    /// Load config from XDG config path
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .map(|content| Self::parse(&content))
            .unwrap_or_default()
    }

    /// Parse config text, warning on stderr and falling back to defaults
    pub fn parse(content: &str) -> Self {
        toml::from_str(content)
            .map_err(|e| {
                eprintln!("Warning: Failed to parse config: {}", e);
                e
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("");
        assert!(config.ui.line_numbers);
        assert!(config.log.file.is_none());
        assert_eq!(config.log.level, "info");
        assert!(config.keys.get(Command::PageDown).is_none());

        let theme = config.ui.theme.resolve();
        assert_eq!(theme.diff_added, Color::Red);
        assert_eq!(theme.diff_removed, Color::Blue);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r##"
[ui]
line_numbers = false

[ui.theme.defs]
blue1 = "#5e81ac"

[ui.theme.colors]
diff_removed = "blue1"
diff_added = "green"

[keys]
page_down = ["right", "h"]
page_up = []

[log]
file = "/tmp/mdiff.log"
level = "debug"
"##,
        );
        assert!(!config.ui.line_numbers);
        let theme = config.ui.theme.resolve();
        assert_eq!(theme.diff_removed, Color::Rgb(0x5e, 0x81, 0xac));
        assert_eq!(theme.diff_added, Color::Green);

        assert_eq!(
            config.keys.get(Command::PageDown),
            Some(&["right".to_string(), "h".to_string()][..])
        );
        assert_eq!(config.keys.get(Command::PageUp), Some(&[][..]));
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/mdiff.log")));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let config = Config::parse("[ui]\nline_numbers = \"yes\"\n");
        assert!(config.ui.line_numbers);
    }

    #[test]
    fn test_unknown_color_uses_fallback() {
        let mut theme = ThemeConfig::default();
        theme.colors.border = Some("notacolor".to_string());
        assert_eq!(theme.resolve().border, Color::Cyan);
    }
}
