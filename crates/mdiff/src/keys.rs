//! Logical commands and the key table that dispatches to them

use crate::config::KeysConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rustc_hash::FxHashMap;

/// Everything a key can do in normal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    NextTarget,
    PrevTarget,
    PageDown,
    PageUp,
    LineDown,
    LineUp,
    Commit,
    Search,
    Help,
    Quit,
}

impl Command {
    pub const ALL: [Command; 10] = [
        Command::NextTarget,
        Command::PrevTarget,
        Command::PageDown,
        Command::PageUp,
        Command::LineDown,
        Command::LineUp,
        Command::Commit,
        Command::Search,
        Command::Help,
        Command::Quit,
    ];

    /// Name used in the `[keys]` config section
    pub fn config_name(self) -> &'static str {
        match self {
            Command::NextTarget => "next_target",
            Command::PrevTarget => "prev_target",
            Command::PageDown => "page_down",
            Command::PageUp => "page_up",
            Command::LineDown => "line_down",
            Command::LineUp => "line_up",
            Command::Commit => "commit",
            Command::Search => "search",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::NextTarget => "Next target",
            Command::PrevTarget => "Previous target",
            Command::PageDown => "Page down",
            Command::PageUp => "Page up",
            Command::LineDown => "Line down",
            Command::LineUp => "Line up",
            Command::Commit => "Commit master into target",
            Command::Search => "Search master",
            Command::Help => "Toggle help",
            Command::Quit => "Quit",
        }
    }

    fn default_keys(self) -> &'static [&'static str] {
        match self {
            Command::NextTarget => &["tab", "x", "X"],
            Command::PrevTarget => &["backspace", "backtab", "z", "Z"],
            Command::PageDown => &["right", "pagedown", "space"],
            Command::PageUp => &["left", "pageup"],
            Command::LineDown => &["down", "j", "J"],
            Command::LineUp => &["up", "k", "K"],
            Command::Commit => &["enter", "c", "C"],
            Command::Search => &["home", "/"],
            Command::Help => &["?", "h", "H"],
            Command::Quit => &["esc", "q", "Q", "ctrl-c"],
        }
    }
}

/// A key plus the modifiers that matter for dispatch.
///
/// SHIFT is folded into the character itself (`X` rather than shift-x) and
/// into `BackTab`, so terminals that do or do not report it agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let modifiers = match code {
            KeyCode::Char(_) | KeyCode::BackTab => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        Self { code, modifiers }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }

    /// Parse a config key string such as `"j"`, `"pagedown"` or `"ctrl-c"`
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut modifiers = KeyModifiers::NONE;
        let mut rest = text;
        // A bare "-" is a key, not a prefix separator
        while rest.chars().count() > 1 {
            let lower = rest.to_ascii_lowercase();
            if lower.starts_with("ctrl-") {
                modifiers |= KeyModifiers::CONTROL;
                rest = &rest[5..];
            } else if lower.starts_with("alt-") {
                modifiers |= KeyModifiers::ALT;
                rest = &rest[4..];
            } else {
                break;
            }
        }

        let mut chars = rest.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(ch), None) => KeyCode::Char(ch),
            (None, _) => return Err(format!("empty key in '{}'", text)),
            _ => match rest.to_ascii_lowercase().as_str() {
                "tab" => KeyCode::Tab,
                "backtab" => KeyCode::BackTab,
                "backspace" => KeyCode::Backspace,
                "enter" | "return" => KeyCode::Enter,
                "esc" | "escape" => KeyCode::Esc,
                "space" => KeyCode::Char(' '),
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "home" => KeyCode::Home,
                "end" => KeyCode::End,
                "pageup" => KeyCode::PageUp,
                "pagedown" => KeyCode::PageDown,
                "delete" | "del" => KeyCode::Delete,
                _ => return Err(format!("unknown key '{}'", text)),
            },
        };
        Ok(Self::new(code, modifiers))
    }
}

/// Key table built from defaults plus `[keys]` overrides
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: FxHashMap<KeyChord, Command>,
    /// Key strings per command, in `Command::ALL` order, for the help popover
    labels: Vec<(Command, Vec<String>)>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_config(&KeysConfig::default()).0
    }
}

impl KeyMap {
    /// Build the key table. Returns warnings for invalid or conflicting keys;
    /// the offending entries are ignored.
    pub fn from_config(config: &KeysConfig) -> (Self, Vec<String>) {
        let mut bindings = FxHashMap::default();
        let mut labels = Vec::with_capacity(Command::ALL.len());
        let mut warnings = Vec::new();

        for command in Command::ALL {
            let keys: Vec<String> = match config.get(command) {
                Some(keys) => keys.to_vec(),
                None => command.default_keys().iter().map(|k| k.to_string()).collect(),
            };

            let mut bound = Vec::with_capacity(keys.len());
            for key in keys {
                let chord = match KeyChord::parse(&key) {
                    Ok(chord) => chord,
                    Err(e) => {
                        warnings.push(format!("keys.{}: {}", command.config_name(), e));
                        continue;
                    }
                };
                if let Some(previous) = bindings.insert(chord, command) {
                    if previous != command {
                        warnings.push(format!(
                            "keys.{}: '{}' already bound to {}, rebinding",
                            command.config_name(),
                            key,
                            previous.config_name()
                        ));
                    }
                }
                bound.push(key);
            }
            labels.push((command, bound));
        }

        // A later rebinding wins; drop stale labels so help stays truthful
        for (command, keys) in &mut labels {
            let command = *command;
            keys.retain(|key| {
                KeyChord::parse(key)
                    .map(|chord| bindings.get(&chord) == Some(&command))
                    .unwrap_or(false)
            });
        }

        (Self { bindings, labels }, warnings)
    }

    pub fn command(&self, event: &KeyEvent) -> Option<Command> {
        self.bindings.get(&KeyChord::from_event(event)).copied()
    }

    /// Keys bound to `command`, as written in the config
    pub fn keys_for(&self, command: Command) -> &[String] {
        self.labels
            .iter()
            .find(|(c, _)| *c == command)
            .map(|(_, keys)| keys.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_key_strings() {
        assert_eq!(
            KeyChord::parse("j"),
            Ok(KeyChord::new(KeyCode::Char('j'), KeyModifiers::NONE))
        );
        assert_eq!(
            KeyChord::parse("PageDown"),
            Ok(KeyChord::new(KeyCode::PageDown, KeyModifiers::NONE))
        );
        assert_eq!(
            KeyChord::parse("space"),
            Ok(KeyChord::new(KeyCode::Char(' '), KeyModifiers::NONE))
        );
        assert_eq!(
            KeyChord::parse("ctrl-c"),
            Ok(KeyChord::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            KeyChord::parse("-"),
            Ok(KeyChord::new(KeyCode::Char('-'), KeyModifiers::NONE))
        );
        assert!(KeyChord::parse("hyper-x").is_err());
        assert!(KeyChord::parse("").is_err());
    }

    #[test]
    fn test_shift_folded_into_chars() {
        let map = KeyMap::default();
        assert_eq!(
            map.command(&press(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(Command::NextTarget)
        );
        assert_eq!(
            map.command(&press(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Command::PrevTarget)
        );
    }

    #[test]
    fn test_default_table() {
        let map = KeyMap::default();
        let none = KeyModifiers::NONE;
        let cases = [
            (KeyCode::Tab, Command::NextTarget),
            (KeyCode::Char('z'), Command::PrevTarget),
            (KeyCode::Backspace, Command::PrevTarget),
            (KeyCode::Char(' '), Command::PageDown),
            (KeyCode::Left, Command::PageUp),
            (KeyCode::Char('j'), Command::LineDown),
            (KeyCode::Up, Command::LineUp),
            (KeyCode::Enter, Command::Commit),
            (KeyCode::Char('/'), Command::Search),
            (KeyCode::Char('h'), Command::Help),
            (KeyCode::Esc, Command::Quit),
        ];
        for (code, command) in cases {
            assert_eq!(map.command(&press(code, none)), Some(command), "{:?}", code);
        }
        assert_eq!(
            map.command(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(map.command(&press(KeyCode::Char('l'), none)), None);
    }

    #[test]
    fn test_config_overrides() {
        let config = KeysConfig {
            page_down: Some(vec!["l".into(), "bogus-key".into()]),
            help: Some(vec!["?".into()]),
            page_up: Some(vec!["h".into()]),
            ..Default::default()
        };
        let (map, warnings) = KeyMap::from_config(&config);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("keys.page_down"));

        let none = KeyModifiers::NONE;
        assert_eq!(map.command(&press(KeyCode::Char('l'), none)), Some(Command::PageDown));
        assert_eq!(map.command(&press(KeyCode::Char('h'), none)), Some(Command::PageUp));
        assert_eq!(map.command(&press(KeyCode::Right, none)), None);
        assert_eq!(map.keys_for(Command::PageDown), ["l"]);
    }

    #[test]
    fn test_conflicting_binding_warns_and_rebinds() {
        let config = KeysConfig {
            quit: Some(vec!["x".into()]),
            ..Default::default()
        };
        let (map, warnings) = KeyMap::from_config(&config);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            map.command(&press(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Command::Quit)
        );
        assert_eq!(map.keys_for(Command::NextTarget), ["tab", "X"]);
    }
}
