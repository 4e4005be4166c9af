//! Centralized keyboard shortcuts.
//!
//! Complete reference:
//!
//! | Action        | Keys                                     |
//! |---------------|------------------------------------------|
//! | Send          | Enter                                    |
//! | Suggestion    | Tab / Shift+Tab (welcome screen)         |
//! | Scroll        | ↑ ↓ PageUp PageDown                      |
//! | Chart view    | Ctrl+V                                   |
//! | Theme         | Ctrl+T                                   |
//! | History       | Alt+H, Esc+h (Option as meta), Mac chars |
//! | New conv      | Ctrl+N, Ctrl+L                           |
//! | Cancel        | Esc (while a request is in flight)       |
//! | Quit          | Ctrl+C                                   |
//!
//! On macOS, Option+key can send:
//! - Esc+key if terminal has "Use option as meta key" enabled
//! - A special character (˙, Ì) if Option is in normal mode

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Open conversation history (Alt+H, Esc+h)
    History,
    /// New conversation (Ctrl+N, Ctrl+L)
    NewConversation,
    /// Rotate the view of the latest chart (Ctrl+V)
    CycleView,
    /// Switch light/dark theme (Ctrl+T)
    ToggleTheme,
    /// Quit (Ctrl+C)
    Quit,
}

/// Characters produced by Option+H on Mac (Option not configured as Meta).
/// Varies by terminal/keyboard.
const MAC_OPTION_H: &[char] = &['\u{00CC}', '\u{02D9}', '\u{0127}', '\u{0302}']; // Ì, ˙, ħ, ̂

impl Shortcut {
    /// Returns the shortcut if the key matches. Handles Esc+key sequence when terminal
    /// sends Option as Meta (e.g. macOS "Use option as meta key").
    pub fn match_key(key: &KeyEvent, escape_pending: bool) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if escape_pending {
            return match key.code {
                KeyCode::Char('h') => Some(Shortcut::History),
                _ => None,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => Some(Shortcut::Quit),
            KeyCode::Char('n' | 'l') if ctrl => Some(Shortcut::NewConversation),
            KeyCode::Char('v') if ctrl => Some(Shortcut::CycleView),
            KeyCode::Char('t') if ctrl => Some(Shortcut::ToggleTheme),
            KeyCode::Char('h') if key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Shortcut::History)
            }
            KeyCode::Char(c) if MAC_OPTION_H.contains(&c) => Some(Shortcut::History),
            _ => None,
        }
    }

    /// True if key is Escape (start of Option+key sequence on some terminals).
    pub fn is_escape(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press && key.code == KeyCode::Esc
    }
}


/// Labels for the bottom bar.
pub mod labels {
    use ratatui::style::{Color, Style};
    use ratatui::text::{Line, Span};

    fn pair(key: &'static str, action: &'static str, key_color: Color) -> [Span<'static>; 2] {
        [
            Span::styled(key, Style::default().fg(key_color)),
            Span::raw(action),
        ]
    }

    pub fn bottom_bar(is_loading: bool, dim: Color) -> Line<'static> {
        let pairs: &[(&str, &str)] = if is_loading {
            &[("Esc ", "cancel"), ("  ↑↓ ", "scroll"), ("  Ctrl+C ", "quit")]
        } else {
            &[
                ("Enter ", "send"),
                ("  ↑↓ ", "scroll"),
                ("  Ctrl+V ", "view"),
                ("  Ctrl+T ", "theme"),
                ("  Alt+H ", "history"),
                ("  Ctrl+N ", "new"),
                ("  Ctrl+C ", "quit"),
            ]
        };
        let key_color = if is_loading { Color::Yellow } else { dim };
        Line::from(
            pairs
                .iter()
                .flat_map(|(k, a)| pair(k, a, key_color))
                .collect::<Vec<_>>(),
        )
    }
}
