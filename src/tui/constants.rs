//! TUI constants: colors, theme palettes, timing, and layout sizes.

use ratatui::style::Color;

use crate::core::config::Theme;

/// Series colors, assigned by metric or slice index (wraps after 8).
pub(crate) const CHART_COLORS: [Color; 8] = [
    Color::Rgb(59, 130, 246),  // #3B82F6
    Color::Rgb(139, 92, 246),  // #8B5CF6
    Color::Rgb(16, 185, 129),  // #10B981
    Color::Rgb(245, 158, 11),  // #F59E0B
    Color::Rgb(239, 68, 68),   // #EF4444
    Color::Rgb(99, 102, 241),  // #6366F1
    Color::Rgb(236, 72, 153),  // #EC4899
    Color::Rgb(20, 184, 166),  // #14B8A6
];

pub(crate) fn chart_color(index: usize) -> Color {
    CHART_COLORS[index % CHART_COLORS.len()]
}

/// Colors for one theme.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Palette {
    pub bg: Color,
    /// Body text.
    pub text: Color,
    /// Headings and bold runs.
    pub strong: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub user_border: Color,
    pub error: Color,
    /// Highlighted list row foreground (on `accent`).
    pub selected_fg: Color,
}

const LIGHT: Palette = Palette {
    bg: Color::Rgb(249, 250, 251),       // #F9FAFB
    text: Color::Rgb(55, 65, 81),        // #374151
    strong: Color::Rgb(17, 24, 39),      // #111827
    muted: Color::Rgb(107, 114, 128),    // #6B7280
    accent: Color::Rgb(37, 99, 235),     // #2563EB
    border: Color::Rgb(209, 213, 219),   // #D1D5DB
    user_border: Color::Rgb(156, 163, 175),
    error: Color::Rgb(220, 38, 38),
    selected_fg: Color::Rgb(255, 255, 255),
};

const DARK: Palette = Palette {
    bg: Color::Rgb(17, 24, 39),          // #111827
    text: Color::Rgb(229, 231, 235),     // #E5E7EB
    strong: Color::Rgb(249, 250, 251),   // #F9FAFB
    muted: Color::Rgb(156, 163, 175),    // #9CA3AF
    accent: Color::Rgb(96, 165, 250),    // #60A5FA
    border: Color::Rgb(75, 85, 99),      // #4B5563
    user_border: Color::Rgb(107, 114, 128),
    error: Color::Rgb(248, 113, 113),
    selected_fg: Color::Rgb(17, 24, 39),
};

pub(crate) fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

/// Event poll timeout in milliseconds (main loop).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// How long to wait for the key after Esc (Option as meta).
pub(crate) const ESC_SEQUENCE_DRAIN_MS: u64 = 150;

/// Scroll amount for arrow keys and mouse wheel.
pub(crate) const SCROLL_LINES_SMALL: usize = 3;

/// Scroll amount for PageUp/PageDown.
pub(crate) const SCROLL_LINES_PAGE: usize = 10;

/// Input box height including borders.
pub(crate) const INPUT_HEIGHT: u16 = 3;

/// Rows given to a chart drawn inside the message list.
pub(crate) const CHART_HEIGHT: u16 = 12;

/// How long status toasts stay visible, in seconds.
pub(crate) const TOAST_SECS: u64 = 3;

/// Logo when idle.
pub(crate) const LOGO_IDLE: &str = "◆";

/// Spinner frames while a request is in flight (braille pattern, 4 frames).
pub(crate) const LOGO_THINKING: &[&str] = &["⠋", "⠙", "⠹", "⠸"];
