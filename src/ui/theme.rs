//! Digitalflix theme
//!
//! Color palette and style helpers for the TUI.
//! Dark cinema look: near-black background, signature red, gold ratings.

use ratatui::style::{Color, Modifier, Style};

/// Digitalflix color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #141414 (cinema black)
    pub const BACKGROUND: Color = Color::Rgb(0x14, 0x14, 0x14);

    /// Primary: #e50914 (signature red)
    pub const PRIMARY: Color = Color::Rgb(0xe5, 0x09, 0x14);

    /// Secondary: #b3b3b3 (silver)
    pub const SECONDARY: Color = Color::Rgb(0xb3, 0xb3, 0xb3);

    /// Accent: #f5c518 (gold)
    pub const ACCENT: Color = Color::Rgb(0xf5, 0xc5, 0x18);

    /// Highlight: #ff5a5f (soft red)
    pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0x5a, 0x5f);

    /// Text: #e5e5e5 (soft white)
    pub const TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);

    /// Dim: #5a5a5a (muted)
    pub const DIM: Color = Color::Rgb(0x5a, 0x5a, 0x5a);

    /// Success: #46d369 (green)
    pub const SUCCESS: Color = Color::Rgb(0x46, 0xd3, 0x69);

    /// Warning: #ffa00a (orange)
    pub const WARNING: Color = Color::Rgb(0xff, 0xa0, 0x0a);

    /// Error: #ff4d4f (red)
    pub const ERROR: Color = Color::Rgb(0xff, 0x4d, 0x4f);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS (for UI elements)
    // ═══════════════════════════════════════════════════════════════════════

    /// Slightly lighter background for panels/cards
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x1f, 0x1f, 0x1f);

    /// Even lighter for hover states
    pub const BACKGROUND_HOVER: Color = Color::Rgb(0x2b, 0x2b, 0x2b);

    /// Border color (dark grey)
    pub const BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Success style
    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Warning style
    pub fn warning() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text style (silver)
    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Accent text style (gold)
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Progress bar style
    pub fn progress_bar() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .bg(Self::BACKGROUND_LIGHT)
    }

    /// Progress bar unfilled portion
    pub fn progress_bar_empty() -> Style {
        Style::default().fg(Self::DIM).bg(Self::BACKGROUND_LIGHT)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CATALOG STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Rating indicator, colored by score
    pub fn rating(score: f32) -> Style {
        if score >= 8.0 {
            Self::accent()
        } else if score >= 6.0 {
            Style::default().fg(Self::SUCCESS)
        } else if score >= 4.0 {
            Style::default().fg(Self::WARNING)
        } else {
            Self::dimmed()
        }
    }

    /// Featured badge
    pub fn featured() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Genre tags
    pub fn genre() -> Style {
        Style::default().fg(Self::HIGHLIGHT)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Style for list items (normal state)
    pub fn list_item() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Style for list items (selected/highlighted)
    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::BACKGROUND_HOVER)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Style for input cursor
    pub fn input_cursor() -> Style {
        Style::default().fg(Self::BACKGROUND).bg(Self::TEXT)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Keybinding description style
    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Loading/spinner indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Calculate contrast ratio between two colors
/// Returns a value between 1 (same color) and 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Check if a foreground/background pair meets WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// Check if a foreground/background pair meets WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
