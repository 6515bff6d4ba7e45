//! Terminal UI components
//!
//! Built with ratatui. Every screen renders straight from `&App`;
//! keyboard-first navigation throughout.

pub mod admin;
pub mod dashboard;
pub mod detail;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod theme;
pub mod trailer;
pub mod watch;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, InputMode, Notice};
use crate::forms::TextInput;

pub use theme::Theme;

// =============================================================================
// Root Renderer
// =============================================================================

/// Main render function - dispatches to screen-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    if let Some(trailer) = &app.trailer {
        trailer::render(frame, area, trailer, app.trailer_embed_url().as_deref());
    }

    if let Some(notice) = &app.notice {
        render_notice(frame, area, notice);
    }
}

/// Human-readable screen name
pub fn screen_title(state: AppState) -> &'static str {
    match state {
        AppState::Login => "SIGN IN",
        AppState::Dashboard => "HOME",
        AppState::Detail => "DETAILS",
        AppState::Watch => "WATCH",
        AppState::Profile => "PROFILE",
        AppState::Admin => "ADMIN",
        AppState::NotFound => "NOT FOUND",
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(17), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "DIGITAL",
            Style::default().fg(Theme::PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "FLIX",
            Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    let mut nav = vec![Span::styled(format!(" {} ", screen_title(app.state)), Theme::title())];
    if app.state != AppState::Login {
        nav.push(Span::styled("│ ", Theme::dimmed()));
        nav.push(Span::styled(app.profile.profile.name.clone(), Theme::secondary()));
        nav.push(Span::styled(
            format!(" · {}", app.profile.profile.plan),
            Theme::dimmed(),
        ));
    }

    let bar = Paragraph::new(Line::from(nav)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(bar, header_chunks[1]);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match app.state {
        AppState::Login => login::render(frame, area, app),
        AppState::Dashboard => dashboard::render(frame, area, app),
        AppState::Detail => detail::render(frame, area, app),
        AppState::Watch => watch::render(frame, area, app),
        AppState::Profile => profile::render(frame, area, app),
        AppState::Admin => admin::render(frame, area, app),
        AppState::NotFound => not_found::render(frame, area),
    }
}

/// Key hints for the status bar
fn help_text(app: &App) -> &'static str {
    if app.trailer.is_some() {
        return " ESC:close trailer ";
    }
    if app.input_mode == InputMode::Editing {
        return " type to filter  ↵/ESC:done ";
    }
    match app.state {
        AppState::Login => " TAB:next field  ↵:sign in  ESC:quit ",
        AppState::Dashboard => {
            " /:search  ↵:details  w:watch  t:trailer  p:profile  a:admin  L:logout  q:quit "
        }
        AppState::Detail => " ↵:watch  t:trailer  ESC:back ",
        AppState::Watch => " SPACE:play/pause  m:mute  ESC:back ",
        AppState::Profile if app.profile.draft.is_some() => " TAB:next field  ↵:save  ESC:cancel ",
        AppState::Profile => " e:edit  ESC:back ",
        AppState::Admin if app.admin.form.is_some() => {
            " TAB:next field  ←→:genre  SPACE:featured  ↵:save  ESC:cancel "
        }
        AppState::Admin => " n:new  e:edit  d:delete  /:search  r:reload  ESC:back ",
        AppState::NotFound => " ↵:home  ESC:back ",
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::TEXT).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " SEARCH ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let loading = if app.catalog_loading.is_loading() {
        Span::styled(" ⟳ loading ", Theme::loading())
    } else {
        Span::styled(format!(" {} titles ", app.catalog.len()), Theme::dimmed())
    };

    let status_line = Line::from(vec![
        mode_indicator,
        loading,
        Span::raw("│"),
        Span::styled(help_text(app), Theme::keybind_desc()),
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}

/// Render the notice popup overlay
fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let popup_area = centered_rect(60, 6, area);
    frame.render_widget(Clear, popup_area);

    let (style, icon) = if notice.is_error() {
        (Theme::error(), "✗")
    } else {
        (Theme::success(), "✓")
    };

    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(notice.message.as_str(), Theme::text())),
        Line::from(Span::styled("press any key", Theme::dimmed())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(style)
            .title(Span::styled(format!(" {} {} ", icon, notice.title), style))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(popup, popup_area);
}

// =============================================================================
// Shared Widgets
// =============================================================================

/// Centered rect of at most `width` x `height` inside `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// One-line text field, with a cursor when focused
pub fn input_line<'a>(input: &'a TextInput, focused: bool, masked: bool) -> Line<'a> {
    let mask = |s: &str| "•".repeat(s.chars().count());

    if !focused {
        let shown = if masked { mask(input.value()) } else { input.value().to_string() };
        return Line::from(Span::styled(shown, Theme::input()));
    }

    let (before, after) = input.split_at_cursor();
    let (before, after) = if masked {
        (mask(before), mask(after))
    } else {
        (before.to_string(), after.to_string())
    };
    Line::from(vec![
        Span::styled(before, Theme::input()),
        Span::styled("│", Theme::input_cursor()),
        Span::styled(after, Theme::input()),
    ])
}

/// Labeled form field rendered as a bordered box
pub fn field_block(label: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(
            format!(" {} ", label),
            if focused { Theme::title() } else { Theme::secondary() },
        ))
}

/// Panel block used by most screens
pub fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(format!(" {} ", title.into()), Theme::title()))
}

/// Text progress bar like `██████░░░░`
pub fn progress_bar(fraction: f64, width: usize) -> (String, String) {
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * width as f64).round() as usize;
    ("█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(60, 6, area);
        assert_eq!(rect.width, 38);
        assert_eq!(rect.height, 6);
        assert_eq!(rect.y, 2);
    }

    #[test]
    fn test_progress_bar_widths() {
        let (filled, empty) = progress_bar(0.5, 10);
        assert_eq!(filled.chars().count(), 5);
        assert_eq!(empty.chars().count(), 5);

        let (filled, empty) = progress_bar(2.0, 4);
        assert_eq!(filled.chars().count(), 4);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_masked_input_hides_value() {
        let input = TextInput::new("secret");
        let line = input_line(&input, false, true);
        assert_eq!(line.to_string(), "••••••");
    }
}
