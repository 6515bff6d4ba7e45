//! Watch screen: simulated player with auto-hiding controls

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{App, WatchSession};
use crate::ui::{progress_bar, Theme};

/// Width of the progress bar in cells
const BAR_WIDTH: usize = 50;

/// Render the watch screen
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.watch else {
        return;
    };

    let controls_visible = session.controls.is_visible();
    let controls_height = if controls_visible { 5 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(controls_height)])
        .split(area);

    render_screen(frame, chunks[0], session, controls_visible);
    if controls_visible {
        render_controls(frame, chunks[1], session);
    }
}

/// The "video" area: title and the stream being played
fn render_screen(frame: &mut Frame, area: Rect, session: &WatchSession, controls_visible: bool) {
    let border = if controls_visible {
        Theme::border()
    } else {
        Style::default().fg(Theme::BACKGROUND)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = if session.playback.is_finished() {
        Span::styled("■ FINISHED", Theme::secondary())
    } else if session.playback.is_playing() {
        Span::styled("▶ PLAYING", Theme::success())
    } else {
        Span::styled("❚❚ PAUSED", Theme::warning())
    };

    let source = match &session.embed_url {
        Some(url) => Span::styled(url.as_str(), Theme::dimmed()),
        None => Span::styled("No video source for this title", Theme::dimmed()),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(session.params.title.as_str(), Theme::title())),
        Line::from(""),
        Line::from(state),
        Line::from(""),
        Line::from(source),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_controls(frame: &mut Frame, area: Rect, session: &WatchSession) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let playback = &session.playback;
    let (filled, empty) = progress_bar(playback.progress_percent() / 100.0, BAR_WIDTH);

    let play_icon = if playback.is_playing() { "❚❚" } else { "▶" };
    let volume_icon = if playback.is_muted() { "🔇 muted" } else { "🔊" };

    let lines = vec![
        Line::from(vec![
            Span::styled(playback.elapsed_label(), Theme::text()),
            Span::raw(" "),
            Span::styled(filled, Theme::progress_bar()),
            Span::styled(empty, Theme::progress_bar_empty()),
            Span::raw(" "),
            Span::styled(playback.total_label(), Theme::dimmed()),
        ]),
        Line::from(vec![
            Span::styled(format!(" {} ", play_icon), Theme::accent()),
            Span::styled("SPACE  ", Theme::keybind_desc()),
            Span::styled(volume_icon, Theme::secondary()),
            Span::styled(" m  ", Theme::keybind_desc()),
            Span::styled(" ESC ", Theme::keybind()),
            Span::styled("back", Theme::keybind_desc()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
