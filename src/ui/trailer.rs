//! Trailer modal

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::models::TrailerSelection;
use crate::ui::{centered_rect, Theme};

/// Render the trailer modal over `area`
pub fn render(frame: &mut Frame, area: Rect, trailer: &TrailerSelection, embed_url: Option<&str>) {
    let popup = centered_rect(72, 9, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::border_focused())
        .title(Span::styled(
            format!(" ▶ {} - Trailer ", trailer.display_title),
            Theme::title(),
        ))
        .style(Style::default().bg(Theme::BACKGROUND));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Open in your browser:", Theme::secondary())),
        Line::from(Span::styled(
            embed_url.unwrap_or(trailer.video_url.as_str()).to_string(),
            Theme::accent(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" ESC ", Theme::keybind()),
            Span::styled("Close", Theme::keybind_desc()),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}
