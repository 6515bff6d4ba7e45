//! Content not found page

use ratatui::{prelude::*, widgets::Paragraph};

use crate::ui::{panel, Theme};

/// Render the 404 page
pub fn render(frame: &mut Frame, area: Rect) {
    let block = panel("404");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("4 0 4", Theme::title())),
        Line::from(""),
        Line::from(Span::styled("Content not found", Theme::text())),
        Line::from(Span::styled(
            "The movie you are looking for does not exist or was removed.",
            Theme::dimmed(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" ↵ ", Theme::keybind()),
            Span::styled("Back to home  ", Theme::keybind_desc()),
            Span::styled(" ESC ", Theme::keybind()),
            Span::styled("Go back", Theme::keybind_desc()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
