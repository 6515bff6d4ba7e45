//! Detail view for one catalog item

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::CatalogItem;
use crate::ui::{panel, Theme};

/// Render the detail view
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(detail) = &app.detail else {
        return;
    };

    let title = detail
        .item
        .as_ref()
        .map(|i| i.title.clone())
        .unwrap_or_else(|| "DETAILS".to_string());
    let block = panel(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &detail.item {
        Some(item) => render_item(frame, inner, item),
        None if detail.loading.is_error() => {
            let error = Paragraph::new(vec![
                Line::from(Span::styled("Could not load this movie", Theme::error())),
                Line::from(Span::styled(
                    detail.loading.message().unwrap_or_default().to_string(),
                    Theme::dimmed(),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled(" r ", Theme::keybind()),
                    Span::styled("Retry", Theme::keybind_desc()),
                ]),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(error, inner);
        }
        None => {
            let loading = Paragraph::new(detail.loading.message().unwrap_or("Loading...").to_string())
                .style(Theme::loading())
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
        }
    }
}

fn render_item(frame: &mut Frame, area: Rect, item: &CatalogItem) {
    let mut lines = Vec::new();

    // Title line
    let year = item
        .release_year
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    let mut title = vec![
        Span::styled("▶ ", Theme::accent()),
        Span::styled(item.title.as_str(), Theme::title()),
        Span::styled(year, Theme::year()),
    ];
    if item.featured {
        title.push(Span::raw("  "));
        title.push(Span::styled(" FEATURED ", Theme::featured()));
    }
    lines.push(Line::from(title));
    lines.push(Line::from(""));

    // Metadata
    lines.push(Line::from(vec![
        Span::styled(format!("★ {:.1}/10", item.rating), Theme::rating(item.rating)),
        Span::styled("  │  ", Theme::dimmed()),
        Span::styled(item.genre.as_str(), Theme::genre()),
    ]));
    lines.push(Line::from(""));

    let description = item
        .description
        .as_deref()
        .unwrap_or("No description available.");
    lines.push(Line::from(Span::styled(description, Theme::text())));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("Poster: ", Theme::dimmed()),
        Span::styled(item.image_url.as_str(), Theme::secondary()),
    ]));
    lines.push(Line::from(""));

    // Actions
    let mut actions = vec![
        Span::styled(" ↵ ", Theme::keybind()),
        Span::styled("Watch now  ", Theme::keybind_desc()),
    ];
    if item.trailer().is_some() {
        actions.push(Span::styled(" t ", Theme::keybind()));
        actions.push(Span::styled("Trailer  ", Theme::keybind_desc()));
    } else {
        actions.push(Span::styled("No trailer available  ", Theme::dimmed()));
    }
    actions.push(Span::styled(" ESC ", Theme::keybind()));
    actions.push(Span::styled("Back", Theme::keybind_desc()));
    lines.push(Line::from(actions));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
