//! Dashboard: featured hero, search box and the catalog list

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::models::CatalogItem;
use crate::ui::{field_block, input_line, panel, Theme};

/// Render the dashboard
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let hero = app.hero().filter(|_| app.dashboard.search.is_empty());
    let hero_height = if hero.is_some() { 6 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Search
            Constraint::Length(hero_height), // Hero
            Constraint::Min(1),              // Catalog
        ])
        .split(area);

    render_search(frame, chunks[0], app);
    if let Some(item) = hero {
        render_hero(frame, chunks[1], item);
    }
    render_catalog(frame, chunks[2], app);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    let search = &app.dashboard.search;

    let line = if !editing && search.is_empty() {
        Line::from(Span::styled("⌕ Press / to search by title or genre...", Theme::dimmed()))
    } else {
        let mut line = input_line(search, editing, false);
        line.spans.insert(0, Span::styled("⌕ ", Theme::secondary()));
        line
    };

    frame.render_widget(
        Paragraph::new(line).block(field_block("SEARCH", editing)),
        area,
    );
}

fn render_hero(frame: &mut Frame, area: Rect, item: &CatalogItem) {
    let block = panel("★ FEATURED");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(vec![
        Span::styled(item.title.as_str(), Theme::title()),
        Span::raw("  "),
        Span::styled(item.genre.as_str(), Theme::genre()),
        Span::raw("  "),
        Span::styled(format!("★ {:.1}", item.rating), Theme::rating(item.rating)),
    ])];
    if let Some(description) = &item.description {
        lines.push(Line::from(Span::styled(description.as_str(), Theme::secondary())));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_catalog(frame: &mut Frame, area: Rect, app: &App) {
    let items = app.dashboard_items();
    let block = panel(format!("MOVIES ({})", items.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.catalog_loading.is_loading() && app.catalog.is_empty() {
        let loading = Paragraph::new("⟳ Loading movies...")
            .style(Theme::loading())
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    }

    if items.is_empty() {
        let message = if app.dashboard.search.is_empty() {
            "No movies in the catalog yet".to_string()
        } else {
            format!(
                "No movies found for \"{}\". Press ↵ for more.",
                app.dashboard.search.value()
            )
        };
        let empty = Paragraph::new(message)
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    // Keep the selection inside the viewport
    let height = inner.height as usize;
    let selected = app.dashboard.list.selected;
    let offset = if height > 0 && selected >= height {
        selected + 1 - height
    } else {
        0
    };

    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, item)| catalog_row(item, i == selected))
        .collect();

    frame.render_widget(List::new(rows).style(Theme::text()), inner);
}

/// One catalog entry: marker, title, year, genre, rating, featured badge
pub fn catalog_row(item: &CatalogItem, is_selected: bool) -> ListItem<'_> {
    let marker = if is_selected { "▸ " } else { "  " };
    let year = item
        .release_year
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(marker, if is_selected { Theme::accent() } else { Theme::dimmed() }),
        Span::styled(
            item.title.as_str(),
            if is_selected { Theme::selected() } else { Theme::list_item() },
        ),
        Span::styled(year, Theme::year()),
        Span::raw("  "),
        Span::styled(format!("[{}]", item.genre), Theme::genre()),
        Span::raw("  "),
        Span::styled(format!("★ {:.1}", item.rating), Theme::rating(item.rating)),
    ];
    if item.featured {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(" FEATURED ", Theme::featured()));
    }

    let style = if is_selected {
        Theme::list_item_selected()
    } else {
        Style::default()
    };
    ListItem::new(Line::from(spans)).style(style)
}
