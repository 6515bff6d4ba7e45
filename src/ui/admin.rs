//! Admin screen: catalog table, create/edit form and delete confirmation

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::{App, InputMode};
use crate::forms::{AdminField, AdminForm};
use crate::ui::{centered_rect, dashboard::catalog_row, field_block, input_line, panel, Theme};

/// Render the admin screen
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let editing = app.input_mode == InputMode::Editing;
    let search = Paragraph::new(input_line(&app.admin.search, editing, false))
        .block(field_block("FILTER", editing));
    frame.render_widget(search, chunks[0]);

    render_table(frame, chunks[1], app);

    if let Some(form) = &app.admin.form {
        render_form(frame, area, form);
    } else if let Some(id) = app.admin.confirm_delete {
        let title = app
            .catalog
            .iter()
            .find(|i| i.id == Some(id))
            .map(|i| i.title.as_str())
            .unwrap_or("this movie");
        render_confirm(frame, area, title);
    }
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let items = app.admin_items();
    let block = panel(format!("MANAGE MOVIES ({})", items.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.catalog_loading.is_loading() && app.catalog.is_empty() {
        frame.render_widget(
            Paragraph::new("⟳ Loading movies...")
                .style(Theme::loading())
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("No movies found. Press n to add one.")
                .style(Theme::dimmed())
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let height = inner.height as usize;
    let selected = app.admin.list.selected;
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
    frame.render_widget(List::new(rows), inner);
}

fn render_form(frame: &mut Frame, area: Rect, form: &AdminForm) {
    let popup = centered_rect(70, 28, area);
    frame.render_widget(Clear, popup);

    let title = if form.is_edit() { " Edit Movie " } else { " New Movie " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::border_focused())
        .title(Span::styled(title, Theme::title()))
        .style(Style::default().bg(Theme::BACKGROUND));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut constraints = vec![Constraint::Length(3); AdminField::ALL.len()];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in AdminField::ALL.into_iter().enumerate() {
        let focused = form.focus == field;
        let line = match field {
            AdminField::Title => input_line(&form.title, focused, false),
            AdminField::Year => input_line(&form.year, focused, false),
            AdminField::Rating => input_line(&form.rating, focused, false),
            AdminField::ImageUrl => input_line(&form.image_url, focused, false),
            AdminField::Description => input_line(&form.description, focused, false),
            AdminField::TrailerUrl => input_line(&form.trailer_url, focused, false),
            AdminField::Genre => {
                let genre = if form.genre.is_empty() {
                    Span::styled("select a genre", Theme::dimmed())
                } else {
                    Span::styled(form.genre.as_str(), Theme::genre())
                };
                Line::from(vec![
                    Span::styled("◀ ", Theme::keybind()),
                    genre,
                    Span::styled(" ▶", Theme::keybind()),
                ])
            }
            AdminField::Featured => {
                let mark = if form.featured { "[x]" } else { "[ ]" };
                Line::from(vec![
                    Span::styled(mark, Theme::accent()),
                    Span::styled(" Featured on the home screen", Theme::text()),
                ])
            }
        };
        frame.render_widget(
            Paragraph::new(line).block(field_block(field.label(), focused)),
            rows[i],
        );
    }

    if form.saving {
        frame.render_widget(
            Paragraph::new("⟳ Saving...")
                .style(Theme::loading())
                .alignment(Alignment::Center),
            rows[AdminField::ALL.len()],
        );
    }
}

fn render_confirm(frame: &mut Frame, area: Rect, title: &str) {
    let popup = centered_rect(50, 6, area);
    frame.render_widget(Clear, popup);

    let confirm = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Delete ", Theme::text()),
            Span::styled(title, Theme::title()),
            Span::styled("?", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled(" y ", Theme::keybind()),
            Span::styled("confirm  ", Theme::keybind_desc()),
            Span::styled(" any key ", Theme::keybind()),
            Span::styled("cancel", Theme::keybind_desc()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" Confirm delete ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );
    frame.render_widget(confirm, popup);
}
