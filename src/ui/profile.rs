//! Profile screen: account info, favorites and watch history

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, Paragraph, Wrap},
};

use crate::app::App;
use crate::forms::{ProfileDraft, ProfileField};
use crate::models::UserProfile;
use crate::ui::{field_block, input_line, panel, progress_bar, Theme};

/// Render the profile screen
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    match &app.profile.draft {
        Some(draft) => render_draft(frame, columns[0], draft),
        None => render_info(frame, columns[0], &app.profile.profile),
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[1]);

    render_favorites(frame, right[0], app);
    render_history(frame, right[1], app);
}

fn render_info(frame: &mut Frame, area: Rect, profile: &UserProfile) {
    let block = panel("MY PROFILE");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let row = |label: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{:<14}", label), Theme::dimmed()),
            Span::styled(value.to_string(), Theme::text()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(profile.name.as_str(), Theme::title())),
        Line::from(Span::styled(
            format!("{} member since {}", profile.plan, profile.join_date),
            Theme::accent(),
        )),
        Line::from(""),
        row("Email", &profile.email),
        row("Phone", &profile.phone),
        Line::from(""),
        Line::from(Span::styled("About", Theme::dimmed())),
        Line::from(Span::styled(profile.bio.as_str(), Theme::secondary())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" e ", Theme::keybind()),
            Span::styled("Edit profile", Theme::keybind_desc()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_draft(frame: &mut Frame, area: Rect, draft: &ProfileDraft) {
    let block = panel("EDIT PROFILE");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = [
        (ProfileField::Name, "Name", &draft.name),
        (ProfileField::Email, "Email", &draft.email),
        (ProfileField::Phone, "Phone", &draft.phone),
        (ProfileField::Bio, "Bio", &draft.bio),
    ];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    for (i, (field, label, input)) in fields.into_iter().enumerate() {
        let focused = draft.focus == field;
        frame.render_widget(
            Paragraph::new(input_line(input, focused, false)).block(field_block(label, focused)),
            chunks[i],
        );
    }
}

fn render_favorites(frame: &mut Frame, area: Rect, app: &App) {
    let favorites = app.favorites();
    let block = panel(format!("FAVORITES ({})", favorites.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if favorites.is_empty() {
        frame.render_widget(
            Paragraph::new("No favorites yet").style(Theme::dimmed()),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = favorites
        .into_iter()
        .map(|title| {
            ListItem::new(Line::from(vec![
                Span::styled("♥ ", Theme::title()),
                Span::styled(title, Theme::text()),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel("RECENTLY WATCHED");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing watched yet").style(Theme::dimmed()),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .history
        .iter()
        .map(|entry| {
            let (filled, empty) = progress_bar(f64::from(entry.progress_percent) / 100.0, 10);
            ListItem::new(Line::from(vec![
                Span::styled(filled, Theme::progress_bar()),
                Span::styled(empty, Theme::progress_bar_empty()),
                Span::styled(format!(" {:>3}% ", entry.progress_percent), Theme::dimmed()),
                Span::styled(entry.title.as_str(), Theme::text()),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}
