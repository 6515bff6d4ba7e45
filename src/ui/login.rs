//! Sign-in screen

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::App;
use crate::forms::LoginField;
use crate::ui::{centered_rect, field_block, input_line, Theme};

/// Render the login form centered in `area`
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.login;
    let card = centered_rect(50, 15, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(" Sign in ", Theme::title()))
        .title_alignment(Alignment::Center);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tagline
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(1),
            Constraint::Min(1), // Submit / status
        ])
        .split(inner);

    let tagline = Paragraph::new("Unlimited movies, anywhere.")
        .style(Theme::secondary())
        .alignment(Alignment::Center);
    frame.render_widget(tagline, chunks[0]);

    let email_focused = form.focus == LoginField::Email && !form.submitting;
    let email = Paragraph::new(input_line(&form.email, email_focused, false))
        .block(field_block("Email", email_focused));
    frame.render_widget(email, chunks[1]);

    let password_focused = form.focus == LoginField::Password && !form.submitting;
    let password = Paragraph::new(input_line(&form.password, password_focused, true))
        .block(field_block("Password", password_focused));
    frame.render_widget(password, chunks[2]);

    let status = if form.submitting {
        Line::from(Span::styled("⟳ Signing in...", Theme::loading()))
    } else {
        Line::from(vec![
            Span::styled(" ↵ ", Theme::keybind()),
            Span::styled("Sign in", Theme::keybind_desc()),
        ])
    };
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[4]);
}
