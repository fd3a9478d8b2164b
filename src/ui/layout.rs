//! Screen layout and status bar

use crate::app::App;
use crate::platform::{COPY_SHORTCUT, GENERATE_SHORTCUT, RESET_SHORTCUT};
use crate::state::FieldKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into (form, summary, status bar)
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Form
            Constraint::Percentage(45), // Summary
        ])
        .split(rows[0]);

    (columns[0], columns[1], rows[1])
}

/// Keyboard hints for whatever kind of field has focus
fn field_hints(app: &App) -> String {
    let field_keys = match app.active_field().map(|f| &f.kind) {
        Some(FieldKind::Choice { .. }) => "←/→:option  Space:toggle",
        Some(FieldKind::Text { multiline: true }) => "type:edit  Enter:newline",
        Some(FieldKind::Text { multiline: false }) => "type:edit",
        None => "",
    };
    format!(
        "Tab:next  {field_keys}  {GENERATE_SHORTCUT}:generate  {COPY_SHORTCUT}:copy  {RESET_SHORTCUT}:reset"
    )
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        field_hints(app),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " Esc:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}
