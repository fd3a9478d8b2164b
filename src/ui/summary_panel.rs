//! Generated summary panel

use super::components::{render_key_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{COPY_SHORTCUT, GENERATE_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the read-only summary with its action buttons underneath
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                // Summary text
            Constraint::Length(BUTTON_HEIGHT), // Buttons
        ])
        .split(area);

    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let paragraph = match &app.summary {
        Some(summary) => Paragraph::new(summary.as_str()),
        None => Paragraph::new(format!(
            "No summary yet.\n\nFill in the form, then press {GENERATE_SHORTCUT}."
        ))
        .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(paragraph.wrap(Wrap { trim: false }).block(block), chunks[0]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_key_button(frame, buttons[0], GENERATE_SHORTCUT, "Generate", true);
    render_key_button(
        frame,
        buttons[1],
        COPY_SHORTCUT,
        "Copy",
        app.summary.is_some(),
    );
}
