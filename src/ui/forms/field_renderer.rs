//! Field rendering utilities for the job form

use crate::state::{FieldKind, FieldSpec, FieldValue, SelectMode};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a multiline text field gets, borders included
pub const MULTILINE_HEIGHT: u16 = 6;

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field_block(spec: &FieldSpec, is_active: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", spec.label))
        .borders(Borders::ALL)
        .border_style(border_style(is_active))
}

/// Rows needed to draw a field at the given outer width
pub fn field_height(spec: &FieldSpec, width: u16) -> u16 {
    match &spec.kind {
        FieldKind::Text { multiline: true } => MULTILINE_HEIGHT,
        FieldKind::Text { multiline: false } => 3,
        FieldKind::Choice { mode, options } => {
            let inner = width.saturating_sub(2).max(1) as usize;
            let mut rows = 1;
            let mut used = 0;
            for option in options {
                let chip = chip_text(*mode, option, false).chars().count();
                if used > 0 && used + chip > inner {
                    rows += 1;
                    used = 0;
                }
                used += chip;
            }
            rows + 2
        }
    }
}

/// Text drawn for one option, trailing gap included
fn chip_text(mode: SelectMode, option: &str, selected: bool) -> String {
    let marker = match (mode, selected) {
        (SelectMode::Multi, true) => "[x]",
        (SelectMode::Multi, false) => "[ ]",
        (SelectMode::Single, true) => "(•)",
        (SelectMode::Single, false) => "( )",
    };
    format!("{marker} {option}  ")
}

/// Draw a free text field
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: &str,
    is_active: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if spec.is_multiline() {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    frame.render_widget(
        content
            .wrap(Wrap { trim: false })
            .block(field_block(spec, is_active)),
        area,
    );
}

/// Draw a choice group as a row of toggle chips.
///
/// `option_cursor` is the highlighted option when the group has focus.
pub fn draw_choice_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: &FieldValue,
    option_cursor: Option<usize>,
) {
    let FieldKind::Choice { mode, options } = &spec.kind else {
        return;
    };
    let selected = value.as_selection();

    let spans: Vec<Span> = options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let is_selected = selected.contains(option);
            let mut style = if is_selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            if option_cursor == Some(index) {
                style = style.fg(Color::Cyan).add_modifier(Modifier::REVERSED);
            }
            Span::styled(chip_text(*mode, option, is_selected), style)
        })
        .collect();

    let paragraph = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: false })
        .block(field_block(spec, option_cursor.is_some()));
    frame.render_widget(paragraph, area);
}
