//! Job form view

mod field_renderer;

use crate::app::App;
use crate::state::FieldKind;
use field_renderer::{draw_choice_field, draw_text_field, field_height};
use ratatui::{layout::Rect, Frame};

/// Index of the first field to draw so the focused one stays on screen
fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    let mut start = 0;
    while start < active {
        let needed: u16 = heights[start..=active].iter().sum();
        if needed <= available {
            break;
        }
        start += 1;
    }
    start
}

/// Draw every field of the form, scrolled to keep the focused field visible
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let fields: Vec<_> = app.form.fields().collect();
    let heights: Vec<u16> = fields
        .iter()
        .map(|(spec, _)| field_height(spec, area.width))
        .collect();
    let active = app.cursor.field.min(fields.len().saturating_sub(1));
    let start = first_visible(&heights, active, area.height);

    let mut y = area.y;
    let bottom = area.y + area.height;
    for (index, (spec, value)) in fields.iter().enumerate().skip(start) {
        let height = heights[index];
        if y + height > bottom {
            break;
        }
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        let is_active = index == app.cursor.field;
        match spec.kind {
            FieldKind::Text { .. } => {
                draw_text_field(frame, field_area, spec, value.as_text(), is_active)
            }
            FieldKind::Choice { .. } => {
                let option_cursor = is_active.then_some(app.cursor.option);
                draw_choice_field(frame, field_area, spec, value, option_cursor)
            }
        }
        y += height;
    }
}
