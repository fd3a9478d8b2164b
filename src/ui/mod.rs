//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod summary_panel;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (form_area, summary_area, status_area) = layout::create_layout(frame.area());

    forms::draw_form(frame, form_area, app);
    summary_panel::draw(frame, summary_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Error dialog overlays everything
    if let Some(error) = app.current_error() {
        components::render_error_dialog(frame, error);
    }
}
