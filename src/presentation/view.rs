use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::overlay::{OverlayControl, WidgetSettingsOverlay};

use super::components::{render_footer, render_overlay, render_settings_dialog};

pub struct UiContext<'a> {
    pub focus: Option<OverlayControl>,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    pub show_error_list: bool,
}

pub fn draw(frame: &mut Frame<'_>, overlay: &mut WidgetSettingsOverlay, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(frame.area());

    let focus = if overlay.dialog().is_open() {
        None
    } else {
        ctx.focus
    };
    render_overlay(frame, chunks[0], overlay, focus);
    render_footer(frame, chunks[1], &ctx);

    let title = overlay.widget().display_title().to_string();
    if let Some(form) = overlay.form_mut() {
        render_settings_dialog(frame, form, &title, ctx.show_error_list);
    }
}
