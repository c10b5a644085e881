use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
};

use super::super::view::UiContext;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if let Some(help) = ctx.help {
        let actions = Paragraph::new(format!("Actions: {help}"))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(actions, rows[0]);
    }

    let mut status = ctx.status_message.to_string();
    if status.trim().is_empty() {
        status = "Ready".to_string();
    }
    let status_widget = Paragraph::new(format!("Status: {status}")).wrap(Wrap { trim: true });
    frame.render_widget(status_widget, rows[1]);
}
