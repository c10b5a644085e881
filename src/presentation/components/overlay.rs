use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::overlay::{OverlayControl, WidgetSettingsOverlay};

const OVERLAY_BG: Color = Color::Rgb(40, 40, 40);

pub fn render_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    overlay: &WidgetSettingsOverlay,
    focus: Option<OverlayControl>,
) {
    let block = Block::default()
        .title(overlay.widget().display_title().to_string())
        .borders(Borders::ALL)
        .style(Style::default().bg(OVERLAY_BG).fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let controls = overlay.controls();
    let icons = Paragraph::new(controls_line(&controls, focus)).alignment(Alignment::Center);
    frame.render_widget(icons, rows[1]);

    if let Some(control) = focus.filter(|control| controls.contains(control)) {
        let tooltip = Paragraph::new(Span::styled(
            control.tooltip(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(tooltip, rows[2]);
    }
}

pub(crate) fn controls_line(
    controls: &[OverlayControl],
    focus: Option<OverlayControl>,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(controls.len() * 2);
    for (index, control) in controls.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("   "));
        }
        let color = match control {
            OverlayControl::EditSettings => Color::Cyan,
            OverlayControl::Delete => Color::Magenta,
        };
        let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        if focus == Some(*control) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {} ", control.icon()), style));
    }
    Line::from(spans)
}
