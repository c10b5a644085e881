use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::form::{FieldState, FormState, SettingsForm};

use super::layout::popup_rect;

const DIALOG_HINT: &str = "Enter/Ctrl+S save • Esc close • Tab/↑↓ move • ←/→ adjust";

pub fn render_settings_dialog(
    frame: &mut Frame<'_>,
    form: &mut SettingsForm,
    title: &str,
    show_error_list: bool,
) {
    let base = frame.area();
    let global_errors: Vec<String> = if show_error_list {
        form.global_errors().to_vec()
    } else {
        Vec::new()
    };
    let state = form.state_mut();

    let field_lines = state.fields.len().max(1) * 2;
    let error_lines = if global_errors.is_empty() {
        0
    } else {
        global_errors.len() + 1
    };
    let description_lines = usize::from(state.description.is_some());
    let wanted_height = (field_lines + error_lines + description_lines + 3) as u16;
    let hint_width = (DIALOG_HINT.width() + 2) as u16;
    let width = base
        .width
        .saturating_sub(base.width / 4)
        .max(40)
        .max(hint_width);
    let area = popup_rect(base, width, wanted_height.max(7));
    frame.render_widget(Clear, area);

    let heading = state.title.clone().unwrap_or_else(|| title.to_string());
    let block = Block::default()
        .title(format!("Settings – {heading}"))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(description_lines as u16),
            Constraint::Min(1),
            Constraint::Length(error_lines as u16),
            Constraint::Length(1),
        ])
        .split(inner);

    if let Some(description) = &state.description {
        let desc = Paragraph::new(description.clone())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(desc, chunks[0]);
    }

    render_fields(frame, chunks[1], state);

    if !global_errors.is_empty() {
        let mut lines = vec![Line::from(Span::styled(
            "Errors",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))];
        lines.extend(global_errors.iter().map(|error| {
            Line::from(Span::styled(
                format!("• {error}"),
                Style::default().fg(Color::Red),
            ))
        }));
        frame.render_widget(Paragraph::new(lines), chunks[2]);
    }

    let hint = Paragraph::new(DIALOG_HINT).style(Style::default().fg(Color::Yellow));
    frame.render_widget(hint, chunks[3]);
}

fn render_fields(frame: &mut Frame<'_>, area: Rect, state: &mut FormState) {
    if state.is_empty() {
        let empty = Paragraph::new("This widget has no configurable options.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    state.ensure_focus_visible((area.height as usize / 2).max(1));
    let focused = state.field_index;
    let items: Vec<ListItem<'static>> = state
        .fields
        .iter()
        .enumerate()
        .skip(state.scroll_offset)
        .map(|(index, field)| ListItem::new(field_lines(field, index == focused)))
        .collect();
    frame.render_widget(List::new(items), area);
}

pub(crate) fn field_lines(field: &FieldState, selected: bool) -> Vec<Line<'static>> {
    let marker = if selected { "» " } else { "  " };
    let label_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let mut label = field.schema.display_label();
    if field.schema.required {
        label.push('*');
    }

    let mut header = vec![
        Span::styled(format!("{marker}{label}: "), label_style),
        Span::raw(field.display_value()),
    ];
    if selected {
        header.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }
    header.push(Span::styled(
        format!("  <{}>", field.schema.type_label()),
        Style::default().fg(Color::DarkGray),
    ));

    let detail = match &field.error {
        Some(error) => Span::styled(format!("    ✖ {error}"), Style::default().fg(Color::Red)),
        None => Span::styled(
            format!("    {}", field.schema.description.clone().unwrap_or_default()),
            Style::default().fg(Color::DarkGray),
        ),
    };

    vec![Line::from(header), Line::from(detail)]
}
