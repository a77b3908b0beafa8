//! Record source configuration screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::form::{ConfigField, ConfigForm};

/// Render the configuration form.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.config_form() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(17),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RECORD SOURCE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Optional: load custom questions from an Airtable table".fg(Color::DarkGray)),
        Line::from(""),
    ];

    for field in ConfigField::ALL {
        content.push(field_label(form, field));
        content.push(field_input(form, field));
        content.push(Line::from(""));
    }

    let hint = if form.is_complete() {
        Span::styled("[Enter] save", Style::default().fg(Color::Green))
    } else {
        Span::styled("fill in every field to save", Style::default().fg(Color::DarkGray))
    };
    content.push(Line::from(hint));
    content.push(Line::from(Span::styled(
        "[Tab] next field  ·  [Esc] back",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
}

fn field_label(form: &ConfigForm, field: ConfigField) -> Line<'static> {
    let style = if form.focus() == field {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(Span::styled(field.label(), style))
}

fn field_input(form: &ConfigForm, field: ConfigField) -> Line<'static> {
    let value = form.value(field);
    let focused = form.focus() == field;

    let mut spans = if value.is_empty() {
        vec![Span::styled(
            field.placeholder(),
            Style::default().fg(Color::DarkGray),
        )]
    } else if field.is_secret() {
        vec![Span::styled(
            "*".repeat(value.chars().count()),
            Style::default().fg(Color::Yellow),
        )]
    } else {
        vec![Span::styled(
            value.to_string(),
            Style::default().fg(Color::Yellow),
        )]
    };

    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}
