use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::data::FALLBACK_NOTICE;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(15),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ DECK",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Test your knowledge with multiple-choice questions".fg(Color::DarkGray)),
        Line::from(""),
        deck_status(app),
        Line::from(""),
    ];

    let load = app.deck_load();
    match load.advisory {
        Some(advisory) if !app.is_loading() => {
            content.push(Line::from(advisory.message().fg(Color::Yellow)));
            content.push(Line::from(FALLBACK_NOTICE.fg(Color::DarkGray)));
        }
        _ if app.config_saved() && !app.is_loading() => {
            content.push(Line::from("Configuration saved.".fg(Color::Green)));
            content.push(Line::from(""));
        }
        _ => {
            content.push(Line::from(""));
            content.push(Line::from(""));
        }
    }

    content.push(Line::from(""));
    if app.is_loading() {
        content.push(Line::from(Span::styled(
            "PLEASE WAIT",
            Style::default().fg(Color::DarkGray).bold(),
        )));
    } else {
        content.push(Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )));
        content.push(Line::from("to start".fg(Color::DarkGray)));
    }

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, chunks[1]);

    render_controls(frame, chunks[3]);
}

fn deck_status(app: &App) -> Line<'static> {
    if app.is_loading() {
        return Line::from("Loading questions...".fg(Color::Yellow));
    }

    let load = app.deck_load();
    let origin = if load.used_fallback {
        "bundled"
    } else {
        "from record source"
    };
    Line::from(vec![
        Span::styled(
            format!("{} questions ready", load.deck.len()),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("  ·  {}", origin), Style::default().fg(Color::DarkGray)),
    ])
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("enter start  ·  c configure source  ·  r reload  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
