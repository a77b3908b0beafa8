use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{OptionLabel, Question};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.session().snapshot();
    let Some(question) = snapshot.current_question else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], snapshot.position + 1, snapshot.total);
    render_question_text(frame, chunks[1], &question.question);
    render_options(
        frame,
        chunks[2],
        question,
        app.cursor(),
        snapshot.selected_answer,
    );
    render_controls(
        frame,
        chunks[3],
        snapshot.selected_answer.is_some(),
        app.session().is_last_question(),
    );
}

fn render_progress(frame: &mut Frame, area: Rect, number: usize, total: usize) {
    let progress = format!("{}/{}", number, total);
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    cursor: OptionLabel,
    selected: Option<OptionLabel>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(OptionLabel::ALL.len() * 2);

    for (label, option) in question.options() {
        let is_chosen = selected == Some(label);
        let style = match selected {
            _ if is_chosen => Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
            Some(_) => Style::default().fg(Color::DarkGray),
            None if label == cursor => Style::default().fg(Color::Cyan).bold(),
            None => Style::default().fg(Color::Gray),
        };
        let marker = match selected {
            Some(_) if is_chosen => "✓",
            None if label == cursor => ">",
            _ => " ",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_controls(frame: &mut Frame, area: Rect, answered: bool, last: bool) {
    let text = match (answered, last) {
        (false, _) => "j/k navigate  ·  a-d or enter answer  ·  q quit",
        (true, false) => "enter next  ·  q quit",
        (true, true) => "enter finish  ·  q quit",
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
