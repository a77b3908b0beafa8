use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

const QUESTION_PREVIEW_LENGTH: usize = 50;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let score = session.score();
    let total = session.total();
    let percentage = calculate_percentage(score, total);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], score, total, percentage);
    render_question_breakdown(frame, chunks[2], app, app.result_scroll());
    render_controls(frame, chunks[3]);
}

/// Rounded to the nearest whole percent.
fn calculate_percentage(score: usize, total: usize) -> u32 {
    if total > 0 {
        ((score as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    }
}

fn performance_message(percentage: u32) -> &'static str {
    match percentage {
        80.. => "Excellent!",
        60..=79 => "Good Job!",
        40..=59 => "Keep Practicing!",
        _ => "Try Again!",
    }
}

fn get_grade_color(percentage: u32) -> Color {
    match percentage {
        80.. => Color::Green,
        60..=79 => Color::Cyan,
        40..=59 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, score: usize, total: usize, percentage: u32) {
    let grade_color = get_grade_color(percentage);
    let content = vec![
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({}%)", score, total, percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(performance_message(percentage).fg(grade_color)),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("Correct {}", score), Style::default().fg(Color::Green)),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Incorrect {}", total - score),
                Style::default().fg(Color::Red),
            ),
        ]),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App, scroll: usize) {
    let session = app.session();
    let lines: Vec<Line> = session
        .answers()
        .iter()
        .zip(session.deck().iter())
        .enumerate()
        .map(|(index, (answer, question))| {
            let is_correct = answer.is_some_and(|label| question.is_correct(label));
            let (symbol, color) = if is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };
            let given = answer
                .map(|label| label.to_string())
                .unwrap_or_else(|| "-".to_string());
            let expected = question
                .correct_label()
                .map(|label| label.to_string())
                .unwrap_or_else(|| "?".to_string());

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&question.question),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  {} → {}", given, expected),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll_offset(scroll), 0));
    frame.render_widget(widget, area);
}

fn scroll_offset(scroll: usize) -> u16 {
    u16::try_from(scroll).unwrap_or(u16::MAX)
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
