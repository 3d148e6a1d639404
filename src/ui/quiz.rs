use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;
use crate::quiz::{QuizSession, TimerMode};

use super::render_controls;

const OPTION_LABELS: [char; 4] = ['1', '2', '3', '4'];

pub fn render(frame: &mut Frame, area: Rect, app: &App, quiz: &QuizSession) {
    let Some(question) = quiz.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_status(frame, chunks[0], app, quiz);
    render_progress(frame, chunks[1], quiz);
    render_prompt(frame, chunks[2], &question.prompt);
    render_options(frame, chunks[3], question, quiz, app.choice_cursor());
    render_feedback(frame, chunks[4], app, quiz, question);

    let hint = if quiz.is_revealed() {
        "enter next  ·  d learn more  ·  m mute  ·  esc home  ·  q quit"
    } else {
        "j/k or 1-4 choose  ·  enter answer  ·  m mute  ·  esc home  ·  q quit"
    };
    render_controls(frame, chunks[5], hint);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, quiz: &QuizSession) {
    let mut spans = vec![
        Span::styled(
            format!("Pertanyaan {} dari {}", quiz.index() + 1, quiz.total()),
            Style::default().fg(Color::White).bold(),
        ),
        Span::styled(
            format!("   Skor {}   Terbaik {}", quiz.score(), app.best_score()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if quiz.timer_mode() != TimerMode::None {
        let color = if quiz.time_left() <= 5 {
            Color::Red
        } else {
            Color::Yellow
        };
        spans.push(Span::styled(
            format!("   ⏱ {}", format_time(quiz.time_left())),
            Style::default().fg(color).bold(),
        ));
    }
    if app.is_muted() {
        spans.push(Span::styled("   🔇", Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn render_progress(frame: &mut Frame, area: Rect, quiz: &QuizSession) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .percent(quiz.progress().min(100))
        .label("");
    frame.render_widget(gauge, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    let widget = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold()
        .block(Block::default().padding(Padding::top(1)));
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    quiz: &QuizSession,
    cursor: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.choices.len() * 2);

    for (index, choice) in question.choices.iter().enumerate() {
        let is_selected = quiz.selected() == Some(choice.as_str());
        let is_cursor = index == cursor && !quiz.is_revealed();

        let style = if quiz.is_revealed() {
            if question.is_correct(choice) {
                Style::default().fg(Color::Green).bold()
            } else if is_selected {
                Style::default().fg(Color::Red).bold()
            } else {
                Style::default().fg(Color::DarkGray)
            }
        } else if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor || (quiz.is_revealed() && is_selected) {
            ">"
        } else {
            " "
        };
        let label = OPTION_LABELS.get(index).copied().unwrap_or(' ');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(choice.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    quiz: &QuizSession,
    question: &Question,
) {
    if quiz.is_ending() {
        let widget = Paragraph::new(Line::from(Span::styled(
            "Waktu habis! Menghitung hasil...",
            Style::default().fg(Color::Red).bold(),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(widget, area);
        return;
    }
    if !quiz.is_revealed() {
        return;
    }

    let (verdict, color) = match quiz.last_correct() {
        Some(true) => ("Benar! 🎉", Color::Green),
        Some(false) if quiz.selected().is_none() => ("Waktu habis.", Color::Red),
        _ => ("Belum tepat.", Color::Red),
    };

    let mut content = vec![
        Line::from(Span::styled(verdict, Style::default().fg(color).bold())),
        Line::from(vec![
            Span::styled("Jawaban benar: ", Style::default().fg(Color::DarkGray)),
            Span::styled(question.answer.as_str(), Style::default().fg(Color::Green)),
        ]),
    ];
    if let Some(animal) = app.catalog().find(&question.animal_id) {
        content.push(Line::from(vec![
            Span::raw(animal.local_name.as_str()),
            Span::styled(
                format!("  {}", animal.latin_name),
                Style::default().fg(Color::DarkGray).italic(),
            ),
        ]));
    }

    let widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
