use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::quiz::{TimerMode, TIERS};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(17),
        Constraint::Fill(1),
    ])
    .split(area);

    let tiers: Vec<Span> = TIERS
        .iter()
        .flat_map(|tier| {
            let style = if *tier == app.tier() {
                Style::default().fg(Color::Cyan).bold().reversed()
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} soal ", tier), style), Span::raw(" ")]
        })
        .collect();

    let modes: Vec<Span> = [TimerMode::None, TimerMode::PerQuestion, TimerMode::Overall]
        .into_iter()
        .flat_map(|mode| {
            let style = if mode == app.timer_mode() {
                Style::default().fg(Color::Cyan).bold().reversed()
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} ", mode.label()), style), Span::raw(" ")]
        })
        .collect();

    let sound = if app.is_muted() { "mati" } else { "nyala" };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "KUIS MAMALIA",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("Seberapa kenal kamu dengan mamalia Indonesia?".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(tiers),
        Line::from("h/l jumlah soal".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(modes),
        Line::from("w timer".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Skor terbaik: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{}", app.best_score(), app.tier()),
                Style::default().fg(Color::Yellow).bold(),
            ),
            Span::styled("   Rekor semua: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                app.global_best_score().to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("Suara: ", Style::default().fg(Color::DarkGray)),
            Span::raw(sound),
            Span::styled("  (m)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("mulai  ·  esc kembali".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
