use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Animal;

use super::{render_controls, status_color};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let Some(animal) = app.detail_animal() else {
        render_not_found(frame, chunks[1]);
        render_controls(frame, chunks[3], "esc back  ·  q quit");
        return;
    };

    render_title(frame, chunks[0], animal, app.is_favorite(&animal.id));
    render_profile(frame, chunks[1], animal, app.detail_scroll());
    render_reading_state(frame, chunks[2], app);
    render_controls(
        frame,
        chunks[3],
        "j/k scroll  ·  f ★  ·  r read aloud  ·  s stop  ·  esc back  ·  q quit",
    );
}

fn render_title(frame: &mut Frame, area: Rect, animal: &Animal, favorite: bool) {
    let star = if favorite { "★ " } else { "" };
    let content = vec![
        Line::from(vec![
            Span::styled(star, Style::default().fg(Color::Yellow)),
            Span::styled(
                animal.local_name.as_str(),
                Style::default().fg(Color::Green).bold(),
            ),
        ]),
        Line::from(Span::styled(
            animal.latin_name.as_str(),
            Style::default().fg(Color::DarkGray).italic(),
        )),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_profile(frame: &mut Frame, area: Rect, animal: &Animal, scroll: u16) {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let heading = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().fg(Color::Cyan).bold()))
    };

    let mut lines = vec![
        Line::from(vec![
            label("Status     "),
            Span::styled(
                animal.conservation_status.label(),
                Style::default()
                    .fg(status_color(animal.conservation_status))
                    .bold(),
            ),
        ]),
        Line::from(vec![label("Habitat    "), Span::raw(animal.habitat.as_str())]),
        Line::from(vec![label("Makanan    "), Span::raw(animal.food_type.as_str())]),
        Line::from(vec![label("Populasi   "), Span::raw(animal.population.as_str())]),
        Line::from(""),
        heading("Ciri-ciri"),
    ];

    lines.extend(animal.characteristics.iter().map(|c| {
        Line::from(vec![
            Span::styled(" • ", Style::default().fg(Color::Green)),
            Span::raw(c.as_str()),
        ])
    }));

    lines.push(Line::from(""));
    lines.push(heading("Tahukah kamu?"));
    lines.push(Line::from(Span::styled(
        animal.fun_fact.as_str(),
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from(""));
    lines.push(heading("Deskripsi"));
    lines.push(Line::from(animal.description.as_str()));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_reading_state(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.is_reading() {
        Line::from(Span::styled(
            "Membacakan...",
            Style::default().fg(Color::Green),
        ))
    } else if app.speech_unavailable() {
        Line::from(Span::styled(
            "Pembaca suara tidak tersedia.",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_not_found(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Hewan tidak ditemukan",
            Style::default().fg(Color::Red).bold(),
        )),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}
