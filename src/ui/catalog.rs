use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
};

use crate::app::App;
use crate::models::Animal;

use super::{render_controls, status_color};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0]);
    render_filters(frame, chunks[1], app);

    let animals = app.visible_animals();
    if animals.is_empty() {
        render_empty(frame, chunks[2]);
    } else {
        render_list(frame, chunks[2], app, &animals);
    }

    let hint = if app.is_searching() {
        "type to search  ·  enter/esc done"
    } else {
        "j/k move  ·  enter open  ·  / search  ·  s status  ·  v favorites  ·  f ★  ·  z quiz  ·  q quit"
    };
    render_controls(frame, chunks[3], hint);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "MAMALIA INDONESIA",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("Temui teman-teman hewan kita!".fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_filters(frame: &mut Frame, area: Rect, app: &App) {
    let filter = app.filter();
    let query_style = if app.is_searching() {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if app.is_searching() { "▏" } else { "" };
    let placeholder = if filter.query.is_empty() && !app.is_searching() {
        "nama lokal, latin, habitat"
    } else {
        ""
    };

    let line = Line::from(vec![
        Span::styled("Cari: ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}{}", filter.query, cursor), query_style),
        Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
        Span::raw("   "),
        Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
        Span::styled(filter.status.label(), Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled("Favorit saja: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            if filter.only_favorites { "ya" } else { "tidak" },
            Style::default().fg(Color::Cyan),
        ),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App, animals: &[&Animal]) {
    let items: Vec<ListItem> = animals
        .iter()
        .map(|animal| {
            let star = if app.is_favorite(&animal.id) { "★ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(star, Style::default().fg(Color::Yellow)),
                Span::styled(animal.local_name.as_str(), Style::default().bold()),
                Span::styled(
                    format!("  {}", animal.latin_name),
                    Style::default().fg(Color::DarkGray).italic(),
                ),
                Span::raw("  "),
                Span::styled(
                    animal.conservation_status.label(),
                    Style::default().fg(status_color(animal.conservation_status)),
                ),
            ]))
        })
        .collect();

    let title = format!(" {} hewan ", animals.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(title)
                .title_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.catalog_cursor()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Tidak ada hewan yang cocok.",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
        Line::from("x reset pencarian".fg(Color::DarkGray)),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}
