mod catalog;
mod detail;
mod quiz;
mod result;
mod setup;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::models::{AppState, ConservationStatus};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.state {
        AppState::Catalog => catalog::render(frame, area, app),
        AppState::Detail(_) => detail::render(frame, area, app),
        AppState::QuizSetup => setup::render(frame, area, app),
        AppState::Quiz => match app.quiz() {
            Some(quiz) if quiz.is_completed() => result::render(frame, area, app, quiz),
            Some(quiz) => quiz::render(frame, area, app, quiz),
            None => setup::render(frame, area, app),
        },
    }
}

fn status_color(status: ConservationStatus) -> Color {
    match status {
        ConservationStatus::CriticallyEndangered => Color::Red,
        ConservationStatus::Endangered => Color::LightRed,
        ConservationStatus::Vulnerable => Color::Yellow,
        ConservationStatus::NearThreatened => Color::Cyan,
        ConservationStatus::LeastConcern => Color::Green,
    }
}

fn render_controls(frame: &mut Frame, area: Rect, hint: &str) {
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
