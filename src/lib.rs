//! # mamalia
//!
//! A terminal guide to Indonesian mammals: browse and search the catalog,
//! keep favorites, read animal profiles aloud and take a timed quiz.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mamalia::{AppError, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     mamalia::run(Config::default()).await
//! }
//! ```
//!
//! The quiz engine can also be driven without a terminal:
//!
//! ```rust
//! use mamalia::quiz::{QuizSession, TimerMode};
//! use mamalia::storage::MemoryStore;
//! use rand::SeedableRng;
//!
//! let animals = mamalia::data::builtin_animals().unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut quiz = QuizSession::start(&animals, 5, TimerMode::None, &mut rng);
//! let answer = quiz.current_question().unwrap().answer.clone();
//! quiz.select_choice(&answer);
//! quiz.submit();
//! quiz.advance(&mut MemoryStore::new());
//! assert_eq!(quiz.score(), 1);
//! ```

mod app;
pub mod catalog;
pub mod config;
pub mod data;
pub mod feedback;
pub mod models;
pub mod quiz;
pub mod storage;
pub mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

pub use app::App;
pub use config::Config;
pub use data::LoadError;
pub use models::AppState;

use quiz::{QuizTimer, TimerEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Error type for running the application.
#[derive(Debug)]
pub enum AppError {
    /// Error loading the animal dataset.
    Load(LoadError),
    /// IO error while driving the terminal.
    Io(io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Load(e) => write!(f, "Failed to load animals: {}", e),
            AppError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Load(e) => Some(e),
            AppError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::Load(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

/// Runs the application in the terminal until the user quits.
///
/// Must be called from within a tokio runtime; quiz timers are spawned on it.
pub async fn run(config: Config) -> Result<(), AppError> {
    let catalog = config.load_catalog()?;
    log::info!("catalog has {} animals", catalog.len());
    let store = config.open_store();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(catalog, store, &config).with_timer(QuizTimer::new(tx));

    let mut term = terminal::init()?;
    let result = run_event_loop(&mut term, &mut app, &mut rx);
    app.go_home();
    terminal::restore()?;
    result
}

fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    timer_events: &mut mpsc::UnboundedReceiver<TimerEvent>,
) -> Result<(), AppError> {
    while !app.should_quit {
        while let Ok(event) = timer_events.try_recv() {
            app.handle_timer_event(event);
        }
        app.poll_speech();

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_input(app, key);
            }
        }
    }

    Ok(())
}

fn handle_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.state {
        AppState::Catalog if app.is_searching() => handle_search_input(app, key.code),
        AppState::Catalog => handle_catalog_input(app, key.code),
        AppState::Detail(_) => handle_detail_input(app, key.code),
        AppState::QuizSetup => handle_setup_input(app, key.code),
        AppState::Quiz => handle_quiz_input(app, key.code),
    }
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Down | KeyCode::Up => app.end_search(),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
}

fn handle_catalog_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('f') => app.toggle_selected_favorite(),
        KeyCode::Char('s') => app.cycle_status_filter(),
        KeyCode::Char('v') => app.toggle_only_favorites(),
        KeyCode::Char('x') | KeyCode::Esc => app.reset_search(),
        KeyCode::Char('z') => app.open_quiz_setup(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_detail_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_detail_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_detail_up(),
        KeyCode::Char('f') => app.toggle_detail_favorite(),
        KeyCode::Char('r') => app.read_aloud(),
        KeyCode::Char('s') => app.stop_reading(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => app.go_home(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_setup_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('t') => app.next_tier(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_tier(),
        KeyCode::Char('w') | KeyCode::Tab => app.cycle_timer_mode(),
        KeyCode::Char('m') => app.toggle_mute(),
        KeyCode::Enter | KeyCode::Char(' ') => app.start_quiz(),
        KeyCode::Esc | KeyCode::Backspace => app.go_home(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    let completed = app.quiz().is_some_and(|q| q.is_completed());

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.previous_choice(),
        KeyCode::Down | KeyCode::Char('j') => app.next_choice(),
        KeyCode::Char(c @ '1'..='4') => app.choose(c as usize - '1' as usize),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm(),
        KeyCode::Char('d') => app.open_current_animal(),
        KeyCode::Char('m') => app.toggle_mute(),
        KeyCode::Char('r') | KeyCode::Char('R') if completed => app.start_quiz(),
        KeyCode::Esc | KeyCode::Backspace => app.go_home(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}
