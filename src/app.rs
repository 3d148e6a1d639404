use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::{Catalog, CatalogFilter};
use crate::config::Config;
use crate::feedback::{ProcessSpeech, SoundEffects, Speech, SpeechOptions, TerminalBell};
use crate::models::{Animal, AppState};
use crate::quiz::{QuizSession, QuizTimer, Signal, TimerEvent, TimerMode, TIERS};
use crate::storage::KeyValueStore;
use crate::storage::best_score::{load_best_for, load_global_best};
use crate::storage::favorites::{load_favorites, save_favorites, toggle_favorite};

pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    catalog: Catalog,
    store: Box<dyn KeyValueStore>,
    favorites: HashSet<String>,
    filter: CatalogFilter,
    searching: bool,
    catalog_cursor: usize,
    detail_scroll: u16,
    tier: usize,
    timer_mode: TimerMode,
    quiz: Option<QuizSession>,
    choice_cursor: usize,
    muted: bool,
    rng: StdRng,
    timer: Option<QuizTimer>,
    sounds: Box<dyn SoundEffects>,
    speech: Option<Box<dyn Speech>>,
    reading: bool,
    speech_unavailable: bool,
}

impl App {
    pub fn new(catalog: Catalog, store: Box<dyn KeyValueStore>, config: &Config) -> Self {
        let favorites = load_favorites(store.as_ref());
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let tier = if TIERS.contains(&config.tier) {
            config.tier
        } else {
            log::warn!("unsupported tier {}, using {}", config.tier, crate::quiz::DEFAULT_TIER);
            crate::quiz::DEFAULT_TIER
        };

        Self {
            state: AppState::Catalog,
            should_quit: false,
            catalog,
            store,
            favorites,
            filter: CatalogFilter::default(),
            searching: false,
            catalog_cursor: 0,
            detail_scroll: 0,
            tier,
            timer_mode: config.timer_mode,
            quiz: None,
            choice_cursor: 0,
            muted: config.muted,
            rng,
            timer: None,
            sounds: Box::new(TerminalBell::new()),
            speech: None,
            reading: false,
            speech_unavailable: false,
        }
    }

    /// Enables timed quizzes. Without a timer no ticks are scheduled and
    /// [`App::handle_timer_event`] must be fed by the caller.
    pub fn with_timer(mut self, timer: QuizTimer) -> Self {
        self.timer = Some(timer);
        self
    }

    pub fn with_sounds(mut self, sounds: Box<dyn SoundEffects>) -> Self {
        self.sounds = sounds;
        self
    }

    /// Overrides the speech backend, which is otherwise created on first use.
    pub fn with_speech(mut self, speech: Box<dyn Speech>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &HashSet<String> {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    // Catalog

    pub fn visible_animals(&self) -> Vec<&Animal> {
        self.catalog.filter(&self.filter, &self.favorites).collect()
    }

    pub fn catalog_cursor(&self) -> usize {
        self.catalog_cursor
    }

    pub fn selected_animal(&self) -> Option<&Animal> {
        self.visible_animals().get(self.catalog_cursor).copied()
    }

    pub fn cursor_down(&mut self) {
        let len = self.visible_animals().len();
        if len > 0 {
            self.catalog_cursor = (self.catalog_cursor + 1).min(len - 1);
        }
    }

    pub fn cursor_up(&mut self) {
        self.catalog_cursor = self.catalog_cursor.saturating_sub(1);
    }

    pub fn begin_search(&mut self) {
        self.searching = true;
    }

    pub fn end_search(&mut self) {
        self.searching = false;
    }

    pub fn search_push(&mut self, c: char) {
        self.filter.query.push(c);
        self.clamp_cursor();
    }

    pub fn search_pop(&mut self) {
        self.filter.query.pop();
        self.clamp_cursor();
    }

    pub fn cycle_status_filter(&mut self) {
        self.filter.status = self.filter.status.next();
        self.clamp_cursor();
    }

    pub fn toggle_only_favorites(&mut self) {
        self.filter.only_favorites = !self.filter.only_favorites;
        self.clamp_cursor();
    }

    pub fn reset_search(&mut self) {
        self.filter.reset_search();
        self.searching = false;
        self.clamp_cursor();
    }

    pub fn toggle_selected_favorite(&mut self) {
        if let Some(id) = self.selected_animal().map(|a| a.id.clone()) {
            self.toggle_favorite(&id);
        }
    }

    pub fn open_selected(&mut self) {
        if let Some(id) = self.selected_animal().map(|a| a.id.clone()) {
            self.open_detail(&id);
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_animals().len();
        self.catalog_cursor = self.catalog_cursor.min(len.saturating_sub(1));
    }

    // Favorites

    /// Flips `id` in the favorite set and saves it right away.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let now = toggle_favorite(&mut self.favorites, id);
        save_favorites(self.store.as_mut(), &self.favorites);
        self.clamp_cursor();
        now
    }

    // Navigation

    pub fn go_home(&mut self) {
        self.stop_reading();
        self.abandon_quiz();
        self.state = AppState::Catalog;
    }

    pub fn open_detail(&mut self, id: &str) {
        self.stop_reading();
        self.abandon_quiz();
        self.detail_scroll = 0;
        self.state = AppState::Detail(id.to_string());
    }

    /// The animal shown on the detail screen; `None` when the id is unknown.
    pub fn detail_animal(&self) -> Option<&Animal> {
        match &self.state {
            AppState::Detail(id) => self.catalog.find(id),
            _ => None,
        }
    }

    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn toggle_detail_favorite(&mut self) {
        if let Some(id) = self.detail_animal().map(|a| a.id.clone()) {
            self.toggle_favorite(&id);
        }
    }

    // Speech

    /// Reads the detail screen's animal aloud, replacing any utterance in
    /// progress.
    pub fn read_aloud(&mut self) {
        let Some(text) = self.detail_animal().map(Animal::narration) else {
            return;
        };
        let speech = self.speech();
        if !speech.can_speak() {
            self.speech_unavailable = true;
            return;
        }
        speech.speak(&text, &SpeechOptions::default());
        self.reading = true;
    }

    pub fn stop_reading(&mut self) {
        if let Some(speech) = self.speech.as_mut() {
            speech.stop();
        }
        self.reading = false;
    }

    /// Refreshes the reading flag once the utterance finishes on its own.
    pub fn poll_speech(&mut self) {
        if self.reading {
            self.reading = self.speech.as_mut().is_some_and(|s| s.is_speaking());
        }
    }

    pub fn is_reading(&self) -> bool {
        self.reading
    }

    /// Set after a read-aloud attempt found no speech backend.
    pub fn speech_unavailable(&self) -> bool {
        self.speech_unavailable
    }

    fn speech(&mut self) -> &mut dyn Speech {
        self.speech
            .get_or_insert_with(|| Box::new(ProcessSpeech::new()) as Box<dyn Speech>)
            .as_mut()
    }

    // Quiz setup

    pub fn open_quiz_setup(&mut self) {
        self.stop_reading();
        self.abandon_quiz();
        self.state = AppState::QuizSetup;
    }

    pub fn tier(&self) -> usize {
        self.tier
    }

    pub fn next_tier(&mut self) {
        let position = TIERS.iter().position(|t| *t == self.tier).unwrap_or(0);
        self.tier = TIERS[(position + 1) % TIERS.len()];
    }

    pub fn previous_tier(&mut self) {
        let position = TIERS.iter().position(|t| *t == self.tier).unwrap_or(0);
        self.tier = TIERS[(position + TIERS.len() - 1) % TIERS.len()];
    }

    pub fn timer_mode(&self) -> TimerMode {
        self.timer_mode
    }

    pub fn cycle_timer_mode(&mut self) {
        self.timer_mode = self.timer_mode.next();
    }

    /// Best score for the tier the active session (or the setup screen) uses.
    pub fn best_score(&self) -> usize {
        let tier = self.quiz.as_ref().map_or(self.tier, QuizSession::tier);
        load_best_for(self.store.as_ref(), tier)
    }

    pub fn global_best_score(&self) -> usize {
        load_global_best(self.store.as_ref())
    }

    // Quiz

    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    pub fn choice_cursor(&self) -> usize {
        self.choice_cursor
    }

    /// Starts a fresh session with the current tier and timer mode. Also
    /// serves as "play again": the previous session is discarded.
    pub fn start_quiz(&mut self) {
        self.abandon_quiz();
        let session =
            QuizSession::start(self.catalog.animals(), self.tier, self.timer_mode, &mut self.rng);
        self.quiz = Some(session);
        self.choice_cursor = 0;
        self.state = AppState::Quiz;
        self.sync_timer();
    }

    pub fn next_choice(&mut self) {
        self.move_choice_cursor(1);
    }

    pub fn previous_choice(&mut self) {
        self.move_choice_cursor(-1);
    }

    fn move_choice_cursor(&mut self, delta: isize) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        if quiz.is_revealed() || quiz.is_completed() {
            return;
        }
        let len = quiz.current_question().map_or(0, |q| q.choices.len());
        if len == 0 {
            return;
        }
        let next = (self.choice_cursor as isize + delta).rem_euclid(len as isize) as usize;
        self.choice_cursor = next;
        quiz.select_index(next);
    }

    pub fn choose(&mut self, index: usize) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        let valid = quiz
            .current_question()
            .is_some_and(|q| index < q.choices.len());
        if valid && !quiz.is_revealed() {
            self.choice_cursor = index;
            quiz.select_index(index);
        }
    }

    /// Submits when the current question is unanswered, advances when it is
    /// revealed.
    pub fn confirm(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        let signal = if quiz.is_revealed() {
            let signal = quiz.advance(self.store.as_mut());
            self.choice_cursor = 0;
            signal
        } else {
            quiz.submit()
        };
        if let Some(signal) = signal {
            self.on_signal(signal);
        }
        self.sync_timer();
    }

    /// "Learn more" about the current question's animal.
    pub fn open_current_animal(&mut self) {
        let id = self
            .quiz
            .as_ref()
            .filter(|q| q.is_revealed())
            .and_then(|q| q.current_question())
            .map(|q| q.animal_id.clone());
        if let Some(id) = id {
            self.open_detail(&id);
        }
    }

    /// Routes a timer event to the live session, dropping stale ones.
    pub fn handle_timer_event(&mut self, event: TimerEvent) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        let signal = match event {
            TimerEvent::Tick { session, epoch }
                if session == quiz.id() && epoch == quiz.timer_epoch() =>
            {
                quiz.tick()
            }
            TimerEvent::GraceElapsed { session } if session == quiz.id() => {
                quiz.finish_grace(self.store.as_mut())
            }
            _ => {
                log::trace!("dropping stale {:?}", event);
                None
            }
        };
        if let Some(signal) = signal {
            self.on_signal(signal);
        }
        self.sync_timer();
    }

    fn on_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Correct => self.sounds.play_correct(self.muted),
            Signal::Incorrect => self.sounds.play_incorrect(self.muted),
            Signal::GraceStarted => {
                if let (Some(timer), Some(quiz)) = (self.timer.as_mut(), self.quiz.as_ref()) {
                    timer.schedule_grace(quiz.id());
                }
            }
            Signal::Completed { score, total } => {
                log::debug!("showing results {}/{}", score, total);
            }
        }
    }

    fn abandon_quiz(&mut self) {
        if let Some(quiz) = self.quiz.take() {
            log::debug!("discarding quiz {}", quiz.id());
        }
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
    }

    fn sync_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.sync(self.quiz.as_ref());
        }
    }
}
