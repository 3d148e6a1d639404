//! Quiz session state machine.
//!
//! A session is created by [`QuizSession::start`] (leaving `NotStarted`) and
//! runs until it is `Completed`. Each question cycles through
//! `Unanswered -> Revealed`. Operations called in a state where they do not
//! apply are ignored.

use std::time::Duration;

use rand::Rng;
use uuid::Uuid;

use crate::models::{Animal, Question};
use crate::storage::KeyValueStore;
use crate::storage::best_score::save_best_if_higher;

use super::generator::build_questions;

pub const PER_QUESTION_SECONDS: u32 = 15;
pub const OVERALL_SECONDS: u32 = 180;
/// Pause between overall-timer expiry and forced completion.
pub const GRACE_DELAY: Duration = Duration::from_millis(500);

/// Selectable difficulty tiers (question counts).
pub const TIERS: [usize; 3] = [5, 8, 12];
pub const DEFAULT_TIER: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TimerMode {
    #[default]
    None,
    PerQuestion,
    Overall,
}

impl TimerMode {
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::None => "Tanpa Timer",
            TimerMode::PerQuestion => "15 dtk/soal",
            TimerMode::Overall => "3 menit total",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimerMode::None => TimerMode::PerQuestion,
            TimerMode::PerQuestion => TimerMode::Overall,
            TimerMode::Overall => TimerMode::None,
        }
    }

    fn budget(self) -> u32 {
        match self {
            TimerMode::None => 0,
            TimerMode::PerQuestion => PER_QUESTION_SECONDS,
            TimerMode::Overall => OVERALL_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Completed,
}

/// Side effects the presentation layer should act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Correct,
    Incorrect,
    /// Overall timer hit zero; call [`QuizSession::finish_grace`] after
    /// [`GRACE_DELAY`].
    GraceStarted,
    Completed { score: usize, total: usize },
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    tier: usize,
    questions: Vec<Question>,
    index: usize,
    score: usize,
    selected: Option<String>,
    revealed: bool,
    last_correct: Option<bool>,
    outcomes: Vec<Option<bool>>,
    phase: Phase,
    ending: bool,
    timer_mode: TimerMode,
    time_left: u32,
    timer_epoch: u64,
}

impl QuizSession {
    /// Starts a session of `tier` questions drawn from `animals`. The
    /// effective total is clamped to the dataset size; best scores are still
    /// filed under the requested tier.
    pub fn start<R: Rng + ?Sized>(
        animals: &[Animal],
        tier: usize,
        timer_mode: TimerMode,
        rng: &mut R,
    ) -> Self {
        let questions = build_questions(animals, tier, rng);
        let phase = if questions.is_empty() {
            Phase::Completed
        } else {
            Phase::InProgress
        };
        let outcomes = vec![None; questions.len()];
        let session = Self {
            id: Uuid::new_v4(),
            tier,
            questions,
            index: 0,
            score: 0,
            selected: None,
            revealed: false,
            last_correct: None,
            outcomes,
            phase,
            ending: false,
            timer_mode,
            time_left: timer_mode.budget(),
            timer_epoch: 1,
        };
        log::info!(
            "quiz {} started: {} questions (tier {}), timer {:?}",
            session.id,
            session.total(),
            tier,
            timer_mode
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tier(&self) -> usize {
        self.tier
    }

    /// Effective number of questions.
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn last_correct(&self) -> Option<bool> {
        self.last_correct
    }

    /// Per-question result: `Some(correct)` once revealed, `None` if the
    /// question was never reached or answered.
    pub fn outcomes(&self) -> &[Option<bool>] {
        &self.outcomes
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// True between overall-timer expiry and forced completion.
    pub fn is_ending(&self) -> bool {
        self.ending
    }

    pub fn timer_mode(&self) -> TimerMode {
        self.timer_mode
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Changes whenever the countdown is restarted. Ticks scheduled for an
    /// older epoch must be dropped.
    pub fn timer_epoch(&self) -> u64 {
        self.timer_epoch
    }

    /// Whether periodic ticks should currently be delivered.
    pub fn timer_running(&self) -> bool {
        self.phase == Phase::InProgress
            && self.timer_mode != TimerMode::None
            && self.time_left > 0
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 >= self.total()
    }

    /// Percentage through the quiz; 100 once completed.
    pub fn progress(&self) -> u16 {
        if self.is_completed() || self.total() == 0 {
            return 100;
        }
        (100.0 * self.index as f64 / self.total() as f64).round() as u16
    }

    /// Records a tentative choice. Ignored once revealed or for strings that
    /// are not choices of the current question.
    pub fn select_choice(&mut self, choice: &str) {
        if !self.accepts_input() {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        if question.choices.iter().any(|c| c == choice) {
            self.selected = Some(choice.to_string());
        }
    }

    pub fn select_index(&mut self, index: usize) {
        let choice = self
            .current_question()
            .and_then(|q| q.choices.get(index))
            .cloned();
        if let Some(choice) = choice {
            self.select_choice(&choice);
        }
    }

    /// Grades the selected choice and reveals the answer.
    pub fn submit(&mut self) -> Option<Signal> {
        if !self.accepts_input() {
            return None;
        }
        let selected = self.selected.as_deref()?;
        let correct = self.current_question()?.is_correct(selected);

        self.reveal(correct);
        if correct {
            self.score += 1;
            Some(Signal::Correct)
        } else {
            Some(Signal::Incorrect)
        }
    }

    /// Moves past a revealed question, completing the session (and filing
    /// the score) after the last one.
    pub fn advance<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Option<Signal> {
        if self.phase != Phase::InProgress || !self.revealed {
            return None;
        }

        if self.is_last_question() {
            return Some(self.complete(store));
        }

        self.index += 1;
        self.selected = None;
        self.revealed = false;
        self.last_correct = None;
        if self.timer_mode == TimerMode::PerQuestion {
            self.time_left = PER_QUESTION_SECONDS;
            self.timer_epoch += 1;
        }
        None
    }

    /// One second elapsed.
    pub fn tick(&mut self) -> Option<Signal> {
        if !self.timer_running() {
            return None;
        }
        self.time_left -= 1;
        if self.time_left > 0 {
            return None;
        }

        match self.timer_mode {
            TimerMode::PerQuestion if !self.revealed => {
                log::debug!("quiz {} question {} timed out", self.id, self.index);
                self.reveal(false);
                Some(Signal::Incorrect)
            }
            TimerMode::Overall if !self.ending => {
                log::debug!("quiz {} overall timer expired", self.id);
                self.ending = true;
                Some(Signal::GraceStarted)
            }
            _ => None,
        }
    }

    /// Completes a session whose overall timer expired, whatever the state
    /// of the current question.
    pub fn finish_grace<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Option<Signal> {
        if !self.ending || self.phase != Phase::InProgress {
            return None;
        }
        Some(self.complete(store))
    }

    fn reveal(&mut self, correct: bool) {
        self.revealed = true;
        self.last_correct = Some(correct);
        self.outcomes[self.index] = Some(correct);
    }

    fn accepts_input(&self) -> bool {
        self.phase == Phase::InProgress && !self.revealed
    }

    fn complete<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Signal {
        self.phase = Phase::Completed;
        self.ending = false;
        save_best_if_higher(store, self.tier, self.score);
        log::info!(
            "quiz {} completed: {}/{}",
            self.id,
            self.score,
            self.total()
        );
        Signal::Completed {
            score: self.score,
            total: self.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::data::builtin_animals;
    use crate::storage::MemoryStore;
    use crate::storage::best_score::{load_best_for, load_global_best};

    fn start(tier: usize, mode: TimerMode) -> QuizSession {
        let animals = builtin_animals().unwrap();
        QuizSession::start(&animals, tier, mode, &mut StdRng::seed_from_u64(2024))
    }

    fn answer_current(session: &mut QuizSession, correctly: bool) -> Option<Signal> {
        let question = session.current_question().unwrap().clone();
        let choice = if correctly {
            question.answer.clone()
        } else {
            question
                .choices
                .iter()
                .find(|c| **c != question.answer)
                .unwrap()
                .clone()
        };
        session.select_choice(&choice);
        session.submit()
    }

    #[test]
    fn test_start_resets_state() {
        let session = start(5, TimerMode::None);
        assert_eq!(session.total(), 5);
        assert_eq!(session.index(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.selected(), None);
        assert!(!session.timer_running());
        assert_eq!(session.progress(), 0);
    }

    #[test]
    fn test_all_correct_completes_and_persists_best() {
        let mut store = MemoryStore::new();
        let mut session = start(5, TimerMode::None);

        for i in 0..5 {
            assert_eq!(answer_current(&mut session, true), Some(Signal::Correct));
            let signal = session.advance(&mut store);
            if i < 4 {
                assert_eq!(signal, None);
                assert_eq!(session.index(), i + 1);
            } else {
                assert_eq!(signal, Some(Signal::Completed { score: 5, total: 5 }));
            }
        }

        assert_eq!(session.score(), 5);
        assert!(session.is_completed());
        assert_eq!(session.progress(), 100);
        assert_eq!(load_best_for(&store, 5), 5);
        assert_eq!(load_global_best(&store), 5);
    }

    #[test]
    fn test_wrong_answer_keeps_score() {
        let mut session = start(5, TimerMode::None);
        assert_eq!(answer_current(&mut session, false), Some(Signal::Incorrect));
        assert_eq!(session.score(), 0);
        assert!(session.is_revealed());
        assert_eq!(session.last_correct(), Some(false));
        assert_eq!(session.outcomes()[0], Some(false));
        assert_eq!(session.outcomes()[1], None);
    }

    #[test]
    fn test_invalid_operations_are_ignored() {
        let mut store = MemoryStore::new();
        let mut session = start(5, TimerMode::None);

        assert_eq!(session.submit(), None);
        assert_eq!(session.advance(&mut store), None);
        assert_eq!(session.index(), 0);

        session.select_choice("not a choice");
        assert_eq!(session.selected(), None);

        answer_current(&mut session, true);
        assert_eq!(session.submit(), None);
        assert_eq!(session.score(), 1);

        let before = session.selected().map(String::from);
        session.select_index(0);
        assert_eq!(session.selected().map(String::from), before);
    }

    #[test]
    fn test_selection_can_change_before_submit() {
        let mut session = start(5, TimerMode::None);
        let question = session.current_question().unwrap().clone();

        session.select_index(0);
        session.select_index(3);
        assert_eq!(session.selected(), Some(question.choices[3].as_str()));

        session.select_choice(&question.answer);
        assert_eq!(session.submit(), Some(Signal::Correct));
    }

    #[test]
    fn test_progress_uses_effective_total() {
        let mut store = MemoryStore::new();
        let mut session = start(40, TimerMode::None);
        assert_eq!(session.total(), 12);

        for _ in 0..3 {
            answer_current(&mut session, true);
            session.advance(&mut store);
        }
        assert_eq!(session.progress(), 25);

        while !session.is_completed() {
            answer_current(&mut session, true);
            session.advance(&mut store);
        }
        assert_eq!(session.score(), 12);
        assert_eq!(load_best_for(&store, 40), 12);
    }

    #[test]
    fn test_score_is_monotonic_and_bounded() {
        let mut store = MemoryStore::new();
        let mut session = start(8, TimerMode::None);
        let mut last = 0;
        let mut correct = true;
        while !session.is_completed() {
            answer_current(&mut session, correct);
            correct = !correct;
            assert!(session.score() >= last);
            assert!(session.score() <= session.total());
            last = session.score();
            session.advance(&mut store);
        }
        assert_eq!(session.score(), 4);
    }

    #[test]
    fn test_per_question_timeout_reveals_incorrect() {
        let mut session = start(5, TimerMode::PerQuestion);
        assert_eq!(session.time_left(), PER_QUESTION_SECONDS);
        assert!(session.timer_running());

        for _ in 0..PER_QUESTION_SECONDS - 1 {
            assert_eq!(session.tick(), None);
        }
        assert!(!session.is_revealed());
        assert_eq!(session.tick(), Some(Signal::Incorrect));

        assert!(session.is_revealed());
        assert_eq!(session.last_correct(), Some(false));
        assert_eq!(session.score(), 0);
        assert!(!session.timer_running());
        assert_eq!(session.tick(), None);
    }

    #[test]
    fn test_per_question_budget_resets_on_advance() {
        let mut store = MemoryStore::new();
        let mut session = start(5, TimerMode::PerQuestion);
        let epoch = session.timer_epoch();

        for _ in 0..5 {
            session.tick();
        }
        answer_current(&mut session, true);
        session.advance(&mut store);

        assert_eq!(session.time_left(), PER_QUESTION_SECONDS);
        assert!(session.timer_epoch() > epoch);
    }

    #[test]
    fn test_per_question_timer_reaching_zero_after_reveal_is_quiet() {
        let mut session = start(5, TimerMode::PerQuestion);
        answer_current(&mut session, true);
        for _ in 0..PER_QUESTION_SECONDS {
            assert_eq!(session.tick(), None);
        }
        assert_eq!(session.score(), 1);
        assert_eq!(session.last_correct(), Some(true));
    }

    #[test]
    fn test_overall_timer_expiry_completes_after_grace() {
        let mut store = MemoryStore::new();
        let mut session = start(12, TimerMode::Overall);
        assert_eq!(session.time_left(), OVERALL_SECONDS);
        let epoch = session.timer_epoch();

        answer_current(&mut session, true);
        session.advance(&mut store);
        answer_current(&mut session, true);
        session.advance(&mut store);
        assert_eq!(session.time_left(), OVERALL_SECONDS);
        assert_eq!(session.timer_epoch(), epoch);

        // Mid-question, nothing selected.
        for _ in 0..OVERALL_SECONDS - 1 {
            assert_eq!(session.tick(), None);
        }
        assert_eq!(session.tick(), Some(Signal::GraceStarted));
        assert!(session.is_ending());
        assert!(!session.is_completed());
        assert_eq!(session.tick(), None);

        assert_eq!(
            session.finish_grace(&mut store),
            Some(Signal::Completed { score: 2, total: 12 })
        );
        assert!(session.is_completed());
        assert!(!session.is_ending());
        assert_eq!(load_best_for(&store, 12), 2);
        assert_eq!(session.finish_grace(&mut store), None);
    }

    #[test]
    fn test_finish_grace_without_expiry_is_ignored() {
        let mut store = MemoryStore::new();
        let mut session = start(5, TimerMode::Overall);
        assert_eq!(session.finish_grace(&mut store), None);
        assert!(!session.is_completed());
    }

    #[test]
    fn test_no_timer_never_ticks() {
        let mut session = start(5, TimerMode::None);
        assert_eq!(session.tick(), None);
        assert_eq!(session.time_left(), 0);
    }

    #[test]
    fn test_empty_dataset_is_completed_immediately() {
        let session = QuizSession::start(&[], 5, TimerMode::Overall, &mut StdRng::seed_from_u64(0));
        assert!(session.is_completed());
        assert_eq!(session.total(), 0);
        assert_eq!(session.progress(), 100);
        assert!(!session.timer_running());
    }

    #[test]
    fn test_timer_mode_cycle() {
        assert_eq!(TimerMode::None.next(), TimerMode::PerQuestion);
        assert_eq!(TimerMode::PerQuestion.next(), TimerMode::Overall);
        assert_eq!(TimerMode::Overall.next(), TimerMode::None);
    }
}
