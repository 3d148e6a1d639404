//! The quiz subsystem: question generation, the session state machine and
//! its timers.

mod generator;
mod session;
mod timer;

pub use generator::{build_questions, shuffled};
pub use session::{
    Phase, QuizSession, Signal, TimerMode, DEFAULT_TIER, GRACE_DELAY, OVERALL_SECONDS,
    PER_QUESTION_SECONDS, TIERS,
};
pub use timer::{QuizTimer, TimerEvent};
