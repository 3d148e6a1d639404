mod animal;
mod question;

pub use animal::{Animal, ConservationStatus};
pub use question::{Question, QuestionKind};

/// Which screen the application is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Browsable, filterable list of animals.
    Catalog,
    /// Detail page for one animal id (which may not exist).
    Detail(String),
    /// Tier and timer selection before a quiz starts.
    QuizSetup,
    /// A quiz session is running or finished.
    Quiz,
}
