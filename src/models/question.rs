use serde::Serialize;

/// What a generated question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionKind {
    Status,
    Habitat,
}

/// One multiple-choice quiz question, immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub kind: QuestionKind,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer: String,
    pub animal_id: String,
}

impl Question {
    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }
}
