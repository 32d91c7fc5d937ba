//! Question data loading
//!
//! The question list is supplied as a JSON array of `{text, answer, aliases?}`
//! records. It is validated once at load time so the engine can index it
//! without further checks.

use std::path::Path;

use crate::types::Question;

pub type QuestionResult<T> = Result<T, QuestionError>;

#[derive(Debug, thiserror::Error)]
pub enum QuestionError {
    #[error("Failed to read question file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse question file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Question list is empty")]
    Empty,

    #[error("Question {index} is invalid: {reason}")]
    Invalid { index: usize, reason: String },
}

/// Non-empty, validated, ordered list of questions
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> QuestionResult<Self> {
        if questions.is_empty() {
            return Err(QuestionError::Empty);
        }

        for (index, question) in questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                return Err(QuestionError::Invalid {
                    index,
                    reason: "text is empty".to_string(),
                });
            }
            if question.answer.trim().is_empty() {
                return Err(QuestionError::Invalid {
                    index,
                    reason: "answer is empty".to_string(),
                });
            }
            if question.aliases.iter().any(|alias| alias.trim().is_empty()) {
                return Err(QuestionError::Invalid {
                    index,
                    reason: "alias is empty".to_string(),
                });
            }
        }

        Ok(Self { questions })
    }

    /// Parse a JSON array of questions
    pub fn from_json(json: &str) -> QuestionResult<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    pub fn load(path: &Path) -> QuestionResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let set = Self::from_json(&raw)?;
        tracing::info!("Loaded {} questions from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Never true for a constructed set
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
