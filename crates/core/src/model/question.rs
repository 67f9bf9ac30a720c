use serde::Serialize;

use crate::validate::BatchError;

/// Number of questions produced by one generation cycle.
pub const BATCH_SIZE: usize = 5;

/// Number of answer options on every question.
pub const OPTION_COUNT: usize = 4;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// Only the response validator builds these, so `correct_option` is always a
/// valid index into `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    #[serde(rename = "question")]
    text: String,
    options: [String; OPTION_COUNT],
    #[serde(rename = "correctAnswer")]
    correct_option: usize,
}

impl Question {
    /// Returns `None` if `correct_option` is not a valid option index.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_option: usize,
    ) -> Option<Self> {
        (correct_option < OPTION_COUNT).then(|| Self {
            text: text.into(),
            options,
            correct_option,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    #[must_use]
    pub fn correct_option_text(&self) -> &str {
        &self.options[self.correct_option]
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

//
// ─── BATCH ─────────────────────────────────────────────────────────────────────
//

/// Exactly `BATCH_SIZE` validated questions, in the order they were generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBatch {
    questions: Vec<Question>,
}

impl QuestionBatch {
    /// # Errors
    ///
    /// Returns `BatchError::Format` unless exactly `BATCH_SIZE` questions are given.
    pub fn new(questions: Vec<Question>) -> Result<Self, BatchError> {
        if questions.len() != BATCH_SIZE {
            return Err(BatchError::Format {
                found: Some(questions.len()),
            });
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionBatch {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
