use std::collections::BTreeMap;

use crate::controller::QuizError;
use crate::model::question::{OPTION_COUNT, Question, QuestionBatch};

/// What recording an answer did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// More questions follow the current one.
    Continue,
    /// The last question was answered; the session is complete.
    Completed,
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the displayed question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
}

impl QuizProgress {
    /// Share of the quiz reached so far, as a whole percentage.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.position.min(self.total) * 100 / self.total
    }
}

/// A user's progress through one batch.
///
/// Answers only ever accumulate; a new quiz replaces the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    batch: QuestionBatch,
    selected: BTreeMap<usize, usize>,
    current: usize,
    complete: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(batch: QuestionBatch) -> Self {
        Self {
            batch,
            selected: BTreeMap::new(),
            current: 0,
            complete: false,
        }
    }

    #[must_use]
    pub fn batch(&self) -> &QuestionBatch {
        &self.batch
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        self.batch.as_slice()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.batch.get(self.current)
    }

    /// Returns true if the displayed question is the final one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.batch.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The option recorded for `index`, if that question has been answered.
    #[must_use]
    pub fn selected_for(&self, index: usize) -> Option<usize> {
        self.selected.get(&index).copied()
    }

    #[must_use]
    pub fn current_selection(&self) -> Option<usize> {
        self.selected_for(self.current)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: self.current + 1,
            total: self.batch.len(),
            answered: self.answered_count(),
        }
    }

    /// Record `option` for the displayed question, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswering` once the session is complete.
    /// Returns `QuizError::OptionOutOfRange` if `option` is not a valid option index.
    pub fn record_answer(&mut self, option: usize) -> Result<AnswerOutcome, QuizError> {
        if self.complete {
            return Err(QuizError::NotAnswering);
        }
        if option >= OPTION_COUNT {
            return Err(QuizError::OptionOutOfRange { option });
        }

        self.selected.insert(self.current, option);

        if self.is_last() {
            self.complete = true;
            return Ok(AnswerOutcome::Completed);
        }
        Ok(AnswerOutcome::Continue)
    }

    /// Move to the next question. Returns false if there is nowhere to go.
    pub fn advance(&mut self) -> bool {
        if self.complete || self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Number of questions answered correctly.
    #[must_use]
    pub fn score(&self) -> usize {
        crate::score::score(self)
    }
}
