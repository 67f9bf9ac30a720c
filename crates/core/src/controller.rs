//! Quiz state machine.
//!
//! `Idle -> Loading -> Answering -> Complete`, with `Error` reachable from
//! `Loading`. Generation results are fenced by `CycleId` and delayed advances
//! by `AdvanceTicket`, so work started for an abandoned session can never
//! touch the current one.

use thiserror::Error;

use crate::model::{
    AdvanceTicket, AnswerOutcome, CycleId, Question, QuestionBatch, QuizProgress, QuizSession,
};

/// Errors emitted when a user event does not fit the current state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no question is awaiting an answer")]
    NotAnswering,
    #[error("option {option} does not exist")]
    OptionOutOfRange { option: usize },
    #[error("retry is only available after a failed generation")]
    NotRetryable,
    #[error("a new quiz can only be started once the current one is complete")]
    NotComplete,
}

/// What happened to a generation result handed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Applied,
    /// The result belongs to a cycle that is no longer current.
    Stale,
}

/// What selecting an option did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The caller should run `advance(ticket)` after the feedback delay.
    AdvanceScheduled(AdvanceTicket),
    /// The answer was overwritten while an advance is already pending.
    Recorded,
    /// The last question was answered.
    Completed,
}

/// Render-facing snapshot of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState<'a> {
    Idle,
    Loading,
    Error(&'a str),
    Answering {
        question: &'a Question,
        selected: Option<usize>,
        progress: QuizProgress,
    },
    Complete(&'a QuizSession),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading { cycle: CycleId },
    Error { message: String },
    Active { session: QuizSession },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizController {
    phase: Phase,
    last_cycle: CycleId,
    last_ticket: AdvanceTicket,
    pending_advance: Option<AdvanceTicket>,
}

impl Default for QuizController {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last_cycle: CycleId::new(0),
            last_ticket: AdvanceTicket::new(0),
            pending_advance: None,
        }
    }

    /// Discard any session and start a fresh generation cycle.
    ///
    /// The returned id must accompany the generation result.
    pub fn begin_cycle(&mut self) -> CycleId {
        self.pending_advance = None;
        self.last_cycle = self.last_cycle.next();
        self.phase = Phase::Loading {
            cycle: self.last_cycle,
        };
        self.last_cycle
    }

    /// Install a validated batch for `cycle`.
    pub fn load_batch(&mut self, cycle: CycleId, batch: QuestionBatch) -> CycleOutcome {
        if !self.is_loading(cycle) {
            return CycleOutcome::Stale;
        }
        self.phase = Phase::Active {
            session: QuizSession::new(batch),
        };
        CycleOutcome::Applied
    }

    /// Record a failed generation or validation for `cycle`.
    pub fn fail_cycle(&mut self, cycle: CycleId, message: impl Into<String>) -> CycleOutcome {
        if !self.is_loading(cycle) {
            return CycleOutcome::Stale;
        }
        self.phase = Phase::Error {
            message: message.into(),
        };
        CycleOutcome::Applied
    }

    /// Select `option` for the displayed question.
    ///
    /// Re-selecting before the pending advance fires overwrites the answer and
    /// leaves the pending advance untouched.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswering` unless a question is displayed.
    /// Returns `QuizError::OptionOutOfRange` for an invalid option index.
    pub fn select_option(&mut self, option: usize) -> Result<SelectOutcome, QuizError> {
        let Phase::Active { session } = &mut self.phase else {
            return Err(QuizError::NotAnswering);
        };

        match session.record_answer(option)? {
            AnswerOutcome::Completed => {
                self.pending_advance = None;
                Ok(SelectOutcome::Completed)
            }
            AnswerOutcome::Continue if self.pending_advance.is_some() => Ok(SelectOutcome::Recorded),
            AnswerOutcome::Continue => {
                self.last_ticket = self.last_ticket.next();
                self.pending_advance = Some(self.last_ticket);
                Ok(SelectOutcome::AdvanceScheduled(self.last_ticket))
            }
        }
    }

    /// Perform the delayed advance for `ticket`.
    ///
    /// Returns false, changing nothing, if `ticket` is not the pending one.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> bool {
        if self.pending_advance != Some(ticket) {
            return false;
        }
        self.pending_advance = None;
        match &mut self.phase {
            Phase::Active { session } => session.advance(),
            _ => false,
        }
    }

    /// Start over after a failed generation.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotRetryable` unless the controller is in the error state.
    pub fn retry(&mut self) -> Result<CycleId, QuizError> {
        if !matches!(self.phase, Phase::Error { .. }) {
            return Err(QuizError::NotRetryable);
        }
        Ok(self.begin_cycle())
    }

    /// Throw away a finished session and generate a new one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotComplete` unless the current session is complete.
    pub fn new_quiz(&mut self) -> Result<CycleId, QuizError> {
        if self.session().is_none_or(|session| !session.is_complete()) {
            return Err(QuizError::NotComplete);
        }
        Ok(self.begin_cycle())
    }

    #[must_use]
    pub fn state(&self) -> QuizState<'_> {
        match &self.phase {
            Phase::Idle => QuizState::Idle,
            Phase::Loading { .. } => QuizState::Loading,
            Phase::Error { message } => QuizState::Error(message),
            Phase::Active { session } if session.is_complete() => QuizState::Complete(session),
            Phase::Active { session } => match session.current_question() {
                Some(question) => QuizState::Answering {
                    question,
                    selected: session.current_selection(),
                    progress: session.progress(),
                },
                None => QuizState::Complete(session),
            },
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            Phase::Active { session } => Some(session),
            _ => None,
        }
    }

    /// The cycle currently loading, if any.
    #[must_use]
    pub fn loading_cycle(&self) -> Option<CycleId> {
        match self.phase {
            Phase::Loading { cycle } => Some(cycle),
            _ => None,
        }
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.pending_advance
    }

    /// Final score, once the session is complete.
    #[must_use]
    pub fn score(&self) -> Option<usize> {
        self.session()
            .filter(|session| session.is_complete())
            .map(QuizSession::score)
    }

    fn is_loading(&self, cycle: CycleId) -> bool {
        self.loading_cycle() == Some(cycle)
    }
}
