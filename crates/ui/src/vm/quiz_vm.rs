use quiz_core::model::{AdvanceTicket, CycleId, Question, QuizProgress, QuizSession};
use quiz_core::score::{AnswerReview, review};
use quiz_core::{QuizController, QuizState, SelectOutcome};

/// User (or lifecycle) events fed into the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Select(usize),
    Retry,
    NewQuiz,
}

/// Follow-up work the view must schedule after an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizEffect {
    None,
    Generate(CycleId),
    ScheduleAdvance(AdvanceTicket),
}

/// Apply `intent` and report what async work it requires.
///
/// # Errors
///
/// Returns `quiz_core::Error::Quiz` when the intent does not fit the current state.
pub fn apply_intent(
    controller: &mut QuizController,
    intent: QuizIntent,
) -> Result<QuizEffect, quiz_core::Error> {
    let effect = match intent {
        QuizIntent::Start => QuizEffect::Generate(controller.begin_cycle()),
        QuizIntent::Select(option) => match controller.select_option(option)? {
            SelectOutcome::AdvanceScheduled(ticket) => QuizEffect::ScheduleAdvance(ticket),
            SelectOutcome::Recorded | SelectOutcome::Completed => QuizEffect::None,
        },
        QuizIntent::Retry => QuizEffect::Generate(controller.retry()?),
        QuizIntent::NewQuiz => QuizEffect::Generate(controller.new_quiz()?),
    };
    Ok(effect)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

impl OptionVm {
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        if self.selected {
            "quiz-option quiz-option--selected"
        } else {
            "quiz-option"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub progress_label: String,
    pub percent: usize,
    pub text: String,
    pub options: Vec<OptionVm>,
}

impl QuestionVm {
    #[must_use]
    pub fn new(question: &Question, selected: Option<usize>, progress: QuizProgress) -> Self {
        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, label)| OptionVm {
                index,
                label: label.clone(),
                selected: selected == Some(index),
            })
            .collect();
        Self {
            progress_label: format!("Question {} of {}", progress.position, progress.total),
            percent: progress.percent(),
            text: question.text().to_string(),
            options,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl ReviewVm {
    #[must_use]
    pub fn verdict_class(&self) -> &'static str {
        if self.is_correct {
            "quiz-review__verdict quiz-review__verdict--correct"
        } else {
            "quiz-review__verdict quiz-review__verdict--wrong"
        }
    }
}

impl From<AnswerReview> for ReviewVm {
    fn from(review: AnswerReview) -> Self {
        Self {
            question: review.question,
            your_answer: review.chosen.unwrap_or_else(|| "No answer".to_string()),
            correct_answer: review.correct,
            is_correct: review.is_correct,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub reviews: Vec<ReviewVm>,
}

impl ResultsVm {
    #[must_use]
    pub fn new(session: &QuizSession) -> Self {
        Self {
            score_label: format!(
                "You scored {} out of {}",
                session.score(),
                session.questions().len()
            ),
            reviews: review(session).into_iter().map(ReviewVm::from).collect(),
        }
    }
}

/// Everything the quiz page needs to render one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Loading,
    Error { message: String },
    Question(QuestionVm),
    Results(ResultsVm),
}

impl QuizScreen {
    /// `Idle` renders as loading: the first cycle starts as soon as the view mounts.
    #[must_use]
    pub fn from_state(state: QuizState<'_>) -> Self {
        match state {
            QuizState::Idle | QuizState::Loading => Self::Loading,
            QuizState::Error(message) => Self::Error {
                message: message.to_string(),
            },
            QuizState::Answering {
                question,
                selected,
                progress,
            } => Self::Question(QuestionVm::new(question, selected, progress)),
            QuizState::Complete(session) => Self::Results(ResultsVm::new(session)),
        }
    }
}
