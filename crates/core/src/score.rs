//! Scoring and answer review for a finished session.

use crate::model::QuizSession;

/// One line of the results review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    pub question: String,
    pub chosen: Option<String>,
    pub correct: String,
    pub is_correct: bool,
}

/// Count of questions whose recorded answer matches the correct option.
///
/// Unanswered questions count as misses.
#[must_use]
pub fn score(session: &QuizSession) -> usize {
    session
        .questions()
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            session
                .selected_for(*index)
                .is_some_and(|chosen| question.is_correct(chosen))
        })
        .count()
}

/// Per-question comparison of the recorded answer with the correct one.
#[must_use]
pub fn review(session: &QuizSession) -> Vec<AnswerReview> {
    session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let chosen = session.selected_for(index);
            AnswerReview {
                question: question.text().to_string(),
                chosen: chosen.and_then(|i| question.option(i)).map(str::to_string),
                correct: question.correct_option_text().to_string(),
                is_correct: chosen.is_some_and(|i| question.is_correct(i)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOutcome, BATCH_SIZE, Question, QuestionBatch};

    fn session() -> QuizSession {
        let questions = (0..BATCH_SIZE)
            .map(|i| {
                let options = ["w", "x", "y", "z"].map(String::from);
                Question::new(format!("Q{i}"), options, i % 4).unwrap()
            })
            .collect();
        QuizSession::new(QuestionBatch::new(questions).unwrap())
    }

    fn answer_all(session: &mut QuizSession, choices: [usize; BATCH_SIZE]) {
        for choice in choices {
            if session.record_answer(choice).unwrap() == AnswerOutcome::Continue {
                session.advance();
            }
        }
    }

    #[test]
    fn all_correct_scores_full_marks() {
        let mut session = session();
        answer_all(&mut session, [0, 1, 2, 3, 0]);
        assert!(session.is_complete());
        assert_eq!(score(&session), BATCH_SIZE);
    }

    #[test]
    fn score_counts_exact_matches_only() {
        let mut session = session();
        answer_all(&mut session, [0, 0, 2, 0, 1]);
        assert_eq!(score(&session), 2);
    }

    #[test]
    fn score_is_idempotent() {
        let mut session = session();
        answer_all(&mut session, [3, 1, 0, 3, 0]);
        assert_eq!(score(&session), score(&session));
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn unanswered_questions_count_as_misses() {
        let mut session = session();
        session.record_answer(0).unwrap();
        assert_eq!(score(&session), 1);

        let reviews = review(&session);
        assert_eq!(reviews[1].chosen, None);
        assert!(!reviews[1].is_correct);
    }

    #[test]
    fn review_lists_chosen_and_correct_text() {
        let mut session = session();
        answer_all(&mut session, [0, 2, 2, 3, 0]);
        let reviews = review(&session);

        assert_eq!(reviews.len(), BATCH_SIZE);
        assert_eq!(reviews[1].question, "Q1");
        assert_eq!(reviews[1].chosen.as_deref(), Some("y"));
        assert_eq!(reviews[1].correct, "x");
        assert!(!reviews[1].is_correct);
        assert!(reviews[0].is_correct);
    }
}
