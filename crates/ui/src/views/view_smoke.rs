use dioxus::prelude::*;

use super::test_harness::{
    ViewHarness, batch_reply, setup_quiz_harness, setup_quiz_harness_with_replies,
};
use crate::views::{ErrorPanel, QuestionPanel, ResultsPanel};
use crate::vm::{OptionVm, QuestionVm, QuizIntent, ResultsVm, ReviewVm};

// Matches the answer key `batch_reply` writes: question n has correct option n % 4.
fn correct_option(question_index: usize) -> usize {
    (question_index + 1) % 4
}

async fn answer_all_correctly(harness: &mut ViewHarness) {
    for index in 0..5 {
        harness.dispatch(QuizIntent::Select(correct_option(index)));
        harness.settle().await;
    }
}

fn render_static(component: fn() -> Element) -> String {
    let mut dom = VirtualDom::new(component);
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_shows_loading_before_generation_finishes() {
    let mut harness = setup_quiz_harness(Some(batch_reply(5)));
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Generating your AI News quiz..."),
        "missing loading text in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_first_question_after_generation() {
    let mut harness = setup_quiz_harness(Some(batch_reply(5)));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Latest AI News Quiz"), "missing heading in {html}");
    assert!(html.contains("Question 1 of 5"), "missing progress in {html}");
    assert!(
        html.contains("Which lab shipped model 1?"),
        "missing question text in {html}"
    );
    assert!(html.contains("Anthropic"), "missing option in {html}");
    assert!(html.contains("width: 20%"), "missing progress bar in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_shows_generic_message_when_generation_fails() {
    let mut harness = setup_quiz_harness(None);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Failed to generate questions. Please try again later."),
        "missing failure message in {html}"
    );
    assert!(html.contains("Try Again"), "missing retry button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_shows_validator_message_for_short_batch() {
    let mut harness = setup_quiz_harness(Some(batch_reply(3)));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Invalid response format: Expected array of 5 questions"),
        "missing format message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn selecting_an_option_advances_to_next_question() {
    let mut harness = setup_quiz_harness(Some(batch_reply(5)));
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::Select(2));
    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "advanced before the delay in {html}");
    assert!(
        html.contains("quiz-option--selected"),
        "missing selected option in {html}"
    );

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 5"), "missing second question in {html}");
    assert!(
        html.contains("Which lab shipped model 2?"),
        "missing question text in {html}"
    );
    assert!(
        !html.contains("quiz-option--selected"),
        "selection leaked into the next question in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn answering_every_question_shows_results() {
    let mut harness = setup_quiz_harness(Some(batch_reply(5)));
    harness.rebuild();
    harness.settle().await;

    answer_all_correctly(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Quiz Complete!"), "missing results in {html}");
    assert!(html.contains("You scored 5 out of 5"), "missing score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn retry_after_failure_loads_a_quiz() {
    let mut harness = setup_quiz_harness_with_replies(vec![None, Some(batch_reply(5))]);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Try Again"), "missing retry button in {html}");

    harness.dispatch(QuizIntent::Retry);
    let html = harness.render();
    assert!(
        html.contains("Generating your AI News quiz..."),
        "missing loading text in {html}"
    );

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "missing question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn new_quiz_returns_to_loading_then_questions() {
    let mut harness = setup_quiz_harness(Some(batch_reply(5)));
    harness.rebuild();
    harness.settle().await;
    answer_all_correctly(&mut harness).await;

    harness.dispatch(QuizIntent::NewQuiz);
    let html = harness.render();
    assert!(
        html.contains("Generating your AI News quiz..."),
        "missing loading text in {html}"
    );
    assert!(!html.contains("Quiz Complete!"), "stale results in {html}");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "missing fresh quiz in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn intents_that_do_not_fit_are_ignored() {
    let mut harness = setup_quiz_harness(Some(batch_reply(5)));
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::NewQuiz);
    harness.dispatch(QuizIntent::Retry);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "quiz was reset in {html}");
}

fn question_fixture() -> Element {
    let question = QuestionVm {
        progress_label: "Question 3 of 5".to_string(),
        percent: 60,
        text: "Which company released Gemini?".to_string(),
        options: ["OpenAI", "Google", "Anthropic", "Meta"]
            .iter()
            .enumerate()
            .map(|(index, label)| OptionVm {
                index,
                label: (*label).to_string(),
                selected: index == 1,
            })
            .collect(),
    };
    rsx! { QuestionPanel { question, on_select: |_| {} } }
}

#[test]
fn question_panel_highlights_selected_option() {
    let html = render_static(question_fixture);
    assert!(html.contains("Question 3 of 5"), "missing progress in {html}");
    assert!(html.contains("width: 60%"), "missing bar width in {html}");
    assert!(
        html.contains("quiz-option quiz-option--selected"),
        "missing selected class in {html}"
    );
    assert_eq!(html.matches("quiz-option--selected").count(), 1);
}

fn results_fixture() -> Element {
    let results = ResultsVm {
        score_label: "You scored 1 out of 2".to_string(),
        reviews: vec![
            ReviewVm {
                question: "Who makes Claude?".to_string(),
                your_answer: "Anthropic".to_string(),
                correct_answer: "Anthropic".to_string(),
                is_correct: true,
            },
            ReviewVm {
                question: "Who makes Llama?".to_string(),
                your_answer: "No answer".to_string(),
                correct_answer: "Meta".to_string(),
                is_correct: false,
            },
        ],
    };
    rsx! { ResultsPanel { results, on_new_quiz: |_| {} } }
}

#[test]
fn results_panel_lists_score_and_answers() {
    let html = render_static(results_fixture);
    assert!(html.contains("Quiz Complete!"), "missing title in {html}");
    assert!(html.contains("You scored 1 out of 2"), "missing score in {html}");
    assert!(html.contains("Your answer: No answer"), "missing review in {html}");
    assert!(html.contains("Correct answer: Meta"), "missing review in {html}");
    assert!(
        html.contains("quiz-review__verdict--wrong"),
        "missing wrong verdict in {html}"
    );
    assert!(html.contains("Take Another Quiz"), "missing button in {html}");
}

fn error_fixture() -> Element {
    rsx! {
        ErrorPanel {
            message: "Invalid question format".to_string(),
            on_retry: |_| {},
        }
    }
}

#[test]
fn error_panel_shows_message_and_retry() {
    let html = render_static(error_fixture);
    assert!(html.contains("Invalid question format"), "missing message in {html}");
    assert!(html.contains("Try Again"), "missing button in {html}");
}
