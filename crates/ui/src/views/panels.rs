use dioxus::prelude::*;

use crate::vm::{QuestionVm, ResultsVm};

#[component]
pub fn LoadingPanel() -> Element {
    rsx! {
        div { class: "quiz-center",
            div { class: "quiz-spinner", aria_hidden: "true" }
            p { class: "quiz-muted", "Generating your AI News quiz..." }
        }
    }
}

#[component]
pub fn ErrorPanel(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "quiz-center quiz-error", role: "alert",
            span { class: "quiz-icon quiz-icon--error", aria_hidden: "true", "✕" }
            p { class: "quiz-error__message", "{message}" }
            button {
                class: "btn btn-primary",
                id: "quiz-retry",
                r#type: "button",
                onclick: move |_| on_retry.call(()),
                "Try Again"
            }
        }
    }
}

#[component]
pub fn QuestionPanel(question: QuestionVm, on_select: EventHandler<usize>) -> Element {
    let QuestionVm {
        progress_label,
        percent,
        text,
        options,
    } = question;

    rsx! {
        div { class: "quiz-question",
            header { class: "quiz-header",
                span { class: "quiz-icon quiz-icon--brand", aria_hidden: "true", "✦" }
                h1 { class: "quiz-title", "Latest AI News Quiz" }
                p { class: "quiz-subtitle", "Test your knowledge of recent AI developments" }
                p { class: "quiz-progress-label", "{progress_label}" }
            }
            div { class: "quiz-card",
                p { class: "quiz-question__text", "{text}" }
                div { class: "quiz-options",
                    for option in options {
                        button {
                            key: "{option.index}",
                            class: option.css_class(),
                            r#type: "button",
                            onclick: move |_| on_select.call(option.index),
                            "{option.label}"
                        }
                    }
                }
                div { class: "quiz-progress",
                    div { class: "quiz-progress__bar", style: "width: {percent}%" }
                }
            }
        }
    }
}

#[component]
pub fn ResultsPanel(results: ResultsVm, on_new_quiz: EventHandler<()>) -> Element {
    let ResultsVm {
        score_label,
        reviews,
    } = results;

    rsx! {
        div { class: "quiz-card quiz-results",
            div { class: "quiz-results__header",
                span { class: "quiz-icon quiz-icon--success", aria_hidden: "true", "✓" }
                h2 { class: "quiz-title", "Quiz Complete!" }
                p { class: "quiz-score", "{score_label}" }
            }
            ul { class: "quiz-review",
                for (index, item) in reviews.into_iter().enumerate() {
                    li { key: "{index}", class: "quiz-review__item",
                        p { class: "quiz-review__question", "{item.question}" }
                        p { class: "quiz-muted", "Your answer: {item.your_answer}" }
                        p { class: item.verdict_class(), "Correct answer: {item.correct_answer}" }
                    }
                }
            }
            button {
                class: "btn btn-primary btn-block",
                id: "quiz-new",
                r#type: "button",
                onclick: move |_| on_new_quiz.call(()),
                "Take Another Quiz"
            }
        }
    }
}
