use dioxus::core::Task;
use dioxus::prelude::*;

use quiz_core::{CycleOutcome, QuizController, QuizState};

use crate::context::AppContext;
use crate::views::{ErrorPanel, LoadingPanel, QuestionPanel, ResultsPanel};
use crate::vm::{QuizEffect, QuizIntent, QuizScreen, apply_intent};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz_service();

    let controller = use_signal(QuizController::new);
    let advance_task = use_signal(|| None::<Task>);

    let dispatch = {
        let quiz = quiz.clone();
        use_callback(move |intent: QuizIntent| {
            let mut controller = controller;
            let mut advance_task = advance_task;

            let result = apply_intent(&mut controller.write(), intent);
            let effect = match result {
                Ok(effect) => effect,
                Err(err) => {
                    tracing::debug!(?intent, error = %err, "quiz intent ignored");
                    return;
                }
            };

            match effect {
                QuizEffect::None => {}
                QuizEffect::Generate(cycle) => {
                    if let Some(task) = advance_task.write().take() {
                        task.cancel();
                    }
                    let quiz = quiz.clone();
                    spawn(async move {
                        let outcome = match quiz.generate_batch(cycle).await {
                            Ok(batch) => controller.write().load_batch(cycle, batch),
                            Err(err) => controller.write().fail_cycle(cycle, err.user_message()),
                        };
                        if outcome == CycleOutcome::Stale {
                            tracing::debug!(%cycle, "discarded result of superseded cycle");
                        }
                    });
                }
                QuizEffect::ScheduleAdvance(ticket) => {
                    let quiz = quiz.clone();
                    let task = spawn(async move {
                        quiz.wait_for_advance().await;
                        if !controller.write().advance(ticket) {
                            tracing::debug!(%ticket, "advance ticket no longer current");
                        }
                        advance_task.set(None);
                    });
                    advance_task.set(Some(task));
                }
            }
        })
    };

    #[cfg(test)]
    {
        use_hook(move || {
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch);
            }
        });
    }

    use_effect(move || {
        if matches!(controller.peek().state(), QuizState::Idle) {
            dispatch.call(QuizIntent::Start);
        }
    });

    let screen = QuizScreen::from_state(controller.read().state());
    let body = match screen {
        QuizScreen::Loading => rsx! { LoadingPanel {} },
        QuizScreen::Error { message } => rsx! {
            ErrorPanel {
                message,
                on_retry: move |()| dispatch.call(QuizIntent::Retry),
            }
        },
        QuizScreen::Question(question) => rsx! {
            QuestionPanel {
                question,
                on_select: move |index| dispatch.call(QuizIntent::Select(index)),
            }
        },
        QuizScreen::Results(results) => rsx! {
            ResultsPanel {
                results,
                on_new_quiz: move |()| dispatch.call(QuizIntent::NewQuiz),
            }
        },
    };

    rsx! {
        main { class: "quiz-page",
            div { class: "quiz-shell", {body} }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}
