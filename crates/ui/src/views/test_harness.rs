use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{GenerationError, QuestionGenerator, QuizService, QuizSettings};

use super::quiz::QuizTestHandles;
use crate::context::AppContext;
use crate::views::QuizView;
use crate::vm::QuizIntent;

/// Generator that plays back canned replies in order, repeating the last one.
/// `None` stands for a failed request.
pub struct StubGenerator {
    replies: Mutex<VecDeque<Option<String>>>,
}

impl StubGenerator {
    fn new(replies: Vec<Option<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }
}

#[async_trait::async_trait]
impl QuestionGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        let mut replies = self.replies.lock().unwrap();
        let reply = if replies.len() > 1 {
            replies.pop_front().flatten()
        } else {
            replies.front().cloned().flatten()
        };
        reply.ok_or(GenerationError::EmptyResponse)
    }
}

pub fn batch_reply(count: usize) -> String {
    let items: Vec<String> = (1..=count)
        .map(|i| {
            format!(
                r#"{{"question":"Which lab shipped model {i}?","options":["OpenAI","Google","Anthropic","Meta"],"correctAnswer":{}}}"#,
                i % 4
            )
        })
        .collect();
    format!("```json\n[{}]\n```", items.join(","))
}

#[derive(Props, Clone)]
struct QuizHarnessProps {
    service: Arc<QuizService>,
    handles: QuizTestHandles,
}

impl PartialEq for QuizHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarness(props: QuizHarnessProps) -> Element {
    let service = Arc::clone(&props.service);
    use_context_provider(|| AppContext::from_service(service));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until spawned work (generation, zero-delay advances) has landed.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    /// Send `intent` to the mounted `QuizView` and flush the resulting render.
    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Mount `QuizView` against a generator that returns `reply`, or fails when `None`.
pub fn setup_quiz_harness(reply: Option<String>) -> ViewHarness {
    setup_quiz_harness_with_replies(vec![reply])
}

/// Like `setup_quiz_harness`, with one reply per generation cycle.
pub fn setup_quiz_harness_with_replies(replies: Vec<Option<String>>) -> ViewHarness {
    let settings = QuizSettings {
        advance_delay: Duration::ZERO,
    };
    let generator = Arc::new(StubGenerator::new(replies));
    let service = Arc::new(QuizService::new(generator).with_settings(settings));
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizHarness,
        QuizHarnessProps {
            service,
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, handles }
}
