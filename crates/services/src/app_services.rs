use std::sync::Arc;

use crate::generator::{GeminiConfig, GeminiGenerator, QuestionGenerator};
use crate::quiz_service::{QuizService, QuizSettings};

/// Assembles app-facing services.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizService>,
    generation_enabled: bool,
}

impl AppServices {
    /// Build services backed by the Gemini API.
    ///
    /// A missing config still produces usable services; every generation then
    /// fails and the UI shows the error screen.
    #[must_use]
    pub fn gemini(config: Option<GeminiConfig>, settings: QuizSettings) -> Self {
        let generation_enabled = config.is_some();
        let generator = GeminiGenerator::new(config);
        Self::with_generator(Arc::new(generator), settings, generation_enabled)
    }

    /// Build services around any generator, e.g. a fake in tests.
    #[must_use]
    pub fn with_generator(
        generator: Arc<dyn QuestionGenerator>,
        settings: QuizSettings,
        generation_enabled: bool,
    ) -> Self {
        let quiz = Arc::new(QuizService::new(generator).with_settings(settings));
        Self {
            quiz,
            generation_enabled,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn generation_enabled(&self) -> bool {
        self.generation_enabled
    }
}
