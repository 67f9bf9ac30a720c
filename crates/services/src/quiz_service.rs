use std::env;
use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{CycleId, QuestionBatch};
use quiz_core::prompt::news_quiz_prompt;
use quiz_core::{BatchError, parse_batch};

use crate::error::QuizServiceError;
use crate::generator::QuestionGenerator;

const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(500);

/// Tunables for the quiz flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    /// How long a chosen option stays highlighted before the next question.
    pub advance_delay: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            advance_delay: DEFAULT_ADVANCE_DELAY,
        }
    }
}

impl QuizSettings {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let advance_delay = lookup("QUIZ_ADVANCE_DELAY_MS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map_or(DEFAULT_ADVANCE_DELAY, Duration::from_millis);
        Self { advance_delay }
    }
}

/// Runs one generation cycle: prompt, fetch, validate.
#[derive(Clone)]
pub struct QuizService {
    generator: Arc<dyn QuestionGenerator>,
    settings: QuizSettings,
}

impl QuizService {
    #[must_use]
    pub fn new(generator: Arc<dyn QuestionGenerator>) -> Self {
        Self {
            generator,
            settings: QuizSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.settings.advance_delay
    }

    /// Request a fresh batch for `cycle` and validate it.
    ///
    /// No retries: the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Generation` when the generator fails.
    /// Returns `QuizServiceError::Batch` when the response does not validate.
    pub async fn generate_batch(&self, cycle: CycleId) -> Result<QuestionBatch, QuizServiceError> {
        tracing::info!(%cycle, "requesting quiz questions");

        let raw = self
            .generator
            .generate(news_quiz_prompt())
            .await
            .inspect_err(|err| tracing::warn!(%cycle, error = %err, "question generation failed"))?;
        tracing::debug!(%cycle, bytes = raw.len(), "received generation response");

        let batch = parse_batch(&raw).inspect_err(|err| log_batch_error(cycle, err))?;
        tracing::info!(%cycle, questions = batch.len(), "quiz questions validated");
        Ok(batch)
    }

    /// Sleep for the configured feedback delay.
    pub async fn wait_for_advance(&self) {
        tokio::time::sleep(self.settings.advance_delay).await;
    }
}

fn log_batch_error(cycle: CycleId, err: &BatchError) {
    match err {
        BatchError::Parse { reason } => {
            tracing::warn!(%cycle, %reason, "generation response is not JSON");
        }
        BatchError::Format { found } => {
            tracing::warn!(%cycle, ?found, "generation response has wrong shape");
        }
        BatchError::QuestionFormat { index, defect } => {
            tracing::warn!(%cycle, index, %defect, "generated question rejected");
        }
        other => tracing::warn!(%cycle, error = %other, "generation response rejected"),
    }
}
