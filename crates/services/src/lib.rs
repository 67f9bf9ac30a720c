#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod generator;
pub mod quiz_service;

pub use app_services::AppServices;
pub use error::{GENERATION_FAILED_MESSAGE, GenerationError, QuizServiceError};
pub use generator::{GeminiConfig, GeminiGenerator, QuestionGenerator};
pub use quiz_service::{QuizService, QuizSettings};
