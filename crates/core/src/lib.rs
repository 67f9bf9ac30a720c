#![forbid(unsafe_code)]

pub mod controller;
pub mod error;
pub mod model;
pub mod prompt;
pub mod score;
pub mod validate;

pub use controller::{CycleOutcome, QuizController, QuizError, QuizState, SelectOutcome};
pub use error::Error;
pub use validate::{BatchError, QuestionDefect, parse_batch};
