mod panels;
mod quiz;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use panels::{ErrorPanel, LoadingPanel, QuestionPanel, ResultsPanel};
pub use quiz::QuizView;
