use thiserror::Error;

use crate::controller::QuizError;
use crate::validate::BatchError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
