mod ids;
mod question;
mod session;

pub use ids::{AdvanceTicket, CycleId};
pub use question::{BATCH_SIZE, OPTION_COUNT, Question, QuestionBatch};
pub use session::{AnswerOutcome, QuizProgress, QuizSession};
