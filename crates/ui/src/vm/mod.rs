mod quiz_vm;

pub use quiz_vm::{
    OptionVm, QuestionVm, QuizEffect, QuizIntent, QuizScreen, ResultsVm, ReviewVm, apply_intent,
};
