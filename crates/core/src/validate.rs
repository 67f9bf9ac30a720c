//! Turns raw generation output into a validated `QuestionBatch`.
//!
//! Validation is all-or-nothing: the first malformed element rejects the batch.

use serde_json::Value;
use thiserror::Error;

use crate::model::{BATCH_SIZE, OPTION_COUNT, Question, QuestionBatch};

const FENCE: &str = "```";
const FENCE_LANG: &str = "json";

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Why a single raw question was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QuestionDefect {
    #[error("element is not an object")]
    NotAnObject,
    #[error("question text is missing or blank")]
    MissingText,
    #[error("options is not an array")]
    OptionsNotArray,
    #[error("expected 4 options, found {0}")]
    OptionCount(usize),
    #[error("option {0} is not a string")]
    OptionNotText(usize),
    #[error("correctAnswer is not an integer")]
    AnswerNotInteger,
    #[error("correctAnswer is outside 0..=3")]
    AnswerOutOfRange,
}

/// Errors emitted while validating a generated batch.
///
/// The `Display` text is what the user sees; the fields are for logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BatchError {
    #[error("Failed to parse AI response. Please try again.")]
    Parse { reason: String },

    #[error("Invalid response format: Expected array of 5 questions")]
    Format { found: Option<usize> },

    #[error("Invalid question format")]
    QuestionFormat { index: usize, defect: QuestionDefect },
}

//
// ─── VALIDATION ───────────────────────────────────────────────────────────────
//

/// Remove markdown code fences the model may wrap its JSON in.
///
/// Every "```json" (plus one optional newline) and every remaining "```" is
/// dropped, then the result is trimmed.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        if let Some(after_lang) = rest.strip_prefix(FENCE_LANG) {
            rest = after_lang.strip_prefix('\n').unwrap_or(after_lang);
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Parse and validate raw generation output.
///
/// # Errors
///
/// Returns `BatchError::Parse` if the text is not JSON after fence stripping.
/// Returns `BatchError::Format` if the JSON is not an array of `BATCH_SIZE` elements.
/// Returns `BatchError::QuestionFormat` for the first element that fails validation.
pub fn parse_batch(raw: &str) -> Result<QuestionBatch, BatchError> {
    let stripped = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&stripped).map_err(|err| BatchError::Parse {
        reason: err.to_string(),
    })?;

    let Some(elements) = value.as_array() else {
        return Err(BatchError::Format { found: None });
    };
    if elements.len() != BATCH_SIZE {
        return Err(BatchError::Format {
            found: Some(elements.len()),
        });
    }

    let questions = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            validate_question(element)
                .map_err(|defect| BatchError::QuestionFormat { index, defect })
        })
        .collect::<Result<Vec<_>, _>>()?;

    QuestionBatch::new(questions)
}

fn validate_question(element: &Value) -> Result<Question, QuestionDefect> {
    let object = element.as_object().ok_or(QuestionDefect::NotAnObject)?;

    let text = object
        .get("question")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .ok_or(QuestionDefect::MissingText)?;

    let raw_options = object
        .get("options")
        .and_then(Value::as_array)
        .ok_or(QuestionDefect::OptionsNotArray)?;
    if raw_options.len() != OPTION_COUNT {
        return Err(QuestionDefect::OptionCount(raw_options.len()));
    }
    let mut options: [String; OPTION_COUNT] = Default::default();
    for (slot, (index, option)) in options.iter_mut().zip(raw_options.iter().enumerate()) {
        *slot = option
            .as_str()
            .ok_or(QuestionDefect::OptionNotText(index))?
            .to_string();
    }

    let correct = answer_index(object.get("correctAnswer"))?;

    Question::new(text, options, correct).ok_or(QuestionDefect::AnswerOutOfRange)
}

// JSON has one number type, so `1.0` is as good an index as `1`.
fn answer_index(value: Option<&Value>) -> Result<usize, QuestionDefect> {
    let Some(number) = value.filter(|value| value.is_number()) else {
        return Err(QuestionDefect::AnswerNotInteger);
    };
    if let Some(index) = number.as_u64() {
        return usize::try_from(index).map_err(|_| QuestionDefect::AnswerOutOfRange);
    }
    if number.as_i64().is_some() {
        return Err(QuestionDefect::AnswerOutOfRange);
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && (0.0..=3.0).contains(&float) => Ok(float as usize),
        Some(float) if float.fract() == 0.0 => Err(QuestionDefect::AnswerOutOfRange),
        _ => Err(QuestionDefect::AnswerNotInteger),
    }
}
