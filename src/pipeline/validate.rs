use serde_json::Value;

use crate::models::{Question, Questions};
use crate::names;

/// Outcome of checking extracted model output against the question shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(Questions),
    Invalid(String),
}

impl ValidationResult {
    pub fn into_result(self) -> Result<Questions, String> {
        match self {
            Self::Valid(questions) => Ok(questions),
            Self::Invalid(reason) => Err(reason),
        }
    }
}

/// All-or-nothing: one bad element invalidates the whole batch.
pub fn validate_questions(value: Value, subtopic_count: usize) -> ValidationResult {
    let Value::Array(items) = value else {
        return ValidationResult::Invalid("expected a JSON array of questions".to_string());
    };

    if items.is_empty() {
        return ValidationResult::Invalid("no questions were generated".to_string());
    }

    let mut questions = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match check_question(item, subtopic_count) {
            Ok(question) => questions.push(question),
            Err(reason) => return ValidationResult::Invalid(format!("question {idx}: {reason}")),
        }
    }

    ValidationResult::Valid(questions)
}

fn check_question(item: Value, subtopic_count: usize) -> Result<Question, String> {
    let question: Question = serde_json::from_value(item).map_err(|e| e.to_string())?;

    if question.options.len() != names::OPTION_COUNT {
        return Err(format!(
            "expected {} options, got {}",
            names::OPTION_COUNT,
            question.options.len()
        ));
    }

    if question.subtopic >= subtopic_count {
        return Err(format!(
            "subtopic index {} is out of range for {subtopic_count} subtopics",
            question.subtopic
        ));
    }

    Ok(question)
}
