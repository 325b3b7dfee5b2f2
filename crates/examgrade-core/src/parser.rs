//! JSON answer-sheet parser.
//!
//! Turns uploaded text into a `Submission` and lints submissions for entries
//! that will silently score as incorrect.

use serde_json::Value;

use crate::answer_key::{AnswerKey, VALID_LETTERS};
use crate::error::SubmissionError;
use crate::model::Submission;

/// Parse uploaded text into a `Submission`.
///
/// Anything other than a JSON object is rejected. Entries inside the object
/// are kept as-is; scoring decides what matches.
pub fn parse_submission_str(content: &str) -> Result<Submission, SubmissionError> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => Ok(Submission::from_map(map.into_iter().collect())),
        other => Err(SubmissionError::NotAnObject(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A warning from submission validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionWarning {
    /// The question key (if applicable).
    pub question: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a submission for entries that can never score.
pub fn validate_submission(submission: &Submission, key: &AnswerKey) -> Vec<SubmissionWarning> {
    let mut warnings = Vec::new();

    for (question, value) in submission.entries() {
        if !key.contains(question) {
            warnings.push(SubmissionWarning {
                question: Some(question.to_string()),
                message: format!("{question} is not on the answer key and will be ignored"),
            });
            continue;
        }

        let Some(answer) = value.as_str() else {
            warnings.push(SubmissionWarning {
                question: Some(question.to_string()),
                message: format!("answer is {}, not a letter", json_kind(value)),
            });
            continue;
        };

        if VALID_LETTERS.contains(&answer) {
            continue;
        }
        let message = if VALID_LETTERS.contains(&answer.to_uppercase().as_str()) {
            format!("answer \"{answer}\" is lowercase and will not match")
        } else {
            format!("answer \"{answer}\" is not one of A, B, C, D")
        };
        warnings.push(SubmissionWarning {
            question: Some(question.to_string()),
            message,
        });
    }

    let missing = key
        .iter()
        .filter(|(q, _)| submission.raw(q).is_none())
        .count();
    if missing > 0 {
        warnings.push(SubmissionWarning {
            question: None,
            message: format!("{missing} question(s) unanswered"),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flat_object() {
        let submission = parse_submission_str(r#"{"q1":"A","q2":"B","q3":"X"}"#).unwrap();
        assert_eq!(submission.len(), 3);
        assert_eq!(submission.answer("q3"), Some("X"));
    }

    #[test]
    fn parse_malformed_json() {
        let result = parse_submission_str("{\"q1\": \"A\",");
        assert!(matches!(result, Err(SubmissionError::InvalidJson(_))));
    }

    #[test]
    fn parse_non_object_json() {
        for (text, kind) in [
            ("[\"A\",\"B\"]", "an array"),
            ("null", "null"),
            ("42", "a number"),
            ("\"A\"", "a string"),
        ] {
            match parse_submission_str(text) {
                Err(SubmissionError::NotAnObject(found)) => assert_eq!(found, kind),
                other => panic!("expected NotAnObject for {text}, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_empty_object() {
        let submission = parse_submission_str("{}").unwrap();
        assert!(submission.is_empty());
    }

    #[test]
    fn validate_clean_submission() {
        let key = AnswerKey::standard();
        let submission = Submission::from_pairs(key.iter());
        assert!(validate_submission(&submission, &key).is_empty());
    }

    #[test]
    fn validate_flags_problems() {
        let key = AnswerKey::standard();
        let submission =
            parse_submission_str(r#"{"q1":"a","q2":"E","q3":7,"q99":"A","q4":"D"}"#).unwrap();
        let warnings = validate_submission(&submission, &key);

        let for_question = |q: &str| {
            warnings
                .iter()
                .find(|w| w.question.as_deref() == Some(q))
                .map(|w| w.message.clone())
                .unwrap_or_default()
        };
        assert!(for_question("q1").contains("lowercase"));
        assert!(for_question("q2").contains("not one of"));
        assert!(for_question("q3").contains("a number"));
        assert!(for_question("q99").contains("ignored"));
        assert!(for_question("q4").is_empty());
        assert!(warnings
            .iter()
            .any(|w| w.question.is_none() && w.message.contains("56 question(s)")));
    }
}
