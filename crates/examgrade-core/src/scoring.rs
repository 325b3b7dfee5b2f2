//! Scoring a submission against the answer key.

use serde::{Deserialize, Serialize};

use crate::answer_key::AnswerKey;
use crate::error::SubmissionError;
use crate::model::{ScoreResult, Submission};
use crate::parser::parse_submission_str;

/// Count exact matches against the key.
///
/// Matching is strict string equality: `"a"` never matches `"A"`, and keys
/// missing from the submission count as incorrect.
pub fn score(submission: &Submission, key: &AnswerKey) -> ScoreResult {
    let correct = key
        .iter()
        .filter(|(question, letter)| submission.answer(question) == Some(*letter))
        .count() as u32;
    ScoreResult::from_correct(correct)
}

/// Parse uploaded text and score it in one step.
pub fn score_text(content: &str, key: &AnswerKey) -> Result<ScoreResult, SubmissionError> {
    let submission = parse_submission_str(content)?;
    Ok(score(&submission, key))
}

/// How a single key question was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// One row of a `ScoreBreakdown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question: String,
    pub expected: String,
    /// Submitted value rendered as text; `None` when the key was absent.
    pub submitted: Option<String>,
    pub outcome: Outcome,
}

/// Per-question view of a scored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub questions: Vec<QuestionOutcome>,
    /// Submitted keys that are not on the answer key.
    pub ignored: Vec<String>,
}

impl ScoreBreakdown {
    pub fn compute(submission: &Submission, key: &AnswerKey) -> Self {
        let questions = key
            .iter()
            .map(|(question, expected)| {
                let raw = submission.raw(question);
                let outcome = match raw {
                    None => Outcome::Unanswered,
                    Some(v) if v.as_str() == Some(expected) => Outcome::Correct,
                    Some(_) => Outcome::Incorrect,
                };
                QuestionOutcome {
                    question: question.to_string(),
                    expected: expected.to_string(),
                    submitted: raw.map(|v| match v.as_str() {
                        Some(s) => s.to_string(),
                        None => v.to_string(),
                    }),
                    outcome,
                }
            })
            .collect();

        let ignored = submission
            .entries()
            .filter(|(q, _)| !key.contains(q))
            .map(|(q, _)| q.to_string())
            .collect();

        Self { questions, ignored }
    }

    pub fn count(&self, outcome: Outcome) -> u32 {
        self.questions
            .iter()
            .filter(|q| q.outcome == outcome)
            .count() as u32
    }

    /// The aggregate score, identical to `score()` on the same input.
    pub fn result(&self) -> ScoreResult {
        ScoreResult::from_correct(self.count(Outcome::Correct))
    }
}
