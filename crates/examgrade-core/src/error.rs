//! Evaluator error types.
//!
//! A malformed submission is the only way scoring can fail. Callers react to
//! it by clearing any displayed score rather than treating it as fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning an upload into a `Submission`.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The upload could not be read.
    #[error("failed to read {source_name}: {error}")]
    Read {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    /// The file picker only accepts `.json` names and this one is not.
    #[error("not a .json file: {0}")]
    ExtensionRejected(PathBuf),

    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Valid JSON, but not an object of question -> answer.
    #[error("expected a JSON object of answers, found {0}")]
    NotAnObject(&'static str),
}

/// Errors from the evaluator's probability step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluatorError {
    /// No score exists yet, so there is nothing to estimate from.
    #[error("no score available; upload a valid answer sheet first")]
    ScoreUnavailable,
}
