pub mod estimate;
pub mod init;
pub mod key;
pub mod score;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use examgrade_core::evaluator::Evaluator;
use examgrade_core::model::{ScoreResult, MARKS_PER_CORRECT, MAX_MARKS, QUESTION_COUNT};
use examgrade_core::probability::ProbabilityEstimate;
use examgrade_core::report::EvaluationReport;
use examgrade_core::scoring::ScoreBreakdown;
use examgrade_core::traits::FileSource;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Upload `file` into the evaluator. Failures are left for the caller to
/// render as an unavailable score.
pub(crate) async fn upload_file(
    evaluator: &mut Evaluator,
    file: &Path,
    json_only: bool,
) -> Option<ScoreResult> {
    let source = FileSource::new(file).json_only(json_only);
    evaluator.upload(&source).await.ok()
}

/// Machine-readable command output.
#[derive(Serialize)]
pub(crate) struct ScoreOutput {
    pub source: String,
    pub correct_count: Option<u32>,
    pub marks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<ProbabilityEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

pub(crate) fn print_score_text(score: Option<ScoreResult>) {
    match score {
        Some(s) => {
            println!("Correct answers: {}/{QUESTION_COUNT}", s.correct_count);
            println!("Marks: {}/{MAX_MARKS}", s.marks);
            println!(
                "Calculation: {} correct x {MARKS_PER_CORRECT} = {} marks",
                s.correct_count, s.marks
            );
        }
        None => {
            println!("Correct answers: unavailable");
            println!("Marks: unavailable");
        }
    }
}

pub(crate) fn write_report(report: &EvaluationReport, output: Option<PathBuf>) -> Result<()> {
    if let Some(path) = output {
        report.save_json(&path)?;
        tracing::info!("report written to {}", path.display());
    }
    Ok(())
}
