//! The `examgrade score` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use examgrade_core::config::load_config_from;
use examgrade_core::evaluator::Evaluator;
use examgrade_core::report::EvaluationReport;
use examgrade_core::scoring::{Outcome, ScoreBreakdown};

use super::{print_score_text, upload_file, write_report, OutputFormat, ScoreOutput};

pub async fn execute(
    file: PathBuf,
    detail: bool,
    format: OutputFormat,
    json_only: bool,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut evaluator = Evaluator::with_profile(config.profile);
    let json_only = json_only || config.require_json_extension;

    let score = upload_file(&mut evaluator, &file, json_only).await;

    let breakdown = if detail { evaluator.breakdown() } else { None };

    match format {
        OutputFormat::Json => {
            let out = ScoreOutput {
                source: file.display().to_string(),
                correct_count: evaluator.correct_count(),
                marks: evaluator.marks(),
                probability: None,
                breakdown: breakdown.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            print_score_text(score);
            if let Some(b) = &breakdown {
                print_breakdown(b);
            }
        }
    }

    let mut report = EvaluationReport::new(
        file.display().to_string(),
        score,
        evaluator.profile().clone(),
        None,
    );
    if let Some(b) = breakdown {
        report = report.with_breakdown(b);
    }
    write_report(&report, output)?;

    if score.is_none() {
        anyhow::bail!("could not score {}", file.display());
    }
    Ok(())
}

fn print_breakdown(breakdown: &ScoreBreakdown) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Expected", "Submitted", "Result"]);
    for q in &breakdown.questions {
        let result = match q.outcome {
            Outcome::Correct => "correct",
            Outcome::Incorrect => "incorrect",
            Outcome::Unanswered => "unanswered",
        };
        table.add_row(vec![
            q.question.clone(),
            q.expected.clone(),
            q.submitted.clone().unwrap_or_else(|| "-".to_string()),
            result.to_string(),
        ]);
    }
    println!("\n{table}");
    println!(
        "{} correct, {} incorrect, {} unanswered",
        breakdown.count(Outcome::Correct),
        breakdown.count(Outcome::Incorrect),
        breakdown.count(Outcome::Unanswered)
    );
    if !breakdown.ignored.is_empty() {
        println!("Ignored keys: {}", breakdown.ignored.join(", "));
    }
}
