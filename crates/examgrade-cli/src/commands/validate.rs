//! The `examgrade validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use examgrade_core::answer_key::AnswerKey;
use examgrade_core::parser::{parse_submission_str, validate_submission};

pub fn execute(file: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read answer sheet: {}", file.display()))?;
    let submission = parse_submission_str(&content)
        .with_context(|| format!("failed to parse answer sheet: {}", file.display()))?;

    println!(
        "Answer sheet: {} ({} entries)",
        file.display(),
        submission.len()
    );

    let warnings = validate_submission(&submission, &AnswerKey::standard());
    for w in &warnings {
        let prefix = w
            .question
            .as_ref()
            .map(|q| format!("  [{q}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Answer sheet valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
