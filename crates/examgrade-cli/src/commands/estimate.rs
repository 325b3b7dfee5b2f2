//! The `examgrade estimate` command.

use std::path::PathBuf;

use anyhow::Result;

use examgrade_core::config::load_config_from;
use examgrade_core::evaluator::Evaluator;
use examgrade_core::model::{Category, Gender, HomeState, PwdStatus};
use examgrade_core::report::EvaluationReport;

use super::{print_score_text, upload_file, write_report, OutputFormat, ScoreOutput};

/// Profile fields given on the command line. Set fields win over config.
#[derive(Debug, Default)]
pub struct ProfileOverrides {
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    pub state: Option<HomeState>,
    pub pwd: Option<PwdStatus>,
}

impl ProfileOverrides {
    fn apply(self, evaluator: &mut Evaluator) {
        if self.category.is_some() {
            evaluator.set_category(self.category);
        }
        if self.gender.is_some() {
            evaluator.set_gender(self.gender);
        }
        if self.state.is_some() {
            evaluator.set_state(self.state);
        }
        if self.pwd.is_some() {
            evaluator.set_pwd(self.pwd);
        }
    }
}

pub async fn execute(
    file: PathBuf,
    overrides: ProfileOverrides,
    format: OutputFormat,
    json_only: bool,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut evaluator = Evaluator::with_profile(config.profile);
    overrides.apply(&mut evaluator);
    let json_only = json_only || config.require_json_extension;

    let score = upload_file(&mut evaluator, &file, json_only).await;
    let probability = if evaluator.can_estimate() {
        Some(evaluator.estimate()?)
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            let out = ScoreOutput {
                source: file.display().to_string(),
                correct_count: evaluator.correct_count(),
                marks: evaluator.marks(),
                probability,
                breakdown: None,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            print_score_text(score);
            if let Some(p) = probability {
                let profile = evaluator.profile();
                let category = profile
                    .category
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unset".to_string());
                let pwd = profile
                    .pwd
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unset".to_string());
                println!("Profile: category {category}, pwd {pwd}");
                println!("Your Admission Probability: {p}");
            }
        }
    }

    let report = EvaluationReport::new(
        file.display().to_string(),
        score,
        evaluator.profile().clone(),
        probability,
    );
    write_report(&report, output)?;

    if score.is_none() {
        anyhow::bail!("could not score {}", file.display());
    }
    Ok(())
}
