//! Evaluation reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{CandidateProfile, ScoreResult};
use crate::probability::ProbabilityEstimate;
use crate::scoring::ScoreBreakdown;

/// A saved record of one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Where the answer sheet came from.
    pub source: String,
    /// The score, or `None` if the submission was malformed.
    pub score: Option<ScoreResult>,
    /// Profile in effect when the report was written.
    pub profile: CandidateProfile,
    /// Probability estimate, if one was requested.
    #[serde(default)]
    pub probability: Option<ProbabilityEstimate>,
    /// Per-question outcomes, if requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl EvaluationReport {
    pub fn new(
        source: impl Into<String>,
        score: Option<ScoreResult>,
        profile: CandidateProfile,
        probability: Option<ProbabilityEstimate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: source.into(),
            score,
            profile,
            probability,
            breakdown: None,
        }
    }

    pub fn with_breakdown(mut self, breakdown: ScoreBreakdown) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer_key::AnswerKey;
    use crate::model::{Category, PwdStatus, Submission};
    use crate::probability::estimate_probability;

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        let profile = CandidateProfile {
            category: Some(Category::Ews),
            pwd: Some(PwdStatus::Yes),
            ..Default::default()
        };
        let score = ScoreResult::from_correct(45);
        let probability = estimate_probability(score.marks, &profile);
        let report = EvaluationReport::new("answers.json", Some(score), profile, Some(probability));
        report.save_json(&path).unwrap();

        let loaded = EvaluationReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.score, Some(score));
        assert_eq!(loaded.profile.category, Some(Category::Ews));
        assert_eq!(loaded.probability, Some(probability));
        assert!(loaded.breakdown.is_none());
    }

    #[test]
    fn unavailable_score_serializes_as_null() {
        let report = EvaluationReport::new("bad.json", None, CandidateProfile::default(), None);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["score"].is_null());
        assert!(json["probability"].is_null());
    }

    #[test]
    fn breakdown_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let key = AnswerKey::standard();
        let submission = Submission::from_pairs([("q1", "A")]);
        let breakdown = ScoreBreakdown::compute(&submission, &key);

        EvaluationReport::new("inline", Some(breakdown.result()), Default::default(), None)
            .with_breakdown(breakdown)
            .save_json(&path)
            .unwrap();

        let loaded = EvaluationReport::load_json(&path).unwrap();
        assert_eq!(loaded.breakdown.unwrap().questions.len(), 60);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EvaluationReport::load_json(&dir.path().join("missing.json")).is_err());
    }
}
