//! The answer evaluator.
//!
//! Owns the state a user sees: the latest score, the candidate profile and
//! the last requested probability estimate. Each upload replaces the score
//! wholesale; a failed upload clears it so a stale number is never shown.

use crate::answer_key::AnswerKey;
use crate::error::{EvaluatorError, SubmissionError};
use crate::model::{
    CandidateProfile, Category, Gender, HomeState, PwdStatus, ScoreResult, Submission,
};
use crate::parser::parse_submission_str;
use crate::probability::{estimate_probability, ProbabilityEstimate};
use crate::scoring::{score, ScoreBreakdown};
use crate::traits::SubmissionSource;

/// Identifies one upload. Only the most recently issued ticket is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// Scores uploads and estimates admission probability.
#[derive(Debug, Default)]
pub struct Evaluator {
    key: AnswerKey,
    submission: Option<Submission>,
    score: Option<ScoreResult>,
    profile: CandidateProfile,
    probability: Option<ProbabilityEstimate>,
    latest_ticket: u64,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing profile, e.g. one loaded from config.
    pub fn with_profile(profile: CandidateProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// Read, parse and score an upload.
    ///
    /// On failure the previous score is cleared and the error is logged
    /// before being returned.
    pub async fn upload(
        &mut self,
        source: &dyn SubmissionSource,
    ) -> Result<ScoreResult, SubmissionError> {
        let ticket = self.begin_upload();
        let name = source.describe();
        tracing::debug!("reading submission from {name}");

        let outcome = source
            .read_text()
            .await
            .and_then(|text| parse_submission_str(&text));

        if let Err(e) = &outcome {
            tracing::error!("error processing {name}: {e}");
        }
        self.finish_upload(ticket, outcome)
    }

    /// Issue a ticket for a new upload, superseding any in flight.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.latest_ticket += 1;
        UploadTicket(self.latest_ticket)
    }

    /// Score the parsed outcome of an upload and keep it.
    ///
    /// Outcomes for superseded tickets are scored and returned to the caller
    /// but leave the evaluator untouched.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        outcome: Result<Submission, SubmissionError>,
    ) -> Result<ScoreResult, SubmissionError> {
        let scored = outcome.map(|submission| {
            let result = score(&submission, &self.key);
            (submission, result)
        });

        if ticket.0 != self.latest_ticket {
            tracing::debug!(
                "discarding upload {} superseded by {}",
                ticket.0,
                self.latest_ticket
            );
            return scored.map(|(_, result)| result);
        }

        self.probability = None;
        match scored {
            Ok((submission, result)) => {
                tracing::debug!("scored submission: {result}");
                self.submission = Some(submission);
                self.score = Some(result);
                Ok(result)
            }
            Err(e) => {
                self.submission = None;
                self.score = None;
                Err(e)
            }
        }
    }

    /// Score text directly, with the same state handling as `upload`.
    pub fn submit_text(&mut self, content: &str) -> Result<ScoreResult, SubmissionError> {
        let ticket = self.begin_upload();
        let outcome = parse_submission_str(content);
        if let Err(e) = &outcome {
            tracing::error!("error processing submission: {e}");
        }
        self.finish_upload(ticket, outcome)
    }

    pub fn score(&self) -> Option<ScoreResult> {
        self.score
    }

    pub fn correct_count(&self) -> Option<u32> {
        self.score.map(|s| s.correct_count)
    }

    pub fn marks(&self) -> Option<u32> {
        self.score.map(|s| s.marks)
    }

    /// The submission behind the current score.
    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    /// Per-question outcomes for the current score.
    pub fn breakdown(&self) -> Option<ScoreBreakdown> {
        self.submission
            .as_ref()
            .map(|s| ScoreBreakdown::compute(s, &self.key))
    }

    pub fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: CandidateProfile) {
        self.profile = profile;
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.profile.category = category;
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.profile.gender = gender;
    }

    pub fn set_state(&mut self, state: Option<HomeState>) {
        self.profile.state = state;
    }

    pub fn set_pwd(&mut self, pwd: Option<PwdStatus>) {
        self.profile.pwd = pwd;
    }

    /// Whether `estimate` can run.
    pub fn can_estimate(&self) -> bool {
        self.score.is_some()
    }

    /// Compute and remember the probability for the current score and profile.
    pub fn estimate(&mut self) -> Result<ProbabilityEstimate, EvaluatorError> {
        let score = self.score.ok_or(EvaluatorError::ScoreUnavailable)?;
        let estimate = estimate_probability(score.marks, &self.profile);
        self.probability = Some(estimate);
        Ok(estimate)
    }

    /// The last estimate, if one was requested since the score last changed.
    pub fn probability(&self) -> Option<ProbabilityEstimate> {
        self.probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::InlineSource;

    const THREE_RIGHT: &str = r#"{"q1":"A","q2":"B","q3":"C","q4":"A"}"#;

    #[tokio::test]
    async fn upload_scores_submission() {
        let mut evaluator = Evaluator::new();
        let result = evaluator
            .upload(&InlineSource::new("sheet", THREE_RIGHT))
            .await
            .unwrap();
        assert_eq!(result.correct_count, 3);
        assert_eq!(evaluator.marks(), Some(12));
    }

    #[tokio::test]
    async fn malformed_upload_clears_previous_score() {
        let mut evaluator = Evaluator::new();
        evaluator
            .upload(&InlineSource::new("good", THREE_RIGHT))
            .await
            .unwrap();
        assert!(evaluator.score().is_some());

        let err = evaluator
            .upload(&InlineSource::new("bad", "{\"q1\":"))
            .await;
        assert!(err.is_err());
        assert_eq!(evaluator.correct_count(), None);
        assert_eq!(evaluator.marks(), None);
    }

    #[test]
    fn non_object_clears_score() {
        let mut evaluator = Evaluator::new();
        evaluator.submit_text(THREE_RIGHT).unwrap();
        assert!(evaluator.submit_text("[\"A\"]").is_err());
        assert_eq!(evaluator.score(), None);
    }

    #[test]
    fn uploads_do_not_accumulate() {
        let mut evaluator = Evaluator::new();
        evaluator.submit_text(THREE_RIGHT).unwrap();
        evaluator.submit_text(r#"{"q5":"A"}"#).unwrap();
        assert_eq!(evaluator.correct_count(), Some(1));
    }

    #[test]
    fn estimate_requires_score() {
        let mut evaluator = Evaluator::new();
        assert!(!evaluator.can_estimate());
        assert_eq!(evaluator.estimate(), Err(EvaluatorError::ScoreUnavailable));

        evaluator.submit_text("nope").unwrap_err();
        assert_eq!(evaluator.estimate(), Err(EvaluatorError::ScoreUnavailable));
    }

    #[test]
    fn estimate_uses_latest_profile() {
        let mut evaluator = Evaluator::new();
        let half: String = {
            let pairs: Vec<String> = AnswerKey::standard()
                .iter()
                .take(30)
                .map(|(q, a)| format!("\"{q}\":\"{a}\""))
                .collect();
            format!("{{{}}}", pairs.join(","))
        };
        evaluator.submit_text(&half).unwrap();
        assert_eq!(evaluator.marks(), Some(120));

        assert_eq!(evaluator.estimate().unwrap().percent(), 50.0);

        evaluator.set_category(Some(Category::Obc));
        evaluator.set_pwd(Some(PwdStatus::No));
        assert_eq!(evaluator.estimate().unwrap().percent(), 55.0);
        assert_eq!(evaluator.probability().unwrap().percent(), 55.0);
    }

    #[test]
    fn profile_survives_uploads_but_estimate_does_not() {
        let mut evaluator = Evaluator::new();
        evaluator.set_category(Some(Category::St));
        evaluator.submit_text(THREE_RIGHT).unwrap();
        evaluator.estimate().unwrap();
        assert!(evaluator.probability().is_some());

        evaluator.submit_text(THREE_RIGHT).unwrap();
        assert_eq!(evaluator.probability(), None);
        assert_eq!(evaluator.profile().category, Some(Category::St));
    }

    #[test]
    fn set_profile_replaces_all_fields() {
        let mut evaluator = Evaluator::with_profile(CandidateProfile {
            category: Some(Category::Sc),
            pwd: Some(PwdStatus::Yes),
            ..Default::default()
        });
        evaluator.set_profile(CandidateProfile {
            gender: Some(Gender::Male),
            ..Default::default()
        });
        assert_eq!(evaluator.profile().category, None);
        assert_eq!(evaluator.profile().pwd, None);
        assert_eq!(evaluator.profile().gender, Some(Gender::Male));
    }

    fn first_right(n: usize) -> Submission {
        Submission::from_pairs(AnswerKey::standard().iter().take(n))
    }

    #[tokio::test]
    async fn breakdown_comes_from_the_scored_upload() {
        let mut evaluator = Evaluator::new();
        let result = evaluator
            .upload(&InlineSource::new("sheet", r#"{"q1":"A","q2":"a","q3":"C","x":"A"}"#))
            .await
            .unwrap();

        let breakdown = evaluator.breakdown().unwrap();
        assert_eq!(breakdown.result(), result);
        assert_eq!(Some(breakdown.result()), evaluator.score());
        assert_eq!(breakdown.ignored, vec!["x".to_string()]);
        assert_eq!(evaluator.submission().unwrap().len(), 4);

        evaluator
            .upload(&InlineSource::new("bad", "[]"))
            .await
            .unwrap_err();
        assert!(evaluator.breakdown().is_none());
        assert!(evaluator.submission().is_none());
    }

    #[test]
    fn newest_upload_wins() {
        let mut evaluator = Evaluator::new();
        let first = evaluator.begin_upload();
        let second = evaluator.begin_upload();

        evaluator.finish_upload(second, Ok(first_right(10))).unwrap();
        // The slower, older read finishes last and must not overwrite.
        let stale = evaluator.finish_upload(first, Ok(first_right(2))).unwrap();
        assert_eq!(stale.correct_count, 2);
        assert_eq!(evaluator.correct_count(), Some(10));
        assert_eq!(evaluator.breakdown().unwrap().result().correct_count, 10);
    }

    #[test]
    fn stale_failure_does_not_clear_newer_score() {
        let mut evaluator = Evaluator::new();
        let first = evaluator.begin_upload();
        let second = evaluator.begin_upload();
        evaluator
            .finish_upload(second, Ok(first_right(4)))
            .unwrap();
        let stale = evaluator.finish_upload(first, Err(SubmissionError::NotAnObject("null")));
        assert!(stale.is_err());
        assert_eq!(evaluator.marks(), Some(16));
    }
}
