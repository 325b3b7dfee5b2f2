//! Admission probability heuristic.
//!
//! A hand-tuned, non-statistical estimate: marks are scaled to a percentage,
//! then boosted by category and disability multipliers that compound.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{CandidateProfile, Category, PwdStatus, MAX_MARKS};

/// Multiplier applied for each reservation category.
const CATEGORY_MULTIPLIERS: [(Category, f64); 5] = [
    (Category::Gen, 1.00),
    (Category::Ews, 1.05),
    (Category::Obc, 1.10),
    (Category::Sc, 1.15),
    (Category::St, 1.20),
];

/// Extra multiplier for PwD candidates, applied after the category one.
pub const PWD_MULTIPLIER: f64 = 1.10;

/// Upper bound on any estimate.
pub const MAX_PROBABILITY: f64 = 100.0;

/// Category multiplier; unset categories get 1.0.
pub fn category_multiplier(category: Option<Category>) -> f64 {
    category
        .and_then(|c| {
            CATEGORY_MULTIPLIERS
                .iter()
                .find(|(known, _)| *known == c)
                .map(|(_, m)| *m)
        })
        .unwrap_or(1.0)
}

/// A probability percentage in `[0, 100]`, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityEstimate(f64);

impl ProbabilityEstimate {
    pub fn percent(self) -> f64 {
        self.0
    }
}

impl fmt::Display for ProbabilityEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// Estimate admission probability from marks and the candidate profile.
///
/// `gender` and `state` are not consulted.
pub fn estimate_probability(marks: u32, profile: &CandidateProfile) -> ProbabilityEstimate {
    let mut probability = (marks as f64 / MAX_MARKS as f64) * 100.0;

    probability *= category_multiplier(profile.category);
    if profile.pwd == Some(PwdStatus::Yes) {
        probability *= PWD_MULTIPLIER;
    }

    let clamped = probability.min(MAX_PROBABILITY);
    ProbabilityEstimate(round2(clamped))
}

/// Round to two decimals the way `Number.prototype.toFixed(2)` does.
///
/// The stored binary value is rounded, not `value * 100`, so 56.92499...
/// stays 56.92. Exact ties (only possible for multiples of 1/8) go up.
fn round2(value: f64) -> f64 {
    if (value * 8.0).fract() == 0.0 && (value * 100.0).fract() == 0.5 {
        return (value * 100.0).ceil() / 100.0;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}
