//! Core data model types for examgrade.
//!
//! These are the types shared by scoring, the probability heuristic and the
//! evaluator: submissions, score results and the candidate profile.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Marks awarded for every correct answer.
pub const MARKS_PER_CORRECT: u32 = 4;

/// Number of questions on the answer key.
pub const QUESTION_COUNT: u32 = 60;

/// Highest achievable marks.
pub const MAX_MARKS: u32 = QUESTION_COUNT * MARKS_PER_CORRECT;

/// An uploaded answer sheet.
///
/// Values are kept as raw JSON so that anything the candidate typed survives
/// parsing; only string values can ever match the answer key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    answers: BTreeMap<String, serde_json::Value>,
}

impl Submission {
    /// Build a submission from question/answer string pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let answers = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), serde_json::Value::String(v.into())))
            .collect();
        Self { answers }
    }

    pub(crate) fn from_map(answers: BTreeMap<String, serde_json::Value>) -> Self {
        Self { answers }
    }

    /// The submitted answer for a question, if it is a JSON string.
    pub fn answer(&self, question: &str) -> Option<&str> {
        self.answers.get(question).and_then(|v| v.as_str())
    }

    /// The raw submitted value for a question.
    pub fn raw(&self, question: &str) -> Option<&serde_json::Value> {
        self.answers.get(question)
    }

    /// Iterate over every submitted entry, including ones the key ignores.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Outcome of scoring a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Questions answered correctly (0..=60).
    pub correct_count: u32,
    /// Derived marks, always `correct_count * 4`.
    pub marks: u32,
}

impl ScoreResult {
    pub fn from_correct(correct_count: u32) -> Self {
        Self {
            correct_count,
            marks: correct_count * MARKS_PER_CORRECT,
        }
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} correct, {}/{} marks",
            self.correct_count, QUESTION_COUNT, self.marks, MAX_MARKS
        )
    }
}

/// Reservation category selected by the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gen,
    Ews,
    Obc,
    Sc,
    St,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Gen => write!(f, "gen"),
            Category::Ews => write!(f, "ews"),
            Category::Obc => write!(f, "obc"),
            Category::Sc => write!(f, "sc"),
            Category::St => write!(f, "st"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gen" => Ok(Category::Gen),
            "ews" => Ok(Category::Ews),
            "obc" => Ok(Category::Obc),
            "sc" => Ok(Category::Sc),
            "st" => Ok(Category::St),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// Home state of the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeState {
    Up,
    Other,
}

impl fmt::Display for HomeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeState::Up => write!(f, "up"),
            HomeState::Other => write!(f, "other"),
        }
    }
}

impl FromStr for HomeState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(HomeState::Up),
            "other" => Ok(HomeState::Other),
            other => Err(format!("unknown state: {other}")),
        }
    }
}

/// Person-with-disability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PwdStatus {
    Yes,
    No,
}

impl fmt::Display for PwdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PwdStatus::Yes => write!(f, "yes"),
            PwdStatus::No => write!(f, "no"),
        }
    }
}

impl FromStr for PwdStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(PwdStatus::Yes),
            "no" => Ok(PwdStatus::No),
            other => Err(format!("unknown pwd status: {other}")),
        }
    }
}

/// The candidate's form selections.
///
/// Every field is optional. `gender` and `state` are collected but have no
/// bearing on the probability estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, deserialize_with = "lenient_selection")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "lenient_selection")]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "lenient_selection")]
    pub state: Option<HomeState>,
    #[serde(default, deserialize_with = "lenient_selection")]
    pub pwd: Option<PwdStatus>,
}

/// Parse a form selection, treating empty or unrecognized input as unset.
pub fn parse_selection<T>(raw: &str) -> Option<T>
where
    T: FromStr<Err = String>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("{e}, treating as unset");
            None
        }
    }
}

fn lenient_selection<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = String>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_selection))
}
