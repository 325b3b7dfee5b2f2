//! The fixed answer key.

use crate::model::QUESTION_COUNT;

/// Correct answers for `q1`..`q60`, assigned A, B, C, D cyclically.
#[rustfmt::skip]
const ENTRIES: [(&str, &str); QUESTION_COUNT as usize] = [
    ("q1", "A"), ("q2", "B"), ("q3", "C"), ("q4", "D"),
    ("q5", "A"), ("q6", "B"), ("q7", "C"), ("q8", "D"),
    ("q9", "A"), ("q10", "B"), ("q11", "C"), ("q12", "D"),
    ("q13", "A"), ("q14", "B"), ("q15", "C"), ("q16", "D"),
    ("q17", "A"), ("q18", "B"), ("q19", "C"), ("q20", "D"),
    ("q21", "A"), ("q22", "B"), ("q23", "C"), ("q24", "D"),
    ("q25", "A"), ("q26", "B"), ("q27", "C"), ("q28", "D"),
    ("q29", "A"), ("q30", "B"), ("q31", "C"), ("q32", "D"),
    ("q33", "A"), ("q34", "B"), ("q35", "C"), ("q36", "D"),
    ("q37", "A"), ("q38", "B"), ("q39", "C"), ("q40", "D"),
    ("q41", "A"), ("q42", "B"), ("q43", "C"), ("q44", "D"),
    ("q45", "A"), ("q46", "B"), ("q47", "C"), ("q48", "D"),
    ("q49", "A"), ("q50", "B"), ("q51", "C"), ("q52", "D"),
    ("q53", "A"), ("q54", "B"), ("q55", "C"), ("q56", "D"),
    ("q57", "A"), ("q58", "B"), ("q59", "C"), ("q60", "D"),
];

/// Letters a well-formed answer may take.
pub const VALID_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// Immutable question -> letter mapping used for scoring.
#[derive(Debug, Clone, Copy)]
pub struct AnswerKey {
    entries: &'static [(&'static str, &'static str)],
}

impl AnswerKey {
    /// The 60-question key every submission is scored against.
    pub const fn standard() -> Self {
        Self { entries: &ENTRIES }
    }

    /// The correct letter for a question, if it is on the key.
    pub fn get(&self, question: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(q, _)| *q == question)
            .map(|(_, letter)| *letter)
    }

    pub fn contains(&self, question: &str) -> bool {
        self.get(question).is_some()
    }

    /// Iterate `(question, letter)` pairs in question order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AnswerKey {
    fn default() -> Self {
        Self::standard()
    }
}
