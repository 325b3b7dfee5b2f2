//! examgrade-core: answer key scoring and admission probability.
//!
//! This crate defines the data model, the fixed answer key, scoring, the
//! probability heuristic and the stateful evaluator that the CLI drives.

pub mod answer_key;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod probability;
pub mod report;
pub mod scoring;
pub mod traits;
