//! examgrade configuration.
//!
//! Holds the default candidate profile and upload options so they persist
//! between runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{parse_selection, CandidateProfile};

/// Top-level examgrade configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamgradeConfig {
    /// Profile used for probability estimates unless overridden.
    #[serde(default)]
    pub profile: CandidateProfile,
    /// Reject answer sheets whose file name does not end in `.json`.
    #[serde(default)]
    pub require_json_extension: bool,
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `examgrade.toml` in the current directory
/// 2. `~/.config/examgrade/config.toml`
///
/// Environment variable overrides: `EXAMGRADE_CATEGORY`, `EXAMGRADE_GENDER`,
/// `EXAMGRADE_STATE`, `EXAMGRADE_PWD`.
pub fn load_config() -> Result<ExamgradeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamgradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examgrade.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExamgradeConfig::default(),
    };

    apply_env_overrides(&mut config.profile, |name| std::env::var(name).ok());
    Ok(config)
}

/// Parse a TOML string into an `ExamgradeConfig`.
pub fn parse_config_str(content: &str) -> Result<ExamgradeConfig> {
    Ok(toml::from_str(content)?)
}

/// Overlay `EXAMGRADE_*` variables on a profile. An empty value clears the
/// field.
fn apply_env_overrides(profile: &mut CandidateProfile, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("EXAMGRADE_CATEGORY") {
        profile.category = parse_selection(&v);
    }
    if let Some(v) = var("EXAMGRADE_GENDER") {
        profile.gender = parse_selection(&v);
    }
    if let Some(v) = var("EXAMGRADE_STATE") {
        profile.state = parse_selection(&v);
    }
    if let Some(v) = var("EXAMGRADE_PWD") {
        profile.pwd = parse_selection(&v);
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examgrade"))
}
