//! mastery configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::classifier::{ScoreSuffix, DEFAULT_SCORE_SUFFIX};

/// Environment variable that overrides the configured score suffix.
pub const SCORE_SUFFIX_ENV: &str = "MASTERY_SCORE_SUFFIX";

/// Top-level mastery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryConfig {
    /// Header suffix that marks score columns.
    #[serde(default = "default_score_suffix")]
    pub score_suffix: String,
    /// Output directory for saved reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Output format used when none is given on the command line.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_score_suffix() -> String {
    DEFAULT_SCORE_SUFFIX.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./mastery-results")
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for MasteryConfig {
    fn default() -> Self {
        Self {
            score_suffix: default_score_suffix(),
            output_dir: default_output_dir(),
            default_format: default_format(),
        }
    }
}

impl MasteryConfig {
    /// The configured suffix as a column matcher.
    pub fn suffix(&self) -> Result<ScoreSuffix> {
        ScoreSuffix::new(self.score_suffix.clone())
            .context("score_suffix must not be empty: it would mark every column as a score")
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mastery.toml` in the current directory
/// 2. `~/.config/mastery/config.toml`
///
/// Environment variable override: `MASTERY_SCORE_SUFFIX`.
pub fn load_config() -> Result<MasteryConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MasteryConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mastery.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_str(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MasteryConfig::default(),
    };

    if let Ok(suffix) = std::env::var(SCORE_SUFFIX_ENV) {
        config.score_suffix = suffix;
    }

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<MasteryConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mastery"))
}
