//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};

use mastery_core::config::{load_config_from, MasteryConfig};
use mastery_core::loader::load_csv;
use mastery_core::parser::parse_targets;
use mastery_core::session::Session;

pub mod analyze;
pub mod columns;
pub mod compare;
pub mod init;
pub mod validate;

/// Load config, applying a `--suffix` override on top of file and env.
pub fn resolve_config(
    config_path: Option<&Path>,
    suffix: Option<String>,
) -> Result<MasteryConfig> {
    let mut config = load_config_from(config_path)?;
    if let Some(s) = suffix {
        config.score_suffix = s;
    }
    Ok(config)
}

/// Build a session from a CSV export and an optional target file.
pub fn open_session(
    config: &MasteryConfig,
    data: &Path,
    targets: Option<&Path>,
) -> Result<Session> {
    let raw = load_csv(data)?;
    let name = data
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| data.display().to_string());

    let mut session = Session::new(config.suffix()?);
    session
        .load_dataset(name, raw)
        .with_context(|| format!("cannot analyze {}", data.display()))?;

    if let Some(path) = targets {
        session.set_targets(parse_targets(path)?);
    }

    Ok(session)
}
