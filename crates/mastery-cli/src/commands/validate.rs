//! The `mastery validate` command.

use std::path::PathBuf;

use anyhow::Result;

use mastery_core::parser::validate_targets;

pub fn execute(
    data: PathBuf,
    targets: PathBuf,
    suffix: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path.as_deref(), suffix)?;
    let session = super::open_session(&config, &data, Some(&targets))?;

    let Some(table) = session.table() else {
        anyhow::bail!("no dataset loaded from {}", data.display());
    };
    println!(
        "Dataset: {} ({} students, {} questions)",
        data.display(),
        table.row_count(),
        table.questions().len()
    );
    println!("Targets: {} defined", session.targets().len());

    let warnings = validate_targets(session.targets(), table);
    for w in &warnings {
        let prefix = w
            .target
            .as_ref()
            .map(|name| format!("  [{name}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All targets valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
