//! The `mastery columns` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(data: PathBuf, suffix: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::resolve_config(config_path.as_deref(), suffix)?;
    let session = super::open_session(&config, &data, None)?;

    let Some(raw) = session.dataset() else {
        anyhow::bail!("no dataset loaded from {}", data.display());
    };
    let questions = session.questions();

    println!(
        "{} score column(s), {} metadata column(s), {} student(s)",
        questions.len(),
        raw.columns().len() - questions.len(),
        raw.row_count()
    );
    for question in questions {
        println!("  {question}");
    }

    Ok(())
}
