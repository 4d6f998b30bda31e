//! The `mastery init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    for (path, contents) in [
        ("mastery.toml", SAMPLE_CONFIG),
        ("targets.toml", SAMPLE_TARGETS),
        ("sample-quiz.csv", SAMPLE_DATA),
    ] {
        if Path::new(path).exists() {
            println!("{path} already exists, skipping.");
        } else {
            std::fs::write(path, contents)?;
            println!("Created {path}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Export your quiz results as CSV");
    println!("  2. Run: mastery columns --data sample-quiz.csv");
    println!("  3. Edit targets.toml to group questions into learning targets");
    println!("  4. Run: mastery analyze --data sample-quiz.csv --targets targets.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mastery configuration

# Header suffix that marks score columns in the export.
score_suffix = " [Score]"

# Where json/html reports are written.
output_dir = "./mastery-results"

# text, markdown, json, html, or all
default_format = "text"
"#;

const SAMPLE_TARGETS: &str = r#"# Learning targets: each groups questions and sets how many
# must be correct for a student to count as having mastered it.

[[targets]]
name = "Causes of the Revolution"
questions = ["Q1", "Q2", "Q3"]
threshold = 2

[[targets]]
name = "Primary source analysis"
questions = ["Q3", "Q4"]
threshold = 2
"#;

const SAMPLE_DATA: &str = "\
Timestamp,Email Address,Total score,Q1,Q1 [Score],Q2,Q2 [Score],Q3,Q3 [Score],Q4,Q4 [Score]
2024/09/12 10:01:12,ada@example.org,3.00 / 4,B,1.00 / 1,A,1.00 / 1,C,1.00 / 1,D,0.00 / 1
2024/09/12 10:02:40,ben@example.org,2.00 / 4,B,1.00 / 1,C,0.00 / 1,C,1.00 / 1,A,0.00 / 1
2024/09/12 10:03:05,cy@example.org,1.00 / 4,A,0.00 / 1,A,1.00 / 1,B,0.00 / 1,A,0.00 / 1
2024/09/12 10:04:51,dee@example.org,4.00 / 4,B,1.00 / 1,A,1.00 / 1,C,1.00 / 1,B,1.00 / 1
";
