//! The `mastery analyze` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use mastery_core::report::AnalysisReport;
use mastery_report::html::write_html_report;

pub fn execute(
    data: PathBuf,
    targets: Option<PathBuf>,
    suffix: Option<String>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path.as_deref(), suffix)?;
    let session = super::open_session(&config, &data, targets.as_deref())?;

    let report = session
        .analyze()
        .with_context(|| format!("analysis of {} failed", data.display()))?;

    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.default_format.clone());
    let formats: Vec<&str> = if format == "all" {
        vec!["text", "json", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    for fmt in &formats {
        match *fmt {
            "text" => print_tables(&report),
            "markdown" | "md" => println!("{}", report.to_markdown()),
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_tables(report: &AnalysisReport) {
    println!(
        "{}: {} students, {} questions",
        report.dataset.name, report.dataset.students, report.dataset.questions
    );

    if report.targets.is_empty() {
        println!("\nNo learning targets defined; showing item analysis only.");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Learning target", "Threshold", "Mastered", "Percent"]);
        for t in &report.targets {
            table.add_row(vec![
                Cell::new(&t.name),
                Cell::new(format!("{} of {}", t.threshold, t.question_count)),
                Cell::new(format!("{}/{}", t.count, t.total)),
                Cell::new(t.percent),
            ]);
        }
        println!("\n{table}");
    }

    let mut table = Table::new();
    table.set_header(vec!["Question", "Correct", "Percent"]);
    for q in &report.questions {
        table.add_row(vec![
            Cell::new(&q.question),
            Cell::new(format!("{}/{}", q.count_correct, q.total)),
            Cell::new(q.percent),
        ]);
    }
    println!("\n{table}");
}
