//! The `mastery compare` command.

use std::path::PathBuf;

use anyhow::Result;

use mastery_core::report::AnalysisReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_decline: bool,
    format: String,
) -> Result<()> {
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = AnalysisReport::load_json(&baseline_path)?;
    let current = AnalysisReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} declines, {} improvements, {} unchanged",
                report.declines.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.declines.is_empty() {
                println!("\nDeclines:");
                for d in &report.declines {
                    println!(
                        "  {} {:.1}% -> {:.1}% ({:+.1} pts)",
                        d.target, d.baseline_percent, d.current_percent, d.delta
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} {:.1}% -> {:.1}% ({:+.1} pts)",
                        i.target, i.baseline_percent, i.current_percent, i.delta
                    );
                }
            }

            if report.new_targets > 0 {
                println!("\n{} new target(s)", report.new_targets);
            }
            if report.removed_targets > 0 {
                println!("{} removed target(s)", report.removed_targets);
            }
        }
    }

    if fail_on_decline && report.has_declines() {
        std::process::exit(1);
    }

    Ok(())
}
