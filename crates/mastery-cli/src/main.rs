//! mastery CLI: learning-target analysis of assessment exports.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "mastery",
    version,
    about = "Learning-target mastery analysis for quiz exports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute mastery per learning target and per question
    Analyze {
        /// CSV export with one row per student
        #[arg(long)]
        data: PathBuf,

        /// TOML file of learning targets
        #[arg(long)]
        targets: Option<PathBuf>,

        /// Header suffix that marks score columns (default: " [Score]")
        #[arg(long)]
        suffix: Option<String>,

        /// Output directory for json/html reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, markdown, json, html, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the score columns detected in an export
    Columns {
        /// CSV export with one row per student
        #[arg(long)]
        data: PathBuf,

        /// Header suffix that marks score columns
        #[arg(long)]
        suffix: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a target file against an export
    Validate {
        /// CSV export with one row per student
        #[arg(long)]
        data: PathBuf,

        /// TOML file of learning targets
        #[arg(long)]
        targets: PathBuf,

        /// Header suffix that marks score columns
        #[arg(long)]
        suffix: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two saved JSON reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Change threshold in percentage points
        #[arg(long, default_value = "5.0")]
        threshold: f64,

        /// Exit code 1 if any target declined
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config, target file and sample export
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mastery=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            data,
            targets,
            suffix,
            output,
            format,
            config,
        } => commands::analyze::execute(data, targets, suffix, output, format, config),
        Commands::Columns {
            data,
            suffix,
            config,
        } => commands::columns::execute(data, suffix, config),
        Commands::Validate {
            data,
            targets,
            suffix,
            config,
        } => commands::validate::execute(data, targets, suffix, config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_decline,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_decline, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        tracing::debug!("command failed: {e:?}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
