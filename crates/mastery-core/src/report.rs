//! Analysis report types with JSON persistence and assessment comparison.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{QuestionResult, TargetResult};

/// A complete analysis of one assessment export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the analysed dataset.
    pub dataset: DatasetSummary,
    /// Mastery per learning target, in registry order.
    pub targets: Vec<TargetResult>,
    /// Item analysis, in column order.
    pub questions: Vec<QuestionResult>,
}

/// Summary of a dataset (without the student rows).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub students: usize,
    pub questions: usize,
}

impl AnalysisReport {
    /// Bundle engine results into a fresh report.
    pub fn new(
        dataset: DatasetSummary,
        targets: Vec<TargetResult>,
        questions: Vec<QuestionResult>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            dataset,
            targets,
            questions,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AnalysisReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown tables.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        let _ = writeln!(md, "## {}\n", self.dataset.name);
        let _ = writeln!(
            md,
            "{} students, {} questions\n",
            self.dataset.students, self.dataset.questions
        );

        if !self.targets.is_empty() {
            md.push_str("### Learning targets\n\n");
            md.push_str("| Target | Threshold | Mastered | Students | Percent |\n");
            md.push_str("|--------|-----------|----------|----------|---------|\n");
            for t in &self.targets {
                let _ = writeln!(
                    md,
                    "| {} | {}/{} | {} | {} | {} |",
                    t.name, t.threshold, t.question_count, t.count, t.total, t.percent
                );
            }
            md.push('\n');
        }

        md.push_str("### Item analysis\n\n");
        md.push_str("| Question | Correct | Students | Percent |\n");
        md.push_str("|----------|---------|----------|---------|\n");
        for q in &self.questions {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} |",
                q.question, q.count_correct, q.total, q.percent
            );
        }

        md
    }

    /// Compare this report against a baseline, target by target.
    ///
    /// `threshold` is in percentage points: a change of more than
    /// `threshold` points in either direction counts as a decline or an
    /// improvement. Targets are matched by name.
    pub fn compare(&self, baseline: &AnalysisReport, threshold: f64) -> ComparisonReport {
        let baseline_percents: HashMap<&str, f64> = baseline
            .targets
            .iter()
            .map(|t| (t.name.as_str(), t.percent.value()))
            .collect();

        let mut declines = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_targets = 0usize;

        for t in &self.targets {
            let current = t.percent.value();
            let Some(&baseline_percent) = baseline_percents.get(t.name.as_str()) else {
                new_targets += 1;
                continue;
            };
            let change = TargetChange {
                target: t.name.clone(),
                baseline_percent,
                current_percent: current,
                delta: current - baseline_percent,
            };
            if change.delta < -threshold {
                declines.push(change);
            } else if change.delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_targets = baseline
            .targets
            .iter()
            .filter(|b| !self.targets.iter().any(|t| t.name == b.name))
            .count();

        ComparisonReport {
            declines,
            improvements,
            unchanged,
            new_targets,
            removed_targets,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Targets whose mastery rate went down.
    pub declines: Vec<TargetChange>,
    /// Targets whose mastery rate went up.
    pub improvements: Vec<TargetChange>,
    /// Targets with no significant change.
    pub unchanged: usize,
    /// Targets in current but not baseline.
    pub new_targets: usize,
    /// Targets in baseline but not current.
    pub removed_targets: usize,
}

/// A target whose mastery rate moved past the comparison threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetChange {
    pub target: String,
    pub baseline_percent: f64,
    pub current_percent: f64,
    /// Percentage points, current minus baseline.
    pub delta: f64,
}

impl ComparisonReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        let _ = writeln!(
            md,
            "**Summary:** {} declines, {} improvements, {} unchanged, {} new, {} removed\n",
            self.declines.len(),
            self.improvements.len(),
            self.unchanged,
            self.new_targets,
            self.removed_targets
        );

        for (title, changes) in [
            ("Declines", &self.declines),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            let _ = writeln!(md, "### {title}\n");
            md.push_str("| Target | Baseline | Current | Delta |\n");
            md.push_str("|--------|----------|---------|-------|\n");
            for c in changes {
                let _ = writeln!(
                    md,
                    "| {} | {:.1}% | {:.1}% | {:+.1} pts |",
                    c.target, c.baseline_percent, c.current_percent, c.delta
                );
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if any target declined.
    pub fn has_declines(&self) -> bool {
        !self.declines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Percent;

    fn target(name: &str, count: usize, total: usize) -> TargetResult {
        TargetResult {
            name: name.into(),
            threshold: 1,
            question_count: 2,
            count,
            total,
            percent: Percent::of(count, total).unwrap(),
        }
    }

    fn make_report(targets: Vec<TargetResult>) -> AnalysisReport {
        AnalysisReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            dataset: DatasetSummary {
                name: "Unit 3 quiz".into(),
                students: 10,
                questions: 2,
            },
            targets,
            questions: vec![QuestionResult {
                question: "Q1".into(),
                count_correct: 7,
                total: 10,
                percent: Percent::of(7, 10).unwrap(),
            }],
        }
    }

    #[test]
    fn compare_identical_reports() {
        let baseline = make_report(vec![target("Causation", 6, 10)]);
        let current = make_report(vec![target("Causation", 6, 10)]);

        let report = current.compare(&baseline, 5.0);
        assert!(report.declines.is_empty());
        assert!(report.improvements.is_empty());
        assert_eq!(report.unchanged, 1);
    }

    #[test]
    fn compare_with_decline_and_improvement() {
        let baseline = make_report(vec![target("Causation", 8, 10), target("Sourcing", 2, 10)]);
        let current = make_report(vec![target("Causation", 5, 10), target("Sourcing", 9, 10)]);

        let report = current.compare(&baseline, 5.0);
        assert_eq!(report.declines.len(), 1);
        assert_eq!(report.declines[0].target, "Causation");
        assert!((report.declines[0].delta + 30.0).abs() < 1e-9);
        assert_eq!(report.improvements.len(), 1);
        assert!(report.has_declines());
    }

    #[test]
    fn change_within_threshold_is_unchanged() {
        let baseline = make_report(vec![target("Causation", 6, 10)]);
        let current = make_report(vec![target("Causation", 58, 100)]);
        let report = current.compare(&baseline, 5.0);
        assert_eq!(report.unchanged, 1);
        assert!(!report.has_declines());
    }

    #[test]
    fn compare_with_new_and_removed() {
        let baseline = make_report(vec![target("Old", 1, 10)]);
        let current = make_report(vec![target("New", 1, 10)]);

        let report = current.compare(&baseline, 5.0);
        assert_eq!(report.new_targets, 1);
        assert_eq!(report.removed_targets, 1);
        assert!(report
            .to_markdown()
            .contains("0 declines, 0 improvements, 0 unchanged, 1 new, 1 removed"));
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(vec![target("Causation", 2, 3)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        report.save_json(&path).unwrap();
        let loaded = AnalysisReport::load_json(&path).unwrap();

        assert_eq!(loaded.dataset.name, "Unit 3 quiz");
        assert_eq!(loaded.targets[0].percent.to_string(), "66.7%");
    }

    #[test]
    fn report_markdown_lists_targets_and_questions() {
        let md = make_report(vec![target("Causation", 2, 3)]).to_markdown();
        assert!(md.contains("| Causation | 1/2 | 2 | 3 | 66.7% |"));
        assert!(md.contains("| Q1 | 7 | 10 | 70.0% |"));
    }

    #[test]
    fn comparison_markdown() {
        let baseline = make_report(vec![target("Causation", 8, 10)]);
        let current = make_report(vec![target("Causation", 5, 10)]);

        let md = current.compare(&baseline, 5.0).to_markdown();
        assert!(md.contains("Declines"));
        assert!(md.contains("Causation"));
        assert!(md.contains("-30.0 pts"));
    }
}
