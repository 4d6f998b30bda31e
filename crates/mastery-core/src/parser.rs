//! TOML learning target parser.
//!
//! Loads learning target definitions from a TOML file into a
//! [`TargetRegistry`], and checks them against a dataset.
//!
//! ```toml
//! [[targets]]
//! name = "Causation"
//! questions = ["Q1", "Q2", "Q3"]
//! threshold = 2
//! ```
//!
//! `threshold` may be omitted, in which case every question must be correct.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::BinaryTable;
use crate::registry::TargetRegistry;

/// Intermediate TOML structure for target files.
///
/// Entries stay untyped until each one is checked on its own, so errors can
/// name the target they come from.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTargetFile {
    #[serde(default)]
    targets: Vec<toml::Table>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTarget {
    name: String,
    #[serde(default)]
    questions: Vec<String>,
    #[serde(default)]
    threshold: Option<usize>,
}

/// Parse a target file from disk.
pub fn parse_targets(path: &Path) -> Result<TargetRegistry> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read target file: {}", path.display()))?;

    parse_targets_str(&content, path)
}

/// Parse target definitions from a TOML string.
///
/// Every target goes through [`TargetRegistry::add`], so duplicate names,
/// empty question lists, and out-of-range thresholds fail here with the
/// offending target named in the error context.
pub fn parse_targets_str(content: &str, source_path: &Path) -> Result<TargetRegistry> {
    let parsed: TomlTargetFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut registry = TargetRegistry::new();
    for (i, entry) in parsed.targets.into_iter().enumerate() {
        let label = entry
            .get("name")
            .and_then(toml::Value::as_str)
            .map(|name| format!("{name:?}"))
            .unwrap_or_else(|| "unnamed".to_string());
        let context =
            || format!("invalid target #{} ({label}) in {}", i + 1, source_path.display());

        let t = toml::Value::Table(entry)
            .try_into::<TomlTarget>()
            .with_context(context)?;
        let threshold = t
            .threshold
            .unwrap_or_else(|| t.questions.iter().collect::<HashSet<_>>().len());
        registry.add(t.name, t.questions, threshold).with_context(context)?;
    }

    Ok(registry)
}

/// A non-fatal finding from target validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The target the warning concerns, if any.
    pub target: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check targets against a binary table for common issues.
///
/// Unknown questions are reported here as warnings; the mastery engine
/// treats them as hard errors.
pub fn validate_targets(registry: &TargetRegistry, table: &BinaryTable) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let known: HashSet<&str> = table.questions().iter().map(String::as_str).collect();

    if table.row_count() == 0 {
        warnings.push(ValidationWarning {
            target: None,
            message: "dataset has no student rows".into(),
        });
    }

    if registry.is_empty() {
        warnings.push(ValidationWarning {
            target: None,
            message: "no learning targets defined".into(),
        });
    }

    // Questions missing from the dataset
    for target in registry.list() {
        for q in target.questions() {
            if !known.contains(q.as_str()) {
                warnings.push(ValidationWarning {
                    target: Some(target.name().to_string()),
                    message: format!("question {q:?} is not a score column in the dataset"),
                });
            }
        }
    }

    // All-or-nothing targets
    for target in registry.list() {
        let n = target.questions().len();
        if n > 1 && target.threshold() == n {
            warnings.push(ValidationWarning {
                target: Some(target.name().to_string()),
                message: format!("threshold requires all {n} questions correct"),
            });
        }
    }

    // Questions outside every target
    let covered: HashSet<&str> = registry
        .list()
        .iter()
        .flat_map(|t| t.questions().iter().map(String::as_str))
        .collect();
    for q in table.questions() {
        if !covered.contains(q.as_str()) {
            warnings.push(ValidationWarning {
                target: None,
                message: format!("question {q:?} is not part of any learning target"),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[[targets]]
name = "Causation"
questions = ["Q1", "Q2", "Q3"]
threshold = 2

[[targets]]
name = "Sourcing"
questions = ["Q3"]
threshold = 1
"#;

    fn table() -> BinaryTable {
        BinaryTable::new(
            vec!["Q1".into(), "Q2".into(), "Q3".into(), "Q4".into()],
            vec![vec![1, 0, 1, 0]],
        )
        .unwrap()
    }

    #[test]
    fn parse_valid_toml() {
        let reg = parse_targets_str(VALID_TOML, &PathBuf::from("targets.toml")).unwrap();
        assert_eq!(reg.len(), 2);
        let first = &reg.list()[0];
        assert_eq!(first.name(), "Causation");
        assert_eq!(first.questions(), ["Q1", "Q2", "Q3"]);
        assert_eq!(first.threshold(), 2);
    }

    #[test]
    fn missing_threshold_means_all_questions() {
        let toml = r#"
[[targets]]
name = "Everything"
questions = ["Q1", "Q2", "Q2"]
"#;
        let reg = parse_targets_str(toml, &PathBuf::from("targets.toml")).unwrap();
        assert_eq!(reg.list()[0].threshold(), 2);
    }

    #[test]
    fn empty_file_is_empty_registry() {
        let reg = parse_targets_str("", &PathBuf::from("targets.toml")).unwrap();
        assert!(reg.is_empty());
    }

    #[test]
    fn registry_errors_surface_with_context() {
        let toml = r#"
[[targets]]
name = "Causation"
questions = ["Q1"]
threshold = 3
"#;
        let err = parse_targets_str(toml, &PathBuf::from("targets.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("Causation"));
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::ThresholdOutOfRange { threshold: 3, .. })
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let toml = r#"
[[targets]]
name = "A"
questions = ["Q1"]

[[targets]]
name = "A"
questions = ["Q2"]
"#;
        let err = parse_targets_str(toml, &PathBuf::from("targets.toml")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::DuplicateTargetName("A".into()))
        );
    }

    #[test]
    fn empty_questions_rejected() {
        let toml = r#"
[[targets]]
name = "Nothing"
"#;
        let err = parse_targets_str(toml, &PathBuf::from("targets.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::EmptyQuestionSet(_))
        ));
    }

    #[test]
    fn misspelled_key_rejected() {
        let toml = r#"
[[targets]]
name = "Causation"
questions = ["Q1", "Q2", "Q3"]
treshold = 1
"#;
        let err = parse_targets_str(toml, &PathBuf::from("targets.toml")).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("invalid target #1 (\"Causation\")"), "{message}");
        assert!(message.contains("treshold"), "{message}");
    }

    #[test]
    fn unknown_top_level_key_rejected() {
        let toml = r#"
[[target]]
name = "Causation"
questions = ["Q1"]
"#;
        assert!(parse_targets_str(toml, &PathBuf::from("targets.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_targets_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_reports_unknown_and_uncovered() {
        let toml = r#"
[[targets]]
name = "Causation"
questions = ["Q1", "Q9"]
threshold = 1
"#;
        let reg = parse_targets_str(toml, &PathBuf::from("targets.toml")).unwrap();
        let warnings = validate_targets(&reg, &table());
        assert!(warnings
            .iter()
            .any(|w| w.target.as_deref() == Some("Causation") && w.message.contains("\"Q9\"")));
        assert!(warnings
            .iter()
            .any(|w| w.target.is_none() && w.message.contains("\"Q4\"")));
    }

    #[test]
    fn validate_flags_all_or_nothing_targets() {
        let toml = r#"
[[targets]]
name = "Strict"
questions = ["Q1", "Q2", "Q3", "Q4"]
"#;
        let reg = parse_targets_str(toml, &PathBuf::from("targets.toml")).unwrap();
        let warnings = validate_targets(&reg, &table());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("all 4 questions"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.toml");
        std::fs::write(&path, VALID_TOML).unwrap();
        assert_eq!(parse_targets(&path).unwrap().len(), 2);
    }
}
