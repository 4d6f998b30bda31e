//! Score column identification.
//!
//! Assessment exports mix metadata columns (name, email, timestamp) with one
//! score column per question. Score columns are recognised by a header
//! suffix, `" [Score]"` unless configured otherwise.

use crate::error::{AnalysisError, Result};

/// Header suffix used by common quiz exports to mark score columns.
pub const DEFAULT_SCORE_SUFFIX: &str = " [Score]";

/// The predicate that decides whether a column holds question scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSuffix(String);

impl ScoreSuffix {
    /// Create a suffix matcher. An empty suffix would match every column, so
    /// it is refused.
    pub fn new(suffix: impl Into<String>) -> Option<Self> {
        let suffix = suffix.into();
        if suffix.is_empty() {
            None
        } else {
            Some(Self(suffix))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `column` is a score column.
    pub fn matches(&self, column: &str) -> bool {
        column.ends_with(&self.0)
    }

    /// The question name for a score column, or `None` for metadata columns.
    pub fn question_name<'a>(&self, column: &'a str) -> Option<&'a str> {
        column.strip_suffix(self.0.as_str())
    }
}

impl Default for ScoreSuffix {
    fn default() -> Self {
        Self(DEFAULT_SCORE_SUFFIX.to_string())
    }
}

/// A score column located in a dataset header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreColumn {
    /// Position in the dataset header.
    pub index: usize,
    /// Full header text, suffix included.
    pub header: String,
    /// Header with the suffix removed.
    pub question: String,
}

/// Find the score columns in `columns`, left to right.
///
/// Fails with [`AnalysisError::NoScoreColumnsFound`] when none match; an
/// export without score columns is a user error, not an empty analysis.
pub fn classify_columns<S: AsRef<str>>(
    columns: &[S],
    suffix: &ScoreSuffix,
) -> Result<Vec<ScoreColumn>> {
    let found: Vec<ScoreColumn> = columns
        .iter()
        .enumerate()
        .filter_map(|(index, header)| {
            let header = header.as_ref();
            suffix.question_name(header).map(|question| ScoreColumn {
                index,
                header: header.to_string(),
                question: question.to_string(),
            })
        })
        .collect();

    if found.is_empty() {
        return Err(AnalysisError::NoScoreColumnsFound {
            suffix: suffix.as_str().to_string(),
        });
    }

    tracing::debug!(
        score_columns = found.len(),
        metadata_columns = columns.len() - found.len(),
        "classified dataset columns"
    );
    Ok(found)
}

/// Question names for the score columns in `columns`, left to right.
pub fn identify_score_columns<S: AsRef<str>>(
    columns: &[S],
    suffix: &ScoreSuffix,
) -> Result<Vec<String>> {
    Ok(classify_columns(columns, suffix)?
        .into_iter()
        .map(|c| c.question)
        .collect())
}
