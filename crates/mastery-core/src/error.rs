//! Analysis error types.
//!
//! Every variant is recoverable by the caller: the core signals the
//! condition and the front end decides how to phrase it for the user.
//! I/O-facing code wraps these in `anyhow` so they can still be
//! downcast for classification.

use thiserror::Error;

/// Errors raised by column classification, the target registry, and the
/// mastery engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No column header ends with the configured score suffix.
    #[error(
        "no score columns found: no column name ends with {suffix:?} \
         (check the export settings or pass a different --suffix)"
    )]
    NoScoreColumnsFound { suffix: String },

    /// Two columns in the dataset share a header.
    #[error("duplicate column name in dataset: {0:?}")]
    DuplicateColumn(String),

    /// A binary table row does not have one cell per question.
    #[error("binary table row {row} has {found} cells, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A binary table cell holds something other than 0 or 1.
    #[error("binary table row {row}, question {question:?}: cell is not 0 or 1")]
    NonBinaryCell { row: usize, question: String },

    /// A target with this name is already registered.
    #[error("a learning target named {0:?} already exists")]
    DuplicateTargetName(String),

    /// A target name was empty or whitespace only.
    #[error("learning target name must not be empty")]
    EmptyTargetName,

    /// A target was created without any questions.
    #[error("learning target {0:?} must include at least one question")]
    EmptyQuestionSet(String),

    /// The threshold is not in `1..=question_count`.
    #[error(
        "threshold {threshold} for learning target {name:?} must be between 1 and {question_count}"
    )]
    ThresholdOutOfRange {
        name: String,
        threshold: usize,
        question_count: usize,
    },

    /// No target with this name is registered.
    #[error("learning target not found: {0:?}")]
    TargetNotFound(String),

    /// A target references a question the binary table does not have.
    #[error("learning target {target:?} references unknown question {question:?}")]
    UnknownQuestion { target: String, question: String },

    /// A percentage was requested over zero students.
    #[error("no student data: the dataset has no rows to compute percentages over")]
    NoStudentData,

    /// Analysis was requested before any dataset was loaded into the session.
    #[error("no dataset loaded")]
    NoDatasetLoaded,
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
