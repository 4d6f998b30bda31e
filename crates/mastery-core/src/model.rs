//! Core data model types for mastery.
//!
//! These are the tables, targets, and result records that flow between
//! the classifier, the normalizer, the registry, and the mastery engine.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// A tabular assessment export: an ordered header row plus data rows of raw
/// string cells.
///
/// Cells are addressed by column position. A missing cell (empty in the
/// source file, or past the end of a short row) reads as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDataset {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawDataset {
    /// Build a dataset, rejecting duplicate column names.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(AnalysisError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Column names in their original left-to-right order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows (students).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The raw cell at `row` and column position `column`, if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }

    /// The raw cell at `row` in the column named `name`, if present.
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        self.column_index(name).and_then(|col| self.cell(row, col))
    }
}

/// Per-student binary correctness: one column per question, one row per
/// student, every cell 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTable {
    questions: Vec<String>,
    rows: Vec<Vec<u8>>,
}

impl BinaryTable {
    /// Build a table, checking that every row has one 0/1 cell per question.
    pub fn new(questions: Vec<String>, rows: Vec<Vec<u8>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != questions.len() {
                return Err(AnalysisError::RowWidthMismatch {
                    row: i,
                    expected: questions.len(),
                    found: row.len(),
                });
            }
            if let Some(col) = row.iter().position(|&v| v > 1) {
                return Err(AnalysisError::NonBinaryCell {
                    row: i,
                    question: questions[col].clone(),
                });
            }
        }
        Ok(Self { questions, rows })
    }

    /// Assemble a table from rows the normalizer has already produced.
    pub(crate) fn from_normalized(questions: Vec<String>, rows: Vec<Vec<u8>>) -> Self {
        Self { questions, rows }
    }

    /// Question names in column order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Number of student rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows in the same order as the source dataset.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Position of a question column by name.
    pub fn question_index(&self, question: &str) -> Option<usize> {
        self.questions.iter().position(|q| q == question)
    }

    /// Iterate the 0/1 values of one question column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().map(move |row| row[index])
    }
}

/// A named group of questions with a mastery threshold.
///
/// Constructed through [`LearningTarget::new`], which guarantees a non-empty
/// name, a non-empty question set with duplicates removed (first occurrence
/// wins), and a threshold in `1..=questions.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningTarget {
    name: String,
    questions: Vec<String>,
    threshold: usize,
}

impl LearningTarget {
    /// Validate and build a target. Name uniqueness is the registry's job.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        questions: impl IntoIterator<Item = S>,
        threshold: usize,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AnalysisError::EmptyTargetName);
        }

        let mut seen = HashSet::new();
        let questions: Vec<String> = questions
            .into_iter()
            .map(Into::<String>::into)
            .filter(|q| seen.insert(q.clone()))
            .collect();
        if questions.is_empty() {
            return Err(AnalysisError::EmptyQuestionSet(name));
        }

        if threshold == 0 || threshold > questions.len() {
            return Err(AnalysisError::ThresholdOutOfRange {
                name,
                threshold,
                question_count: questions.len(),
            });
        }

        Ok(Self {
            name,
            questions,
            threshold,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distinct member questions in first-seen order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Minimum number of correct answers that counts as mastery (inclusive).
    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

/// A percentage in `0.0..=100.0`.
///
/// Displays with one decimal place and a trailing `%` (`66.7%`); serializes
/// as the plain number so downstream tools can do their own formatting.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    /// `count / total * 100`, or `NoStudentData` when `total` is zero.
    pub fn of(count: usize, total: usize) -> Result<Self> {
        if total == 0 {
            return Err(AnalysisError::NoStudentData);
        }
        Ok(Self(count as f64 / total as f64 * 100.0))
    }

    /// The unrounded percentage.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// Mastery outcome for one learning target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetResult {
    /// Target name.
    pub name: String,
    /// Threshold the target was evaluated at.
    pub threshold: usize,
    /// Number of distinct questions in the target.
    pub question_count: usize,
    /// Students whose correct-answer count met the threshold.
    pub count: usize,
    /// All students in the table.
    pub total: usize,
    /// `count / total` as a percentage.
    pub percent: Percent,
}

/// Success rate for one question, independent of any target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    /// Question name (score column header without the suffix).
    pub question: String,
    /// Students who answered correctly.
    pub count_correct: usize,
    /// All students in the table.
    pub total: usize,
    /// `count_correct / total` as a percentage.
    pub percent: Percent,
}
