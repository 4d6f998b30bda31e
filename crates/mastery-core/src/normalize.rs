//! Binary normalization of raw score cells.
//!
//! Quiz exports write scores as `"<earned> / <possible>"`. A question counts
//! as correct only when full credit on a one-point scale was recorded, which
//! in practice means the cell starts with `1.00`. Anything else, including
//! blanks and placeholders, is incorrect.

use crate::classifier::ScoreColumn;
use crate::model::{BinaryTable, RawDataset};

/// Prefix that marks a correct answer.
pub const CORRECT_PREFIX: &str = "1.00";

/// Reduce one raw cell to 0 or 1.
pub fn normalize_cell(raw: Option<&str>) -> u8 {
    match raw {
        Some(value) if value.trim().starts_with(CORRECT_PREFIX) => 1,
        _ => 0,
    }
}

/// Build the binary table for `score_columns`, one row per dataset row in
/// the same order.
pub fn normalize(raw: &RawDataset, score_columns: &[ScoreColumn]) -> BinaryTable {
    let questions = score_columns.iter().map(|c| c.question.clone()).collect();
    let rows = (0..raw.row_count())
        .map(|row| {
            score_columns
                .iter()
                .map(|col| normalize_cell(raw.cell(row, col.index)))
                .collect()
        })
        .collect();

    tracing::debug!(
        students = raw.row_count(),
        questions = score_columns.len(),
        "normalized score columns"
    );
    BinaryTable::from_normalized(questions, rows)
}
