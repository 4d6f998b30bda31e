//! CSV dataset loading.
//!
//! Reads a quiz export (header row + one row per student) into a
//! [`RawDataset`]. Parsing is deliberately lenient: short rows are allowed
//! and empty cells become missing values.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::RawDataset;

/// Load a CSV file from disk.
pub fn load_csv(path: &Path) -> Result<RawDataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open dataset: {}", path.display()))?;
    read_csv(file).with_context(|| format!("failed to load dataset: {}", path.display()))
}

/// Read CSV from any reader (useful for testing).
pub fn read_csv<R: Read>(reader: R) -> Result<RawDataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV header row")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (row_no, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("CSV row {}", row_no + 1))?;
        if record.len() > columns.len() {
            tracing::warn!(
                row = row_no + 1,
                extra = record.len() - columns.len(),
                "ignoring cells beyond the header row"
            );
        }
        rows.push(
            record
                .iter()
                .take(columns.len())
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect(),
        );
    }

    tracing::debug!(columns = columns.len(), rows = rows.len(), "loaded CSV dataset");
    Ok(RawDataset::new(columns, rows)?)
}
