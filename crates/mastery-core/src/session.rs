//! Session-scoped analysis context.
//!
//! A [`Session`] holds everything one user is working with: the score
//! suffix, the uploaded dataset with its derived binary table, and the
//! learning targets. Sessions share nothing, so independent sessions can be
//! driven from different threads without coordination.

use crate::classifier::{classify_columns, ScoreSuffix};
use crate::engine;
use crate::error::{AnalysisError, Result};
use crate::model::{BinaryTable, LearningTarget, QuestionResult, RawDataset, TargetResult};
use crate::normalize::normalize;
use crate::registry::TargetRegistry;
use crate::report::{AnalysisReport, DatasetSummary};

#[derive(Debug, Clone)]
struct LoadedDataset {
    name: String,
    raw: RawDataset,
    table: BinaryTable,
}

/// One user's dataset and learning targets.
#[derive(Debug, Clone, Default)]
pub struct Session {
    suffix: ScoreSuffix,
    dataset: Option<LoadedDataset>,
    registry: TargetRegistry,
}

impl Session {
    pub fn new(suffix: ScoreSuffix) -> Self {
        Self {
            suffix,
            dataset: None,
            registry: TargetRegistry::new(),
        }
    }

    /// Replace the current dataset and re-derive its binary table.
    ///
    /// On failure (no score columns) the previously loaded dataset stays in
    /// place. Targets are kept either way; ones that no longer match the
    /// new columns fail at analysis time.
    pub fn load_dataset(
        &mut self,
        name: impl Into<String>,
        raw: RawDataset,
    ) -> Result<&BinaryTable> {
        let columns = classify_columns(raw.columns(), &self.suffix)?;
        let table = normalize(&raw, &columns);
        let loaded = self.dataset.insert(LoadedDataset {
            name: name.into(),
            raw,
            table,
        });
        Ok(&loaded.table)
    }

    /// The raw dataset, including metadata columns.
    pub fn dataset(&self) -> Option<&RawDataset> {
        self.dataset.as_ref().map(|d| &d.raw)
    }

    pub fn table(&self) -> Option<&BinaryTable> {
        self.dataset.as_ref().map(|d| &d.table)
    }

    /// Question names available for target selection.
    pub fn questions(&self) -> &[String] {
        self.table().map(BinaryTable::questions).unwrap_or_default()
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Replace all learning targets at once (e.g. from a target file).
    pub fn set_targets(&mut self, registry: TargetRegistry) {
        self.registry = registry;
    }

    pub fn add_target<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        questions: impl IntoIterator<Item = S>,
        threshold: usize,
    ) -> Result<&LearningTarget> {
        self.registry.add(name, questions, threshold)
    }

    pub fn remove_target(&mut self, name: &str) -> Result<LearningTarget> {
        self.registry.remove(name)
    }

    fn loaded(&self) -> Result<&LoadedDataset> {
        self.dataset.as_ref().ok_or(AnalysisError::NoDatasetLoaded)
    }

    /// Mastery for every registered target, in registry order.
    pub fn compute_mastery(&self) -> Result<Vec<TargetResult>> {
        engine::compute_mastery(&self.loaded()?.table, self.registry.list())
    }

    /// Item analysis for every question, in column order.
    pub fn compute_question_stats(&self) -> Result<Vec<QuestionResult>> {
        engine::compute_question_stats(&self.loaded()?.table)
    }

    /// Run both computations and bundle them into a report.
    pub fn analyze(&self) -> Result<AnalysisReport> {
        let loaded = self.loaded()?;
        let targets = engine::compute_mastery(&loaded.table, self.registry.list())?;
        let questions = engine::compute_question_stats(&loaded.table)?;

        tracing::info!(
            dataset = %loaded.name,
            students = loaded.table.row_count(),
            targets = targets.len(),
            "analysis complete"
        );

        Ok(AnalysisReport::new(
            DatasetSummary {
                name: loaded.name.clone(),
                students: loaded.table.row_count(),
                questions: loaded.table.questions().len(),
            },
            targets,
            questions,
        ))
    }
}
