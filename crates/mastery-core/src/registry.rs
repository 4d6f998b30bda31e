//! Learning target registry.
//!
//! Targets are created and removed only by explicit calls. Iteration order
//! is insertion order, and results downstream are reported in that order.

use crate::error::{AnalysisError, Result};
use crate::model::LearningTarget;

/// The user's learning targets for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetRegistry {
    targets: Vec<LearningTarget>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target.
    ///
    /// Checks run in order: blank name, duplicate name, empty question set,
    /// threshold outside `1..=questions`. A question may belong to any
    /// number of targets.
    pub fn add<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        questions: impl IntoIterator<Item = S>,
        threshold: usize,
    ) -> Result<&LearningTarget> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AnalysisError::EmptyTargetName);
        }
        if self.get(&name).is_some() {
            return Err(AnalysisError::DuplicateTargetName(name));
        }

        let target = LearningTarget::new(name, questions, threshold)?;
        tracing::debug!(
            target = target.name(),
            questions = target.questions().len(),
            threshold = target.threshold(),
            "registered learning target"
        );
        self.targets.push(target);
        Ok(&self.targets[self.targets.len() - 1])
    }

    /// Remove and return the target called `name`.
    pub fn remove(&mut self, name: &str) -> Result<LearningTarget> {
        let pos = self
            .targets
            .iter()
            .position(|t| t.name() == name)
            .ok_or_else(|| AnalysisError::TargetNotFound(name.to_string()))?;
        Ok(self.targets.remove(pos))
    }

    /// All targets in insertion order.
    pub fn list(&self) -> &[LearningTarget] {
        &self.targets
    }

    pub fn get(&self, name: &str) -> Option<&LearningTarget> {
        self.targets.iter().find(|t| t.name() == name)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
