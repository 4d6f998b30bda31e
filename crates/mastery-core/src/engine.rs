//! Mastery engine.
//!
//! Two independent, pure computations over a [`BinaryTable`]:
//!
//! - per-target mastery: how many students answered at least `threshold`
//!   of a target's questions correctly;
//! - per-question analysis (item analysis): how many students answered each
//!   question correctly.
//!
//! Nothing is cached. Callers recompute whenever the table or the targets
//! change.

use crate::error::{AnalysisError, Result};
use crate::model::{BinaryTable, LearningTarget, Percent, QuestionResult, TargetResult};

/// Resolve a target's questions to column positions in `table`.
fn resolve_columns(table: &BinaryTable, target: &LearningTarget) -> Result<Vec<usize>> {
    target
        .questions()
        .iter()
        .map(|q| {
            table
                .question_index(q)
                .ok_or_else(|| AnalysisError::UnknownQuestion {
                    target: target.name().to_string(),
                    question: q.clone(),
                })
        })
        .collect()
}

/// Per-student correct-answer counts across the target's questions, in row
/// order. Each value is in `0..=target.questions().len()`.
pub fn student_scores(table: &BinaryTable, target: &LearningTarget) -> Result<Vec<usize>> {
    let columns = resolve_columns(table, target)?;
    Ok(table
        .rows()
        .iter()
        .map(|row| columns.iter().map(|&c| usize::from(row[c])).sum::<usize>())
        .collect())
}

/// Mastery for a single target.
pub fn target_mastery(table: &BinaryTable, target: &LearningTarget) -> Result<TargetResult> {
    let scores = student_scores(table, target)?;
    let total = table.row_count();
    let count = scores.iter().filter(|&&s| s >= target.threshold()).count();

    Ok(TargetResult {
        name: target.name().to_string(),
        threshold: target.threshold(),
        question_count: target.questions().len(),
        count,
        total,
        percent: Percent::of(count, total)?,
    })
}

/// Mastery for every target, in the order given.
///
/// Fails as a whole on the first target that references an unknown question
/// or when the table has no rows. An empty target list is not an error.
pub fn compute_mastery(
    table: &BinaryTable,
    targets: &[LearningTarget],
) -> Result<Vec<TargetResult>> {
    targets.iter().map(|t| target_mastery(table, t)).collect()
}

/// Success rate for every question, in column order.
pub fn compute_question_stats(table: &BinaryTable) -> Result<Vec<QuestionResult>> {
    let total = table.row_count();
    table
        .questions()
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let count_correct: usize = table.column(i).map(usize::from).sum();
            Ok(QuestionResult {
                question: question.clone(),
                count_correct,
                total,
                percent: Percent::of(count_correct, total)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<u8>>) -> BinaryTable {
        BinaryTable::new(vec!["Q1".into(), "Q2".into(), "Q3".into()], rows).unwrap()
    }

    fn sample() -> BinaryTable {
        table(vec![vec![1, 0, 1], vec![1, 1, 0], vec![0, 0, 0]])
    }

    #[test]
    fn target_mastery_counts_students_at_threshold() {
        let target = LearningTarget::new("All", ["Q1", "Q2", "Q3"], 2).unwrap();
        assert_eq!(student_scores(&sample(), &target).unwrap(), vec![2, 2, 0]);

        let results = compute_mastery(&sample(), &[target]).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].count, 2);
        assert_eq!(results[0].total, 3);
        assert_eq!(results[0].percent.to_string(), "66.7%");
    }

    #[test]
    fn question_stats_in_column_order() {
        let stats = compute_question_stats(&sample()).unwrap();
        let summary: Vec<(&str, usize, String)> = stats
            .iter()
            .map(|s| (s.question.as_str(), s.count_correct, s.percent.to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Q1", 2, "66.7%".to_string()),
                ("Q2", 1, "33.3%".to_string()),
                ("Q3", 1, "33.3%".to_string()),
            ]
        );
        assert!(stats.iter().all(|s| s.total == 3));
    }

    #[test]
    fn empty_target_list_is_empty_result() {
        assert!(compute_mastery(&sample(), &[]).unwrap().is_empty());
        assert!(compute_mastery(&table(vec![]), &[]).unwrap().is_empty());
    }

    #[test]
    fn zero_rows_is_no_student_data() {
        let target = LearningTarget::new("All", ["Q1", "Q2"], 1).unwrap();
        assert_eq!(
            compute_mastery(&table(vec![]), &[target]).unwrap_err(),
            AnalysisError::NoStudentData
        );
        assert_eq!(
            compute_question_stats(&table(vec![])).unwrap_err(),
            AnalysisError::NoStudentData
        );
    }

    #[test]
    fn unknown_question_fails_whole_computation() {
        let good = LearningTarget::new("Good", ["Q1"], 1).unwrap();
        let bad = LearningTarget::new("Bad", ["Q1", "Q9"], 1).unwrap();
        let err = compute_mastery(&sample(), &[good, bad]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::UnknownQuestion {
                target: "Bad".into(),
                question: "Q9".into()
            }
        );
    }

    #[test]
    fn results_follow_target_order() {
        let targets = vec![
            LearningTarget::new("Third", ["Q3"], 1).unwrap(),
            LearningTarget::new("First", ["Q1"], 1).unwrap(),
        ];
        let names: Vec<String> = compute_mastery(&sample(), &targets)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Third", "First"]);
    }

    #[test]
    fn count_never_increases_with_threshold() {
        let rows = vec![
            vec![1, 1, 1],
            vec![1, 1, 0],
            vec![1, 0, 0],
            vec![0, 0, 0],
            vec![0, 1, 1],
        ];
        let t = table(rows);
        let mut previous = usize::MAX;
        for threshold in 1..=3 {
            let target = LearningTarget::new("All", ["Q1", "Q2", "Q3"], threshold).unwrap();
            let result = target_mastery(&t, &target).unwrap();
            assert!(result.count <= result.total);
            assert!(result.count <= previous, "threshold {threshold}");
            previous = result.count;
        }
        assert_eq!(previous, 1);
    }

    #[test]
    fn overlapping_targets_are_independent() {
        let targets = vec![
            LearningTarget::new("A", ["Q1", "Q2"], 2).unwrap(),
            LearningTarget::new("B", ["Q2", "Q3"], 1).unwrap(),
        ];
        let results = compute_mastery(&sample(), &targets).unwrap();
        assert_eq!(results[0].count, 1);
        assert_eq!(results[1].count, 2);
    }

    #[test]
    fn subset_target_ignores_other_columns() {
        let target = LearningTarget::new("Q2 only", ["Q2"], 1).unwrap();
        let result = target_mastery(&sample(), &target).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.question_count, 1);
        assert_eq!(result.percent.to_string(), "33.3%");
    }
}
