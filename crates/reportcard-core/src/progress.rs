//! Progress report: every completed attempt of a student, in dataset order.

use serde::{Deserialize, Serialize};

use crate::dataset::{CompletedAttempt, Dataset};
use crate::error::{ReportError, ReportResult};
use crate::timestamp::Timestamp;

/// Result of a progress report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub student_id: String,
    pub student_name: String,
    /// Assessment of the first completed attempt.
    pub assessment_id: String,
    /// Distinct assessment ids across all attempts, first-seen order.
    pub assessment_ids: Vec<String>,
    /// Completed attempts in dataset order.
    pub entries: Vec<ProgressEntry>,
    /// Raw score of the last attempt minus raw score of the first.
    pub improvement: i64,
}

/// One completed attempt in a progress history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub assessment_id: String,
    pub completed: Timestamp,
    pub raw_score: u32,
    pub answered: usize,
}

/// The attempts at a single assessment, split out of a mixed history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentHistory {
    pub assessment_id: String,
    pub entries: Vec<ProgressEntry>,
    pub improvement: i64,
}

impl ProgressReport {
    /// Number of completed attempts.
    pub fn times_completed(&self) -> usize {
        self.entries.len()
    }

    /// Whether every attempt was at the same assessment.
    pub fn is_single_assessment(&self) -> bool {
        self.assessment_ids.len() <= 1
    }

    /// Split the history per assessment, in first-seen order.
    pub fn by_assessment(&self) -> Vec<AssessmentHistory> {
        self.assessment_ids
            .iter()
            .map(|id| {
                let entries: Vec<ProgressEntry> = self
                    .entries
                    .iter()
                    .filter(|e| &e.assessment_id == id)
                    .cloned()
                    .collect();
                AssessmentHistory {
                    assessment_id: id.clone(),
                    improvement: improvement(&entries),
                    entries,
                }
            })
            .collect()
    }
}

fn improvement(entries: &[ProgressEntry]) -> i64 {
    match (entries.first(), entries.last()) {
        (Some(first), Some(last)) => i64::from(last.raw_score) - i64::from(first.raw_score),
        _ => 0,
    }
}

fn entry(attempt: &CompletedAttempt<'_>) -> ProgressEntry {
    ProgressEntry {
        assessment_id: attempt.response.assessment_id.clone(),
        completed: attempt.completed.clone(),
        raw_score: attempt.response.results.raw_score,
        answered: attempt.response.answered(),
    }
}

/// Generate the progress report for a student.
///
/// Attempts are kept in the order they appear in the dataset; they are not
/// re-sorted by completion time.
pub fn generate(dataset: &Dataset, student_id: &str) -> ReportResult<ProgressReport> {
    let student = dataset.student(student_id)?;
    let attempts = dataset.completed_attempts(student_id);

    let Some(first) = attempts.first() else {
        return Err(ReportError::NoCompletedAttempts {
            student_id: student_id.to_string(),
        });
    };

    let entries: Vec<ProgressEntry> = attempts.iter().map(entry).collect();

    let mut assessment_ids: Vec<String> = Vec::new();
    for e in &entries {
        if !assessment_ids.contains(&e.assessment_id) {
            assessment_ids.push(e.assessment_id.clone());
        }
    }

    if assessment_ids.len() > 1 {
        tracing::warn!(
            student = student_id,
            assessments = ?assessment_ids,
            "completed attempts span more than one assessment"
        );
    }

    Ok(ProgressReport {
        student_id: student.id.clone(),
        student_name: student.full_name(),
        assessment_id: first.response.assessment_id.clone(),
        assessment_ids,
        improvement: improvement(&entries),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::*;

    fn history(scores: &[(&str, &str, u32)]) -> Dataset {
        let mut ds = tony("option2", 1);
        ds.responses = scores
            .iter()
            .enumerate()
            .map(|(i, (assessment, completed, raw))| {
                attempt(
                    &format!("r{i}"),
                    "student1",
                    assessment,
                    Some(*completed),
                    &[("numeracy1", "option2"), ("numeracy1", "option1")],
                    *raw,
                )
            })
            .collect();
        ds
    }

    #[test]
    fn single_attempt_has_zero_improvement() {
        let ds = tony("option2", 1);
        let report = generate(&ds, "student1").unwrap();
        assert_eq!(report.student_name, "Tony Stark");
        assert_eq!(report.assessment_id, "assessment1");
        assert_eq!(report.times_completed(), 1);
        assert_eq!(report.entries[0].completed.as_str(), "2021-12-16");
        assert_eq!(report.entries[0].raw_score, 1);
        assert_eq!(report.entries[0].answered, 1);
        assert_eq!(report.improvement, 0);
        assert!(report.is_single_assessment());
    }

    #[test]
    fn improvement_is_last_minus_first() {
        let ds = history(&[
            ("assessment1", "2021-01-01", 1),
            ("assessment1", "2021-06-01", 2),
            ("assessment1", "2021-12-01", 3),
        ]);
        let report = generate(&ds, "student1").unwrap();
        assert_eq!(report.improvement, 2);
        assert_eq!(report.times_completed(), 3);
    }

    #[test]
    fn regression_is_negative() {
        let ds = history(&[
            ("assessment1", "2021-01-01", 5),
            ("assessment1", "2021-12-01", 2),
        ]);
        assert_eq!(generate(&ds, "student1").unwrap().improvement, -3);
    }

    #[test]
    fn keeps_dataset_order_instead_of_sorting() {
        let ds = history(&[
            ("assessment1", "2021-12-01", 4),
            ("assessment1", "2021-01-01", 1),
        ]);
        let report = generate(&ds, "student1").unwrap();
        let dates: Vec<&str> = report.entries.iter().map(|e| e.completed.as_str()).collect();
        assert_eq!(dates, vec!["2021-12-01", "2021-01-01"]);
        assert_eq!(report.improvement, -3);
    }

    #[test]
    fn in_progress_attempts_are_excluded() {
        let mut ds = history(&[("assessment1", "2021-01-01", 1)]);
        ds.responses
            .push(attempt("open", "student1", "assessment1", None, &[], 9));
        let report = generate(&ds, "student1").unwrap();
        assert_eq!(report.times_completed(), 1);
        assert_eq!(report.improvement, 0);
    }

    #[test]
    fn no_completed_attempts() {
        let mut ds = tony("option2", 1);
        ds.responses[0].completed = None;
        assert!(matches!(
            generate(&ds, "student1"),
            Err(ReportError::NoCompletedAttempts { .. })
        ));
    }

    #[test]
    fn unknown_student() {
        let ds = tony("option2", 1);
        assert!(matches!(
            generate(&ds, "student9"),
            Err(ReportError::StudentNotFound(_))
        ));
    }

    #[test]
    fn mixed_assessments_are_flagged_and_split() {
        let ds = history(&[
            ("assessment1", "2021-01-01", 1),
            ("assessment2", "2021-02-01", 7),
            ("assessment1", "2021-03-01", 4),
        ]);
        let report = generate(&ds, "student1").unwrap();
        assert!(!report.is_single_assessment());
        assert_eq!(report.assessment_id, "assessment1");
        assert_eq!(report.assessment_ids, vec!["assessment1", "assessment2"]);
        assert_eq!(report.improvement, 3);

        let split = report.by_assessment();
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].assessment_id, "assessment1");
        assert_eq!(split[0].entries.len(), 2);
        assert_eq!(split[0].improvement, 3);
        assert_eq!(split[1].entries.len(), 1);
        assert_eq!(split[1].improvement, 0);
    }
}
