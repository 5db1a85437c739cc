//! Diagnostic report: the most recent completed attempt, broken down by strand.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::ReportResult;
use crate::timestamp::Timestamp;

/// Result of a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub student_id: String,
    pub first_name: String,
    pub student_name: String,
    pub assessment_id: String,
    pub completed: Timestamp,
    /// Answers matching their question's key, recomputed locally.
    pub total_correct: usize,
    pub total_answered: usize,
    /// Raw score as recorded by the upstream scoring system.
    pub raw_score: u32,
    /// One entry per strand in the question set, in first-seen order.
    pub strands: Vec<StrandScore>,
}

/// Correct and answered counts for one strand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrandScore {
    pub strand: String,
    pub correct: usize,
    pub total: usize,
}

impl DiagnosticReport {
    /// `Some((recorded, recomputed))` when the upstream raw score disagrees
    /// with the locally recomputed correct count.
    pub fn score_drift(&self) -> Option<(u32, usize)> {
        (self.raw_score as usize != self.total_correct)
            .then_some((self.raw_score, self.total_correct))
    }
}

/// Generate the diagnostic report for a student.
///
/// Every answer in the selected attempt must reference a known question;
/// a dangling reference fails the whole report.
pub fn generate(dataset: &Dataset, student_id: &str) -> ReportResult<DiagnosticReport> {
    let student = dataset.student(student_id)?;
    let latest = dataset.latest_completed(student_id)?;
    let attempt = latest.response;

    tracing::debug!(
        student = student_id,
        attempt = %attempt.id,
        "diagnostic report using latest completed attempt"
    );

    let marked = attempt
        .responses
        .iter()
        .map(|answer| {
            let question = dataset.question(&answer.question_id)?;
            Ok((question.strand.as_str(), question.is_correct(&answer.response)))
        })
        .collect::<ReportResult<Vec<_>>>()?;

    let total_correct = marked.iter().filter(|(_, correct)| *correct).count();

    let strands = dataset
        .strands()
        .into_iter()
        .map(|strand| {
            let in_strand: Vec<bool> = marked
                .iter()
                .filter(|(s, _)| *s == strand)
                .map(|(_, correct)| *correct)
                .collect();
            StrandScore {
                strand: strand.to_string(),
                correct: in_strand.iter().filter(|c| **c).count(),
                total: in_strand.len(),
            }
        })
        .collect();

    let report = DiagnosticReport {
        student_id: student.id.clone(),
        first_name: student.first_name.clone(),
        student_name: student.full_name(),
        assessment_id: attempt.assessment_id.clone(),
        completed: latest.completed.clone(),
        total_correct,
        total_answered: marked.len(),
        raw_score: attempt.results.raw_score,
        strands,
    };

    if let Some((recorded, recomputed)) = report.score_drift() {
        tracing::warn!(
            attempt = %attempt.id,
            recorded,
            recomputed,
            "recorded raw score disagrees with recomputed correct count"
        );
    }

    Ok(report)
}
