//! Feedback report: every wrong answer in the most recent completed attempt.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::ReportResult;
use crate::model::AnswerOption;
use crate::timestamp::Timestamp;

/// Result of a feedback report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub student_id: String,
    pub first_name: String,
    pub student_name: String,
    pub assessment_id: String,
    pub completed: Timestamp,
    /// Raw score as recorded by the upstream scoring system.
    pub raw_score: u32,
    pub answered: usize,
    /// Answers matching their question's key, recomputed locally.
    pub recomputed_correct: usize,
    /// One entry per wrong answer, in answer order.
    pub entries: Vec<FeedbackEntry>,
}

/// Feedback for one wrong answer.
///
/// `chosen` and `correct` are `None` when the option id does not name one of
/// the question's options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub question_id: String,
    pub stem: String,
    pub chosen: Option<AnswerOption>,
    pub correct: Option<AnswerOption>,
    pub hint: String,
}

impl FeedbackReport {
    /// `Some((recorded, recomputed))` when the upstream raw score disagrees
    /// with the locally recomputed correct count.
    pub fn score_drift(&self) -> Option<(u32, usize)> {
        (self.raw_score as usize != self.recomputed_correct)
            .then_some((self.raw_score, self.recomputed_correct))
    }
}

/// Generate the feedback report for a student.
pub fn generate(dataset: &Dataset, student_id: &str) -> ReportResult<FeedbackReport> {
    let student = dataset.student(student_id)?;
    let latest = dataset.latest_completed(student_id)?;
    let attempt = latest.response;

    tracing::debug!(
        student = student_id,
        attempt = %attempt.id,
        "feedback report using latest completed attempt"
    );

    let mut entries = Vec::new();
    for answer in &attempt.responses {
        let question = dataset.question(&answer.question_id)?;
        if question.is_correct(&answer.response) {
            continue;
        }

        let chosen = question.option(&answer.response).cloned();
        let correct = question.correct_option().cloned();
        if chosen.is_none() || correct.is_none() {
            tracing::debug!(
                question = %question.id,
                response = %answer.response,
                key = %question.config.key,
                "option lookup failed, feedback entry will show placeholders"
            );
        }

        entries.push(FeedbackEntry {
            question_id: question.id.clone(),
            stem: question.stem.clone(),
            chosen,
            correct,
            hint: question.config.hint.clone(),
        });
    }

    let report = FeedbackReport {
        student_id: student.id.clone(),
        first_name: student.first_name.clone(),
        student_name: student.full_name(),
        assessment_id: attempt.assessment_id.clone(),
        completed: latest.completed.clone(),
        raw_score: attempt.results.raw_score,
        answered: attempt.answered(),
        recomputed_correct: attempt.answered() - entries.len(),
        entries,
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
