//! Report engine error types.
//!
//! These are the recoverable outcomes of a report request. Each maps to a
//! single user-facing line; none of them abort the process.

use thiserror::Error;

use crate::model::ReportKind;

/// Errors that can occur while computing a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The requested student id is not in the student dataset.
    #[error("student not found: {0}")]
    StudentNotFound(String),

    /// The student exists but has no completed attempts.
    #[error("no completed attempts for student {student_id}")]
    NoCompletedAttempts { student_id: String },

    /// An answer references a question id that is not in the question dataset.
    #[error("question not found: {question_id}")]
    QuestionNotFound { question_id: String },
}

pub type ReportResult<T> = Result<T, ReportError>;

impl ReportError {
    /// The line printed to the console for this error.
    ///
    /// The progress report words the no-data case differently from the other
    /// two reports.
    pub fn user_message(&self, kind: ReportKind) -> String {
        match self {
            ReportError::StudentNotFound(_) => "Student not found.".to_string(),
            ReportError::NoCompletedAttempts { .. } => match kind {
                ReportKind::Progress => "No assessments found for this student.".to_string(),
                ReportKind::Diagnostic | ReportKind::Feedback => {
                    "No completed assessments found for this student.".to_string()
                }
            },
            ReportError::QuestionNotFound { question_id } => {
                format!("Question {question_id} referenced by the response was not found.")
            }
        }
    }
}
