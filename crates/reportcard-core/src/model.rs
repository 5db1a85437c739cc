//! Core data model types for reportcard.
//!
//! These mirror the JSON datasets produced by the upstream assessment
//! platform. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::timestamp::{self, Timestamp};

/// A student enrolled on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub year_level: u32,
}

impl Student {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A single assessment question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// The question text shown to the student.
    pub stem: String,
    /// Question type, e.g. "multiple-choice".
    #[serde(rename = "type")]
    pub kind: String,
    /// Subject category used to group diagnostic results.
    pub strand: String,
    pub config: QuestionConfig,
}

impl Question {
    /// Whether `response` (an option id) is the keyed answer.
    pub fn is_correct(&self, response: &str) -> bool {
        self.config.key == response
    }

    /// Look up one of this question's options by id.
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.config.options.iter().find(|o| o.id == option_id)
    }

    /// The keyed option, if the key names one of the options.
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.option(&self.config.key)
    }
}

/// Options, answer key, and hint for a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionConfig {
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    /// Id of the correct option.
    pub key: String,
    /// Remediation hint shown alongside a wrong answer.
    #[serde(default)]
    pub hint: String,
}

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub label: String,
    pub value: String,
}

/// An assessment: a named, ordered list of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub questions: Vec<AssessmentQuestion>,
}

/// Reference from an assessment to one of its questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentQuestion {
    pub question_id: String,
    pub position: u32,
}

/// One attempt by one student at one assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: String,
    pub assessment_id: String,
    /// Kept as free text; no report orders by it.
    #[serde(default)]
    pub assigned: String,
    #[serde(default)]
    pub started: String,
    /// Absent while the attempt is still in progress.
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub completed: Option<Timestamp>,
    pub student: StudentRef,
    #[serde(default)]
    pub responses: Vec<Answer>,
    pub results: AttemptResults,
}

impl StudentResponse {
    pub fn is_completed(&self) -> bool {
        self.completed.is_some()
    }

    /// Number of questions answered in this attempt.
    pub fn answered(&self) -> usize {
        self.responses.len()
    }
}

/// The student an attempt belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub id: String,
    pub year_level: u32,
}

/// The option a student chose for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    /// Id of the chosen option.
    pub response: String,
}

/// Scoring summary computed upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResults {
    /// Count of correct answers.
    pub raw_score: u32,
}

/// Which report to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Diagnostic,
    Progress,
    Feedback,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Diagnostic => write!(f, "diagnostic"),
            ReportKind::Progress => write!(f, "progress"),
            ReportKind::Feedback => write!(f, "feedback"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "diagnostic" => Ok(ReportKind::Diagnostic),
            "2" | "progress" => Ok(ReportKind::Progress),
            "3" | "feedback" => Ok(ReportKind::Feedback),
            other => Err(format!("unknown report type: {other}")),
        }
    }
}
