//! A generated report of any kind.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::diagnostic::{self, DiagnosticReport};
use crate::error::ReportResult;
use crate::feedback::{self, FeedbackReport};
use crate::model::ReportKind;
use crate::progress::{self, ProgressReport};

/// The structured result of one report request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Report {
    Diagnostic(DiagnosticReport),
    Progress(ProgressReport),
    Feedback(FeedbackReport),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Diagnostic(_) => ReportKind::Diagnostic,
            Report::Progress(_) => ReportKind::Progress,
            Report::Feedback(_) => ReportKind::Feedback,
        }
    }
}

/// Generate the requested report for a student.
pub fn generate(kind: ReportKind, dataset: &Dataset, student_id: &str) -> ReportResult<Report> {
    tracing::debug!(%kind, student = student_id, "generating report");
    Ok(match kind {
        ReportKind::Diagnostic => Report::Diagnostic(diagnostic::generate(dataset, student_id)?),
        ReportKind::Progress => Report::Progress(progress::generate(dataset, student_id)?),
        ReportKind::Feedback => Report::Feedback(feedback::generate(dataset, student_id)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::tony;
    use crate::error::ReportError;

    #[test]
    fn dispatches_on_kind() {
        let ds = tony("option1", 0);
        for kind in [
            ReportKind::Diagnostic,
            ReportKind::Progress,
            ReportKind::Feedback,
        ] {
            assert_eq!(generate(kind, &ds, "student1").unwrap().kind(), kind);
        }
    }

    #[test]
    fn unknown_student_for_every_kind() {
        let ds = tony("option1", 0);
        for kind in [
            ReportKind::Diagnostic,
            ReportKind::Progress,
            ReportKind::Feedback,
        ] {
            assert_eq!(
                generate(kind, &ds, "nobody").unwrap_err(),
                ReportError::StudentNotFound("nobody".into())
            );
        }
    }

    #[test]
    fn json_is_tagged_with_kind() {
        let ds = tony("option2", 1);
        let report = generate(ReportKind::Progress, &ds, "student1").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "progress");
        assert_eq!(json["improvement"], 0);
    }
}
