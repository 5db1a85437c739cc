//! Plain-text console rendering.

use reportcard_core::diagnostic::DiagnosticReport;
use reportcard_core::feedback::FeedbackReport;
use reportcard_core::model::AnswerOption;
use reportcard_core::progress::ProgressReport;
use reportcard_core::Report;

use crate::RenderOptions;

/// Render any report as console text.
pub fn render(report: &Report, options: &RenderOptions) -> String {
    match report {
        Report::Diagnostic(r) => diagnostic(r),
        Report::Progress(r) => progress(r),
        Report::Feedback(r) => feedback(r, options),
    }
}

/// Diagnostic report: headline, then one line per strand.
pub fn diagnostic(report: &DiagnosticReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} recently completed {} on {}\n",
        report.student_name, report.assessment_id, report.completed
    ));
    out.push_str(&format!(
        "{} got {} questions right out of {}. Details by strand given below:\n\n",
        report.first_name, report.total_correct, report.total_answered
    ));

    for s in &report.strands {
        out.push_str(&format!(
            "{}: {} out of {} correct\n",
            s.strand, s.correct, s.total
        ));
    }

    out
}

/// Progress report: headline, history, then the improvement line.
pub fn progress(report: &ProgressReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} has completed {} {} times in total. Date and raw score given below:\n\n",
        report.student_name,
        report.assessment_id,
        report.times_completed()
    ));

    for e in &report.entries {
        out.push_str(&format!(
            "Date: {}, Raw Score: {} out of {}\n",
            e.completed, e.raw_score, e.answered
        ));
    }

    out.push_str(&format!(
        "\n{} got {} more correct in the recent completed assessment than the oldest\n",
        report.student_name, report.improvement
    ));

    if !report.is_single_assessment() {
        out.push_str(&format!(
            "Note: these attempts span {} assessments ({}).\n",
            report.assessment_ids.len(),
            report.assessment_ids.join(", ")
        ));
    }

    out
}

fn describe(option: Option<&AnswerOption>, not_available: &str) -> String {
    let (label, value) = match option {
        Some(o) => (
            non_empty_or(&o.label, not_available),
            non_empty_or(&o.value, not_available),
        ),
        None => (not_available, not_available),
    };
    format!("{label} with value {value}")
}

fn non_empty_or<'a>(s: &'a str, fallback: &'a str) -> &'a str {
    if s.is_empty() {
        fallback
    } else {
        s
    }
}

/// Feedback report: headline, then a block per wrong answer.
pub fn feedback(report: &FeedbackReport, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} recently completed {} on {}\n",
        report.student_name, report.assessment_id, report.completed
    ));
    out.push_str(&format!(
        "{} got {} questions right out of {}. Feedback for wrong answers given below\n",
        report.first_name, report.raw_score, report.answered
    ));

    for e in &report.entries {
        out.push('\n');
        out.push_str(&format!("Question: {}\n", e.stem));
        out.push_str(&format!(
            "Your answer: {}\n",
            describe(e.chosen.as_ref(), &options.not_available)
        ));
        out.push_str(&format!(
            "Right answer: {}\n",
            describe(e.correct.as_ref(), &options.not_available)
        ));
        out.push_str(&format!("Hint: {}\n", e.hint));
    }

    out
}
