use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use reportcard_core::diagnostic::DiagnosticReport;
use reportcard_core::feedback::FeedbackReport;
use reportcard_core::progress::ProgressReport;
use reportcard_core::Report;

use crate::RenderOptions;

pub fn render(report: &Report, options: &RenderOptions) -> String {
    match report {
        Report::Diagnostic(r) => render_diagnostic_table(r),
        Report::Progress(r) => render_progress_table(r),
        Report::Feedback(r) => render_feedback_table(r, options),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_diagnostic_table(report: &DiagnosticReport) -> String {
    let mut table = new_table();
    table.set_header(vec!["Strand", "Correct", "Total"]);

    for s in &report.strands {
        let correct = if s.total > 0 && s.correct == s.total {
            Cell::new(s.correct).fg(Color::Green)
        } else {
            Cell::new(s.correct)
        };
        table.add_row(Row::from(vec![
            Cell::new(&s.strand),
            correct,
            Cell::new(s.total),
        ]));
    }
    table.add_row(vec![
        "All strands".to_string(),
        report.total_correct.to_string(),
        report.total_answered.to_string(),
    ]);

    format!(
        "{} · {} · completed {}\n{table}\n",
        report.student_name, report.assessment_id, report.completed
    )
}

pub fn render_progress_table(report: &ProgressReport) -> String {
    let mut out = String::new();
    for history in report.by_assessment() {
        let mut table = new_table();
        table.set_header(vec!["Completed", "Raw Score", "Answered"]);
        for e in &history.entries {
            table.add_row(vec![
                e.completed.to_string(),
                e.raw_score.to_string(),
                e.answered.to_string(),
            ]);
        }

        let delta = match history.improvement {
            d if d > 0 => Cell::new(format!("+{d}")).fg(Color::Green),
            d if d < 0 => Cell::new(d).fg(Color::Red),
            d => Cell::new(d),
        };
        table.add_row(Row::from(vec![
            Cell::new("Improvement"),
            delta,
            Cell::new(""),
        ]));

        out.push_str(&format!(
            "{} · {} · {} attempt(s)\n{table}\n",
            report.student_name,
            history.assessment_id,
            history.entries.len()
        ));
    }
    out
}

pub fn render_feedback_table(report: &FeedbackReport, options: &RenderOptions) -> String {
    let na = options.not_available.as_str();
    let mut table = new_table();
    table.set_header(vec!["Question", "Your Answer", "Right Answer", "Hint"]);

    for e in &report.entries {
        let chosen = e
            .chosen
            .as_ref()
            .map(|o| format!("{} ({})", o.label, o.value))
            .unwrap_or_else(|| na.to_string());
        let correct = e
            .correct
            .as_ref()
            .map(|o| format!("{} ({})", o.label, o.value))
            .unwrap_or_else(|| na.to_string());
        table.add_row(Row::from(vec![
            Cell::new(&e.stem),
            Cell::new(chosen).fg(Color::Red),
            Cell::new(correct).fg(Color::Green),
            Cell::new(&e.hint),
        ]));
    }

    format!(
        "{} · {} · {} of {} correct\n{table}\n",
        report.student_name, report.assessment_id, report.raw_score, report.answered
    )
}
