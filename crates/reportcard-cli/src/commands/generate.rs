//! The default interactive session: pick a student, pick a report, print it.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use reportcard_core::config::OutputFormat;
use reportcard_core::prompt::Prompt;
use reportcard_core::{report, Dataset, ReportKind};
use reportcard_render::RenderOptions;

pub const STUDENT_PROMPT: &str = "Please enter Student ID: ";
pub const REPORT_PROMPT: &str =
    "Report to generate (1 for Diagnostic, 2 for Progress, 3 for Feedback): ";
pub const INVALID_SELECTION: &str = "Invalid report type selected.";

/// Reads answers from stdin, writing each prompt to stdout first.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Answers already given on the command line.
#[derive(Debug, Default)]
pub struct Preset {
    pub student: Option<String>,
    pub report: Option<String>,
}

pub fn execute(
    data_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    student: Option<String>,
    report: Option<String>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let config = super::resolve_config(data_dir, config.as_deref())?;
    let dataset = super::load_dataset(&config)?;
    let format = format.unwrap_or(config.format);
    let options = RenderOptions {
        not_available: config.not_available,
    };

    run_session(
        &dataset,
        Preset { student, report },
        format,
        &options,
        &mut StdinPrompt,
        &mut io::stdout(),
    )
}

/// One report request against a loaded dataset.
///
/// Report failures such as an unknown student are printed as a single line
/// and still count as a successful run.
pub fn run_session<P: Prompt, W: Write>(
    dataset: &Dataset,
    preset: Preset,
    format: OutputFormat,
    options: &RenderOptions,
    prompt: &mut P,
    out: &mut W,
) -> Result<()> {
    let student_id = match preset.student {
        Some(id) => id,
        None => prompt
            .read_line(STUDENT_PROMPT)
            .context("failed to read student id")?,
    };
    let selector = match preset.report {
        Some(kind) => kind,
        None => prompt
            .read_line(REPORT_PROMPT)
            .context("failed to read report selection")?,
    };
    let student_id = student_id.trim();

    let kind: ReportKind = match selector.parse() {
        Ok(kind) => kind,
        Err(e) => {
            tracing::debug!("{e}");
            writeln!(out, "{INVALID_SELECTION}")?;
            return Ok(());
        }
    };

    match report::generate(kind, dataset, student_id) {
        Ok(report) => {
            let rendered = reportcard_render::render(&report, format, options)?;
            write!(out, "{rendered}")?;
            if !rendered.ends_with('\n') {
                writeln!(out)?;
            }
        }
        Err(e) => {
            tracing::debug!(student = student_id, "{e}");
            writeln!(out, "{}", e.user_message(kind))?;
        }
    }

    out.flush()?;
    Ok(())
}
