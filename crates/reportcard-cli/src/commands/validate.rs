//! The `reportcard validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(data_dir: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let config = super::resolve_config(data_dir, config.as_deref())?;
    let ds = super::load_dataset(&config)?;

    println!(
        "Dataset: {} students, {} questions, {} assessments, {} responses",
        ds.students.len(),
        ds.questions.len(),
        ds.assessments.len(),
        ds.responses.len()
    );

    let warnings = reportcard_core::loader::validate_dataset(&ds);
    for w in &warnings {
        println!("  [{}:{}] WARNING: {}", w.dataset, w.record_id, w.message);
    }

    if warnings.is_empty() {
        println!("All datasets consistent.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
