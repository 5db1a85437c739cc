//! reportcard CLI — interactive student assessment reports.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use reportcard_core::config::OutputFormat;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "reportcard",
    version,
    about = "Diagnostic, progress and feedback reports from assessment data"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

/// Arguments for the default interactive session.
#[derive(Args)]
struct GenerateArgs {
    /// Directory holding the JSON datasets
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Student id (skips the prompt)
    #[arg(long)]
    student: Option<String>,

    /// Report to generate: 1/diagnostic, 2/progress, 3/feedback (skips the prompt)
    #[arg(long)]
    report: Option<String>,

    /// Output format: text, json, table
    #[arg(long)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the datasets for inconsistent records
    Validate {
        /// Directory holding the JSON datasets
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reportcard=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Validate { data_dir, config }) => {
            commands::validate::execute(data_dir, config)
        }
        None => {
            let GenerateArgs {
                data_dir,
                config,
                student,
                report,
                format,
            } = cli.generate;
            commands::generate::execute(data_dir, config, student, report, format)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
