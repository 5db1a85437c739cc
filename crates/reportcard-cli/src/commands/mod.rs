pub mod generate;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reportcard_core::config::{self, ReportcardConfig};
use reportcard_core::loader;
use reportcard_core::Dataset;

/// Shown on stderr when any dataset fails to load.
pub const LOAD_FAILED: &str = "Failed to load data. Please check the data files.";

/// Load the config, letting an explicit `--data-dir` win over it.
pub fn resolve_config(
    data_dir: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<ReportcardConfig> {
    let mut config = config::load_config_from(config_path)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

pub fn load_dataset(config: &ReportcardConfig) -> Result<Dataset> {
    loader::load_dataset(&config.data_dir).context(LOAD_FAILED)
}
