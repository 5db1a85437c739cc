//! reportcard configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "REPORTCARD_DATA_DIR";

/// Output format for generated reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain sentences, one logical line per fact.
    #[default]
    Text,
    /// Pretty-printed JSON of the structured report.
    Json,
    /// Tables.
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Top-level reportcard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportcardConfig {
    /// Directory holding the four JSON datasets.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Placeholder shown when a feedback option cannot be resolved.
    #[serde(default = "default_not_available")]
    pub not_available: String,
    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_not_available() -> String {
    "N/A".to_string()
}

impl Default for ReportcardConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            not_available: default_not_available(),
            format: OutputFormat::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again. An unset variable is an error.
fn resolve_env_vars(s: &str) -> Result<String> {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        let value = std::env::var(var_name)
            .with_context(|| format!("environment variable {var_name} is not set"))?;
        result.push_str(&rest[..start]);
        result.push_str(&value);
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `reportcard.toml` in the current directory
/// 2. `~/.config/reportcard/config.toml`
///
/// Environment variable override: `REPORTCARD_DATA_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<ReportcardConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("reportcard.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ReportcardConfig::default(),
    };

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        config.data_dir = PathBuf::from(dir);
    }

    config.data_dir = PathBuf::from(
        resolve_env_vars(&config.data_dir.to_string_lossy())
            .context("failed to resolve data_dir")?,
    );

    Ok(config)
}

/// Parse a TOML config string (useful for testing).
pub fn parse_config(content: &str) -> Result<ReportcardConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("reportcard"))
}
