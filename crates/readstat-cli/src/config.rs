//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level readstat configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadstatConfig {
    /// Output directory for generated reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report format used when `--format` is not given: json, html, or all.
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Heading shown at the top of HTML reports.
    #[serde(default = "default_report_title")]
    pub report_title: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./readstat-results")
}
fn default_format() -> String {
    "html".to_string()
}
fn default_report_title() -> String {
    "Reading Assessment Report".to_string()
}

impl Default for ReadstatConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
            report_title: default_report_title(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never rescanned. An
/// unterminated `${` is kept as literal text.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `readstat.toml` in the current directory
/// 2. `~/.config/readstat/config.toml`
///
/// `READSTAT_OUTPUT_DIR` overrides `output_dir`.
pub fn load_config_from(path: Option<&Path>) -> Result<ReadstatConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("readstat.toml");
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
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ReadstatConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ReadstatConfig::default(),
    };

    if let Ok(dir) = std::env::var("READSTAT_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.report_title = resolve_env_vars(&config.report_title);
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("readstat"))
}
