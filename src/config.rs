//! Configuration loading
//!
//! Settings come from `.omitparens.{toml,yml,yaml,json}` (or an explicit
//! `--config` file) and are then overridden by command-line flags.

use crate::analysis::Severity;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names probed by [`Config::from_default_locations`], in order
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    ".omitparens.toml",
    ".omitparens.yml",
    ".omitparens.yaml",
    ".omitparens.json",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Turns the whole rule on or off
    pub enabled: bool,

    /// Severity attached to every finding
    pub severity: Severity,

    /// Directories or files to scan; the CLI path when empty
    pub targets: Vec<PathBuf>,

    /// Glob patterns to skip
    pub exclude: Vec<String>,

    /// File extensions to lint, without the dot
    pub extensions: Vec<String>,

    /// Upper bound on fix passes per file
    pub max_fix_passes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Warning,
            targets: Vec::new(),
            exclude: Vec::new(),
            extensions: ["js", "jsx", "mjs", "cjs"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_fix_passes: 10,
        }
    }
}

impl Config {
    /// Load a config file, picking the format from its extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let invalid = |message: String| Error::Config {
            path: path.to_path_buf(),
            message,
        };

        let config: Config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
            Some("yml") | Some("yaml") => {
                serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?,
            other => {
                return Err(invalid(format!(
                    "unsupported config format {:?}",
                    other.unwrap_or("")
                )))
            }
        };

        config.validate(path)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// First config file found in `root`, or the defaults
    pub fn from_default_locations(root: &Path) -> Result<Self> {
        let dir = if root.is_file() {
            root.parent().unwrap_or(root)
        } else {
            root
        };
        for name in DEFAULT_CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.max_fix_passes == 0 {
            return Err(Error::Config {
                path: path.to_path_buf(),
                message: "max_fix_passes must be at least 1".to_string(),
            });
        }
        if self.extensions.is_empty() {
            return Err(Error::Config {
                path: path.to_path_buf(),
                message: "extensions must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// True when `path` has one of the configured extensions
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
