//! Source file discovery
//!
//! Walks the configured targets with the `ignore` crate, so `.gitignore`
//! rules apply, and keeps files with one of the configured extensions.

use crate::config::Config;
use crate::error::{Error, Result};
use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Finds JavaScript files to lint
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Collect files under `root` (or under the configured targets)
    ///
    /// An explicit file path is returned as is.
    pub fn find_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let targets: Vec<PathBuf> = if self.config.targets.is_empty() {
            vec![root.to_path_buf()]
        } else {
            self.config
                .targets
                .iter()
                .map(|t| if t.is_absolute() { t.clone() } else { root.join(t) })
                .collect()
        };

        let mut files = Vec::new();
        for target in &targets {
            if target.is_file() {
                files.push(target.clone());
                continue;
            }
            if !target.exists() {
                return Err(Error::Discovery {
                    path: target.clone(),
                    message: "path does not exist".to_string(),
                });
            }
            self.walk(target, &mut files)?;
        }

        files.sort();
        files.dedup();
        debug!("Discovered {} files", files.len());
        Ok(files)
    }

    fn walk(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        let overrides = self.excludes(dir)?;
        let walker = WalkBuilder::new(dir)
            .hidden(true)
            .git_ignore(true)
            .overrides(overrides)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping entry: {}", e);
                    continue;
                }
            };
            let is_file = entry.file_type().map_or(false, |t| t.is_file());
            if is_file && self.config.matches_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(())
    }

    fn excludes(&self, dir: &Path) -> Result<Override> {
        let mut builder = OverrideBuilder::new(dir);
        for pattern in &self.config.exclude {
            builder
                .add(&format!("!{}", pattern))
                .map_err(|e| Error::Discovery {
                    path: dir.to_path_buf(),
                    message: format!("invalid exclude pattern '{}': {}", pattern, e),
                })?;
        }
        builder.build().map_err(|e| Error::Discovery {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/vendor")).unwrap();
        fs::write(dir.path().join("src/app.js"), "a()").unwrap();
        fs::write(dir.path().join("src/view.jsx"), "a()").unwrap();
        fs::write(dir.path().join("src/types.ts"), "a()").unwrap();
        fs::write(dir.path().join("src/vendor/lib.js"), "a()").unwrap();
        dir
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_extension_filter() {
        let dir = project();
        let config = Config::default();
        let files = FileFinder::new(&config).find_files(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["app.js", "lib.js", "view.jsx"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = project();
        let config = Config {
            exclude: vec!["**/vendor/**".to_string()],
            ..Config::default()
        };
        let files = FileFinder::new(&config).find_files(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["app.js", "view.jsx"]);
    }

    #[test]
    fn test_targets_and_explicit_files() {
        let dir = project();
        let config = Config {
            targets: vec![PathBuf::from("src/vendor"), PathBuf::from("src/types.ts")],
            ..Config::default()
        };
        let files = FileFinder::new(&config).find_files(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["types.ts", "lib.js"]);
    }

    #[test]
    fn test_missing_target() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        let result = FileFinder::new(&config).find_files(&dir.path().join("nope"));
        assert!(matches!(result, Err(Error::Discovery { .. })));
    }
}
