//! File-level linting pipeline

use super::detectors::OmitRule;
use super::{Detection, Finding, LintContext, Severity};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::JavaScriptParser;
use crate::syntax::SourceCode;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Findings for one source file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn fixable_count(&self) -> usize {
        self.findings.iter().filter(|f| f.fixable).count()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Outcome of linting a set of files
#[derive(Debug, Default)]
pub struct LintRun {
    pub reports: Vec<FileReport>,
    /// Files that could not be read or parsed
    pub errors: Vec<Error>,
}

impl LintRun {
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.reports.iter().flat_map(|r| r.findings.iter())
    }

    pub fn total_findings(&self) -> usize {
        self.reports.iter().map(|r| r.findings.len()).sum()
    }

    pub fn total_fixable(&self) -> usize {
        self.reports.iter().map(|r| r.fixable_count()).sum()
    }

    pub fn files_with_findings(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_clean()).count()
    }
}

/// Runs the rule over source text and files
pub struct Linter {
    rule: OmitRule,
    severity: Severity,
    show_progress: bool,
}

impl Linter {
    pub fn new(config: &Config) -> Self {
        Self {
            rule: OmitRule::new().with_enabled(config.enabled),
            severity: config.severity,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn rule(&self) -> &OmitRule {
        &self.rule
    }

    /// Lint one source unit
    pub fn lint_source(&self, path: &Path, text: &str) -> Result<FileReport> {
        let mut parser = JavaScriptParser::new()?;
        let parsed = parser.parse_file(path, text)?;
        let ctx = LintContext::new(&parsed.tree, &parsed.source);
        let detections = self.rule.run(&ctx);
        Ok(self.report(path, &parsed.source, &detections))
    }

    /// Resolve detections against `source` into a file report
    pub fn report(&self, path: &Path, source: &SourceCode, detections: &[Detection]) -> FileReport {
        let findings: Vec<Finding> = detections
            .iter()
            .map(|d| Finding::from_detection(path.to_path_buf(), source, d, self.severity))
            .collect();
        debug!("{}: {} findings", path.display(), findings.len());
        FileReport {
            path: path.to_path_buf(),
            findings,
        }
    }

    /// Read and lint one file
    pub fn lint_file(&self, path: &Path) -> Result<FileReport> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.lint_source(path, &text)
    }

    /// Lint every file, collecting per-file failures instead of stopping
    pub fn lint_files(&self, files: &[PathBuf], parallel: bool) -> LintRun {
        info!("Linting {} files", files.len());

        let results: Vec<Result<FileReport>> = if parallel {
            files.par_iter().map(|f| self.lint_file(f)).collect()
        } else {
            let pb = if self.show_progress {
                ProgressBar::new(files.len() as u64)
            } else {
                ProgressBar::hidden()
            };
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            let results = files
                .iter()
                .map(|f| {
                    let result = self.lint_file(f);
                    pb.inc(1);
                    result
                })
                .collect();
            pb.finish_and_clear();
            results
        };

        let mut run = LintRun::default();
        for result in results {
            match result {
                Ok(report) => run.reports.push(report),
                Err(e) => {
                    warn!("{}", e);
                    run.errors.push(e);
                }
            }
        }
        run.reports.sort_by(|a, b| a.path.cmp(&b.path));
        run
    }
}
