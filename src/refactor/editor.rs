//! Writing fixes back to disk

use super::fixer::{fix_source, FixResult};
use crate::analysis::{FileReport, LintRun, Linter};
use crate::error::{Error, Result};
use crate::parser::JavaScriptParser;
use colored::Colorize;
use dialoguer::Confirm;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What happened to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing to fix
    Unchanged,
    /// Fixed text written back
    Written,
    /// Dry run: the file would have been rewritten
    WouldWrite,
    /// Interactive mode and the user said no
    Declined,
}

/// Result of fixing one file
#[derive(Debug, Clone)]
pub struct FileFix {
    pub outcome: EditOutcome,
    /// Edits applied (or that would be applied)
    pub applied: usize,
    /// Findings left in the file on disk after this run
    pub report: FileReport,
}

/// Fixes files in place, in dry-run mode, or asking before each write
pub struct FileEditor {
    dry_run: bool,
    interactive: bool,
    max_passes: usize,
    /// Print one line per changed file
    show_messages: bool,
}

impl FileEditor {
    pub fn new(dry_run: bool, interactive: bool, max_passes: usize) -> Self {
        Self {
            dry_run,
            interactive,
            max_passes: max_passes.max(1),
            show_messages: true,
        }
    }

    pub fn with_messages(mut self, show: bool) -> Self {
        self.show_messages = show;
        self
    }

    /// Fix one file
    pub fn fix_file(&self, linter: &Linter, path: &Path) -> Result<FileFix> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut parser = JavaScriptParser::new()?;
        let result = fix_source(&mut parser, linter.rule(), &text, self.max_passes)
            .map_err(|e| with_path(e, path))?;

        if !result.changed() {
            return Ok(FileFix {
                outcome: EditOutcome::Unchanged,
                applied: 0,
                report: linter.report(path, &result.source, &result.remaining),
            });
        }

        let outcome = if self.dry_run {
            EditOutcome::WouldWrite
        } else if self.interactive && !self.confirm(path, &result)? {
            EditOutcome::Declined
        } else {
            std::fs::write(path, result.text()).map_err(|e| Error::io(path, e))?;
            EditOutcome::Written
        };

        let report = match outcome {
            EditOutcome::Written => linter.report(path, &result.source, &result.remaining),
            // the file on disk still has its original findings
            _ => linter.lint_source(path, &text)?,
        };
        self.print_outcome(path, outcome, result.applied);

        Ok(FileFix {
            outcome,
            applied: result.applied,
            report,
        })
    }

    /// Fix every file; interactive runs are always sequential
    pub fn fix_files(&self, linter: &Linter, files: &[PathBuf], parallel: bool) -> (LintRun, usize) {
        info!("Fixing {} files", files.len());
        let results: Vec<Result<FileFix>> = if parallel && !self.interactive {
            files.par_iter().map(|f| self.fix_file(linter, f)).collect()
        } else {
            files.iter().map(|f| self.fix_file(linter, f)).collect()
        };

        let mut run = LintRun::default();
        let mut applied = 0;
        for result in results {
            match result {
                Ok(fix) => {
                    if fix.outcome == EditOutcome::Written {
                        applied += fix.applied;
                    }
                    run.reports.push(fix.report);
                }
                Err(e) => {
                    warn!("{}", e);
                    run.errors.push(e);
                }
            }
        }
        run.reports.sort_by(|a, b| a.path.cmp(&b.path));
        (run, applied)
    }

    fn confirm(&self, path: &Path, result: &FixResult) -> Result<bool> {
        let answer = Confirm::new()
            .with_prompt(format!(
                "Apply {} fixes to {}?",
                result.applied,
                path.display()
            ))
            .default(true)
            .interact()?;
        Ok(answer)
    }

    fn print_outcome(&self, path: &Path, outcome: EditOutcome, applied: usize) {
        if !self.show_messages {
            return;
        }
        match outcome {
            EditOutcome::Written => println!(
                "{} {} ({} fixes)",
                "Fixed".green().bold(),
                path.display(),
                applied
            ),
            EditOutcome::WouldWrite => println!(
                "{} {} ({} fixes)",
                "Would fix".yellow().bold(),
                path.display(),
                applied
            ),
            EditOutcome::Declined => println!("{} {}", "Skipped".dimmed(), path.display()),
            EditOutcome::Unchanged => {}
        }
    }
}

/// Syntax errors from `fix_source` carry a placeholder path
fn with_path(error: Error, path: &Path) -> Error {
    match error {
        Error::Syntax { line, column, .. } => Error::Syntax {
            path: path.to_path_buf(),
            line,
            column,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_fix_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.js", "const x = (1)\nif (x) { go(); }\n");
        let linter = Linter::new(&Config::default());
        let fix = FileEditor::new(false, false, 10).fix_file(&linter, &path).unwrap();

        assert_eq!(fix.outcome, EditOutcome::Written);
        assert_eq!(fix.applied, 2);
        assert!(fix.report.is_clean());
        assert_eq!(fs::read_to_string(&path).unwrap(), "const x = 1\nif (x) go();\n");
    }

    #[test]
    fn test_dry_run_leaves_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.js", "obj['foo'] = 1\n");
        let linter = Linter::new(&Config::default());
        let fix = FileEditor::new(true, false, 10).fix_file(&linter, &path).unwrap();

        assert_eq!(fix.outcome, EditOutcome::WouldWrite);
        assert_eq!(fix.report.findings.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "obj['foo'] = 1\n");
    }

    #[test]
    fn test_clean_file_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.js", "const x = a + b\n");
        let linter = Linter::new(&Config::default());
        let fix = FileEditor::new(false, false, 10).fix_file(&linter, &path).unwrap();
        assert_eq!(fix.outcome, EditOutcome::Unchanged);
        assert!(fix.report.is_clean());
    }

    #[test]
    fn test_syntax_error_carries_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.js", "const = ;\n");
        let linter = Linter::new(&Config::default());
        let err = FileEditor::new(false, false, 10)
            .fix_file(&linter, &path)
            .unwrap_err();
        assert!(matches!(err, Error::Syntax { path: p, .. } if p == path));
    }

    #[test]
    fn test_fix_files_counts_written_edits() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.js", "const x = ((a))\n");
        let b = write(&dir, "b.js", "const y = b\n");
        let linter = Linter::new(&Config::default());
        let (run, applied) = FileEditor::new(false, false, 10).fix_files(&linter, &[a, b], true);
        assert_eq!(applied, 2);
        assert_eq!(run.total_findings(), 0);
        assert_eq!(run.reports.len(), 2);
    }
}
