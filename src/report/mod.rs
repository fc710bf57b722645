mod aggregator;
mod colors;
mod compact;
mod json;
mod summary;
mod terminal;

pub use aggregator::ResultStats;
pub use compact::CompactReporter;
pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use terminal::TerminalReporter;

use crate::analysis::LintRun;
use crate::error::Result;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Colored output grouped by file
    #[default]
    Terminal,
    /// One line per finding
    Compact,
    /// Machine-readable JSON
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Output file path (JSON only)
    pub output_path: Option<PathBuf>,
    /// Base path to strip from file paths for shorter display
    pub base_path: Option<PathBuf>,
    /// Edits written by `--fix`, if it ran
    pub fixed_count: Option<usize>,
    pub dry_run: bool,
}

pub struct Reporter {
    format: ReportFormat,
    options: ReportOptions,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            options: ReportOptions {
                output_path,
                ..Default::default()
            },
        }
    }

    pub fn with_options(format: ReportFormat, options: ReportOptions) -> Self {
        Self { format, options }
    }

    pub fn report(&self, run: &LintRun) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                let mut reporter = TerminalReporter::new();
                if let Some(base) = &self.options.base_path {
                    reporter = reporter.with_base_path(base.clone());
                }
                reporter.report(run);
                self.print_final_summary(run);
                Ok(())
            }
            ReportFormat::Compact => {
                let mut reporter = CompactReporter::new();
                if let Some(base) = &self.options.base_path {
                    reporter = reporter.with_base_path(base.clone());
                }
                reporter.report(run);
                self.print_final_summary(run);
                Ok(())
            }
            ReportFormat::Json => JsonReporter::new(self.options.output_path.clone()).report(run),
        }
    }

    fn print_final_summary(&self, run: &LintRun) {
        let mut reporter = SummaryReporter::new().with_dry_run(self.options.dry_run);
        if let Some(fixed) = self.options.fixed_count {
            reporter = reporter.with_fixed_count(fixed);
        }
        reporter.report(&ResultStats::from_run(run));
    }
}
