//! Terminal reporter, findings grouped by file

use crate::analysis::{Finding, LintRun};
use crate::report::colors::{FixIndicator, SeveritySymbol, StructureColors};
use colored::Colorize;
use std::path::{Path, PathBuf};

pub struct TerminalReporter {
    base_path: Option<PathBuf>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { base_path: None }
    }

    pub fn with_base_path(mut self, path: PathBuf) -> Self {
        self.base_path = Some(path);
        self
    }

    pub fn report(&self, run: &LintRun) {
        let total = run.total_findings();
        if total == 0 {
            println!("{}", "No unnecessary parentheses or brackets found!".green().bold());
            return;
        }

        println!();
        println!(
            "Found {} issues:",
            StructureColors::count(&total.to_string())
        );
        println!();

        // reports are already sorted by path
        for report in run.reports.iter().filter(|r| !r.is_clean()) {
            println!("{}", StructureColors::file_path(&self.display_path(&report.path)));
            for finding in &report.findings {
                self.print_item(finding);
            }
            println!();
        }
    }

    fn display_path(&self, path: &Path) -> String {
        match &self.base_path {
            Some(base) => path.strip_prefix(base).unwrap_or(path).display().to_string(),
            None => path.display().to_string(),
        }
    }

    fn print_item(&self, finding: &Finding) {
        let location = format!("{:>5}:{:<3}", finding.line, finding.column);
        println!(
            "  {} {} [{}] {} ({})",
            StructureColors::location(&location),
            SeveritySymbol::colored(finding.severity),
            StructureColors::rule_code(finding.code),
            finding.message,
            FixIndicator::for_finding(finding.fixable)
        );
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
