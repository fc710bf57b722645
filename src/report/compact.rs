//! Compact reporter: one line per finding
//!
//! `path:line:column: severity [code] message`, easy to grep and to feed to
//! editors that understand the format.

use crate::analysis::{Finding, LintRun};
use crate::report::colors::{SeveritySymbol, StructureColors};
use std::path::{Path, PathBuf};

pub struct CompactReporter {
    base_path: Option<PathBuf>,
    /// Maximum width for file paths (truncate if longer)
    max_path_width: usize,
}

impl CompactReporter {
    pub fn new() -> Self {
        Self {
            base_path: None,
            max_path_width: 60,
        }
    }

    pub fn with_base_path(mut self, path: PathBuf) -> Self {
        self.base_path = Some(path);
        self
    }

    fn format_path(&self, path: &Path) -> String {
        let display = match &self.base_path {
            Some(base) => path.strip_prefix(base).unwrap_or(path).display().to_string(),
            None => path.display().to_string(),
        };

        let chars: Vec<char> = display.chars().collect();
        if chars.len() > self.max_path_width {
            let tail: String = chars[chars.len() - (self.max_path_width - 3)..].iter().collect();
            format!("...{}", tail)
        } else {
            display
        }
    }

    /// Uncolored line for one finding
    pub fn format_line(&self, finding: &Finding) -> String {
        format!(
            "{}:{}:{}: {} [{}] {}",
            self.format_path(&finding.file),
            finding.line,
            finding.column,
            finding.severity,
            finding.code,
            finding.message
        )
    }

    pub fn report(&self, run: &LintRun) {
        for finding in run.findings() {
            println!(
                "{}:{} {} {} {}",
                StructureColors::file_path(&self.format_path(&finding.file)),
                StructureColors::location(&format!("{}:{}", finding.line, finding.column)),
                SeveritySymbol::colored(finding.severity),
                StructureColors::rule_code(finding.code),
                finding.message
            );
        }
    }
}

impl Default for CompactReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Linter;
    use crate::config::Config;

    #[test]
    fn test_format_line() {
        let report = Linter::new(&Config::default())
            .lint_source(Path::new("/project/src/a.js"), "\nconst x = (1)\n")
            .unwrap();
        let reporter = CompactReporter::new().with_base_path(PathBuf::from("/project"));
        assert_eq!(
            reporter.format_line(&report.findings[0]),
            "src/a.js:2:11: warning [OU001] Unnecessary parentheses."
        );
    }

    #[test]
    fn test_path_truncation() {
        let reporter = CompactReporter::new();
        let long_path = Path::new(
            "/very/long/path/that/exceeds/the/maximum/width/setting/for/display/purposes/file.js",
        );
        let formatted = reporter.format_path(long_path);
        assert_eq!(formatted.chars().count(), 60);
        assert!(formatted.starts_with("..."));
        assert!(formatted.ends_with("purposes/file.js"));
    }
}
