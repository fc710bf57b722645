//! JSON reporter for tooling

use crate::analysis::detectors::OmitRule;
use crate::analysis::{Finding, LintRun};
use crate::error::{Error, Result};
use crate::report::aggregator::ResultStats;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    rule: &'static str,
    summary: &'a ResultStats,
    findings: Vec<&'a Finding>,
    /// Files that could not be linted
    errors: Vec<String>,
}

pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn render(&self, run: &LintRun) -> Result<String> {
        let stats = ResultStats::from_run(run);
        let report = JsonReport {
            version: env!("CARGO_PKG_VERSION"),
            rule: OmitRule::NAME,
            summary: &stats,
            findings: run.findings().collect(),
            errors: run.errors.iter().map(|e| e.to_string()).collect(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Write to the output file, or to stdout
    pub fn report(&self, run: &LintRun) -> Result<()> {
        let json = self.render(run)?;
        match &self.output_path {
            Some(path) => {
                std::fs::write(path, json).map_err(|e| Error::io(path, e))?;
                info!("Report written to {}", path.display());
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Linter;
    use crate::config::Config;
    use std::path::Path;
    use tempfile::TempDir;

    fn run() -> LintRun {
        let report = Linter::new(&Config::default())
            .lint_source(Path::new("a.js"), "obj['foo'] = 1\n")
            .unwrap();
        LintRun {
            reports: vec![report],
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_render_fields() {
        let json = JsonReporter::new(None).render(&run()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rule"], "omit-unnecessary-parens-brackets");
        assert_eq!(value["summary"]["total_findings"], 1);
        assert_eq!(value["summary"]["fixable"], 1);
        let finding = &value["findings"][0];
        assert_eq!(finding["file"], "a.js");
        assert_eq!(finding["line"], 1);
        assert_eq!(finding["column"], 5);
        assert_eq!(finding["code"], "OU002");
        assert_eq!(finding["message_key"], "useDotNotation");
        assert_eq!(finding["severity"], "warning");
        assert_eq!(finding["fixable"], true);
        assert!(value["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_report_to_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("report.json");
        JsonReporter::new(Some(out.clone())).report(&run()).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("\"OU002\""));
    }
}
