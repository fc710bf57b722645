//! Counting findings for summaries

use crate::analysis::{Issue, LintRun, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals over one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultStats {
    pub total_findings: usize,
    pub fixable: usize,
    pub files_linted: usize,
    pub files_affected: usize,
    /// Files that failed to read or parse
    pub files_failed: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    /// Finding count per issue, in issue order
    #[serde(skip)]
    pub by_issue: BTreeMap<Issue, usize>,
}

impl ResultStats {
    pub fn from_run(run: &LintRun) -> Self {
        let mut stats = ResultStats {
            total_findings: run.total_findings(),
            fixable: run.total_fixable(),
            files_linted: run.reports.len(),
            files_affected: run.files_with_findings(),
            files_failed: run.errors.len(),
            ..Default::default()
        };
        for finding in run.findings() {
            match finding.severity {
                Severity::Error => stats.errors += 1,
                Severity::Warning => stats.warnings += 1,
                Severity::Info => stats.infos += 1,
            }
            *stats.by_issue.entry(finding.issue).or_default() += 1;
        }
        stats
    }

    /// Share of findings with the given issue, in percent
    pub fn issue_percentage(&self, issue: Issue) -> f64 {
        if self.total_findings == 0 {
            return 0.0;
        }
        let count = self.by_issue.get(&issue).copied().unwrap_or(0);
        count as f64 / self.total_findings as f64 * 100.0
    }
}
