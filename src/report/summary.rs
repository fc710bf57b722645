//! Summary printed after every human-readable report

use crate::analysis::Issue;
use crate::report::aggregator::ResultStats;
use crate::report::colors::{BoxChars, ChartChars, StructureColors};
use colored::Colorize;

pub struct SummaryReporter {
    bar_width: usize,
    /// Edits written by `--fix` in this run
    fixed_count: Option<usize>,
    dry_run: bool,
}

impl SummaryReporter {
    pub fn new() -> Self {
        Self {
            bar_width: 20,
            fixed_count: None,
            dry_run: false,
        }
    }

    pub fn with_fixed_count(mut self, count: usize) -> Self {
        self.fixed_count = Some(count);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn report(&self, stats: &ResultStats) {
        println!("{}", BoxChars::heavy_line(50).dimmed());
        self.print_counts(stats);

        if stats.total_findings > 0 {
            println!();
            self.print_issue_breakdown(stats);
        }

        println!("{}", BoxChars::light_line(50).dimmed());
        self.print_footer(stats);
    }

    fn print_counts(&self, stats: &ResultStats) {
        let label_width = 16;
        let rows = [
            ("Files linted:", stats.files_linted),
            ("Files affected:", stats.files_affected),
            ("Issues found:", stats.total_findings),
            ("Fixable:", stats.fixable),
        ];
        for (label, value) in rows {
            println!(
                "{:>width$}  {}",
                label.dimmed(),
                StructureColors::count(&Self::format_number(value)),
                width = label_width
            );
        }
        if let Some(fixed) = self.fixed_count {
            println!(
                "{:>width$}  {}",
                "Fixed:".dimmed(),
                StructureColors::count(&Self::format_number(fixed)).green(),
                width = label_width
            );
        }
        if stats.files_failed > 0 {
            println!(
                "{:>width$}  {}",
                "Failed:".dimmed(),
                stats.files_failed.to_string().red().bold(),
                width = label_width
            );
        }
    }

    /// Format a number with thousands separators
    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }
        result.chars().rev().collect()
    }

    fn print_issue_breakdown(&self, stats: &ResultStats) {
        println!("{}", "By Issue:".white().bold());
        for (issue, count) in &stats.by_issue {
            let pct = stats.issue_percentage(*issue);
            println!(
                "  {} {:<22} {} {:>5} ({:>5.1}%)",
                StructureColors::rule_code(issue.code()),
                Self::issue_label(*issue),
                ChartChars::bar(pct, self.bar_width).cyan(),
                count,
                pct
            );
        }
    }

    fn issue_label(issue: Issue) -> &'static str {
        match issue {
            Issue::UnnecessaryParens => "Parentheses",
            Issue::UseDotNotation => "Bracket access",
            Issue::UnnecessaryBraces => "Braces",
        }
    }

    fn print_footer(&self, stats: &ResultStats) {
        if self.dry_run {
            println!("{}", "Dry run: no files were changed".dimmed());
        } else if stats.fixable > 0 && self.fixed_count.is_none() {
            println!("{}", "Tip: Run with --fix to apply the fixable rewrites".dimmed());
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}
