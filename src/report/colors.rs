//! Shared color scheme for terminal output

use crate::analysis::Severity;
use colored::{ColoredString, Colorize};

/// Structural element colors
pub struct StructureColors;

impl StructureColors {
    /// File path header
    pub fn file_path(text: &str) -> ColoredString {
        text.cyan().bold()
    }

    /// Line/column numbers
    pub fn location(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Issue code (e.g. OU001)
    pub fn rule_code(text: &str) -> ColoredString {
        text.magenta()
    }

    pub fn count(text: &str) -> ColoredString {
        text.white().bold()
    }
}

/// Severity symbols
pub struct SeveritySymbol;

impl SeveritySymbol {
    pub fn error() -> &'static str {
        "✖"
    }

    pub fn warning() -> &'static str {
        "⚠"
    }

    pub fn info() -> &'static str {
        "ℹ"
    }

    pub fn colored(severity: Severity) -> ColoredString {
        match severity {
            Severity::Error => Self::error().red().bold(),
            Severity::Warning => Self::warning().yellow(),
            Severity::Info => Self::info().blue(),
        }
    }
}

/// Marker for findings `--fix` can rewrite
pub struct FixIndicator;

impl FixIndicator {
    pub fn for_finding(fixable: bool) -> ColoredString {
        if fixable {
            "fixable".green()
        } else {
            "manual".dimmed()
        }
    }
}

/// Bar chart characters for summary display
pub struct ChartChars;

impl ChartChars {
    pub const FILLED: char = '█';
    pub const EMPTY: char = '░';

    pub fn bar(percentage: f64, width: usize) -> String {
        let filled = ((percentage / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!(
            "{}{}",
            Self::FILLED.to_string().repeat(filled),
            Self::EMPTY.to_string().repeat(width - filled)
        )
    }
}

pub struct BoxChars;

impl BoxChars {
    pub fn heavy_line(width: usize) -> String {
        "━".repeat(width)
    }

    pub fn light_line(width: usize) -> String {
        "─".repeat(width)
    }
}
