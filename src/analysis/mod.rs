// Analysis module - rule engine, detections and the linting pipeline

pub mod detectors;
mod identifier;
mod linter;
mod rewrite;
mod walker;

pub use identifier::is_valid_bare_identifier;
pub use linter::{FileReport, LintRun, Linter};
pub use rewrite::{
    delete_range, remove_delimiter, remove_grouping, replace_range, RewriteEdit, TextEdit,
};
pub use walker::walk;

use crate::syntax::{NodeId, NodeKind, SourceCode, SyntaxTree, TextRange, Token};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kinds of redundancy the rule reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Issue {
    /// Grouping parentheses that change nothing
    UnnecessaryParens,

    /// `obj['name']` where `obj.name` is equivalent
    UseDotNotation,

    /// Braces around a single statement, or around a lone `return`
    /// in an arrow function body
    UnnecessaryBraces,
}

impl Issue {
    /// Stable key for the diagnostic message
    pub fn message_key(&self) -> &'static str {
        match self {
            Issue::UnnecessaryParens => "unnecessaryParens",
            Issue::UseDotNotation => "useDotNotation",
            Issue::UnnecessaryBraces => "unnecessaryBraces",
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Issue::UnnecessaryParens => "Unnecessary parentheses.",
            Issue::UseDotNotation => "Use dot notation instead of bracket notation.",
            Issue::UnnecessaryBraces => "Unnecessary braces around a single statement.",
        }
    }

    /// Short code for the issue type
    pub fn code(&self) -> &'static str {
        match self {
            Issue::UnnecessaryParens => "OU001",
            Issue::UseDotNotation => "OU002",
            Issue::UnnecessaryBraces => "OU003",
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message_key())
    }
}

/// Severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Warning
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only view of one parsed source unit, handed to every detector
#[derive(Clone, Copy)]
pub struct LintContext<'a> {
    pub tree: &'a SyntaxTree,
    pub source: &'a SourceCode,
}

impl<'a> LintContext<'a> {
    pub fn new(tree: &'a SyntaxTree, source: &'a SourceCode) -> Self {
        Self { tree, source }
    }

    pub fn kind(&self, id: NodeId) -> &'a NodeKind {
        self.tree.kind(id)
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.tree.range(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    pub fn text(&self, range: TextRange) -> &'a str {
        self.source.slice(range)
    }

    pub fn first_token(&self, id: NodeId) -> Option<&'a Token> {
        self.source.first_token(self.range(id))
    }

    pub fn last_token(&self, id: NodeId) -> Option<&'a Token> {
        self.source.last_token(self.range(id))
    }

    /// The `(` and `)` directly around `id`, if both are there
    pub fn grouping_tokens(&self, id: NodeId) -> Option<(&'a Token, &'a Token)> {
        let range = self.range(id);
        let before = self.source.token_before(range)?;
        let after = self.source.token_after(range)?;
        let grouped = before.is_punct("(")
            && before.range.end <= range.start
            && after.is_punct(")")
            && after.range.start >= range.end;
        grouped.then_some((before, after))
    }

    pub fn is_grouped(&self, id: NodeId) -> bool {
        self.grouping_tokens(id).is_some()
    }
}

/// One reported redundancy, produced by a detector
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Node the report is attached to
    pub node: NodeId,
    pub issue: Issue,
    /// Highlighted range
    pub range: TextRange,
    /// `None` when no safe rewrite could be computed
    pub edit: Option<RewriteEdit>,
}

impl Detection {
    pub fn new(node: NodeId, issue: Issue, range: TextRange) -> Self {
        Self {
            node,
            issue,
            range,
            edit: None,
        }
    }

    pub fn with_edit(mut self, edit: Option<RewriteEdit>) -> Self {
        self.edit = edit;
        self
    }

    pub fn is_fixable(&self) -> bool {
        self.edit.is_some()
    }
}

/// A detection resolved to a file position, ready for reporting
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub issue: Issue,
    pub code: &'static str,
    pub message_key: &'static str,
    pub severity: Severity,
    pub message: String,
    pub fixable: bool,
}

impl Finding {
    pub fn from_detection(
        file: PathBuf,
        source: &SourceCode,
        detection: &Detection,
        severity: Severity,
    ) -> Self {
        let (line, column) = source.line_col(detection.range.start);
        let (end_line, end_column) = source.line_col(detection.range.end);
        Self {
            file,
            line,
            column,
            end_line,
            end_column,
            issue: detection.issue,
            code: detection.issue.code(),
            message_key: detection.issue.message_key(),
            severity,
            message: detection.issue.default_message().to_string(),
            fixable: detection.is_fixable(),
        }
    }
}
