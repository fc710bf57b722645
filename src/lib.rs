//! omitparens - Remove redundant parentheses, brackets and braces from JavaScript
//!
//! The rule reports, and can rewrite:
//! - grouping parentheses that change nothing (`const x = (1)`)
//! - bracket access with a constant identifier key (`obj['foo']`)
//! - braces around the single statement of an `if`/`else` branch or loop
//! - arrow functions whose block body only returns a value
//!
//! # Architecture
//!
//! 1. **Discovery** - Find `.js`/`.jsx`/`.mjs`/`.cjs` files
//! 2. **Parsing** - Parse with tree-sitter and lower to a typed syntax tree
//! 3. **Walking** - Visit every node once and run the detectors on it
//! 4. **Fixing** - Apply non-overlapping edits, re-parse, repeat
//! 5. **Reporting** - Terminal, compact or JSON output

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod parser;
pub mod refactor;
pub mod report;
pub mod syntax;

pub use analysis::detectors::OmitRule;
pub use analysis::{Detection, Finding, Issue, LintContext, LintRun, Linter, Severity};
pub use config::Config;
pub use discovery::FileFinder;
pub use error::{Error, Result};
pub use parser::{JavaScriptParser, ParsedSource};
pub use refactor::{fix_source, FileEditor};
pub use report::{ReportFormat, Reporter};
