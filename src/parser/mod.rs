mod javascript;

pub use javascript::JavaScriptParser;

use crate::syntax::{SourceCode, SyntaxTree};

/// Result of parsing one source unit
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub tree: SyntaxTree,
    pub source: SourceCode,
}
