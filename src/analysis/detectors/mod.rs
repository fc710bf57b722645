// Detectors for redundant grouping, index brackets and braces

mod arrow_body;
mod dot_notation;
mod redundant_braces;
mod redundant_parens;

pub use arrow_body::{check_arrow_braces, ArrowBodyDetector};
pub use dot_notation::{check_indexed_access, DotNotationDetector};
pub use redundant_braces::{check_block_redundancy, RedundantBracesDetector};
pub use redundant_parens::{check_grouping, RedundantParenthesesDetector};

use crate::analysis::{walk, Detection, LintContext};
use crate::syntax::{NodeId, Token, TokenKind};

/// Trait for node-level detectors
///
/// The walker calls `check` once per node in pre-order. A detector looks at
/// the node (or the child positions it owns) and pushes its detections.
pub trait Detector: Send + Sync {
    /// Identifier used by `--disable`-style filtering and logs
    fn name(&self) -> &'static str;

    fn check(&self, ctx: &LintContext<'_>, node: NodeId, out: &mut Vec<Detection>);
}

/// The `omit-unnecessary-parens-brackets` rule: all four detectors, on or off
/// as a whole
pub struct OmitRule {
    enabled: bool,
    detectors: Vec<Box<dyn Detector>>,
}

impl OmitRule {
    pub const NAME: &'static str = "omit-unnecessary-parens-brackets";

    pub fn new() -> Self {
        Self {
            enabled: true,
            detectors: vec![
                Box::new(DotNotationDetector::new()),
                Box::new(RedundantParenthesesDetector::new()),
                Box::new(RedundantBracesDetector::new()),
                Box::new(ArrowBodyDetector::new()),
            ],
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Run every detector over the whole tree
    pub fn run(&self, ctx: &LintContext<'_>) -> Vec<Detection> {
        if !self.enabled {
            return Vec::new();
        }
        let detectors: Vec<&dyn Detector> = self.detectors.iter().map(|d| d.as_ref()).collect();
        walk(ctx, &detectors)
    }
}

impl Default for OmitRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens that continue an expression from the previous line
///
/// An expression without a trailing `;` followed by one of these does not
/// end there, ASI does not apply.
pub(crate) fn continues_expression(token: &Token) -> bool {
    match token.kind {
        TokenKind::Template | TokenKind::RegExp => true,
        TokenKind::Word => token.value == "in" || token.value == "instanceof",
        TokenKind::Punctuator => {
            let v = token.value.as_str();
            !matches!(v, "{" | "}" | ")" | "]" | ";" | "++" | "--" | "!" | "~" | "=>" | "...")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TextRange;

    fn punct(v: &str) -> Token {
        Token::new(TokenKind::Punctuator, v, TextRange::new(0, v.len()))
    }

    #[test]
    fn test_rule_runs_all_detectors() {
        let rule = OmitRule::new();
        assert!(rule.is_enabled());
        assert_eq!(
            rule.detector_names(),
            vec!["dot-notation", "redundant-parens", "redundant-braces", "arrow-body"]
        );
    }

    #[test]
    fn test_disabled_rule_reports_nothing() {
        let parsed = crate::parser::JavaScriptParser::new()
            .unwrap()
            .parse("const x = (1)")
            .unwrap();
        let ctx = LintContext::new(&parsed.tree, &parsed.source);
        assert_eq!(OmitRule::new().run(&ctx).len(), 1);
        assert!(OmitRule::new().with_enabled(false).run(&ctx).is_empty());
    }

    #[test]
    fn test_continuation_tokens() {
        for v in ["(", "[", "+", "-", "/", ",", ".", "?.", "*", "%", "<", ">", "=", "?", ":", "&&", "||", "==="] {
            assert!(continues_expression(&punct(v)), "{}", v);
        }
        for v in ["}", ";", ")", "++", "--", "!", "{"] {
            assert!(!continues_expression(&punct(v)), "{}", v);
        }
        let word = |v: &str| Token::new(TokenKind::Word, v, TextRange::new(0, v.len()));
        assert!(continues_expression(&word("instanceof")));
        assert!(!continues_expression(&word("foo")));
    }
}
