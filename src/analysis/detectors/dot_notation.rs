//! Dot Notation Detector
//!
//! Detects bracket property access with a string key that is a plain
//! identifier name.
//!
//! ## Examples Detected
//!
//! ```javascript
//! obj['foo'] = 1            // -> obj.foo = 1
//! config["timeout"]         // -> config.timeout
//! ```
//!
//! ## Not Detected
//!
//! ```javascript
//! obj['not-valid']          // Not an identifier
//! obj['class']              // Reserved word
//! obj?.['foo']              // Optional chaining
//! obj[key]                  // Not a string literal
//! ```

use super::Detector;
use crate::analysis::{is_valid_bare_identifier, Detection, Issue, LintContext, RewriteEdit, TextEdit};
use crate::syntax::{LiteralValue, NodeId, NodeKind, TextRange};
use tracing::debug;

/// Detector for `obj['name']` accesses
pub struct DotNotationDetector;

impl DotNotationDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DotNotationDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for DotNotationDetector {
    fn name(&self) -> &'static str {
        "dot-notation"
    }

    fn check(&self, ctx: &LintContext<'_>, node: NodeId, out: &mut Vec<Detection>) {
        if let Some(detection) = check_indexed_access(ctx, node) {
            out.push(detection);
        }
    }
}

/// Check a computed member access whose index is a string literal
pub fn check_indexed_access(ctx: &LintContext<'_>, node: NodeId) -> Option<Detection> {
    let NodeKind::MemberAccess {
        object,
        property,
        computed: true,
        optional: false,
    } = ctx.kind(node)
    else {
        return None;
    };
    let NodeKind::Literal(LiteralValue::String(Some(name))) = ctx.kind(*property) else {
        return None;
    };
    if !is_valid_bare_identifier(name) {
        return None;
    }

    let detection = Detection::new(*property, Issue::UseDotNotation, ctx.range(*property));
    Some(detection.with_edit(dot_access_edit(ctx, *object, *property, name)))
}

fn dot_access_edit(
    ctx: &LintContext<'_>,
    object: NodeId,
    property: NodeId,
    name: &str,
) -> Option<RewriteEdit> {
    let property_range = ctx.range(property);
    let open = ctx.source.token_before(property_range)?;
    let close = ctx.source.token_after(property_range)?;
    if !open.is_punct("[") || !close.is_punct("]") {
        debug!("Brackets not found around {}", property_range);
        return None;
    }

    let object_range = ctx.range(object);
    let brackets = TextRange::new(open.range.start, close.range.end);
    if !ctx
        .source
        .is_whitespace_between(object_range.end, open.range.start)
        || ctx.source.has_comments_in(brackets)
    {
        debug!("Comments inside brackets at {}, no fix", property_range);
        return None;
    }

    // `1.foo` reads as a number literal
    if matches!(ctx.kind(object), NodeKind::Literal(LiteralValue::Number)) {
        let digits = ctx.text(object_range);
        if digits.chars().all(|c| c.is_ascii_digit() || c == '_') {
            debug!("Integer object at {}, no fix", object_range);
            return None;
        }
    }

    Some(RewriteEdit::single(TextEdit::new(
        brackets,
        format!(".{}", name),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::walk;
    use crate::parser::JavaScriptParser;

    fn detect(code: &str) -> Vec<(String, Option<String>)> {
        let parsed = JavaScriptParser::new().unwrap().parse(code).unwrap();
        let ctx = LintContext::new(&parsed.tree, &parsed.source);
        walk(&ctx, &[&DotNotationDetector::new()])
            .into_iter()
            .map(|d| (ctx.text(d.range).to_string(), d.edit.map(|e| e.apply(code))))
            .collect()
    }

    #[test]
    fn test_string_key_rewritten() {
        assert_eq!(
            detect("obj['foo'] = 1"),
            vec![("'foo'".to_string(), Some("obj.foo = 1".to_string()))]
        );
        assert_eq!(
            detect("a.b[\"c\"]()"),
            vec![("\"c\"".to_string(), Some("a.b.c()".to_string()))]
        );
    }

    #[test]
    fn test_invalid_names_ignored() {
        assert!(detect("obj['not-valid'] = 2").is_empty());
        assert!(detect("obj['class']").is_empty());
        assert!(detect("obj['']").is_empty());
        assert!(detect("obj['1a']").is_empty());
    }

    #[test]
    fn test_non_literal_and_optional_ignored() {
        assert!(detect("obj[key]").is_empty());
        assert!(detect("obj[0]").is_empty());
        assert!(detect("obj?.['foo']").is_empty());
        assert!(detect("obj.foo = 1").is_empty());
    }

    #[test]
    fn test_escaped_string_ignored() {
        assert!(detect("obj['\\u0066oo']").is_empty());
    }

    #[test]
    fn test_comment_inside_brackets_has_no_fix() {
        let found = detect("obj[/*c*/'foo']");
        assert_eq!(found.len(), 1);
        assert!(found[0].1.is_none());
        let found = detect("obj['foo' /*c*/]");
        assert_eq!(found.len(), 1);
        assert!(found[0].1.is_none());
        let found = detect("obj /*c*/ ['foo']");
        assert_eq!(found.len(), 1);
        assert!(found[0].1.is_none());
    }

    #[test]
    fn test_integer_object_has_no_fix() {
        let found = detect("1['toFixed']");
        assert_eq!(found.len(), 1);
        assert!(found[0].1.is_none());
        assert_eq!(
            detect("1.5['toFixed']")[0].1.as_deref(),
            Some("1.5.toFixed")
        );
    }

    #[test]
    fn test_nested_accesses() {
        let found = detect("a['b']['c']");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].1.as_deref(), Some("a.b['c']"));
        assert_eq!(found[1].1.as_deref(), Some("a['b'].c"));
    }
}
