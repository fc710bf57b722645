//! Arrow Body Detector
//!
//! Detects arrow functions whose block body only returns a value.
//!
//! ## Examples Detected
//!
//! ```javascript
//! const f = () => { return 1 }             // -> () => 1
//! const g = () => { return { a: 1 } }      // -> () => ({ a: 1 })
//! ```
//!
//! ## Not Detected
//!
//! ```javascript
//! const f = () => { run(); return 1 }      // More than one statement
//! const g = () => { return }               // Nothing returned
//! ```

use super::{continues_expression, Detector};
use crate::analysis::{Detection, Issue, LintContext, RewriteEdit, TextEdit};
use crate::syntax::{NodeId, NodeKind, TextRange, Token, TokenKind};
use tracing::debug;

/// Detector for `() => { return expr }`
pub struct ArrowBodyDetector;

impl ArrowBodyDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArrowBodyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ArrowBodyDetector {
    fn name(&self) -> &'static str {
        "arrow-body"
    }

    fn check(&self, ctx: &LintContext<'_>, node: NodeId, out: &mut Vec<Detection>) {
        if let Some(detection) = check_arrow_braces(ctx, node) {
            out.push(detection);
        }
    }
}

/// Check an arrow function whose block body is a lone `return expr`
pub fn check_arrow_braces(ctx: &LintContext<'_>, arrow: NodeId) -> Option<Detection> {
    let NodeKind::ArrowFunction {
        body,
        expression: false,
        ..
    } = ctx.kind(arrow)
    else {
        return None;
    };
    let NodeKind::BlockStatement { body: statements } = ctx.kind(*body) else {
        return None;
    };
    let [stmt] = statements.as_slice() else {
        return None;
    };
    let NodeKind::ReturnStatement {
        argument: Some(argument),
    } = ctx.kind(*stmt)
    else {
        return None;
    };

    let detection = Detection::new(*body, Issue::UnnecessaryBraces, ctx.range(*body));
    Some(detection.with_edit(expression_body_edit(ctx, *body, *stmt, *argument)))
}

fn expression_body_edit(
    ctx: &LintContext<'_>,
    block: NodeId,
    stmt: NodeId,
    argument: NodeId,
) -> Option<RewriteEdit> {
    let block_range = ctx.range(block);
    let arrow = ctx.source.token_before(block_range)?;
    let open = ctx.first_token(block)?;
    let close = ctx.last_token(block)?;
    let keyword = ctx.first_token(stmt)?;
    if !arrow.is_punct("=>")
        || !open.is_punct("{")
        || !close.is_punct("}")
        || !keyword.is_word("return")
    {
        debug!("Unexpected arrow body tokens at {}", block_range);
        return None;
    }

    let argument_range = ctx.range(argument);
    let gaps = [
        TextRange::new(arrow.range.end, open.range.start),
        TextRange::new(open.range.end, keyword.range.start),
        TextRange::new(keyword.range.end, argument_range.start),
        TextRange::new(argument_range.end, close.range.start),
    ];
    if gaps.iter().any(|gap| ctx.source.has_comments_in(*gap)) {
        debug!("Comments in arrow body at {}, no fix", block_range);
        return None;
    }

    if let Some(next) = ctx.source.token_after(block_range) {
        let closes = matches!(next.value.as_str(), ")" | "]" | "}" | "," | ";" | ":");
        if !closes && continues_expression(next) {
            debug!("Token after arrow at {} would extend its body", block_range);
            return None;
        }
    }

    let stmt_last = ctx.last_token(stmt)?;
    let end = if stmt_last.is_punct(";") { stmt_last } else { close };
    let items = ctx.source.tokens_between(keyword, end, true);
    let first = items.first()?;
    let keep_line_breaks = has_statements(ctx, argument, &items);
    let mut text = collapse_whitespace(ctx, &items, keep_line_breaks);

    let wrap = first.is_punct("{")
        || (matches!(ctx.kind(argument), NodeKind::SequenceExpr { .. }) && !first.is_punct("("));
    if wrap {
        text = format!("({})", text);
    }

    Some(RewriteEdit::single(TextEdit::new(
        TextRange::new(arrow.range.end, block_range.end),
        format!(" {}", text),
    )))
}

/// Nested function or class bodies, where line breaks may end statements
fn has_statements(ctx: &LintContext<'_>, argument: NodeId, items: &[&Token]) -> bool {
    items.iter().any(|t| t.is_word("class"))
        || ctx
            .tree
            .descendants(argument)
            .any(|id| matches!(ctx.kind(id), NodeKind::BlockStatement { .. }))
}

/// Join tokens verbatim, turning each whitespace gap into one space
fn collapse_whitespace(ctx: &LintContext<'_>, items: &[&Token], keep_line_breaks: bool) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;
    for &token in items {
        if let Some(prev) = prev {
            let gap = TextRange::new(prev.range.end, token.range.start);
            if !gap.is_empty() {
                let line_break = ctx.source.has_line_break_between(gap.start, gap.end);
                if line_break && (keep_line_breaks || prev.kind == TokenKind::LineComment) {
                    out.push_str(ctx.text(gap));
                } else {
                    out.push(' ');
                }
            }
        }
        out.push_str(&token.value);
        prev = Some(token);
    }
    out
}
