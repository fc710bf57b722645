//! Redundant Parentheses Detector
//!
//! Detects grouping parentheses that can be dropped without changing how the
//! expression parses.
//!
//! ## Detection Algorithm
//!
//! 1. For each node, look at the child positions that may carry grouping
//!    (initializers, return arguments, operands, call arguments, array
//!    elements, property values, arrow bodies)
//! 2. Check the child is directly wrapped by `(` and `)` tokens
//! 3. Report when one of these holds:
//!    - The parent is grouped too and its parens wrap ours (double parens)
//!    - A literal or identifier sits in a primary position
//!    - An `await`/`yield` is a statement, initializer, return value or
//!      assigned value
//!    - The body of an expression arrow is not an object literal
//!    - A JSX element is returned
//!
//! ## Examples Detected
//!
//! ```javascript
//! const x = (1)              // REDUNDANT: literal initializer
//! const y = (await load())   // REDUNDANT: awaited initializer
//! const f = () => (value)    // REDUNDANT: arrow body
//! function App() {
//!     return (
//!         <div></div>
//!     )                      // REDUNDANT: returned JSX
//! }
//! ```
//!
//! ## Not Detected (parens are useful)
//!
//! ```javascript
//! const x = (a + b) * c      // Needed for precedence
//! const fn = () => ({ a: 1 }) // Object literal body
//! const seq = () => (a, b)   // Sequence body
//! ("use strict")             // Would become a directive
//! ```

use super::Detector;
use crate::analysis::{
    delete_range, remove_grouping, Detection, Issue, LintContext, RewriteEdit, TextEdit,
};
use crate::syntax::{LiteralValue, NodeId, NodeKind, TextRange, Token};
use tracing::debug;

/// Detector for redundant grouping parentheses
pub struct RedundantParenthesesDetector;

impl RedundantParenthesesDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RedundantParenthesesDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for RedundantParenthesesDetector {
    fn name(&self) -> &'static str {
        "redundant-parens"
    }

    fn check(&self, ctx: &LintContext<'_>, node: NodeId, out: &mut Vec<Detection>) {
        out.extend(
            grouping_positions(ctx.kind(node))
                .into_iter()
                .filter_map(|child| check_grouping(ctx, child)),
        );
    }
}

/// Child positions of `kind` whose grouping is inspected
fn grouping_positions(kind: &NodeKind) -> Vec<NodeId> {
    match kind {
        NodeKind::VariableDeclarator { init, .. } => init.iter().copied().collect(),
        NodeKind::ExpressionStatement { expression } => vec![*expression],
        NodeKind::ReturnStatement { argument } => argument.iter().copied().collect(),
        NodeKind::ArrowFunction {
            body,
            expression: true,
            ..
        } => vec![*body],
        NodeKind::BinaryExpr { left, right, .. } | NodeKind::LogicalExpr { left, right, .. } => {
            vec![*left, *right]
        }
        NodeKind::AssignmentExpr {
            operator, right, ..
        } if operator == "=" => vec![*right],
        NodeKind::UnaryExpr { argument, .. } | NodeKind::AwaitExpr { argument } => {
            vec![*argument]
        }
        NodeKind::YieldExpr { argument, .. } => argument.iter().copied().collect(),
        NodeKind::ConditionalExpr {
            test,
            consequent,
            alternate,
        } => vec![*test, *consequent, *alternate],
        NodeKind::CallExpr {
            callee, arguments, ..
        }
        | NodeKind::NewExpr { callee, arguments } => {
            let mut out = arguments.clone();
            out.push(*callee);
            out
        }
        NodeKind::ArrayLiteral { elements } => elements.clone(),
        NodeKind::Property { value, .. } => vec![*value],
        _ => Vec::new(),
    }
}

/// Check whether the grouping directly around `node` is redundant
pub fn check_grouping(ctx: &LintContext<'_>, node: NodeId) -> Option<Detection> {
    let (open, close) = ctx.grouping_tokens(node)?;
    let parent = ctx.parent(node)?;

    let redundant = is_double_grouped(ctx, parent, open, close)
        || is_primary_position(ctx, node, parent)
        || is_suspend_position(ctx, node, parent)
        || is_plain_arrow_body(ctx, node, parent)
        || is_returned_jsx(ctx, node, parent);
    if !redundant {
        return None;
    }

    let range = TextRange::new(open.range.start, close.range.end);
    let edit = if needs_return_collapse(ctx, node, parent, open) {
        collapse_return_grouping(ctx, node, parent, close)
    } else {
        remove_grouping(ctx.source, open, close)
    };
    Some(Detection::new(node, Issue::UnnecessaryParens, range).with_edit(edit))
}

/// `((expr))`: the parent's own parens sit right outside ours
fn is_double_grouped(ctx: &LintContext<'_>, parent: NodeId, open: &Token, close: &Token) -> bool {
    let Some((outer_open, outer_close)) = ctx.grouping_tokens(parent) else {
        return false;
    };
    let before = ctx.source.token_before(open.range).map(|t| t.range);
    let after = ctx.source.token_after(close.range).map(|t| t.range);
    before == Some(outer_open.range) && after == Some(outer_close.range)
}

fn is_primary_position(ctx: &LintContext<'_>, node: NodeId, parent: NodeId) -> bool {
    if !ctx.kind(node).is_literal_or_identifier() {
        return false;
    }
    match ctx.kind(parent) {
        NodeKind::VariableDeclarator { init, .. } => *init == Some(node),
        NodeKind::ReturnStatement { argument } => *argument == Some(node),
        NodeKind::ExpressionStatement { expression } => {
            *expression == node && !statement_needs_grouping(ctx, node, parent)
        }
        NodeKind::ArrayLiteral { elements } => elements.contains(&node),
        NodeKind::Property {
            value,
            method,
            shorthand,
            ..
        } => *value == node && !method && !shorthand,
        _ => false,
    }
}

/// Ungrouped, the statement would mean something else
fn statement_needs_grouping(ctx: &LintContext<'_>, node: NodeId, stmt: NodeId) -> bool {
    match ctx.kind(node) {
        NodeKind::Identifier { name } => name == "let",
        NodeKind::Literal(LiteralValue::String(_)) => in_directive_prologue(ctx, stmt),
        _ => false,
    }
}

fn in_directive_prologue(ctx: &LintContext<'_>, stmt: NodeId) -> bool {
    let Some(body) = ctx.tree.enclosing_body(stmt) else {
        return false;
    };
    for &candidate in body {
        if candidate == stmt {
            return true;
        }
        let is_string_statement = match ctx.kind(candidate) {
            NodeKind::ExpressionStatement { expression } => matches!(
                ctx.kind(*expression),
                NodeKind::Literal(LiteralValue::String(_))
            ),
            _ => false,
        };
        if !is_string_statement {
            return false;
        }
    }
    false
}

fn is_suspend_position(ctx: &LintContext<'_>, node: NodeId, parent: NodeId) -> bool {
    if !matches!(
        ctx.kind(node),
        NodeKind::AwaitExpr { .. } | NodeKind::YieldExpr { .. }
    ) {
        return false;
    }
    match ctx.kind(parent) {
        NodeKind::ExpressionStatement { .. }
        | NodeKind::VariableDeclarator { .. }
        | NodeKind::ReturnStatement { .. } => true,
        NodeKind::AssignmentExpr {
            operator, right, ..
        } => operator == "=" && *right == node,
        _ => false,
    }
}

fn is_plain_arrow_body(ctx: &LintContext<'_>, node: NodeId, parent: NodeId) -> bool {
    let NodeKind::ArrowFunction {
        body,
        expression: true,
        ..
    } = ctx.kind(parent)
    else {
        return false;
    };
    if *body != node {
        return false;
    }
    match ctx.kind(node) {
        NodeKind::ObjectLiteral { .. } | NodeKind::SequenceExpr { .. } => false,
        // `({}).x` would start a block
        _ => !ctx.first_token(node).map_or(false, |t| t.is_punct("{")),
    }
}

fn is_returned_jsx(ctx: &LintContext<'_>, node: NodeId, parent: NodeId) -> bool {
    ctx.kind(node).is_jsx()
        && matches!(ctx.kind(parent), NodeKind::ReturnStatement { argument } if *argument == Some(node))
}

/// Returned values are pulled up next to the keyword when the grouping
/// starts on another line or wraps JSX
///
/// Only when `open` directly follows `return`; outer layers of `((x))` are
/// peeled first by plain removal.
fn needs_return_collapse(
    ctx: &LintContext<'_>,
    node: NodeId,
    parent: NodeId,
    open: &Token,
) -> bool {
    if !matches!(ctx.kind(parent), NodeKind::ReturnStatement { .. }) {
        return false;
    }
    let Some(keyword) = ctx.first_token(parent) else {
        return false;
    };
    if ctx.source.token_after(keyword.range).map(|t| t.range) != Some(open.range) {
        return false;
    }
    if ctx.kind(node).is_jsx() {
        return true;
    }
    ctx.source
        .has_line_break_between(keyword.range.end, ctx.range(node).start)
}

/// `return (\n  <div/>\n)` becomes `return <div/>`
fn collapse_return_grouping(
    ctx: &LintContext<'_>,
    node: NodeId,
    parent: NodeId,
    close: &Token,
) -> Option<RewriteEdit> {
    let keyword = ctx.first_token(parent)?;
    if !keyword.is_word("return") || !close.is_punct(")") {
        debug!("Cannot collapse return grouping at {}", ctx.range(node));
        return None;
    }
    let range = ctx.range(node);
    let lead = TextRange::new(keyword.range.end, range.start);
    let tail = TextRange::new(range.end, close.range.end);
    if ctx.source.has_comments_in(lead) || ctx.source.has_comments_in(tail) {
        debug!("Comments around returned value at {}, no fix", range);
        return None;
    }
    RewriteEdit::new(vec![TextEdit::new(lead, " "), delete_range(ctx.source, tail)])
}
