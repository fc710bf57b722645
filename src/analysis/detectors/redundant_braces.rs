//! Redundant Braces Detector
//!
//! Detects blocks around a single statement in `if`/`else` branches and loop
//! bodies.
//!
//! ## Detection Algorithm
//!
//! 1. Visit `if`, `for`, `for-in`, `for-of`, `while` and `do-while` nodes
//! 2. Take the branch or body when it is a block with exactly one statement
//! 3. Skip declarations (unwrapping changes their scope), nested blocks and
//!    an `if` directly inside the branch of an `if` without `else` (dangling
//!    `else`); with an `else` the block is reported but kept
//! 4. Rewrite the block to its inner statement when the statement stays
//!    terminated without the closing brace
//!
//! ## Examples Detected
//!
//! ```javascript
//! for (let i = 0; i < 100; i++) { doSomething() }   // -> ... i++) doSomething()
//! while (busy) { wait(); }
//! if (x) { go() } else { stop() }
//! ```
//!
//! ## Not Detected
//!
//! ```javascript
//! if (x) { do1(); do2(); }   // Two statements
//! if (x) { const y = 2 }     // Declaration
//! if (a) { if (b) foo() }    // Dangling else
//! ```

use super::{continues_expression, Detector};
use crate::analysis::{replace_range, Detection, Issue, LintContext, RewriteEdit};
use crate::syntax::{NodeId, NodeKind, TextRange, TokenKind};
use tracing::debug;

/// Detector for braces around a single statement
pub struct RedundantBracesDetector;

impl RedundantBracesDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RedundantBracesDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for RedundantBracesDetector {
    fn name(&self) -> &'static str {
        "redundant-braces"
    }

    fn check(&self, ctx: &LintContext<'_>, node: NodeId, out: &mut Vec<Detection>) {
        let blocks: Vec<NodeId> = match ctx.kind(node) {
            NodeKind::IfStatement {
                consequent,
                alternate,
                ..
            } => std::iter::once(*consequent)
                .chain(alternate.iter().copied())
                .collect(),
            NodeKind::ForStatement { body, .. }
            | NodeKind::ForInStatement { body, .. }
            | NodeKind::WhileStatement { body, .. }
            | NodeKind::DoWhileStatement { body, .. } => vec![*body],
            _ => return,
        };
        out.extend(
            blocks
                .into_iter()
                .filter_map(|block| check_block_redundancy(ctx, block, node)),
        );
    }
}

/// Check the block controlled by `controlling` (an `if` or a loop)
pub fn check_block_redundancy(
    ctx: &LintContext<'_>,
    block: NodeId,
    controlling: NodeId,
) -> Option<Detection> {
    let NodeKind::BlockStatement { body } = ctx.kind(block) else {
        return None;
    };
    let [stmt] = body.as_slice() else {
        return None;
    };
    let stmt = *stmt;
    let stmt_kind = ctx.kind(stmt);
    if stmt_kind.is_declaration() || matches!(stmt_kind, NodeKind::BlockStatement { .. }) {
        return None;
    }
    let detection = Detection::new(block, Issue::UnnecessaryBraces, ctx.range(block));
    if let NodeKind::IfStatement {
        consequent,
        alternate,
        ..
    } = ctx.kind(controlling)
    {
        if *consequent == block && matches!(stmt_kind, NodeKind::IfStatement { .. }) {
            if alternate.is_none() {
                return None;
            }
            // the inner `if` would take over the `else`
            if ends_with_open_if(ctx, stmt) {
                debug!("Unwrapping would capture the else at {}", ctx.range(block));
                return Some(detection);
            }
        }
    }

    Some(detection.with_edit(unwrap_block_edit(ctx, block, stmt)))
}

fn unwrap_block_edit(ctx: &LintContext<'_>, block: NodeId, stmt: NodeId) -> Option<RewriteEdit> {
    let block_range = ctx.range(block);
    let open = ctx.first_token(block)?;
    let close = ctx.last_token(block)?;
    if !open.is_punct("{") || !close.is_punct("}") {
        debug!("Block delimiters not found at {}", block_range);
        return None;
    }

    let first = ctx.first_token(stmt)?;
    let last = ctx.last_token(stmt)?;
    let after_open = ctx.source.token_after(open.range)?;
    let before_close = ctx.source.token_before(close.range)?;
    if after_open.range != first.range || before_close.range != last.range {
        debug!("Unexpected tokens inside block at {}", block_range);
        return None;
    }

    let trailing = TextRange::new(last.range.end, close.range.start);
    if ctx
        .source
        .comments_in(trailing)
        .any(|c| c.kind == TokenKind::LineComment)
    {
        debug!("Line comment would swallow the block end at {}", block_range);
        return None;
    }

    if !is_terminated(ctx, stmt) && !ends_cleanly_before_next(ctx, close.range.end) {
        debug!("Statement relies on the closing brace at {}", block_range);
        return None;
    }
    if ends_with_open_if(ctx, stmt) && next_is_word(ctx, close.range.end, "else") {
        debug!("Unwrapping would capture a trailing else at {}", block_range);
        return None;
    }

    let inner = ctx
        .text(TextRange::new(open.range.end, close.range.start))
        .trim();
    Some(RewriteEdit::single(replace_range(ctx.source, block_range, inner)))
}

/// True when the statement needs no ASI to end
fn is_terminated(ctx: &LintContext<'_>, stmt: NodeId) -> bool {
    let Some(last) = ctx.last_token(stmt) else {
        return false;
    };
    if last.is_punct(";") {
        return true;
    }
    match ctx.kind(stmt) {
        NodeKind::IfStatement {
            consequent,
            alternate,
            ..
        } => is_terminated(ctx, alternate.unwrap_or(*consequent)),
        NodeKind::ForStatement { body, .. }
        | NodeKind::ForInStatement { body, .. }
        | NodeKind::WhileStatement { body, .. } => is_terminated(ctx, *body),
        NodeKind::BlockStatement { .. } => true,
        // try, switch, labeled blocks
        NodeKind::Other { .. } => last.is_punct("}"),
        _ => false,
    }
}

/// ASI will still end the statement at the old block end
fn ends_cleanly_before_next(ctx: &LintContext<'_>, block_end: usize) -> bool {
    let Some(next) = ctx
        .source
        .token_after(TextRange::new(block_end, block_end))
    else {
        return true;
    };
    if next.is_punct("}") {
        return true;
    }
    ctx.source
        .has_line_break_between(block_end, next.range.start)
        && !continues_expression(next)
}

/// The statement ends in an `if` that an `else` could still attach to
fn ends_with_open_if(ctx: &LintContext<'_>, stmt: NodeId) -> bool {
    match ctx.kind(stmt) {
        NodeKind::IfStatement {
            alternate: None, ..
        } => true,
        NodeKind::IfStatement {
            alternate: Some(alternate),
            ..
        } => ends_with_open_if(ctx, *alternate),
        NodeKind::ForStatement { body, .. }
        | NodeKind::ForInStatement { body, .. }
        | NodeKind::WhileStatement { body, .. } => ends_with_open_if(ctx, *body),
        _ => false,
    }
}

fn next_is_word(ctx: &LintContext<'_>, offset: usize, word: &str) -> bool {
    ctx.source
        .token_after(TextRange::new(offset, offset))
        .map_or(false, |t| t.is_word(word))
}
