//! Multi-pass fixing
//!
//! Each pass parses the current text, runs the rule and applies every edit
//! that does not overlap an edit already taken in the same pass. Nested
//! grouping layers are peeled one per pass.

use crate::analysis::detectors::OmitRule;
use crate::analysis::{Detection, LintContext, RewriteEdit, TextEdit};
use crate::error::Result;
use crate::parser::JavaScriptParser;
use crate::syntax::SourceCode;
use tracing::{debug, warn};

/// Outcome of [`fix_source`]
#[derive(Debug, Clone)]
pub struct FixResult {
    /// Fixed source, tokenized
    pub source: SourceCode,
    /// Number of detections whose edit was applied
    pub applied: usize,
    /// Passes that changed the text
    pub passes: usize,
    /// Detections still present in the fixed text
    pub remaining: Vec<Detection>,
}

impl FixResult {
    pub fn text(&self) -> &str {
        self.source.text()
    }

    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

/// Apply `edits` in source order, skipping any edit that touches or overlaps
/// one already accepted
///
/// Returns the new text and the number of applied edits.
pub fn apply_edits(text: &str, edits: &[RewriteEdit]) -> (String, usize) {
    let mut ordered: Vec<&RewriteEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| {
        let span = e.span();
        (span.start, span.end)
    });

    let mut accepted: Vec<&TextEdit> = Vec::new();
    let mut last_end: Option<usize> = None;
    let mut applied = 0;
    for edit in ordered {
        let span = edit.span();
        if last_end.is_some_and(|end| span.start <= end) {
            debug!("Skipping overlapping edit at {}", span);
            continue;
        }
        accepted.extend(edit.edits());
        last_end = Some(span.end);
        applied += 1;
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in accepted {
        out.push_str(&text[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    out.push_str(&text[cursor..]);
    (out, applied)
}

/// Parse, lint and apply until nothing changes or `max_passes` is reached
///
/// A pass whose output no longer parses is discarded and fixing stops at the
/// last valid text.
pub fn fix_source(
    parser: &mut JavaScriptParser,
    rule: &OmitRule,
    text: &str,
    max_passes: usize,
) -> Result<FixResult> {
    let mut parsed = parser.parse(text)?;
    let mut detections = rule.run(&LintContext::new(&parsed.tree, &parsed.source));
    let mut applied = 0;
    let mut passes = 0;

    while passes < max_passes {
        let edits: Vec<RewriteEdit> = detections.iter().filter_map(|d| d.edit.clone()).collect();
        if edits.is_empty() {
            break;
        }
        let (next, count) = apply_edits(parsed.source.text(), &edits);
        if count == 0 || next == parsed.source.text() {
            break;
        }

        let reparsed = match parser.parse(&next) {
            Ok(reparsed) => reparsed,
            Err(e) => {
                warn!("Discarding fix pass {}: {}", passes + 1, e);
                break;
            }
        };
        parsed = reparsed;
        detections = rule.run(&LintContext::new(&parsed.tree, &parsed.source));
        applied += count;
        passes += 1;
        debug!("Fix pass {}: {} edits applied", passes, count);
    }

    Ok(FixResult {
        source: parsed.source,
        applied,
        passes,
        remaining: detections,
    })
}
