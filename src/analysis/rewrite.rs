//! Rewrite planning
//!
//! Edits are computed against the original, immutable source text and are
//! only ever built from delimiters whose identity was checked first.

use crate::syntax::{SourceCode, TextRange, Token};
use serde::Serialize;
use tracing::debug;

/// Replace `range` of the original text with `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn delete(range: TextRange) -> Self {
        Self::new(range, "")
    }
}

/// A set of ordered, non-overlapping edits applied together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteEdit {
    edits: Vec<TextEdit>,
}

impl RewriteEdit {
    /// Returns `None` when two edits overlap
    pub fn new(mut edits: Vec<TextEdit>) -> Option<Self> {
        edits.sort_by_key(|e| (e.range.start, e.range.end));
        let overlapping = edits
            .windows(2)
            .any(|pair| pair[0].range.end > pair[1].range.start);
        if overlapping || edits.is_empty() {
            return None;
        }
        Some(Self { edits })
    }

    pub fn single(edit: TextEdit) -> Self {
        Self { edits: vec![edit] }
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Range covering every edit
    pub fn span(&self) -> TextRange {
        let first = self.edits[0].range;
        self.edits.iter().fold(first, |acc, e| acc.cover(e.range))
    }

    /// Apply to the text the edit was computed against
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for edit in &self.edits {
            out.push_str(&text[cursor..edit.range.start]);
            out.push_str(&edit.replacement);
            cursor = edit.range.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Deletion of `range`, or a single space when deleting it would glue two
/// word characters together (`return(x)` must not become `returnx`)
pub fn delete_range(source: &SourceCode, range: TextRange) -> TextEdit {
    let text = source.text();
    let before = text[..range.start].chars().next_back();
    let after = text[range.end..].chars().next();
    let glue = matches!((before, after), (Some(b), Some(a)) if is_word_char(b) && is_word_char(a));
    TextEdit::new(range, if glue { " " } else { "" })
}

/// Replacement of `range` by `replacement`, padded with a space on each side
/// where the new text would run into a neighbouring word (`else{c();}` must
/// not become `elsec();`)
pub fn replace_range(source: &SourceCode, range: TextRange, replacement: &str) -> TextEdit {
    if replacement.is_empty() {
        return delete_range(source, range);
    }
    let text = source.text();
    let glued = |outer: Option<char>, inner: Option<char>| {
        matches!((outer, inner), (Some(o), Some(i)) if is_word_char(o) && is_word_char(i))
    };
    let mut padded = String::with_capacity(replacement.len() + 2);
    if glued(text[..range.start].chars().next_back(), replacement.chars().next()) {
        padded.push(' ');
    }
    padded.push_str(replacement);
    if glued(text[range.end..].chars().next(), replacement.chars().next_back()) {
        padded.push(' ');
    }
    TextEdit::new(range, padded)
}

/// Removal of a single delimiter token
///
/// Refuses when the token is not the `expected` punctuator.
pub fn remove_delimiter(source: &SourceCode, token: &Token, expected: &str) -> Option<TextEdit> {
    if !token.is_punct(expected) {
        debug!(
            "Expected '{}' at {}, found '{}'",
            expected, token.range, token.value
        );
        return None;
    }
    Some(delete_range(source, token.range))
}

/// Grouping pair removal, refused when either token is not a parenthesis
pub fn remove_grouping(source: &SourceCode, open: &Token, close: &Token) -> Option<RewriteEdit> {
    let open = remove_delimiter(source, open, "(")?;
    let close = remove_delimiter(source, close, ")")?;
    RewriteEdit::new(vec![open, close])
}
