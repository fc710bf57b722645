//! Token and text access over one source unit

use super::TextRange;

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Operators and delimiters: `(`, `{`, `=>`, `?.`, ...
    Punctuator,
    /// Identifiers and keywords
    Word,
    String,
    Template,
    Numeric,
    RegExp,
    JsxText,
    LineComment,
    BlockComment,
}

impl TokenKind {
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// A lexical unit with its literal value and byte range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub range: TextRange,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, range: TextRange) -> Self {
        Self {
            kind,
            value: value.into(),
            range,
        }
    }

    /// Punctuator with exactly this text
    pub fn is_punct(&self, value: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.value == value
    }

    /// Identifier or keyword with exactly this text
    pub fn is_word(&self, value: &str) -> bool {
        self.kind == TokenKind::Word && self.value == value
    }
}

/// Source text plus its ordered token and comment streams
#[derive(Debug, Clone)]
pub struct SourceCode {
    text: String,
    tokens: Vec<Token>,
    comments: Vec<Token>,
    line_starts: Vec<usize>,
}

impl SourceCode {
    /// Build from text and tokens in any order; comments are split out
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        let text = text.into();
        let (mut comments, mut tokens): (Vec<_>, Vec<_>) =
            tokens.into_iter().partition(|t| t.kind.is_comment());
        tokens.sort_by_key(|t| t.range.start);
        comments.sort_by_key(|t| t.range.start);

        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            text,
            tokens,
            comments,
            line_starts,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw text of `range`, empty when the range is out of bounds
    pub fn slice(&self, range: TextRange) -> &str {
        self.text.get(range.start..range.end).unwrap_or("")
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments(&self) -> &[Token] {
        &self.comments
    }

    /// Last code token ending at or before `range.start`
    pub fn token_before(&self, range: TextRange) -> Option<&Token> {
        let idx = self.tokens.partition_point(|t| t.range.end <= range.start);
        idx.checked_sub(1).map(|i| &self.tokens[i])
    }

    /// First code token starting at or after `range.end`
    pub fn token_after(&self, range: TextRange) -> Option<&Token> {
        let idx = self.tokens.partition_point(|t| t.range.start < range.end);
        self.tokens.get(idx)
    }

    /// First code token inside `range`
    pub fn first_token(&self, range: TextRange) -> Option<&Token> {
        self.token_after(TextRange::new(range.start, range.start))
            .filter(|t| t.range.end <= range.end)
    }

    /// Last code token inside `range`
    pub fn last_token(&self, range: TextRange) -> Option<&Token> {
        self.token_before(TextRange::new(range.end, range.end))
            .filter(|t| t.range.start >= range.start)
    }

    /// Tokens strictly between `a` and `b`, in source order
    pub fn tokens_between(&self, a: &Token, b: &Token, include_comments: bool) -> Vec<&Token> {
        let gap = TextRange::new(a.range.end, b.range.start.max(a.range.end));
        let mut out: Vec<&Token> = self
            .tokens
            .iter()
            .filter(|t| gap.contains_range(t.range))
            .collect();
        if include_comments {
            out.extend(self.comments_in(gap));
            out.sort_by_key(|t| t.range.start);
        }
        out
    }

    /// Comments fully contained in `range`
    pub fn comments_in(&self, range: TextRange) -> impl Iterator<Item = &Token> {
        let first = self.comments.partition_point(|c| c.range.start < range.start);
        self.comments[first..]
            .iter()
            .take_while(move |c| c.range.start < range.end)
            .filter(move |c| c.range.end <= range.end)
    }

    pub fn has_comments_in(&self, range: TextRange) -> bool {
        self.comments_in(range).next().is_some()
    }

    /// True when the gap between two offsets holds whitespace only
    pub fn is_whitespace_between(&self, start: usize, end: usize) -> bool {
        start >= end || self.slice(TextRange::new(start, end)).trim().is_empty()
    }

    /// True when `text[start..end]` contains a line break
    pub fn has_line_break_between(&self, start: usize, end: usize) -> bool {
        start < end
            && self
                .slice(TextRange::new(start, end))
                .contains(['\n', '\r', '\u{2028}', '\u{2029}'])
    }

    /// 1-based line and column (in characters) of a byte offset
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&s| s <= offset).max(1);
        let line_start = self.line_starts[line - 1];
        let column = self
            .text
            .get(line_start..offset.min(self.text.len()))
            .map(|s| s.chars().count())
            .unwrap_or(0);
        (line, column + 1)
    }
}
