//! Identifier-name classification
//!
//! Decides whether a string property key can be written with dot notation.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Words that cannot appear as a bare identifier reference
const RESERVED_WORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

fn reserved_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| RESERVED_WORDS.iter().copied().collect())
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[\p{L}\p{Nl}$_][\p{L}\p{Nl}\p{Mn}\p{Mc}\p{Nd}\p{Pc}$_]*$")
            .expect("identifier pattern is valid")
    })
}

/// True when `name` can be used as `obj.name`
pub fn is_valid_bare_identifier(name: &str) -> bool {
    !name.is_empty() && !reserved_words().contains(name) && identifier_pattern().is_match(name)
}
