//! JavaScript/JSX front end built on tree-sitter
//!
//! tree-sitter produces a concrete syntax tree. This module flattens its
//! leaves into a token stream and lowers the named nodes into the
//! ESTree-shaped [`SyntaxTree`] the rule engine works on. Grouping
//! parentheses (`parenthesized_expression`) are dropped during lowering,
//! their `(`/`)` leaves stay in the token stream.

use super::ParsedSource;
use crate::error::{Error, Result};
use crate::syntax::{
    DeclarationKind, LiteralValue, NodeId, NodeKind, SourceCode, SyntaxTree, TextRange, Token,
    TokenKind,
};
use std::path::Path;
use tracing::debug;
use tree_sitter::{Node as TsNode, Parser};

/// Nodes that become a single token instead of being split into leaves
const ATOMIC_TOKENS: &[&str] = &[
    "string",
    "template_string",
    "regex",
    "number",
    "comment",
    "html_comment",
    "jsx_text",
    "hash_bang_line",
];

/// JavaScript parser producing a [`ParsedSource`]
pub struct JavaScriptParser {
    parser: Parser,
}

impl JavaScriptParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_javascript::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Parse text that does not come from a file
    pub fn parse(&mut self, text: &str) -> Result<ParsedSource> {
        self.parse_file(Path::new("<input>"), text)
    }

    /// Parse `text`, using `path` for error reporting
    pub fn parse_file(&mut self, path: &Path, text: &str) -> Result<ParsedSource> {
        let ts_tree = self.parser.parse(text, None).ok_or_else(|| Error::Syntax {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
        })?;
        let root = ts_tree.root_node();

        if root.has_error() {
            let (line, column) = first_error(root)
                .map(|n| {
                    let pos = n.start_position();
                    (pos.row + 1, pos.column + 1)
                })
                .unwrap_or((1, 1));
            return Err(Error::Syntax {
                path: path.to_path_buf(),
                line,
                column,
            });
        }

        let mut tokens = Vec::new();
        collect_tokens(root, text, &mut tokens);

        let mut lowerer = Lowerer {
            text,
            tree: SyntaxTree::new(text.len()),
        };
        let program = lowerer.tree.root();
        let body = lowerer.lower_children(root, program);
        lowerer
            .tree
            .set_kind(program, NodeKind::Program { body });

        debug!(
            "Parsed {}: {} nodes, {} tokens",
            path.display(),
            lowerer.tree.len(),
            tokens.len()
        );

        Ok(ParsedSource {
            tree: lowerer.tree,
            source: SourceCode::new(text, tokens),
        })
    }
}

fn first_error(node: TsNode) -> Option<TsNode> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error)
}

fn collect_tokens(node: TsNode, text: &str, out: &mut Vec<Token>) {
    if node.start_byte() == node.end_byte() {
        return;
    }
    if node.child_count() == 0 || ATOMIC_TOKENS.contains(&node.kind()) {
        let range = TextRange::new(node.start_byte(), node.end_byte());
        let value = &text[range.start..range.end];
        out.push(Token::new(token_kind(node.kind(), value), value, range));
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_tokens(child, text, out);
    }
}

fn token_kind(ts_kind: &str, value: &str) -> TokenKind {
    match ts_kind {
        "comment" | "html_comment" | "hash_bang_line" => {
            if value.starts_with("/*") {
                TokenKind::BlockComment
            } else {
                TokenKind::LineComment
            }
        }
        "string" => TokenKind::String,
        "template_string" => TokenKind::Template,
        "regex" => TokenKind::RegExp,
        "number" => TokenKind::Numeric,
        "jsx_text" => TokenKind::JsxText,
        _ => match value.chars().next() {
            Some(c) if c.is_alphabetic() || c == '_' || c == '$' || c == '#' || !c.is_ascii() => {
                TokenKind::Word
            }
            _ => TokenKind::Punctuator,
        },
    }
}

/// Skip `parenthesized_expression` wrappers
fn unwrap_parens(mut node: TsNode) -> TsNode {
    while node.kind() == "parenthesized_expression" {
        match named_children(node).into_iter().next() {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Named children that are not comments
fn named_children(node: TsNode) -> Vec<TsNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .collect()
}

fn has_child_kind(node: TsNode, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

fn range_of(node: TsNode) -> TextRange {
    TextRange::new(node.start_byte(), node.end_byte())
}

/// Value of a string literal; `None` when escapes would need decoding
fn cooked_string(raw: &str) -> Option<String> {
    let inner = raw.get(1..raw.len().saturating_sub(1))?;
    if inner.contains('\\') {
        None
    } else {
        Some(inner.to_string())
    }
}

struct Lowerer<'t> {
    text: &'t str,
    tree: SyntaxTree,
}

impl<'t> Lowerer<'t> {
    fn text_of(&self, node: TsNode) -> &'t str {
        &self.text[node.start_byte()..node.end_byte()]
    }

    fn lower(&mut self, node: TsNode, parent: NodeId) -> NodeId {
        let node = unwrap_parens(node);
        let id = self.tree.alloc(range_of(node), Some(parent));
        let kind = self.lower_kind(node, id);
        self.tree.set_kind(id, kind);
        id
    }

    fn lower_opt(&mut self, node: Option<TsNode>, parent: NodeId) -> Option<NodeId> {
        node.map(|n| self.lower(n, parent))
    }

    fn lower_children(&mut self, node: TsNode, parent: NodeId) -> Vec<NodeId> {
        named_children(node)
            .into_iter()
            .filter(|c| c.kind() != "hash_bang_line")
            .map(|c| self.lower(c, parent))
            .collect()
    }

    /// Lower a required field, falling back to an empty placeholder
    fn lower_field(&mut self, node: TsNode, field: &str, id: NodeId) -> NodeId {
        match node.child_by_field_name(field) {
            Some(child) => self.lower(child, id),
            None => self.tree.alloc(TextRange::new(node.end_byte(), node.end_byte()), Some(id)),
        }
    }

    fn lower_kind(&mut self, node: TsNode, id: NodeId) -> NodeKind {
        match node.kind() {
            "expression_statement" => match named_children(node).into_iter().next() {
                Some(expr) => NodeKind::ExpressionStatement {
                    expression: self.lower(expr, id),
                },
                None => NodeKind::EmptyStatement,
            },
            "return_statement" => NodeKind::ReturnStatement {
                argument: self.lower_opt(named_children(node).into_iter().next(), id),
            },
            "variable_declaration" | "lexical_declaration" => {
                let kind = match node.child_by_field_name("kind").map(|k| self.text_of(k)) {
                    Some("let") => DeclarationKind::Let,
                    Some("const") => DeclarationKind::Const,
                    _ => DeclarationKind::Var,
                };
                let declarations = named_children(node)
                    .into_iter()
                    .filter(|c| c.kind() == "variable_declarator")
                    .map(|c| self.lower(c, id))
                    .collect();
                NodeKind::VariableDeclaration { kind, declarations }
            }
            "variable_declarator" => NodeKind::VariableDeclarator {
                id: self.lower_field(node, "name", id),
                init: self.lower_opt(node.child_by_field_name("value"), id),
            },
            "function_declaration" | "generator_function_declaration" => {
                NodeKind::FunctionDeclaration {
                    children: self.lower_children(node, id),
                }
            }
            "class_declaration" => NodeKind::ClassDeclaration {
                children: self.lower_children(node, id),
            },
            "function_expression" | "function" | "generator_function" => NodeKind::FunctionExpr {
                children: self.lower_children(node, id),
            },
            "if_statement" => {
                let test = self.lower_field(node, "condition", id);
                let consequent = self.lower_field(node, "consequence", id);
                let alternate = node
                    .child_by_field_name("alternative")
                    .and_then(|clause| named_children(clause).into_iter().next())
                    .map(|stmt| self.lower(stmt, id));
                NodeKind::IfStatement {
                    test,
                    consequent,
                    alternate,
                }
            }
            "for_statement" => {
                let part = |field: &str| {
                    node.child_by_field_name(field)
                        .filter(|c| c.is_named() && c.kind() != "empty_statement")
                };
                let (init, test, update) =
                    (part("initializer"), part("condition"), part("increment"));
                NodeKind::ForStatement {
                    init: self.lower_opt(init, id),
                    test: self.lower_opt(test, id),
                    update: self.lower_opt(update, id),
                    body: self.lower_field(node, "body", id),
                }
            }
            "for_in_statement" => {
                let of = node
                    .child_by_field_name("operator")
                    .map(|op| self.text_of(op) == "of")
                    .unwrap_or(false);
                NodeKind::ForInStatement {
                    left: self.lower_field(node, "left", id),
                    right: self.lower_field(node, "right", id),
                    body: self.lower_field(node, "body", id),
                    of,
                }
            }
            "while_statement" => NodeKind::WhileStatement {
                test: self.lower_field(node, "condition", id),
                body: self.lower_field(node, "body", id),
            },
            "do_statement" => NodeKind::DoWhileStatement {
                body: self.lower_field(node, "body", id),
                test: self.lower_field(node, "condition", id),
            },
            "statement_block" => NodeKind::BlockStatement {
                body: self.lower_children(node, id),
            },
            "empty_statement" => NodeKind::EmptyStatement,
            "arrow_function" => {
                let params = if let Some(single) = node.child_by_field_name("parameter") {
                    vec![self.lower(single, id)]
                } else if let Some(list) = node.child_by_field_name("parameters") {
                    self.lower_children(list, id)
                } else {
                    Vec::new()
                };
                let expression = node
                    .child_by_field_name("body")
                    .map(|b| b.kind() != "statement_block")
                    .unwrap_or(false);
                let is_async = node.child(0).map(|c| c.kind() == "async").unwrap_or(false);
                NodeKind::ArrowFunction {
                    params,
                    body: self.lower_field(node, "body", id),
                    expression,
                    is_async,
                }
            }
            "binary_expression" => {
                let operator = node
                    .child_by_field_name("operator")
                    .map(|op| self.text_of(op).to_string())
                    .unwrap_or_default();
                let left = self.lower_field(node, "left", id);
                let right = self.lower_field(node, "right", id);
                if matches!(operator.as_str(), "&&" | "||" | "??") {
                    NodeKind::LogicalExpr {
                        operator,
                        left,
                        right,
                    }
                } else {
                    NodeKind::BinaryExpr {
                        operator,
                        left,
                        right,
                    }
                }
            }
            "assignment_expression" | "augmented_assignment_expression" => {
                let operator = node
                    .child_by_field_name("operator")
                    .map(|op| self.text_of(op).to_string())
                    .unwrap_or_else(|| "=".to_string());
                NodeKind::AssignmentExpr {
                    operator,
                    left: self.lower_field(node, "left", id),
                    right: self.lower_field(node, "right", id),
                }
            }
            "ternary_expression" => NodeKind::ConditionalExpr {
                test: self.lower_field(node, "condition", id),
                consequent: self.lower_field(node, "consequence", id),
                alternate: self.lower_field(node, "alternative", id),
            },
            "unary_expression" => NodeKind::UnaryExpr {
                operator: node
                    .child_by_field_name("operator")
                    .map(|op| self.text_of(op).to_string())
                    .unwrap_or_default(),
                argument: self.lower_field(node, "argument", id),
            },
            "update_expression" => {
                let operator = node.child_by_field_name("operator");
                let argument = node.child_by_field_name("argument");
                let prefix = match (operator, argument) {
                    (Some(op), Some(arg)) => op.start_byte() < arg.start_byte(),
                    _ => false,
                };
                NodeKind::UpdateExpr {
                    operator: operator
                        .map(|op| self.text_of(op).to_string())
                        .unwrap_or_default(),
                    prefix,
                    argument: self.lower_field(node, "argument", id),
                }
            }
            "await_expression" => match named_children(node).into_iter().next() {
                Some(arg) => NodeKind::AwaitExpr {
                    argument: self.lower(arg, id),
                },
                None => NodeKind::Other {
                    children: Vec::new(),
                },
            },
            "yield_expression" => NodeKind::YieldExpr {
                argument: self.lower_opt(named_children(node).into_iter().next(), id),
                delegate: has_child_kind(node, "*"),
            },
            "call_expression" => {
                let optional = node.child_by_field_name("optional_chain").is_some();
                match node.child_by_field_name("arguments") {
                    Some(args) if args.kind() == "arguments" => NodeKind::CallExpr {
                        callee: self.lower_field(node, "function", id),
                        arguments: self.lower_children(args, id),
                        optional,
                    },
                    // tagged template
                    _ => NodeKind::Other {
                        children: self.lower_children(node, id),
                    },
                }
            }
            "new_expression" => {
                let callee = self.lower_field(node, "constructor", id);
                let arguments = match node.child_by_field_name("arguments") {
                    Some(args) => self.lower_children(args, id),
                    None => Vec::new(),
                };
                NodeKind::NewExpr { callee, arguments }
            }
            "member_expression" => NodeKind::MemberAccess {
                object: self.lower_field(node, "object", id),
                property: self.lower_field(node, "property", id),
                computed: false,
                optional: node.child_by_field_name("optional_chain").is_some(),
            },
            "subscript_expression" => NodeKind::MemberAccess {
                object: self.lower_field(node, "object", id),
                property: self.lower_field(node, "index", id),
                computed: true,
                optional: node.child_by_field_name("optional_chain").is_some(),
            },
            "array" => NodeKind::ArrayLiteral {
                elements: self.lower_children(node, id),
            },
            "object" => NodeKind::ObjectLiteral {
                properties: self.lower_children(node, id),
            },
            "pair" => {
                let computed = node
                    .child_by_field_name("key")
                    .map(|k| k.kind() == "computed_property_name")
                    .unwrap_or(false);
                NodeKind::Property {
                    key: self.lower_field(node, "key", id),
                    value: self.lower_field(node, "value", id),
                    shorthand: false,
                    method: false,
                    computed,
                }
            }
            "shorthand_property_identifier" => {
                let ident = self.tree.alloc(range_of(node), Some(id));
                self.tree.set_kind(
                    ident,
                    NodeKind::Identifier {
                        name: self.text_of(node).to_string(),
                    },
                );
                NodeKind::Property {
                    key: ident,
                    value: ident,
                    shorthand: true,
                    method: false,
                    computed: false,
                }
            }
            "method_definition" => {
                let computed = node
                    .child_by_field_name("name")
                    .map(|k| k.kind() == "computed_property_name")
                    .unwrap_or(false);
                let key = self.lower_field(node, "name", id);
                let function = self.tree.alloc(range_of(node), Some(id));
                let mut children = Vec::new();
                if let Some(params) = node.child_by_field_name("parameters") {
                    children.push(self.lower(params, function));
                }
                if let Some(body) = node.child_by_field_name("body") {
                    children.push(self.lower(body, function));
                }
                self.tree
                    .set_kind(function, NodeKind::FunctionExpr { children });
                NodeKind::Property {
                    key,
                    value: function,
                    shorthand: false,
                    method: true,
                    computed,
                }
            }
            "sequence_expression" => NodeKind::SequenceExpr {
                expressions: self.lower_children(node, id),
            },
            "string" => NodeKind::Literal(LiteralValue::String(cooked_string(self.text_of(node)))),
            "number" => NodeKind::Literal(LiteralValue::Number),
            "true" => NodeKind::Literal(LiteralValue::Boolean(true)),
            "false" => NodeKind::Literal(LiteralValue::Boolean(false)),
            "null" => NodeKind::Literal(LiteralValue::Null),
            "regex" => NodeKind::Literal(LiteralValue::Regex),
            "identifier"
            | "property_identifier"
            | "private_property_identifier"
            | "shorthand_property_identifier_pattern"
            | "statement_identifier"
            | "undefined" => NodeKind::Identifier {
                name: self.text_of(node).to_string(),
            },
            "jsx_element" => {
                let fragment = node
                    .child_by_field_name("open_tag")
                    .map(|open| open.child_by_field_name("name").is_none())
                    .unwrap_or(false);
                let children = self.lower_children(node, id);
                if fragment {
                    NodeKind::JsxFragment { children }
                } else {
                    NodeKind::JsxElement { children }
                }
            }
            "jsx_self_closing_element" => NodeKind::JsxElement {
                children: self.lower_children(node, id),
            },
            "template_string" => NodeKind::Other {
                children: Vec::new(),
            },
            _ => NodeKind::Other {
                children: self.lower_children(node, id),
            },
        }
    }
}
