//! Arena-backed syntax tree consumed by the rule engine
//!
//! The tree is ESTree-shaped: grouping parentheses are not nodes, they only
//! exist as tokens in [`SourceCode`]. A parent's range still covers the
//! parentheses of its children, the way ESTree ranges do.
//!
//! Nodes live in a single `Vec` owned by [`SyntaxTree`]. Children and the
//! parent back-reference are plain [`NodeId`] indices into that arena, so the
//! whole tree is dropped in one go after an analysis pass.

mod source;

pub use source::{SourceCode, Token, TokenKind};

use serde::Serialize;

/// Half-open byte range `[start, end)` into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {}..{}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains_range(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest range covering both `self` and `other`
    pub fn cover(&self, other: TextRange) -> TextRange {
        TextRange::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl std::fmt::Display for TextRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Index of a node inside its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Literal payloads the engine cares about
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Cooked string value. `None` when the raw text contains escapes
    String(Option<String>),
    Number,
    Boolean(bool),
    Null,
    Regex,
}

/// `var`, `let` or `const`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

/// Closed set of node kinds
///
/// Anything the engine never inspects is lowered to [`NodeKind::Other`],
/// which still exposes its children so nested code is walked.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },

    // Expressions
    Literal(LiteralValue),
    Identifier {
        name: String,
    },
    BinaryExpr {
        operator: String,
        left: NodeId,
        right: NodeId,
    },
    LogicalExpr {
        operator: String,
        left: NodeId,
        right: NodeId,
    },
    AssignmentExpr {
        operator: String,
        left: NodeId,
        right: NodeId,
    },
    ConditionalExpr {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    CallExpr {
        callee: NodeId,
        arguments: Vec<NodeId>,
        optional: bool,
    },
    NewExpr {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    MemberAccess {
        object: NodeId,
        property: NodeId,
        computed: bool,
        optional: bool,
    },
    ArrayLiteral {
        elements: Vec<NodeId>,
    },
    ObjectLiteral {
        properties: Vec<NodeId>,
    },
    Property {
        key: NodeId,
        value: NodeId,
        shorthand: bool,
        method: bool,
        computed: bool,
    },
    ArrowFunction {
        params: Vec<NodeId>,
        body: NodeId,
        /// Body is a bare expression rather than a block
        expression: bool,
        is_async: bool,
    },
    FunctionExpr {
        children: Vec<NodeId>,
    },
    AwaitExpr {
        argument: NodeId,
    },
    YieldExpr {
        argument: Option<NodeId>,
        delegate: bool,
    },
    SequenceExpr {
        expressions: Vec<NodeId>,
    },
    UnaryExpr {
        operator: String,
        argument: NodeId,
    },
    UpdateExpr {
        operator: String,
        prefix: bool,
        argument: NodeId,
    },
    JsxElement {
        children: Vec<NodeId>,
    },
    JsxFragment {
        children: Vec<NodeId>,
    },

    // Declarations
    VariableDeclaration {
        kind: DeclarationKind,
        declarations: Vec<NodeId>,
    },
    VariableDeclarator {
        id: NodeId,
        init: Option<NodeId>,
    },
    FunctionDeclaration {
        children: Vec<NodeId>,
    },
    ClassDeclaration {
        children: Vec<NodeId>,
    },

    // Statements
    ReturnStatement {
        argument: Option<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    ForStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    ForInStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
        /// `for (x of y)` rather than `for (x in y)`
        of: bool,
    },
    WhileStatement {
        test: NodeId,
        body: NodeId,
    },
    DoWhileStatement {
        body: NodeId,
        test: NodeId,
    },
    BlockStatement {
        body: Vec<NodeId>,
    },
    EmptyStatement,

    Other {
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    /// Short label used in logs and test failure output
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::Literal(_) => "Literal",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::BinaryExpr { .. } => "BinaryExpr",
            NodeKind::LogicalExpr { .. } => "LogicalExpr",
            NodeKind::AssignmentExpr { .. } => "AssignmentExpr",
            NodeKind::ConditionalExpr { .. } => "ConditionalExpr",
            NodeKind::CallExpr { .. } => "CallExpr",
            NodeKind::NewExpr { .. } => "NewExpr",
            NodeKind::MemberAccess { .. } => "MemberAccess",
            NodeKind::ArrayLiteral { .. } => "ArrayLiteral",
            NodeKind::ObjectLiteral { .. } => "ObjectLiteral",
            NodeKind::Property { .. } => "Property",
            NodeKind::ArrowFunction { .. } => "ArrowFunction",
            NodeKind::FunctionExpr { .. } => "FunctionExpr",
            NodeKind::AwaitExpr { .. } => "AwaitExpr",
            NodeKind::YieldExpr { .. } => "YieldExpr",
            NodeKind::SequenceExpr { .. } => "SequenceExpr",
            NodeKind::UnaryExpr { .. } => "UnaryExpr",
            NodeKind::UpdateExpr { .. } => "UpdateExpr",
            NodeKind::JsxElement { .. } => "JsxElement",
            NodeKind::JsxFragment { .. } => "JsxFragment",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::FunctionDeclaration { .. } => "FunctionDeclaration",
            NodeKind::ClassDeclaration { .. } => "ClassDeclaration",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::IfStatement { .. } => "IfStatement",
            NodeKind::ForStatement { .. } => "ForStatement",
            NodeKind::ForInStatement { .. } => "ForInStatement",
            NodeKind::WhileStatement { .. } => "WhileStatement",
            NodeKind::DoWhileStatement { .. } => "DoWhileStatement",
            NodeKind::BlockStatement { .. } => "BlockStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::Other { .. } => "Other",
        }
    }

    /// Child ids in source order
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => body.clone(),
            NodeKind::Literal(_) | NodeKind::Identifier { .. } | NodeKind::EmptyStatement => {
                Vec::new()
            }
            NodeKind::BinaryExpr { left, right, .. }
            | NodeKind::LogicalExpr { left, right, .. }
            | NodeKind::AssignmentExpr { left, right, .. } => vec![*left, *right],
            NodeKind::ConditionalExpr {
                test,
                consequent,
                alternate,
            } => vec![*test, *consequent, *alternate],
            NodeKind::CallExpr {
                callee, arguments, ..
            }
            | NodeKind::NewExpr { callee, arguments } => {
                let mut out = Vec::with_capacity(arguments.len() + 1);
                out.push(*callee);
                out.extend(arguments.iter().copied());
                out
            }
            NodeKind::MemberAccess {
                object, property, ..
            } => vec![*object, *property],
            NodeKind::ArrayLiteral { elements } => elements.clone(),
            NodeKind::ObjectLiteral { properties } => properties.clone(),
            NodeKind::Property {
                key,
                value,
                shorthand,
                ..
            } => {
                if *shorthand || key == value {
                    vec![*value]
                } else {
                    vec![*key, *value]
                }
            }
            NodeKind::ArrowFunction { params, body, .. } => {
                let mut out = params.clone();
                out.push(*body);
                out
            }
            NodeKind::AwaitExpr { argument } | NodeKind::UnaryExpr { argument, .. } => {
                vec![*argument]
            }
            NodeKind::UpdateExpr { argument, .. } => vec![*argument],
            NodeKind::YieldExpr { argument, .. } => argument.iter().copied().collect(),
            NodeKind::SequenceExpr { expressions } => expressions.clone(),
            NodeKind::FunctionExpr { children }
            | NodeKind::JsxElement { children }
            | NodeKind::JsxFragment { children }
            | NodeKind::FunctionDeclaration { children }
            | NodeKind::ClassDeclaration { children }
            | NodeKind::Other { children } => children.clone(),
            NodeKind::VariableDeclaration { declarations, .. } => declarations.clone(),
            NodeKind::VariableDeclarator { id, init } => {
                let mut out = vec![*id];
                out.extend(init.iter().copied());
                out
            }
            NodeKind::ReturnStatement { argument } => argument.iter().copied().collect(),
            NodeKind::ExpressionStatement { expression } => vec![*expression],
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                let mut out = vec![*test, *consequent];
                out.extend(alternate.iter().copied());
                out
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => init
                .iter()
                .chain(test.iter())
                .chain(update.iter())
                .copied()
                .chain(std::iter::once(*body))
                .collect(),
            NodeKind::ForInStatement {
                left, right, body, ..
            } => vec![*left, *right, *body],
            NodeKind::WhileStatement { test, body } => vec![*test, *body],
            NodeKind::DoWhileStatement { body, test } => vec![*body, *test],
        }
    }

    /// Variable, function and class declarations
    ///
    /// Unwrapping braces around one of these changes its scoping.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            NodeKind::VariableDeclaration { .. }
                | NodeKind::FunctionDeclaration { .. }
                | NodeKind::ClassDeclaration { .. }
        )
    }

    pub fn is_jsx(&self) -> bool {
        matches!(self, NodeKind::JsxElement { .. } | NodeKind::JsxFragment { .. })
    }

    pub fn is_literal_or_identifier(&self) -> bool {
        matches!(self, NodeKind::Literal(_) | NodeKind::Identifier { .. })
    }
}

/// A single node of the arena
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub range: TextRange,
    /// Non-owning back-reference, `None` for the program root
    pub parent: Option<NodeId>,
}

/// Owner of every node produced for one source unit
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    /// Empty tree whose root is an empty program spanning `len` bytes
    pub fn new(len: usize) -> Self {
        let root = Node {
            kind: NodeKind::Program { body: Vec::new() },
            range: TextRange::new(0, len),
            parent: None,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.node(id).range
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Reserve a slot for a node whose children are not lowered yet
    ///
    /// The slot starts as an empty [`NodeKind::Other`]; call
    /// [`SyntaxTree::set_kind`] once the children ids are known.
    pub fn alloc(&mut self, range: TextRange, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind: NodeKind::Other {
                children: Vec::new(),
            },
            range,
            parent,
        });
        id
    }

    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.index()].kind = kind;
    }

    /// Pre-order iterator over `from` and all its descendants
    pub fn descendants(&self, from: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![from],
        }
    }

    /// Statements of the innermost program or function body containing `id`
    ///
    /// Used to recognise directive prologues.
    pub fn enclosing_body(&self, id: NodeId) -> Option<&[NodeId]> {
        let parent = self.parent(id)?;
        match self.kind(parent) {
            NodeKind::Program { body } => Some(body.as_slice()),
            NodeKind::BlockStatement { body } => {
                let owner = self.parent(parent)?;
                match self.kind(owner) {
                    NodeKind::FunctionDeclaration { .. }
                    | NodeKind::FunctionExpr { .. }
                    | NodeKind::ArrowFunction { .. } => Some(body.as_slice()),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// See [`SyntaxTree::descendants`]
pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let children = self.tree.kind(id).children();
        self.stack.extend(children.into_iter().rev());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SyntaxTree {
        // a + 1
        let mut tree = SyntaxTree::new(5);
        let root = tree.root();
        let stmt = tree.alloc(TextRange::new(0, 5), Some(root));
        let bin = tree.alloc(TextRange::new(0, 5), Some(stmt));
        let left = tree.alloc(TextRange::new(0, 1), Some(bin));
        let right = tree.alloc(TextRange::new(4, 5), Some(bin));
        tree.set_kind(
            left,
            NodeKind::Identifier {
                name: "a".to_string(),
            },
        );
        tree.set_kind(right, NodeKind::Literal(LiteralValue::Number));
        tree.set_kind(
            bin,
            NodeKind::BinaryExpr {
                operator: "+".to_string(),
                left,
                right,
            },
        );
        tree.set_kind(stmt, NodeKind::ExpressionStatement { expression: bin });
        tree.set_kind(root, NodeKind::Program { body: vec![stmt] });
        tree
    }

    #[test]
    fn test_descendants_are_preorder() {
        let tree = sample_tree();
        let names: Vec<_> = tree
            .descendants(tree.root())
            .map(|id| tree.kind(id).name())
            .collect();
        assert_eq!(
            names,
            vec![
                "Program",
                "ExpressionStatement",
                "BinaryExpr",
                "Identifier",
                "Literal"
            ]
        );
    }

    #[test]
    fn test_parent_links() {
        let tree = sample_tree();
        let ids: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(tree.parent(ids[0]), None);
        assert_eq!(tree.parent(ids[3]), Some(ids[2]));
        assert_eq!(tree.parent(ids[2]), Some(ids[1]));
    }

    #[test]
    fn test_enclosing_body_of_top_level_statement() {
        let tree = sample_tree();
        let stmt = tree.descendants(tree.root()).nth(1).unwrap();
        assert_eq!(tree.enclosing_body(stmt), Some(&[stmt][..]));
    }

    #[test]
    fn test_range_helpers() {
        let a = TextRange::new(2, 5);
        let b = TextRange::new(4, 9);
        assert_eq!(a.cover(b), TextRange::new(2, 9));
        assert!(TextRange::new(0, 10).contains_range(a));
        assert!(!a.contains_range(b));
        assert_eq!(a.len(), 3);
        assert!(TextRange::new(3, 3).is_empty());
    }
}
