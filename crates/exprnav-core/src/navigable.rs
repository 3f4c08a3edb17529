//! Navigable view over a checked expression tree.
//!
//! A [`NavigableAst`] is the per-tree context: it borrows the raw root and the
//! type map, owns the literal converter, and owns a parent index built once at
//! construction. [`NavigableExpr`] handles are small `Copy` values pointing
//! into that context.
//!
//! # Children
//!
//! [`NavigableExpr::children`] is lazy and not memoized: every call builds
//! fresh handles. Two calls return equal sequences; callers must not rely on
//! anything beyond value equality.
//!
//! # Parents
//!
//! Each handle remembers the raw parent node it was created from. Walking
//! further up goes through the parent index (`child id -> parent node`), so no
//! handle owns or reference-counts another.
//!
//! # Usage
//!
//! ```
//! use exprnav_core::ast::Expr;
//! use exprnav_core::kind::ExprKind;
//! use exprnav_core::navigable::NavigableAst;
//! use exprnav_core::types::TypeMap;
//!
//! let expr = Expr::call(3, "size", vec![Expr::ident(1, "items")]);
//! let type_map = TypeMap::new();
//! let ast = NavigableAst::new(&expr, &type_map);
//!
//! let root = ast.root();
//! assert_eq!(root.kind(), ExprKind::Call);
//! assert_eq!(root.as_call().function_name(), "size");
//! assert_eq!(root.children()[0].as_ident(), Some("items"));
//! ```

use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;
use std::fmt;

use crate::ast::{Expr, ExprNode, UNSPECIFIED_EXPR};
use crate::convert::{DefaultConverter, LiteralConverter};
use crate::error::NavError;
use crate::kind::{classify, raw_children, ChildStrategy, ExprKind};
use crate::types::{Type, TypeMap, DYN};
use crate::value::Value;
use crate::views::{CallView, ComprehensionView, ListView, MapView, SelectView, StructView};

// ============================================================================
// NavigableAst
// ============================================================================

/// Navigation context for one expression tree.
pub struct NavigableAst<'a> {
    root: &'a Expr,
    type_map: &'a TypeMap,
    converter: Box<dyn LiteralConverter + 'a>,
    /// Raw parent of every non-root node, keyed by the child's id.
    parents: HashMap<i64, &'a Expr>,
}

impl<'a> NavigableAst<'a> {
    /// Create a navigation context using [`DefaultConverter`] for literals.
    pub fn new(root: &'a Expr, type_map: &'a TypeMap) -> Self {
        let parents = index_parents(root);
        tracing::debug!(
            root_id = root.id,
            nodes = parents.len() + 1,
            typed = type_map.len(),
            "indexed expression tree"
        );
        NavigableAst {
            root,
            type_map,
            converter: Box::new(DefaultConverter),
            parents,
        }
    }

    /// Replace the literal converter.
    pub fn with_converter(mut self, converter: impl LiteralConverter + 'a) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// The root node of the tree.
    pub fn root(&self) -> NavigableExpr<'_> {
        NavigableExpr::new(None, self.root, self)
    }

    /// The type map shared by every node.
    pub fn type_map(&self) -> &'a TypeMap {
        self.type_map
    }

    /// Number of nodes reachable from the root, root included.
    pub fn node_count(&self) -> usize {
        self.parents.len() + 1
    }

    /// Raw parent of the node with the given id.
    fn parent_of(&self, expr: &Expr) -> Option<&'a Expr> {
        if std::ptr::eq(expr, self.root) {
            return None;
        }
        self.parents.get(&expr.id).copied()
    }
}

impl fmt::Debug for NavigableAst<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigableAst")
            .field("root_id", &self.root.id)
            .field("node_count", &self.node_count())
            .field("typed", &self.type_map.len())
            .finish()
    }
}

/// Record the raw parent of every node below `root`.
///
/// The first parent seen for an id wins; duplicates are reported since they
/// make upward navigation for that id ambiguous.
fn index_parents(root: &Expr) -> HashMap<i64, &Expr> {
    let mut parents = HashMap::new();
    let mut stack = vec![root];
    while let Some(parent) = stack.pop() {
        let (_, strategy) = classify(parent);
        for child in raw_children(parent, strategy) {
            if std::ptr::eq(child, &UNSPECIFIED_EXPR) {
                continue;
            }
            if child.id == root.id {
                tracing::warn!(id = child.id, "expression id duplicates the root id");
                continue;
            }
            match parents.entry(child.id) {
                MapEntry::Occupied(_) => {
                    tracing::warn!(id = child.id, "duplicate expression id in tree");
                }
                MapEntry::Vacant(slot) => {
                    slot.insert(parent);
                }
            }
            stack.push(child);
        }
    }
    parents
}

// ============================================================================
// NavigableExpr
// ============================================================================

/// A navigable handle on one expression node.
///
/// Kind and child strategy are fixed when the handle is created. All `as_*`
/// accessors are nil-safe: asking for the wrong kind yields an empty view
/// rather than an error.
#[derive(Clone, Copy)]
pub struct NavigableExpr<'a> {
    ast: &'a NavigableAst<'a>,
    expr: &'a Expr,
    parent: Option<&'a Expr>,
    kind: ExprKind,
    strategy: ChildStrategy,
}

impl<'a> NavigableExpr<'a> {
    /// Wrap `expr` as a child of `parent` (or as a root when `parent` is `None`).
    pub fn new(
        parent: Option<&NavigableExpr<'a>>,
        expr: &'a Expr,
        ast: &'a NavigableAst<'a>,
    ) -> Self {
        NavigableExpr::from_parts(ast, expr, parent.map(|p| p.expr))
    }

    fn from_parts(ast: &'a NavigableAst<'a>, expr: &'a Expr, parent: Option<&'a Expr>) -> Self {
        let (kind, strategy) = classify(expr);
        NavigableExpr {
            ast,
            expr,
            parent,
            kind,
            strategy,
        }
    }

    /// Build a handle for a raw child of this node.
    pub(crate) fn child(&self, expr: &'a Expr) -> NavigableExpr<'a> {
        NavigableExpr::from_parts(self.ast, expr, Some(self.expr))
    }

    /// Id of the expression as it appears in the AST.
    pub fn id(&self) -> i64 {
        self.expr.id
    }

    /// Kind of the expression node.
    pub fn kind(&self) -> ExprKind {
        self.kind
    }

    /// Static type of the node, or `dyn` when the checker recorded none.
    pub fn ty(&self) -> &'a Type {
        self.ast.type_map.get(&self.id()).unwrap_or(&DYN)
    }

    /// The parent node, if this is not the root.
    pub fn parent(&self) -> Option<NavigableExpr<'a>> {
        let parent = self.parent?;
        Some(NavigableExpr::from_parts(
            self.ast,
            parent,
            self.ast.parent_of(parent),
        ))
    }

    /// Child nodes in traversal order. Rebuilt on every call.
    pub fn children(&self) -> Vec<NavigableExpr<'a>> {
        raw_children(self.expr, self.strategy)
            .into_iter()
            .map(|child| self.child(child))
            .collect()
    }

    /// The wrapped raw node, unchanged.
    pub fn to_expr(self) -> &'a Expr {
        self.expr
    }

    /// The navigation context this node belongs to.
    pub fn ast(&self) -> &'a NavigableAst<'a> {
        self.ast
    }

    /// View as a call. Empty unless `kind()` is `Call`.
    pub fn as_call(&self) -> CallView<'a> {
        CallView::new(*self)
    }

    /// View as a comprehension. Empty unless `kind()` is `Comprehension`.
    pub fn as_comprehension(&self) -> ComprehensionView<'a> {
        ComprehensionView::new(*self)
    }

    /// Identifier name. `None` unless `kind()` is `Ident`.
    pub fn as_ident(&self) -> Option<&'a str> {
        match &self.expr.expr {
            ExprNode::Ident(ident) => Some(ident.name.as_str()),
            _ => None,
        }
    }

    /// Convert the literal payload with the injected converter.
    ///
    /// Returns `Ok(None)` unless `kind()` is `Literal`. A conversion failure
    /// means the tree was not well-formed; it is logged and returned as
    /// [`NavError::LiteralConversion`].
    pub fn as_literal(&self) -> Result<Option<Value>, NavError> {
        let ExprNode::Const(constant) = &self.expr.expr else {
            return Ok(None);
        };
        match self.ast.converter.convert(constant) {
            Ok(value) => Ok(Some(value)),
            Err(source) => {
                tracing::error!(
                    id = self.id(),
                    constant = constant.kind_name(),
                    error = %source,
                    "literal conversion failed"
                );
                Err(NavError::LiteralConversion {
                    id: self.id(),
                    source,
                })
            }
        }
    }

    /// View as a list. Empty unless `kind()` is `List`.
    pub fn as_list(&self) -> ListView<'a> {
        ListView::new(*self)
    }

    /// View as a map. Empty unless `kind()` is `Map`.
    pub fn as_map(&self) -> MapView<'a> {
        MapView::new(*self)
    }

    /// View as a select. Empty unless `kind()` is `Select`.
    pub fn as_select(&self) -> SelectView<'a> {
        SelectView::new(*self)
    }

    /// View as a struct. Empty unless `kind()` is `Struct`.
    pub fn as_struct(&self) -> StructView<'a> {
        StructView::new(*self)
    }
}

impl PartialEq for NavigableExpr<'_> {
    fn eq(&self, other: &Self) -> bool {
        let same_node = std::ptr::eq(self.expr, other.expr) || self.expr == other.expr;
        same_node && self.parent.map(|p| p.id) == other.parent.map(|p| p.id)
    }
}

impl fmt::Debug for NavigableExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigableExpr")
            .field("id", &self.id())
            .field("kind", &self.kind)
            .field("parent_id", &self.parent.map(|p| p.id))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
