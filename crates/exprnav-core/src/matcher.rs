//! Matchers and tree search.
//!
//! A [`Matcher`] is a pure predicate over a [`NavigableExpr`]. Any
//! `Fn(&NavigableExpr) -> bool` closure is a matcher, and [`MatcherExt`] adds
//! `and`, `or`, and `not` combinators.
//!
//! ## Built-in Matchers
//!
//! - [`kind_matcher`] - node kind equality
//! - [`function_matcher`] - call nodes by exact function name
//! - [`all_matcher`] - every node
//! - [`constant_value_matcher`] - literals and list/map/struct literals built
//!   only from literals
//!
//! ## Search
//!
//! Both entry points share one breadth-first walker; they differ only in
//! whether visited nodes enqueue their children:
//!
//! - [`match_descendants`] walks the whole subtree below (and including) a
//!   root
//! - [`match_subset`] tests exactly the given nodes and never descends
//!
//! Results are in visitation order: a node before its descendants, siblings
//! in child order, shallower levels before deeper ones.
//!
//! ```
//! use exprnav_core::ast::Expr;
//! use exprnav_core::kind::ExprKind;
//! use exprnav_core::matcher::{kind_matcher, match_descendants};
//! use exprnav_core::navigable::NavigableAst;
//! use exprnav_core::types::TypeMap;
//!
//! // a && (b || c)
//! let expr = Expr::call(5, "_&&_", vec![
//!     Expr::ident(1, "a"),
//!     Expr::call(4, "_||_", vec![Expr::ident(2, "b"), Expr::ident(3, "c")]),
//! ]);
//! let types = TypeMap::new();
//! let ast = NavigableAst::new(&expr, &types);
//!
//! let idents = match_descendants(ast.root(), &kind_matcher(ExprKind::Ident));
//! let names: Vec<_> = idents.iter().filter_map(|e| e.as_ident()).collect();
//! assert_eq!(names, vec!["a", "b", "c"]);
//! ```

use std::collections::VecDeque;

use crate::kind::ExprKind;
use crate::navigable::NavigableExpr;

/// A predicate over navigable expressions.
pub trait Matcher {
    /// Returns true if `expr` matches.
    fn matches(&self, expr: &NavigableExpr<'_>) -> bool;
}

impl<F> Matcher for F
where
    F: Fn(&NavigableExpr<'_>) -> bool,
{
    fn matches(&self, expr: &NavigableExpr<'_>) -> bool {
        self(expr)
    }
}

// ============================================================================
// Built-in Matchers
// ============================================================================

/// Matches nodes of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindMatcher(pub ExprKind);

impl Matcher for KindMatcher {
    fn matches(&self, expr: &NavigableExpr<'_>) -> bool {
        expr.kind() == self.0
    }
}

/// Matches call nodes whose function name equals the given name exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMatcher(pub String);

impl Matcher for FunctionMatcher {
    fn matches(&self, expr: &NavigableExpr<'_>) -> bool {
        expr.kind() == ExprKind::Call && expr.as_call().function_name() == self.0
    }
}

/// Matches every node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllMatcher;

impl Matcher for AllMatcher {
    fn matches(&self, _expr: &NavigableExpr<'_>) -> bool {
        true
    }
}

/// Matches nodes composed entirely of constant literals.
///
/// A literal is constant. A list, map, or struct literal is constant when
/// every child is. Nothing else is, even if it would fold to a constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstantValueMatcher;

impl Matcher for ConstantValueMatcher {
    fn matches(&self, expr: &NavigableExpr<'_>) -> bool {
        is_constant_value(expr)
    }
}

fn is_constant_value(expr: &NavigableExpr<'_>) -> bool {
    match expr.kind() {
        ExprKind::Literal => true,
        ExprKind::List | ExprKind::Map | ExprKind::Struct => {
            expr.children().iter().all(is_constant_value)
        }
        _ => false,
    }
}

/// Match nodes whose kind is `kind`.
pub fn kind_matcher(kind: ExprKind) -> KindMatcher {
    KindMatcher(kind)
}

/// Match calls to `function` (case-sensitive).
pub fn function_matcher(function: impl Into<String>) -> FunctionMatcher {
    FunctionMatcher(function.into())
}

/// Match every node; with [`match_descendants`] this flattens a subtree.
pub fn all_matcher() -> AllMatcher {
    AllMatcher
}

/// Match constant-valued nodes.
pub fn constant_value_matcher() -> ConstantValueMatcher {
    ConstantValueMatcher
}

// ============================================================================
// Combinators
// ============================================================================

/// Conjunction of two matchers.
#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(A, B);

/// Disjunction of two matchers.
#[derive(Debug, Clone, Copy)]
pub struct Or<A, B>(A, B);

/// Negation of a matcher.
#[derive(Debug, Clone, Copy)]
pub struct Not<M>(M);

impl<A: Matcher, B: Matcher> Matcher for And<A, B> {
    fn matches(&self, expr: &NavigableExpr<'_>) -> bool {
        self.0.matches(expr) && self.1.matches(expr)
    }
}

impl<A: Matcher, B: Matcher> Matcher for Or<A, B> {
    fn matches(&self, expr: &NavigableExpr<'_>) -> bool {
        self.0.matches(expr) || self.1.matches(expr)
    }
}

impl<M: Matcher> Matcher for Not<M> {
    fn matches(&self, expr: &NavigableExpr<'_>) -> bool {
        !self.0.matches(expr)
    }
}

/// Boolean combinators for any [`Matcher`].
pub trait MatcherExt: Matcher + Sized {
    /// Match when both `self` and `other` match.
    fn and<M: Matcher>(self, other: M) -> And<Self, M> {
        And(self, other)
    }

    /// Match when either `self` or `other` matches.
    fn or<M: Matcher>(self, other: M) -> Or<Self, M> {
        Or(self, other)
    }

    /// Match when `self` does not.
    fn not(self) -> Not<Self> {
        Not(self)
    }
}

impl<T: Matcher> MatcherExt for T {}

// ============================================================================
// Search
// ============================================================================

/// Whether the walker enqueues the children of visited nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Descend,
    Shallow,
}

/// Every node in the subtree rooted at `root` (root included) that matches,
/// in breadth-first order.
pub fn match_descendants<'a, M>(root: NavigableExpr<'a>, matcher: &M) -> Vec<NavigableExpr<'a>>
where
    M: Matcher + ?Sized,
{
    walk(VecDeque::from([root]), matcher, Walk::Descend)
}

/// The nodes of `exprs` that match, in input order. Children are never
/// visited, even when the matcher would accept them.
pub fn match_subset<'a, M>(exprs: &[NavigableExpr<'a>], matcher: &M) -> Vec<NavigableExpr<'a>>
where
    M: Matcher + ?Sized,
{
    walk(exprs.iter().copied().collect(), matcher, Walk::Shallow)
}

fn walk<'a, M>(
    mut queue: VecDeque<NavigableExpr<'a>>,
    matcher: &M,
    mode: Walk,
) -> Vec<NavigableExpr<'a>>
where
    M: Matcher + ?Sized,
{
    let seeded = queue.len();
    let mut visited = 0usize;
    let mut matched = Vec::new();
    while let Some(expr) = queue.pop_front() {
        visited += 1;
        if matcher.matches(&expr) {
            matched.push(expr);
        }
        if mode == Walk::Descend {
            queue.extend(expr.children());
        }
    }
    tracing::trace!(
        seeded,
        visited,
        matched = matched.len(),
        descend = mode == Walk::Descend,
        "matcher walk complete"
    );
    matched
}

// ============================================================================
// Tests
// ============================================================================
