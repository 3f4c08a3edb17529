//! exprnav: read-only navigation over type-checked expression trees
//!
//! Wraps a checked expression tree in navigable handles so optimizers, static
//! analyzers, and cost estimators can walk it uniformly, read kind-specific
//! details through typed views, and search it with composable matchers.

// Core infrastructure - re-exported from exprnav-core
pub use exprnav_core::ast;
pub use exprnav_core::convert;
pub use exprnav_core::error;
pub use exprnav_core::kind;
pub use exprnav_core::matcher;
pub use exprnav_core::navigable;
pub use exprnav_core::types;
pub use exprnav_core::value;
pub use exprnav_core::views;

// Most-used entry points
pub use exprnav_core::ast::CheckedAst;
pub use exprnav_core::kind::ExprKind;
pub use exprnav_core::matcher::{match_descendants, match_subset, Matcher, MatcherExt};
pub use exprnav_core::navigable::{NavigableAst, NavigableExpr};
