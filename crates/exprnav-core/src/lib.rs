//! Core infrastructure for exprnav.
//!
//! This crate provides a read-only navigation layer over type-checked
//! expression trees:
//! - Raw expression model and checked AST container
//! - Static types, runtime values, and literal conversion
//! - Variant classification into semantic kinds
//! - Navigable nodes with lazy children and parent links
//! - Kind-specific views (call, list, map, select, struct, comprehension)
//! - Matchers and breadth-first tree search

pub mod ast;
pub mod convert;
pub mod error;
pub mod kind;
pub mod matcher;
pub mod navigable;
pub mod types;
pub mod value;
pub mod views;
