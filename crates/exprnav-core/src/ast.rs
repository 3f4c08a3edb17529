//! Raw expression tree consumed by the navigation layer.
//!
//! This module models the parsed, type-checked expression tree as plain owned
//! data. The shape follows the protobuf JSON mapping of checked expressions, so
//! trees can be loaded with any serde format:
//!
//! ```text
//! {"id": 1, "expr": {"call": {"function": "_&&_", "args": [...]}}}
//! ```
//!
//! Navigation never mutates or re-encodes these values. See
//! [`crate::navigable::NavigableAst`] for the read-only view built on top.

use serde::{Deserialize, Serialize};

use crate::navigable::NavigableAst;
use crate::types::TypeMap;

/// Placeholder read in place of a missing subexpression.
///
/// A map entry keyed by a field name (or a struct field keyed by an
/// expression) has no key node; accessors hand back this node instead.
pub(crate) static UNSPECIFIED_EXPR: Expr = Expr {
    id: 0,
    expr: ExprNode::Unspecified,
};

// ============================================================================
// Checked AST
// ============================================================================

/// A type-checked expression: the root node plus its id→type mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckedAst {
    /// Root of the expression tree.
    pub expr: Expr,
    /// Static types recorded by the checker, keyed by expression id.
    #[serde(default)]
    pub type_map: TypeMap,
}

impl CheckedAst {
    /// Create a checked AST from a root expression and its type map.
    pub fn new(expr: Expr, type_map: TypeMap) -> Self {
        CheckedAst { expr, type_map }
    }

    /// Build a navigable view over this AST using the default literal converter.
    pub fn navigate(&self) -> NavigableAst<'_> {
        NavigableAst::new(&self.expr, &self.type_map)
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// A single node of the raw expression tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// AST-unique identifier assigned by the parser.
    pub id: i64,
    /// The variant payload.
    #[serde(default)]
    pub expr: ExprNode,
}

/// The tagged payload of an [`Expr`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprNode {
    /// Unset expression.
    #[default]
    Unspecified,
    /// Constant literal.
    Const(Constant),
    /// Identifier reference.
    Ident(IdentExpr),
    /// Field selection or presence test.
    Select(SelectExpr),
    /// Function or method call.
    Call(CallExpr),
    /// List literal.
    List(ListExpr),
    /// Struct literal (non-empty message name) or map literal (empty name).
    Struct(StructExpr),
    /// Fold/loop produced by macro expansion.
    Comprehension(Box<ComprehensionExpr>),
}

/// Identifier expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentExpr {
    pub name: String,
}

/// Field selection: `operand.field`, or `has(operand.field)` when `test_only`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectExpr {
    pub operand: Box<Expr>,
    pub field: String,
    #[serde(default)]
    pub test_only: bool,
}

/// Call expression. `target` is the receiver of a method-style call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Box<Expr>>,
    pub function: String,
    #[serde(default)]
    pub args: Vec<Expr>,
}

/// List literal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListExpr {
    #[serde(default)]
    pub elements: Vec<Expr>,
    /// Positions of elements that are only included when present.
    #[serde(default)]
    pub optional_indices: Vec<i32>,
}

/// Struct or map literal.
///
/// An empty `message_name` makes this a map literal whose entries are keyed by
/// expressions; otherwise it is a struct literal keyed by field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructExpr {
    #[serde(default)]
    pub message_name: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// One initializer of a struct or map literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub key: EntryKey,
    pub value: Expr,
    #[serde(default)]
    pub optional_entry: bool,
}

/// Key of an [`Entry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKey {
    /// Struct field name.
    Field(String),
    /// Map key expression.
    MapKey(Box<Expr>),
}

impl Entry {
    /// The map key expression, or the unspecified placeholder for field keys.
    pub fn map_key(&self) -> &Expr {
        match &self.key {
            EntryKey::MapKey(key) => key,
            EntryKey::Field(_) => &UNSPECIFIED_EXPR,
        }
    }

    /// The struct field name, or `""` for expression keys.
    pub fn field_key(&self) -> &str {
        match &self.key {
            EntryKey::Field(name) => name,
            EntryKey::MapKey(_) => "",
        }
    }
}

/// Comprehension (fold) expression.
///
/// Evaluates as: `accu_var = accu_init; for iter_var in iter_range { if
/// !loop_condition { break } accu_var = loop_step }; result`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComprehensionExpr {
    pub iter_var: String,
    pub iter_range: Expr,
    pub accu_var: String,
    pub accu_init: Expr,
    pub loop_condition: Expr,
    pub loop_step: Expr,
    pub result: Expr,
}

// ============================================================================
// Constants
// ============================================================================

/// Literal payload of a constant expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constant {
    Null,
    Bool(bool),
    Int64(i64),
    Uint64(u64),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Deprecated duration literal form.
    Duration { seconds: i64, nanos: i32 },
    /// Deprecated timestamp literal form.
    Timestamp { seconds: i64, nanos: i32 },
}

impl Constant {
    /// Short name of the constant kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Constant::Null => "null_value",
            Constant::Bool(_) => "bool_value",
            Constant::Int64(_) => "int64_value",
            Constant::Uint64(_) => "uint64_value",
            Constant::Double(_) => "double_value",
            Constant::String(_) => "string_value",
            Constant::Bytes(_) => "bytes_value",
            Constant::Duration { .. } => "duration_value",
            Constant::Timestamp { .. } => "timestamp_value",
        }
    }
}

// ============================================================================
// Builders
// ============================================================================

impl Expr {
    /// Create an expression from an id and payload.
    pub fn new(id: i64, expr: ExprNode) -> Self {
        Expr { id, expr }
    }

    /// Constant literal.
    pub fn constant(id: i64, value: Constant) -> Self {
        Expr::new(id, ExprNode::Const(value))
    }

    /// Identifier.
    pub fn ident(id: i64, name: impl Into<String>) -> Self {
        Expr::new(id, ExprNode::Ident(IdentExpr { name: name.into() }))
    }

    /// Field selection.
    pub fn select(id: i64, operand: Expr, field: impl Into<String>) -> Self {
        Expr::new(
            id,
            ExprNode::Select(SelectExpr {
                operand: Box::new(operand),
                field: field.into(),
                test_only: false,
            }),
        )
    }

    /// Presence test, as generated by the `has()` macro.
    pub fn presence_test(id: i64, operand: Expr, field: impl Into<String>) -> Self {
        Expr::new(
            id,
            ExprNode::Select(SelectExpr {
                operand: Box::new(operand),
                field: field.into(),
                test_only: true,
            }),
        )
    }

    /// Global function call.
    pub fn call(id: i64, function: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::new(
            id,
            ExprNode::Call(CallExpr {
                target: None,
                function: function.into(),
                args,
            }),
        )
    }

    /// Method-style call on `target`.
    pub fn member_call(id: i64, target: Expr, function: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::new(
            id,
            ExprNode::Call(CallExpr {
                target: Some(Box::new(target)),
                function: function.into(),
                args,
            }),
        )
    }

    /// List literal.
    pub fn list(id: i64, elements: Vec<Expr>, optional_indices: Vec<i32>) -> Self {
        Expr::new(
            id,
            ExprNode::List(ListExpr {
                elements,
                optional_indices,
            }),
        )
    }

    /// Map literal.
    pub fn map(id: i64, entries: Vec<Entry>) -> Self {
        Expr::new(
            id,
            ExprNode::Struct(StructExpr {
                message_name: String::new(),
                entries,
            }),
        )
    }

    /// Struct literal of the named message type.
    pub fn structure(id: i64, message_name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Expr::new(
            id,
            ExprNode::Struct(StructExpr {
                message_name: message_name.into(),
                entries,
            }),
        )
    }

    /// Comprehension.
    pub fn comprehension(id: i64, comprehension: ComprehensionExpr) -> Self {
        Expr::new(id, ExprNode::Comprehension(Box::new(comprehension)))
    }
}

impl Entry {
    /// Map entry `key: value`.
    pub fn map_entry(id: i64, key: Expr, value: Expr, optional_entry: bool) -> Self {
        Entry {
            id,
            key: EntryKey::MapKey(Box::new(key)),
            value,
            optional_entry,
        }
    }

    /// Struct field initializer `field: value`.
    pub fn field(id: i64, field: impl Into<String>, value: Expr, optional_entry: bool) -> Self {
        Entry {
            id,
            key: EntryKey::Field(field.into()),
            value,
            optional_entry,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
