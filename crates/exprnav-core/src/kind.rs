//! Expression kinds and the variant classifier.
//!
//! [`classify`] maps a raw node to its semantic [`ExprKind`] and the
//! [`ChildStrategy`] used to enumerate its children. The classifier is the
//! single source of truth for traversal order:
//!
//! | raw variant                  | kind            | children                                        |
//! |------------------------------|-----------------|-------------------------------------------------|
//! | constant                     | `Literal`       | none                                            |
//! | identifier                   | `Ident`         | none                                            |
//! | select                       | `Select`        | operand                                         |
//! | call                         | `Call`          | target (if any), then args                      |
//! | list                         | `List`          | elements                                        |
//! | struct, message name set     | `Struct`        | field values                                    |
//! | struct, message name empty   | `Map`           | key, value for each entry                       |
//! | comprehension                | `Comprehension` | range, accu init, condition, step, result       |
//! | unspecified                  | `Unspecified`   | none                                            |

use std::fmt;

use crate::ast::{Expr, ExprNode};

/// Semantic kind of an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExprKind {
    /// Unset expression with no specified properties.
    #[default]
    Unspecified,
    /// Primitive scalar literal.
    Literal,
    /// Simple variable, constant, or type identifier.
    Ident,
    /// Field selection.
    Select,
    /// Function call.
    Call,
    /// List literal.
    List,
    /// Map literal.
    Map,
    /// Struct literal.
    Struct,
    /// Comprehension generated by a macro.
    Comprehension,
}

impl ExprKind {
    /// All kinds, in declaration order.
    pub const ALL: [ExprKind; 9] = [
        ExprKind::Unspecified,
        ExprKind::Literal,
        ExprKind::Ident,
        ExprKind::Select,
        ExprKind::Call,
        ExprKind::List,
        ExprKind::Map,
        ExprKind::Struct,
        ExprKind::Comprehension,
    ];

    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExprKind::Unspecified => "unspecified",
            ExprKind::Literal => "literal",
            ExprKind::Ident => "ident",
            ExprKind::Select => "select",
            ExprKind::Call => "call",
            ExprKind::List => "list",
            ExprKind::Map => "map",
            ExprKind::Struct => "struct",
            ExprKind::Comprehension => "comprehension",
        }
    }

    /// Returns true for the aggregate literal kinds (list, map, struct).
    pub fn is_aggregate(&self) -> bool {
        matches!(self, ExprKind::List | ExprKind::Map | ExprKind::Struct)
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the children of a node are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStrategy {
    /// Leaf node.
    None,
    /// The select operand.
    Operand,
    /// Call target (if present) followed by the arguments.
    TargetThenArgs,
    /// List elements in order.
    Elements,
    /// Struct field values in order; field names are not nodes.
    FieldValues,
    /// Map entries flattened as key, value, key, value, ...
    KeyValuePairs,
    /// Iteration range, accumulator init, loop condition, loop step, result.
    ComprehensionParts,
}

/// Classify a raw node into its kind and child strategy.
pub fn classify(expr: &Expr) -> (ExprKind, ChildStrategy) {
    match &expr.expr {
        ExprNode::Const(_) => (ExprKind::Literal, ChildStrategy::None),
        ExprNode::Ident(_) => (ExprKind::Ident, ChildStrategy::None),
        ExprNode::Select(_) => (ExprKind::Select, ChildStrategy::Operand),
        ExprNode::Call(_) => (ExprKind::Call, ChildStrategy::TargetThenArgs),
        ExprNode::List(_) => (ExprKind::List, ChildStrategy::Elements),
        ExprNode::Struct(s) if !s.message_name.is_empty() => {
            (ExprKind::Struct, ChildStrategy::FieldValues)
        }
        ExprNode::Struct(_) => (ExprKind::Map, ChildStrategy::KeyValuePairs),
        ExprNode::Comprehension(_) => (ExprKind::Comprehension, ChildStrategy::ComprehensionParts),
        ExprNode::Unspecified => (ExprKind::Unspecified, ChildStrategy::None),
    }
}

/// Enumerate the raw children of `expr` according to `strategy`.
///
/// A strategy that does not fit the payload yields no children.
pub(crate) fn raw_children(expr: &Expr, strategy: ChildStrategy) -> Vec<&Expr> {
    match (strategy, &expr.expr) {
        (ChildStrategy::Operand, ExprNode::Select(sel)) => {
            let operand: &Expr = &sel.operand;
            vec![operand]
        }
        (ChildStrategy::TargetThenArgs, ExprNode::Call(call)) => {
            let mut children: Vec<&Expr> = Vec::with_capacity(call.args.len() + 1);
            if let Some(target) = &call.target {
                children.push(target);
            }
            children.extend(call.args.iter());
            children
        }
        (ChildStrategy::Elements, ExprNode::List(list)) => list.elements.iter().collect(),
        (ChildStrategy::FieldValues, ExprNode::Struct(s)) => {
            s.entries.iter().map(|entry| &entry.value).collect()
        }
        (ChildStrategy::KeyValuePairs, ExprNode::Struct(s)) => s
            .entries
            .iter()
            .flat_map(|entry| [entry.map_key(), &entry.value])
            .collect(),
        (ChildStrategy::ComprehensionParts, ExprNode::Comprehension(comp)) => vec![
            &comp.iter_range,
            &comp.accu_init,
            &comp.loop_condition,
            &comp.loop_step,
            &comp.result,
        ],
        _ => Vec::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ComprehensionExpr, Constant, Entry};

    fn ids(children: Vec<&Expr>) -> Vec<i64> {
        children.into_iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_classify_every_variant() {
        let cases = vec![
            (Expr::constant(1, Constant::Int64(1)), ExprKind::Literal, ChildStrategy::None),
            (Expr::ident(1, "x"), ExprKind::Ident, ChildStrategy::None),
            (
                Expr::select(2, Expr::ident(1, "x"), "f"),
                ExprKind::Select,
                ChildStrategy::Operand,
            ),
            (Expr::call(1, "f", vec![]), ExprKind::Call, ChildStrategy::TargetThenArgs),
            (Expr::list(1, vec![], vec![]), ExprKind::List, ChildStrategy::Elements),
            (Expr::map(1, vec![]), ExprKind::Map, ChildStrategy::KeyValuePairs),
            (
                Expr::structure(1, "pkg.Msg", vec![]),
                ExprKind::Struct,
                ChildStrategy::FieldValues,
            ),
            (
                Expr::comprehension(1, ComprehensionExpr::default()),
                ExprKind::Comprehension,
                ChildStrategy::ComprehensionParts,
            ),
            (Expr::default(), ExprKind::Unspecified, ChildStrategy::None),
        ];
        for (expr, kind, strategy) in cases {
            assert_eq!(classify(&expr), (kind, strategy), "classifying {:?}", expr);
        }
    }

    #[test]
    fn test_call_children_target_first() {
        let call = Expr::member_call(
            4,
            Expr::ident(1, "t"),
            "f",
            vec![Expr::ident(2, "a"), Expr::ident(3, "b")],
        );
        let (_, strategy) = classify(&call);
        assert_eq!(ids(raw_children(&call, strategy)), vec![1, 2, 3]);
    }

    #[test]
    fn test_map_children_key_before_value() {
        let map = Expr::map(
            10,
            vec![
                Entry::map_entry(11, Expr::ident(1, "k1"), Expr::ident(2, "v1"), false),
                Entry::map_entry(12, Expr::ident(3, "k2"), Expr::ident(4, "v2"), true),
            ],
        );
        let (_, strategy) = classify(&map);
        assert_eq!(ids(raw_children(&map, strategy)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_struct_children_are_values_only() {
        let msg = Expr::structure(
            10,
            "pkg.Msg",
            vec![
                Entry::field(11, "a", Expr::ident(1, "x"), false),
                Entry::field(12, "b", Expr::ident(2, "y"), false),
            ],
        );
        let (_, strategy) = classify(&msg);
        assert_eq!(ids(raw_children(&msg, strategy)), vec![1, 2]);
    }

    #[test]
    fn test_comprehension_children_fixed_order() {
        let comp = Expr::comprehension(
            10,
            ComprehensionExpr {
                iter_var: "x".to_string(),
                iter_range: Expr::ident(1, "items"),
                accu_var: "sum".to_string(),
                accu_init: Expr::constant(2, Constant::Int64(0)),
                loop_condition: Expr::constant(3, Constant::Bool(true)),
                loop_step: Expr::ident(4, "sum"),
                result: Expr::ident(5, "sum"),
            },
        );
        let (_, strategy) = classify(&comp);
        assert_eq!(ids(raw_children(&comp, strategy)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_mismatched_strategy_yields_nothing() {
        let ident = Expr::ident(1, "x");
        assert!(raw_children(&ident, ChildStrategy::Elements).is_empty());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ExprKind::Comprehension.to_string(), "comprehension");
        assert_eq!(ExprKind::ALL.len(), 9);
        assert!(ExprKind::Map.is_aggregate());
        assert!(!ExprKind::Call.is_aggregate());
    }
}
