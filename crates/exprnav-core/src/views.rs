//! Kind-specific views over a [`NavigableExpr`].
//!
//! Each view reinterprets the raw payload of one node kind. Views are always
//! constructible: a view taken from a node of a different kind is empty
//! (no elements, empty names, absent nodes), so generic code can call any
//! accessor without checking the kind first.
//!
//! Child nodes returned by views are fresh handles whose parent is the viewed
//! node, exactly as [`NavigableExpr::children`] would build them.

use crate::ast::{CallExpr, ComprehensionExpr, Entry, ExprNode, ListExpr, SelectExpr};
use crate::kind::ExprKind;
use crate::navigable::NavigableExpr;
use crate::types::{Type, DYN};

// ============================================================================
// Call
// ============================================================================

/// A function call and its arguments.
#[derive(Debug, Clone, Copy)]
pub struct CallView<'a> {
    nav: NavigableExpr<'a>,
    call: Option<&'a CallExpr>,
}

impl<'a> CallView<'a> {
    pub(crate) fn new(nav: NavigableExpr<'a>) -> Self {
        let call = match &nav.to_expr().expr {
            ExprNode::Call(call) => Some(call),
            _ => None,
        };
        CallView { nav, call }
    }

    /// Name of the called function, or `""`.
    pub fn function_name(&self) -> &'a str {
        self.call.map_or("", |call| call.function.as_str())
    }

    /// Receiver of a method-style call.
    pub fn target(&self) -> Option<NavigableExpr<'a>> {
        let target = self.call?.target.as_deref()?;
        Some(self.nav.child(target))
    }

    /// Call arguments, excluding the target.
    ///
    /// Differs from [`NavigableExpr::children`], which lists the target first.
    pub fn args(&self) -> Vec<NavigableExpr<'a>> {
        self.call
            .map(|call| call.args.iter().map(|arg| self.nav.child(arg)).collect())
            .unwrap_or_default()
    }

    /// Result type of the call; `dyn` for a non-call node.
    pub fn return_type(&self) -> &'a Type {
        match self.call {
            Some(_) => self.nav.ty(),
            None => &DYN,
        }
    }
}

// ============================================================================
// List
// ============================================================================

/// A list literal.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    nav: NavigableExpr<'a>,
    list: Option<&'a ListExpr>,
}

impl<'a> ListView<'a> {
    pub(crate) fn new(nav: NavigableExpr<'a>) -> Self {
        let list = match &nav.to_expr().expr {
            ExprNode::List(list) => Some(list),
            _ => None,
        };
        ListView { nav, list }
    }

    /// List elements in order.
    pub fn elements(&self) -> Vec<NavigableExpr<'a>> {
        self.list
            .map(|list| list.elements.iter().map(|e| self.nav.child(e)).collect())
            .unwrap_or_default()
    }

    /// Positions of elements only included when present.
    pub fn optional_indices(&self) -> &'a [i32] {
        self.list
            .map(|list| list.optional_indices.as_slice())
            .unwrap_or_default()
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.list.map_or(0, |list| list.elements.len())
    }
}

// ============================================================================
// Map
// ============================================================================

/// A map literal.
#[derive(Debug, Clone, Copy)]
pub struct MapView<'a> {
    nav: NavigableExpr<'a>,
    entries: &'a [Entry],
}

impl<'a> MapView<'a> {
    pub(crate) fn new(nav: NavigableExpr<'a>) -> Self {
        let entries = match &nav.to_expr().expr {
            ExprNode::Struct(s) if nav.kind() == ExprKind::Map => s.entries.as_slice(),
            _ => &[][..],
        };
        MapView { nav, entries }
    }

    /// Key/value entries in declaration order.
    pub fn entries(&self) -> Vec<EntryView<'a>> {
        self.entries
            .iter()
            .map(|entry| EntryView {
                key: self.nav.child(entry.map_key()),
                value: self.nav.child(&entry.value),
                is_optional: entry.optional_entry,
            })
            .collect()
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }
}

/// One `key: value` entry of a map literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryView<'a> {
    key: NavigableExpr<'a>,
    value: NavigableExpr<'a>,
    is_optional: bool,
}

impl<'a> EntryView<'a> {
    pub fn key(&self) -> NavigableExpr<'a> {
        self.key
    }

    pub fn value(&self) -> NavigableExpr<'a> {
        self.value
    }

    /// Whether the entry is only set when its value is present.
    pub fn is_optional(&self) -> bool {
        self.is_optional
    }
}

// ============================================================================
// Select
// ============================================================================

/// A field selection or presence test.
#[derive(Debug, Clone, Copy)]
pub struct SelectView<'a> {
    nav: NavigableExpr<'a>,
    select: Option<&'a SelectExpr>,
}

impl<'a> SelectView<'a> {
    pub(crate) fn new(nav: NavigableExpr<'a>) -> Self {
        let select = match &nav.to_expr().expr {
            ExprNode::Select(select) => Some(select),
            _ => None,
        };
        SelectView { nav, select }
    }

    /// The operand being selected from.
    pub fn operand(&self) -> Option<NavigableExpr<'a>> {
        self.select.map(|select| self.nav.child(&select.operand))
    }

    /// Selected field name, or `""`.
    pub fn field_name(&self) -> &'a str {
        self.select.map_or("", |select| select.field.as_str())
    }

    /// Whether this is a macro-generated presence test rather than a value access.
    pub fn is_test_only(&self) -> bool {
        self.select.is_some_and(|select| select.test_only)
    }
}

// ============================================================================
// Struct
// ============================================================================

/// A struct literal and its field initializers.
#[derive(Debug, Clone, Copy)]
pub struct StructView<'a> {
    nav: NavigableExpr<'a>,
    type_name: &'a str,
    entries: &'a [Entry],
}

impl<'a> StructView<'a> {
    pub(crate) fn new(nav: NavigableExpr<'a>) -> Self {
        let (type_name, entries) = match &nav.to_expr().expr {
            ExprNode::Struct(s) if nav.kind() == ExprKind::Struct => {
                (s.message_name.as_str(), s.entries.as_slice())
            }
            _ => ("", &[][..]),
        };
        StructView {
            nav,
            type_name,
            entries,
        }
    }

    /// Fully-qualified message type name, or `""`.
    pub fn type_name(&self) -> &'a str {
        self.type_name
    }

    /// Field initializers in declaration order.
    pub fn fields(&self) -> Vec<FieldView<'a>> {
        self.entries
            .iter()
            .map(|entry| FieldView {
                name: entry.field_key(),
                value: self.nav.child(&entry.value),
                is_optional: entry.optional_entry,
            })
            .collect()
    }
}

/// One `field: value` initializer of a struct literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldView<'a> {
    name: &'a str,
    value: NavigableExpr<'a>,
    is_optional: bool,
}

impl<'a> FieldView<'a> {
    pub fn field_name(&self) -> &'a str {
        self.name
    }

    pub fn value(&self) -> NavigableExpr<'a> {
        self.value
    }

    /// Whether the field is only set when its value is present.
    pub fn is_optional(&self) -> bool {
        self.is_optional
    }
}

// ============================================================================
// Comprehension
// ============================================================================

/// A comprehension (fold) expression.
#[derive(Debug, Clone, Copy)]
pub struct ComprehensionView<'a> {
    nav: NavigableExpr<'a>,
    comp: Option<&'a ComprehensionExpr>,
}

impl<'a> ComprehensionView<'a> {
    pub(crate) fn new(nav: NavigableExpr<'a>) -> Self {
        let comp = match &nav.to_expr().expr {
            ExprNode::Comprehension(comp) => Some(&**comp),
            _ => None,
        };
        ComprehensionView { nav, comp }
    }

    pub fn iter_range(&self) -> Option<NavigableExpr<'a>> {
        self.comp.map(|comp| self.nav.child(&comp.iter_range))
    }

    pub fn iter_var(&self) -> &'a str {
        self.comp.map_or("", |comp| comp.iter_var.as_str())
    }

    pub fn accu_var(&self) -> &'a str {
        self.comp.map_or("", |comp| comp.accu_var.as_str())
    }

    pub fn accu_init(&self) -> Option<NavigableExpr<'a>> {
        self.comp.map(|comp| self.nav.child(&comp.accu_init))
    }

    pub fn loop_condition(&self) -> Option<NavigableExpr<'a>> {
        self.comp.map(|comp| self.nav.child(&comp.loop_condition))
    }

    pub fn loop_step(&self) -> Option<NavigableExpr<'a>> {
        self.comp.map(|comp| self.nav.child(&comp.loop_step))
    }

    pub fn result(&self) -> Option<NavigableExpr<'a>> {
        self.comp.map(|comp| self.nav.child(&comp.result))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::ast::{ComprehensionExpr, Constant, Entry, Expr};
    use crate::kind::ExprKind;
    use crate::navigable::{NavigableAst, NavigableExpr};
    use crate::types::{Type, TypeMap};

    fn ids(nodes: &[NavigableExpr<'_>]) -> Vec<i64> {
        nodes.iter().map(|n| n.id()).collect()
    }

    /// Kinds whose accessor reports data for `node`.
    fn populated_views(node: NavigableExpr<'_>) -> Vec<ExprKind> {
        let mut kinds = Vec::new();
        if node.as_literal().ok().flatten().is_some() {
            kinds.push(ExprKind::Literal);
        }
        if node.as_ident().is_some() {
            kinds.push(ExprKind::Ident);
        }
        if node.as_select().operand().is_some() {
            kinds.push(ExprKind::Select);
        }
        if !node.as_call().function_name().is_empty() {
            kinds.push(ExprKind::Call);
        }
        if node.as_list().size() > 0 {
            kinds.push(ExprKind::List);
        }
        if node.as_map().size() > 0 {
            kinds.push(ExprKind::Map);
        }
        if !node.as_struct().type_name().is_empty() {
            kinds.push(ExprKind::Struct);
        }
        if node.as_comprehension().result().is_some() {
            kinds.push(ExprKind::Comprehension);
        }
        kinds
    }

    fn sum_comprehension() -> Expr {
        Expr::comprehension(
            10,
            ComprehensionExpr {
                iter_var: "x".to_string(),
                iter_range: Expr::ident(1, "items"),
                accu_var: "sum".to_string(),
                accu_init: Expr::constant(2, Constant::Int64(0)),
                loop_condition: Expr::constant(3, Constant::Bool(true)),
                loop_step: Expr::call(
                    6,
                    "_+_",
                    vec![Expr::ident(4, "sum"), Expr::ident(5, "x")],
                ),
                result: Expr::ident(7, "sum"),
            },
        )
    }

    // =========================================================================
    // Call
    // =========================================================================

    #[test]
    fn test_global_call_args_match_children() {
        // greet(name)
        let expr = Expr::call(2, "greet", vec![Expr::ident(1, "name")]);
        let types = TypeMap::new();
        let ast = NavigableAst::new(&expr, &types);
        let call = ast.root().as_call();

        assert_eq!(call.function_name(), "greet");
        assert!(call.target().is_none());
        assert_eq!(ids(&call.args()), vec![1]);
        assert_eq!(ids(&ast.root().children()), vec![1]);
    }

    #[test]
    fn test_member_call_args_exclude_target() {
        // name.greet()
        let expr = Expr::member_call(2, Expr::ident(1, "name"), "greet", vec![]);
        let types = TypeMap::new();
        let ast = NavigableAst::new(&expr, &types);
        let call = ast.root().as_call();

        assert_eq!(call.target().map(|t| t.id()), Some(1));
        assert!(call.args().is_empty());
        assert_eq!(ids(&ast.root().children()), vec![1]);
    }

    #[test]
    fn test_call_return_type() {
        let expr = Expr::call(2, "size", vec![Expr::ident(1, "xs")]);
        let mut types = TypeMap::new();
        types.insert(2, Type::Int);
        let ast = NavigableAst::new(&expr, &types);
        assert_eq!(ast.root().as_call().return_type(), &Type::Int);

        let ident = ast.root().children()[0];
        assert!(ident.as_call().return_type().is_dyn());
    }

    #[test]
    fn test_call_target_parent_is_call() {
        let expr = Expr::member_call(3, Expr::ident(1, "s"), "contains", vec![Expr::ident(2, "t")]);
        let types = TypeMap::new();
        let ast = NavigableAst::new(&expr, &types);
        let target = ast.root().as_call().target().expect("member call has target");
        assert_eq!(target.parent().map(|p| p.id()), Some(3));
    }

    // =========================================================================
    // List
    // =========================================================================

    #[test]
    fn test_list_view() {
        let expr = Expr::list(
            10,
            vec![
                Expr::constant(1, Constant::Int64(1)),
                Expr::ident(2, "maybe"),
                Expr::constant(3, Constant::Int64(3)),
            ],
            vec![1],
        );
        let types = TypeMap::new();
        let ast = NavigableAst::new(&expr, &types);
        let list = ast.root().as_list();

        assert_eq!(list.size(), 3);
        assert_eq!(ids(&list.elements()), vec![1, 2, 3]);
        assert_eq!(list.optional_indices(), &[1]);
    }

    // =========================================================================
    // Map and Struct
    // =========================================================================

    #[test]
    fn test_map_entries_preserve_order() {
        let expr = Expr::map(
            20,
            vec![
                Entry::map_entry(
                    11,
                    Expr::constant(1, Constant::String("b".to_string())),
                    Expr::ident(2, "x"),
                    false,
                ),
                Entry::map_entry(
                    12,
                    Expr::constant(3, Constant::String("a".to_string())),
                    Expr::ident(4, "y"),
                    true,
                ),
            ],
        );
        let types = TypeMap::new();
        let ast = NavigableAst::new(&expr, &types);
        let map = ast.root().as_map();

        assert_eq!(map.size(), 2);
        let entries = map.entries();
        assert_eq!(entries[0].key().id(), 1);
        assert_eq!(entries[0].value().id(), 2);
        assert!(!entries[0].is_optional());
        assert_eq!(entries[1].key().id(), 3);
        assert_eq!(entries[1].value().id(), 4);
        assert!(entries[1].is_optional());

        // Struct view of a map is empty.
        assert_eq!(ast.root().as_struct().type_name(), "");
        assert!(ast.root().as_struct().fields().is_empty());
    }

    #[test]
    fn test_struct_fields_are_metadata() {
        let expr = Expr::structure(
            20,
            "google.type.Date",
            vec![
                Entry::field(11, "year", Expr::constant(1, Constant::Int64(2024)), false),
                Entry::field(12, "month", Expr::ident(2, "m"), true),
            ],
        );
        let types = TypeMap::new();
        let ast = NavigableAst::new(&expr, &types);
        let root = ast.root();
        let st = root.as_struct();

        assert_eq!(st.type_name(), "google.type.Date");
        let fields = st.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field_name(), "year");
        assert_eq!(fields[0].value().id(), 1);
        assert!(!fields[0].is_optional());
        assert_eq!(fields[1].field_name(), "month");
        assert!(fields[1].is_optional());

        assert_eq!(ids(&root.children()), vec![1, 2]);
        // Map view of a struct is empty.
        assert_eq!(root.as_map().size(), 0);
        assert!(root.as_map().entries().is_empty());
    }

    // =========================================================================
    // Select
    // =========================================================================

    #[test]
    fn test_select_and_presence_test() {
        let expr = Expr::call(
            5,
            "_&&_",
            vec![
                Expr::presence_test(2, Expr::ident(1, "msg"), "field"),
                Expr::select(4, Expr::ident(3, "msg"), "field"),
            ],
        );
        let types = TypeMap::new();
        let ast = NavigableAst::new(&expr, &types);
        let children = ast.root().children();

        let has = children[0].as_select();
        assert_eq!(has.field_name(), "field");
        assert!(has.is_test_only());
        assert_eq!(has.operand().and_then(|o| o.as_ident()), Some("msg"));

        let get = children[1].as_select();
        assert!(!get.is_test_only());
        assert_eq!(get.operand().map(|o| o.id()), Some(3));
    }

    // =========================================================================
    // Comprehension
    // =========================================================================

    #[test]
    fn test_comprehension_view() {
        let expr = sum_comprehension();
        let types = TypeMap::new();
        let ast = NavigableAst::new(&expr, &types);
        let root = ast.root();
        let comp = root.as_comprehension();

        assert_eq!(comp.iter_range().and_then(|r| r.as_ident()), Some("items"));
        assert_eq!(comp.iter_var(), "x");
        assert_eq!(comp.accu_var(), "sum");
        assert_eq!(comp.accu_init().map(|n| n.id()), Some(2));
        assert_eq!(comp.loop_condition().map(|n| n.id()), Some(3));
        assert_eq!(comp.loop_step().map(|n| n.id()), Some(6));
        assert_eq!(comp.result().map(|n| n.id()), Some(7));
        assert_eq!(ids(&root.children()), vec![1, 2, 3, 6, 7]);
    }

    // =========================================================================
    // Nil Safety
    // =========================================================================

    #[test]
    fn test_wrong_kind_views_are_empty() {
        let expr = Expr::ident(1, "x");
        let types = TypeMap::new();
        let ast = NavigableAst::new(&expr, &types);
        let root = ast.root();

        let call = root.as_call();
        assert_eq!(call.function_name(), "");
        assert!(call.target().is_none());
        assert!(call.args().is_empty());

        let list = root.as_list();
        assert_eq!(list.size(), 0);
        assert!(list.elements().is_empty());
        assert!(list.optional_indices().is_empty());

        let select = root.as_select();
        assert!(select.operand().is_none());
        assert_eq!(select.field_name(), "");
        assert!(!select.is_test_only());

        let comp = root.as_comprehension();
        assert!(comp.iter_range().is_none());
        assert_eq!(comp.iter_var(), "");
        assert_eq!(comp.accu_var(), "");
        assert!(comp.accu_init().is_none());
        assert!(comp.loop_condition().is_none());
        assert!(comp.loop_step().is_none());
        assert!(comp.result().is_none());
    }

    #[test]
    fn test_exactly_one_view_populated_per_kind() {
        let exprs = vec![
            Expr::constant(1, Constant::Int64(1)),
            Expr::ident(1, "x"),
            Expr::select(2, Expr::ident(1, "x"), "f"),
            Expr::call(1, "f", vec![]),
            Expr::list(2, vec![Expr::ident(1, "x")], vec![]),
            Expr::map(
                3,
                vec![Entry::map_entry(4, Expr::ident(1, "k"), Expr::ident(2, "v"), false)],
            ),
            Expr::structure(1, "pkg.Msg", vec![]),
            sum_comprehension(),
        ];
        let types = TypeMap::new();
        for expr in &exprs {
            let ast = NavigableAst::new(expr, &types);
            let root = ast.root();
            assert_eq!(populated_views(root), vec![root.kind()], "views of {:?}", expr);
        }

        let unspecified = Expr::default();
        let ast = NavigableAst::new(&unspecified, &types);
        assert!(populated_views(ast.root()).is_empty());
    }
}
