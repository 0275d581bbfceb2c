//! The HIF tree model.
//!
//! HIF is the intermediate representation the translation tools move HDL
//! descriptions through: frontends parse VHDL/Verilog/SystemC-like dialects
//! into these trees, rewrite passes transform them, backends print another
//! language. This crate owns the object model itself plus the structural
//! primitives everything else is built on: arena storage with stable
//! handles, parent links, ordered owned child lists, detach/replace, deep
//! copy, and the parent-walk navigation helpers.
//!
//! The semantic layers live above: `hif_equiv` decides structural
//! equivalence, `hif_resolve` binds symbols to declarations and sorts
//! actual-argument lists.

pub mod build;
mod name;
pub mod navigation;
pub mod node;
pub mod print;
mod source;
mod tree;

pub use name::Name;
pub use node::{
    BinaryOp, Direction, Field, ListRole, Node, NodeId, NodeKind, RangeDir, Slot, SlotMut, Tag,
    TypeVariant, UnaryOp,
};
pub use source::{FileId, SourceMap, Span};
pub use tree::Tree;

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use crate::node::{BinaryOp, ListRole, NodeKind, UnaryOp};
    use crate::{print, Field, Tree};

    #[test]
    fn push_child_sets_parent() {
        let mut tree = Tree::new();
        let system = tree.system("sys");
        let var = tree.variable("v", None);
        tree.push_child(system, ListRole::Declarations, var);
        assert_eq!(tree.parent(var), Some(system));
        assert_eq!(tree.kind(system).list(ListRole::Declarations), Some(&[var][..]));
    }

    #[test]
    fn detach_clears_both_sides() {
        let mut tree = Tree::new();
        let system = tree.system("sys");
        let var = tree.variable("v", None);
        tree.push_child(system, ListRole::Declarations, var);

        tree.detach(var);
        assert_eq!(tree.parent(var), None);
        assert!(tree.kind(system).list(ListRole::Declarations).unwrap().is_empty());
    }

    #[test]
    fn replace_swaps_in_place() {
        let mut tree = Tree::new();
        let lhs = tree.int_lit(1);
        let rhs = tree.int_lit(2);
        let sum = tree.binary(BinaryOp::Add, lhs, rhs);

        let three = tree.int_lit(3);
        tree.replace(rhs, three);

        assert_eq!(tree.parent(three), Some(sum));
        assert_eq!(tree.parent(rhs), None);
        assert_eq!(print::dump(&tree, sum), "(1 Add 3)");
    }

    #[test]
    fn replace_keeps_list_position() {
        let mut tree = Tree::new();
        let a = tree.int_lit(1);
        let b = tree.int_lit(2);
        let c = tree.int_lit(3);
        let agg = tree.alloc(NodeKind::Aggregate { elements: Vec::new(), others: None });
        for it in [a, b, c] {
            tree.push_child(agg, ListRole::Elements, it);
        }

        let swapped = tree.int_lit(9);
        tree.replace(b, swapped);
        assert_eq!(tree.kind(agg).list(ListRole::Elements), Some(&[a, swapped, c][..]));
    }

    #[test]
    fn set_single_detaches_previous() {
        let mut tree = Tree::new();
        let ty = tree.bool_type();
        let var = tree.variable("v", Some(ty));

        let new_ty = tree.bool_type();
        let old = tree.set_single(var, Field::Type, Some(new_ty));
        assert_eq!(old, Some(ty));
        assert_eq!(tree.parent(ty), None);
        assert_eq!(tree.parent(new_ty), Some(var));
    }

    #[test]
    fn take_list_transfers_ownership_back() {
        let mut tree = Tree::new();
        let call = tree.function_call("f", Vec::new(), Vec::new());
        let v = tree.int_lit(1);
        let arg = tree.param_assign(None, v);
        tree.push_child(call, ListRole::Arguments, arg);

        let taken = tree.take_list(call, ListRole::Arguments);
        assert_eq!(taken, vec![arg]);
        assert_eq!(tree.parent(arg), None);
        assert!(tree.kind(call).list(ListRole::Arguments).unwrap().is_empty());
    }

    #[test]
    fn transplant_preserves_order() {
        let mut tree = Tree::new();
        let from = tree.function_call("f", Vec::new(), Vec::new());
        let to = tree.function_call("g", Vec::new(), Vec::new());
        let mut ids = Vec::new();
        for i in 0..3 {
            let v = tree.int_lit(i);
            let assign = tree.param_assign(None, v);
            tree.push_child(from, ListRole::Arguments, assign);
            ids.push(assign);
        }
        tree.transplant_list(from, ListRole::Arguments, to, ListRole::Arguments);
        assert_eq!(tree.kind(to).list(ListRole::Arguments), Some(&ids[..]));
        for id in ids {
            assert_eq!(tree.parent(id), Some(to));
        }
    }

    #[test]
    fn deep_copy_is_fresh_and_equal_shaped() {
        let mut tree = Tree::new();
        let lhs = tree.ident("i");
        let rhs = tree.int_lit(10);
        let sum = tree.binary(BinaryOp::Add, lhs, rhs);

        let copy = tree.deep_copy(sum);
        assert_ne!(copy, sum);
        assert_eq!(tree.parent(copy), None);
        assert_eq!(print::dump(&tree, copy), print::dump(&tree, sum));
    }

    #[test]
    fn deep_copy_remaps_internal_bindings() {
        let mut tree = Tree::new();
        let func = tree.function("f", None, Vec::new(), Vec::new());
        let param = tree.parameter("a", None, None);
        tree.push_child(func, ListRole::Parameters, param);
        let sym = tree.ident("a");
        tree.kind_mut(sym).set_binding(Some(param));
        let var = tree.variable("v", None);
        tree.set_single(var, Field::Initial, Some(sym));
        tree.push_child(func, ListRole::Declarations, var);

        let copy = tree.deep_copy(func);
        let copied_param = tree.kind(copy).list(ListRole::Parameters).unwrap()[0];
        let copied_var = tree.kind(copy).list(ListRole::Declarations).unwrap()[0];
        let copied_sym = tree.single(copied_var, Field::Initial).unwrap();
        assert_eq!(tree.kind(copied_sym).binding(), Some(copied_param));
    }

    #[test]
    fn dump_renders_expressions_compactly() {
        let mut tree = Tree::new();
        let i = tree.ident("i");
        let one = tree.int_lit(1);
        let sum = tree.binary(BinaryOp::Add, i, one);
        let neg = tree.unary(UnaryOp::Minus, sum);
        let ty = tree.int_type(true, None);
        let var = tree.variable("acc", Some(ty));
        tree.set_single(var, Field::Initial, Some(neg));

        expect![["variable acc(int_type, (Minus (i Add 1)))"]]
            .assert_eq(&print::dump(&tree, var));
    }

    #[test]
    fn covering_span_folds_over_the_subtree() {
        use text_size::TextRange;

        use crate::Span;

        let mut tree = Tree::new();
        let file = tree.sources.intern(std::path::Path::new("a.vhd"));
        let lhs = tree.alloc_at(
            NodeKind::IntLit { value: 1 },
            Span::new(file, TextRange::new(4.into(), 5.into())),
        );
        let rhs = tree.alloc_at(
            NodeKind::IntLit { value: 2 },
            Span::new(file, TextRange::new(10.into(), 12.into())),
        );
        let sum = tree.binary(BinaryOp::Add, lhs, rhs);

        assert_eq!(tree.span(sum), None);
        let covering = tree.covering_span(sum).unwrap();
        assert_eq!(covering.range, TextRange::new(4.into(), 12.into()));
        assert_eq!(covering.file, file);
    }

    #[test]
    fn deep_copy_keeps_external_bindings() {
        let mut tree = Tree::new();
        let decl = tree.variable("x", None);
        let sym = tree.ident("x");
        tree.kind_mut(sym).set_binding(Some(decl));

        let copy = tree.deep_copy(sym);
        assert_eq!(tree.kind(copy).binding(), Some(decl));
    }
}
