use hif_tree::{NodeKind, RangeDir, Tree};

use crate::{equals, equals_list, shallow_equals, EquivOptions};

#[test]
fn reflexive() {
    let mut tree = Tree::new();
    let left = tree.int_lit(0);
    let right = tree.int_lit(7);
    let span = tree.range(RangeDir::Upto, left, right);
    let ty = tree.int_type(true, Some(span));
    let var = tree.variable("v", Some(ty));

    let opts = EquivOptions::default();
    for id in [left, span, ty, var] {
        assert!(equals(&tree, id, id, &opts));
    }
}

#[test]
fn different_variants_never_equal() {
    let mut tree = Tree::new();
    let a = tree.int_lit(1);
    let b = tree.real_lit(1.0);
    assert!(!equals(&tree, a, b, &EquivOptions::default()));
    assert!(!equals(&tree, a, b, &EquivOptions::kind_only()));
}

#[test]
fn kind_only_ignores_contents() {
    let mut tree = Tree::new();
    let a = tree.int_lit(1);
    let b = tree.int_lit(2);
    assert!(!equals(&tree, a, b, &EquivOptions::default()));
    assert!(equals(&tree, a, b, &EquivOptions::kind_only()));
}

#[test]
fn names_only_ignores_structure() {
    let mut tree = Tree::new();
    let ty = tree.bool_type();
    let a = tree.variable("v", Some(ty));
    let b = tree.variable("v", None);
    assert!(!equals(&tree, a, b, &EquivOptions::default()));
    assert!(equals(&tree, a, b, &EquivOptions::names_only()));
}

#[test]
fn scalar_flag_sensitivity() {
    let mut tree = Tree::new();
    let a = tree.bit_type(true, false);
    let b = tree.bit_type(true, true);

    assert!(!equals(&tree, a, b, &EquivOptions::default()));
    let opts = EquivOptions { check_resolved: false, ..EquivOptions::default() };
    assert!(equals(&tree, a, b, &opts));

    let a = tree.int_type(true, None);
    let b = tree.int_type(false, None);
    assert!(!equals(&tree, a, b, &EquivOptions::default()));
    let opts = EquivOptions { check_signed: false, ..EquivOptions::default() };
    assert!(equals(&tree, a, b, &opts));
}

#[test]
fn span_comparison_is_optional() {
    let mut tree = Tree::new();
    let l1 = tree.int_lit(0);
    let r1 = tree.int_lit(7);
    let s1 = tree.range(RangeDir::Upto, l1, r1);
    let a = tree.int_type(true, Some(s1));
    let l2 = tree.int_lit(0);
    let r2 = tree.int_lit(15);
    let s2 = tree.range(RangeDir::Upto, l2, r2);
    let b = tree.int_type(true, Some(s2));

    assert!(!equals(&tree, a, b, &EquivOptions::default()));
    let opts = EquivOptions { check_spans: false, ..EquivOptions::default() };
    assert!(equals(&tree, a, b, &opts));
}

#[test]
fn range_direction_toggle() {
    let mut tree = Tree::new();
    let l1 = tree.int_lit(0);
    let r1 = tree.int_lit(7);
    let a = tree.range(RangeDir::Upto, l1, r1);
    let l2 = tree.int_lit(0);
    let r2 = tree.int_lit(7);
    let b = tree.range(RangeDir::Downto, l2, r2);

    assert!(!equals(&tree, a, b, &EquivOptions::default()));
    let opts = EquivOptions { check_span_direction: false, ..EquivOptions::default() };
    assert!(equals(&tree, a, b, &opts));
}

#[test]
fn list_length_mismatch_is_unequal() {
    let mut tree = Tree::new();
    let a = tree.int_lit(1);
    let b = tree.int_lit(1);
    let c = tree.int_lit(1);
    let opts = EquivOptions::default();
    assert!(equals_list(&tree, &[a, b], &[c, a], &opts));
    assert!(!equals_list(&tree, &[a, b], &[c], &opts));
    assert!(!equals_list(&tree, &[], &[c], &opts));
    assert!(equals_list(&tree, &[], &[], &opts));
}

#[test]
fn binding_short_circuit() {
    let mut tree = Tree::new();
    let decl = tree.variable("x", None);
    // Different spelled-out structure below the symbols would not matter:
    // equal caches decide.
    let a = tree.ident("x");
    let b = tree.ident("x");
    tree.kind_mut(a).set_binding(Some(decl));
    tree.kind_mut(b).set_binding(Some(decl));

    let opts = EquivOptions { use_bindings: true, ..EquivOptions::default() };
    assert!(equals(&tree, a, b, &opts));

    // Same name, different declarations: only strict mode notices.
    let other = tree.variable("x", None);
    tree.kind_mut(b).set_binding(Some(other));
    assert!(equals(&tree, a, b, &EquivOptions::default()));
    let strict = EquivOptions { strict_bindings: true, ..EquivOptions::default() };
    assert!(!equals(&tree, a, b, &strict));
}

#[test]
fn resolved_symbols_preset_decides_by_cache_alone() {
    let mut tree = Tree::new();
    let decl = tree.variable("x", None);
    let other = tree.variable("x", None);
    let a = tree.ident("x");
    let b = tree.ident("x");
    tree.kind_mut(a).set_binding(Some(decl));
    tree.kind_mut(b).set_binding(Some(other));

    // Structurally identical symbols, disagreeing caches.
    let opts = EquivOptions::resolved_symbols();
    assert!(!equals(&tree, a, b, &opts));

    tree.kind_mut(b).set_binding(Some(decl));
    assert!(equals(&tree, a, b, &opts));
}

#[test]
fn pattern_holes() {
    let mut tree = Tree::new();
    let ty = tree.bool_type();
    let pattern = tree.variable("v", None);
    let concrete = tree.variable("v", Some(ty));

    assert!(!equals(&tree, pattern, concrete, &EquivOptions::default()));
    assert!(equals(&tree, pattern, concrete, &EquivOptions::pattern()));
    // Holes are one-sided.
    let left_only =
        EquivOptions { allow_missing_left: true, ..EquivOptions::default() };
    assert!(equals(&tree, pattern, concrete, &left_only));
    assert!(!equals(&tree, concrete, pattern, &left_only));
}

#[test]
fn shallow_ignores_children() {
    let mut tree = Tree::new();
    let l1 = tree.int_lit(0);
    let r1 = tree.int_lit(7);
    let s1 = tree.range(RangeDir::Upto, l1, r1);
    let a = tree.int_type(true, Some(s1));
    let b = tree.int_type(true, None);

    assert!(!equals(&tree, a, b, &EquivOptions::default()));
    assert!(shallow_equals(&tree, a, b, &EquivOptions::default()));
}

#[test]
fn directions_toggle() {
    let mut tree = Tree::new();
    let a = tree.alloc(NodeKind::Port {
        name: "p".into(),
        direction: hif_tree::Direction::In,
        ty: None,
        initial: None,
    });
    let b = tree.alloc(NodeKind::Port {
        name: "p".into(),
        direction: hif_tree::Direction::Out,
        ty: None,
        initial: None,
    });
    assert!(!equals(&tree, a, b, &EquivOptions::default()));
    let opts = EquivOptions { check_directions: false, ..EquivOptions::default() };
    assert!(equals(&tree, a, b, &opts));
}

#[test]
fn source_info_ignored_by_default() {
    use hif_tree::Span;
    use text_size::TextRange;

    let mut tree = Tree::new();
    let file = tree.sources.intern(std::path::Path::new("a.vhd"));
    let a = tree.int_lit(1);
    let b = tree.int_lit(1);
    tree[a].span = Some(Span::new(file, TextRange::new(0.into(), 4.into())));

    assert!(equals(&tree, a, b, &EquivOptions::default()));
    let opts = EquivOptions { check_source_info: true, ..EquivOptions::default() };
    assert!(!equals(&tree, a, b, &opts));
}
