//! Deep structural equivalence of HIF subtrees.
//!
//! The comparison is variant-first: nodes of different runtime variants are
//! never equal. For matching variants the declared attributes are compared
//! according to the active [`EquivOptions`], then the owned child lists are
//! compared pairwise in order. The walk is pure: it never resolves symbols
//! and never touches declaration caches.

mod options;

use hif_tree::{NodeId, NodeKind, Tree};

pub use crate::options::EquivOptions;

#[cfg(test)]
mod tests;

/// Deep comparison of two subtrees.
pub fn equals(tree: &Tree, a: NodeId, b: NodeId, opts: &EquivOptions) -> bool {
    Cmp { tree, opts, recurse: true }.nodes(a, b)
}

/// Pairwise comparison of two ordered lists. Lists of different length are
/// unequal regardless of content.
pub fn equals_list(tree: &Tree, a: &[NodeId], b: &[NodeId], opts: &EquivOptions) -> bool {
    Cmp { tree, opts, recurse: true }.list(a, b)
}

/// Compares variants and attributes only, ignoring all children. Used by
/// the deduction engine for its own lock-step walk.
pub fn shallow_equals(tree: &Tree, a: NodeId, b: NodeId, opts: &EquivOptions) -> bool {
    Cmp { tree, opts, recurse: false }.nodes(a, b)
}

struct Cmp<'a> {
    tree: &'a Tree,
    opts: &'a EquivOptions,
    recurse: bool,
}

impl Cmp<'_> {
    fn nodes(&self, a: NodeId, b: NodeId) -> bool {
        let o = self.opts;
        let (ka, kb) = (self.tree.kind(a), self.tree.kind(b));

        if o.kind_only {
            return ka.tag() == kb.tag();
        }
        if o.names_only {
            return ka.tag() == kb.tag() && ka.name() == kb.name();
        }

        // Symbol short-circuit: equal non-null caches decide without
        // descending. Deliberate trade-off; assumes consistent caches.
        if o.use_bindings && ka.is_symbol() && kb.is_symbol() {
            if let (Some(da), Some(db)) = (ka.binding(), kb.binding()) {
                if da == db {
                    return true;
                }
            }
        }
        if o.strict_bindings {
            if let (Some(da), Some(db)) = (ka.binding(), kb.binding()) {
                if da != db {
                    return false;
                }
            }
        }

        if o.check_source_info && self.tree.span(a) != self.tree.span(b) {
            return false;
        }

        use NodeKind::*;
        match (ka, kb) {
            (
                Const { name: n1, ty: t1, value: v1 },
                Const { name: n2, ty: t2, value: v2 },
            ) => {
                n1 == n2
                    && self.decl_ty(*t1, *t2)
                    && (!o.check_field_defaults || self.opt(*v1, *v2))
            }
            (
                Variable { name: n1, ty: t1, initial: i1 },
                Variable { name: n2, ty: t2, initial: i2 },
            )
            | (
                Signal { name: n1, ty: t1, initial: i1 },
                Signal { name: n2, ty: t2, initial: i2 },
            ) => {
                n1 == n2
                    && self.decl_ty(*t1, *t2)
                    && (!o.check_initial_values || self.opt(*i1, *i2))
            }
            (
                Port { name: n1, direction: d1, ty: t1, initial: i1 },
                Port { name: n2, direction: d2, ty: t2, initial: i2 },
            ) => {
                n1 == n2
                    && (!o.check_directions || d1 == d2)
                    && self.decl_ty(*t1, *t2)
                    && (!o.check_initial_values || self.opt(*i1, *i2))
            }
            (
                Parameter { name: n1, direction: d1, ty: t1, default: f1 },
                Parameter { name: n2, direction: d2, ty: t2, default: f2 },
            ) => {
                n1 == n2
                    && (!o.check_directions || d1 == d2)
                    && self.decl_ty(*t1, *t2)
                    && self.opt(*f1, *f2)
            }
            (
                ValueTp { name: n1, ty: t1, default: f1 },
                ValueTp { name: n2, ty: t2, default: f2 },
            ) => n1 == n2 && self.decl_ty(*t1, *t2) && self.opt(*f1, *f2),
            (TypeTp { name: n1, default: f1 }, TypeTp { name: n2, default: f2 }) => {
                n1 == n2 && self.opt(*f1, *f2)
            }
            (
                Function { name: n1, return_ty: r1, templates: t1, parameters: p1, declarations: d1 },
                Function { name: n2, return_ty: r2, templates: t2, parameters: p2, declarations: d2 },
            ) => {
                n1 == n2
                    && self.opt(*r1, *r2)
                    && self.list(t1, t2)
                    && self.list(p1, p2)
                    && self.list(d1, d2)
            }
            (
                Procedure { name: n1, templates: t1, parameters: p1, declarations: d1 },
                Procedure { name: n2, templates: t2, parameters: p2, declarations: d2 },
            ) => n1 == n2 && self.list(t1, t2) && self.list(p1, p2) && self.list(d1, d2),
            (
                TypeDef { name: n1, opaque: o1, templates: tp1, ty: t1 },
                TypeDef { name: n2, opaque: o2, templates: tp2, ty: t2 },
            ) => n1 == n2 && o1 == o2 && self.list(tp1, tp2) && self.opt(*t1, *t2),
            (EnumValue { name: n1, value: v1 }, EnumValue { name: n2, value: v2 }) => {
                n1 == n2 && (!o.check_field_defaults || self.opt(*v1, *v2))
            }
            (
                LibraryDef { name: n1, standard: s1, libraries: l1, declarations: d1 },
                LibraryDef { name: n2, standard: s2, libraries: l2, declarations: d2 },
            ) => n1 == n2 && s1 == s2 && self.list(l1, l2) && self.list(d1, d2),
            (
                View { name: n1, templates: t1, ports: p1, libraries: l1, declarations: d1 },
                View { name: n2, templates: t2, ports: p2, libraries: l2, declarations: d2 },
            ) => {
                n1 == n2
                    && self.list(t1, t2)
                    && self.list(p1, p2)
                    && self.list(l1, l2)
                    && self.list(d1, d2)
            }
            (DesignUnit { name: n1, views: v1 }, DesignUnit { name: n2, views: v2 }) => {
                n1 == n2 && self.list(v1, v2)
            }
            (
                System { name: n1, libraries: l1, declarations: d1, units: u1 },
                System { name: n2, libraries: l2, declarations: d2, units: u2 },
            ) => n1 == n2 && self.list(l1, l2) && self.list(d1, d2) && self.list(u1, u2),

            (Identifier { name: n1, .. }, Identifier { name: n2, .. }) => n1 == n2,
            (
                FieldRef { name: n1, prefix: p1, .. },
                FieldRef { name: n2, prefix: p2, .. },
            ) => n1 == n2 && self.opt(*p1, *p2),
            (
                TypeRef { name: n1, instance: i1, templates: t1, .. },
                TypeRef { name: n2, instance: i2, templates: t2, .. },
            ) => {
                n1 == n2
                    && (!o.check_instances || self.opt(*i1, *i2))
                    && self.list(t1, t2)
            }
            (
                ViewRef { name: n1, unit: u1, templates: t1, .. },
                ViewRef { name: n2, unit: u2, templates: t2, .. },
            ) => n1 == n2 && u1 == u2 && self.list(t1, t2),
            (
                FunctionCall { name: n1, instance: i1, templates: t1, arguments: a1, .. },
                FunctionCall { name: n2, instance: i2, templates: t2, arguments: a2, .. },
            )
            | (
                ProcedureCall { name: n1, instance: i1, templates: t1, arguments: a1, .. },
                ProcedureCall { name: n2, instance: i2, templates: t2, arguments: a2, .. },
            ) => {
                n1 == n2
                    && (!o.check_instances || self.opt(*i1, *i2))
                    && self.list(t1, t2)
                    && self.list(a1, a2)
            }
            (
                Instance { name: n1, referenced: r1, port_assigns: p1, .. },
                Instance { name: n2, referenced: r2, port_assigns: p2, .. },
            ) => n1 == n2 && self.opt(*r1, *r2) && self.list(p1, p2),
            (
                Library { name: n1, standard: s1, .. },
                Library { name: n2, standard: s2, .. },
            ) => n1 == n2 && s1 == s2,

            (
                ParamAssign { name: n1, value: v1 },
                ParamAssign { name: n2, value: v2 },
            )
            | (
                PortAssign { name: n1, value: v1 },
                PortAssign { name: n2, value: v2 },
            )
            | (
                ValueTpAssign { name: n1, value: v1 },
                ValueTpAssign { name: n2, value: v2 },
            ) => n1 == n2 && self.opt(*v1, *v2),
            (TypeTpAssign { name: n1, ty: t1 }, TypeTpAssign { name: n2, ty: t2 }) => {
                n1 == n2 && self.opt(*t1, *t2)
            }

            (IntLit { value: v1 }, IntLit { value: v2 }) => v1 == v2,
            (RealLit { value: v1 }, RealLit { value: v2 }) => v1.to_bits() == v2.to_bits(),
            (BoolLit { value: v1 }, BoolLit { value: v2 }) => v1 == v2,
            (StringLit { value: v1 }, StringLit { value: v2 }) => v1 == v2,
            (Unary { op: o1, operand: e1 }, Unary { op: o2, operand: e2 }) => {
                o1 == o2 && self.opt(*e1, *e2)
            }
            (
                Binary { op: o1, lhs: l1, rhs: r1 },
                Binary { op: o2, lhs: l2, rhs: r2 },
            ) => o1 == o2 && self.opt(*l1, *l2) && self.opt(*r1, *r2),
            (
                Aggregate { elements: e1, others: x1 },
                Aggregate { elements: e2, others: x2 },
            ) => self.list(e1, e2) && self.opt(*x1, *x2),
            (
                Range { dir: d1, left: l1, right: r1 },
                Range { dir: d2, left: l2, right: r2 },
            ) => {
                (!o.check_span_direction || d1 == d2)
                    && self.opt(*l1, *l2)
                    && self.opt(*r1, *r2)
            }
            (Cast { ty: t1, value: v1 }, Cast { ty: t2, value: v2 }) => {
                self.opt(*t1, *t2) && self.opt(*v1, *v2)
            }

            (
                IntType { signed: s1, constexpr: c1, variant: va1, span: sp1 },
                IntType { signed: s2, constexpr: c2, variant: va2, span: sp2 },
            ) => {
                (!o.check_signed || s1 == s2)
                    && (!o.check_constexpr || c1 == c2)
                    && (!o.check_type_variant || va1 == va2)
                    && (!o.check_spans || self.opt(*sp1, *sp2))
            }
            (BoolType, BoolType) => true,
            (
                BitType { logic: l1, resolved: r1 },
                BitType { logic: l2, resolved: r2 },
            ) => (!o.check_logic || l1 == l2) && (!o.check_resolved || r1 == r2),
            (
                BitvectorType { signed: s1, logic: l1, resolved: r1, variant: va1, span: sp1 },
                BitvectorType { signed: s2, logic: l2, resolved: r2, variant: va2, span: sp2 },
            ) => {
                (!o.check_signed || s1 == s2)
                    && (!o.check_logic || l1 == l2)
                    && (!o.check_resolved || r1 == r2)
                    && (!o.check_type_variant || va1 == va2)
                    && (!o.check_spans || self.opt(*sp1, *sp2))
            }
            (
                ArrayType { span: sp1, element: e1 },
                ArrayType { span: sp2, element: e2 },
            ) => (!o.check_spans || self.opt(*sp1, *sp2)) && self.opt(*e1, *e2),
            (RecordType { fields: f1 }, RecordType { fields: f2 }) => self.list(f1, f2),
            (EnumType { values: v1 }, EnumType { values: v2 }) => self.list(v1, v2),
            (StringType { span: sp1 }, StringType { span: sp2 }) => {
                !o.check_string_spans || self.opt(*sp1, *sp2)
            }

            _ => false,
        }
    }

    fn decl_ty(&self, a: Option<NodeId>, b: Option<NodeId>) -> bool {
        !self.opts.check_declaration_types || self.opt(a, b)
    }

    fn opt(&self, a: Option<NodeId>, b: Option<NodeId>) -> bool {
        if !self.recurse {
            return true;
        }
        match (a, b) {
            (Some(a), Some(b)) => self.nodes(a, b),
            (None, None) => true,
            (None, Some(_)) => self.opts.allow_missing_left,
            (Some(_), None) => self.opts.allow_missing_right,
        }
    }

    fn list(&self, a: &[NodeId], b: &[NodeId]) -> bool {
        if !self.recurse {
            return true;
        }
        a.len() == b.len() && a.iter().zip(b).all(|(&a, &b)| self.nodes(a, b))
    }
}
