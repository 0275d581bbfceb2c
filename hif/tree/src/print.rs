//! Compact textual rendering of subtrees, for tests and diagnostics.

use stdx::format_to;

use crate::node::{NodeId, NodeKind};
use crate::Tree;

/// Renders the subtree rooted at `id` on a single line.
pub fn dump(tree: &Tree, id: NodeId) -> String {
    let mut buf = String::new();
    dump_rec(tree, id, &mut buf);
    buf
}

/// Renders a list of siblings separated by commas.
pub fn dump_list(tree: &Tree, ids: &[NodeId]) -> String {
    let mut buf = String::new();
    for (i, &id) in ids.iter().enumerate() {
        if i != 0 {
            buf.push_str(", ");
        }
        dump_rec(tree, id, &mut buf);
    }
    buf
}

fn dump_rec(tree: &Tree, id: NodeId, buf: &mut String) {
    let kind = tree.kind(id);
    match kind {
        NodeKind::IntLit { value } => format_to!(buf, "{value}"),
        NodeKind::RealLit { value } => format_to!(buf, "{value:?}"),
        NodeKind::BoolLit { value } => format_to!(buf, "{value}"),
        NodeKind::StringLit { value } => format_to!(buf, "{value:?}"),
        NodeKind::Identifier { name, .. } => format_to!(buf, "{name}"),
        NodeKind::FieldRef { name, prefix, .. } => {
            if let Some(prefix) = prefix {
                dump_rec(tree, *prefix, buf);
                buf.push('.');
            }
            format_to!(buf, "{name}");
        }
        NodeKind::Binary { op, lhs, rhs } => {
            buf.push('(');
            dump_opt(tree, *lhs, buf);
            format_to!(buf, " {op:?} ");
            dump_opt(tree, *rhs, buf);
            buf.push(')');
        }
        NodeKind::Unary { op, operand } => {
            format_to!(buf, "({op:?} ");
            dump_opt(tree, *operand, buf);
            buf.push(')');
        }
        NodeKind::ParamAssign { name, value }
        | NodeKind::PortAssign { name, value }
        | NodeKind::ValueTpAssign { name, value } => {
            format_to!(buf, "{}", kind.kind_name());
            if let Some(name) = name {
                format_to!(buf, " {name} =");
            }
            buf.push(' ');
            dump_opt(tree, *value, buf);
        }
        NodeKind::TypeTpAssign { name, ty } => {
            buf.push_str("type_tp_assign");
            if let Some(name) = name {
                format_to!(buf, " {name} =");
            }
            buf.push(' ');
            dump_opt(tree, *ty, buf);
        }
        _ => {
            format_to!(buf, "{}", kind.kind_name());
            if let Some(name) = kind.name() {
                format_to!(buf, " {name}");
            }
            let children = kind.children();
            if !children.is_empty() {
                buf.push('(');
                for (i, child) in children.into_iter().enumerate() {
                    if i != 0 {
                        buf.push_str(", ");
                    }
                    dump_rec(tree, child, buf);
                }
                buf.push(')');
            }
        }
    }
}

fn dump_opt(tree: &Tree, id: Option<NodeId>, buf: &mut String) {
    match id {
        Some(id) => dump_rec(tree, id, buf),
        None => buf.push('_'),
    }
}
