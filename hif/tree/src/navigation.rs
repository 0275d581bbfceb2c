//! Ancestor tests and scope search.
//!
//! All of these are plain parent-link walks: pure, bounded by tree depth,
//! and cache free.

use crate::node::{ListRole, NodeId, Tag};
use crate::Tree;

/// Which owned lists a scope must provide to satisfy a lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeNeeds {
    pub declarations: bool,
    pub libraries: bool,
    pub templates: bool,
}

impl ScopeNeeds {
    pub const DECLARATIONS: ScopeNeeds =
        ScopeNeeds { declarations: true, libraries: false, templates: false };
    pub const LIBRARIES: ScopeNeeds =
        ScopeNeeds { declarations: false, libraries: true, templates: false };
    pub const TEMPLATES: ScopeNeeds =
        ScopeNeeds { declarations: false, libraries: false, templates: true };
}

/// True iff `root` is reachable from `obj` by walking parent links.
/// `obj == root` counts only under `match_starting`.
pub fn is_sub_node(tree: &Tree, obj: NodeId, root: NodeId, match_starting: bool) -> bool {
    if obj == root {
        return match_starting;
    }
    let mut current = tree.parent(obj);
    while let Some(id) = current {
        if id == root {
            return true;
        }
        current = tree.parent(id);
    }
    false
}

/// Walks parent links until a node with the requested tag is found.
pub fn nearest_parent(tree: &Tree, obj: NodeId, tag: Tag, match_starting: bool) -> Option<NodeId> {
    let mut current = if match_starting { Some(obj) } else { tree.parent(obj) };
    while let Some(id) = current {
        if tree.kind(id).tag() == tag {
            return Some(id);
        }
        current = tree.parent(id);
    }
    None
}

/// Walks parent links to the first scope whose owned lists satisfy `needs`.
/// The search never starts at `obj` itself: a scope is not its own
/// enclosing scope.
pub fn nearest_scope(tree: &Tree, obj: NodeId, needs: ScopeNeeds) -> Option<NodeId> {
    let mut current = tree.parent(obj);
    while let Some(id) = current {
        let kind = tree.kind(id);
        if kind.is_scope() && satisfies(tree, id, needs) {
            return Some(id);
        }
        current = tree.parent(id);
    }
    None
}

fn satisfies(tree: &Tree, scope: NodeId, needs: ScopeNeeds) -> bool {
    let kind = tree.kind(scope);
    (!needs.declarations || kind.list(ListRole::Declarations).is_some())
        && (!needs.libraries || kind.list(ListRole::Libraries).is_some())
        && (!needs.templates || kind.list(ListRole::Templates).is_some())
}

/// True iff walking to the top parent reaches the distinguished system
/// root; detects orphaned subtrees.
pub fn is_in_tree(tree: &Tree, obj: NodeId) -> bool {
    let mut current = obj;
    loop {
        match tree.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    tree.kind(current).tag() == Tag::System && tree.root() == Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use crate::Name;

    fn sample() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let system = tree.alloc(NodeKind::System {
            name: Name::new("sys"),
            libraries: Vec::new(),
            declarations: Vec::new(),
            units: Vec::new(),
        });
        tree.set_root(system);
        let func = tree.alloc(NodeKind::Function {
            name: Name::new("f"),
            return_ty: None,
            templates: Vec::new(),
            parameters: Vec::new(),
            declarations: Vec::new(),
        });
        tree.push_child(system, ListRole::Declarations, func);
        let var = tree.alloc(NodeKind::Variable { name: Name::new("v"), ty: None, initial: None });
        tree.push_child(func, ListRole::Declarations, var);
        (tree, system, func, var)
    }

    #[test]
    fn sub_node_self_needs_match_starting() {
        let (tree, _, _, var) = sample();
        assert!(is_sub_node(&tree, var, var, true));
        assert!(!is_sub_node(&tree, var, var, false));
    }

    #[test]
    fn sub_node_ancestors() {
        let (tree, system, func, var) = sample();
        assert!(is_sub_node(&tree, var, func, false));
        assert!(is_sub_node(&tree, var, system, false));
        assert!(!is_sub_node(&tree, func, var, false));
    }

    #[test]
    fn nearest_scope_skips_non_matching() {
        let (tree, system, func, var) = sample();
        assert_eq!(nearest_scope(&tree, var, ScopeNeeds::DECLARATIONS), Some(func));
        // A function has no library list, so the search must climb on.
        assert_eq!(nearest_scope(&tree, var, ScopeNeeds::LIBRARIES), Some(system));
    }

    #[test]
    fn nearest_scope_never_matches_start() {
        let (tree, system, func, _) = sample();
        assert_eq!(nearest_scope(&tree, func, ScopeNeeds::DECLARATIONS), Some(system));
    }

    #[test]
    fn in_tree_detects_orphans() {
        let (mut tree, _, func, var) = sample();
        assert!(is_in_tree(&tree, var));
        tree.detach(func);
        assert!(!is_in_tree(&tree, var));
    }

    #[test]
    fn nearest_parent_by_tag() {
        let (tree, system, _, var) = sample();
        assert_eq!(nearest_parent(&tree, var, Tag::System, false), Some(system));
        assert_eq!(nearest_parent(&tree, var, Tag::Variable, false), None);
        assert_eq!(nearest_parent(&tree, var, Tag::Variable, true), Some(var));
    }
}
