//! Tree storage and structural mutation.
//!
//! All nodes of one description live in a single arena. Handles stay valid
//! for the lifetime of the tree; a detached subtree simply becomes
//! unreachable from the root and is never observed again by a traversal
//! started afterwards. Ownership is a structural invariant maintained by
//! the mutation API: a node is referenced by exactly one parent slot, and
//! every operation that moves a node updates the parent back link of the
//! outgoing and the incoming subtree root together.

use std::ops::{Index, IndexMut};

use arena::{Arena, ArenaMap, IdxRange};

use crate::node::{Field, ListRole, Node, NodeId, NodeKind, SlotMut};
use crate::{SourceMap, Span};

#[derive(Debug, Default)]
pub struct Tree {
    nodes: Arena<Node>,
    root: Option<NodeId>,
    pub sources: SourceMap,
}

impl Index<NodeId> for Tree {
    type Output = Node;
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }
}

impl Tree {
    pub fn new() -> Tree {
        Tree::default()
    }

    pub fn with_capacity(capacity: usize) -> Tree {
        Tree { nodes: Arena::with_capacity(capacity), root: None, sources: SourceMap::default() }
    }

    /// Allocates a fresh, unowned node.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push_and_get_key(Node { kind, parent: None, span: None })
    }

    pub fn alloc_at(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.nodes.push_and_get_key(Node { kind, parent: None, span: Some(span) })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Marks `root` as the distinguished system root. The node must be
    /// unowned.
    pub fn set_root(&mut self, root: NodeId) {
        debug_assert!(self.nodes[root].parent.is_none());
        self.root = Some(root);
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    /// Mutable access to a node's attributes. Child slots must not be
    /// edited through this handle; use the structural operations instead.
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.nodes[id].span
    }

    /// The covering span of the subtree rooted at `id`. Synthesized inner
    /// nodes often carry no span of their own while their leaves still do.
    pub fn covering_span(&self, id: NodeId) -> Option<Span> {
        let mut acc: Option<Span> = None;
        self.walk(id, &mut |it| {
            if let Some(span) = self.nodes[it].span {
                acc = Some(match acc {
                    Some(prev) => prev.cover(span),
                    None => span,
                });
            }
        });
        acc
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id].kind.children()
    }

    /// Appends `child` to the `role` list of `parent`, transferring
    /// ownership to the list. The child must be unowned.
    ///
    /// # Panics
    /// Panics when `parent` has no list with that role.
    pub fn push_child(&mut self, parent: NodeId, role: ListRole, child: NodeId) {
        self.insert_child(parent, role, usize::MAX, child)
    }

    /// Inserts `child` at `index` (clamped to the list length).
    pub fn insert_child(&mut self, parent: NodeId, role: ListRole, index: usize, child: NodeId) {
        debug_assert!(self.nodes[child].parent.is_none(), "inserting an owned node");
        let list = self.nodes[parent]
            .kind
            .list_mut(role)
            .unwrap_or_else(|| panic!("node has no {role:?} list"));
        let index = index.min(list.len());
        list.insert(index, child);
        self.nodes[child].parent = Some(parent);
    }

    /// Removes the child at `index` from the `role` list, transferring
    /// ownership back to the caller.
    pub fn remove_child(&mut self, parent: NodeId, role: ListRole, index: usize) -> NodeId {
        let list = self.nodes[parent]
            .kind
            .list_mut(role)
            .unwrap_or_else(|| panic!("node has no {role:?} list"));
        let child = list.remove(index);
        self.nodes[child].parent = None;
        child
    }

    /// Empties the `role` list of `parent`, transferring ownership of every
    /// element back to the caller in order.
    pub fn take_list(&mut self, parent: NodeId, role: ListRole) -> Vec<NodeId> {
        let list = self.nodes[parent]
            .kind
            .list_mut(role)
            .unwrap_or_else(|| panic!("node has no {role:?} list"));
        let taken = std::mem::take(list);
        for &child in &taken {
            self.nodes[child].parent = None;
        }
        taken
    }

    /// Moves every element of one list onto the end of another, preserving
    /// order. The lists must have compatible content; this is not checked.
    pub fn transplant_list(
        &mut self,
        from: NodeId,
        from_role: ListRole,
        to: NodeId,
        to_role: ListRole,
    ) {
        let moved = self.take_list(from, from_role);
        for child in moved {
            self.push_child(to, to_role, child);
        }
    }

    /// Reads a single-child slot.
    pub fn single(&self, parent: NodeId, field: Field) -> Option<NodeId> {
        self.nodes[parent].kind.single(field)
    }

    /// Writes a single-child slot, returning the previous occupant
    /// (detached) if any. `child` must be unowned.
    ///
    /// # Panics
    /// Panics when `parent` has no such slot.
    pub fn set_single(&mut self, parent: NodeId, field: Field, child: Option<NodeId>) -> Option<NodeId> {
        if let Some(child) = child {
            debug_assert!(self.nodes[child].parent.is_none(), "inserting an owned node");
        }
        let slot = self.nodes[parent]
            .kind
            .single_mut(field)
            .unwrap_or_else(|| panic!("node has no {field:?} slot"));
        let old = std::mem::replace(slot, child);
        if let Some(old) = old {
            self.nodes[old].parent = None;
        }
        if let Some(child) = child {
            self.nodes[child].parent = Some(parent);
        }
        old
    }

    /// Detaches `id` from its parent slot. Ownership of the subtree passes
    /// to the caller, who must reattach or forget it. A no-op on unowned
    /// nodes.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id].parent else { return };
        let found = self.erase_from_parent(parent, id);
        debug_assert!(found, "parent link without a matching child slot");
        self.nodes[id].parent = None;
    }

    /// Replaces `old` with `new` in-place: `new` takes over `old`'s slot in
    /// the parent, `old` is detached and returned to the caller. Replacing
    /// the root re-roots the tree. `new` must be unowned.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        debug_assert!(self.nodes[new].parent.is_none(), "replacement is still owned");
        match self.nodes[old].parent {
            Some(parent) => {
                let mut found = false;
                for slot in self.nodes[parent].kind.slots_mut() {
                    match slot {
                        SlotMut::Single(s) => {
                            if *s == Some(old) {
                                *s = Some(new);
                                found = true;
                                break;
                            }
                        }
                        SlotMut::List(list) => {
                            if let Some(pos) = list.iter().position(|&it| it == old) {
                                list[pos] = new;
                                found = true;
                                break;
                            }
                        }
                    }
                }
                debug_assert!(found, "parent link without a matching child slot");
                self.nodes[old].parent = None;
                self.nodes[new].parent = Some(parent);
            }
            None => {
                if self.root == Some(old) {
                    self.root = Some(new);
                }
            }
        }
    }

    fn erase_from_parent(&mut self, parent: NodeId, child: NodeId) -> bool {
        for slot in self.nodes[parent].kind.slots_mut() {
            match slot {
                SlotMut::Single(s) => {
                    if *s == Some(child) {
                        *s = None;
                        return true;
                    }
                }
                SlotMut::List(list) => {
                    if let Some(pos) = list.iter().position(|&it| it == child) {
                        list.remove(pos);
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Clones the subtree rooted at `id` into fresh nodes; the copy is
    /// unowned. Symbol caches that point inside the copied subtree are
    /// remapped to the copies; caches that point outside are carried over
    /// unchanged (they stay valid weak references).
    pub fn deep_copy(&mut self, id: NodeId) -> NodeId {
        let first = self.nodes.next_key();
        let mut mapping = ArenaMap::default();
        let copy = self.copy_rec(id, &mut mapping);
        // Second pass: remap bindings captured by the copy. The copies
        // form one dense block at the end of the arena.
        for new in IdxRange::new(first..self.nodes.next_key()) {
            if let Some(bound) = self.nodes[new].kind.binding() {
                if let Some(&remapped) = mapping.get(bound) {
                    self.nodes[new].kind.set_binding(Some(remapped));
                }
            }
        }
        copy
    }

    fn copy_rec(&mut self, id: NodeId, mapping: &mut ArenaMap<NodeId, NodeId>) -> NodeId {
        let node = self.nodes[id].clone();
        let new = self.nodes.push_and_get_key(Node { kind: node.kind, parent: None, span: node.span });
        mapping.insert(id, new);
        // Rewire the copied child handles to fresh subtrees.
        let old_children: Vec<_> = self.nodes[new].kind.children();
        let mut fresh = Vec::with_capacity(old_children.len());
        for child in old_children {
            fresh.push(self.copy_rec(child, mapping));
        }
        let mut next = fresh.into_iter();
        for slot in self.nodes[new].kind.slots_mut() {
            match slot {
                SlotMut::Single(s) => {
                    if s.is_some() {
                        *s = Some(next.next().unwrap());
                    }
                }
                SlotMut::List(list) => {
                    for it in list.iter_mut() {
                        *it = next.next().unwrap();
                    }
                }
            }
        }
        debug_assert!(next.next().is_none());
        let children: Vec<_> = self.nodes[new].kind.children();
        for child in children {
            self.nodes[child].parent = Some(new);
        }
        new
    }

    /// Preorder walk over the subtree rooted at `id`.
    pub fn walk(&self, id: NodeId, f: &mut impl FnMut(NodeId)) {
        f(id);
        for child in self.nodes[id].kind.children() {
            self.walk(child, f);
        }
    }

    /// Collects the subtree rooted at `id` in preorder. Useful when the
    /// visit is going to mutate: the node set is fixed up front, so freshly
    /// allocated nodes are never observed by the same pass.
    pub fn collect_subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut res = Vec::new();
        self.walk(id, &mut |it| res.push(it));
        res
    }
}
