//! Implicit deduction of generic arguments.
//!
//! When a call leaves a generic parameter unassigned, its value can often
//! be read off the call itself: the formal parameter types mention the
//! generic, the actual argument types are concrete, and walking both in
//! lock step aligns the generic's occurrences with concrete subtrees.

use hif_equiv::{equals, shallow_equals, EquivOptions};
use hif_tree::{NodeId, Slot, Tree};

use crate::sort::SortError;

/// Deduces a value for the generic parameter `param` by structurally
/// aligning `formal_shape` (which may mention the generic) with
/// `actual_shape` (which is concrete).
///
/// Returns a fresh, unowned copy of the aligned subtree, `Ok(None)` when
/// the shapes are incompatible or the generic does not occur in
/// `formal_shape`, and an error when two occurrences of the generic align
/// with subtrees that disagree.
pub fn deduce_generic(
    tree: &mut Tree,
    param: NodeId,
    formal_shape: NodeId,
    actual_shape: NodeId,
    opts: &EquivOptions,
) -> Result<Option<NodeId>, SortError> {
    let occurrences = occurrences_of(tree, param, formal_shape);
    if occurrences.is_empty() {
        return Ok(None);
    }

    let mut hits = Vec::new();
    if !align(tree, formal_shape, actual_shape, &occurrences, opts, &mut hits) {
        return Ok(None);
    }
    debug_assert!(!hits.is_empty(), "aligned shape without visiting any occurrence");

    // Every occurrence of the same generic must have aligned with the
    // same value; a disagreement is a real error in the call, not a
    // failed match.
    let first = hits[0];
    for &other in &hits[1..] {
        if !equals(tree, first, other, &EquivOptions::default()) {
            let name = tree.kind(param).name().cloned().unwrap_or(hif_tree::Name::EMPTY);
            return Err(SortError::DeductionConflict { param: name, first, second: other });
        }
    }

    Ok(Some(tree.deep_copy(first)))
}

/// Symbols inside `shape` that denote `param`: matching name and a cache
/// that is either unset or already points at the parameter.
fn occurrences_of(tree: &Tree, param: NodeId, shape: NodeId) -> Vec<NodeId> {
    let Some(pname) = tree.kind(param).name() else { return Vec::new() };
    let mut found = Vec::new();
    tree.walk(shape, &mut |id| {
        let kind = tree.kind(id);
        if kind.is_symbol()
            && kind.name() == Some(pname)
            && kind.binding().map_or(true, |b| b == param)
        {
            found.push(id);
        }
    });
    found
}

/// Lock-step walk of two subtrees. An occurrence of the generic on the
/// formal side matches any actual subtree and records it; every other
/// node must agree attribute-wise ([`shallow_equals`]) and slot-wise.
fn align(
    tree: &Tree,
    formal: NodeId,
    actual: NodeId,
    occurrences: &[NodeId],
    opts: &EquivOptions,
    hits: &mut Vec<NodeId>,
) -> bool {
    if occurrences.contains(&formal) {
        hits.push(actual);
        return true;
    }
    if !shallow_equals(tree, formal, actual, opts) {
        return false;
    }
    let fk = tree.kind(formal);
    let ak = tree.kind(actual);
    let fslots = fk.slots();
    let aslots = ak.slots();
    debug_assert_eq!(fslots.len(), aslots.len(), "equal kinds with differing slot layouts");
    for (fs, as_) in fslots.iter().zip(aslots.iter()) {
        match (fs, as_) {
            (Slot::Single(f), Slot::Single(a)) => match (f, a) {
                (None, None) => {}
                (Some(f), Some(a)) => {
                    if !align(tree, *f, *a, occurrences, opts, hits) {
                        return false;
                    }
                }
                _ => return false,
            },
            (Slot::List(f), Slot::List(a)) => {
                if f.len() != a.len() {
                    return false;
                }
                for (&f, &a) in f.iter().zip(a.iter()) {
                    if !align(tree, f, a, occurrences, opts, hits) {
                        return false;
                    }
                }
            }
            _ => return false,
        }
    }
    true
}
