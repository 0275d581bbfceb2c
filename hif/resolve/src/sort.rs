//! Argument sorting: matching actual assignments against formal
//! declarations.
//!
//! [`sort_parameters`] rewrites one assignment list of a call-like node so
//! that it pairs up with a formal parameter list positionally. Named
//! actuals take precedence over positional ones, gaps are filled from
//! defaults or deduced generic values depending on [`MissingPolicy`], and
//! surplus or unknown actuals are rejected.
//!
//! The whole match is planned before anything is written back: a failed
//! sort leaves the call site exactly as it was, which is what lets the
//! binder probe overload candidates with it.

use std::collections::VecDeque;
use std::fmt;

use hif_equiv::{equals, EquivOptions};
use hif_tree::{Field, ListRole, Name, NodeId, NodeKind, Tag, Tree};
use indexmap::IndexMap;
use log::trace;

use crate::deduce::deduce_generic;
use crate::semantics::LanguageSemantics;

type NameMap = IndexMap<Name, NodeId, ahash::RandomState>;

/// How aggressively gaps in the actual list are filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Leave missing formals without an assignment.
    #[default]
    None,
    /// Synthesize assignments only while needed to keep later actuals in
    /// position; trailing formals may stay unassigned.
    Limited,
    /// Synthesize an assignment for every formal.
    All,
}

#[derive(Debug, Clone, Default)]
pub struct SortOptions {
    pub missing: MissingPolicy,
    /// Stamp the formal's name onto positional actuals that had none.
    pub set_missing_names: bool,
    /// Comparison options used while deducing generic values.
    pub equiv: EquivOptions,
}

impl SortOptions {
    /// Fill every gap and name every actual. What the binder uses when
    /// normalizing a resolved call.
    pub fn complete() -> SortOptions {
        SortOptions { missing: MissingPolicy::All, set_missing_names: true, ..Default::default() }
    }
}

/// A sort that did not go through. The call site is unchanged; every
/// variant is recoverable by the caller (the binder treats them as "this
/// candidate does not match").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// A named actual matched no formal.
    UnknownName { name: Name, actual: NodeId },
    /// A named actual for a formal that was already assigned.
    DuplicateName { name: Name, actual: NodeId },
    /// More positional actuals than formals.
    TooManyActuals { first_extra: NodeId },
    /// No actual, no deducible value and no default for this formal.
    MissingActual { formal: NodeId, name: Name },
    /// The actual's evident type neither matches the formal's nor casts
    /// to it.
    Incompatible { formal: NodeId, actual: NodeId },
    /// Two occurrences of one generic deduced to different values.
    DeductionConflict { param: Name, first: NodeId, second: NodeId },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::UnknownName { name, .. } => {
                write!(f, "no parameter named '{name}'")
            }
            SortError::DuplicateName { name, .. } => {
                write!(f, "parameter '{name}' is assigned more than once")
            }
            SortError::TooManyActuals { .. } => write!(f, "too many arguments"),
            SortError::MissingActual { name, .. } => {
                write!(f, "no value for parameter '{name}'")
            }
            SortError::Incompatible { .. } => {
                write!(f, "argument type does not match the parameter")
            }
            SortError::DeductionConflict { param, .. } => {
                write!(f, "conflicting deductions for generic '{param}'")
            }
        }
    }
}

impl std::error::Error for SortError {}

/// One planned slot of the rewritten list.
struct Planned {
    assign: NodeId,
    /// Name to stamp onto the assignment on commit, when it has none yet.
    stamp: Option<Name>,
}

/// Sorts the `role` list of `owner` against `formals`.
///
/// `deduction` supplies (formal shape, actual shape) pairs that implicit
/// generic deduction may align; pass an empty slice when the call carries
/// no such context. On success the list holds one assignment per matched
/// formal, in formal order. On error the list is untouched.
pub fn sort_parameters(
    tree: &mut Tree,
    owner: NodeId,
    role: ListRole,
    formals: &[NodeId],
    deduction: &[(NodeId, NodeId)],
    sem: &dyn LanguageSemantics,
    opts: &SortOptions,
) -> Result<(), SortError> {
    let plan = build_plan(tree, owner, role, formals, deduction, sem, opts)?;

    // Commit. All original actuals are part of the plan, so taking the
    // list detaches exactly the nodes about to be pushed back.
    tree.take_list(owner, role);
    for Planned { assign, stamp } in plan {
        if let Some(name) = stamp {
            tree.kind_mut(assign).set_assign_name(name);
        }
        tree.push_child(owner, role, assign);
    }
    Ok(())
}

/// Plans the sort without rewriting the list. This is the candidate probe
/// the binder runs against each overload: it never touches the call site.
pub fn check_sortable(
    tree: &mut Tree,
    owner: NodeId,
    role: ListRole,
    formals: &[NodeId],
    sem: &dyn LanguageSemantics,
    opts: &SortOptions,
) -> Result<(), SortError> {
    build_plan(tree, owner, role, formals, &[], sem, opts).map(|_| ())
}

fn build_plan(
    tree: &mut Tree,
    owner: NodeId,
    role: ListRole,
    formals: &[NodeId],
    deduction: &[(NodeId, NodeId)],
    sem: &dyn LanguageSemantics,
    opts: &SortOptions,
) -> Result<Vec<Planned>, SortError> {
    let actuals: Vec<NodeId> =
        tree.kind(owner).list(role).expect("owner has no such list").to_vec();

    // Named actuals are claimed by name, the rest stay positional.
    let mut named = NameMap::default();
    let mut positional = VecDeque::new();
    for &actual in &actuals {
        debug_assert!(tree.kind(actual).is_assign(), "sorting a non-assignment node");
        match tree.kind(actual).assign_name() {
            Some(name) => {
                if named.insert(name.clone(), actual).is_some() {
                    return Err(SortError::DuplicateName { name: name.clone(), actual });
                }
            }
            None => positional.push_back(actual),
        }
    }

    let mut plan: Vec<Planned> = Vec::with_capacity(formals.len());
    // Values already settled, by formal name. Defaults of later formals
    // may refer back to these.
    let mut chosen: Vec<(Name, NodeId)> = Vec::new();

    for &formal in formals {
        let fname = tree.kind(formal).name().cloned().unwrap_or(Name::EMPTY);
        debug_assert!(!fname.is_empty(), "formal parameter without a name");

        if let Some(actual) = named.shift_remove(&fname) {
            if let Some(value) = payload(tree, actual) {
                check_compatible(tree, formal, actual, value, sem, opts)?;
                chosen.push((fname, value));
            }
            plan.push(Planned { assign: actual, stamp: None });
            continue;
        }
        if let Some(actual) = positional.pop_front() {
            let stamp = opts.set_missing_names.then(|| fname.clone());
            if let Some(value) = payload(tree, actual) {
                check_compatible(tree, formal, actual, value, sem, opts)?;
                chosen.push((fname, value));
            }
            plan.push(Planned { assign: actual, stamp });
            continue;
        }

        let synthesize = match opts.missing {
            MissingPolicy::None => false,
            MissingPolicy::Limited => !named.is_empty(),
            MissingPolicy::All => true,
        };
        if !synthesize {
            continue;
        }

        let value = missing_value(tree, formal, deduction, sem, opts, &chosen)?
            .ok_or_else(|| SortError::MissingActual { formal, name: fname.clone() })?;
        trace!("synthesized value for '{fname}'");

        let assign = fresh_assign(tree, formal, &fname, value);
        chosen.push((fname, value));
        plan.push(Planned { assign, stamp: None });
    }

    if let Some((name, &actual)) = named.first() {
        return Err(SortError::UnknownName { name: name.clone(), actual });
    }
    if let Some(&first_extra) = positional.front() {
        return Err(SortError::TooManyActuals { first_extra });
    }

    Ok(plan)
}

/// The value (or type) carried by an assignment. Open associations carry
/// none; they claim their formal without contributing a value.
fn payload(tree: &Tree, assign: NodeId) -> Option<NodeId> {
    let field =
        if tree.kind(assign).tag() == Tag::TypeTpAssign { Field::Type } else { Field::Value };
    tree.single(assign, field)
}

/// Rejects an actual whose type is written on its face and does not fit
/// the formal's declared type. Anything requiring real type inference is
/// waved through.
fn check_compatible(
    tree: &mut Tree,
    formal: NodeId,
    actual: NodeId,
    value: NodeId,
    sem: &dyn LanguageSemantics,
    opts: &SortOptions,
) -> Result<(), SortError> {
    let Some(want) = tree.kind(formal).single(Field::Type) else { return Ok(()) };
    let Some(got) = evident_type(tree, value, sem) else { return Ok(()) };
    if equals(tree, got, want, &opts.equiv) || sem.can_cast(tree, got, want) {
        return Ok(());
    }
    Err(SortError::Incompatible { formal, actual })
}

/// The type of a value expression when it is syntactically evident: a cast
/// states its target type, a resolved symbol has its declaration's, and a
/// binary operation combines the evident types of its operands.
fn evident_type(tree: &mut Tree, value: NodeId, sem: &dyn LanguageSemantics) -> Option<NodeId> {
    let kind = tree.kind(value);
    if let NodeKind::Cast { ty, .. } = kind {
        return *ty;
    }
    if let NodeKind::Binary { op, lhs, rhs } = kind {
        let (op, lhs, rhs) = (*op, (*lhs)?, (*rhs)?);
        let lhs_ty = evident_type(tree, lhs, sem)?;
        let rhs_ty = evident_type(tree, rhs, sem)?;
        return sem.infer_binary(tree, op, lhs_ty, rhs_ty);
    }
    if kind.is_symbol() {
        let decl = kind.binding()?;
        return tree.kind(decl).single(Field::Type);
    }
    None
}

/// Finds a value for a formal that got no actual: deduced from shape
/// context for generics, otherwise the formal's own default (with back
/// references to earlier parameters substituted), otherwise the type's
/// language default.
fn missing_value(
    tree: &mut Tree,
    formal: NodeId,
    deduction: &[(NodeId, NodeId)],
    sem: &dyn LanguageSemantics,
    opts: &SortOptions,
    chosen: &[(Name, NodeId)],
) -> Result<Option<NodeId>, SortError> {
    if tree.kind(formal).is_template_decl() {
        for &(formal_shape, actual_shape) in deduction {
            if let Some(value) =
                deduce_generic(tree, formal, formal_shape, actual_shape, &opts.equiv)?
            {
                return Ok(Some(value));
            }
        }
    }

    if let Some(default) = tree.kind(formal).single(Field::Default) {
        let copy = tree.deep_copy(default);
        return Ok(Some(substitute_back_references(tree, copy, chosen)));
    }

    if let Some(ty) = tree.kind(formal).single(Field::Type) {
        return Ok(sem.default_value(tree, ty));
    }
    Ok(None)
}

/// A copied default may name parameters declared before its own: replace
/// those symbols with copies of the values those parameters received.
/// Returns the (possibly new) root of the expression.
fn substitute_back_references(
    tree: &mut Tree,
    root: NodeId,
    chosen: &[(Name, NodeId)],
) -> NodeId {
    let mut new_root = root;
    for id in tree.collect_subtree(root) {
        let kind = tree.kind(id);
        if !kind.is_symbol() {
            continue;
        }
        let Some(name) = kind.name().cloned() else { continue };
        let Some(&(_, value)) = chosen.iter().find(|(n, _)| *n == name) else { continue };
        let replacement = tree.deep_copy(value);
        if id == new_root {
            new_root = replacement;
        }
        tree.replace(id, replacement);
    }
    new_root
}

/// Allocates the assignment node matching the formal's kind, already
/// named and owning `value`.
fn fresh_assign(tree: &mut Tree, formal: NodeId, name: &Name, value: NodeId) -> NodeId {
    let name = Some(name.clone());
    let (kind, field) = match tree.kind(formal).tag() {
        Tag::Port => (NodeKind::PortAssign { name, value: None }, Field::Value),
        Tag::ValueTp => (NodeKind::ValueTpAssign { name, value: None }, Field::Value),
        Tag::TypeTp => (NodeKind::TypeTpAssign { name, ty: None }, Field::Type),
        _ => (NodeKind::ParamAssign { name, value: None }, Field::Value),
    };
    let assign = tree.alloc(kind);
    tree.set_single(assign, field, Some(value));
    assign
}
