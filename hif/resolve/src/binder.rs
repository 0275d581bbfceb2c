//! Name resolution: pairing symbols with the declarations they denote.
//!
//! Every symbol node carries a weak, lazily populated binding cache. The
//! binder fills that cache on demand by walking enclosing scopes outward,
//! then imported libraries, then the system's library definitions, then
//! whatever standard packages the language semantics provide. Re-running
//! resolution on an unchanged tree is idempotent: [`reset_declarations`]
//! followed by [`update_declarations`] reproduces the same bindings.

use std::fmt;

use hif_tree::navigation::{is_sub_node, nearest_scope, ScopeNeeds};
use hif_tree::{Field, ListRole, Name, NodeId, NodeKind, Tag, Tree};
use log::trace;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::semantics::{LanguageSemantics, StdSymbolAction};
use crate::sort::{check_sortable, SortOptions};

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Ignore the cached binding and search again.
    pub force_refresh: bool,
    /// Re-resolve, but accept the fresh result only when it lies inside
    /// this subtree; otherwise the previous cache is restored.
    pub only_visible: Option<NodeId>,
    /// Report an absent declaration as `Ok(None)` instead of an error.
    pub allow_missing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    Unresolved { symbol: NodeId, name: Name, semantics: &'static str },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Unresolved { name, semantics, .. } => {
                write!(f, "cannot resolve '{name}' ({semantics} semantics)")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Overwrites the binding cache of `symbol` directly, bypassing the
/// search. The caller vouches that `decl` is the right declaration.
pub fn bind(tree: &mut Tree, symbol: NodeId, decl: Option<NodeId>) {
    let ok = tree.kind_mut(symbol).set_binding(decl);
    debug_assert!(ok, "binding a non-symbol node");
}

/// Resolves `symbol` to its declaration, caching the result.
///
/// A warm cache is returned as is unless `force_refresh` or
/// `only_visible` asks for a fresh search. A symbol that stays unresolved
/// is `Ok(None)` under `allow_missing` and an error otherwise; the error
/// never leaves a stale cache behind.
pub fn resolve(
    tree: &mut Tree,
    symbol: NodeId,
    sem: &dyn LanguageSemantics,
    opts: &ResolveOptions,
) -> Result<Option<NodeId>, ResolveError> {
    debug_assert!(tree.kind(symbol).is_symbol(), "resolving a non-symbol node");
    let previous = tree.kind(symbol).binding();
    if previous.is_some() && !opts.force_refresh && opts.only_visible.is_none() {
        return Ok(previous);
    }
    if opts.only_visible.is_some() {
        bind(tree, symbol, None);
    }

    let name = tree.kind(symbol).name().cloned().unwrap_or(Name::EMPTY);

    let found = match sem.map_standard_symbol(None, &name) {
        StdSymbolAction::Keep => search(tree, symbol, &name, sem),
        StdSymbolAction::Unsupported => None,
        StdSymbolAction::Replace { library, name: target, keep_declaration } => {
            let decl = find_library_def(tree, sem, &library)
                .and_then(|lib| first_in_scope(tree, lib, &target, &names_anything));
            if decl.is_none() && !keep_declaration {
                // Opaque mapping: the symbol stays unbound by design and
                // that is not a failure.
                trace!("'{name}' mapped onto opaque standard symbol");
                return Ok(None);
            }
            decl
        }
    };

    match found {
        Some(decl) => {
            if let Some(root) = opts.only_visible {
                if !is_sub_node(tree, decl, root, true) {
                    trace!("'{name}' resolved outside the visible root, keeping old binding");
                    bind(tree, symbol, previous);
                    return Ok(previous);
                }
            }
            trace!("'{name}' resolved");
            bind(tree, symbol, Some(decl));
            Ok(Some(decl))
        }
        None => {
            if opts.only_visible.is_some() && previous.is_some() {
                trace!("'{name}' not found under the visible root, keeping old binding");
                bind(tree, symbol, previous);
                return Ok(previous);
            }
            if opts.force_refresh {
                bind(tree, symbol, None);
            }
            if opts.allow_missing {
                Ok(None)
            } else {
                Err(ResolveError::Unresolved { symbol, name, semantics: sem.name() })
            }
        }
    }
}

/// Clears every binding cache in the subtree rooted at `root`. Run this
/// after structural edits that may have changed what names denote.
pub fn reset_declarations(tree: &mut Tree, root: NodeId) {
    for id in tree.collect_subtree(root) {
        if tree.kind(id).is_symbol() {
            bind(tree, id, None);
        }
    }
}

/// Resolves every symbol in the subtree rooted at `root`, reporting
/// per-symbol problems to `sink`. Library imports are allowed to stay
/// unresolved (they may name opaque external headers); everything else
/// must resolve. Returns the first failure after the whole subtree has
/// been visited.
pub fn update_declarations(
    tree: &mut Tree,
    root: NodeId,
    sem: &dyn LanguageSemantics,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), ResolveError> {
    let mut failed = None;
    for id in tree.collect_subtree(root) {
        if !tree.kind(id).is_symbol() {
            continue;
        }
        let allow_missing = tree.kind(id).tag() == Tag::Library;
        let opts = ResolveOptions { allow_missing, ..ResolveOptions::default() };
        match resolve(tree, id, sem, &opts) {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Some(name) = tree.kind(id).name() {
                    let msg = format!("library '{name}' stays external");
                    sink.report(tree, Diagnostic::warning(msg, Some(id)));
                }
            }
            Err(err) => {
                sink.report(tree, Diagnostic::error(err.to_string(), Some(id)));
                failed.get_or_insert(err);
            }
        }
    }
    match failed {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn search(tree: &mut Tree, symbol: NodeId, name: &Name, sem: &dyn LanguageSemantics) -> Option<NodeId> {
    match tree.kind(symbol).tag() {
        Tag::Identifier => first_match(tree, symbol, name, sem, &names_value),
        Tag::TypeRef => first_match(tree, symbol, name, sem, &names_type),
        Tag::FieldRef => resolve_field_ref(tree, symbol, name, sem),
        Tag::FunctionCall => resolve_call(tree, symbol, name, sem, Tag::Function),
        Tag::ProcedureCall => resolve_call(tree, symbol, name, sem, Tag::Procedure),
        Tag::ViewRef => resolve_view_ref(tree, symbol, name),
        Tag::Instance => resolve_instance(tree, symbol, sem),
        Tag::Library => find_library_def(tree, sem, name),
        _ => None,
    }
}

/// Declarations an identifier may denote.
fn names_value(kind: &NodeKind) -> bool {
    matches!(
        kind.tag(),
        Tag::Const
            | Tag::Variable
            | Tag::Signal
            | Tag::Port
            | Tag::Parameter
            | Tag::ValueTp
            | Tag::EnumValue
    )
}

fn names_type(kind: &NodeKind) -> bool {
    matches!(kind.tag(), Tag::TypeDef | Tag::TypeTp)
}

fn names_anything(kind: &NodeKind) -> bool {
    kind.is_declaration()
}

/// The outward search: enclosing scopes first, then the libraries those
/// scopes import, then the system's own library definitions, then the
/// standard packages of the semantics.
fn first_match(
    tree: &Tree,
    from: NodeId,
    name: &Name,
    sem: &dyn LanguageSemantics,
    pred: &dyn Fn(&NodeKind) -> bool,
) -> Option<NodeId> {
    let mut matches = Vec::new();
    all_matches(tree, from, name, sem, pred, &mut matches);
    matches.first().copied()
}

fn all_matches(
    tree: &Tree,
    from: NodeId,
    name: &Name,
    sem: &dyn LanguageSemantics,
    pred: &dyn Fn(&NodeKind) -> bool,
    out: &mut Vec<NodeId>,
) {
    let mut imports = Vec::new();
    let mut at = from;
    while let Some(scope) = nearest_scope(tree, at, ScopeNeeds::default()) {
        scope_matches(tree, scope, name, pred, out);
        if let Some(libs) = tree.kind(scope).list(ListRole::Libraries) {
            imports.extend(libs.iter().copied().filter(|&l| tree.kind(l).tag() == Tag::Library));
        }
        at = scope;
    }

    for import in imports {
        let target = match tree.kind(import).binding() {
            Some(lib) => Some(lib),
            None => tree
                .kind(import)
                .name()
                .and_then(|lib_name| find_library_def(tree, sem, lib_name)),
        };
        if let Some(lib) = target {
            scope_matches(tree, lib, name, pred, out);
        }
    }

    if let Some(root) = tree.root() {
        if let Some(libs) = tree.kind(root).list(ListRole::Libraries) {
            for &lib in libs {
                if tree.kind(lib).tag() == Tag::LibraryDef {
                    scope_matches(tree, lib, name, pred, out);
                }
            }
        }
    }

    for &lib in sem.standard_scopes() {
        scope_matches(tree, lib, name, pred, out);
    }
}

/// Matches within one scope, innermost declaration categories first:
/// generic parameters, then ordinary parameters and ports, then the
/// declaration list. Enumeration literals declared by a type definition
/// are visible alongside it.
fn scope_matches(
    tree: &Tree,
    scope: NodeId,
    name: &Name,
    pred: &dyn Fn(&NodeKind) -> bool,
    out: &mut Vec<NodeId>,
) {
    let kind = tree.kind(scope);
    let lists =
        [ListRole::Templates, ListRole::Parameters, ListRole::Ports, ListRole::Declarations];
    for role in lists {
        let Some(decls) = kind.list(role) else { continue };
        for &decl in decls {
            let dk = tree.kind(decl);
            if pred(dk) && dk.name() == Some(name) {
                out.push(decl);
            }
            if dk.tag() == Tag::TypeDef {
                if let Some(ty) = dk.single(Field::Type) {
                    if let NodeKind::EnumType { values } = tree.kind(ty) {
                        for &value in values {
                            let vk = tree.kind(value);
                            if pred(vk) && vk.name() == Some(name) {
                                out.push(value);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn first_in_scope(
    tree: &Tree,
    scope: NodeId,
    name: &Name,
    pred: &dyn Fn(&NodeKind) -> bool,
) -> Option<NodeId> {
    let mut out = Vec::new();
    scope_matches(tree, scope, name, pred, &mut out);
    out.first().copied()
}

/// A library definition with the given name: among the system's library
/// list first, then among the standard packages.
fn find_library_def(tree: &Tree, sem: &dyn LanguageSemantics, name: &Name) -> Option<NodeId> {
    if let Some(root) = tree.root() {
        if let Some(libs) = tree.kind(root).list(ListRole::Libraries) {
            for &lib in libs {
                let lk = tree.kind(lib);
                if lk.tag() == Tag::LibraryDef && lk.name() == Some(name) {
                    return Some(lib);
                }
            }
        }
    }
    sem.standard_scopes()
        .iter()
        .copied()
        .find(|&lib| tree.kind(lib).name() == Some(name))
}

/// A field reference resolves through its prefix: resolve the prefix,
/// chase its declared type down to a record, and look the field up there.
fn resolve_field_ref(
    tree: &mut Tree,
    symbol: NodeId,
    name: &Name,
    sem: &dyn LanguageSemantics,
) -> Option<NodeId> {
    let prefix = tree.kind(symbol).single(Field::Prefix)?;
    let opts = ResolveOptions { allow_missing: true, ..ResolveOptions::default() };
    let prefix_decl = resolve(tree, prefix, sem, &opts).ok().flatten()?;
    let declared_ty = tree.kind(prefix_decl).single(Field::Type)?;
    let record = canonical_type(tree, declared_ty, sem)?;
    let NodeKind::RecordType { fields } = tree.kind(record) else { return None };
    fields
        .clone()
        .into_iter()
        .find(|&field| tree.kind(field).name() == Some(name))
}

/// Chases named type indirections (`TypeRef` to `TypeDef`) down to the
/// underlying structural type.
fn canonical_type(tree: &mut Tree, ty: NodeId, sem: &dyn LanguageSemantics) -> Option<NodeId> {
    let mut current = ty;
    loop {
        match tree.kind(current).tag() {
            Tag::TypeRef => {
                let opts = ResolveOptions { allow_missing: true, ..ResolveOptions::default() };
                current = resolve(tree, current, sem, &opts).ok().flatten()?;
            }
            Tag::TypeDef => current = tree.kind(current).single(Field::Type)?,
            _ => return Some(current),
        }
    }
}

/// Calls resolve against the first declaration whose formal list the
/// call's arguments can be sorted onto. Probing a candidate never rewrites
/// the call, so trying and rejecting overloads is free of side effects.
fn resolve_call(
    tree: &mut Tree,
    symbol: NodeId,
    name: &Name,
    sem: &dyn LanguageSemantics,
    decl_tag: Tag,
) -> Option<NodeId> {
    let mut candidates = Vec::new();
    all_matches(tree, symbol, name, sem, &|k| k.tag() == decl_tag, &mut candidates);
    let probe_opts = SortOptions::complete();
    candidates.into_iter().find(|&candidate| {
        let formals: Vec<NodeId> =
            tree.kind(candidate).list(ListRole::Parameters).map(<[_]>::to_vec).unwrap_or_default();
        check_sortable(tree, symbol, ListRole::Arguments, &formals, sem, &probe_opts).is_ok()
    })
}

/// A view reference names a view of a design unit under the system root.
/// When the reference carries a unit name only that unit is searched.
fn resolve_view_ref(tree: &mut Tree, symbol: NodeId, name: &Name) -> Option<NodeId> {
    let unit_filter = match tree.kind(symbol) {
        NodeKind::ViewRef { unit, .. } => unit.clone(),
        _ => None,
    };
    let root = tree.root()?;
    let units = tree.kind(root).list(ListRole::Units)?;
    for &unit in units {
        let uk = tree.kind(unit);
        if let Some(filter) = &unit_filter {
            if uk.name() != Some(filter) {
                continue;
            }
        }
        let Some(views) = uk.list(ListRole::Views) else { continue };
        for &view in views {
            if tree.kind(view).name() == Some(name) {
                return Some(view);
            }
        }
    }
    None
}

/// An instance resolves through the view reference it carries.
fn resolve_instance(tree: &mut Tree, symbol: NodeId, sem: &dyn LanguageSemantics) -> Option<NodeId> {
    let viewref = tree.kind(symbol).single(Field::Referenced)?;
    let opts = ResolveOptions { allow_missing: true, ..ResolveOptions::default() };
    resolve(tree, viewref, sem, &opts).ok().flatten()
}
