//! Language-specific knowledge the resolution passes delegate to.
//!
//! The binder and the argument sorter are language agnostic: everything
//! that depends on the source language (VHDL vs. Verilog flavored trees)
//! is asked through [`LanguageSemantics`]. Callers pass an implementation
//! explicitly to every entry point; there is no process-wide default.

use hif_tree::{BinaryOp, Name, NodeId, Tree};

/// What to do with a symbol that names an entity of the standard library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdSymbolAction {
    /// Resolve through the ordinary scope walk.
    Keep,
    /// Rebind to a (library, name) pair of the target standard library.
    Replace {
        library: Name,
        name: Name,
        /// When false the mapped symbol is opaque: it is rebound by name
        /// only and no declaration is required to exist.
        keep_declaration: bool,
    },
    /// The symbol has no counterpart; resolution must fail.
    Unsupported,
}

pub trait LanguageSemantics {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Result type of `lhs op rhs`, as a freshly allocated type node, or
    /// `None` when the operation is not defined on these operand types.
    fn infer_binary(
        &self,
        tree: &mut Tree,
        op: BinaryOp,
        lhs_ty: NodeId,
        rhs_ty: NodeId,
    ) -> Option<NodeId>;

    /// Freshly allocated default value for `ty`, when the language defines
    /// one (e.g. the leftmost enumeration literal).
    fn default_value(&self, tree: &mut Tree, ty: NodeId) -> Option<NodeId>;

    /// Whether a value of type `from` may be cast to `to`.
    fn can_cast(&self, tree: &Tree, from: NodeId, to: NodeId) -> bool;

    /// Maps a symbol occurring in source onto the standard library of the
    /// target language. `library` is the prefix the symbol was written
    /// under, when any.
    fn map_standard_symbol(&self, library: Option<&Name>, name: &Name) -> StdSymbolAction {
        let _ = (library, name);
        StdSymbolAction::Keep
    }

    /// Library definitions searched after every user scope has been tried.
    /// Typically roots of preloaded standard packages.
    fn standard_scopes(&self) -> &[NodeId] {
        &[]
    }
}
