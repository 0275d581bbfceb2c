//! Semantic resolution over HIF trees.
//!
//! Two engines live here. The [`binder`] pairs symbol nodes with the
//! declarations they denote and maintains the per-symbol binding caches.
//! The [`sort`] module (with [`deduce`]) matches actual argument lists
//! against formal parameter lists, filling gaps from defaults and deduced
//! generic values. Both are parameterized by a
//! [`LanguageSemantics`](semantics::LanguageSemantics) implementation
//! that callers pass in explicitly.

pub mod binder;
pub mod deduce;
pub mod diagnostics;
pub mod semantics;
pub mod sort;

pub use binder::{
    bind, reset_declarations, resolve, update_declarations, ResolveError, ResolveOptions,
};
pub use deduce::deduce_generic;
pub use diagnostics::{BatchSink, ConsoleSink, Diagnostic, DiagnosticSink, Severity};
pub use semantics::{LanguageSemantics, StdSymbolAction};
pub use sort::{
    check_sortable, sort_parameters, MissingPolicy, SortError, SortOptions,
};
