//! Comparison options.

/// Independent toggles steering what [`equals`](crate::equals) considers
/// relevant. The default compares full structure but ignores metadata
/// (source positions) and never consults declaration caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivOptions {
    /// Compare only the runtime variant of the two nodes, nothing else.
    pub kind_only: bool,
    /// Compare only variants and names; skip attributes and children.
    pub names_only: bool,
    /// Two symbols whose caches hold the same declaration are equal
    /// without descending into their subtrees. Assumes the caches are
    /// consistent.
    pub use_bindings: bool,
    /// Two symbols whose caches hold *different* declarations are unequal
    /// even when their names agree.
    pub strict_bindings: bool,

    /// Compare the numeric span child of int/bitvector/array types.
    pub check_spans: bool,
    /// Compare the direction of range nodes (`upto` vs `downto`).
    pub check_span_direction: bool,
    /// Compare the span child of string types.
    pub check_string_spans: bool,
    /// Compare the signed flag of scalar types.
    pub check_signed: bool,
    /// Compare the logic flag of bit/bitvector types.
    pub check_logic: bool,
    /// Compare the resolved flag of bit/bitvector types.
    pub check_resolved: bool,
    /// Compare the constexpr flag of int types.
    pub check_constexpr: bool,
    /// Compare the native/bounded variant of scalar types.
    pub check_type_variant: bool,

    /// Compare the declared type child of declarations.
    pub check_declaration_types: bool,
    /// Compare initial-value children of variables, signals and ports.
    pub check_initial_values: bool,
    /// Compare the value children of constants and enum values.
    pub check_field_defaults: bool,
    /// Compare the library-instance child of type refs and calls.
    pub check_instances: bool,
    /// Compare port/parameter directions.
    pub check_directions: bool,
    /// Compare code-position metadata.
    pub check_source_info: bool,

    /// An absent optional child on the left still matches a present one on
    /// the right (pattern holes).
    pub allow_missing_left: bool,
    /// Mirror image of `allow_missing_left`.
    pub allow_missing_right: bool,
}

impl Default for EquivOptions {
    fn default() -> EquivOptions {
        EquivOptions {
            kind_only: false,
            names_only: false,
            use_bindings: false,
            strict_bindings: false,
            check_spans: true,
            check_span_direction: true,
            check_string_spans: true,
            check_signed: true,
            check_logic: true,
            check_resolved: true,
            check_constexpr: true,
            check_type_variant: true,
            check_declaration_types: true,
            check_initial_values: true,
            check_field_defaults: true,
            check_instances: true,
            check_directions: true,
            check_source_info: false,
            allow_missing_left: false,
            allow_missing_right: false,
        }
    }
}

impl EquivOptions {
    /// Only the runtime variant matters.
    pub fn kind_only() -> EquivOptions {
        EquivOptions { kind_only: true, ..EquivOptions::default() }
    }

    /// Only variants and names matter.
    pub fn names_only() -> EquivOptions {
        EquivOptions { names_only: true, ..EquivOptions::default() }
    }

    /// Symbols stand or fall by their caches: equal non-null bindings are
    /// equal, different non-null bindings unequal.
    pub fn resolved_symbols() -> EquivOptions {
        EquivOptions { use_bindings: true, strict_bindings: true, ..EquivOptions::default() }
    }

    /// Pattern matching: holes on either side match anything.
    pub fn pattern() -> EquivOptions {
        EquivOptions {
            allow_missing_left: true,
            allow_missing_right: true,
            ..EquivOptions::default()
        }
    }
}
