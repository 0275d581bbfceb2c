//! Convenience macros.

/// Appends formatted string to a `String`.
#[macro_export]
macro_rules! format_to {
    ($buf:expr) => ();
    ($buf:expr, $lit:literal $($arg:tt)*) => {
        { use ::std::fmt::Write as _; let _ = ::std::write!($buf, $lit $($arg)*); }
    };
}

/// Generates the raw-integer conversions a typed index newtype needs.
#[macro_export]
macro_rules! impl_idx_from {
    ($($ty:ident($raw:ty));* $(;)?) => {
        $(
            impl From<$raw> for $ty {
                fn from(raw: $raw) -> $ty {
                    $ty(raw)
                }
            }
            impl From<$ty> for $raw {
                fn from(idx: $ty) -> $raw {
                    idx.0
                }
            }
            impl From<usize> for $ty {
                fn from(raw: usize) -> $ty {
                    $ty(raw as $raw)
                }
            }
            impl From<$ty> for usize {
                fn from(idx: $ty) -> usize {
                    idx.0 as usize
                }
            }
        )*
    };
}
