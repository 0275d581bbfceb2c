//! Missing batteries for the standard library.

mod macros;
