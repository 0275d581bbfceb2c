//! Case-sensitive identifiers.

use std::fmt;

use smol_str::SmolStr;

/// `Name` is a wrapper around string, which is used in HIF for both
/// declaration names and the names symbols refer to them by.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(SmolStr);

impl Name {
    /// Note: this is private to make creating name from uninterned string hard.
    const fn new_inline(text: &str) -> Name {
        Name(SmolStr::new_inline(text))
    }

    pub fn new(text: impl AsRef<str>) -> Name {
        Name(SmolStr::new(text))
    }

    pub const EMPTY: Name = Name::new_inline("");

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Name {
        Name::new(name)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
