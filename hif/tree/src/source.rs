//! Code-position metadata.
//!
//! Every node may remember where in the source HDL text it came from. The
//! information is carried along through rewrites but is never semantically
//! relevant; the equality engine ignores it unless explicitly asked not to.

use std::path::{Path, PathBuf};

use stdx::impl_idx_from;
use text_size::TextRange;
use typed_index_collections::TiVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u32);

impl_idx_from!(FileId(u32));

/// Interns the paths of all source files a tree was built from.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: TiVec<FileId, PathBuf>,
}

impl SourceMap {
    pub fn intern(&mut self, path: &Path) -> FileId {
        if let Some(file) = self.files.iter_enumerated().find(|(_, it)| it.as_path() == path) {
            return file.0;
        }
        self.files.push_and_get_key(path.to_owned())
    }

    pub fn path(&self, file: FileId) -> &Path {
        &self.files[file]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub file: FileId,
    pub range: TextRange,
}

impl Span {
    pub fn new(file: FileId, range: TextRange) -> Span {
        Span { file, range }
    }

    /// Covering span of two spans in the same file; `self` wins otherwise.
    pub fn cover(self, other: Span) -> Span {
        if self.file == other.file {
            Span { file: self.file, range: self.range.cover(other.range) }
        } else {
            self
        }
    }
}
