// ── TreeWalker – local directory enumeration ─────────────────────────────────

use std::path::{Path, PathBuf};

use crate::deploy::error::TransferError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One entry of the local tree, tagged with its path relative to the walk
/// root.
#[derive(Debug, Clone)]
pub struct LocalEntry {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub kind: EntryKind,
}

/// Lazy depth-first pre-order walk of a local directory: a directory is
/// always yielded before anything inside it. Enumeration order is stable
/// (entries sorted by file name within each level). Symbolic links are
/// skipped entirely — never followed, never uploaded. A walker is
/// single-use; start a fresh one per walk.
pub struct TreeWalker {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl TreeWalker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let inner = walkdir::WalkDir::new(&root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        TreeWalker { root, inner }
    }
}

impl Iterator for TreeWalker {
    type Item = Result<LocalEntry, TransferError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    return Some(Err(TransferError::Walk {
                        path: self.root.display().to_string(),
                        source: e,
                    }))
                }
            };

            let file_type = entry.file_type();
            if file_type.is_symlink() {
                continue;
            }
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            // strip_prefix cannot fail for entries produced under `root`.
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_path_buf();

            return Some(Ok(LocalEntry {
                path: entry.into_path(),
                relative,
                kind,
            }));
        }
    }
}
