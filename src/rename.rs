//! Rename table.
//!
//! Some filenames cannot be stored verbatim in a published template tree
//! (packaging tools drop leading-dot files), so the template carries a safe
//! alias and the generator restores the real name at materialization time.
//! Applied only to paths that survived filtering; exact-path lookup, no
//! patterns.

use std::path::{Path, PathBuf};

/// An exact path-to-path rewrite.
pub struct RenameRule {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl RenameRule {
    pub fn new(from: &str, to: &str) -> Self {
        Self { from: PathBuf::from(from), to: PathBuf::from(to) }
    }
}

/// Maps each surviving template path to its output path. Paths absent from
/// the table map to themselves.
pub fn apply_renames(paths: Vec<PathBuf>, table: &[RenameRule]) -> Vec<(PathBuf, PathBuf)> {
    paths
        .into_iter()
        .map(|path| {
            let target = rename_path(&path, table);
            (path, target)
        })
        .collect()
}

fn rename_path(path: &Path, table: &[RenameRule]) -> PathBuf {
    table
        .iter()
        .find(|rule| rule.from == path)
        .map(|rule| rule.to.clone())
        .unwrap_or_else(|| path.to_path_buf())
}
