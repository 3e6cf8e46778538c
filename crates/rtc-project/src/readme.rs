//! Readme discovery.

use std::fs;
use std::path::{Path, PathBuf};

/// File name used when no readme is found by scanning.
pub(crate) const DEFAULT_README: &str = "readme.MD";

/// Find the readme in `dir`, matching `readme.md` case-insensitively.
///
/// When several spellings exist (only possible on case-sensitive
/// filesystems) the lexicographically smallest wins. Falls back to
/// `dir/readme.MD` so that a missing readme surfaces as a read error
/// naming a concrete path.
pub(crate) fn find_readme(dir: &Path) -> PathBuf {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_readme(path) && path.is_file())
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .unwrap_or_else(|| dir.join(DEFAULT_README))
}

fn is_readme(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case("readme.md"))
}
