// Directory scanning shared by the datasets
//
// All listings are sorted by file name so entry order does not depend on the
// order the filesystem happens to return.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use pictor_core::{Error, Result};

/// Fail with `NotADirectory` unless `path` is an existing directory.
pub(crate) fn require_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// UTF-8 file name of `path`, warning and returning `None` otherwise.
pub(crate) fn utf8_name(path: &Path) -> Option<&str> {
    let name = path.file_name()?;
    match name.to_str() {
        Some(s) => Some(s),
        None => {
            warn!(path = %path.display(), "skipping non UTF-8 file name");
            None
        }
    }
}

/// Regular files directly inside `dir` (no recursion) whose names end with
/// `suffix`, sorted by name.
pub(crate) fn files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    require_dir(dir)?;
    let mut out = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let path = entry?.into_path();
        if !path.is_file() {
            continue;
        }
        if utf8_name(&path).is_some_and(|n| n.ends_with(suffix)) {
            out.push(path);
        }
    }
    Ok(out)
}

/// Walk every directory below `root` and yield `(directory name, file)` for
/// each regular file whose name ends with `suffix`. Files directly in `root`
/// are not part of any class and are skipped.
pub(crate) fn class_files(root: &Path, suffix: &str) -> Result<Vec<(String, PathBuf)>> {
    require_dir(root)?;
    let mut out = Vec::new();
    for entry in WalkDir::new(root).min_depth(2).sort_by_file_name() {
        let path = entry?.into_path();
        if !path.is_file() || !utf8_name(&path).is_some_and(|n| n.ends_with(suffix)) {
            continue;
        }
        let Some(class) = path.parent().and_then(utf8_name) else {
            continue;
        };
        out.push((class.to_string(), path.clone()));
    }
    Ok(out)
}
