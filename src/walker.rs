use std::path::{Component, Path};

use crate::error::{Error, Result};

/// File name suffix eligible for indexing.
const SUPPORTED_SUFFIX: &str = ".txt";

/// List the indexable file names directly under `root`.
///
/// The scan is not recursive. Entries whose name ends in `.txt` and that
/// resolve to a regular file are returned, sorted by name. Names that are
/// not valid UTF-8 are skipped.
pub fn discover_files(root: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(root)
        .map_err(|_| Error::RootDir(root.to_path_buf()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.ends_with(SUPPORTED_SUFFIX) {
            continue;
        }
        // `metadata` follows symlinks, so a link to a file counts and a
        // broken link does not.
        if std::fs::metadata(entry.path()).is_ok_and(|m| m.is_file()) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Whether `name` is a single plain file name.
///
/// Absolute paths, `..`, `.` and anything with a separator are rejected,
/// so joining the name onto a root can never leave that root.
pub fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Whether `root/name` exists and is not a directory.
///
/// Names that are not plain file names never exist.
pub fn file_exists(root: &Path, name: &str) -> bool {
    is_plain_name(name)
        && std::fs::metadata(root.join(name)).is_ok_and(|m| !m.is_dir())
}

/// Whether `path` is an existing directory.
pub fn dir_exists(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_dir())
}
