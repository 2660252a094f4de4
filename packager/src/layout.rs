//! Release layout inspection and reshaping.
//!
//! Tag archives unpack to a single `<repo>-<version>/` directory. The
//! packager needs the children of its `src` directory one level higher, at
//! the workspace `src` directory.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Name of the source directory inside an upstream release.
const RELEASE_SOURCES: &str = "src";

/// Return the only directory directly inside `root`.
///
/// Plain files next to it are ignored.
///
/// # Errors
///
/// Returns [`PackagerError::UnexpectedLayout`] if `root` holds no
/// directory or more than one, and [`PackagerError::Io`] if it cannot be
/// listed.
pub fn single_top_level_dir(root: &Utf8Path) -> Result<Utf8PathBuf> {
    let mut dirs = Vec::new();
    for entry in root.read_dir_utf8()? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path().to_owned());
        }
    }
    dirs.sort();

    match dirs.len() {
        1 => Ok(dirs.remove(0)),
        0 => Err(PackagerError::UnexpectedLayout {
            path: root.to_owned(),
            reason: "archive did not unpack to a directory".to_owned(),
        }),
        _ => Err(PackagerError::UnexpectedLayout {
            path: root.to_owned(),
            reason: format!(
                "expected one top-level directory, found {}",
                dirs.iter()
                    .filter_map(|d| d.file_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }),
    }
}

/// Return the `src` directory of an unpacked release.
///
/// # Errors
///
/// Returns [`PackagerError::UnexpectedLayout`] if `release_root` has no
/// `src` directory.
pub fn release_sources(release_root: &Utf8Path) -> Result<Utf8PathBuf> {
    let sources = release_root.join(RELEASE_SOURCES);
    if !sources.is_dir() {
        return Err(PackagerError::UnexpectedLayout {
            path: release_root.to_owned(),
            reason: format!("no {RELEASE_SOURCES} directory"),
        });
    }
    Ok(sources)
}

/// Move every direct child of `from` into `to`, creating `to` first.
///
/// Returns the number of entries moved.
///
/// # Errors
///
/// Returns [`PackagerError::Move`] if any entry cannot be moved, and
/// [`PackagerError::Io`] if the directories cannot be created or listed.
pub fn move_children(from: &Utf8Path, to: &Utf8Path) -> Result<usize> {
    fs::create_dir_all(to)?;

    let mut moved = 0;
    for entry in from.read_dir_utf8()? {
        let entry = entry?;
        let child = entry.path().to_owned();
        let dest = to.join(entry.file_name());
        fs::rename(&child, &dest).map_err(|source| PackagerError::Move {
            from: child.clone(),
            to: dest.clone(),
            source,
        })?;
        moved += 1;
    }
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir path not UTF-8")
    }

    #[test]
    fn finds_single_directory_ignoring_files() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let root = utf8_dir(&temp_dir);
        fs::create_dir(root.join("ide-stubs-3.4.2")).expect("mkdir release");
        fs::write(root.join("pax_global_header"), "").expect("write file");

        let found = single_top_level_dir(&root).expect("single directory");

        assert_eq!(found, root.join("ide-stubs-3.4.2"));
    }

    #[test]
    fn no_directory_is_layout_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let root = utf8_dir(&temp_dir);
        fs::write(root.join("README.md"), "").expect("write file");

        let result = single_top_level_dir(&root);

        assert!(matches!(result, Err(PackagerError::UnexpectedLayout { .. })));
    }

    #[test]
    fn several_directories_are_layout_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let root = utf8_dir(&temp_dir);
        fs::create_dir(root.join("a")).expect("mkdir a");
        fs::create_dir(root.join("b")).expect("mkdir b");

        let err = single_top_level_dir(&root).expect_err("expected ambiguity");

        assert!(err.to_string().contains("a, b"), "unexpected error: {err}");
    }

    #[test]
    fn release_without_src_is_layout_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let root = utf8_dir(&temp_dir);

        let result = release_sources(&root);

        assert!(matches!(result, Err(PackagerError::UnexpectedLayout { .. })));
    }

    #[test]
    fn children_move_up_one_level() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let root = utf8_dir(&temp_dir);
        let sources = root.join("ide-stubs-3.4.2/src");
        fs::create_dir_all(sources.join("Phalcon/Mvc")).expect("mkdir tree");
        fs::write(sources.join("Phalcon/Di.php"), "<?php").expect("write di");
        fs::write(sources.join("bootstrap.php"), "<?php").expect("write bootstrap");
        let dest = root.join("src");

        let moved = move_children(&sources, &dest).expect("move children");

        assert_eq!(moved, 2);
        assert!(dest.join("Phalcon/Mvc").is_dir());
        assert!(dest.join("Phalcon/Di.php").is_file());
        assert!(dest.join("bootstrap.php").is_file());
        assert!(fs::read_dir(&sources).expect("list sources").next().is_none());
    }
}
