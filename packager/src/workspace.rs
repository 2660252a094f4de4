//! Temporary workspace and output directory handling.
//!
//! A [`Workspace`] owns a uniquely named temporary directory for the
//! duration of one packaging run. Dropping it removes the directory, so
//! every exit path cleans up; [`Workspace::close`] does the same while
//! reporting removal failures.

use crate::error::{PackagerError, Result};
use crate::version::StubVersion;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Prefix of the temporary workspace directory name.
const WORKSPACE_PREFIX: &str = "stub-packager-";

/// Directory inside the workspace that receives the extracted release.
pub const UNPACKED_DIR: &str = "unpacked";

/// Directory inside the workspace holding the reshaped sources.
pub const SOURCES_DIR: &str = "src";

/// Directory inside the workspace holding the merged metadata.
pub const METADATA_DIR: &str = "META-INF";

/// An exclusively owned temporary working directory.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    /// Create a workspace inside `parent`, or the system temporary
    /// directory when `parent` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::WorkspaceSetup`] if the directory cannot be
    /// created or its path is not valid UTF-8.
    pub fn create(parent: Option<&Utf8Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let created = match parent {
            Some(dir) => builder.tempdir_in(dir),
            None => builder.tempdir(),
        };
        let dir = created.map_err(|e| PackagerError::WorkspaceSetup {
            reason: e.to_string(),
        })?;

        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).map_err(|e| {
            PackagerError::WorkspaceSetup {
                reason: format!("temporary directory path is not valid UTF-8: {e}"),
            }
        })?;
        if !root.is_dir() {
            return Err(PackagerError::WorkspaceSetup {
                reason: format!("{root} was not created"),
            });
        }

        Ok(Self { dir, root })
    }

    /// Return the workspace root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Return the path the release archive for `version` is downloaded to.
    #[must_use]
    pub fn download_path(&self, version: &StubVersion) -> Utf8PathBuf {
        self.root.join(format!("{version}.zip"))
    }

    /// Return the directory the release archive is extracted into.
    #[must_use]
    pub fn unpacked_dir(&self) -> Utf8PathBuf {
        self.root.join(UNPACKED_DIR)
    }

    /// Return the directory holding the reshaped sources.
    #[must_use]
    pub fn sources_dir(&self) -> Utf8PathBuf {
        self.root.join(SOURCES_DIR)
    }

    /// Return the directory holding the merged metadata.
    #[must_use]
    pub fn metadata_dir(&self) -> Utf8PathBuf {
        self.root.join(METADATA_DIR)
    }

    /// Remove the workspace, reporting failure.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Cleanup`] if the directory cannot be removed.
    pub fn close(self) -> Result<()> {
        let Self { dir, root } = self;
        dir.close()
            .map_err(|source| PackagerError::Cleanup { path: root, source })
    }
}

/// Create the output directory if it does not exist.
///
/// # Errors
///
/// Returns [`PackagerError::OutputDirectory`] if creation fails or the path
/// exists but is not a directory.
pub fn prepare_output_dir(path: &Utf8Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| PackagerError::OutputDirectory {
        path: path.to_owned(),
        source,
    })?;
    if !path.is_dir() {
        return Err(PackagerError::OutputDirectory {
            path: path.to_owned(),
            source: std::io::Error::other("path exists but is not a directory"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir path not UTF-8")
    }

    #[test]
    fn workspaces_are_unique_and_prefixed() {
        let parent = tempfile::tempdir().expect("temp dir");
        let parent_path = utf8_dir(&parent);

        let first = Workspace::create(Some(&parent_path)).expect("first workspace");
        let second = Workspace::create(Some(&parent_path)).expect("second workspace");

        assert_ne!(first.root(), second.root());
        let name = first.root().file_name().expect("workspace has a name");
        assert!(name.starts_with(WORKSPACE_PREFIX));
    }

    #[test]
    fn fixed_paths_live_under_root() {
        let parent = tempfile::tempdir().expect("temp dir");
        let workspace = Workspace::create(Some(&utf8_dir(&parent))).expect("workspace");
        let version = StubVersion::try_from("3.4.2").expect("valid version");

        assert_eq!(workspace.download_path(&version), workspace.root().join("3.4.2.zip"));
        assert!(workspace.sources_dir().ends_with("src"));
        assert!(workspace.metadata_dir().ends_with("META-INF"));
        assert!(workspace.unpacked_dir().starts_with(workspace.root()));
    }

    #[test]
    fn close_removes_directory() {
        let parent = tempfile::tempdir().expect("temp dir");
        let workspace = Workspace::create(Some(&utf8_dir(&parent))).expect("workspace");
        let root = workspace.root().to_owned();
        fs::write(root.join("scratch"), "x").expect("write scratch");

        workspace.close().expect("close workspace");

        assert!(!root.exists());
    }

    #[test]
    fn drop_removes_directory() {
        let parent = tempfile::tempdir().expect("temp dir");
        let root = {
            let workspace = Workspace::create(Some(&utf8_dir(&parent))).expect("workspace");
            workspace.root().to_owned()
        };
        assert!(!root.exists());
    }

    #[test]
    fn missing_parent_is_setup_error() {
        let parent = tempfile::tempdir().expect("temp dir");
        let missing = utf8_dir(&parent).join("absent");

        let result = Workspace::create(Some(&missing));

        assert!(matches!(result, Err(PackagerError::WorkspaceSetup { .. })));
    }

    #[test]
    fn output_dir_creation_is_idempotent() {
        let parent = tempfile::tempdir().expect("temp dir");
        let dist = utf8_dir(&parent).join("dist");

        prepare_output_dir(&dist).expect("first creation");
        prepare_output_dir(&dist).expect("second creation");

        assert!(dist.is_dir());
    }

    #[test]
    fn output_dir_over_file_is_rejected() {
        let parent = tempfile::tempdir().expect("temp dir");
        let dist = utf8_dir(&parent).join("dist");
        fs::write(&dist, "not a directory").expect("write file");

        let result = prepare_output_dir(&dist);

        assert!(matches!(result, Err(PackagerError::OutputDirectory { .. })));
    }
}
