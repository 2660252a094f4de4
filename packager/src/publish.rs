//! Artefact publication into the output directory.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Move `artefact` into `dist_dir`, replacing any file of the same name.
///
/// A plain rename is tried first; when that fails (for example because the
/// workspace and output directory are on different filesystems) the file is
/// copied and the original removed.
///
/// Returns the published path.
///
/// # Errors
///
/// Returns [`PackagerError::Publish`] if the artefact cannot be placed in
/// `dist_dir`.
pub fn publish_artefact(artefact: &Utf8Path, dist_dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let file_name = artefact.file_name().ok_or_else(|| PackagerError::Publish {
        from: artefact.to_owned(),
        to: dist_dir.to_owned(),
        source: std::io::Error::other("artefact path has no file name"),
    })?;
    let dest = dist_dir.join(file_name);
    let publish_error = |source| PackagerError::Publish {
        from: artefact.to_owned(),
        to: dest.clone(),
        source,
    };

    if dest.is_file() {
        log::debug!("replacing existing {dest}");
        fs::remove_file(&dest).map_err(publish_error)?;
    }

    if let Err(err) = fs::rename(artefact, &dest) {
        log::debug!("rename to {dest} failed ({err}); copying instead");
        fs::copy(artefact, &dest).map_err(publish_error)?;
        fs::remove_file(artefact).map_err(publish_error)?;
    }

    Ok(dest)
}
