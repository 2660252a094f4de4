//! Release archive extraction.
//!
//! Extracts `.zip` archives to a target directory with path traversal
//! protection to prevent zip-slip attacks.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// File type bits of a unix mode.
const S_IFMT: u32 = 0o170_000;

/// File type of a symbolic link.
const S_IFLNK: u32 = 0o120_000;

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// I/O error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive is not a readable zip file.
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },

    /// An entry is a symbolic link, which is never extracted.
    #[error("symbolic link entry in archive: {path}")]
    SymlinkEntry {
        /// The link's path in the archive.
        path: String,
    },

    /// The archive contains no files.
    #[error("archive contains no files")]
    EmptyArchive,
}

/// Extract the zip archive at `archive_path` into `dest_dir`.
///
/// Returns the relative paths of the files written, in archive order.
///
/// # Errors
///
/// Returns [`ExtractionError::PathTraversal`] if any entry
/// attempts to escape the destination directory.
/// Returns [`ExtractionError::SymlinkEntry`] if an entry is a symbolic link.
/// Returns [`ExtractionError::EmptyArchive`] if no files are found.
/// Returns [`ExtractionError::Zip`] or [`ExtractionError::Io`] on read or
/// write failures.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut extracted = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let entry_path = PathBuf::from(entry.name());

        validate_entry_path(&entry_path)?;
        if entry.unix_mode().is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
            return Err(ExtractionError::SymlinkEntry {
                path: entry_path.display().to_string(),
            });
        }

        let dest_path = dest_dir.join(&entry_path);
        if entry.is_dir() {
            fs::create_dir_all(&dest_path)?;
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut output = fs::File::create(&dest_path)?;
        io::copy(&mut entry, &mut output)?;
        extracted.push(entry_path);
    }

    if extracted.is_empty() {
        return Err(ExtractionError::EmptyArchive);
    }

    Ok(extracted)
}

/// Validate that an archive entry path does not escape the destination
/// directory via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractionError> {
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(ExtractionError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}
