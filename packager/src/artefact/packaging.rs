//! Plugin archive creation.
//!
//! Builds the `.jar` (a deflate-compressed zip) from named top-level
//! directories of the workspace. Entries are added in sorted path order so
//! the layout of the archive does not depend on directory listing order.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use thiserror::Error;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Errors arising from archive creation.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// An I/O operation failed (reading source files, writing the archive).
    #[error("I/O error during packaging: {0}")]
    Io(#[from] io::Error),

    /// The zip writer rejected an entry.
    #[error("zip error during packaging: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A directory that must be archived does not exist.
    #[error("cannot package missing directory {0}")]
    MissingDirectory(Utf8PathBuf),
}

/// A single archive member.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ArchiveEntry {
    /// A directory entry; the name ends with `/`.
    Directory(String),
    /// A file entry read from `source`.
    File { source: Utf8PathBuf, name: String },
}

/// Create a jar at `output_path` containing each of `top_level` (directory
/// names relative to `root`) recursively.
///
/// Returns the number of files written.
///
/// # Errors
///
/// Returns [`PackagingError::MissingDirectory`] if a top-level directory is
/// absent, or [`PackagingError::Io`] / [`PackagingError::Zip`] if reading
/// a source or writing the archive fails.
pub fn create_jar(
    output_path: &Utf8Path,
    root: &Utf8Path,
    top_level: &[&str],
) -> Result<usize, PackagingError> {
    let mut entries = Vec::new();
    for name in top_level {
        let dir = root.join(name);
        if !dir.is_dir() {
            return Err(PackagingError::MissingDirectory(dir));
        }
        entries.push(ArchiveEntry::Directory(format!("{name}/")));
        collect_entries(&dir, name, &mut entries)?;
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = zip::ZipWriter::new(fs::File::create(output_path)?);
    let mut files = 0;

    for entry in entries {
        match entry {
            ArchiveEntry::Directory(name) => writer.add_directory(name, options)?,
            ArchiveEntry::File { source, name } => {
                let mut reader = fs::File::open(&source)?;
                writer.start_file(name, options)?;
                io::copy(&mut reader, &mut writer)?;
                files += 1;
            }
        }
    }

    writer.finish()?;
    log::debug!("wrote {files} file(s) to {output_path}");
    Ok(files)
}

/// Walk `dir` depth-first in sorted order, naming entries under `prefix`.
fn collect_entries(
    dir: &Utf8Path,
    prefix: &str,
    entries: &mut Vec<ArchiveEntry>,
) -> Result<(), PackagingError> {
    let mut children = dir
        .read_dir_utf8()?
        .collect::<io::Result<Vec<_>>>()?;
    children.sort_by(|a, b| a.file_name().cmp(b.file_name()));

    for child in children {
        let name = format!("{prefix}/{}", child.file_name());
        if child.file_type()?.is_dir() {
            entries.push(ArchiveEntry::Directory(format!("{name}/")));
            collect_entries(child.path(), &name, entries)?;
        } else {
            entries.push(ArchiveEntry::File {
                source: child.path().to_owned(),
                name,
            });
        }
    }
    Ok(())
}
