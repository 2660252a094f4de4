//! Error types for the stub packager.
//!
//! Every pipeline stage reports failures through [`PackagerError`]. The
//! orchestrator stops at the first error and the binary maps any error to
//! exit status 1, so the variants exist to produce precise diagnostics rather
//! than to drive recovery.

use crate::artefact::download::DownloadError;
use crate::artefact::extraction::ExtractionError;
use crate::artefact::packaging::PackagingError;
use crate::config::ConfigError;
use crate::template::TemplateError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while packaging a stub release.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The version could not be obtained from the flag or the prompt.
    #[error("no version entered: {reason}")]
    MissingVersion {
        /// Description of why no version was read.
        reason: String,
    },

    /// The supplied version cannot name an artefact.
    #[error("invalid version \"{value}\": {reason}")]
    InvalidVersion {
        /// The rejected version text.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The temporary workspace could not be created.
    #[error("could not create temporary workspace: {reason}")]
    WorkspaceSetup {
        /// Description of the failure.
        reason: String,
    },

    /// The output directory could not be created.
    #[error("could not create output directory {path}")]
    OutputDirectory {
        /// Path of the output directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Downloading the upstream release failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The downloaded release could not be unpacked.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The unpacked release does not have the expected layout.
    #[error("unexpected release layout in {path}: {reason}")]
    UnexpectedLayout {
        /// Directory that was inspected.
        path: Utf8PathBuf,
        /// Description of what was missing or ambiguous.
        reason: String,
    },

    /// Moving a file or directory failed.
    #[error("could not move {from} to {to}")]
    Move {
        /// Source path.
        from: Utf8PathBuf,
        /// Destination path.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The metadata template directory does not exist.
    #[error("metadata directory {path} not found")]
    MetadataNotFound {
        /// Expected location of the metadata directory.
        path: Utf8PathBuf,
    },

    /// Copying the metadata template directory failed.
    #[error("could not copy metadata from {from} to {to}")]
    MetadataCopy {
        /// Source path being copied.
        from: Utf8PathBuf,
        /// Destination path.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Placeholder substitution in the plugin descriptor failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Creating the output archive failed.
    #[error(transparent)]
    Packaging(#[from] PackagingError),

    /// Moving the archive into the output directory failed.
    #[error("could not publish {from} to {to}")]
    Publish {
        /// Archive inside the workspace.
        from: Utf8PathBuf,
        /// Destination inside the output directory.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Removing the temporary workspace failed.
    #[error("could not remove temporary workspace {path}")]
    Cleanup {
        /// Workspace path left behind.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation outside a specific stage failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
