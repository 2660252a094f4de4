//! Packaging pipeline orchestration.
//!
//! Runs the packaging stages in order and stops at the first failure. Each
//! stage works on explicit paths derived from the [`PipelineContext`] and
//! the [`Workspace`]; the process working directory is never changed.

use crate::artefact::download::{DownloadError, SourceDownloader, release_url};
use crate::artefact::extraction::extract_zip;
use crate::artefact::naming::ArtefactName;
use crate::artefact::packaging::create_jar;
use crate::config::PackagerConfig;
use crate::error::Result;
use crate::layout::{move_children, release_sources, single_top_level_dir};
use crate::metadata::merge_metadata;
use crate::publish::publish_artefact;
use crate::version::StubVersion;
use crate::workspace::{METADATA_DIR, SOURCES_DIR, Workspace, prepare_output_dir};
use camino::{Utf8Path, Utf8PathBuf};
use log::info;

/// Inputs for one packaging run.
#[derive(Debug)]
pub struct PipelineContext<'a> {
    /// Version being packaged.
    pub version: &'a StubVersion,
    /// Effective configuration.
    pub config: &'a PackagerConfig,
    /// Directory the relative `meta_dir` and `dist_dir` resolve against.
    pub invocation_dir: &'a Utf8Path,
    /// Where to create the temporary workspace; the system temporary
    /// directory when `None`.
    pub workspace_parent: Option<&'a Utf8Path>,
}

impl PipelineContext<'_> {
    /// Return the absolute metadata template directory.
    #[must_use]
    pub fn meta_dir(&self) -> Utf8PathBuf {
        self.invocation_dir.join(&self.config.meta_dir)
    }

    /// Return the absolute output directory.
    #[must_use]
    pub fn dist_dir(&self) -> Utf8PathBuf {
        self.invocation_dir.join(&self.config.dist_dir)
    }

    /// Return the artefact name for this run.
    #[must_use]
    pub fn artefact_name(&self) -> ArtefactName {
        ArtefactName::new(&self.config.artefact_prefix, self.version.clone())
    }
}

/// Package the release described by `context`, downloading it with
/// `downloader`, and return the published artefact path.
///
/// The temporary workspace is removed whether or not the run succeeds.
///
/// # Errors
///
/// Returns the first stage failure. A cleanup failure after publication is
/// still an error even though the artefact exists.
pub fn run_pipeline(
    context: &PipelineContext<'_>,
    downloader: &dyn SourceDownloader,
) -> Result<Utf8PathBuf> {
    let version = context.version;
    info!(
        "Packaging stub release {version} (major version {})",
        version.major()
    );

    let workspace = Workspace::create(context.workspace_parent)?;
    info!("Created temporary workspace {}", workspace.root());

    let dist_dir = context.dist_dir();
    prepare_output_dir(&dist_dir)?;
    info!("Using output directory {dist_dir}");

    let archive = fetch_release(context, &workspace, downloader)?;
    unpack_release(&archive, &workspace)?;

    let meta_dir = context.meta_dir();
    info!("Merging metadata from {meta_dir}");
    merge_metadata(
        &meta_dir,
        &workspace.metadata_dir(),
        &context.config.descriptor,
        version,
    )?;
    info!(
        "Rendered {} for version {version}",
        context.config.descriptor
    );

    let artefact = repack(context, &workspace)?;

    let published = publish_artefact(&artefact, &dist_dir)?;
    info!("Moved artefact to {dist_dir}");

    let workspace_root = workspace.root().to_owned();
    workspace.close()?;
    info!("Removed temporary workspace {workspace_root}");

    info!("Successfully created {published}");
    Ok(published)
}

/// Download the release archive into the workspace.
fn fetch_release(
    context: &PipelineContext<'_>,
    workspace: &Workspace,
    downloader: &dyn SourceDownloader,
) -> Result<Utf8PathBuf> {
    let url = release_url(&context.config.repository, context.version.as_str());
    let dest = workspace.download_path(context.version);
    info!("Downloading {url}");

    downloader.download(&url, dest.as_std_path())?;
    if !dest.is_file() {
        return Err(DownloadError::MissingFile {
            url,
            path: dest.to_string(),
        }
        .into());
    }

    info!("Downloaded {dest}");
    Ok(dest)
}

/// Extract the archive and move the release sources into place.
fn unpack_release(archive: &Utf8Path, workspace: &Workspace) -> Result<()> {
    let unpacked = workspace.unpacked_dir();
    info!("Extracting {archive}");
    std::fs::create_dir_all(&unpacked)?;
    let files = extract_zip(archive.as_std_path(), unpacked.as_std_path())?;
    log::debug!("extracted {} file(s) into {unpacked}", files.len());

    let release_root = single_top_level_dir(&unpacked)?;
    let sources = release_sources(&release_root)?;

    let dest = workspace.sources_dir();
    let moved = move_children(&sources, &dest)?;
    info!("Moved {moved} entries from {sources} to {dest}");
    Ok(())
}

/// Create the artefact inside the workspace.
fn repack(context: &PipelineContext<'_>, workspace: &Workspace) -> Result<Utf8PathBuf> {
    let artefact = workspace.root().join(context.artefact_name().filename());
    info!("Creating {artefact}");
    let files = create_jar(&artefact, workspace.root(), &[SOURCES_DIR, METADATA_DIR])?;
    log::debug!("archived {files} file(s)");
    Ok(artefact)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
