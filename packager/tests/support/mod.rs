//! Test support utilities for packager behavioural tests.
//!
//! Provides an offline [`SourceDownloader`] serving in-memory release
//! archives, plus helpers for building those archives and the metadata
//! template directory.

use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use stub_packager::artefact::download::{DownloadError, SourceDownloader};
use zip::write::SimpleFileOptions;

/// Descriptor template using both placeholders.
pub const TEMPLATED_DESCRIPTOR: &str = concat!(
    "<idea-plugin>\n",
    "  <id>com.phalcon.autocomplete</id>\n",
    "  <version>{{VERSION}}</version>\n",
    "  <description>Phalcon {{MAJOR_VERSION}} autocomplete</description>\n",
    "</idea-plugin>\n",
);

/// A downloader that serves a fixed archive, or answers 404 when it has none.
#[derive(Default)]
pub struct FixtureDownloader {
    archive: Option<Vec<u8>>,
    requested: RefCell<Vec<String>>,
}

impl FixtureDownloader {
    /// Serve `archive` for every request.
    pub fn serving(archive: Vec<u8>) -> Self {
        Self {
            archive: Some(archive),
            requested: RefCell::default(),
        }
    }

    /// Answer every request with 404.
    pub fn missing() -> Self {
        Self::default()
    }

    /// URLs requested so far.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl SourceDownloader for FixtureDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        self.requested.borrow_mut().push(url.to_owned());
        match &self.archive {
            Some(bytes) => {
                fs::write(dest, bytes)?;
                Ok(())
            }
            None => Err(DownloadError::NotFound {
                url: url.to_owned(),
            }),
        }
    }
}

/// Build a tag archive shaped like GitHub's: one `ide-stubs-<version>/`
/// directory, optionally holding `src/`.
pub fn release_zip(version: &str, with_src: bool) -> Vec<u8> {
    let top = format!("ide-stubs-{version}");
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let mut files = vec![(format!("{top}/README.md"), "# Phalcon IDE stubs")];
    if with_src {
        files.push((format!("{top}/src/Phalcon/Di.php"), "<?php class Di {}"));
        files.push((
            format!("{top}/src/Phalcon/Mvc/Model.php"),
            "<?php class Model {}",
        ));
    }

    writer
        .add_directory(format!("{top}/"), options)
        .expect("add top-level directory");
    for (name, contents) in files {
        writer.start_file(name, options).expect("start entry");
        writer.write_all(contents.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish archive").into_inner()
}

/// Create `<root>/meta` holding `descriptor` as `plugin.xml`.
pub fn write_meta_dir(root: &Utf8Path, descriptor: &str) -> Utf8PathBuf {
    let meta = root.join("meta");
    fs::create_dir_all(&meta).expect("mkdir meta");
    fs::write(meta.join("plugin.xml"), descriptor).expect("write descriptor");
    fs::write(meta.join("pluginIcon.svg"), "<svg/>").expect("write icon");
    meta
}

/// Convert a temporary directory path to UTF-8.
pub fn utf8_path(path: &Path) -> Utf8PathBuf {
    Utf8PathBuf::try_from(path.to_path_buf()).expect("temp dir path not UTF-8")
}

/// Return whether `dir` has no entries.
pub fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
