//! Metadata merge.
//!
//! Copies the local metadata template directory into the workspace and
//! renders the plugin descriptor's version placeholders.

use crate::error::{PackagerError, Result};
use crate::template::{render_file, version_substitutions};
use crate::version::StubVersion;
use camino::Utf8Path;
use std::fs;

/// Recursively copy the contents of `from` into `to`, creating `to`.
///
/// Returns the number of files copied.
///
/// # Errors
///
/// Returns [`PackagerError::MetadataNotFound`] if `from` is not a directory
/// and [`PackagerError::MetadataCopy`] if any entry cannot be copied.
pub fn copy_metadata(from: &Utf8Path, to: &Utf8Path) -> Result<usize> {
    if !from.is_dir() {
        return Err(PackagerError::MetadataNotFound {
            path: from.to_owned(),
        });
    }
    copy_tree(from, to)
}

fn copy_tree(from: &Utf8Path, to: &Utf8Path) -> Result<usize> {
    let copy_error = |source| PackagerError::MetadataCopy {
        from: from.to_owned(),
        to: to.to_owned(),
        source,
    };

    fs::create_dir_all(to).map_err(copy_error)?;

    let mut copied = 0;
    for entry in from.read_dir_utf8().map_err(copy_error)? {
        let entry = entry.map_err(copy_error)?;
        let dest = to.join(entry.file_name());
        if entry.file_type().map_err(copy_error)?.is_dir() {
            copied += copy_tree(entry.path(), &dest)?;
        } else {
            fs::copy(entry.path(), &dest).map_err(|source| PackagerError::MetadataCopy {
                from: entry.path().to_owned(),
                to: dest.clone(),
                source,
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Copy `meta_dir` into `dest` and render `descriptor` inside it for
/// `version`.
///
/// # Errors
///
/// Propagates copy failures from [`copy_metadata`] and rendering failures
/// as [`PackagerError::Template`].
pub fn merge_metadata(
    meta_dir: &Utf8Path,
    dest: &Utf8Path,
    descriptor: &str,
    version: &StubVersion,
) -> Result<()> {
    let copied = copy_metadata(meta_dir, dest)?;
    log::debug!("copied {copied} metadata file(s) from {meta_dir}");

    render_file(&dest.join(descriptor), &version_substitutions(version))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateError;
    use camino::Utf8PathBuf;

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir path not UTF-8")
    }

    fn write_meta(root: &Utf8Path, descriptor: &str) -> Utf8PathBuf {
        let meta = root.join("meta");
        fs::create_dir_all(meta.join("icons")).expect("mkdir meta");
        fs::write(meta.join("plugin.xml"), descriptor).expect("write descriptor");
        fs::write(meta.join("icons/pluginIcon.svg"), "<svg/>").expect("write icon");
        meta
    }

    #[test]
    fn copies_nested_metadata() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let root = utf8_dir(&temp_dir);
        let meta = write_meta(&root, "<idea-plugin/>");
        let dest = root.join("META-INF");

        let copied = copy_metadata(&meta, &dest).expect("copy metadata");

        assert_eq!(copied, 2);
        assert!(dest.join("icons/pluginIcon.svg").is_file());
        assert!(meta.join("plugin.xml").is_file());
    }

    #[test]
    fn missing_metadata_dir_is_reported() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let root = utf8_dir(&temp_dir);

        let result = copy_metadata(&root.join("meta"), &root.join("META-INF"));

        assert!(matches!(result, Err(PackagerError::MetadataNotFound { .. })));
    }

    #[test]
    fn merge_renders_copy_and_keeps_template() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let root = utf8_dir(&temp_dir);
        let template = "<version>{{VERSION}}</version><idea-version since-build=\"{{MAJOR_VERSION}}\"/>";
        let meta = write_meta(&root, template);
        let dest = root.join("META-INF");
        let version = StubVersion::try_from("3.4.2").expect("valid version");

        merge_metadata(&meta, &dest, "plugin.xml", &version).expect("merge metadata");

        let rendered = fs::read_to_string(dest.join("plugin.xml")).expect("read descriptor");
        assert_eq!(
            rendered,
            "<version>3.4.2</version><idea-version since-build=\"3\"/>"
        );
        let original = fs::read_to_string(meta.join("plugin.xml")).expect("read template");
        assert_eq!(original, template);
    }

    #[test]
    fn merge_without_descriptor_fails() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let root = utf8_dir(&temp_dir);
        let meta = write_meta(&root, "<idea-plugin/>");
        let version = StubVersion::try_from("3.4.2").expect("valid version");

        let result = merge_metadata(&meta, &root.join("META-INF"), "missing.xml", &version);

        assert!(matches!(
            result,
            Err(PackagerError::Template(TemplateError::Read { .. }))
        ));
    }
}
