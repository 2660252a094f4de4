//! Stub release download.
//!
//! Provides a trait-based abstraction over fetching the tagged source
//! archive from GitHub, so tests can substitute local fixtures for the
//! network.

use std::path::Path;
use std::time::Duration;

/// Base URL of the host serving release archives.
const GITHUB_BASE: &str = "https://github.com";

/// `Accept` header sent with every download.
const ACCEPT: &str = "application/zip, application/octet-stream;q=0.9, */*;q=0.8";

/// Trait for downloading a release archive.
///
/// Abstractions allow tests to mock HTTP behaviour without network access.
#[cfg_attr(test, mockall::automock)]
pub trait SourceDownloader {
    /// Download `url` and write the response body to `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with an
    /// error status, or the file cannot be written.
    fn download(&self, url: &str, dest: &Path) -> Result<(), DownloadError>;
}

/// Errors arising from release download operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested release was not found (HTTP 404).
    #[error("release not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The transfer reported success but left no file behind.
    #[error("download of {url} produced no file at {path}")]
    MissingFile {
        /// The URL that was requested.
        url: String,
        /// Where the archive was expected.
        path: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the tag archive URL for `version` of `repository`.
///
/// # Examples
///
/// ```
/// use stub_packager::artefact::download::release_url;
///
/// assert_eq!(
///     release_url("phalcon/ide-stubs", "3.4.2"),
///     "https://github.com/phalcon/ide-stubs/archive/refs/tags/v3.4.2.zip"
/// );
/// ```
#[must_use]
pub fn release_url(repository: &str, version: &str) -> String {
    format!("{GITHUB_BASE}/{repository}/archive/refs/tags/v{version}.zip")
}

/// HTTP downloader using `ureq`.
///
/// Redirects are followed, which GitHub uses to hand tag archives off to
/// its code-load host.
pub struct HttpDownloader {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpDownloader {
    /// Create a downloader sending `user_agent`, with an optional overall
    /// request timeout.
    #[must_use]
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            user_agent: user_agent.to_owned(),
        }
    }
}

impl SourceDownloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        let response = self
            .agent
            .get(url)
            .header("Accept", ACCEPT)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut file = std::fs::File::create(dest)?;
        std::io::copy(&mut response.into_body().as_reader(), &mut file)?;
        Ok(())
    }
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_url_uses_tag_archive_path() {
        let url = release_url("acme/stubs", "5.0.0beta");
        assert!(url.starts_with(GITHUB_BASE));
        assert!(url.contains("acme/stubs"));
        assert!(url.ends_with("/archive/refs/tags/v5.0.0beta.zip"));
    }

    #[test]
    fn map_ureq_error_maps_404_to_not_found() {
        let err = ureq::Error::StatusCode(404);
        let mapped = map_ureq_error("https://example.test/v1.zip", &err);
        assert!(matches!(mapped, DownloadError::NotFound { .. }));
    }

    #[test]
    fn map_ureq_error_maps_other_status_to_http_error() {
        let err = ureq::Error::StatusCode(503);
        let mapped = map_ureq_error("https://example.test/v1.zip", &err);
        assert!(matches!(mapped, DownloadError::HttpError { .. }));
    }

    #[test]
    fn not_found_message_names_url() {
        let err = DownloadError::NotFound {
            url: "https://example.test/v9.zip".to_owned(),
        };
        assert!(err.to_string().contains("https://example.test/v9.zip"));
    }
}
