//! Placeholder rendering for the plugin descriptor.
//!
//! The descriptor carries `{{VERSION}}` and `{{MAJOR_VERSION}}` tokens.
//! Rendering replaces every occurrence of each token and fails if any token
//! does not occur at all, so a stale or mistyped descriptor is caught before
//! it ships.

use crate::version::StubVersion;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Token replaced with the full version.
pub const VERSION_PLACEHOLDER: &str = "{{VERSION}}";

/// Token replaced with the major version.
pub const MAJOR_VERSION_PLACEHOLDER: &str = "{{MAJOR_VERSION}}";

/// Errors arising from descriptor rendering.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The descriptor could not be read.
    #[error("could not read descriptor {path}")]
    Read {
        /// Descriptor path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The rendered descriptor could not be written back.
    #[error("could not write descriptor {path}")]
    Write {
        /// Descriptor path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// One or more placeholders never occur in the template.
    #[error("placeholder(s) {} not found in {path}", .tokens.join(", "))]
    MissingPlaceholders {
        /// Template that was rendered.
        path: Utf8PathBuf,
        /// The tokens that were absent.
        tokens: Vec<String>,
    },
}

/// A token and the value that replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution<'a> {
    /// Literal token text.
    pub token: &'static str,
    /// Replacement value.
    pub value: &'a str,
}

/// Return the substitutions for `version`.
#[must_use]
pub fn version_substitutions(version: &StubVersion) -> [Substitution<'_>; 2] {
    [
        Substitution {
            token: VERSION_PLACEHOLDER,
            value: version.as_str(),
        },
        Substitution {
            token: MAJOR_VERSION_PLACEHOLDER,
            value: version.major(),
        },
    ]
}

/// Replace every occurrence of each token in `template`.
///
/// On failure returns the tokens that do not occur in `template`.
///
/// # Examples
///
/// ```
/// use stub_packager::template::{render, version_substitutions};
/// use stub_packager::version::StubVersion;
///
/// let version = StubVersion::try_from("3.4.2").expect("valid version");
/// let text = render(
///     "<version>{{VERSION}}</version><since>{{MAJOR_VERSION}}</since>",
///     &version_substitutions(&version),
/// )
/// .expect("all placeholders present");
/// assert_eq!(text, "<version>3.4.2</version><since>3</since>");
/// ```
///
/// # Errors
///
/// Returns the list of absent tokens when any substitution matches nothing.
pub fn render(template: &str, substitutions: &[Substitution<'_>]) -> Result<String, Vec<String>> {
    let missing: Vec<String> = substitutions
        .iter()
        .filter(|s| !template.contains(s.token))
        .map(|s| s.token.to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }

    Ok(substitutions
        .iter()
        .fold(template.to_owned(), |text, s| text.replace(s.token, s.value)))
}

/// Render the file at `path` in place.
///
/// # Errors
///
/// Returns [`TemplateError::Read`] or [`TemplateError::Write`] on I/O
/// failure, and [`TemplateError::MissingPlaceholders`] when a token is
/// absent; the file is left untouched in that case.
pub fn render_file(path: &Utf8Path, substitutions: &[Substitution<'_>]) -> Result<(), TemplateError> {
    let template = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_owned(),
        source,
    })?;

    let rendered = render(&template, substitutions).map_err(|tokens| {
        TemplateError::MissingPlaceholders {
            path: path.to_owned(),
            tokens,
        }
    })?;

    std::fs::write(path, rendered).map_err(|source| TemplateError::Write {
        path: path.to_owned(),
        source,
    })
}
