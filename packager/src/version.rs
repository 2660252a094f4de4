//! Stub release version newtype.
//!
//! The version is free-form dot-delimited text such as `3.4.2` or
//! `5.0.0beta`. Its only hard requirements are that it is non-empty and can
//! be embedded in a file name and a release tag.

use crate::error::{PackagerError, Result};
use std::fmt;

/// A validated stub release version.
///
/// # Examples
///
/// ```
/// use stub_packager::version::StubVersion;
///
/// let version = StubVersion::try_from("3.4.2").expect("valid version");
/// assert_eq!(version.major(), "3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StubVersion(String);

impl StubVersion {
    /// Return the full version text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the major version: the text before the first `.`, or the
    /// whole version when it contains no `.`.
    #[must_use]
    pub fn major(&self) -> &str {
        self.0
            .split_once('.')
            .map_or(self.0.as_str(), |(major, _)| major)
    }
}

impl TryFrom<&str> for StubVersion {
    type Error = PackagerError;

    fn try_from(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        validate_version(trimmed)?;
        Ok(Self(trimmed.to_owned()))
    }
}

impl fmt::Display for StubVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_version(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PackagerError::InvalidVersion {
            value: value.to_owned(),
            reason: "version must not be empty".to_owned(),
        });
    }
    if let Some(bad) = value
        .chars()
        .find(|c| matches!(c, '/' | '\\') || c.is_whitespace() || c.is_control())
    {
        return Err(PackagerError::InvalidVersion {
            value: value.to_owned(),
            reason: format!("version must not contain {bad:?}"),
        });
    }
    Ok(())
}
