//! Artefact naming policy.
//!
//! Archives are named `<prefix>-<version>.jar`; with the default prefix this
//! gives `phalconautocomplete-3.4.2.jar`.

use crate::version::StubVersion;
use std::fmt;

/// The fixed file extension for plugin archives.
const ARTEFACT_EXTENSION: &str = ".jar";

/// A fully-qualified artefact file name.
///
/// # Examples
///
/// ```
/// use stub_packager::artefact::naming::ArtefactName;
/// use stub_packager::version::StubVersion;
///
/// let version = StubVersion::try_from("3.4.2").expect("valid version");
/// let name = ArtefactName::new("phalconautocomplete", version);
/// assert_eq!(name.to_string(), "phalconautocomplete-3.4.2.jar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactName {
    prefix: String,
    version: StubVersion,
}

impl ArtefactName {
    /// Create an artefact name from a prefix and a validated version.
    #[must_use]
    pub fn new(prefix: &str, version: StubVersion) -> Self {
        Self {
            prefix: prefix.to_owned(),
            version,
        }
    }

    /// Return the file name.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArtefactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}{ARTEFACT_EXTENSION}", self.prefix, self.version)
    }
}
