//! Upstream release retrieval and artefact archive handling.
//!
//! # Sub-modules
//!
//! - [`download`] - Release download trait and HTTP implementation.
//! - [`extraction`] - Zip extraction with path traversal protection.
//! - [`naming`] - Artefact file naming (`ArtefactName`).
//! - [`packaging`] - Jar creation from the reshaped workspace.

pub mod download;
pub mod extraction;
pub mod naming;
pub mod packaging;
