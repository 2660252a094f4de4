//! Stub packager library.
//!
//! This crate packages a tagged Phalcon IDE stub release into the
//! `phalconautocomplete-<version>.jar` archive consumed by the IDE plugin.
//! It is used by the `stub-packager` CLI binary and can be driven
//! programmatically with a custom [`artefact::download::SourceDownloader`]
//! for testing.
//!
//! # Modules
//!
//! - [`artefact`] - Release download, extraction, naming, and jar creation
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Layered configuration (defaults, TOML file, CLI flags)
//! - [`error`] - Error types for every pipeline stage
//! - [`layout`] - Release layout inspection and source reshaping
//! - [`logging`] - Timestamped stdout logging
//! - [`metadata`] - Metadata template merge
//! - [`pipeline`] - Stage orchestration
//! - [`prompt`] - Version flag and interactive prompt resolution
//! - [`publish`] - Moving the artefact into the output directory
//! - [`template`] - Descriptor placeholder rendering
//! - [`version`] - Stub release version newtype
//! - [`workspace`] - Temporary workspace and output directory handling

pub mod artefact;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod metadata;
pub mod pipeline;
pub mod prompt;
pub mod publish;
pub mod template;
pub mod version;
pub mod workspace;
