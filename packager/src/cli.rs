//! CLI argument definitions for the stub packager.
//!
//! Kept apart from the entrypoint so tests can parse arguments without
//! running the pipeline.

use camino::Utf8PathBuf;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use std::io::Write;

/// Package a Phalcon IDE stub release into a phalconautocomplete archive.
#[derive(Parser, Debug)]
#[command(
    name = "stub-packager",
    about,
    disable_version_flag = true,
    disable_help_flag = true
)]
#[command(long_about = concat!(
    "Package a Phalcon IDE stub release into a phalconautocomplete archive.\n\n",
    "Downloads the tagged stub release from GitHub, moves its src tree into ",
    "place, merges the local meta directory as META-INF with the version ",
    "placeholders filled in, and writes phalconautocomplete-<version>.jar ",
    "into the dist directory.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package a specific release:\n",
    "    $ stub-packager -v 3.4.2\n\n",
    "  Prompt for the version:\n",
    "    $ stub-packager",
))]
pub struct Cli {
    /// Stub release version to package (prompted for when omitted).
    #[arg(short = 'v', long = "stub-version", value_name = "VERSION")]
    pub stub_version: Option<String>,

    /// Metadata template directory [default: meta].
    #[arg(long, value_name = "DIR")]
    pub meta_dir: Option<Utf8PathBuf>,

    /// Output directory for the artefact [default: dist].
    #[arg(long, value_name = "DIR")]
    pub dist_dir: Option<Utf8PathBuf>,

    /// GitHub repository hosting the stub releases [default: phalcon/ide-stubs].
    #[arg(long, value_name = "OWNER/NAME")]
    pub repository: Option<String>,

    /// Configuration file [default: stub-packager.toml when present].
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// Report an argument parsing failure on `stdout` and return the exit code.
///
/// `--help` output is shown in full and exits with 0. Every other parse
/// error, including `-h`, prints the usage line and exits with 1.
pub fn report_parse_error(err: &clap::Error, stdout: &mut dyn Write) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            write_line(stdout, err.render());
            0
        }
        _ => {
            write_line(stdout, Cli::command().render_usage());
            1
        }
    }
}

fn write_line(stdout: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stdout, "{message}").is_err() {
        // Nothing else can report the failure.
    }
}
