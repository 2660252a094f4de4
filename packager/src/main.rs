//! Stub packager CLI entrypoint.
//!
//! Resolves the version, loads configuration, and runs the packaging
//! pipeline against GitHub. Any failure is logged as a single line and the
//! process exits with status 1.

use camino::Utf8PathBuf;
use clap::Parser;
use stub_packager::artefact::download::HttpDownloader;
use stub_packager::cli::{Cli, report_parse_error};
use stub_packager::config::PackagerConfig;
use stub_packager::error::{PackagerError, Result};
use stub_packager::logging;
use stub_packager::pipeline::{PipelineContext, run_pipeline};
use stub_packager::prompt::resolve_version;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => std::process::exit(report_parse_error(&err, &mut std::io::stdout())),
    };

    logging::init();
    let exit_code = exit_code_for_run_result(run(&cli));
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli) -> Result<Utf8PathBuf> {
    let invocation_dir = invocation_dir()?;
    let config =
        PackagerConfig::load(cli.config.as_deref(), &invocation_dir)?.with_overrides(cli);

    let version = resolve_version(
        cli.stub_version.as_deref(),
        &mut std::io::stdin().lock(),
        &mut std::io::stdout(),
    )?;

    let context = PipelineContext {
        version: &version,
        config: &config,
        invocation_dir: &invocation_dir,
        workspace_parent: None,
    };
    let downloader = HttpDownloader::new(&config.user_agent, config.timeout());
    run_pipeline(&context, &downloader)
}

fn invocation_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|e| PackagerError::WorkspaceSetup {
        reason: format!("current directory is not valid UTF-8: {e}"),
    })
}

fn exit_code_for_run_result(result: Result<Utf8PathBuf>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            log::error!("Packaging failed: {}", error_chain(&err));
            1
        }
    }
}

/// Render `err` followed by any sources its message does not already show.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let exit_code = exit_code_for_run_result(Ok(Utf8PathBuf::from("dist/a.jar")));
        assert_eq!(exit_code, 0);
    }

    #[test]
    fn exit_code_for_run_result_returns_one_on_failure() {
        let err = PackagerError::MissingVersion {
            reason: "input closed".to_owned(),
        };
        assert_eq!(exit_code_for_run_result(Err(err)), 1);
    }

    #[test]
    fn error_chain_includes_sources() {
        let err = PackagerError::Cleanup {
            path: Utf8PathBuf::from("/tmp/stub-packager-x"),
            source: std::io::Error::other("device busy"),
        };
        let message = error_chain(&err);
        assert!(message.contains("/tmp/stub-packager-x"));
        assert!(message.ends_with(": device busy"));
    }

    #[test]
    fn error_chain_skips_sources_already_in_message() {
        let err = PackagerError::Io(std::io::Error::other("disk full"));
        assert_eq!(error_chain(&err), "I/O error: disk full");
    }
}
