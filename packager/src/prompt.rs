//! Version input resolution.
//!
//! A version passed on the command line wins; otherwise the user is
//! prompted until a non-empty line arrives.

use crate::error::{PackagerError, Result};
use crate::version::StubVersion;
use std::io::{BufRead, Write};

/// Prompt shown when no version flag is given.
pub const VERSION_PROMPT: &str = "Enter the version number: ";

/// Resolve the version from the flag value, prompting when absent.
///
/// # Errors
///
/// Returns [`PackagerError::InvalidVersion`] if the supplied or entered text
/// is unusable, or [`PackagerError::MissingVersion`] if input ends before a
/// non-empty line is read.
pub fn resolve_version(
    flag: Option<&str>,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<StubVersion> {
    match flag {
        Some(value) => StubVersion::try_from(value),
        None => prompt_for_version(input, output),
    }
}

/// Prompt on `output` and read lines from `input` until one is non-empty.
///
/// # Errors
///
/// Returns [`PackagerError::MissingVersion`] when `input` reaches end of
/// file first, or [`PackagerError::Io`] if reading or writing fails.
pub fn prompt_for_version(
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<StubVersion> {
    let mut line = String::new();
    loop {
        write!(output, "{VERSION_PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // Keep the next log line on its own line.
            writeln!(output)?;
            return Err(PackagerError::MissingVersion {
                reason: "input closed before a version was entered".to_owned(),
            });
        }

        let entered = line.trim();
        if !entered.is_empty() {
            return StubVersion::try_from(entered);
        }
    }
}
