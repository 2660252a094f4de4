//! Timestamped progress logging.
//!
//! Every progress and failure message is a single stdout line of the form
//! `YYYY-MM-DD HH:MM:SS message`. The `log` facade carries the messages and
//! `env_logger` renders them; `STUB_PACKAGER_LOG` adjusts the level filter
//! (for example `STUB_PACKAGER_LOG=debug`).

use chrono::{Local, NaiveDateTime};
use log::LevelFilter;
use std::fmt::Display;
use std::io::Write;

/// Environment variable holding the `env_logger` filter directives.
pub const LOG_ENV: &str = "STUB_PACKAGER_LOG";

/// `strftime` format of the timestamp prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format one log line for the given local time.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use stub_packager::logging::format_line;
///
/// let at = NaiveDate::from_ymd_opt(2026, 10, 16)
///     .and_then(|d| d.and_hms_opt(9, 5, 3))
///     .expect("valid timestamp");
/// assert_eq!(format_line(&at, "Downloading"), "2026-10-16 09:05:03 Downloading");
/// ```
#[must_use]
pub fn format_line(at: &NaiveDateTime, message: impl Display) -> String {
    format!("{} {message}", at.format(TIMESTAMP_FORMAT))
}

/// Install the stdout logger.
///
/// Calling this more than once keeps the first logger.
pub fn init() {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .parse_env(env_logger::Env::new().filter(LOG_ENV))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let now = Local::now().naive_local();
            writeln!(buf, "{}", format_line(&now, record.args()))
        });

    if builder.try_init().is_err() {
        log::debug!("logger already installed");
    }
}
