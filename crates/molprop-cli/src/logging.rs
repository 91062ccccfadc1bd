use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::{LevelFilter, Targets},
    fmt,
    prelude::*,
    registry::LookupSpan,
};

/// Target prefix shared by the library and the binary.
const CRATE_TARGET: &str = "molprop";

/// Console level: `-q` keeps errors only, otherwise WARN plus one step per `-v`.
fn console_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// The log file always records at least DEBUG, so a run can be diagnosed
/// after the fact without repeating it with `-vv`.
fn file_level(verbosity: u8) -> LevelFilter {
    console_level(verbosity, false).max(LevelFilter::DEBUG)
}

/// Our own events at `level`; dependencies never more verbose than WARN.
fn targets(level: LevelFilter) -> Targets {
    Targets::new()
        .with_target(CRATE_TARGET, level)
        .with_default(level.min(LevelFilter::WARN))
}

fn file_layer<S>(file: File, level: LevelFilter) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(targets(level))
}

/// Installs the global subscriber. Diagnostics go to stderr so stdout stays
/// reserved for prompts, tables and CSV; `--log-file` adds a plain-text copy
/// with its own, more detailed, level.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(targets(console_level(verbosity, quiet)));

    let log_file = log_file
        .map(File::create)
        .transpose()
        .map_err(CliError::Io)?;

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(log_file.map(|file| file_layer(file, file_level(verbosity))))
        .init();

    Ok(())
}
