//! Structured logging setup for the command line.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::boxed_input_error;

const TRACE_ENV: &str = "OPTIFORM_TRACE";
const FORMAT_ENV: &str = "OPTIFORM_LOG_FORMAT";
const FILE_ENV: &str = "OPTIFORM_LOG_FILE";

fn open_log_file(path: &str) -> Result<Mutex<File>, Box<dyn std::error::Error>> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(Mutex::new)
        .map_err(|err| boxed_input_error(&format!("Failed to open log file {path}: {err}")))
}

/// Build the event filter from `--log-level`, else `OPTIFORM_TRACE`, else `off`.
pub(crate) fn build_filter(level: Option<&str>) -> Result<EnvFilter, Box<dyn std::error::Error>> {
    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var(TRACE_ENV).ok())
        .unwrap_or_else(|| "off".to_string());

    if level_value.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
    }
    EnvFilter::try_new(&level_value)
        .map_err(|err| boxed_input_error(&format!("Invalid log filter: {err}")))
}

/// Install the global subscriber. Events go to stderr, and also to
/// `OPTIFORM_LOG_FILE` when set. Returns false if one is already installed.
pub fn init(level: Option<&str>) -> Result<bool, Box<dyn std::error::Error>> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = build_filter(level)?;
    let format = env::var(FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string());
    let log_file = env::var(FILE_ENV).ok();
    let use_json = format.eq_ignore_ascii_case("json");

    if !use_json && !format.eq_ignore_ascii_case("pretty") {
        return Err(boxed_input_error(
            "Invalid OPTIFORM_LOG_FORMAT (expected 'json' or 'pretty')",
        ));
    }

    let log_file = log_file.as_deref().map(open_log_file).transpose()?;
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if use_json {
        let file_layer =
            log_file.map(|file| fmt::layer().with_writer(file).with_ansi(false).json());
        registry
            .with(fmt::layer().with_writer(io::stderr).json())
            .with(file_layer)
            .try_init()
    } else {
        let file_layer =
            log_file.map(|file| fmt::layer().with_writer(file).with_ansi(false).pretty());
        registry
            .with(fmt::layer().with_writer(io::stderr).pretty())
            .with(file_layer)
            .try_init()
    };
    installed.map_err(|err| boxed_input_error(&format!("Failed to initialize logging: {err}")))?;

    Ok(true)
}
