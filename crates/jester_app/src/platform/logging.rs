//! Logging initialization for the jester binary.
//!
//! Terminal output goes to stderr so stdout stays reserved for the joke list.

use std::fs::{File, OpenOptions};
use std::path::Path;

use jester_engine::ensure_output_dir;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "jester.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to stderr only.
    Terminal,
    /// Write to stderr and append to `jester.log` in the data directory.
    Both,
}

/// Initialize the global logger.
///
/// The terminal only shows warnings unless `verbose` is set; the log file
/// always records at least info level.
pub fn initialize(destination: LogDestination, verbose: bool, data_dir: &Path) {
    let (term_level, file_level) = if verbose {
        (LevelFilter::Debug, LevelFilter::Debug)
    } else {
        (LevelFilter::Warn, LevelFilter::Info)
    };

    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if destination == LogDestination::Both {
        if let Some(file_logger) = create_file_logger(file_level, config, data_dir) {
            loggers.push(file_logger);
        }
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    data_dir: &Path,
) -> Option<Box<WriteLogger<File>>> {
    if let Err(err) = ensure_output_dir(data_dir) {
        eprintln!("Warning: Could not create data directory {:?}: {}", data_dir, err);
        return None;
    }
    let log_path = data_dir.join(LOG_FILENAME);
    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not open log file at {:?}: {}", log_path, err);
            None
        }
    }
}
