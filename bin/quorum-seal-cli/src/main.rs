mod cli;
mod commands;
mod error;

use std::{ffi::OsStr, path::Path, process, str::FromStr};

use clap::Parser;
use quorum_seal::document::TrailerContainer;
use quorum_seal_server::{
    config::{ConfigFile, LoggingConfig},
    Config, QuorumSealServerError, RoomService,
};
use tracing::{debug, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Targets, prelude::*};

use cli::{Cli, Command};
use error::CliError;

#[tokio::main]
pub async fn main() {
    match run_main().await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

/// Returns `false` if the command ran but reported a negative result.
pub async fn run_main() -> Result<bool, CliError> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_config_file(ConfigFile::from_str("")?)?,
    };

    // We keep `_logging` around for the lifetime of the program. On drop, this
    // value will ensure that our logs are flushed.
    let _logging = init_logging(&config.logging)?;
    debug!("Logging config settings: {:?}", config.logging);

    let service = RoomService::new(config, TrailerContainer);
    match cli.command {
        Command::Split { formula, out } => commands::split(&service, &formula, &out).await?,
        Command::Sign {
            document,
            shares,
            out,
        } => commands::sign(&service, &document, &shares, &out).await?,
        Command::Reissue {
            shares,
            formula,
            out,
        } => commands::reissue(&service, &shares, &formula, &out).await?,
        Command::Verify {
            document,
            public_key,
        } => {
            let valid = commands::verify(&service, &document, &public_key).await?;
            println!("{}", if valid { "valid" } else { "invalid" });
            return Ok(valid);
        }
    }
    Ok(true)
}

/// Object representing our logging. Should be kept around as our logging
/// writers return guards that should live for the lifetime of the program. Do
/// not do anything with the guards. Just make sure they are not dropped!
#[derive(Default)]
struct LoggingGuards {
    _all_layer_guard: Option<WorkerGuard>,
    _quorum_seal_layer_guard: Option<WorkerGuard>,
}

/// Initialize our logging with different logging layers:
/// 1) Log messages at `stdout_log_level` (or higher) from our quorum_seal*
/// crates to standard out.
/// 2) (OPTIONAL) Log all messages (TRACE or higher) from our quorum_seal*
/// crates to the path specified by `quorum_seal_logs_file_name`.
/// 3) (OPTIONAL) Log all messages (TRACE or higher) from any crate to the path
/// specified by `all_logs_file_name`.
///
/// Returns an object which should be kept around for the lifetime of the
/// program.
fn init_logging(config: &LoggingConfig) -> Result<LoggingGuards, QuorumSealServerError> {
    let stdout_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_filter(our_targets_filter(config.stdout_log_level));

    let logging_guards = match &config.log_files {
        Some(file_config) => {
            let (all_logs_dir, all_logs_file) = get_paths(&file_config.all_logs_file_name)?;
            let (quorum_seal_logs_dir, quorum_seal_logs_file) =
                get_paths(&file_config.quorum_seal_logs_file_name)?;

            // This layer logs all events into a file.
            let all_appender = tracing_appender::rolling::hourly(all_logs_dir, all_logs_file);
            let (non_blocking, _all_layer_guard) = tracing_appender::non_blocking(all_appender);
            let all_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking);

            // Log all events generated by our crates into a file.
            let quorum_seal_appender =
                tracing_appender::rolling::hourly(quorum_seal_logs_dir, quorum_seal_logs_file);
            let (non_blocking, _quorum_seal_layer_guard) =
                tracing_appender::non_blocking(quorum_seal_appender);
            let quorum_seal_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(our_targets_filter(Level::TRACE));

            tracing_subscriber::registry()
                .with(stdout_layer)
                .with(quorum_seal_layer)
                .with(all_layer)
                .init();

            LoggingGuards {
                _all_layer_guard: Some(_all_layer_guard),
                _quorum_seal_layer_guard: Some(_quorum_seal_layer_guard),
            }
        }
        None => {
            tracing_subscriber::registry().with(stdout_layer).init();
            LoggingGuards::default()
        }
    };

    Ok(logging_guards)
}

/// Return the path directory and the file name. Needed for passing to
/// tracing_appender.
fn get_paths(path: &Path) -> Result<(&Path, &OsStr), QuorumSealServerError> {
    let dir = path
        .parent()
        .ok_or_else(|| QuorumSealServerError::InvalidLogFilePath(path.into()))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| QuorumSealServerError::InvalidLogFilePath(path.into()))?;
    Ok((dir, file_name))
}

/// Filter for events originating from our quorum_seal* crates.
fn our_targets_filter(level: Level) -> Targets {
    Targets::new()
        .with_target("quorum_seal_cli", level)
        .with_target("quorum_seal_server", level)
        .with_target("quorum_seal", level)
}
