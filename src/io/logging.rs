//! Logger bootstrap.
//!
//! The CLI writes warnings to stderr. The TUI owns the terminal, so it writes
//! rotating log files under `<state dir>/logs` instead. `RUST_LOG` overrides
//! the default level in both cases.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};

const LOG_FILE_BASENAME: &str = "taskpost";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Default level for the CLI (stderr)
pub const CLI_LOG_LEVEL: &str = "warn";
/// Default level for the TUI (log files)
pub const TUI_LOG_LEVEL: &str = "info";

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not start logger: {0}")]
    Start(#[from] FlexiLoggerError),
}

/// Where log records go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Rotating files in this directory
    Files(PathBuf),
}

/// Directory the TUI writes its logs to
pub fn log_dir(state_dir: &Path) -> PathBuf {
    state_dir.join("logs")
}

/// Start the global logger. Only the first call has any effect.
pub fn init(target: LogTarget, default_level: &str) -> Result<(), LoggingError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let logger = Logger::try_with_env_or_str(default_level)?;
    let handle = match &target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()?,
        LogTarget::Files(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()?
        }
    };

    // the handle must outlive the process or buffered records are lost
    let _ = LOGGER.set(handle);
    log::info!(
        "event=app_start status=ok version={} target={:?}",
        env!("CARGO_PKG_VERSION"),
        target
    );
    Ok(())
}
