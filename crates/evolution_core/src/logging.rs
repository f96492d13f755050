//! Opt-in file logging for hosts of the decoder.
//!
//! # Responsibility
//! - Validate a requested [`LogConfig`] and start one rolling file logger per process.
//! - Record panics as single-line `error` events before the previous hook runs.
//!
//! # Invariants
//! - Decoding never installs a logger by itself.
//! - A second request with an equal config succeeds without side effects.
//! - A second request with a different config fails with [`LoggingError::Conflict`].
//! - Nothing here panics.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const FILE_BASENAME: &str = "evolution";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_TEXT_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Level and directory of the file logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub directory: PathBuf,
}

impl LogConfig {
    /// Validates raw host input.
    ///
    /// `level` is matched case-insensitively against `trace|debug|info|warn|error`;
    /// `directory` must be a non-empty absolute path.
    pub fn parse(level: &str, directory: &str) -> Result<Self, LoggingError> {
        let level = match LevelFilter::from_str(level.trim()) {
            Ok(LevelFilter::Off) | Err(_) => {
                return Err(LoggingError::InvalidLevel(level.trim().to_string()))
            }
            Ok(filter) => filter,
        };

        let directory = Path::new(directory.trim());
        if directory.as_os_str().is_empty() || !directory.is_absolute() {
            return Err(LoggingError::InvalidDirectory(directory.to_path_buf()));
        }

        Ok(Self {
            level,
            directory: directory.to_path_buf(),
        })
    }
}

#[derive(Debug)]
pub enum LoggingError {
    InvalidLevel(String),
    InvalidDirectory(PathBuf),
    CreateDirectory {
        directory: PathBuf,
        source: std::io::Error,
    },
    Conflict {
        active: LogConfig,
        requested: LogConfig,
    },
    Backend(FlexiLoggerError),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(level) => write!(
                f,
                "unsupported log level `{level}` (use trace, debug, info, warn or error)"
            ),
            Self::InvalidDirectory(directory) => write!(
                f,
                "log directory must be a non-empty absolute path, got `{}`",
                directory.display()
            ),
            Self::CreateDirectory { directory, source } => write!(
                f,
                "cannot create log directory `{}`: {source}",
                directory.display()
            ),
            Self::Conflict { active, requested } => write!(
                f,
                "file logging is active at {} in `{}`; cannot reconfigure to {} in `{}`",
                active.level,
                active.directory.display(),
                requested.level,
                requested.directory.display()
            ),
            Self::Backend(err) => write!(f, "logger backend failed to start: {err}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(err: FlexiLoggerError) -> Self {
        Self::Backend(err)
    }
}

struct ActiveLogger {
    config: LogConfig,
    _handle: LoggerHandle,
}

/// Parses `level` and `log_dir` and starts file logging with them.
///
/// # Errors
/// Any [`LoggingError`]; a conflicting repeat call reports both configs.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let requested = LogConfig::parse(level, log_dir)?;
    let active = match ACTIVE.get() {
        Some(active) => active,
        None => ACTIVE.get_or_try_init(|| start(requested.clone()))?,
    };

    if active.config == requested {
        Ok(())
    } else {
        Err(LoggingError::Conflict {
            active: active.config.clone(),
            requested,
        })
    }
}

/// Config of the running file logger, if any.
pub fn logging_status() -> Option<LogConfig> {
    ACTIVE.get().map(|active| active.config.clone())
}

/// `debug` in debug builds, otherwise `info`.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(config: LogConfig) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&config.directory).map_err(|source| {
        LoggingError::CreateDirectory {
            directory: config.directory.clone(),
            source,
        }
    })?;

    let specification: LogSpecification = LogSpecification::builder().default(config.level).build();
    let handle = Logger::with(specification)
        .log_to_file(
            FileSpec::default()
                .directory(&config.directory)
                .basename(FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    if PANIC_HOOK.set(()).is_ok() {
        chain_panic_hook();
    }

    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} version={}",
        config.level,
        config.directory.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        config,
        _handle: handle,
    })
}

fn chain_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let location = panic.location().map_or_else(
            || "unknown".to_string(),
            |at| format!("{}:{}", at.file(), at.line()),
        );
        let payload = one_line(
            panic_text(panic.payload()).unwrap_or("non-string panic payload"),
            PANIC_TEXT_LIMIT,
        );
        error!(
            "event=panic_captured module=logging status=error location={} payload={}",
            location, payload
        );
        previous(panic);
    }));
}

fn panic_text(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

/// Control characters become spaces; more than `limit` chars are cut and marked with `...`.
fn one_line(text: &str, limit: usize) -> String {
    let mut flattened: String = text
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    if let Some((cut, _)) = flattened.char_indices().nth(limit) {
        flattened.truncate(cut);
        flattened.push_str("...");
    }
    flattened
}
