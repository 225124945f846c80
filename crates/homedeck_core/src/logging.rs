//! Logging bootstrap for the core crate.
//!
//! # Responsibility
//! - Start rotating file logs exactly once per process.
//! - Install a panic hook that records sanitized panic summaries.
//!
//! # Invariants
//! - Re-initialization with the same settings is a no-op.
//! - Conflicting re-initialization is rejected, never silently applied.
//! - Bootstrap never panics.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "homedeck";
const ROTATE_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 4;
const PANIC_SUMMARY_CHARS: usize = 200;

static ACTIVE: OnceCell<LogState> = OnceCell::new();
static HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LogState {
    level: &'static str,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts file logging, or validates an earlier identical initialization.
///
/// Warnings and errors are duplicated to stderr so CLI runs surface
/// problems without tailing the log file.
///
/// # Errors
/// - Unsupported `level` values.
/// - A relative or uncreatable `dir`.
/// - A previous initialization with different settings.
pub fn init_logging(level: &str, dir: &Path) -> Result<(), String> {
    let level = coerce_level(level)?;
    if !dir.is_absolute() {
        return Err(format!(
            "log directory must be absolute, got `{}`",
            dir.display()
        ));
    }
    let dir = dir.to_path_buf();

    let state = {
        let dir = dir.clone();
        ACTIVE.get_or_try_init(|| start_logger(level, dir))?
    };
    if state.level != level || state.dir != dir {
        return Err(format!(
            "logging already active with level={} dir={}; refusing to reconfigure",
            state.level,
            state.dir.display()
        ));
    }
    Ok(())
}

fn start_logger(level: &'static str, dir: PathBuf) -> Result<LogState, String> {
    std::fs::create_dir_all(&dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(dir.as_path())
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=logging_start module=core status=ok level={} dir={} version={}",
        level,
        dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(LogState {
        level,
        dir,
        _handle: handle,
    })
}

/// Returns `(level, directory)` once logging is active.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE.get().map(|state| (state.level, state.dir.clone()))
}

/// Default level per build profile: `debug` for debug builds, else `info`.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn coerce_level(value: &str) -> Result<&'static str, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn install_panic_hook() {
    if HOOK_INSTALLED.set(()).is_err() {
        return;
    }
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic module=core status=error location={} summary={}",
            location,
            panic_summary(panic_info)
        );
        previous(panic_info);
    }));
}

fn panic_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(text) = info.payload().downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = info.payload().downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    };
    // panic text can quote user input; keep it one line and capped
    let flat = payload.replace(['\n', '\r'], " ");
    let mut summary: String = flat.chars().take(PANIC_SUMMARY_CHARS).collect();
    if flat.chars().count() > PANIC_SUMMARY_CHARS {
        summary.push_str("...");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::{coerce_level, init_logging, logging_status};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "homedeck-logging-{suffix}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn coerce_level_normalizes_case_and_whitespace() {
        assert_eq!(coerce_level(" INFO ").expect("info coerces"), "info");
        assert!(coerce_level("chatty").is_err());
    }

    #[test]
    fn relative_dir_is_rejected_without_starting() {
        let err = init_logging("info", PathBuf::from("logs/dev").as_path())
            .expect_err("relative dir rejected");
        assert!(err.contains("absolute"));
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let dir = unique_temp_dir("first");
        let other = unique_temp_dir("second");

        init_logging("info", &dir).expect("first init");
        init_logging("info", &dir).expect("same settings are a no-op");

        let level_err = init_logging("debug", &dir).expect_err("level conflict");
        assert!(level_err.contains("refusing to reconfigure"));
        let dir_err = init_logging("info", &other).expect_err("dir conflict");
        assert!(dir_err.contains("refusing to reconfigure"));

        let (level, active_dir) = logging_status().expect("logging active");
        assert_eq!(level, "info");
        assert_eq!(active_dir, dir);
    }
}
