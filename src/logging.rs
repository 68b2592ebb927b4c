use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const DEBUG_ENV: &str = "ORACLE_COUNTER_DEBUG";
pub const LOG_FILE_ENV: &str = "ORACLE_COUNTER_LOG";

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialise logging from `ORACLE_COUNTER_DEBUG` (any value enables debug)
/// and `ORACLE_COUNTER_LOG` (optional log file path).
pub fn init_from_env() {
    let debug = std::env::var_os(DEBUG_ENV).is_some();
    let log_file = std::env::var_os(LOG_FILE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    init(debug, log_file);
}

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// explicitly, in which case `RUST_LOG` may override it.
///
/// When `log_file` is given, output is written to that file through a
/// non-blocking appender instead of stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    // When debug logging is disabled we force `info` level regardless of the
    // `RUST_LOG` environment variable.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let Some(name) = path.file_name() else {
                let _ = builder.try_init();
                return;
            };
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            if builder.with_writer(writer).with_ansi(false).try_init().is_ok() {
                let _ = FILE_GUARD.set(guard);
            }
        }
        None => {
            let _ = builder.try_init();
        }
    }
}
