use std::fs::create_dir_all;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directory that receives the rolling log files.
pub const LOG_DIR: &str = "logs";

/// Install the global tracing subscriber.
///
/// Logs always go to a daily rolling file `logs/<log_file>`; with `log_to_stdout` they are
/// mirrored to stdout with colours. `log_level` is an `EnvFilter` directive such as
/// `results=info,forge=debug`; an invalid directive falls back to `info`.
///
/// The returned guard flushes the file writer on drop, so keep it alive for the whole run.
pub fn init_logging(log_level: &str, log_file: &str, log_to_stdout: bool) -> io::Result<WorkerGuard> {
    init_logging_in(Path::new(LOG_DIR), log_level, log_file, log_to_stdout)
}

pub fn init_logging_in(
    dir: &Path,
    log_level: &str,
    log_file: &str,
    log_to_stdout: bool,
) -> io::Result<WorkerGuard> {
    create_dir_all(dir)?;

    let file_appender = rolling::daily(dir, log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (e.g. by a test harness); keep the existing one.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_dir_and_tolerates_bad_filter() {
        let tmp = std::env::temp_dir().join(format!("results-logger-{}", std::process::id()));
        let guard = init_logging_in(&tmp, "not a [valid filter", "test.log", false).unwrap();
        tracing::info!("logger initialised");
        drop(guard);
        assert!(tmp.is_dir());
        let _ = std::fs::remove_dir_all(&tmp);
    }
}
