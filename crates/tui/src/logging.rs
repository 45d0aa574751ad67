use crate::config::{LaunchConfig, DEFAULT_LOG_FILTER};
use std::fs::{self, OpenOptions};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

// The terminal belongs to the UI, so logs only ever go to a file. Failing to
// open it leaves tracing without a subscriber rather than aborting start-up.
pub fn init_logging(config: &LaunchConfig) -> Option<WorkerGuard> {
    if let Some(parent) = config.log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).ok()?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;
    tracing::info!(log_file = %config.log_file.display(), "logging initialised");
    Some(guard)
}
