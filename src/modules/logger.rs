use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_DIR_ENV: &str = "LOG_DIR";
const LOG_FILE_PREFIX: &str = "flutterwave-proxy.log";

/// Resolve the optional log directory, creating it when missing.
pub fn get_log_dir() -> Result<Option<PathBuf>, String> {
    let Some(dir) = std::env::var_os(LOG_DIR_ENV).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let log_dir = PathBuf::from(dir);

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;
    }

    Ok(Some(log_dir))
}

/// Initialize logger system
///
/// Console output is always on. When `LOG_DIR` is set a daily rolling file
/// layer is added; the returned guard must be held until exit so buffered
/// lines are flushed.
pub fn init_logger() -> Option<WorkerGuard> {
    // Capture log macro logs
    let _ = tracing_log::LogTracer::init();

    let (file_layer, guard) = match get_log_dir() {
        Ok(Some(dir)) => {
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_level(true);
            (Some(layer.boxed()), Some(guard))
        }
        Ok(None) => (None, None),
        Err(e) => {
            eprintln!("Failed to initialize log directory: {}", e);
            (None, None)
        }
    };

    let console_layer = fmt::Layer::new()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    // Default to INFO and above
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init so a second call (tests, embedding) does not panic
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    info!(
        file_logging = guard.is_some(),
        "Logger system initialized"
    );

    guard
}
