use std::path::Path;

use sysinfo::System;

pub const LOG_TARGET_STARTUP: &str = "learn_eng::startup";

/// Initialize tracing with file rotation
///
/// Logs are written to `<app_dir>/logs/learn-eng.YYYY-MM-DD.log`.
///
/// Log output:
/// - Debug builds: Console + File
/// - Release builds: File only
///
/// The returned guard flushes the file writer when dropped, so keep it alive
/// for the lifetime of the program.
pub fn initialize_tracing(app_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = app_dir.join("logs");

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "learn-eng.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Configure filter (info level by default)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .try_init();
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .try_init();
    }

    tracing::info!("Log directory: {}", log_dir.display());
    guard
}

pub fn log_runtime_environment() {
    let version = env!("CARGO_PKG_VERSION");
    let os_name = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| "Unknown OS".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "Unknown Kernel".to_string());
    let architecture = std::env::consts::ARCH;

    tracing::info!(target: LOG_TARGET_STARTUP, "Starting Learn English v{} on ({})", version, architecture);
    tracing::info!(target: LOG_TARGET_STARTUP, "Operating System: {} (kernel {})", os_name, kernel);
}
