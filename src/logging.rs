//! Tracing setup for the desktop application.

/// Install the global tracing subscriber with a non-blocking file appender.
///
/// Logs are written to a rolling-never (single) file in the OS data dir:
///   Linux    ~/.local/share/glassquote/glassquote.log
///   macOS    ~/Library/Application Support/glassquote/glassquote.log
///   Windows  %LOCALAPPDATA%\glassquote\glassquote.log
///
/// Log level is controlled by the RUST_LOG environment variable; defaults
/// to INFO when the variable is absent.
///
/// Returns the appender guard; the caller must keep it alive for the life
/// of the process or buffered log lines are dropped on exit.
pub fn init() -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = dirs::data_local_dir().unwrap_or_default().join("glassquote");

    // Ensure the log directory exists before handing it to the appender.
    // tracing_appender::rolling::never panics if it cannot open the log file,
    // so we create the directory tree first.  Failure is silently ignored —
    // on systems where the directory cannot be created the appender will still
    // attempt to open the file and will panic, but that scenario (unwritable
    // home directory) is already a fatal environment misconfiguration.
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::never(&log_dir, "glassquote.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .init();

    guard
}
