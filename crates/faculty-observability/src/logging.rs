use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging.
///
/// # Configuration
///
/// - **Log Level**: `LOG_LEVEL` environment variable (default: "info"), or a full
///   `RUST_LOG` directive which takes precedence
/// - **Format**: `LOG_FORMAT=json` switches from the compact format to JSON lines
/// - **Filtering**: Noisy dependencies filtered to warn level
/// - **Writer**: stderr, so command output on stdout stays machine-readable
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_console_logging() -> bool {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "faculty={level},faculty_db={level},sqlx=warn",
            level = log_level
        ))
    });

    let console_layer = if json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
}
