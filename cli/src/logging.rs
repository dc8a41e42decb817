//! Logging initialization: stderr by default, or a plain-text file when `LOG_FILE` is set.
//!
//! stdout is reserved for query output.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const WORKSPACE_TARGETS: &[&str] = &["toolrouter", "serve", "config", "cli"];

/// Initializes tracing.
///
/// - **RUST_LOG**: filter, e.g. `info`, `toolrouter=debug`. Default: `info`.
/// - **verbose**: adds `debug` for the workspace crates on top of the filter.
/// - **LOG_FILE**: when set, logs are appended to that file (no ANSI) instead of stderr.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper_util=off"));
    if verbose {
        for target in WORKSPACE_TARGETS {
            filter = filter.add_directive(format!("{}=debug", target).parse()?);
        }
    }

    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_filter(filter);
        tracing_subscriber::registry().with(file_layer).init();
        tracing::info!(path = %path, "toolrouter logging to file");
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter);
        tracing_subscriber::registry().with(stderr_layer).init();
    }
    Ok(())
}
