//! Logging and profiling setup.

use crate::error::{EditorError, Result};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Log filter variable checked before `RUST_LOG`
pub const LOG_ENV: &str = "CANVAS_EDITOR_LOG";

/// Port of the puffin HTTP server
pub const PROFILER_ADDR: &str = "127.0.0.1:8585";

/// Install the global tracing subscriber.
///
/// The filter comes from `CANVAS_EDITOR_LOG`, then `RUST_LOG`, then `default_level`.
pub fn init_logging(default_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| EditorError::ConfigInvalid(format!("log level {default_level:?}: {e}")))?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| EditorError::Logging(format!("subscriber already set: {e}")))
}

/// Turn on puffin scopes and serve them to `puffin_viewer`.
///
/// The returned server must stay alive for the profiler to stay reachable.
pub fn start_profiler() -> Option<puffin_http::Server> {
    puffin::set_scopes_on(true);
    match puffin_http::Server::new(PROFILER_ADDR) {
        Ok(server) => {
            tracing::info!("puffin profiler listening on {PROFILER_ADDR}");
            Some(server)
        }
        Err(e) => {
            tracing::warn!("failed to start puffin server: {e}");
            None
        }
    }
}
