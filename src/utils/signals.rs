//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::info;

/// Register SIGTERM/SIGINT handlers. Done up front so a registration failure
/// aborts startup instead of looking like a shutdown request.
pub fn register_shutdown_signals() -> std::io::Result<Signals> {
    Signals::new([SIGTERM, SIGINT])
}

/// Resolve on the first shutdown signal.
pub async fn wait_for_shutdown(mut signals: Signals) {
    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    signals.handle().close();
}
