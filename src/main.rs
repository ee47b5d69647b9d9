//! Progressive Timer - live preview server for a count-up timer overlay
//!
//! This is the main entry point for the progressive-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use progressive_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::cadence_supervisor_task,
    utils::{register_shutdown_signals, wait_for_shutdown},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("progressive_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting progressive-timer server v{}", env!("CARGO_PKG_VERSION"));

    let timer_config = config.load_timer_config()?;
    let cadence = config.cadence_settings();
    info!(
        "Configuration: host={}, port={}, limit={}, tick={:?}, blink={:?}",
        config.host,
        config.port,
        if timer_config.limit_enabled {
            format!("{}s", timer_config.limit_seconds)
        } else {
            "off".to_string()
        },
        cadence.tick_interval,
        cadence.blink_interval
    );

    let generator = config.code_generator();
    if !generator.has_api_key() {
        warn!("No GEMINI_API_KEY configured, /generate will be unavailable");
    }

    // Create application state
    let state = Arc::new(AppState::new(
        config.host.clone(),
        config.port,
        timer_config,
        cadence,
        generator,
    ));

    // Start the cadence supervisor background task
    let supervisor = tokio::spawn(cadence_supervisor_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    let signals = register_shutdown_signals()?;

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start|pause|stop|reset - Transport controls");
    info!("  GET  /timer                        - Runtime state");
    info!("  GET  /frame                        - Current display frame");
    info!("  GET|PUT|PATCH /config              - Timer config");
    info!("  GET  /fonts                        - Standard font list");
    info!("  POST /generate                     - Generate plugin source");
    info!("  GET  /status                       - Session status");
    info!("  GET  /health                       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = wait_for_shutdown(signals) => {
            info!("Shutdown signal received");
        }
    }

    supervisor.abort();
    info!("Server shutdown complete");
    Ok(())
}
