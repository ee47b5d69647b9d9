//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{extract::State, response::Json};
use chrono::Utc;
use tracing::{info, warn};

use super::responses::{GenerateResponse, HealthResponse, StatusResponse, TransportResponse};
use crate::{
    error::AppResult,
    state::AppState,
    timer::{
        ConfigUpdate, DisplayFrame, TimerConfig, TimerRuntimeState, TransportAction,
        STANDARD_FONTS,
    },
};

fn transport(state: &AppState, action: TransportAction) -> AppResult<Json<TransportResponse>> {
    let (changed, snapshot) = state.transport(action)?;
    Ok(Json(TransportResponse::new(action.as_str(), changed, snapshot)))
}

/// Handle POST /timer/start
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<TransportResponse>> {
    transport(&state, TransportAction::Start)
}

/// Handle POST /timer/pause
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<TransportResponse>> {
    transport(&state, TransportAction::Pause)
}

/// Handle POST /timer/stop
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<TransportResponse>> {
    transport(&state, TransportAction::Stop)
}

/// Handle POST /timer/reset
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<TransportResponse>> {
    transport(&state, TransportAction::Reset)
}

/// Handle GET /timer
pub async fn timer_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<TimerRuntimeState>> {
    Ok(Json(state.runtime()?))
}

/// Handle GET /frame - what the overlay should render right now
pub async fn frame_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<DisplayFrame>> {
    Ok(Json(state.frame()?))
}

/// Handle GET /config
pub async fn get_config_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<TimerConfig>> {
    Ok(Json(state.config()?))
}

/// Handle PUT /config - replace the whole config, missing fields take factory defaults
pub async fn put_config_handler(
    State(state): State<Arc<AppState>>,
    Json(config): Json<TimerConfig>,
) -> AppResult<Json<TimerConfig>> {
    Ok(Json(state.replace_config(config)?.config))
}

/// Handle PATCH /config - merge the given fields into the live config
pub async fn patch_config_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ConfigUpdate>,
) -> AppResult<Json<TimerConfig>> {
    Ok(Json(state.update_config(update)?.config))
}

/// Handle GET /fonts
pub async fn fonts_handler() -> Json<Vec<&'static str>> {
    Json(STANDARD_FONTS.to_vec())
}

/// Handle POST /generate - request plugin source for the current config
pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<GenerateResponse>> {
    let _slot = state.begin_generation().inspect_err(|e| warn!("{}", e))?;
    let config = state.config()?;

    info!("Generating plugin source (limit={}s)", config.limit_seconds);
    let generated = state.generator.generate(&config).await?;

    Ok(Json(GenerateResponse {
        code: generated.code,
        model: generated.model,
        generated_at: Utc::now(),
    }))
}

/// Handle GET /status - Return current session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<StatusResponse>> {
    let snapshot = state.snapshot()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        runtime: snapshot.runtime,
        frame: snapshot.frame,
        generating: state.is_generating(),
        generator_ready: state.generator.has_api_key(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
