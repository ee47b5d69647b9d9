//! API response structures

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    state::SessionSnapshot,
    timer::{DisplayFrame, TimerRuntimeState},
};

/// Response for the transport endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportResponse {
    pub action: String,
    /// False when the operation was a no-op (e.g. start while running)
    pub changed: bool,
    pub runtime: TimerRuntimeState,
    pub frame: DisplayFrame,
    pub timestamp: DateTime<Utc>,
}

impl TransportResponse {
    pub fn new(action: &str, changed: bool, snapshot: SessionSnapshot) -> Self {
        Self {
            action: action.to_string(),
            changed,
            runtime: snapshot.runtime,
            frame: snapshot.frame,
            timestamp: Utc::now(),
        }
    }
}

/// Response for `POST /generate`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub code: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

/// Enhanced status response with session information
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub runtime: TimerRuntimeState,
    pub frame: DisplayFrame,
    pub generating: bool,
    pub generator_ready: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
