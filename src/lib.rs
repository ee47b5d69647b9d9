//! Progressive Timer - live preview server for a count-up timer overlay
//!
//! This library provides the timer core (transport state machine and display
//! mapping), the cadences that drive it, an HTTP surface for the editor and
//! preview, and the client that turns a config into plugin source.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
pub use timer::{compute_frame, DisplayFrame, TimerConfig, TimerController, TimerStatus};
pub use utils::signals::{register_shutdown_signals, wait_for_shutdown};
