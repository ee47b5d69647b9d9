//! Utility functions module

pub mod signals;

// Re-export main functions
pub use signals::{register_shutdown_signals, wait_for_shutdown};
