//! Timer core
//!
//! The controller owns elapsed time and the transport state machine; the
//! display module maps that onto text, color and visibility.

pub mod config;
pub mod controller;
pub mod display;

pub use config::{ConfigUpdate, Rgb, TimerConfig, STANDARD_FONTS};
pub use controller::{TimerController, TimerRuntimeState, TimerStatus, TransportAction};
pub use display::{
    blink_active, compute_frame, format_elapsed, is_limit_reached, remaining_seconds,
    select_band, Band, BlinkPhase, DisplayFrame,
};
