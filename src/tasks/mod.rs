//! Background tasks module
//!
//! The scheduled cadences that drive the timer while the server runs.

pub mod cadence;
pub mod cadence_supervisor;

// Re-export main types and functions
pub use cadence::Cadence;
pub use cadence_supervisor::{blink_wanted, cadence_supervisor_task, tick_wanted};
