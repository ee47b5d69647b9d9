//! State management module
//!
//! The timer session and the shared server state that wraps it.

pub mod app_state;
pub mod session;

// Re-export main types
pub use app_state::{AppState, CadenceSettings, GenerationGuard};
pub use session::{Session, SessionSnapshot};
