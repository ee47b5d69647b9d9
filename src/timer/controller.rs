//! Transport state machine for the timer
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//!   ^                |                  |
//!   +------stop------+-------stop-------+
//! ```
//!
//! `reset` zeroes the elapsed time and leaves the status alone, so a
//! running timer keeps running from zero and a paused one stays paused.
//! Reaching the limit is not a state here; the controller keeps counting
//! until stopped and the display decides what "limit reached" looks like.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

/// Transient runtime state, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRuntimeState {
    pub elapsed_seconds: u64,
    pub status: TimerStatus,
}

impl Default for TimerRuntimeState {
    fn default() -> Self {
        Self {
            elapsed_seconds: 0,
            status: TimerStatus::Idle,
        }
    }
}

/// The four transport operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportAction {
    Start,
    Pause,
    Stop,
    Reset,
}

impl TransportAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportAction::Start => "start",
            TransportAction::Pause => "pause",
            TransportAction::Stop => "stop",
            TransportAction::Reset => "reset",
        }
    }
}

/// Sole owner and writer of [`TimerRuntimeState`].
///
/// Every operation is total. Commands return `true` when they changed the
/// state so callers can skip notifying on no-ops.
#[derive(Debug, Clone, Default)]
pub struct TimerController {
    state: TimerRuntimeState,
}

impl TimerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerRuntimeState {
        self.state
    }

    pub fn status(&self) -> TimerStatus {
        self.state.status
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.state.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state.status == TimerStatus::Running
    }

    pub fn start(&mut self) -> bool {
        match self.state.status {
            TimerStatus::Idle | TimerStatus::Paused => {
                self.state.status = TimerStatus::Running;
                true
            }
            TimerStatus::Running => false,
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.state.status != TimerStatus::Running {
            return false;
        }
        self.state.status = TimerStatus::Paused;
        true
    }

    /// Back to `Idle` at zero, from any state.
    pub fn stop(&mut self) -> bool {
        let before = self.state;
        self.state = TimerRuntimeState::default();
        before != self.state
    }

    /// Zero the elapsed time without touching the status.
    pub fn reset(&mut self) -> bool {
        let changed = self.state.elapsed_seconds != 0;
        self.state.elapsed_seconds = 0;
        changed
    }

    /// Advance by exactly one second if running. No catch-up for missed ticks.
    pub fn tick(&mut self) -> bool {
        if self.state.status != TimerStatus::Running {
            return false;
        }
        self.state.elapsed_seconds = self.state.elapsed_seconds.saturating_add(1);
        true
    }

    pub fn apply(&mut self, action: TransportAction) -> bool {
        match action {
            TransportAction::Start => self.start(),
            TransportAction::Pause => self.pause(),
            TransportAction::Stop => self.stop(),
            TransportAction::Reset => self.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_at(seconds: u64) -> TimerController {
        let mut controller = TimerController::new();
        controller.start();
        for _ in 0..seconds {
            controller.tick();
        }
        controller
    }

    #[test]
    fn starts_idle_at_zero() {
        let controller = TimerController::new();
        assert_eq!(controller.status(), TimerStatus::Idle);
        assert_eq!(controller.elapsed_seconds(), 0);
    }

    #[test]
    fn ticks_only_count_while_running() {
        let mut controller = TimerController::new();
        assert!(!controller.tick());

        controller.start();
        controller.tick();
        controller.tick();
        controller.pause();
        controller.tick();
        controller.tick();
        controller.start();
        controller.tick();

        assert_eq!(controller.elapsed_seconds(), 3);
    }

    #[test]
    fn start_is_idempotent() {
        let mut once = TimerController::new();
        once.start();

        let mut twice = TimerController::new();
        assert!(twice.start());
        assert!(!twice.start());

        assert_eq!(once.state(), twice.state());
    }

    #[test]
    fn pause_preserves_elapsed_and_is_noop_when_not_running() {
        let mut controller = running_at(7);
        assert!(controller.pause());
        assert_eq!(controller.elapsed_seconds(), 7);
        assert!(!controller.pause());

        let mut idle = TimerController::new();
        assert!(!idle.pause());
        assert_eq!(idle.status(), TimerStatus::Idle);
    }

    #[test]
    fn stop_always_returns_to_idle_zero() {
        for mut controller in [TimerController::new(), running_at(4), {
            let mut c = running_at(9);
            c.pause();
            c
        }] {
            controller.stop();
            assert_eq!(controller.state(), TimerRuntimeState::default());
        }
    }

    #[test]
    fn reset_keeps_running() {
        let mut controller = running_at(12);
        controller.reset();
        assert_eq!(controller.elapsed_seconds(), 0);
        assert_eq!(controller.status(), TimerStatus::Running);

        controller.tick();
        assert_eq!(controller.elapsed_seconds(), 1);
    }

    #[test]
    fn reset_keeps_paused() {
        let mut controller = running_at(12);
        controller.pause();
        controller.reset();
        assert_eq!(controller.elapsed_seconds(), 0);
        assert_eq!(controller.status(), TimerStatus::Paused);

        controller.tick();
        assert_eq!(controller.elapsed_seconds(), 0);
    }

    #[test]
    fn keeps_counting_past_any_limit() {
        let controller = running_at(400);
        assert_eq!(controller.elapsed_seconds(), 400);
        assert!(controller.is_running());
    }

    #[test]
    fn apply_dispatches_actions() {
        let mut controller = TimerController::new();
        assert!(controller.apply(TransportAction::Start));
        controller.tick();
        assert!(controller.apply(TransportAction::Pause));
        assert!(controller.apply(TransportAction::Reset));
        assert!(!controller.apply(TransportAction::Reset));
        assert!(controller.apply(TransportAction::Stop));
        assert!(!controller.apply(TransportAction::Stop));
    }
}
