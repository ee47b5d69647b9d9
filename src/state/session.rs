//! The live timer session: controller, config and blink phase together

use serde::Serialize;

use crate::timer::{
    blink_active, compute_frame, BlinkPhase, ConfigUpdate, DisplayFrame, TimerConfig,
    TimerController, TimerRuntimeState, TransportAction,
};

/// Everything a rendering surface or editor needs after a change
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub runtime: TimerRuntimeState,
    pub config: TimerConfig,
    pub frame: DisplayFrame,
    /// Bumped each time the timer enters Running
    pub tick_epoch: u64,
    /// Bumped each time the blink condition starts to hold
    pub blink_epoch: u64,
}

/// Single owner of the runtime state and the config snapshot it is rendered with.
///
/// The blink phase is kept visible whenever the blink condition does not hold,
/// so re-entering the condition always starts from a visible frame.
///
/// Every entry into Running or into the blink condition gets a new epoch, even
/// when the leave and re-enter happen between two observations. Cadences key
/// their schedule on the epoch so a re-entry never inherits a stale deadline.
#[derive(Debug, Clone, Default)]
pub struct Session {
    controller: TimerController,
    config: TimerConfig,
    blink: BlinkPhase,
    ticking: bool,
    blinking: bool,
    tick_epoch: u64,
    blink_epoch: u64,
}

impl Session {
    pub fn new(config: TimerConfig) -> Self {
        let mut session = Self {
            config,
            ..Self::default()
        };
        session.settle();
        session
    }

    pub fn runtime(&self) -> TimerRuntimeState {
        self.controller.state()
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn blink_phase(&self) -> BlinkPhase {
        self.blink
    }

    pub fn tick_epoch(&self) -> u64 {
        self.tick_epoch
    }

    pub fn blink_epoch(&self) -> u64 {
        self.blink_epoch
    }

    pub fn is_blinking(&self) -> bool {
        let runtime = self.controller.state();
        blink_active(runtime.elapsed_seconds, &self.config, runtime.status)
    }

    pub fn frame(&self) -> DisplayFrame {
        let runtime = self.controller.state();
        compute_frame(runtime.elapsed_seconds, &self.config, runtime.status, self.blink)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            runtime: self.runtime(),
            config: self.config.clone(),
            frame: self.frame(),
            tick_epoch: self.tick_epoch,
            blink_epoch: self.blink_epoch,
        }
    }

    pub fn transport(&mut self, action: TransportAction) -> bool {
        let changed = self.controller.apply(action);
        self.settle();
        changed
    }

    pub fn tick(&mut self) -> bool {
        let changed = self.controller.tick();
        self.settle();
        changed
    }

    /// Flip the blink phase. Ignored when the blink condition no longer holds,
    /// which covers a cadence callback racing a pause.
    pub fn toggle_blink(&mut self) -> bool {
        if !self.is_blinking() {
            return false;
        }
        self.blink.toggle();
        true
    }

    pub fn replace_config(&mut self, config: TimerConfig) -> bool {
        let changed = self.config != config;
        self.config = config;
        self.settle();
        changed
    }

    pub fn update_config(&mut self, update: ConfigUpdate) -> bool {
        let mut next = self.config.clone();
        next.apply(update);
        self.replace_config(next)
    }

    fn settle(&mut self) {
        let ticking = self.controller.is_running();
        if ticking && !self.ticking {
            self.tick_epoch += 1;
        }
        self.ticking = ticking;

        let blinking = self.is_blinking();
        if blinking && !self.blinking {
            self.blink_epoch += 1;
        }
        self.blinking = blinking;

        if !blinking {
            self.blink.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerStatus;

    fn blinking_session() -> Session {
        let mut session = Session::new(TimerConfig {
            limit_seconds: 2,
            ..TimerConfig::default()
        });
        session.transport(TransportAction::Start);
        session.tick();
        session.tick();
        assert!(session.is_blinking());
        session
    }

    #[test]
    fn visible_strictly_alternates_while_blinking() {
        let mut session = blinking_session();
        let mut seen = Vec::new();
        for _ in 0..5 {
            assert!(session.toggle_blink());
            seen.push(session.frame().visible);
        }
        assert_eq!(seen, vec![false, true, false, true, false]);
    }

    #[test]
    fn pausing_mid_blink_shows_the_message() {
        let mut session = blinking_session();
        session.toggle_blink();
        assert!(!session.frame().visible);

        session.transport(TransportAction::Pause);
        assert_eq!(session.runtime().status, TimerStatus::Paused);
        assert!(session.frame().visible);
        assert!(!session.toggle_blink());
        assert!(session.frame().visible);

        session.transport(TransportAction::Start);
        assert!(session.frame().visible);
        session.toggle_blink();
        assert!(!session.frame().visible);
    }

    #[test]
    fn disabling_blink_in_editor_restores_visibility() {
        let mut session = blinking_session();
        session.toggle_blink();

        session.update_config(ConfigUpdate {
            final_message_blink: Some(false),
            ..ConfigUpdate::default()
        });
        assert!(session.frame().visible);
        assert!(session.blink_phase().visible);
    }

    #[test]
    fn config_edits_apply_to_the_next_frame() {
        let mut session = Session::new(TimerConfig::default());
        assert_eq!(session.frame().text, "00:00");

        assert!(session.update_config(ConfigUpdate {
            limit_seconds: Some(0.0),
            final_message: Some("GO".to_string()),
            ..ConfigUpdate::default()
        }));
        assert_eq!(session.frame().text, "GO");
        assert!(!session.update_config(ConfigUpdate::default()));
    }

    #[test]
    fn leaving_and_reentering_running_starts_a_new_epoch() {
        let mut session = Session::new(TimerConfig::default());
        assert_eq!(session.tick_epoch(), 0);

        session.transport(TransportAction::Start);
        assert_eq!(session.tick_epoch(), 1);
        session.tick();
        session.transport(TransportAction::Start);
        assert_eq!(session.tick_epoch(), 1);

        session.transport(TransportAction::Pause);
        session.transport(TransportAction::Start);
        assert_eq!(session.snapshot().tick_epoch, 2);

        session.transport(TransportAction::Stop);
        session.transport(TransportAction::Start);
        assert_eq!(session.tick_epoch(), 3);
    }

    #[test]
    fn toggling_blink_off_and_on_starts_a_new_blink_epoch() {
        let mut session = blinking_session();
        assert_eq!(session.blink_epoch(), 1);

        session.toggle_blink();
        assert_eq!(session.blink_epoch(), 1);

        session.update_config(ConfigUpdate {
            final_message_blink: Some(false),
            ..ConfigUpdate::default()
        });
        session.update_config(ConfigUpdate {
            final_message_blink: Some(true),
            ..ConfigUpdate::default()
        });
        assert!(session.is_blinking());
        assert!(session.frame().visible);
        assert_eq!(session.snapshot().blink_epoch, 2);
    }
}
