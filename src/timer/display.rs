//! Display mapping: elapsed time + config -> what the overlay shows
//!
//! Everything here is a pure function of its arguments. The only state the
//! display side has is [`BlinkPhase`], and that is flipped by the blink
//! cadence, never by the elapsed-time tick.

use serde::{Deserialize, Serialize};

use super::config::{Rgb, TimerConfig};
use super::controller::TimerStatus;

/// Remaining-time band, from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Band {
    Default,
    Under30,
    Under15,
    Under10,
    Under5,
}

impl Band {
    /// Bands with a threshold, tightest first. Membership is `remaining <= threshold`.
    pub const LADDER: [(i64, Band); 4] = [
        (5, Band::Under5),
        (10, Band::Under10),
        (15, Band::Under15),
        (30, Band::Under30),
    ];

    pub fn color(self, config: &TimerConfig) -> Rgb {
        match self {
            Band::Default => config.color_default,
            Band::Under30 => config.color_30s,
            Band::Under15 => config.color_15s,
            Band::Under10 => config.color_10s,
            Band::Under5 => config.color_5s,
        }
    }
}

/// Visibility flag driven by the blink cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlinkPhase {
    pub visible: bool,
}

impl Default for BlinkPhase {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl BlinkPhase {
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn reset(&mut self) {
        self.visible = true;
    }
}

/// One rendered frame. Derived on demand, never stored as truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFrame {
    pub text: String,
    pub color: Rgb,
    pub visible: bool,
    pub limit_reached: bool,
    pub band: Band,
}

/// `limit - elapsed`, or `None` when no limit applies. May go negative.
pub fn remaining_seconds(elapsed_seconds: u64, config: &TimerConfig) -> Option<i64> {
    if !config.limit_enabled {
        return None;
    }
    let limit = i64::try_from(config.limit_seconds).unwrap_or(i64::MAX);
    let elapsed = i64::try_from(elapsed_seconds).unwrap_or(i64::MAX);
    Some(limit.saturating_sub(elapsed))
}

pub fn is_limit_reached(elapsed_seconds: u64, config: &TimerConfig) -> bool {
    matches!(remaining_seconds(elapsed_seconds, config), Some(r) if r <= 0)
}

pub fn select_band(elapsed_seconds: u64, config: &TimerConfig) -> Band {
    let Some(remaining) = remaining_seconds(elapsed_seconds, config) else {
        return Band::Default;
    };
    Band::LADDER
        .iter()
        .find(|(threshold, _)| remaining <= *threshold)
        .map(|(_, band)| *band)
        .unwrap_or(Band::Default)
}

/// `MM:SS`, or `HH:MM:SS` once there is at least one full hour.
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Whether the final message should currently be blinking.
pub fn blink_active(elapsed_seconds: u64, config: &TimerConfig, status: TimerStatus) -> bool {
    config.final_message_blink
        && status == TimerStatus::Running
        && is_limit_reached(elapsed_seconds, config)
}

pub fn compute_frame(
    elapsed_seconds: u64,
    config: &TimerConfig,
    status: TimerStatus,
    phase: BlinkPhase,
) -> DisplayFrame {
    let limit_reached = is_limit_reached(elapsed_seconds, config);
    let band = select_band(elapsed_seconds, config);

    let text = if limit_reached {
        config.final_message.clone()
    } else {
        format_elapsed(elapsed_seconds)
    };

    let visible = !blink_active(elapsed_seconds, config, status) || phase.visible;

    DisplayFrame {
        text,
        color: band.color(config),
        visible,
        limit_reached,
        band,
    }
}
