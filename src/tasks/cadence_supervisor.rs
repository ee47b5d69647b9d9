//! Background task that keeps the tick and blink cadences in step with the session

use std::sync::Arc;
use tracing::{debug, error, info};

use super::Cadence;
use crate::{
    state::{AppState, SessionSnapshot},
    timer::{blink_active, TimerStatus},
};

/// Should the elapsed-time cadence be running for this snapshot?
pub fn tick_wanted(snapshot: &SessionSnapshot) -> bool {
    snapshot.runtime.status == TimerStatus::Running
}

/// Should the blink cadence be running for this snapshot?
pub fn blink_wanted(snapshot: &SessionSnapshot) -> bool {
    blink_active(
        snapshot.runtime.elapsed_seconds,
        &snapshot.config,
        snapshot.runtime.status,
    )
}

/// Watch session changes and start/stop the two cadences to match.
///
/// Both predicates are re-derived from the latest snapshot on every change,
/// so no call site has to remember to tear a cadence down. The snapshot
/// epochs make a leave and re-enter that the watch channel coalesced into one
/// notification still restart the cadence.
pub async fn cadence_supervisor_task(state: Arc<AppState>) {
    info!(
        "Starting cadence supervisor (tick={:?}, blink={:?})",
        state.cadence.tick_interval, state.cadence.blink_interval
    );

    let mut snapshot_rx = state.subscribe();
    let mut tick = Cadence::new("tick", state.cadence.tick_interval);
    let mut blink = Cadence::new("blink", state.cadence.blink_interval);

    loop {
        let snapshot = snapshot_rx.borrow_and_update().clone();
        let (want_tick, want_blink) = (tick_wanted(&snapshot), blink_wanted(&snapshot));
        debug!(
            "Reconciling cadences: status={:?}, elapsed={}s, tick={}, blink={}",
            snapshot.runtime.status, snapshot.runtime.elapsed_seconds, want_tick, want_blink
        );

        let tick_state = Arc::clone(&state);
        let on_tick = move || match tick_state.tick() {
            Ok(_) => true,
            Err(e) => {
                error!("Tick failed: {}", e);
                false
            }
        };
        tick.reconcile(want_tick, snapshot.tick_epoch, on_tick);

        let blink_state = Arc::clone(&state);
        let on_blink = move || match blink_state.toggle_blink() {
            Ok(_) => true,
            Err(e) => {
                error!("Blink toggle failed: {}", e);
                false
            }
        };
        blink.reconcile(want_blink, snapshot.blink_epoch, on_blink);

        if snapshot_rx.changed().await.is_err() {
            info!("Session channel closed, stopping cadences");
            break;
        }
    }
}
