//! Shared application state

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard,
    },
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{Session, SessionSnapshot};
use crate::{
    error::{AppError, AppResult},
    services::CodeGenerator,
    timer::{ConfigUpdate, DisplayFrame, TimerConfig, TimerRuntimeState, TransportAction},
};

/// Periods of the two scheduled cadences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadenceSettings {
    pub tick_interval: Duration,
    pub blink_interval: Duration,
}

impl Default for CadenceSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1000),
            blink_interval: Duration::from_millis(500),
        }
    }
}

/// State shared between the HTTP handlers and the cadence supervisor
#[derive(Debug)]
pub struct AppState {
    session: Mutex<Session>,
    /// Latest snapshot, republished after every effective change
    snapshot_tx: watch::Sender<SessionSnapshot>,
    pub cadence: CadenceSettings,
    pub generator: CodeGenerator,
    generating: AtomicBool,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    pub fn new(
        host: String,
        port: u16,
        config: TimerConfig,
        cadence: CadenceSettings,
        generator: CodeGenerator,
    ) -> Self {
        let session = Session::new(config);
        let (snapshot_tx, _) = watch::channel(session.snapshot());

        Self {
            session: Mutex::new(session),
            snapshot_tx,
            cadence,
            generator,
            generating: AtomicBool::new(false),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    fn lock_session(&self) -> AppResult<MutexGuard<'_, Session>> {
        self.session.lock().map_err(|_| AppError::Lock("timer session"))
    }

    /// Run a mutation against the session and publish the result if it changed anything.
    fn mutate<F>(&self, mutation: F) -> AppResult<(bool, SessionSnapshot)>
    where
        F: FnOnce(&mut Session) -> bool,
    {
        let mut session = self.lock_session()?;
        let changed = mutation(&mut session);
        let snapshot = session.snapshot();

        // Publish under the lock so the channel never goes back to an older state
        if changed {
            self.snapshot_tx.send_replace(snapshot.clone());
        }
        drop(session);
        Ok((changed, snapshot))
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> AppResult<SessionSnapshot> {
        Ok(self.lock_session()?.snapshot())
    }

    pub fn runtime(&self) -> AppResult<TimerRuntimeState> {
        Ok(self.lock_session()?.runtime())
    }

    pub fn frame(&self) -> AppResult<DisplayFrame> {
        Ok(self.lock_session()?.frame())
    }

    pub fn config(&self) -> AppResult<TimerConfig> {
        Ok(self.lock_session()?.config().clone())
    }

    /// Apply one of the transport operations. No-ops are reported, not rejected.
    pub fn transport(&self, action: TransportAction) -> AppResult<(bool, SessionSnapshot)> {
        let (changed, snapshot) = self.mutate(|session| session.transport(action))?;
        info!(
            "Transport {}: changed={}, status={:?}, elapsed={}s",
            action.as_str(),
            changed,
            snapshot.runtime.status,
            snapshot.runtime.elapsed_seconds
        );
        self.record_action(action.as_str());
        Ok((changed, snapshot))
    }

    /// Elapsed-time cadence callback
    pub fn tick(&self) -> AppResult<bool> {
        let (changed, snapshot) = self.mutate(Session::tick)?;
        if changed {
            debug!("Tick: elapsed={}s", snapshot.runtime.elapsed_seconds);
        }
        Ok(changed)
    }

    /// Blink cadence callback
    pub fn toggle_blink(&self) -> AppResult<bool> {
        let (changed, _) = self.mutate(Session::toggle_blink)?;
        Ok(changed)
    }

    pub fn replace_config(&self, config: TimerConfig) -> AppResult<SessionSnapshot> {
        let (changed, snapshot) = self.mutate(|session| session.replace_config(config))?;
        if changed {
            info!("Timer config replaced");
            self.record_action("config");
        }
        Ok(snapshot)
    }

    pub fn update_config(&self, update: ConfigUpdate) -> AppResult<SessionSnapshot> {
        let (changed, snapshot) = self.mutate(|session| session.update_config(update))?;
        if changed {
            info!("Timer config updated");
            self.record_action("config");
        }
        Ok(snapshot)
    }

    /// Claim the single generation slot, released when the guard drops.
    pub fn begin_generation(&self) -> AppResult<GenerationGuard<'_>> {
        if self
            .generating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::GenerationInProgress);
        }
        Ok(GenerationGuard { flag: &self.generating })
    }

    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::Acquire)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last) = self.last_action.lock() {
            *last = Some((action.to_string(), Utc::now()));
        }
    }

    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|last| last.clone()) {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }

    /// Server uptime as a short human string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Holds the generation slot for the lifetime of one request
#[derive(Debug)]
pub struct GenerationGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
