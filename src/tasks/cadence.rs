//! Cancellable periodic task

use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// A periodic callback that runs only while its enabling predicate holds.
///
/// The first callback fires one full period after the cadence starts.
/// Stopping aborts the task; starting again always begins a fresh interval.
/// Late callbacks are delayed, never bunched up to catch up.
///
/// Each run belongs to an epoch. Asking for a different epoch while running
/// replaces the task, so a leave and re-enter that was never observed in
/// between still gets a fresh interval.
#[derive(Debug)]
pub struct Cadence {
    name: &'static str,
    period: Duration,
    epoch: u64,
    handle: Option<JoinHandle<()>>,
}

impl Cadence {
    pub fn new(name: &'static str, period: Duration) -> Self {
        Self {
            name,
            period,
            epoch: 0,
            handle: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Start or stop the cadence so that it runs iff `should_run`, restarting
    /// it when `epoch` differs from the one it was started for.
    ///
    /// `on_tick` is only used when a fresh cadence is started. Returning
    /// `false` from it ends the cadence.
    pub fn reconcile<F>(&mut self, should_run: bool, epoch: u64, on_tick: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        if !should_run {
            self.stop();
            return;
        }
        if self.is_running() && self.epoch == epoch {
            return;
        }
        self.stop();
        self.start(epoch, on_tick);
    }

    fn start<F>(&mut self, epoch: u64, mut on_tick: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        debug!(
            "Starting {} cadence every {:?} (epoch {})",
            self.name, self.period, epoch
        );
        self.epoch = epoch;
        let period = self.period;
        let name = self.name;

        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if !on_tick() {
                    debug!("{} cadence ended by its callback", name);
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Stopping {} cadence", self.name);
            handle.abort();
        }
    }
}

impl Drop for Cadence {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };
    use tokio::time::sleep;

    fn counter() -> (Arc<AtomicU32>, impl FnMut() -> bool + Send + 'static) {
        let count = Arc::new(AtomicU32::new(0));
        let inner = Arc::clone(&count);
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
            true
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_period_after_start() {
        let (count, on_tick) = counter();
        let mut cadence = Cadence::new("test", Duration::from_millis(100));
        cadence.reconcile(true, 1, on_tick);
        assert!(cadence.is_running());

        sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(300)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_pending_callbacks() {
        let (count, on_tick) = counter();
        let mut cadence = Cadence::new("test", Duration::from_millis(100));
        cadence.reconcile(true, 1, on_tick);
        sleep(Duration::from_millis(150)).await;

        cadence.reconcile(false, 1, || true);
        assert!(!cadence.is_running());

        sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reentering_starts_a_fresh_interval() {
        let (count, on_tick) = counter();
        let mut cadence = Cadence::new("test", Duration::from_millis(100));
        cadence.reconcile(true, 1, on_tick);
        sleep(Duration::from_millis(90)).await;
        cadence.reconcile(false, 1, || true);

        let (second, on_tick) = counter();
        cadence.reconcile(true, 2, on_tick);
        sleep(Duration::from_millis(50)).await;
        assert_eq!(second.load(Ordering::SeqCst), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(100)).await;
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn running_cadence_is_not_restarted() {
        let (count, on_tick) = counter();
        let mut cadence = Cadence::new("test", Duration::from_millis(100));
        cadence.reconcile(true, 1, on_tick);
        sleep(Duration::from_millis(150)).await;

        let (unused, on_tick) = counter();
        cadence.reconcile(true, 1, on_tick);
        sleep(Duration::from_millis(100)).await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(unused.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn callback_can_end_the_cadence() {
        let mut cadence = Cadence::new("test", Duration::from_millis(10));
        cadence.reconcile(true, 1, || false);
        sleep(Duration::from_millis(50)).await;
        assert!(!cadence.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn new_epoch_restarts_a_running_cadence() {
        let (count, on_tick) = counter();
        let mut cadence = Cadence::new("test", Duration::from_millis(100));
        cadence.reconcile(true, 1, on_tick);
        sleep(Duration::from_millis(90)).await;

        let (second, on_tick) = counter();
        cadence.reconcile(true, 2, on_tick);
        assert!(cadence.is_running());

        sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(60)).await;
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
