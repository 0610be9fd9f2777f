//! Timer engine: one count-up or count-down timer driven by a 1-second tick

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use super::{Direction, TimerId, TimerObserver, TimerSnapshot};
use crate::error::TimerError;

/// Interval between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The tick task currently driving an engine
struct Ticker {
    epoch: u64,
    handle: JoinHandle<()>,
}

/// Mutable state, only touched under the engine lock
struct Inner {
    remaining: u64,
    ticker: Option<Ticker>,
    /// Number of `start` transitions so far; identifies the live ticker
    epochs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    Continue,
    Finished,
    /// The ticker was replaced or stopped before this tick got the lock
    Stale,
}

struct Shared {
    id: TimerId,
    initial: u64,
    direction: Direction,
    runtime: Handle,
    inner: Mutex<Inner>,
    updates: watch::Sender<TimerSnapshot>,
    observer: Mutex<Option<Arc<dyn TimerObserver>>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_of(&self, inner: &Inner) -> TimerSnapshot {
        TimerSnapshot {
            id: self.id,
            direction: self.direction,
            initial_seconds: self.initial,
            remaining_seconds: inner.remaining,
            paused: inner.ticker.is_none(),
        }
    }

    /// Publish the latest state to watchers; called with the lock held so
    /// snapshots go out in mutation order.
    fn publish(&self, inner: &Inner) {
        self.updates.send_replace(self.snapshot_of(inner));
    }

    /// Invoke the observer; must be called without the lock held.
    fn notify(&self) {
        let observer = self
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(observer) = observer {
            observer.on_timer_changed(self.id);
        }
    }

    fn start_locked(self: &Arc<Self>, inner: &mut Inner) -> bool {
        if inner.ticker.is_some() {
            return false;
        }

        inner.epochs += 1;
        let epoch = inner.epochs;
        let handle = self.runtime.spawn(run_ticker(Arc::downgrade(self), epoch));
        inner.ticker = Some(Ticker { epoch, handle });
        true
    }

    fn stop_locked(&self, inner: &mut Inner) -> bool {
        match inner.ticker.take() {
            Some(ticker) => {
                ticker.handle.abort();
                true
            }
            None => false,
        }
    }

    /// One tick: advance `remaining`, auto-stop a finished count-down, then
    /// notify exactly once.
    fn advance(&self, epoch: u64) -> TickOutcome {
        let mut inner = self.lock();
        if inner.ticker.as_ref().map(|ticker| ticker.epoch) != Some(epoch) {
            return TickOutcome::Stale;
        }

        let outcome = match self.direction {
            Direction::CountUp => {
                inner.remaining = inner.remaining.saturating_add(1);
                TickOutcome::Continue
            }
            Direction::CountDown => {
                inner.remaining = inner.remaining.saturating_sub(1);
                if inner.remaining == 0 {
                    self.stop_locked(&mut inner);
                    TickOutcome::Finished
                } else {
                    TickOutcome::Continue
                }
            }
        };
        debug!("Timer {} ticked, remaining={}s", self.id, inner.remaining);
        self.publish(&inner);
        drop(inner);

        if outcome == TickOutcome::Finished {
            info!("Timer {} reached zero and stopped", self.id);
        }
        self.notify();
        outcome
    }
}

/// Periodic tick source for one start/stop window of an engine
async fn run_ticker(shared: Weak<Shared>, epoch: u64) {
    let mut interval = time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(shared) = shared.upgrade() else {
            break;
        };
        if shared.advance(epoch) != TickOutcome::Continue {
            break;
        }
    }
}

/// A single count-up or count-down timer.
///
/// The engine starts paused. While running it owns one tokio task that
/// ticks once per [`TICK_INTERVAL`]; dropping the engine aborts that task.
/// All operations are total and safe to call from any thread.
pub struct TimerEngine {
    shared: Arc<Shared>,
}

impl TimerEngine {
    /// Create a paused engine.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context.
    pub fn new(id: TimerId, initial: Duration, direction: Direction) -> Self {
        Self::with_handle(Handle::current(), id, initial, direction)
    }

    /// Create a paused engine whose ticks run on `runtime`.
    pub fn with_handle(runtime: Handle, id: TimerId, initial: Duration, direction: Direction) -> Self {
        let initial = initial.as_secs();
        let remaining = direction.baseline(initial);
        let (updates, _) = watch::channel(TimerSnapshot {
            id,
            direction,
            initial_seconds: initial,
            remaining_seconds: remaining,
            paused: true,
        });

        Self {
            shared: Arc::new(Shared {
                id,
                initial,
                direction,
                runtime,
                inner: Mutex::new(Inner {
                    remaining,
                    ticker: None,
                    epochs: 0,
                }),
                updates,
                observer: Mutex::new(None),
            }),
        }
    }

    /// Create an engine from a signed second count, rejecting negative values.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context.
    pub fn from_seconds(id: TimerId, seconds: i64, direction: Direction) -> Result<Self, TimerError> {
        let seconds = u64::try_from(seconds).map_err(|_| {
            TimerError::invalid_configuration(format!(
                "initial value must not be negative, got {}s",
                seconds
            ))
        })?;
        Ok(Self::new(id, Duration::from_secs(seconds), direction))
    }

    pub fn id(&self) -> TimerId {
        self.shared.id
    }

    pub fn direction(&self) -> Direction {
        self.shared.direction
    }

    pub fn initial(&self) -> Duration {
        Duration::from_secs(self.shared.initial)
    }

    pub fn initial_seconds(&self) -> u64 {
        self.shared.initial
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_secs(self.remaining_seconds())
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.shared.lock().remaining
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().ticker.is_some()
    }

    pub fn is_paused(&self) -> bool {
        !self.is_running()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let inner = self.shared.lock();
        self.shared.snapshot_of(&inner)
    }

    /// Watch the latest state; updated on every mutation including start/stop
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.shared.updates.subscribe()
    }

    /// Install the observer notified after every tick and every reset,
    /// replacing any previous one.
    pub fn set_observer(&self, observer: impl TimerObserver + 'static) {
        *self
            .shared
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(observer));
    }

    pub fn clear_observer(&self) {
        self.shared
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Begin ticking. No-op if already running.
    pub fn start(&self) {
        let mut inner = self.shared.lock();
        if self.shared.start_locked(&mut inner) {
            info!("Timer {} started at {}s", self.shared.id, inner.remaining);
            self.shared.publish(&inner);
        }
    }

    /// Cancel the tick task. No-op if already paused; `remaining` is kept.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        if self.shared.stop_locked(&mut inner) {
            info!("Timer {} stopped at {}s", self.shared.id, inner.remaining);
            self.shared.publish(&inner);
        }
    }

    /// Restore the baseline without changing running-state, then notify.
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        inner.remaining = self.shared.direction.baseline(self.shared.initial);
        info!("Timer {} reset to {}s", self.shared.id, inner.remaining);
        self.shared.publish(&inner);
        drop(inner);

        self.shared.notify();
    }

    /// Start if paused, stop if running. Returns the new paused flag.
    pub fn pause_or_resume(&self) -> bool {
        let mut inner = self.shared.lock();
        if inner.ticker.is_some() {
            self.shared.stop_locked(&mut inner);
            info!("Timer {} paused at {}s", self.shared.id, inner.remaining);
        } else {
            self.shared.start_locked(&mut inner);
            info!("Timer {} resumed at {}s", self.shared.id, inner.remaining);
        }
        self.shared.publish(&inner);
        inner.ticker.is_none()
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        if self.shared.stop_locked(&mut inner) {
            debug!("Timer {} dropped while running, tick task cancelled", self.shared.id);
        }
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(engine: &TimerEngine) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&count);
        engine.set_observer(move |_id: TimerId| {
            observed.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn live_epoch(engine: &TimerEngine) -> Option<u64> {
        engine.shared.lock().ticker.as_ref().map(|ticker| ticker.epoch)
    }

    #[tokio::test(start_paused = true)]
    async fn new_uses_direction_baseline() {
        let down = TimerEngine::new(TimerId(1), secs(90), Direction::CountDown);
        let up = TimerEngine::new(TimerId(2), secs(90), Direction::CountUp);

        assert_eq!(down.remaining_seconds(), 90);
        assert_eq!(up.remaining_seconds(), 0);
        assert_eq!(up.initial_seconds(), 90);
        assert!(down.is_paused() && !down.is_running());
        assert!(up.is_paused() && !up.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn from_seconds_rejects_negative_values() {
        let err = TimerEngine::from_seconds(TimerId(1), -5, Direction::CountDown).unwrap_err();
        assert!(matches!(err, TimerError::InvalidConfiguration { .. }));

        let engine = TimerEngine::from_seconds(TimerId(1), 0, Direction::CountDown).unwrap();
        assert_eq!(engine.remaining_seconds(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_keeps_a_single_ticker() {
        let engine = TimerEngine::new(TimerId(1), secs(10), Direction::CountDown);
        engine.start();
        let epoch = live_epoch(&engine);
        engine.start();

        assert_eq!(live_epoch(&engine), epoch);
        assert_eq!(engine.shared.lock().epochs, 1);
        assert!(engine.is_running());

        time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(engine.remaining_seconds(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_keeps_remaining() {
        let engine = TimerEngine::new(TimerId(1), secs(3), Direction::CountDown);
        engine.start();
        engine.stop();
        engine.stop();

        assert_eq!(engine.remaining_seconds(), 3);
        assert!(engine.is_paused());

        time::sleep(secs(5)).await;
        assert_eq!(engine.remaining_seconds(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_auto_stops_at_zero() {
        let engine = TimerEngine::new(TimerId(1), secs(5), Direction::CountDown);
        let ticks = counting(&engine);
        engine.start();

        time::sleep(Duration::from_millis(5500)).await;
        assert_eq!(engine.remaining_seconds(), 0);
        assert!(engine.is_paused());
        assert_eq!(ticks.load(Ordering::SeqCst), 5);

        time::sleep(secs(3)).await;
        assert_eq!(engine.remaining_seconds(), 0);
        assert_eq!(ticks.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_started_at_zero_stops_on_first_tick() {
        let engine = TimerEngine::new(TimerId(1), secs(0), Direction::CountDown);
        let ticks = counting(&engine);
        engine.start();

        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(engine.remaining_seconds(), 0);
        assert!(engine.is_paused());
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn count_up_ticks_then_resets_without_resuming() {
        let engine = TimerEngine::new(TimerId(1), secs(0), Direction::CountUp);
        let ticks = counting(&engine);
        engine.start();

        time::sleep(Duration::from_millis(10_500)).await;
        engine.stop();
        assert_eq!(engine.remaining_seconds(), 10);
        assert!(engine.is_paused());

        engine.reset();
        assert_eq!(engine.remaining_seconds(), 0);
        assert!(engine.is_paused());
        assert_eq!(ticks.load(Ordering::SeqCst), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_while_running_keeps_ticking() {
        let engine = TimerEngine::new(TimerId(1), secs(60), Direction::CountDown);
        engine.start();
        time::sleep(Duration::from_millis(4500)).await;
        assert_eq!(engine.remaining_seconds(), 56);

        engine.reset();
        assert_eq!(engine.remaining_seconds(), 60);
        assert!(engine.is_running());

        time::sleep(secs(2)).await;
        assert_eq!(engine.remaining_seconds(), 58);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_countdown_can_be_reset_and_restarted() {
        let engine = TimerEngine::new(TimerId(1), secs(2), Direction::CountDown);
        engine.start();
        time::sleep(Duration::from_millis(2500)).await;
        assert!(engine.is_paused());

        engine.reset();
        engine.start();
        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(engine.remaining_seconds(), 1);
        assert!(engine.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_or_resume_toggles_back_to_the_same_state() {
        let engine = TimerEngine::new(TimerId(1), secs(30), Direction::CountDown);

        assert!(!engine.pause_or_resume());
        assert!(engine.is_running());
        assert!(engine.pause_or_resume());
        assert!(engine.is_paused());
        assert_eq!(engine.remaining_seconds(), 30);

        engine.start();
        engine.pause_or_resume();
        engine.pause_or_resume();
        assert!(engine.is_running());
        assert_eq!(engine.remaining_seconds(), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_from_a_stopped_ticker_is_ignored() {
        let engine = TimerEngine::new(TimerId(1), secs(5), Direction::CountDown);
        let ticks = counting(&engine);
        engine.start();
        let epoch = live_epoch(&engine).unwrap();
        engine.stop();

        assert_eq!(engine.shared.advance(epoch), TickOutcome::Stale);
        assert_eq!(engine.remaining_seconds(), 5);
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        engine.start();
        assert_eq!(engine.shared.advance(epoch), TickOutcome::Stale);
        let current = live_epoch(&engine).unwrap();
        assert_eq!(engine.shared.advance(current), TickOutcome::Continue);
        assert_eq!(engine.remaining_seconds(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn watchers_see_start_ticks_and_stop() {
        let engine = TimerEngine::new(TimerId(3), secs(0), Direction::CountUp);
        let rx = engine.subscribe();
        assert!(rx.borrow().paused);

        engine.start();
        assert!(!rx.borrow().paused);

        time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(rx.borrow().remaining_seconds, 2);

        engine.stop();
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot, engine.snapshot());
        assert!(snapshot.paused);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_a_running_engine_cancels_its_ticker() {
        let engine = TimerEngine::new(TimerId(1), secs(0), Direction::CountUp);
        let ticks = counting(&engine);
        engine.start();
        let shared = Arc::downgrade(&engine.shared);

        drop(engine);
        time::sleep(secs(3)).await;

        assert!(shared.upgrade().is_none());
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn observer_can_read_the_engine_back() {
        let engine = Arc::new(TimerEngine::new(TimerId(9), secs(0), Direction::CountUp));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let weak = Arc::downgrade(&engine);
        let log = Arc::clone(&seen);
        engine.set_observer(move |id: TimerId| {
            if let Some(engine) = weak.upgrade() {
                log.lock().unwrap().push((id, engine.remaining_seconds()));
            }
        });

        engine.start();
        time::sleep(Duration::from_millis(2500)).await;
        engine.clear_observer();
        time::sleep(secs(2)).await;

        assert_eq!(*seen.lock().unwrap(), vec![(TimerId(9), 1), (TimerId(9), 2)]);
    }
}
