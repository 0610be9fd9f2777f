//! Main application state: the registry of running timers

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{TimerEntry, TimerSpec, TimerView};
use crate::{
    engine::{TimerEngine, TimerId},
    error::TimerError,
    utils::format_uptime,
};

/// Capacity of the change notification channel
const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// Main application state that owns every timer and tracks user actions
#[derive(Debug)]
pub struct AppState {
    /// Timers keyed by the id assigned at creation
    timers: Mutex<BTreeMap<TimerId, TimerEntry>>,
    next_id: AtomicU64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Ids of timers that ticked or were reset
    timer_change_tx: broadcast::Sender<TimerId>,
}

impl AppState {
    /// Create an empty registry
    pub fn new(port: u16, host: String) -> Self {
        let (timer_change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        Self {
            timers: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_change_tx,
        }
    }

    fn timers(&self) -> MutexGuard<'_, BTreeMap<TimerId, TimerEntry>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_action(&self, action: String) {
        *self.last_action.lock().unwrap_or_else(PoisonError::into_inner) = Some(action);
        *self.last_action_time.lock().unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());
    }

    fn entry(&self, id: TimerId) -> Result<TimerEntry, TimerError> {
        self.timers()
            .get(&id)
            .cloned()
            .ok_or(TimerError::NotFound { id })
    }

    /// Run a user action against one timer and return its updated view
    fn act<F>(&self, id: TimerId, action: &str, f: F) -> Result<TimerView, TimerError>
    where
        F: FnOnce(&TimerEngine),
    {
        let entry = self.entry(id)?;
        f(&entry.engine);
        self.record_action(format!("{} {}", action, id));
        Ok(entry.view())
    }

    /// Subscribe to change notifications (timer ids)
    pub fn subscribe(&self) -> broadcast::Receiver<TimerId> {
        self.timer_change_tx.subscribe()
    }

    /// Create a timer from `spec`, wire its notifications and optionally start it.
    ///
    /// Must be called within a Tokio runtime.
    pub fn add_timer(&self, spec: TimerSpec) -> Result<TimerView, TimerError> {
        spec.validate()?;
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let engine = TimerEngine::from_seconds(id, spec.seconds, spec.direction())?;

        let tx = self.timer_change_tx.clone();
        engine.set_observer(move |id: TimerId| {
            if tx.send(id).is_err() {
                debug!("No status subscribers for timer {}", id);
            }
        });

        let entry = TimerEntry {
            engine: Arc::new(engine),
            presentation: spec.presentation(),
        };
        info!(
            "Adding timer {} {:?}: {}s counting {}",
            id,
            entry.presentation.title,
            spec.seconds,
            spec.direction()
        );
        if spec.start {
            entry.engine.start();
        }

        let view = entry.view();
        self.timers().insert(id, entry);
        self.record_action(format!("add {}", id));
        Ok(view)
    }

    /// Add the count-down and count-up timers shown on first launch
    pub fn seed_defaults(&self, start: bool) -> Result<Vec<TimerView>, TimerError> {
        [TimerSpec::default_countdown(), TimerSpec::default_count_up()]
            .into_iter()
            .map(|spec| self.add_timer(TimerSpec { start, ..spec }))
            .collect()
    }

    /// Stop and forget a timer. Its id is never reused.
    pub fn remove_timer(&self, id: TimerId) -> Result<TimerView, TimerError> {
        let entry = self
            .timers()
            .remove(&id)
            .ok_or(TimerError::NotFound { id })?;
        entry.engine.stop();
        entry.engine.clear_observer();
        info!("Removed timer {}", id);
        self.record_action(format!("remove {}", id));
        Ok(entry.view())
    }

    /// Pause/resume toggle bound to the context menu
    pub fn toggle(&self, id: TimerId) -> Result<TimerView, TimerError> {
        self.act(id, "toggle", |engine| {
            engine.pause_or_resume();
        })
    }

    pub fn start(&self, id: TimerId) -> Result<TimerView, TimerError> {
        self.act(id, "start", TimerEngine::start)
    }

    pub fn stop(&self, id: TimerId) -> Result<TimerView, TimerError> {
        self.act(id, "stop", TimerEngine::stop)
    }

    pub fn reset(&self, id: TimerId) -> Result<TimerView, TimerError> {
        self.act(id, "reset", TimerEngine::reset)
    }

    /// Stop every timer, used on shutdown
    pub fn stop_all(&self) {
        let engines: Vec<Arc<TimerEngine>> = self
            .timers()
            .values()
            .map(|entry| Arc::clone(&entry.engine))
            .collect();
        for engine in &engines {
            engine.stop();
        }
        info!("Stopped {} timers", engines.len());
    }

    /// Current view of one timer
    pub fn timer(&self, id: TimerId) -> Result<TimerView, TimerError> {
        self.entry(id).map(|entry| entry.view())
    }

    /// Current view of every timer, ordered by id
    pub fn timer_views(&self) -> Vec<TimerView> {
        let entries: Vec<TimerEntry> = self.timers().values().cloned().collect();
        entries.iter().map(TimerEntry::view).collect()
    }

    pub fn timer_count(&self) -> usize {
        self.timers().len()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
