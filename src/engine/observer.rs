//! Change notification hook for timer engines

use super::TimerId;

/// Receives a notification after every tick-driven change and every reset.
///
/// Called outside the engine lock, so implementations may read the engine
/// back. They must return quickly and must not call `start`/`stop`
/// synchronously.
pub trait TimerObserver: Send + Sync {
    fn on_timer_changed(&self, id: TimerId);
}

impl<F> TimerObserver for F
where
    F: Fn(TimerId) + Send + Sync,
{
    fn on_timer_changed(&self, id: TimerId) {
        self(id)
    }
}
