//! Timer engine module
//!
//! This module contains the timer state machine, its tick source and the
//! types collaborators use to observe it.

pub mod direction;
pub mod observer;
pub mod snapshot;
pub mod timer_engine;

// Re-export main types
pub use direction::Direction;
pub use observer::TimerObserver;
pub use snapshot::{TimerId, TimerSnapshot};
pub use timer_engine::{TimerEngine, TICK_INTERVAL};
