//! Keep Time - independent count-up and count-down status timers
//! 
//! The core is [`engine::TimerEngine`], a pausable, resettable timer driven
//! by a 1-second tick. The remaining modules form a headless collaborator:
//! a registry of timers keyed by stable ids, an HTTP control API and a task
//! that renders each timer's status line.

pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{Direction, TimerEngine, TimerId, TimerObserver, TimerSnapshot};
pub use error::TimerError;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
