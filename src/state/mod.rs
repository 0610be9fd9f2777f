//! State management module
//! 
//! This module contains the timer registry and the metadata collaborators
//! use to create and render timers.

pub mod app_state;
pub mod timer_entry;
pub mod timer_spec;

// Re-export main types
pub use app_state::AppState;
pub use timer_entry::{Color, TimerEntry, TimerPresentation, TimerView};
pub use timer_spec::TimerSpec;
