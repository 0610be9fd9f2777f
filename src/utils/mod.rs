//! Utility functions module
//! 
//! This module contains utility functions used throughout the application.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{format_hms, format_uptime, menu_label};
pub use signals::shutdown_signal;
