//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod status_line;

// Re-export main functions
pub use status_line::status_line_task;
