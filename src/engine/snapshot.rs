//! Point-in-time view of a timer engine

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Direction;
use crate::utils::format::{format_hms, menu_label};

/// Stable identifier assigned to a timer when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timer state as published to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub id: TimerId,
    pub direction: Direction,
    pub initial_seconds: u64,
    pub remaining_seconds: u64,
    pub paused: bool,
}

impl TimerSnapshot {
    pub fn is_running(&self) -> bool {
        !self.paused
    }

    /// Remaining time rendered as `HH:MM:SS`
    pub fn display(&self) -> String {
        format_hms(self.remaining_seconds)
    }

    pub fn menu_label(&self) -> &'static str {
        menu_label(self.paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_label_follow_state() {
        let snapshot = TimerSnapshot {
            id: TimerId(1),
            direction: Direction::CountDown,
            initial_seconds: 3600,
            remaining_seconds: 3599,
            paused: false,
        };

        assert!(snapshot.is_running());
        assert_eq!(snapshot.display(), "00:59:59");
        assert_eq!(snapshot.menu_label(), "Pause Timer");
    }

    #[test]
    fn serializes_id_as_plain_number() {
        let snapshot = TimerSnapshot {
            id: TimerId(7),
            direction: Direction::CountUp,
            initial_seconds: 0,
            remaining_seconds: 12,
            paused: true,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["direction"], "count_up");
        assert_eq!(json["paused"], true);
    }
}
