//! Counting direction of a timer

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Whether a timer counts up from zero or down from its initial value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    CountUp,
    CountDown,
}

impl Direction {
    pub fn from_count_up(count_up: bool) -> Self {
        if count_up {
            Direction::CountUp
        } else {
            Direction::CountDown
        }
    }

    pub fn is_count_up(self) -> bool {
        self == Direction::CountUp
    }

    /// Value `remaining` starts from and returns to on reset
    pub fn baseline(self, initial_seconds: u64) -> u64 {
        match self {
            Direction::CountUp => 0,
            Direction::CountDown => initial_seconds,
        }
    }

    /// Status bar arrow symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Direction::CountUp => "arrow.up",
            Direction::CountDown => "arrow.down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::CountUp => f.write_str("up"),
            Direction::CountDown => f.write_str("down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "count-up" | "count_up" => Ok(Direction::CountUp),
            "down" | "count-down" | "count_down" => Ok(Direction::CountDown),
            other => Err(format!("unknown direction {:?}, expected \"up\" or \"down\"", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_depends_on_direction() {
        assert_eq!(Direction::CountUp.baseline(90), 0);
        assert_eq!(Direction::CountDown.baseline(90), 90);
    }

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::CountUp));
        assert_eq!(" Count-Down ".parse::<Direction>(), Ok(Direction::CountDown));
        assert!("sideways".parse::<Direction>().is_err());
    }
}
