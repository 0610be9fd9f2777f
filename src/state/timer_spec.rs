//! Requested configuration for a new timer

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Color, TimerPresentation};
use crate::{engine::Direction, error::TimerError};

/// Title used when none is given
pub const DEFAULT_TITLE: &str = "New Timer";

fn count_up_by_default() -> bool {
    true
}

fn start_by_default() -> bool {
    true
}

/// Configuration for a timer, as given on the command line or in a
/// `POST /timers` body.
///
/// `seconds` is signed so that negative input can be rejected explicitly
/// instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub seconds: i64,
    #[serde(default = "count_up_by_default")]
    pub count_up: bool,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "start_by_default")]
    pub start: bool,
}

impl Default for TimerSpec {
    fn default() -> Self {
        Self {
            title: None,
            seconds: 0,
            count_up: count_up_by_default(),
            color: None,
            label: None,
            start: start_by_default(),
        }
    }
}

impl TimerSpec {
    /// One-hour count-down shown on first launch
    pub fn default_countdown() -> Self {
        Self {
            title: Some("Count Down".to_string()),
            seconds: 3600,
            count_up: false,
            color: Some(Color::Red),
            label: Some("Count Down: ".to_string()),
            start: true,
        }
    }

    /// Count-up from zero shown on first launch
    pub fn default_count_up() -> Self {
        Self {
            title: Some("Count Up".to_string()),
            seconds: 0,
            count_up: true,
            color: Some(Color::Green),
            label: Some("Count Up: ".to_string()),
            start: true,
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::from_count_up(self.count_up)
    }

    pub fn validate(&self) -> Result<(), TimerError> {
        if self.seconds < 0 {
            return Err(TimerError::invalid_configuration(format!(
                "initial value must not be negative, got {}s",
                self.seconds
            )));
        }
        Ok(())
    }

    pub fn presentation(&self) -> TimerPresentation {
        let title = match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => DEFAULT_TITLE.to_string(),
        };
        let label = self
            .label
            .clone()
            .unwrap_or_else(|| format!("{}: ", title));

        TimerPresentation {
            title,
            label,
            color: self.color.unwrap_or_default(),
        }
    }
}

/// Parses `TITLE,SECONDS,up|down[,COLOR]`
impl FromStr for TimerSpec {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(TimerError::invalid_spec(
                s,
                "expected TITLE,SECONDS,up|down[,COLOR]",
            ));
        }

        let seconds: i64 = parts[1]
            .parse()
            .map_err(|e| TimerError::invalid_spec(s, format!("bad seconds {:?}: {}", parts[1], e)))?;
        if seconds < 0 {
            return Err(TimerError::invalid_spec(s, "seconds must not be negative"));
        }
        let direction: Direction = parts[2]
            .parse()
            .map_err(|e: String| TimerError::invalid_spec(s, e))?;
        let color = parts
            .get(3)
            .map(|color| color.parse::<Color>())
            .transpose()
            .map_err(|e| TimerError::invalid_spec(s, e))?;

        Ok(Self {
            title: Some(parts[0].to_string()).filter(|title| !title.is_empty()),
            seconds,
            count_up: direction.is_count_up(),
            color,
            label: None,
            start: true,
        })
    }
}
