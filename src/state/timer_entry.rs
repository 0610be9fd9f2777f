//! Registered timers and the metadata used to present them

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::engine::{TimerEngine, TimerSnapshot};

/// Text color palette offered when creating a timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Black,
    White,
    Red,
    Green,
    Blue,
    Orange,
    Yellow,
    Purple,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::White,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Orange,
        Color::Yellow,
        Color::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Color::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown color {:?}", wanted))
    }
}

/// How a timer is shown in the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerPresentation {
    pub title: String,
    /// Prefix rendered before the `HH:MM:SS` value
    pub label: String,
    pub color: Color,
}

/// A timer owned by the registry
#[derive(Debug, Clone)]
pub struct TimerEntry {
    pub engine: Arc<TimerEngine>,
    pub presentation: TimerPresentation,
}

impl TimerEntry {
    pub fn view(&self) -> TimerView {
        TimerView::new(self.engine.snapshot(), &self.presentation)
    }
}

/// Everything a collaborator needs to render one timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    #[serde(flatten)]
    pub snapshot: TimerSnapshot,
    pub title: String,
    pub label: String,
    pub color: Color,
    pub symbol: String,
    pub display: String,
    pub menu_label: String,
}

impl TimerView {
    pub fn new(snapshot: TimerSnapshot, presentation: &TimerPresentation) -> Self {
        Self {
            title: presentation.title.clone(),
            label: presentation.label.clone(),
            color: presentation.color,
            symbol: snapshot.direction.symbol().to_string(),
            display: snapshot.display(),
            menu_label: snapshot.menu_label().to_string(),
            snapshot,
        }
    }

    /// Label prefix followed by the formatted value, e.g. `Count Up: 00:00:42`
    pub fn status_line(&self) -> String {
        format!("{}{}", self.label, self.display)
    }
}
