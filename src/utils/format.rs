//! Text rendering for timer values and labels

use std::time::Duration;

/// Render whole seconds as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped, so very long timers show more than two hour digits.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Context menu entry for the pause/resume toggle
pub fn menu_label(paused: bool) -> &'static str {
    if paused {
        "Resume Timer"
    } else {
        "Pause Timer"
    }
}

/// Compact uptime such as `2h 5m 1s`, `5m 1s` or `1s`
pub fn format_uptime(duration: Duration) -> String {
    let hours = duration.as_secs() / 3600;
    let minutes = (duration.as_secs() % 3600) / 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(3600), "01:00:00");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(360_000), "100:00:00");
    }

    #[test]
    fn menu_label_offers_the_opposite_action() {
        assert_eq!(menu_label(true), "Resume Timer");
        assert_eq!(menu_label(false), "Pause Timer");
    }

    #[test]
    fn uptime_drops_leading_zero_units() {
        assert_eq!(format_uptime(Duration::from_secs(7)), "7s");
        assert_eq!(format_uptime(Duration::from_secs(301)), "5m 1s");
        assert_eq!(format_uptime(Duration::from_secs(7501)), "2h 5m 1s");
    }
}
