//! Utility functions for common operations.

use std::time::Duration;

/// Format duration as MM:SS, or HH:MM:SS once it passes an hour
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        return format!("{:02}:{:02}:{:02}", hours, mins, secs);
    }
    format!("{:02}:{:02}", mins, secs)
}

/// Format an optional duration, with a placeholder while unknown
pub fn format_optional_duration(duration: Option<Duration>) -> String {
    duration
        .map(format_duration)
        .unwrap_or_else(|| "--:--".to_string())
}

/// Music volume as a whole percentage, e.g. "50%"
pub fn format_volume(volume: f32) -> String {
    format!("{}%", (volume.clamp(0.0, 1.0) * 100.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00");
    }

    #[test]
    fn test_format_duration_seconds_only() {
        assert_eq!(format_duration(Duration::from_secs(45)), "00:45");
    }

    #[test]
    fn test_format_duration_minutes_and_seconds() {
        assert_eq!(format_duration(Duration::from_secs(125)), "02:05");
    }

    #[test]
    fn test_format_duration_hour_plus() {
        assert_eq!(format_duration(Duration::from_secs(3661)), "01:01:01");
    }

    #[test]
    fn test_format_optional_duration() {
        assert_eq!(format_optional_duration(None), "--:--");
        assert_eq!(
            format_optional_duration(Some(Duration::from_secs(90))),
            "01:30"
        );
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(0.5), "50%");
        assert_eq!(format_volume(0.0), "0%");
        assert_eq!(format_volume(1.0), "100%");
        assert_eq!(format_volume(1.7), "100%");
    }
}
