//! Time label formatting
//!
//! Playback positions and durations are displayed as "M:SS". Minutes are
//! unbounded (an hour-long track reads "60:00"), seconds are zero-padded.

/// Format seconds as "M:SS"
///
/// Negative and non-finite input clamps to zero: time labels render
/// unconditionally and have no error channel back to the caller.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, secs)
}

/// One-slot memo for a time label
///
/// Progress events arrive far more often than the label text changes, so the
/// rendered string is cached keyed on the truncated second.
#[derive(Debug, Clone)]
pub struct TimeLabel {
    second: Option<u64>,
    text: String,
}

impl TimeLabel {
    pub fn new() -> Self {
        Self {
            second: None,
            text: format_time(0.0),
        }
    }

    /// Update the label for a new position, re-rendering only when the
    /// displayed second changes
    pub fn update(&mut self, seconds: f64) -> &str {
        let whole = if seconds.is_finite() && seconds > 0.0 {
            seconds.floor() as u64
        } else {
            0
        };
        if self.second != Some(whole) {
            self.second = Some(whole);
            self.text = format_time(seconds);
        }
        &self.text
    }

    /// The most recently rendered label
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for TimeLabel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed_points() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(599.0), "9:59");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn test_format_truncates_fractions() {
        assert_eq!(format_time(59.999), "0:59");
        assert_eq!(format_time(60.4), "1:00");
    }

    #[test]
    fn test_format_clamps_degenerate_input() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(f64::NEG_INFINITY), "0:00");
    }

    #[test]
    fn test_label_memoizes_within_second() {
        let mut label = TimeLabel::new();
        assert_eq!(label.update(12.1), "0:12");
        let before = label.text().as_ptr();
        // Same displayed second: the cached string is reused
        assert_eq!(label.update(12.9), "0:12");
        assert_eq!(label.text().as_ptr(), before);
        assert_eq!(label.update(13.0), "0:13");
    }
}
