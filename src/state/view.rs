//! Presentation snapshot of the timer

use std::fmt;
use serde::Serialize;

use crate::utils::format_elapsed;

/// Everything a presentation layer needs to draw the timer and its settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerView {
    pub elapsed_seconds: u64,
    pub elapsed_display: String,
    pub is_running: bool,
    pub is_ringing: bool,
    pub reminder_interval_seconds: u64,
    pub seconds_until_next_alarm: u64,
    pub alarm_sound: String,
    /// Reset is pointless when already idle at zero
    pub can_reset: bool,
    pub sounds: Vec<String>,
}

impl TimerView {
    pub fn status_label(&self) -> &'static str {
        if self.is_running {
            "running"
        } else if self.elapsed_seconds == 0 {
            "idle"
        } else {
            "paused"
        }
    }
}

impl fmt::Display for TimerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] every {}m, next in {} | sound: {}",
            self.elapsed_display,
            self.status_label(),
            self.reminder_interval_seconds / 60,
            format_elapsed(self.seconds_until_next_alarm),
            self.alarm_sound,
        )?;
        if self.is_ringing {
            write!(f, " ** ALARM ** (type 'ack')")?;
        }
        Ok(())
    }
}
