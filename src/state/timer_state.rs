//! Timer state structure and management

use chrono::{DateTime, Duration, Utc};

/// Default seconds between reminders (one hour)
pub const DEFAULT_REMINDER_INTERVAL_SECONDS: u64 = 3600;

/// Run state and settings of the interval timer.
///
/// `start_epoch` is the wall-clock instant at which elapsed time was zero for
/// the current run. `elapsed_seconds` and `last_alarm_point` are derived from
/// it and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub is_running: bool,
    pub start_epoch: Option<DateTime<Utc>>,
    pub elapsed_seconds: u64,
    pub reminder_interval_seconds: u64,
    /// Highest interval multiple already alarmed for
    pub last_alarm_point: u64,
    pub alarm_sound: String,
}

impl TimerState {
    /// Create an idle timer at zero elapsed
    pub fn new(alarm_sound: impl Into<String>, reminder_interval_seconds: u64) -> Self {
        Self {
            is_running: false,
            start_epoch: None,
            elapsed_seconds: 0,
            reminder_interval_seconds: reminder_interval_seconds.max(1),
            last_alarm_point: 0,
            alarm_sound: alarm_sound.into(),
        }
    }

    /// Whole seconds between `start_epoch` and `now`, clamped at zero
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> u64 {
        match self.start_epoch {
            Some(start) => u64::try_from((now - start).num_seconds()).unwrap_or(0),
            None => self.elapsed_seconds,
        }
    }

    /// Interval multiple reached at `elapsed` seconds
    pub fn alarm_point_for(&self, elapsed: u64) -> u64 {
        if self.reminder_interval_seconds == 0 {
            return 0;
        }
        elapsed / self.reminder_interval_seconds
    }

    /// Start instant that makes the current elapsed value hold at `now`
    pub fn rebased_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let elapsed = i64::try_from(self.elapsed_seconds).unwrap_or(i64::MAX);
        now - Duration::seconds(elapsed)
    }

    /// Seconds left until the next interval boundary
    pub fn seconds_until_next_alarm(&self) -> u64 {
        let interval = self.reminder_interval_seconds.max(1);
        interval - self.elapsed_seconds % interval
    }

    /// Idle means stopped with nothing on the clock
    pub fn is_idle(&self) -> bool {
        !self.is_running && self.elapsed_seconds == 0
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(crate::sound::DEFAULT_SOUND, DEFAULT_REMINDER_INTERVAL_SECONDS)
    }
}
