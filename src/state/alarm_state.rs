//! Alarm ringing state

use chrono::{DateTime, Utc};

/// Whether the reminder is currently ringing, and since when
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmState {
    pub is_ringing: bool,
    pub ringing_since: Option<DateTime<Utc>>,
}

impl AlarmState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ring(&mut self, now: DateTime<Utc>) {
        self.is_ringing = true;
        self.ringing_since = Some(now);
    }

    pub fn silence(&mut self) {
        self.is_ringing = false;
        self.ringing_since = None;
    }
}
