//! Ringing alarm management

use std::{sync::Arc, time::Duration};
use chrono::{DateTime, Utc};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    sound::SoundPlayer,
    state::AlarmState,
    tasks::alarm_repeat_task,
};

/// Default cadence of the repeating alert
pub const DEFAULT_ALARM_REPEAT: Duration = Duration::from_secs(2);

/// Owns the ringing sub-state and the repeat schedule of the audible alert.
///
/// The alert repeats until `stop()` is called; a single short sound is easy
/// to miss.
pub struct AlarmController {
    state: AlarmState,
    player: Arc<dyn SoundPlayer>,
    repeat_every: Duration,
    repeat_task: Option<JoinHandle<()>>,
}

impl AlarmController {
    pub fn new(player: Arc<dyn SoundPlayer>, repeat_every: Duration) -> Self {
        Self {
            state: AlarmState::new(),
            player,
            repeat_every,
            repeat_task: None,
        }
    }

    /// Start ringing with `sound`. Returns `false` if already ringing.
    ///
    /// The ringing flag is raised before any audio is attempted, so a broken
    /// output never hides the alert. Without an async runtime the alert
    /// still rings, it just does not repeat.
    pub fn trigger(&mut self, sound: &str, now: DateTime<Utc>) -> bool {
        if self.state.is_ringing {
            debug!("Alarm already ringing, ignoring trigger");
            return false;
        }

        self.state.ring(now);
        info!("Alarm ringing with sound: {}", sound);

        if let Err(e) = self.player.play(sound) {
            warn!("Alarm sound unavailable, ringing silently: {}", e);
        }

        self.repeat_task = match Handle::try_current() {
            Ok(handle) => Some(handle.spawn(alarm_repeat_task(
                Arc::clone(&self.player),
                sound.to_string(),
                self.repeat_every,
            ))),
            Err(_) => {
                warn!("No async runtime available, alarm will not repeat");
                None
            }
        };
        true
    }

    /// Silence the alarm and cancel its repeat schedule.
    ///
    /// Safe to call at any time. Returns whether it was ringing.
    pub fn stop(&mut self) -> bool {
        if let Some(task) = self.repeat_task.take() {
            task.abort();
            debug!("Alarm repeat schedule cancelled");
        }

        let was_ringing = self.state.is_ringing;
        self.state.silence();
        if was_ringing {
            info!("Alarm silenced");
        }
        was_ringing
    }

    pub fn is_ringing(&self) -> bool {
        self.state.is_ringing
    }

    pub fn state(&self) -> &AlarmState {
        &self.state
    }

    /// Whether a repeat schedule is currently live
    pub fn is_repeating(&self) -> bool {
        self.repeat_task
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for AlarmController {
    fn drop(&mut self) {
        if let Some(task) = self.repeat_task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for AlarmController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmController")
            .field("state", &self.state)
            .field("repeat_every", &self.repeat_every)
            .field("repeating", &self.is_repeating())
            .finish()
    }
}
