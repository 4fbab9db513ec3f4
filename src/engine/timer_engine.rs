//! Elapsed-time tracking and reminder triggering

use std::{sync::Arc, time::Duration};
use chrono::{TimeZone, Utc};
use tracing::{debug, info, warn};

use crate::{
    clock::Clock,
    sound::{SoundCatalog, SoundPlayer},
    state::{TimerState, TimerView, DEFAULT_REMINDER_INTERVAL_SECONDS},
    store::{
        KeyValueStore, KEY_ALARM_SOUND, KEY_IS_RUNNING, KEY_REMINDER_INTERVAL,
        KEY_START_EPOCH_MS,
    },
    utils::format_elapsed,
};
use super::alarm_controller::{AlarmController, DEFAULT_ALARM_REPEAT};

/// Tunables for the timer engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Interval used when none (or an invalid one) is stored
    pub default_interval_seconds: u64,
    /// Cadence of the repeating alert while ringing
    pub alarm_repeat: Duration,
    /// Play a newly selected sound once
    pub preview_on_select: bool,
    /// Refuse to restart or reconfigure while the alarm is ringing
    pub require_ack: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_interval_seconds: DEFAULT_REMINDER_INTERVAL_SECONDS,
            alarm_repeat: DEFAULT_ALARM_REPEAT,
            preview_on_select: true,
            require_ack: false,
        }
    }
}

/// Result of one elapsed-time recomputation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub elapsed_seconds: u64,
    pub alarm_point: u64,
    /// A new interval boundary was crossed on this tick
    pub crossed_boundary: bool,
}

/// Owns the timer state machine: Idle -> Running <-> Paused -> Idle.
///
/// Elapsed time is always recomputed from the stored start instant, never
/// accumulated from tick deltas, so late or missing ticks cannot drift it.
pub struct TimerEngine {
    state: TimerState,
    alarm: AlarmController,
    catalog: SoundCatalog,
    settings: EngineSettings,
    clock: Arc<dyn Clock>,
    store: Box<dyn KeyValueStore>,
    player: Arc<dyn SoundPlayer>,
}

impl TimerEngine {
    /// Build the engine from whatever the store holds.
    ///
    /// A run that was active when the store was last written resumes with
    /// the time that passed in between. Boundaries already behind it are
    /// marked as alarmed so no backlog fires on load.
    pub fn load(
        clock: Arc<dyn Clock>,
        store: Box<dyn KeyValueStore>,
        player: Arc<dyn SoundPlayer>,
        catalog: SoundCatalog,
        settings: EngineSettings,
    ) -> Self {
        let alarm_sound = read_key(&*store, KEY_ALARM_SOUND)
            .filter(|sound| catalog.contains(sound))
            .unwrap_or_else(|| catalog.default_sound().to_string());

        let reminder_interval_seconds = read_key(&*store, KEY_REMINDER_INTERVAL)
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|seconds| *seconds > 0)
            .map(|seconds| seconds as u64)
            .unwrap_or_else(|| settings.default_interval_seconds.max(1));

        let mut state = TimerState::new(alarm_sound, reminder_interval_seconds);

        let was_running = read_key(&*store, KEY_IS_RUNNING).as_deref() == Some("true");
        if was_running {
            let start_epoch = read_key(&*store, KEY_START_EPOCH_MS)
                .and_then(|value| value.parse::<i64>().ok())
                .filter(|millis| *millis > 0)
                .and_then(|millis| Utc.timestamp_millis_opt(millis).single());

            match start_epoch {
                Some(start) => {
                    state.is_running = true;
                    state.start_epoch = Some(start);
                    state.elapsed_seconds = state.elapsed_at(clock.now());
                    state.last_alarm_point = state.alarm_point_for(state.elapsed_seconds);
                    info!(
                        "Resumed running timer at {} (reminder point {})",
                        format_elapsed(state.elapsed_seconds),
                        state.last_alarm_point
                    );
                }
                None => warn!("Stored run has no valid start time, starting idle"),
            }
        }

        debug!(
            "Timer loaded: running={}, interval={}s, sound={}",
            state.is_running, state.reminder_interval_seconds, state.alarm_sound
        );

        let alarm = AlarmController::new(Arc::clone(&player), settings.alarm_repeat);
        Self {
            state,
            alarm,
            catalog,
            settings,
            clock,
            store,
            player,
        }
    }

    /// Start or resume. Returns `false` if nothing changed.
    pub fn start(&mut self) -> bool {
        if self.state.is_running {
            return false;
        }
        if self.blocked_by_alarm("start") {
            return false;
        }

        // starting is the user gesture that unlocks audio output
        if let Err(e) = self.player.activate() {
            warn!("Audio output unavailable: {}", e);
        }

        let now = self.clock.now();
        self.state.start_epoch = Some(self.state.rebased_start(now));
        self.state.is_running = true;
        self.state.last_alarm_point = self.state.alarm_point_for(self.state.elapsed_seconds);
        info!("Timer started at {}", format_elapsed(self.state.elapsed_seconds));

        self.persist_run_state();
        true
    }

    /// Pause, freezing elapsed time at the last tick. Returns `false` if not running.
    pub fn pause(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }

        self.state.is_running = false;
        self.state.start_epoch = None;
        info!("Timer paused at {}", format_elapsed(self.state.elapsed_seconds));

        self.persist_run_state();
        true
    }

    /// Start when paused, pause when running
    pub fn toggle(&mut self) -> bool {
        if self.state.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Back to idle at zero, silencing any alarm
    pub fn reset(&mut self) {
        self.alarm.stop();

        self.state.is_running = false;
        self.state.start_epoch = None;
        self.state.elapsed_seconds = 0;
        self.state.last_alarm_point = 0;
        info!("Timer reset");

        for key in [KEY_IS_RUNNING, KEY_START_EPOCH_MS] {
            if let Err(e) = self.store.remove(key) {
                warn!("Failed to clear stored {}: {}", key, e);
            }
        }
    }

    /// Recompute elapsed time and ring if a new boundary was crossed.
    ///
    /// Only the furthest crossed boundary counts, so a tick that arrives late
    /// (say after the host was suspended) rings exactly once.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running {
            return TickOutcome {
                elapsed_seconds: self.state.elapsed_seconds,
                alarm_point: self.state.last_alarm_point,
                crossed_boundary: false,
            };
        }
        self.advance()
    }

    /// Silence a ringing alarm. Returns whether it was ringing.
    pub fn acknowledge_alarm(&mut self) -> bool {
        self.alarm.stop()
    }

    /// Change the reminder interval. Non-positive values are ignored.
    pub fn set_reminder_interval(&mut self, seconds: i64) -> bool {
        if seconds <= 0 {
            warn!("Ignoring non-positive reminder interval: {}s", seconds);
            return false;
        }
        if self.blocked_by_alarm("change the interval") {
            return false;
        }

        let seconds = seconds as u64;
        // the next tick compares against the new interval; the alarm point stays
        self.state.reminder_interval_seconds = seconds;
        info!("Reminder interval set to {}s", seconds);

        self.write_key(KEY_REMINDER_INTERVAL, &seconds.to_string());
        true
    }

    /// Select the alarm sound. Unknown sounds are ignored.
    pub fn set_alarm_sound(&mut self, sound: &str) -> bool {
        let Some(sound) = self.catalog.resolve(sound).map(str::to_string) else {
            warn!("Ignoring unknown alarm sound: {}", sound);
            return false;
        };
        if self.blocked_by_alarm("change the sound") {
            return false;
        }

        self.state.alarm_sound = sound.clone();
        info!("Alarm sound set to {}", sound);
        self.write_key(KEY_ALARM_SOUND, &sound);

        if self.settings.preview_on_select {
            if let Err(e) = self.player.activate().and_then(|_| self.player.play(&sound)) {
                warn!("Failed to preview sound: {}", e);
            }
        }
        true
    }

    /// Snapshot for the presentation layer
    pub fn view(&self) -> TimerView {
        TimerView {
            elapsed_seconds: self.state.elapsed_seconds,
            elapsed_display: format_elapsed(self.state.elapsed_seconds),
            is_running: self.state.is_running,
            is_ringing: self.alarm.is_ringing(),
            reminder_interval_seconds: self.state.reminder_interval_seconds,
            seconds_until_next_alarm: self.state.seconds_until_next_alarm(),
            alarm_sound: self.state.alarm_sound.clone(),
            can_reset: !self.state.is_idle() || self.alarm.is_ringing(),
            sounds: self.catalog.sounds().to_vec(),
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn is_ringing(&self) -> bool {
        self.alarm.is_ringing()
    }

    fn advance(&mut self) -> TickOutcome {
        let now = self.clock.now();
        let elapsed = self.state.elapsed_at(now);
        self.state.elapsed_seconds = elapsed;

        let current_point = self.state.alarm_point_for(elapsed);
        let crossed_boundary = self.state.reminder_interval_seconds > 0
            && current_point > 0
            && current_point > self.state.last_alarm_point;

        if crossed_boundary {
            let skipped = current_point - self.state.last_alarm_point - 1;
            if skipped > 0 {
                warn!("Tick arrived {} boundaries late, ringing once", skipped);
            }
            self.state.last_alarm_point = current_point;
            info!(
                "Reminder point {} reached at {}",
                current_point,
                format_elapsed(elapsed)
            );
            self.alarm.trigger(&self.state.alarm_sound, now);
        } else {
            debug!("Tick at {}", format_elapsed(elapsed));
        }

        TickOutcome {
            elapsed_seconds: elapsed,
            alarm_point: current_point,
            crossed_boundary,
        }
    }

    fn blocked_by_alarm(&self, action: &str) -> bool {
        if self.settings.require_ack && self.alarm.is_ringing() {
            warn!("Acknowledge the alarm before trying to {}", action);
            return true;
        }
        false
    }

    fn persist_run_state(&mut self) {
        let running = if self.state.is_running { "true" } else { "false" };
        self.write_key(KEY_IS_RUNNING, running);
        if let Some(start) = self.state.start_epoch {
            self.write_key(KEY_START_EPOCH_MS, &start.timestamp_millis().to_string());
        }
    }

    fn write_key(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!("Failed to persist {}: {}", key, e);
        }
    }
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read stored {}: {}", key, e);
            None
        }
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("alarm", &self.alarm)
            .field("settings", &self.settings)
            .finish()
    }
}
