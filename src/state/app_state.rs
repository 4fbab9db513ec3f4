//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::engine::{TickOutcome, TimerEngine};
use super::TimerView;

/// Result of a user action on the timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Whether the action changed anything
    pub applied: bool,
    pub view: TimerView,
}

/// Shared handle to the timer engine used by the tick loop and the UI
#[derive(Debug)]
pub struct AppState {
    /// The timer state machine; every mutation goes through this lock
    pub engine: Arc<Mutex<TimerEngine>>,
    /// Whether the timer is running; drives the tick loop
    pub running_tx: watch::Sender<bool>,
    /// Latest presentation snapshot
    pub view_tx: watch::Sender<TimerView>,
    /// Keep the receivers alive to prevent channel closure
    pub _running_rx: watch::Receiver<bool>,
    pub _view_rx: watch::Receiver<TimerView>,
    pub start_time: Instant,
}

impl AppState {
    /// Wrap a loaded engine
    pub fn new(engine: TimerEngine) -> Self {
        let (running_tx, running_rx) = watch::channel(engine.is_running());
        let (view_tx, view_rx) = watch::channel(engine.view());

        Self {
            engine: Arc::new(Mutex::new(engine)),
            running_tx,
            view_tx,
            _running_rx: running_rx,
            _view_rx: view_rx,
            start_time: Instant::now(),
        }
    }

    /// Run `action` against the engine and publish the resulting state
    pub fn update_engine<T, F>(&self, action: &str, updater: F) -> Result<(T, TimerView), String>
    where
        F: FnOnce(&mut TimerEngine) -> T,
    {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine during {}: {}", action, e))?;

        let result = updater(&mut *engine);
        let running = engine.is_running();
        let view = engine.view();
        drop(engine); // Release the lock early

        self.running_tx.send_if_modified(|current| {
            if *current == running {
                return false;
            }
            *current = running;
            true
        });

        if let Err(e) = self.view_tx.send(view.clone()) {
            warn!("Failed to send view update: {}", e);
        }

        Ok((result, view))
    }

    fn act<F>(&self, action: &str, updater: F) -> Result<ActionOutcome, String>
    where
        F: FnOnce(&mut TimerEngine) -> bool,
    {
        let (applied, view) = self.update_engine(action, updater)?;
        Ok(ActionOutcome { applied, view })
    }

    pub fn start(&self) -> Result<ActionOutcome, String> {
        self.act("start", TimerEngine::start)
    }

    pub fn pause(&self) -> Result<ActionOutcome, String> {
        self.act("pause", TimerEngine::pause)
    }

    /// Start/pause toggle
    pub fn toggle(&self) -> Result<ActionOutcome, String> {
        self.act("toggle", TimerEngine::toggle)
    }

    pub fn reset(&self) -> Result<ActionOutcome, String> {
        self.act("reset", |engine| {
            let was_idle = engine.state().is_idle() && !engine.is_ringing();
            engine.reset();
            !was_idle
        })
    }

    pub fn acknowledge_alarm(&self) -> Result<ActionOutcome, String> {
        self.act("acknowledge", TimerEngine::acknowledge_alarm)
    }

    pub fn set_reminder_interval(&self, seconds: i64) -> Result<ActionOutcome, String> {
        self.act("set interval", |engine| engine.set_reminder_interval(seconds))
    }

    /// Interval in whole minutes, the unit the settings UI works in
    pub fn set_reminder_interval_minutes(&self, minutes: i64) -> Result<ActionOutcome, String> {
        match minutes.checked_mul(60) {
            Some(seconds) => self.set_reminder_interval(seconds),
            None => {
                warn!("Ignoring out-of-range reminder interval: {}m", minutes);
                Ok(ActionOutcome {
                    applied: false,
                    view: self.view()?,
                })
            }
        }
    }

    pub fn set_alarm_sound(&self, sound: &str) -> Result<ActionOutcome, String> {
        self.act("set sound", |engine| engine.set_alarm_sound(sound))
    }

    /// One tick of the timer; called by the tick loop
    pub fn tick(&self) -> Result<TickOutcome, String> {
        let (outcome, _) = self.update_engine("tick", TimerEngine::tick)?;
        if outcome.crossed_boundary {
            info!("Reminder {} is ringing", outcome.alarm_point);
        }
        Ok(outcome)
    }

    /// Get current view of the timer
    pub fn view(&self) -> Result<TimerView, String> {
        self.engine.lock()
            .map(|engine| engine.view())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    pub fn is_running(&self) -> bool {
        *self.running_tx.borrow()
    }

    /// How long this session has been up, as a short string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
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
}
