//! Timer engine module
//!
//! The elapsed-time state machine and the alarm it rings at every interval
//! boundary.

pub mod alarm_controller;
pub mod timer_engine;

// Re-export main types
pub use alarm_controller::{AlarmController, DEFAULT_ALARM_REPEAT};
pub use timer_engine::{EngineSettings, TickOutcome, TimerEngine};
