//! Chime Timer - an elapsed-time interval timer with a repeating reminder
//!
//! This library tracks elapsed running time across pauses and restarts, and
//! rings an alarm every N seconds until the user dismisses it.

pub mod clock;
pub mod config;
pub mod console;
pub mod engine;
pub mod sound;
pub mod state;
pub mod store;
pub mod tasks;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use engine::{EngineSettings, TimerEngine};
pub use state::{AppState, TimerView};
pub use utils::signals::shutdown_signal;
