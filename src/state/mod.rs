//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod alarm_state;
pub mod app_state;
pub mod timer_state;
pub mod view;

// Re-export main types
pub use alarm_state::AlarmState;
pub use app_state::{ActionOutcome, AppState};
pub use timer_state::{TimerState, DEFAULT_REMINDER_INTERVAL_SECONDS};
pub use view::TimerView;
