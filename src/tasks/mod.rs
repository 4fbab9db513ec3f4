//! Background tasks module
//!
//! The periodic callbacks behind the timer: the once-per-second tick and the
//! repeating alert while an alarm rings.

pub mod alarm_repeat;
pub mod tick_loop;

// Re-export main functions
pub use alarm_repeat::alarm_repeat_task;
pub use tick_loop::{tick_loop_task, TICK_PERIOD};
