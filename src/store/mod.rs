//! Key-value persistence module
//!
//! The timer persists a small snapshot of its run state and settings through
//! a string-keyed store so a restarted process can resume where it left off.

pub mod json_file;
pub mod memory;

// Re-export main types
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Whether a run is active ("true"/"false")
pub const KEY_IS_RUNNING: &str = "timer_is_running";
/// Wall-clock instant (epoch milliseconds) at which elapsed time was zero
pub const KEY_START_EPOCH_MS: &str = "timer_start_epoch_ms";
/// Selected alarm sound id
pub const KEY_ALARM_SOUND: &str = "timer_alarm_sound";
/// Seconds between reminders
pub const KEY_REMINDER_INTERVAL: &str = "timer_reminder_interval_seconds";

/// String-keyed store of primitive values.
///
/// Failures are reported but never fatal; callers fall back to in-memory values.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&mut self, key: &str) -> Result<(), String>;
}

/// Shared handle to a store, so a caller can keep inspecting what the engine writes
impl<S: KeyValueStore> KeyValueStore for std::sync::Arc<std::sync::Mutex<S>> {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.lock()
            .map_err(|e| format!("Failed to lock store: {}", e))?
            .get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.lock()
            .map_err(|e| format!("Failed to lock store: {}", e))?
            .set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), String> {
        self.lock()
            .map_err(|e| format!("Failed to lock store: {}", e))?
            .remove(key)
    }
}
