//! Test doubles shared by unit tests

use std::sync::{Arc, Mutex};
use chrono::{DateTime, TimeZone, Utc};

use crate::{
    sound::SoundPlayer,
    store::{KeyValueStore, MemoryStore},
};

/// Fixed wall-clock origin for deterministic tests
pub fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).single().expect("valid origin")
}

/// Player that records every call
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    pub plays: Mutex<Vec<String>>,
    pub activations: Mutex<usize>,
}

impl RecordingPlayer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn play_count(&self) -> usize {
        self.plays.lock().expect("plays lock").len()
    }

    pub fn activation_count(&self) -> usize {
        *self.activations.lock().expect("activations lock")
    }
}

impl SoundPlayer for RecordingPlayer {
    fn activate(&self) -> Result<(), String> {
        *self.activations.lock().expect("activations lock") += 1;
        Ok(())
    }

    fn play(&self, sound: &str) -> Result<(), String> {
        self.plays.lock().expect("plays lock").push(sound.to_string());
        Ok(())
    }
}

/// Player whose audio output is unavailable
#[derive(Debug, Default)]
pub struct BrokenPlayer;

impl SoundPlayer for BrokenPlayer {
    fn activate(&self) -> Result<(), String> {
        Err("no audio device".to_string())
    }

    fn play(&self, _sound: &str) -> Result<(), String> {
        Err("no audio device".to_string())
    }
}

/// Store whose backend is unavailable
#[derive(Debug, Default)]
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, String> {
        Err("storage disabled".to_string())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), String> {
        Err("storage disabled".to_string())
    }

    fn remove(&mut self, _key: &str) -> Result<(), String> {
        Err("storage disabled".to_string())
    }
}

pub fn shared_store() -> Arc<Mutex<MemoryStore>> {
    Arc::new(Mutex::new(MemoryStore::new()))
}
