//! Sound playback

use std::{
    io::Write,
    sync::atomic::{AtomicBool, Ordering},
};
use tracing::{debug, info};

/// Fire-and-forget playback of a catalog sound.
///
/// `play` must be safe to call repeatedly. Some outputs need a one-time
/// activation before the first sound; `activate` is idempotent and callers
/// invoke it unconditionally before relying on playback.
pub trait SoundPlayer: Send + Sync {
    fn activate(&self) -> Result<(), String> {
        Ok(())
    }

    fn play(&self, sound: &str) -> Result<(), String>;
}

/// Rings the terminal bell, one pulse per note of the sound
#[derive(Debug, Default)]
pub struct TerminalBellPlayer {
    active: AtomicBool,
}

impl TerminalBellPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn pulses(sound: &str) -> usize {
        match sound {
            "Birds" => 3,
            _ => 1,
        }
    }
}

impl SoundPlayer for TerminalBellPlayer {
    fn activate(&self) -> Result<(), String> {
        if !self.active.swap(true, Ordering::SeqCst) {
            debug!("Terminal audio output activated");
        }
        Ok(())
    }

    fn play(&self, sound: &str) -> Result<(), String> {
        if !self.active.load(Ordering::SeqCst) {
            return Err("audio output has not been activated".to_string());
        }
        let bells = "\x07".repeat(Self::pulses(sound));
        let mut stdout = std::io::stdout();
        stdout
            .write_all(bells.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| format!("Failed to ring terminal bell: {}", e))?;
        debug!("Played sound: {}", sound);
        Ok(())
    }
}

/// Player for muted sessions; only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&self, sound: &str) -> Result<(), String> {
        info!("(muted) {}", sound);
        Ok(())
    }
}
