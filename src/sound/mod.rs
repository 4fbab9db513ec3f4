//! Alarm sound module
//!
//! The catalog of selectable sound ids and the playback capability the
//! engine drives. How a sound is actually rendered is up to the player.

pub mod catalog;
pub mod player;

// Re-export main types
pub use catalog::{SoundCatalog, DEFAULT_SOUND};
pub use player::{SilentPlayer, SoundPlayer, TerminalBellPlayer};
