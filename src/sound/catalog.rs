//! Registered alarm sound ids

/// Sound selected when nothing valid has been stored
pub const DEFAULT_SOUND: &str = "Synth Beep";

/// Sounds every catalog starts with
pub const BUILTIN_SOUNDS: &[&str] = &["Synth Beep", "Simple Bell", "Digital Tone", "Birds"];

/// Ordered set of known sound ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundCatalog {
    sounds: Vec<String>,
    default_sound: String,
}

impl SoundCatalog {
    /// Catalog with the built-in sounds and `Synth Beep` as default
    pub fn builtin() -> Self {
        Self {
            sounds: BUILTIN_SOUNDS.iter().map(|s| s.to_string()).collect(),
            default_sound: DEFAULT_SOUND.to_string(),
        }
    }

    /// Register an additional sound id. Blank and duplicate ids are ignored.
    pub fn register(&mut self, sound: impl Into<String>) -> bool {
        let sound = sound.into();
        let sound = sound.trim();
        if sound.is_empty() || self.contains(sound) {
            return false;
        }
        self.sounds.push(sound.to_string());
        true
    }

    pub fn contains(&self, sound: &str) -> bool {
        self.sounds.iter().any(|s| s == sound)
    }

    /// Look up a sound by id, ignoring ASCII case, and return its canonical spelling
    pub fn resolve(&self, sound: &str) -> Option<&str> {
        let sound = sound.trim();
        self.sounds
            .iter()
            .find(|s| s.eq_ignore_ascii_case(sound))
            .map(String::as_str)
    }

    pub fn default_sound(&self) -> &str {
        &self.default_sound
    }

    pub fn sounds(&self) -> &[String] {
        &self.sounds
    }
}

impl Default for SoundCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
