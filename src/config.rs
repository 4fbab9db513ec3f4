//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::engine::EngineSettings;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "chime-timer")]
#[command(about = "An elapsed-time timer that rings a reminder every N minutes")]
#[command(version)]
pub struct Config {
    /// File that keeps timer state between runs
    #[arg(short, long, default_value = "chime-timer.json")]
    pub store: PathBuf,

    /// Keep state in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Reminder interval in minutes (overrides the stored value)
    #[arg(short, long)]
    pub interval: Option<i64>,

    /// Alarm sound (overrides the stored value)
    #[arg(long)]
    pub sound: Option<String>,

    /// Register an additional alarm sound name
    #[arg(long = "extra-sound")]
    pub extra_sounds: Vec<String>,

    /// Seconds between repeats of a ringing alarm
    #[arg(long, default_value = "2")]
    pub repeat_secs: u64,

    /// Require dismissing a ringing alarm before restarting or changing settings
    #[arg(long)]
    pub require_ack: bool,

    /// Never ring the terminal bell
    #[arg(long)]
    pub mute: bool,

    /// Only print the clock when an alarm starts ringing
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Engine tunables derived from the flags
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            alarm_repeat: Duration::from_secs(self.repeat_secs.max(1)),
            require_ack: self.require_ack,
            ..EngineSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["chime-timer"]).expect("parse");
        assert_eq!(config.store, PathBuf::from("chime-timer.json"));
        assert_eq!(config.interval, None);
        assert_eq!(config.log_level(), "info");

        let settings = config.engine_settings();
        assert_eq!(settings.alarm_repeat, Duration::from_secs(2));
        assert_eq!(settings.default_interval_seconds, 3600);
        assert!(!settings.require_ack);
    }

    #[test]
    fn flags_map_to_settings() {
        let config = Config::try_parse_from([
            "chime-timer",
            "--interval",
            "25",
            "--repeat-secs",
            "0",
            "--require-ack",
            "--extra-sound",
            "Gong",
            "--extra-sound",
            "Kazoo",
            "-v",
        ])
        .expect("parse");
        assert_eq!(config.interval, Some(25));
        assert_eq!(config.extra_sounds, vec!["Gong", "Kazoo"]);
        assert_eq!(config.log_level(), "debug");

        let settings = config.engine_settings();
        assert_eq!(settings.alarm_repeat, Duration::from_secs(1));
        assert!(settings.require_ack);
    }
}
