//! Console command handlers

use tracing::info;

use crate::state::{ActionOutcome, AppState};
use super::commands::{Command, HELP};

/// What to do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep reading
    Print(String),
    Quit,
}

fn describe(outcome: ActionOutcome, done: &str, unchanged: &str) -> Reply {
    let message = if outcome.applied { done } else { unchanged };
    Reply::Print(format!("{}\n{}", message, outcome.view))
}

/// Apply one command to the timer
pub fn handle_command(state: &AppState, command: Command) -> Result<Reply, String> {
    let reply = match command {
        Command::Start => describe(state.start()?, "Started", "Not started"),
        Command::Pause => describe(state.pause()?, "Paused", "Not running"),
        Command::Toggle => {
            let outcome = state.toggle()?;
            let done = if outcome.view.is_running { "Started" } else { "Paused" };
            describe(outcome, done, "Not started")
        }
        Command::Reset => describe(state.reset()?, "Reset", "Already reset"),
        Command::Acknowledge => describe(state.acknowledge_alarm()?, "Alarm dismissed", "No alarm ringing"),
        Command::Interval(minutes) => describe(
            state.set_reminder_interval_minutes(minutes)?,
            "Interval updated",
            "Interval unchanged",
        ),
        Command::Sound(sound) => describe(
            state.set_alarm_sound(&sound)?,
            "Sound updated",
            "Sound unchanged",
        ),
        Command::Sounds => {
            let view = state.view()?;
            let list = view
                .sounds
                .iter()
                .map(|sound| {
                    let marker = if *sound == view.alarm_sound { "*" } else { " " };
                    format!("{} {}", marker, sound)
                })
                .collect::<Vec<_>>()
                .join("\n");
            Reply::Print(list)
        }
        Command::Status => Reply::Print(format!(
            "{}\nsession uptime: {}",
            state.view()?,
            state.get_uptime()
        )),
        Command::Json => {
            let view = state.view()?;
            let json = serde_json::to_string(&view)
                .map_err(|e| format!("Failed to serialize view: {}", e))?;
            Reply::Print(json)
        }
        Command::Help => Reply::Print(HELP.to_string()),
        Command::Quit => {
            info!("Quit requested");
            Reply::Quit
        }
    };
    Ok(reply)
}
