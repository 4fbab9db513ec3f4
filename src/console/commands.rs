//! Console command parsing

use std::str::FromStr;

/// Help text listing every command
pub const HELP: &str = "\
commands:
  start | pause | toggle (or empty line)   start/pause the timer
  reset | stop                             stop and clear the timer
  ack | dismiss                            silence a ringing alarm
  interval <minutes>                       set the reminder interval
  sound <name>                             pick the alarm sound
  sounds                                   list available sounds
  status                                   show the timer
  json                                     show the timer as JSON
  help                                     show this help
  quit                                     exit";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    Acknowledge,
    /// Whole minutes; validated by the engine, not here
    Interval(i64),
    Sound(String),
    Sounds,
    Status,
    /// Machine-readable view for other front ends
    Json,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" | "toggle" => Command::Toggle,
            "start" | "resume" => Command::Start,
            "pause" => Command::Pause,
            "reset" | "stop" => Command::Reset,
            "ack" | "dismiss" => Command::Acknowledge,
            "interval" => {
                let minutes = rest.parse::<i64>().map_err(|_| {
                    format!("interval expects whole minutes, got '{}'", rest)
                })?;
                Command::Interval(minutes)
            }
            "sound" => {
                if rest.is_empty() {
                    return Err("sound expects a name; type 'sounds' to list them".to_string());
                }
                Command::Sound(rest.to_string())
            }
            "sounds" => Command::Sounds,
            "status" => Command::Status,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}'; type 'help'", other)),
        };

        if !rest.is_empty() && !matches!(command, Command::Interval(_) | Command::Sound(_)) {
            return Err(format!("'{}' takes no arguments", word));
        }
        Ok(command)
    }
}
