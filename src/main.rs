//! Chime Timer - an elapsed-time interval timer with a repeating reminder
//!
//! This is the console entry point: it loads the timer, ticks it in the
//! background and reads commands from stdin.

use std::sync::Arc;
use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use chime_timer::{
    clock::SystemClock,
    config::Config,
    console::{handle_command, render_task, Command, Reply},
    engine::TimerEngine,
    sound::{SilentPlayer, SoundCatalog, SoundPlayer, TerminalBellPlayer},
    state::AppState,
    store::{JsonFileStore, KeyValueStore, MemoryStore},
    tasks::tick_loop_task,
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout belongs to the timer display
    tracing_subscriber::fmt()
        .with_env_filter(format!("chime_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting chime-timer v{}", env!("CARGO_PKG_VERSION"));

    let mut catalog = SoundCatalog::builtin();
    for sound in &config.extra_sounds {
        catalog.register(sound.as_str());
    }

    let player: Arc<dyn SoundPlayer> = if config.mute {
        Arc::new(SilentPlayer)
    } else {
        Arc::new(TerminalBellPlayer::new())
    };
    // Launching from a terminal is the user gesture; no need to wait for `start`
    if let Err(e) = player.activate() {
        warn!("Audio output unavailable: {}", e);
    }

    let store: Box<dyn KeyValueStore> = if config.ephemeral {
        info!("Using in-memory state");
        Box::new(MemoryStore::new())
    } else {
        info!("Using state file {}", config.store.display());
        Box::new(JsonFileStore::open(&config.store))
    };

    let engine = TimerEngine::load(
        Arc::new(SystemClock),
        store,
        player,
        catalog,
        config.engine_settings(),
    );
    let state = Arc::new(AppState::new(engine));

    if let Some(minutes) = config.interval {
        let outcome = state.set_reminder_interval_minutes(minutes)
            .map_err(anyhow::Error::msg)?;
        if !outcome.applied {
            warn!("--interval {} ignored", minutes);
        }
    }
    if let Some(sound) = &config.sound {
        let outcome = state.set_alarm_sound(sound).map_err(anyhow::Error::msg)?;
        if !outcome.applied {
            warn!("--sound '{}' ignored", sound);
        }
    }

    // Start the background tasks
    tokio::spawn(tick_loop_task(Arc::clone(&state)));
    tokio::spawn(render_task(Arc::clone(&state), !config.quiet));

    println!("{}", state.view().map_err(anyhow::Error::msg)?);
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command from stdin")? else {
                    info!("Input closed");
                    break;
                };
                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match handle_command(&state, command) {
                    Ok(Reply::Print(text)) => println!("{}", text),
                    Ok(Reply::Quit) => break,
                    Err(e) => error!("Command failed: {}", e),
                }
            }

            _ = &mut shutdown => {
                info!("Shutdown signal received");
                // a pending stdin read would hold up runtime shutdown;
                // every transition is already persisted
                std::process::exit(0);
            }
        }
    }

    info!("Shutdown complete");
    Ok(())
}
