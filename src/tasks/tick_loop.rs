//! Timer tick background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Cadence of elapsed-time recomputation while running
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that ticks the timer once per second while it runs.
///
/// Follows the running flag: a start begins a fresh tick schedule, a pause
/// or reset cancels it.
pub async fn tick_loop_task(state: Arc<AppState>) {
    info!("Starting tick loop task");

    let mut running_rx = state.running_tx.subscribe();

    loop {
        // Wait until the timer is running
        if !*running_rx.borrow_and_update() {
            if running_rx.changed().await.is_err() {
                debug!("Running flag closed, stopping tick loop");
                return;
            }
            continue;
        }

        debug!("Timer running, ticking every {:?}", TICK_PERIOD);
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = state.tick() {
                        error!("Failed to tick timer: {}", e);
                    }
                }

                // Running flag changed - stop ticking if the timer stopped
                changed = running_rx.changed() => {
                    if changed.is_err() {
                        debug!("Running flag closed, stopping tick loop");
                        return;
                    }
                    if !*running_rx.borrow_and_update() {
                        debug!("Timer stopped, cancelling tick schedule");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::{
        clock::Clock,
        engine::{EngineSettings, TimerEngine},
        sound::SoundCatalog,
        store::MemoryStore,
        testing::{origin, RecordingPlayer},
    };

    /// Wall clock that follows tokio's (pausable) time
    struct RuntimeClock {
        origin: DateTime<Utc>,
        started: Instant,
    }

    impl Clock for RuntimeClock {
        fn now(&self) -> DateTime<Utc> {
            let elapsed = chrono::Duration::from_std(self.started.elapsed())
                .unwrap_or_else(|_| chrono::Duration::zero());
            self.origin + elapsed
        }
    }

    fn app(interval: u64, player: Arc<RecordingPlayer>) -> Arc<AppState> {
        let clock = RuntimeClock {
            origin: origin(),
            started: Instant::now(),
        };
        let engine = TimerEngine::load(
            Arc::new(clock),
            Box::new(MemoryStore::new()),
            player,
            SoundCatalog::builtin(),
            EngineSettings {
                default_interval_seconds: interval,
                alarm_repeat: Duration::from_secs(2),
                preview_on_select: false,
                require_ack: false,
            },
        );
        Arc::new(AppState::new(engine))
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_only_while_running() {
        let state = app(3600, RecordingPlayer::new());
        tokio::spawn(tick_loop_task(Arc::clone(&state)));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(state.view().expect("view").elapsed_seconds, 0);

        state.start().expect("start");
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(state.view().expect("view").elapsed_seconds, 3);

        state.pause().expect("pause");
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(state.view().expect("view").elapsed_seconds, 3);

        state.start().expect("start");
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert_eq!(state.view().expect("view").elapsed_seconds, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn boundary_rings_and_repeats_until_acknowledged() {
        let player = RecordingPlayer::new();
        let state = app(5, player.clone());
        tokio::spawn(tick_loop_task(Arc::clone(&state)));

        state.start().expect("start");
        tokio::time::sleep(Duration::from_millis(5_500)).await;
        let view = state.view().expect("view");
        assert!(view.is_ringing);
        assert_eq!(player.play_count(), 1);

        // repeats at 7s and 9s after start
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(player.play_count(), 3);

        state.acknowledge_alarm().expect("ack");
        // keeps running; the next boundary at 10s rings again
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(state.view().expect("view").is_ringing);
        assert_eq!(player.play_count(), 4);

        state.reset().expect("reset");
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(player.play_count(), 4);
        assert_eq!(state.view().expect("view").elapsed_seconds, 0);
    }
}
