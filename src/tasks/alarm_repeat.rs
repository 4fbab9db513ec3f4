//! Alarm repeat background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::sound::SoundPlayer;

/// Shortest cadence the alarm may repeat at
pub const MIN_REPEAT_PERIOD: Duration = Duration::from_millis(250);

/// Replay `sound` every `period` until the task is aborted.
///
/// The first replay happens one period after the alarm fired; the initial
/// sound is played by whoever spawned this task.
pub async fn alarm_repeat_task(player: Arc<dyn SoundPlayer>, sound: String, period: Duration) {
    let period = period.max(MIN_REPEAT_PERIOD);
    debug!("Repeating alarm '{}' every {:?}", sound, period);

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if let Err(e) = player.play(&sound) {
            warn!("Failed to replay alarm sound: {}", e);
        }
    }
}
