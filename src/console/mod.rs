//! Console front end
//!
//! A line-oriented presentation layer: commands come in on stdin, the timer
//! view goes out on stdout.

pub mod commands;
pub mod handlers;

use std::sync::Arc;
use tracing::debug;

use crate::state::AppState;

pub use commands::{Command, HELP};
pub use handlers::{handle_command, Reply};

/// Print the view whenever the running clock moves or an alarm starts ringing.
///
/// Command replies print their own view, so idle changes are left to them.
pub async fn render_task(state: Arc<AppState>, every_tick: bool) {
    let mut view_rx = state.view_tx.subscribe();
    let mut last_elapsed = view_rx.borrow().elapsed_seconds;
    let mut was_ringing = view_rx.borrow().is_ringing;

    while view_rx.changed().await.is_ok() {
        let view = view_rx.borrow_and_update().clone();

        let started_ringing = view.is_ringing && !was_ringing;
        let clock_moved = view.is_running && view.elapsed_seconds != last_elapsed;
        last_elapsed = view.elapsed_seconds;
        was_ringing = view.is_ringing;

        if started_ringing || (every_tick && clock_moved) {
            println!("{}", view);
        }
    }
    debug!("View channel closed, stopping renderer");
}
