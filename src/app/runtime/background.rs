use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

/// Poll interval of the event reader; bounds how long exit waits for the thread.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What: Spawn the terminal event reading thread.
///
/// Inputs:
/// - `event_tx`: Channel sender for terminal events.
/// - `cancelled`: Flag the main loop sets on exit.
///
/// Details:
/// - Polls with a short timeout so the cancellation flag is checked regularly.
/// - Exits when cancelled or when the receiving side is dropped.
/// - Transient read and poll errors are ignored.
pub fn spawn_event_thread(event_tx: mpsc::UnboundedSender<CEvent>, cancelled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        while !cancelled.load(Ordering::Relaxed) {
            match crossterm::event::poll(POLL_INTERVAL) {
                Ok(true) => {
                    if let Ok(ev) = crossterm::event::read()
                        && (cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err())
                    {
                        break;
                    }
                }
                Ok(false) | Err(_) => {}
            }
        }
        tracing::debug!("[Runtime] Event thread exited");
    });
}
