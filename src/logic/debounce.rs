use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Identifies one arming of a [`DebounceScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerToken(u64);

/// Single-slot timer: arming cancels whatever was pending.
///
/// The effect runs on the timer task and is expected to post a message carrying the
/// [`TimerToken`] back to the owner, which then calls [`DebounceScheduler::take_fired`].
/// A timer that fired but whose message is still queued when it gets superseded is
/// rejected there, so at most one effect is ever honored per arming.
#[derive(Debug, Default)]
pub struct DebounceScheduler {
    /// Pending timer and its token.
    armed: Option<(TimerToken, JoinHandle<()>)>,
    /// Next token to hand out.
    next_token: u64,
}

impl DebounceScheduler {
    /// Scheduler with nothing armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Arm a timer running `effect` after `delay`.
    ///
    /// Inputs:
    /// - `delay`: Quiet period before the effect runs.
    /// - `effect`: Receives the token of this arming.
    ///
    /// Output:
    /// - Token of the new arming.
    ///
    /// Details:
    /// - Any prior unfired timer is aborted first; new calls supersede, never coalesce.
    /// - Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, effect: F) -> TimerToken
    where
        F: FnOnce(TimerToken) + Send + 'static,
    {
        self.cancel();
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            effect(token);
        });
        self.armed = Some((token, handle));
        token
    }

    /// Abort the pending timer, if any. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some((token, handle)) = self.armed.take() {
            handle.abort();
            tracing::trace!(?token, "[Debounce] Cancelled pending timer");
        }
    }

    /// What: Accept a fired timer.
    ///
    /// Output:
    /// - `true` only when `token` is the currently armed timer; the scheduler is then disarmed.
    pub fn take_fired(&mut self, token: TimerToken) -> bool {
        match &self.armed {
            Some((armed, _)) if *armed == token => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a timer is armed and not yet accepted.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    /// What: Re-arming within the window fires only the last effect.
    ///
    /// Inputs:
    /// - Three arms 100ms apart with a 400ms delay.
    ///
    /// Output:
    /// - Exactly one message, carrying the last token, which `take_fired` accepts.
    async fn rearm_supersedes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = DebounceScheduler::new();
        let mut last = None;
        for _ in 0..3 {
            let tx = tx.clone();
            last = Some(scheduler.schedule(Duration::from_millis(400), move |t| {
                let _ = tx.send(t);
            }));
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        let fired = rx.recv().await.expect("timer fired");
        assert_eq!(Some(fired), last);
        assert!(scheduler.take_fired(fired));
        assert!(!scheduler.is_armed());
        assert!(
            timeout(Duration::from_secs(5), rx.recv()).await.is_err(),
            "superseded timers must not fire"
        );
    }

    #[tokio::test(start_paused = true)]
    /// What: Cancel prevents the effect and is idempotent.
    async fn cancel_prevents_fire() {
        let (tx, mut rx) = mpsc::unbounded_channel::<TimerToken>();
        let mut scheduler = DebounceScheduler::new();
        scheduler.schedule(Duration::from_millis(50), move |t| {
            let _ = tx.send(t);
        });
        scheduler.cancel();
        scheduler.cancel();
        assert!(!scheduler.is_armed());
        // The aborted task drops its sender, so the channel either times out or closes empty.
        assert!(!matches!(
            timeout(Duration::from_secs(1), rx.recv()).await,
            Ok(Some(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    /// What: A fired-but-queued timer is rejected once a newer arming exists.
    ///
    /// Details:
    /// - The first timer fires and its message waits in the channel; the owner re-arms before
    ///   reading it, so the stale token must not be accepted.
    async fn stale_fired_token_rejected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = DebounceScheduler::new();
        let tx1 = tx.clone();
        let first = scheduler.schedule(Duration::from_millis(10), move |t| {
            let _ = tx1.send(t);
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = scheduler.schedule(Duration::from_millis(10), move |t| {
            let _ = tx.send(t);
        });
        let queued = rx.recv().await.expect("first fired");
        assert_eq!(queued, first);
        assert!(!scheduler.take_fired(queued));
        let next = rx.recv().await.expect("second fired");
        assert_eq!(next, second);
        assert!(scheduler.take_fired(next));
    }
}
